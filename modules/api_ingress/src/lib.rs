//! HTTP host for the flights server.
//!
//! Owns the outer router: health and docs endpoints, the middleware stack
//! (request id, tracing, timeout, CORS, body limit) and the listener.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{extract::DefaultBodyLimit, middleware::from_fn, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

pub struct ApiIngress {
    config: ApiIngressConfig,
    openapi: Option<Arc<utoipa::openapi::OpenApi>>,
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new(ApiIngressConfig::default())
    }
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config,
            openapi: None,
        }
    }

    /// Serve this document at `/openapi.json` (and `/docs` when enabled).
    pub fn with_openapi(mut self, doc: utoipa::openapi::OpenApi) -> Self {
        self.openapi = Some(Arc::new(doc));
        self
    }

    /// Merge module routes under the host endpoints and wrap everything in the middleware stack.
    pub fn build_router(&self, routes: Router) -> Router {
        tracing::debug!("Building router");
        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .merge(routes);

        if let Some(doc) = self.openapi.clone() {
            router = router.route(
                "/openapi.json",
                get(move || {
                    let doc = doc.clone();
                    async move { Json((*doc).clone()) }
                }),
            );
            if self.config.enable_docs {
                router = router.route("/docs", get(web::serve_docs));
            }
        }

        // Layers added later wrap the earlier ones, so the list runs innermost → outermost.
        router = router.layer(DefaultBodyLimit::max(self.config.body_limit_bytes));
        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        let x_request_id = request_id::header();
        router
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.request_timeout_sec,
            )))
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
    }

    /// Resolve the listen address: explicit `bind_addr`, else the fallback `host:port`.
    pub fn bind_addr(&self, fallback_host: &str, fallback_port: u16) -> Result<SocketAddr> {
        let raw = if self.config.bind_addr.trim().is_empty() {
            format!("{fallback_host}:{fallback_port}")
        } else {
            self.config.bind_addr.clone()
        };
        raw.parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", raw, e))
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn serve<F>(&self, addr: SocketAddr, router: Router, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server bound on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve until SIGTERM / Ctrl+C.
    pub async fn serve_until_signal(&self, addr: SocketAddr, router: Router) -> Result<()> {
        self.serve(addr, router, modkit::shutdown::shutdown_signal())
            .await
    }
}
