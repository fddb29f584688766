use anyhow::Result;

/// Resolve once the process is asked to stop (SIGTERM / Ctrl+C).
pub async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?; // Ctrl+C
        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok(())
    }
}

/// Like [`wait_for_shutdown`], but never fails: a broken signal handler
/// falls back to plain Ctrl+C. Suitable for `axum::serve(..).with_graceful_shutdown`.
pub async fn shutdown_signal() {
    match wait_for_shutdown().await {
        Ok(()) => tracing::info!("shutdown: signal received"),
        Err(e) => {
            tracing::warn!(
                error = %e,
                "shutdown: primary waiter failed; falling back to ctrl_c()"
            );
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}
