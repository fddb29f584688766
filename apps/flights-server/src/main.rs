use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use utoipa::OpenApi;

use api_ingress::{ApiIngress, ApiIngressConfig};
use flights::api::rest::FlightsApiDoc;
use flights::domain::service::Service;
use flights::infra::storage::{migrations::Migrator, SeaOrmFlightsRepository};
use flights::infra::supplier::HttpSupplierClient;
use flights::FlightsConfig;

const MEMORY_DSN: &str = "sqlite::memory:";

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if is_memory_dsn(dsn) {
        return Ok(MEMORY_DSN.to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    // Rebuild DSN with absolute path and normalized slashes; create the file on first run
    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    out.push('?');
    out.push_str(query.unwrap_or("mode=rwc"));
    Ok(out)
}

fn is_memory_dsn(dsn: &str) -> bool {
    dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
}

/// Flights Server - local flights merged with supplier offers
#[derive(Parser)]
#[command(name = "flights-server")]
#[command(about = "Flights Server - local flights merged with supplier offers")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / mock db / verbosity)
    config.apply_cli_overrides(&args);

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Flights Server starting");

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Only SQLite is wired in.
fn check_dsn(cfg: &DatabaseConfig) -> Result<()> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    if is_memory_dsn(raw) {
        return Ok(());
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;
    match url.scheme() {
        "sqlite" => Ok(()),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

async fn connect_db(cfg: &DatabaseConfig, base_dir: &Path) -> Result<DatabaseConnection> {
    check_dsn(cfg)?;
    let dsn = absolutize_sqlite_dsn(cfg.url.trim(), base_dir, true)?;

    let mut opts = ConnectOptions::new(dsn.clone());
    // each pooled connection to :memory: would see its own empty database
    let max_conns = if is_memory_dsn(&dsn) {
        1
    } else {
        cfg.max_conns.unwrap_or(10)
    };
    opts.max_connections(max_conns)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if let Some(ms) = cfg.busy_timeout_ms {
        opts.map_sqlx_sqlite_opts(move |o| o.busy_timeout(Duration::from_millis(u64::from(ms))));
    }

    tracing::info!("Connecting to database: {}", dsn);
    let db = Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {dsn}"))?;

    Migrator::up(&db, None)
        .await
        .context("failed to run migrations")?;
    tracing::info!("Database ready");
    Ok(db)
}

/// Listen address: `modules.api_ingress.bind_addr` when set, else `server.host:server.port`.
fn resolve_bind_addr(config: &AppConfig) -> Result<SocketAddr> {
    let ingress_cfg: ApiIngressConfig = config.module_config("api_ingress")?;
    ApiIngress::new(ingress_cfg).bind_addr(&config.server.host, config.server.port)
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let flights_cfg: FlightsConfig = config.module_config("flights")?;
    let ingress_cfg: ApiIngressConfig = config.module_config("api_ingress")?;

    let db_cfg = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("No database configuration found"))?;
    let db = connect_db(&db_cfg, Path::new(&config.server.home_dir)).await?;

    let supplier = HttpSupplierClient::from_config(&flights_cfg)?;
    tracing::info!(
        supplier = %flights_cfg.supplier_base_url,
        timeout_ms = flights_cfg.supplier_timeout_ms,
        "Supplier client configured"
    );

    let service = Arc::new(Service::new(
        Arc::new(SeaOrmFlightsRepository::new(db)),
        Arc::new(supplier),
    ));

    let ingress = ApiIngress::new(ingress_cfg).with_openapi(FlightsApiDoc::openapi());
    let router = ingress.build_router(flights::api::rest::router(service));
    let addr = resolve_bind_addr(&config)?;

    ingress.serve_until_signal(addr, router).await
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let flights_cfg: FlightsConfig = config.module_config("flights")?;
    Url::parse(&flights_cfg.supplier_base_url)
        .with_context(|| format!("invalid supplier_base_url '{}'", flights_cfg.supplier_base_url))?;
    resolve_bind_addr(&config)?;
    if let Some(db) = &config.database {
        check_dsn(db)?;
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_dsn_is_kept() {
        let out = absolutize_sqlite_dsn("sqlite://:memory:", Path::new("/srv"), false).unwrap();
        assert_eq!(out, MEMORY_DSN);
    }

    #[test]
    fn relative_sqlite_path_is_resolved_against_base() {
        let out = absolutize_sqlite_dsn("sqlite://database/flights.db", Path::new("/srv/app"), false)
            .unwrap();
        assert_eq!(out, "sqlite:///srv/app/database/flights.db?mode=rwc");

        let with_query =
            absolutize_sqlite_dsn("sqlite:///tmp/f.db?mode=ro", Path::new("/srv"), false).unwrap();
        assert_eq!(with_query, "sqlite:///tmp/f.db?mode=ro");
    }

    #[test]
    fn port_flag_moves_listener_under_sample_config() {
        let sample = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/flights.yaml");
        let mut config = AppConfig::load_or_default(Some(&sample)).unwrap();
        assert_eq!(resolve_bind_addr(&config).unwrap().port(), 8087);

        config.apply_cli_overrides(&CliArgs {
            config: None,
            port: Some(9999),
            print_config: false,
            verbose: 0,
            mock: false,
        });
        assert_eq!(resolve_bind_addr(&config).unwrap().port(), 9999);
    }

    #[test]
    fn non_sqlite_dsn_is_rejected() {
        let cfg = DatabaseConfig {
            url: "postgres://localhost/flights".into(),
            max_conns: None,
            busy_timeout_ms: None,
        };
        assert!(check_dsn(&cfg).is_err());
    }
}
