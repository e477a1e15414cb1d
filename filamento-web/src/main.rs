//! filamento-web - Filament spool inventory web service
//!
//! Serves the selection wizard, maintenance screens and inventory view over a
//! SQLite catalog. Configuration resolves CLI > ENV > TOML > compiled default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use filamento_common::config::{ConfigOverrides, DatabaseLocation, ServiceConfig, TomlConfig};
use filamento_web::api::version::BuildInfo;
use filamento_web::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for filamento-web
#[derive(Parser, Debug)]
#[command(name = "filamento-web")]
#[command(about = "Filament spool inventory tracker")]
#[command(version)]
struct Args {
    /// Path to a TOML config file (default: ~/.config/filamento/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder holding the database file
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Database name; the file is <root_folder>/<database>.db
    #[arg(short, long)]
    database: Option<String>,

    /// Full SQLite connection URL, overrides --root-folder and --database
    #[arg(long)]
    database_url: Option<String>,

    /// Address to listen on
    #[arg(short, long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log filter when RUST_LOG is not set (e.g. "info", "filamento_web=debug")
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            root_folder: self.root_folder.clone(),
            database: self.database.clone(),
            database_url: self.database_url.clone(),
            bind_address: self.bind.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = TomlConfig::load(args.config.as_deref());
    let config = ServiceConfig::resolve(&args.overrides(), &toml_config)
        .context("Invalid configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", config.log_level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let build = BuildInfo::CURRENT;
    info!(
        "Starting Filamento (filamento-web) v{} [{}] built {} ({})",
        build.version, build.git_hash, build.build_timestamp, build.build_profile
    );

    match &config.database {
        DatabaseLocation::File(path) => info!("Database path: {}", path.display()),
        DatabaseLocation::Url(url) => info!("Database URL: {}", url),
    }

    let pool = match filamento_common::db::open_database(&config.database).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool.clone());
    let app = build_router(state);

    let address = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("filamento-web listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        // Keep serving; the process can still be killed externally
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
