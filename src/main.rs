//! etcd bootstrap service.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                 BOOTSTRAP SERVICE                │
//!   Client Request    │  ┌─────────┐   ┌──────────┐   ┌──────────────┐   │
//!   ──────────────────┼─▶│  http   │──▶│  params  │──▶│  templates   │   │
//!                     │  │ server  │   │ decode + │   │ render into  │   │
//!                     │  │         │   │ origin   │   │ buffer       │   │
//!                     │  └─────────┘   └──────────┘   └──────┬───────┘   │
//!   Client Response   │  ┌─────────┐                         │           │
//!   ◀─────────────────┼──│response │◀────────────────────────┘           │
//!                     │  └─────────┘                                     │
//!                     │  config · observability · lifecycle              │
//!                     └──────────────────────────────────────────────────┘
//! ```
//!
//! Templates are loaded once at startup; failure to load them is fatal.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use etcd_bootstrap::config::{load_config, validate_config, ServiceConfig};
use etcd_bootstrap::lifecycle::Shutdown;
use etcd_bootstrap::observability::{logging, metrics};
use etcd_bootstrap::{HttpServer, TemplateStore};

#[derive(Parser)]
#[command(name = "etcd-bootstrap")]
#[command(about = "Serves etcd cluster bootstrap scripts", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,

    /// Override templates.glob
    #[arg(short, long)]
    templates: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                logging::init(&ServiceConfig::default().observability.log_level);
                tracing::error!(path = %path.display(), "ERROR: {}", e);
                std::process::exit(2);
            }
        },
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(glob) = cli.templates {
        config.templates.glob = glob;
    }

    logging::init(&config.observability.log_level);

    if let Err(errors) = validate_config(&config) {
        for e in &errors {
            tracing::error!("Invalid configuration: {}", e);
        }
        std::process::exit(2);
    }

    tracing::info!("etcd-bootstrap v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        templates = %config.templates.glob,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let templates = match TemplateStore::load(&config.templates.glob).and_then(|store| {
        store.require(&[
            config.templates.usage.as_str(),
            config.templates.bootstrap.as_str(),
        ])?;
        Ok(store)
    }) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(templates = ?templates.names(), "Templates loaded");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(templates));
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
