//! Pinger collector.
//!
//! # Architecture Overview
//!
//! ```text
//!     POST /  ──▶ http (request id, CORS, access log, body limit)
//!                   │
//!                   ▼
//!                 ingest::handler ──▶ validation ──▶ store::Gateway
//!                                                      │        │
//!                                               "minimal"    "full"
//!                                                      ▼        ▼
//!                                                 DocumentStore (MongoDB / memory)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use pinger_collector::config::{check_config, load_config, CollectorConfig, StoreBackend, StoreMode};
use pinger_collector::lifecycle::{signals, Shutdown};
use pinger_collector::observability::{logging, metrics};
use pinger_collector::{store, CollectorServer};

#[derive(Parser, Debug)]
#[command(name = "pinger-collector", version)]
#[command(about = "Collects pinger identity submissions into a document store", long_about = None)]
struct Cli {
    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Host to listen on [default: 127.0.0.1]
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on [default: 5000]
    #[arg(long)]
    port: Option<u16>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write to the test database and drop its collections on exit
    #[arg(long)]
    ephemeral: bool,

    /// Keep documents in process memory instead of MongoDB
    #[arg(long)]
    memory_store: bool,

    /// MongoDB connection string
    #[arg(long)]
    store_uri: Option<String>,
}

impl Cli {
    /// Flags take precedence over the file and environment.
    fn apply(&self, config: &mut CollectorConfig) {
        if self.debug {
            config.observability.debug = true;
        }
        if let Some(host) = &self.host {
            config.listener.host = host.clone();
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if self.ephemeral {
            config.store.mode = StoreMode::Ephemeral;
        }
        if self.memory_store {
            config.store.backend = StoreBackend::Memory;
        }
        if let Some(uri) = &self.store_uri {
            config.store.uri = uri.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    logging::init_logging(config.observability.debug);
    tracing::info!("pinger-collector v{} starting", env!("CARGO_PKG_VERSION"));

    check_config(&config)?;

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        max_field_length = config.limits.max_field_length,
        store_backend = ?config.store.backend,
        store_mode = ?config.store.mode,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    // Store connectivity is the one unrecoverable failure: refuse to start without it.
    let gateway = store::connect(&config.store).await?;

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on(signals::wait_for_signal());

    let server = CollectorServer::new(config, gateway.clone());
    let served = server.run(listener, server_shutdown).await;
    let released = gateway.shutdown().await;

    served?;
    released?;

    tracing::info!("Shutdown complete");
    Ok(())
}
