//! # produkd: produk daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Resolve configuration (defaults, `produk.toml`, env vars)
//! - Install the `tracing` subscriber
//! - Open the selected storage; for `SQLite` this retries a fixed number of
//!   times and aborts the process if the database never answers
//! - Construct the product service, injecting the repository via its port
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use produk_adapter_http_axum::state::AppState;
use produk_adapter_storage_memory::InMemoryProductRepository;
use produk_adapter_storage_sqlite_sqlx::SqliteProductRepository;
use produk_app::ports::ProductRepository;
use produk_app::services::product_service::ProductService;

use crate::config::{Config, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.logging.filter);

    if let Err(err) = run(config).await {
        tracing::error!(error = ?err, "produkd stopped");
        return Err(err);
    }
    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?} ({err}), falling back to info");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(config: Config) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr();

    match config.storage.backend {
        StorageBackend::Sqlite => {
            let db = config
                .sqlite()
                .build()
                .await
                .context("could not open the product database")?;
            serve(SqliteProductRepository::new(db.pool().clone()), &bind_addr).await
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage, products are lost on restart");
            serve(InMemoryProductRepository::new(), &bind_addr).await
        }
    }
}

async fn serve<R>(repo: R, bind_addr: &str) -> anyhow::Result<()>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let state = AppState::new(ProductService::new(repo));
    let app = produk_adapter_http_axum::router::build(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(address = %bind_addr, "produkd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    tracing::info!("produkd shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
