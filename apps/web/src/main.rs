//! # banca-web
//!
//! The Banca POS presentation layer: a thin request/response web view over
//! the local store.
//!
//! This binary provides:
//! - **Sales view**: barcode lookup + confirm, manual entry + confirm
//! - **Inventory view**: read-only catalog table with low-stock flags
//! - **Revenue view**: today's total, the day's rows, xlsx export
//! - **Registration view**: new-product form with margin price suggestion
//!
//! Every view recomputes from current store state on each request; the only
//! state that survives an interaction is what the store itself persists.

mod config;
mod error;
mod export;
mod routes;
mod state;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use banca_db::{Database, DbConfig};

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,banca_web=debug")),
        )
        .init();

    info!("Starting Banca POS v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = AppConfig::from_env()?;
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Open the store (creates the file and schema on first start)
    // -----------------------------------------------------------------------
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!(path = %config.database_path.display(), "Store ready");

    // -----------------------------------------------------------------------
    // 4. Serve the views
    // -----------------------------------------------------------------------
    let http_addr = config.http_addr;
    let app = routes::build_router(AppState::new(db, config));

    let listener = TcpListener::bind(http_addr).await?;
    info!(addr = %http_addr, "Listening");

    axum::serve(listener, app).await?;

    Ok(())
}
