//! Shared application state.
//!
//! One clonable struct handed to every handler. The database handle is
//! itself a pool clone, so cloning the state is cheap.

use std::sync::Arc;

use banca_db::Database;

use crate::config::AppConfig;

/// Application state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (connection pool + repositories).
    pub db: Database,

    /// Read-only configuration loaded at startup.
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}
