use std::sync::Arc;

use sketchbook_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database handle: connection pool plus the selected write strategy.
    pub store: Store,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
