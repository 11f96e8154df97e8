use std::sync::Arc;

use dockyard_db::TemplateStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Template persistence (PostgreSQL or in-memory).
    pub store: Arc<dyn TemplateStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
