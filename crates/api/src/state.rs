use std::sync::Arc;

use catdb_db::CatStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Record store (PostgreSQL or in-memory).
    pub store: Arc<dyn CatStore>,
}
