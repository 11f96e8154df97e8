//! Route definitions for the `/templates` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::template;
use crate::state::AppState;

/// Routes mounted at `/templates`.
///
/// ```text
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(template::get_by_id).put(template::update))
}
