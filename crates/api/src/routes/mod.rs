pub mod health;
pub mod template;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /templates/{id}                                  get, merge-update
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/templates", template::router())
}
