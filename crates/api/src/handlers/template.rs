//! Handlers for the `/templates` resource.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use dockyard_core::template::Template;
use dockyard_core::types::DbId;
use dockyard_core::update::decode_update;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Parse the `{id}` route segment into a positive template ID.
fn parse_template_id(raw: &str) -> AppResult<DbId> {
    match raw.parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest(
            "Invalid template identifier route variable".to_string(),
        )),
    }
}

/// GET /api/templates/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Template>> {
    let id = parse_template_id(&raw_id)?;
    let template = state.store.fetch(id).await?;
    Ok(Json(template))
}

/// PUT /api/templates/{id}
///
/// Merge a sparse JSON document into the stored template and return the
/// merged result. The template is loaded before the body is decoded, so an
/// unknown ID is reported as 404 even when the body is invalid.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> AppResult<Json<Template>> {
    let id = parse_template_id(&raw_id)?;
    let mut template = state.store.fetch(id).await?;

    let input = decode_update(&body)?;
    let previous_type = template.template_type();
    input.apply(&mut template);

    state.store.store(&template).await?;

    tracing::info!(
        id,
        template_type = %template.template_type(),
        type_changed = previous_type != template.template_type(),
        "Template updated",
    );
    Ok(Json(template))
}
