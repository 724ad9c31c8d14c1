//! Handler for link deletion.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::response::StatusResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes a link by its numeric id.
///
/// # Endpoint
///
/// `DELETE /url/{id}` (Basic-Auth)
///
/// # Errors
///
/// `"invalid id"` if `{id}` is not an integer, `"url id not found"` if no link
/// has this id, `"failed to delete url"` on storage failure.
pub async fn delete_handler(
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, AppError> {
    let id: i64 = raw_id.parse().map_err(|e| {
        tracing::error!(id = %raw_id, error = %e, "can't parse url id");
        AppError::InvalidId
    })?;

    state.link_service.delete(id).await?;

    Ok(Json(StatusResponse::ok()))
}
