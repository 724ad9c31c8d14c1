//! Handler for the save endpoint.

use axum::{Json, body::Bytes, extract::State};

use crate::api::dto::save::{SaveRequest, SaveResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Stores a URL under a caller-chosen or generated alias.
///
/// # Endpoint
///
/// `POST /url` (Basic-Auth)
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "alias": "myalias" }
/// ```
///
/// The body is decoded regardless of `Content-Type`; a JSON `null` body is
/// treated like `{}`.
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "myalias", "id": 1 }
/// ```
///
/// # Errors
///
/// All failures are `200 OK` with `{"status":"Error","error":"..."}`:
/// empty body, undecodable JSON, field validation, invalid or reserved alias,
/// alias already taken, or a storage failure.
pub async fn save_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SaveResponse>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        tracing::error!("request body is empty");
        return Err(AppError::EmptyRequest);
    }

    let request: SaveRequest = serde_json::from_slice::<Option<SaveRequest>>(&body)
        .map_err(|e| {
            tracing::error!(error = %e, "failed to decode request body");
            AppError::Decode(e)
        })?
        .unwrap_or_default();

    tracing::debug!(?request, "request body decoded");

    if let Err(e) = request.check() {
        tracing::info!(error = %e, "invalid request");
        return Err(e);
    }

    let link = state
        .link_service
        .save(request.target_url(), request.requested_alias())
        .await?;

    Ok(Json(SaveResponse::ok(link.alias, link.id)))
}
