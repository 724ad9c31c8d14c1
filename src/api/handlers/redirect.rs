//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::alias::is_valid_alias;
use crate::utils::url_check::escape_for_location;

/// Redirects an alias to its stored URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Response
///
/// `302 Found` with `Location` set to the stored URL. Non-ASCII and control
/// bytes are percent-escaped; everything else is sent verbatim.
///
/// # Errors
///
/// `{"status":"Error","error":"not found"}` for unknown or malformed aliases
/// (malformed ones never reach storage), `"internal error"` on storage failure.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if !is_valid_alias(&alias) {
        tracing::info!(alias = %alias, "malformed alias");
        return Err(AppError::NotFound("not found"));
    }

    let url = state.link_service.resolve(&alias).await?;

    let location = HeaderValue::from_str(&escape_for_location(&url)).map_err(|e| {
        tracing::error!(alias = %alias, error = %e, "stored url is not a valid header value");
        AppError::Internal("internal error")
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Fallback for unmatched routes.
pub async fn not_found_handler() -> Response {
    let mut response = AppError::NotFound("not found").into_response();
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}
