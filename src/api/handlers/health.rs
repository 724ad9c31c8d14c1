//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::response::StatusResponse;
use crate::state::AppState;

/// Reports whether storage answers queries.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: `{"status":"OK"}`
/// - **503 Service Unavailable**: `{"status":"Error","error":"storage unavailable"}`
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<StatusResponse>) {
    if state.link_service.is_healthy().await {
        (StatusCode::OK, Json(StatusResponse::ok()))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(StatusResponse::error("storage unavailable")),
        )
    }
}
