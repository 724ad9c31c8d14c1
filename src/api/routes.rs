//! API route configuration.
//!
//! The link management endpoints require Basic authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{delete_handler, save_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, post},
};

/// Link management routes, mounted under `/url`.
///
/// # Endpoints
///
/// - `POST   /`     - Save a URL under an alias
/// - `DELETE /{id}` - Delete a link by id
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(save_handler))
        .route("/{id}", delete(delete_handler))
}
