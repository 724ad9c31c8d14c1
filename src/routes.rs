//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST   /url`       - Save a link (Basic-Auth)
//! - `DELETE /url/{id}`  - Delete a link (Basic-Auth)
//! - `GET    /health`    - Storage liveness (public)
//! - `GET    /{alias}`   - Redirect (public)
//!
//! # Middleware
//!
//! Outermost first: request id, request tracing, panic recovery, request
//! timeout. Authentication is a route layer on the `/url` routes only.

use std::time::Duration;

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler, redirect_handler};
use crate::api::middleware::{auth, panic, timeout, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::ServiceBuilder;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - requests still running after this are answered with
///   `408 Request Timeout`
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let url_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .nest("/url", url_router)
        .route("/health", get(health_handler))
        .route("/{alias}", get(redirect_handler))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(tracing::set_request_id_layer())
                .layer(tracing::layer())
                .layer(tracing::propagate_request_id_layer())
                .layer(panic::layer())
                .layer(timeout::layer(request_timeout)),
        )
}
