//! Last-resort conversion of handler panics into JSON responses.

use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::api::dto::response::StatusResponse;

/// Creates a layer that turns a panic into
/// `500 {"status":"Error","error":"internal error"}` instead of dropping the
/// connection.
pub fn layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(handle_panic as fn(Box<dyn Any + Send + 'static>) -> Response)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = details, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(StatusResponse::error("internal error")),
    )
        .into_response()
}
