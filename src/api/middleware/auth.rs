//! HTTP Basic authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;

use crate::{error::AppError, state::AppState};

/// Authenticates requests against the configured Basic-Auth credentials.
///
/// # Header Format
///
/// ```text
/// Authorization: Basic base64(<user>:<password>)
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with a `WWW-Authenticate: Basic` challenge if
/// the header is missing, malformed, or carries the wrong credentials.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/url", post(save_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBasic((user, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            tracing::info!("missing or malformed basic auth header");
            AppError::Unauthorized
        })?;

    if !st
        .credentials
        .matches(&user, password.as_deref().unwrap_or_default())
    {
        tracing::info!(user = %user, "basic auth rejected");
        return Err(AppError::Unauthorized);
    }

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
