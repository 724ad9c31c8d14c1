//! Per-request timeout.

use std::time::Duration;

use axum::http::StatusCode;
use tower_http::timeout::TimeoutLayer;

/// Answers `408 Request Timeout` for requests still running after `timeout`.
pub fn layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::get};
    use axum_test::TestServer;

    fn router(timeout: Duration) -> Router {
        Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    "done"
                }),
            )
            .route("/fast", get(|| async { "done" }))
            .layer(layer(timeout))
    }

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let server = TestServer::new(router(Duration::from_millis(50))).unwrap();

        let response = server.get("/slow").await;

        response.assert_status(StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_fast_request_passes() {
        let server = TestServer::new(router(Duration::from_secs(1))).unwrap();

        let response = server.get("/fast").await;

        response.assert_status_ok();
        response.assert_text("done");
    }
}
