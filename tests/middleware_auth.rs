mod common;

use axum::http::{HeaderValue, StatusCode, header};
use serde_json::json;

#[tokio::test]
async fn test_save_without_credentials() {
    let db = common::create_test_db().await;
    let server = common::create_test_server(common::create_test_state(db.repository.clone()));

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "nope" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "status": "Error", "error": "unauthorized" }));
    assert_eq!(
        response.header("www-authenticate"),
        "Basic realm=\"link-shortener\""
    );
}

#[tokio::test]
async fn test_save_with_wrong_password() {
    let db = common::create_test_db().await;
    let server = common::create_test_server(common::create_test_state(db.repository.clone()));

    let response = server
        .post("/url")
        .add_header(header::AUTHORIZATION, common::basic_auth("user", "wrong"))
        .json(&json!({ "url": "https://example.com", "alias": "nope" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_save_with_wrong_user() {
    let db = common::create_test_db().await;
    let server = common::create_test_server(common::create_test_state(db.repository.clone()));

    let response = server
        .post("/url")
        .add_header(header::AUTHORIZATION, common::basic_auth("admin", "pass"))
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_scheme_rejected() {
    let db = common::create_test_db().await;
    let server = common::create_test_server(common::create_test_state(db.repository.clone()));

    let response = server
        .post("/url")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer dXNlcjpwYXNz"),
        )
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_without_credentials_keeps_link() {
    let db = common::create_test_db().await;
    let id = common::create_test_link(&db.repository, "safe", "https://safe.com").await;
    let server = common::create_test_server(common::create_test_state(db.repository.clone()));

    let response = server.delete(&format!("/url/{id}")).await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    server.get("/safe").await.assert_status(StatusCode::FOUND);
}

#[tokio::test]
async fn test_rejected_save_is_not_stored() {
    let db = common::create_test_db().await;
    let server = common::create_test_server(common::create_test_state(db.repository.clone()));

    server
        .post("/url")
        .add_header(header::AUTHORIZATION, common::basic_auth("user", "wrong"))
        .json(&json!({ "url": "https://example.com", "alias": "sneaky" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/sneaky")
        .await
        .assert_json(&json!({ "status": "Error", "error": "not found" }));
}
