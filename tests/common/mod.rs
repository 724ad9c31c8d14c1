#![allow(dead_code)]

use axum::http::HeaderValue;
use axum_test::TestServer;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use link_shortener::application::services::{LinkService, LinkServiceConfig};
use link_shortener::domain::entities::NewLink;
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::infrastructure::persistence::SqliteLinkRepository;
use link_shortener::routes::app_router;
use link_shortener::state::{AppState, BasicCredentials};
use link_shortener::utils::alias::AliasGenerator;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const TEST_USER: &str = "user";
pub const TEST_PASSWORD: &str = "pass";

/// SQLite database living in a temporary directory for the test's duration.
pub struct TestDb {
    pub repository: Arc<SqliteLinkRepository>,
    _dir: TempDir,
}

pub async fn create_test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let repository = SqliteLinkRepository::connect(dir.path().join("storage.db"), 5)
        .await
        .unwrap();

    TestDb {
        repository: Arc::new(repository),
        _dir: dir,
    }
}

pub async fn create_test_link(repository: &SqliteLinkRepository, alias: &str, url: &str) -> i64 {
    repository
        .create(NewLink {
            alias: alias.to_string(),
            url: url.to_string(),
        })
        .await
        .unwrap()
        .id
}

pub async fn count_links(repository: &SqliteLinkRepository) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(repository.pool())
        .await
        .unwrap()
}

pub fn create_test_state(repository: Arc<SqliteLinkRepository>) -> AppState {
    create_test_state_with(repository, LinkServiceConfig::default())
}

pub fn create_test_state_with(
    repository: Arc<SqliteLinkRepository>,
    config: LinkServiceConfig,
) -> AppState {
    let link_service = LinkService::new(repository, Arc::new(AliasGenerator::seeded(42)), config);

    AppState::new(
        Arc::new(link_service),
        BasicCredentials::new(TEST_USER, TEST_PASSWORD),
    )
}

/// Full application router, middleware included.
pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state, Duration::from_secs(4))).unwrap()
}

pub fn basic_auth(user: &str, password: &str) -> HeaderValue {
    let encoded = STANDARD.encode(format!("{user}:{password}"));
    HeaderValue::from_str(&format!("Basic {encoded}")).unwrap()
}

pub fn valid_auth() -> HeaderValue {
    basic_auth(TEST_USER, TEST_PASSWORD)
}
