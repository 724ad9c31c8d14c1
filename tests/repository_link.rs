mod common;

use link_shortener::domain::entities::NewLink;
use link_shortener::domain::repositories::{LinkRepository, RepositoryError};
use link_shortener::infrastructure::persistence::SqliteLinkRepository;

fn new_link(alias: &str, url: &str) -> NewLink {
    NewLink {
        alias: alias.to_string(),
        url: url.to_string(),
    }
}

#[tokio::test]
async fn test_create_returns_stored_link() {
    let db = common::create_test_db().await;

    let link = db
        .repository
        .create(new_link("google", "https://google.com"))
        .await
        .unwrap();

    assert!(link.id > 0);
    assert_eq!(link.alias, "google");
    assert_eq!(link.url, "https://google.com");
}

#[tokio::test]
async fn test_create_assigns_increasing_ids() {
    let db = common::create_test_db().await;

    let first = common::create_test_link(&db.repository, "a", "https://a.com").await;
    let second = common::create_test_link(&db.repository, "b", "https://b.com").await;

    assert!(second > first);
}

#[tokio::test]
async fn test_create_duplicate_alias() {
    let db = common::create_test_db().await;
    common::create_test_link(&db.repository, "google", "https://google.com").await;

    let result = db
        .repository
        .create(new_link("google", "https://other.com"))
        .await;

    assert!(matches!(result, Err(RepositoryError::AliasExists)));
    assert_eq!(
        db.repository.find_url_by_alias("google").await.unwrap(),
        "https://google.com"
    );
}

#[tokio::test]
async fn test_same_url_under_two_aliases() {
    let db = common::create_test_db().await;

    common::create_test_link(&db.repository, "one", "https://example.com").await;
    common::create_test_link(&db.repository, "two", "https://example.com").await;

    assert_eq!(
        db.repository.find_url_by_alias("one").await.unwrap(),
        db.repository.find_url_by_alias("two").await.unwrap()
    );
}

#[tokio::test]
async fn test_aliases_are_case_sensitive() {
    let db = common::create_test_db().await;

    common::create_test_link(&db.repository, "Docs", "https://upper.example").await;
    common::create_test_link(&db.repository, "docs", "https://lower.example").await;

    assert_eq!(
        db.repository.find_url_by_alias("Docs").await.unwrap(),
        "https://upper.example"
    );
    assert_eq!(
        db.repository.find_url_by_alias("docs").await.unwrap(),
        "https://lower.example"
    );
}

#[tokio::test]
async fn test_find_url_by_alias_not_found() {
    let db = common::create_test_db().await;

    let result = db.repository.find_url_by_alias("missing").await;

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_url_stored_verbatim() {
    let db = common::create_test_db().await;
    let url = "HTTPS://Example.com/Path/?q=1#frag";

    common::create_test_link(&db.repository, "raw", url).await;

    assert_eq!(db.repository.find_url_by_alias("raw").await.unwrap(), url);
}

#[tokio::test]
async fn test_delete_by_id() {
    let db = common::create_test_db().await;
    let id = common::create_test_link(&db.repository, "gone", "https://gone.com").await;

    db.repository.delete_by_id(id).await.unwrap();

    let result = db.repository.find_url_by_alias("gone").await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_delete_twice_reports_not_found() {
    let db = common::create_test_db().await;
    let id = common::create_test_link(&db.repository, "once", "https://once.com").await;

    db.repository.delete_by_id(id).await.unwrap();
    let result = db.repository.delete_by_id(id).await;

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_delete_unknown_id() {
    let db = common::create_test_db().await;

    let result = db.repository.delete_by_id(999_999).await;

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_alias_reusable_after_delete() {
    let db = common::create_test_db().await;
    let id = common::create_test_link(&db.repository, "reuse", "https://old.com").await;

    db.repository.delete_by_id(id).await.unwrap();
    common::create_test_link(&db.repository, "reuse", "https://new.com").await;

    assert_eq!(
        db.repository.find_url_by_alias("reuse").await.unwrap(),
        "https://new.com"
    );
}

#[tokio::test]
async fn test_concurrent_creates_same_alias() {
    let db = common::create_test_db().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let repository = db.repository.clone();
        handles.push(tokio::spawn(async move {
            repository
                .create(new_link("race", &format!("https://race.com/{i}")))
                .await
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(RepositoryError::AliasExists) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
}

#[tokio::test]
async fn test_ping() {
    let db = common::create_test_db().await;

    assert!(db.repository.ping().await.is_ok());
}

#[tokio::test]
async fn test_ping_fails_on_closed_pool() {
    let db = common::create_test_db().await;
    db.repository.pool().close().await;

    assert!(db.repository.ping().await.is_err());
}

#[tokio::test]
async fn test_reopen_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.db");

    {
        let repository = SqliteLinkRepository::connect(&path, 1).await.unwrap();
        common::create_test_link(&repository, "kept", "https://kept.com").await;
        repository.pool().close().await;
    }

    let repository = SqliteLinkRepository::connect(&path, 1).await.unwrap();

    assert_eq!(
        repository.find_url_by_alias("kept").await.unwrap(),
        "https://kept.com"
    );
}
