//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by link storage.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The alias uniqueness constraint rejected the insert.
    #[error("link with the same alias already exists")]
    AliasExists,

    /// No row matched the lookup or delete.
    #[error("link not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository interface for managing short links.
///
/// Every method is a single atomic statement; nothing spans calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::AliasExists`] if the alias is already taken.
    /// Returns [`RepositoryError::Database`] on any other storage failure.
    async fn create(&self, new_link: NewLink) -> Result<Link, RepositoryError>;

    /// Returns the URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no link has this alias.
    async fn find_url_by_alias(&self, alias: &str) -> Result<String, RepositoryError>;

    /// Removes the link with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no row was removed, which also
    /// covers a concurrent delete that won the race.
    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;

    /// Checks that the backing database answers queries.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
