//! SQLite implementation of link repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, RepositoryError};
use crate::infrastructure::persistence::schema::SQLITE_INIT;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite repository for link storage and retrieval.
///
/// The pool is cheap to clone; SQLite itself serializes writers, so the
/// alias `UNIQUE` constraint is the only arbiter between concurrent inserts.
#[derive(Clone)]
pub struct SqliteLinkRepository {
    pool: SqlitePool,
}

impl SqliteLinkRepository {
    /// Wraps an existing pool. The schema is not touched.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database file at `path` and ensures the
    /// schema exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the file
    /// cannot be opened, or schema initialization fails.
    pub async fn connect(
        path: impl AsRef<Path>,
        max_connections: u32,
    ) -> Result<Self, RepositoryError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| RepositoryError::Database(sqlx::Error::Io(e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repository = Self::new(pool);
        repository.init_schema().await?;

        tracing::debug!(path = %path.display(), "SQLite storage ready");

        Ok(repository)
    }

    /// Creates the `links` table and its alias index if they do not exist.
    pub async fn init_schema(&self) -> Result<(), RepositoryError> {
        for statement in SQLITE_INIT {
            sqlx::query(*statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, RepositoryError> {
        sqlx::query_as::<_, Link>(
            "INSERT INTO links (alias, url) VALUES (?, ?) RETURNING id, alias, url",
        )
        .bind(&new_link.alias)
        .bind(&new_link.url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepositoryError::AliasExists
            } else {
                RepositoryError::Database(e)
            }
        })
    }

    async fn find_url_by_alias(&self, alias: &str) -> Result<String, RepositoryError> {
        sqlx::query_scalar::<_, String>("SELECT url FROM links WHERE alias = ?")
            .bind(alias)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM links WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
