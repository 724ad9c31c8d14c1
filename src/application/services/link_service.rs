//! Link creation, lookup and deletion service.

use std::sync::Arc;
use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, RepositoryError};
use crate::error::AppError;
use crate::utils::alias::AliasGenerator;

/// First delay between generated-alias attempts, in milliseconds.
const RETRY_BASE_MILLIS: u64 = 5;

/// Upper bound for a single backoff delay.
const RETRY_MAX_DELAY: Duration = Duration::from_millis(100);

/// Tunables for alias assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkServiceConfig {
    /// Length of generated aliases.
    pub alias_length: usize,
    /// Extra attempts after a generated alias collides. Zero disables retry.
    pub alias_retries: usize,
}

impl Default for LinkServiceConfig {
    fn default() -> Self {
        Self {
            alias_length: 6,
            alias_retries: 3,
        }
    }
}

/// Service for creating, resolving and deleting short links.
///
/// Storage outcomes are mapped to client-facing [`AppError`]s here; backend
/// details are logged and never returned.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    generator: Arc<AliasGenerator>,
    config: LinkServiceConfig,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        generator: Arc<AliasGenerator>,
        config: LinkServiceConfig,
    ) -> Self {
        Self {
            repository,
            generator,
            config,
        }
    }

    /// Stores `url` under `alias`, or under a generated alias when `alias` is `None`.
    ///
    /// The caller is expected to have validated both values.
    ///
    /// # Collisions
    ///
    /// An explicit alias that is already taken fails immediately. A generated
    /// alias that collides is replaced by a fresh one up to
    /// [`LinkServiceConfig::alias_retries`] times, with jittered exponential
    /// backoff between attempts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasExists`] if the alias is taken (or every
    /// generated alias collided) and [`AppError::Internal`] on storage failure.
    pub async fn save(&self, url: &str, alias: Option<&str>) -> Result<Link, AppError> {
        const OP: &str = "link_service.save";

        let result = match alias {
            Some(alias) => {
                self.repository
                    .create(NewLink {
                        alias: alias.to_string(),
                        url: url.to_string(),
                    })
                    .await
            }
            None => self.save_generated(url).await,
        };

        match result {
            Ok(link) => {
                tracing::info!(op = OP, id = link.id, alias = %link.alias, "url saved");
                Ok(link)
            }
            Err(RepositoryError::AliasExists) => {
                tracing::info!(op = OP, url, "url already exists");
                Err(AppError::AliasExists)
            }
            Err(e) => {
                tracing::error!(op = OP, error = %e, "failed to add url");
                Err(AppError::Internal("failed to add url"))
            }
        }
    }

    async fn save_generated(&self, url: &str) -> Result<Link, RepositoryError> {
        let strategy = ExponentialBackoff::from_millis(RETRY_BASE_MILLIS)
            .max_delay(RETRY_MAX_DELAY)
            .map(jitter)
            .take(self.config.alias_retries);

        RetryIf::spawn(
            strategy,
            || {
                let new_link = NewLink {
                    alias: self.generator.generate(self.config.alias_length),
                    url: url.to_string(),
                };
                let repository = Arc::clone(&self.repository);
                async move { repository.create(new_link).await }
            },
            |e: &RepositoryError| {
                let collided = matches!(e, RepositoryError::AliasExists);
                if collided {
                    tracing::debug!("generated alias collided, retrying");
                }
                collided
            },
        )
        .await
    }

    /// Returns the URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this alias and
    /// [`AppError::Internal`] on storage failure.
    pub async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        const OP: &str = "link_service.resolve";

        match self.repository.find_url_by_alias(alias).await {
            Ok(url) => {
                tracing::info!(op = OP, alias, url = %url, "got url");
                Ok(url)
            }
            Err(RepositoryError::NotFound) => {
                tracing::info!(op = OP, alias, "url not found");
                Err(AppError::NotFound("not found"))
            }
            Err(e) => {
                tracing::error!(op = OP, alias, error = %e, "failed to get url");
                Err(AppError::Internal("internal error"))
            }
        }
    }

    /// Deletes the link with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id does not exist and
    /// [`AppError::Internal`] on storage failure.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        const OP: &str = "link_service.delete";

        match self.repository.delete_by_id(id).await {
            Ok(()) => {
                tracing::info!(op = OP, id, "url deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound) => {
                tracing::info!(op = OP, id, "url id not found");
                Err(AppError::NotFound("url id not found"))
            }
            Err(e) => {
                tracing::error!(op = OP, id, error = %e, "failed to delete url");
                Err(AppError::Internal("failed to delete url"))
            }
        }
    }

    /// Returns true if storage answers queries.
    pub async fn is_healthy(&self) -> bool {
        match self.repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "storage ping failed");
                false
            }
        }
    }
}
