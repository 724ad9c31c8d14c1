//! Tracing subscriber setup.
//!
//! The format and default level follow [`Environment`]:
//!
//! | Environment | Format | Level   |
//! |-------------|--------|---------|
//! | `local`     | text   | `debug` |
//! | `dev`       | JSON   | `debug` |
//! | `prod`      | JSON   | `info`  |
//!
//! `RUST_LOG`, when set, replaces the default level.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Default filter directive for `env`.
pub fn default_level(env: Environment) -> &'static str {
    match env {
        Environment::Local | Environment::Dev => "debug",
        Environment::Prod => "info",
    }
}

/// Installs the global tracing subscriber for `env`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init(env: Environment) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(env)));

    let registry = Registry::default().with(filter);

    let installed = match env {
        Environment::Local => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init(),
        Environment::Dev | Environment::Prod => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_ansi(false),
            )
            .try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}
