//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. Variables may come from the process environment or from a dotenv
//! file: `CONFIG_PATH` names the file, otherwise `.env` is tried if present.
//!
//! ## Required Variables
//!
//! - `STORAGE_PATH` - SQLite database file
//! - `HTTP_USER`, `HTTP_PASSWORD` - Basic-Auth credentials for `/url`
//!
//! ## Optional Variables
//!
//! - `ENV` - `local`, `dev` or `prod` (default: `prod`)
//! - `HTTP_ADDRESS` - Bind address (default: `localhost:8080`)
//! - `HTTP_TIMEOUT` - Request and header-read timeout in seconds (default: 4)
//! - `HTTP_IDLE_TIMEOUT` - Keep-alive idle timeout in seconds (default: 60)
//! - `ALIAS_LENGTH` - Generated alias length (default: 6)
//! - `ALIAS_RETRIES` - Extra attempts for colliding generated aliases (default: 3)
//! - `DB_MAX_CONNECTIONS` - SQLite pool size (default: 5)
//! - `RUST_LOG` - Overrides the log level chosen by `ENV`

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Deployment environment; selects log format and verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Human-readable logs at `debug`.
    Local,
    /// JSON logs at `debug`.
    Dev,
    /// JSON logs at `info`.
    #[default]
    Prod,
}

impl Environment {
    /// Parses an environment name. Unknown names fall back to [`Environment::Prod`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "dev" | "development" => Self::Dev,
            _ => Self::Prod,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Prod => "prod",
        })
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone)]
pub struct HttpServer {
    pub address: String,
    pub timeout: Duration,
    pub idle_timeout: Duration,
    pub user: String,
    pub password: String,
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub env: Environment,
    pub storage_path: PathBuf,
    pub http_server: HttpServer,
    pub alias_length: usize,
    pub alias_retries: usize,
    pub db_max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a numeric
    /// variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let env = env::var("ENV")
            .map(|v| Environment::from_name(&v))
            .unwrap_or_default();

        let storage_path = env::var("STORAGE_PATH")
            .map(PathBuf::from)
            .context("STORAGE_PATH must be set")?;

        let address = env::var("HTTP_ADDRESS").unwrap_or_else(|_| "localhost:8080".to_string());
        let timeout = Duration::from_secs(parse_var("HTTP_TIMEOUT", 4)?);
        let idle_timeout = Duration::from_secs(parse_var("HTTP_IDLE_TIMEOUT", 60)?);
        let user = env::var("HTTP_USER").context("HTTP_USER must be set")?;
        let password = env::var("HTTP_PASSWORD").context("HTTP_PASSWORD must be set")?;

        let alias_length = parse_var("ALIAS_LENGTH", 6)?;
        let alias_retries = parse_var("ALIAS_RETRIES", 3)?;
        let db_max_connections = parse_var("DB_MAX_CONNECTIONS", 5)?;

        Ok(Self {
            env,
            storage_path,
            http_server: HttpServer {
                address,
                timeout,
                idle_timeout,
                user,
                password,
            },
            alias_length,
            alias_retries,
            db_max_connections,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `storage_path` is empty
    /// - `http_server.address` is not `host:port`
    /// - a timeout is zero
    /// - the Basic-Auth user or password is empty
    /// - `alias_length` is outside 1-64 or `alias_retries` above 10
    /// - `db_max_connections` is zero
    pub fn validate(&self) -> Result<()> {
        if self.storage_path.as_os_str().is_empty() {
            anyhow::bail!("STORAGE_PATH must not be empty");
        }

        if !self.http_server.address.contains(':') {
            anyhow::bail!(
                "HTTP_ADDRESS must be in format 'host:port', got '{}'",
                self.http_server.address
            );
        }

        if self.http_server.timeout.is_zero() {
            anyhow::bail!("HTTP_TIMEOUT must be greater than 0");
        }

        if self.http_server.idle_timeout.is_zero() {
            anyhow::bail!("HTTP_IDLE_TIMEOUT must be greater than 0");
        }

        if self.http_server.user.is_empty() || self.http_server.password.is_empty() {
            anyhow::bail!("HTTP_USER and HTTP_PASSWORD must not be empty");
        }

        if self.alias_length == 0 || self.alias_length > 64 {
            anyhow::bail!(
                "ALIAS_LENGTH must be between 1 and 64, got {}",
                self.alias_length
            );
        }

        if self.alias_retries > 10 {
            anyhow::bail!(
                "ALIAS_RETRIES must be at most 10, got {}",
                self.alias_retries
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {}", self.env);
        tracing::info!("  Storage: {}", self.storage_path.display());
        tracing::info!("  Listen address: {}", self.http_server.address);
        tracing::info!(
            "  Timeouts: request {}s, idle {}s",
            self.http_server.timeout.as_secs(),
            self.http_server.idle_timeout.as_secs()
        );
        tracing::info!(
            "  Basic auth: {}:{}",
            self.http_server.user,
            mask_secret(&self.http_server.password)
        );
        tracing::info!(
            "  Aliases: length {}, retries {}",
            self.alias_length,
            self.alias_retries
        );
    }
}

/// Reads `name` and parses it, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Masks a secret for logging, keeping nothing of its content.
fn mask_secret(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "***" }
}

/// Loads variables from the dotenv file named by `CONFIG_PATH`, or from
/// `.env` if it exists. Variables already set in the process win.
///
/// # Errors
///
/// Returns an error only if `CONFIG_PATH` is set and the file cannot be read.
pub fn load_env_file() -> Result<()> {
    match env::var("CONFIG_PATH") {
        Ok(path) => {
            dotenvy::from_path(&path)
                .with_context(|| format!("failed to read config file '{path}'"))?;
        }
        Err(_) => {
            dotenvy::dotenv().ok();
        }
    }
    Ok(())
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via [`load_env_file`] in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
