//! # Link Shortener
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! The crate keeps the usual layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link entity and repository trait
//! - **Application Layer** ([`application`]) - Alias assignment and storage outcome mapping
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence
//! - **API Layer** ([`api`]) - Handlers, DTOs, and middleware
//!
//! ## Endpoints
//!
//! - `POST /url` - Save a URL under a given or generated alias (Basic-Auth)
//! - `DELETE /url/{id}` - Delete a link by id (Basic-Auth)
//! - `GET /{alias}` - Redirect to the stored URL
//! - `GET /health` - Storage liveness
//!
//! ## Quick Start
//!
//! ```bash
//! export STORAGE_PATH="./storage/storage.db"
//! export HTTP_USER="admin"
//! export HTTP_PASSWORD="secret"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod logging;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, LinkServiceConfig};
    pub use crate::domain::entities::{Link, NewLink};
    pub use crate::error::AppError;
    pub use crate::state::{AppState, BasicCredentials};
}
