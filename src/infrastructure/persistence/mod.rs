//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! runtime-checked queries and bound parameters.
//!
//! # Repositories
//!
//! - [`SqliteLinkRepository`] - Link storage and retrieval

pub mod schema;
pub mod sqlite_link_repository;

pub use sqlite_link_repository::SqliteLinkRepository;
