//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on the HTTP or persistence layers.
//! Repository traits define contracts implemented by
//! [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
