//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization; request
//! validation goes through `validator`.

pub mod response;
pub mod save;
