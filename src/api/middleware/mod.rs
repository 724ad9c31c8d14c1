//! HTTP middleware for request processing and protection.
//!
//! Provides authentication, panic recovery, request timeout and observability
//! middleware.

pub mod auth;
pub mod panic;
pub mod timeout;
pub mod tracing;
