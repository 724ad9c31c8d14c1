//! Core domain entities.
//!
//! Entities follow the "New Type" pattern with a separate struct for creation:
//! [`NewLink`] carries what the caller supplies, [`Link`] what storage returns.

pub mod link;

pub use link::{Link, NewLink};
