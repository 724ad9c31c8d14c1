//! Utility functions shared across layers and the admin CLI.
//!
//! - [`alias`] - Random alias generation and alias validation
//! - [`url_check`] - Absolute URL validation

pub mod alias;
pub mod url_check;
