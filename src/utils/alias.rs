//! Alias generation and validation utilities.
//!
//! Generated aliases are drawn from a seeded, non-cryptographic PRNG. They are
//! not guaranteed unique: collisions are detected by the storage uniqueness
//! constraint.

use std::sync::{LazyLock, Mutex};

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

use crate::error::AppError;

/// Aliases accepted from callers: ASCII letters, digits, `-` and `_`.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias regex is valid"));

/// Aliases that would shadow service routes.
pub const RESERVED_ALIASES: &[&str] = &["url", "health"];

/// Source of random aliases over the 62-character alphanumeric alphabet.
///
/// One instance is created at startup and shared through application state.
/// The internal lock makes it safe to call from concurrent request tasks;
/// tests construct it with [`AliasGenerator::seeded`] for reproducible output.
#[derive(Debug)]
pub struct AliasGenerator {
    rng: Mutex<StdRng>,
}

impl AliasGenerator {
    /// Creates a generator seeded once from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a generator with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Returns exactly `length` characters drawn uniformly, with replacement,
    /// from `A-Z`, `a-z` and `0-9`.
    pub fn generate(&self, length: usize) -> String {
        // A poisoned lock still holds a usable RNG state.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        (&mut *rng)
            .sample_iter(Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }
}

impl Default for AliasGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true if `alias` only contains letters, digits, hyphens and underscores.
pub fn is_valid_alias(alias: &str) -> bool {
    ALIAS_REGEX.is_match(alias)
}

/// Validates a caller-supplied alias.
///
/// # Errors
///
/// Returns [`AppError::InvalidAlias`] for characters outside `[A-Za-z0-9_-]`
/// (including the empty string) and [`AppError::ReservedAlias`] for aliases
/// listed in [`RESERVED_ALIASES`].
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if !is_valid_alias(alias) {
        return Err(AppError::InvalidAlias);
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::ReservedAlias);
    }

    Ok(())
}
