//! SQL DDL applied on every startup.
//!
//! Every statement is idempotent so opening an existing database is safe.

/// Statements run in order by [`super::SqliteLinkRepository::init_schema`].
pub const SQLITE_INIT: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS links (
        id INTEGER PRIMARY KEY,
        alias TEXT NOT NULL UNIQUE,
        url TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_alias ON links(alias)",
];
