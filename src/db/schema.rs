//! SQL DDL for the account table.

/// SQLite schema with:
/// - `username` UNIQUE, compared with the default BINARY collation (case-sensitive)
/// - `password` holding the Argon2id PHC string, never plaintext
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    username TEXT UNIQUE,
    password TEXT
);
"#;
