//! Database module: the local account table.
//!
//! Layout:
//! - `models.rs`: row struct and the signup outcome
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: per-operation connection handling and queries

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{AccountCreation, DbAccount};
pub use schema::SQLITE_INIT;
pub use sqlite::AccountsStorage;
