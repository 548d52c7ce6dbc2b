//! Database module: models, schema and queries for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: connection setup and the `VaultStorage` query layer

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{EntryId, PasswordEntry, User, UserId};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, VaultStorage, connect};
