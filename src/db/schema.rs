//! SQL DDL for initializing the vault storage.

/// SQLite schema with:
/// - `users.username` UNIQUE, enforced at commit time
/// - `password_entries.user_id` NOT NULL foreign key to `users(id)`
/// - `password_entries.secret` stored as plaintext TEXT
/// - index on `password_entries(user_id)` for per-owner listing
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS password_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    name TEXT NOT NULL,
    secret TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_password_entries_user_id ON password_entries(user_id);
"#;
