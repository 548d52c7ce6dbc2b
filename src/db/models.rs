use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub type UserId = i64;
pub type EntryId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// PHC-format hash; never the plaintext and never sent to clients.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A generated credential owned by exactly one user.
///
/// `secret` is stored and returned as plaintext. There is no at-rest
/// encryption of entry secrets; anyone with read access to the database
/// file can read every stored password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct PasswordEntry {
    pub id: EntryId,
    pub user_id: UserId,
    pub name: String,
    pub secret: String,
    pub created_at: DateTime<Utc>,
}
