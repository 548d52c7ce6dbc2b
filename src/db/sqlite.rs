use crate::db::models::{EntryId, PasswordEntry, User, UserId};
use crate::db::schema::SQLITE_INIT;
use crate::error::VaultError;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Open a pool for `database_url`, creating the file when missing.
/// Foreign keys are enforced on every connection.
pub async fn connect(database_url: &str) -> Result<SqlitePool, VaultError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct VaultStorage {
    pool: SqlitePool,
}

impl VaultStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), VaultError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a user. The UNIQUE constraint on `username` decides races
    /// between concurrent registrations.
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, VaultError> {
        let result = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (username, password_hash, created_at)
               VALUES (?, ?, ?)
               RETURNING id, username, password_hash, created_at"#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(VaultError::DuplicateUsername)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, VaultError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, VaultError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Entries owned by `user_id`, oldest first.
    pub async fn list_entries_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PasswordEntry>, VaultError> {
        let rows = sqlx::query_as::<_, PasswordEntry>(
            r#"SELECT id, user_id, name, secret, created_at
               FROM password_entries WHERE user_id = ? ORDER BY id"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert an entry. An unknown owner fails the foreign key and is
    /// reported as `NotFound`.
    pub async fn create_entry(
        &self,
        user_id: UserId,
        name: &str,
        secret: &str,
    ) -> Result<PasswordEntry, VaultError> {
        let result = sqlx::query_as::<_, PasswordEntry>(
            r#"INSERT INTO password_entries (user_id, name, secret, created_at)
               VALUES (?, ?, ?, ?)
               RETURNING id, user_id, name, secret, created_at"#,
        )
        .bind(user_id)
        .bind(name)
        .bind(secret)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(entry) => Ok(entry),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                debug!(user_id, "entry insert rejected: owner does not exist");
                Err(VaultError::NotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_entry(&self, id: EntryId) -> Result<Option<PasswordEntry>, VaultError> {
        let entry = sqlx::query_as::<_, PasswordEntry>(
            r#"SELECT id, user_id, name, secret, created_at
               FROM password_entries WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }

    pub async fn update_entry_secret(
        &self,
        id: EntryId,
        new_secret: &str,
    ) -> Result<PasswordEntry, VaultError> {
        sqlx::query_as::<_, PasswordEntry>(
            r#"UPDATE password_entries SET secret = ?
               WHERE id = ?
               RETURNING id, user_id, name, secret, created_at"#,
        )
        .bind(new_secret)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(VaultError::NotFound)
    }

    pub async fn delete_entry(&self, id: EntryId) -> Result<(), VaultError> {
        let result = sqlx::query("DELETE FROM password_entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(VaultError::NotFound);
        }
        Ok(())
    }
}
