#![allow(dead_code)]

use std::sync::Arc;

use passvault::config::{Config, HasherConfig};
use passvault::db::{SqlitePool, VaultStorage, connect};
use passvault::service::{Argon2Hasher, PasswordGenerator, VaultService};
use tempfile::TempDir;

/// Keep the returned `TempDir` alive for as long as the pool is used.
pub async fn test_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let database_url = format!("sqlite:{}", dir.path().join("vault.sqlite").display());
    let pool = connect(&database_url).await.expect("failed to open sqlite");
    VaultStorage::new(pool.clone())
        .init_schema()
        .await
        .expect("failed to init schema");
    (dir, pool)
}

/// Low-cost hashing so tests stay fast; production defaults are much higher.
pub fn test_config() -> Config {
    let mut cfg = Config::default();
    cfg.basic.insecure_cookie = true;
    cfg.hasher = HasherConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };
    cfg
}

pub fn test_service(pool: SqlitePool) -> VaultService {
    let cfg = test_config();
    VaultService::new(
        VaultStorage::new(pool),
        Arc::new(Argon2Hasher::new(&cfg.hasher).expect("valid hasher params")),
        PasswordGenerator::new(&cfg.generator),
    )
}
