use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tracing::warn;

use crate::config::Config;
use crate::db::{SqlitePool, VaultStorage};
use crate::error::VaultError;
use crate::handlers::{auth, passwords};
use crate::middleware::session::{SessionManager, cookie_key};
use crate::service::generator::PasswordGenerator;
use crate::service::hasher::Argon2Hasher;
use crate::service::vault::VaultService;

/// Shared handler state. Cloned per request; holds no mutable state of its own.
#[derive(Clone)]
pub struct VaultState {
    pub vault: VaultService,
    pub sessions: SessionManager,
    key: Key,
}

impl VaultState {
    pub fn new(vault: VaultService, sessions: SessionManager, key: Key) -> Self {
        Self {
            vault,
            sessions,
            key,
        }
    }

    /// Wire storage, hasher, generator and sessions from configuration.
    /// Expects the schema to be initialized already.
    pub fn from_config(cfg: &Config, pool: SqlitePool) -> Result<Self, VaultError> {
        let hasher = Arc::new(Argon2Hasher::new(&cfg.hasher)?);
        let vault = VaultService::new(
            VaultStorage::new(pool),
            hasher,
            PasswordGenerator::new(&cfg.generator),
        );
        let key = match cookie_key(&cfg.basic)? {
            Some(key) => key,
            None => {
                warn!(
                    "no cookie_key configured; generated an ephemeral key, sessions end on restart"
                );
                Key::generate()
            }
        };
        Ok(Self::new(vault, SessionManager::from_config(&cfg.basic), key))
    }
}

impl FromRef<VaultState> for Key {
    fn from_ref(state: &VaultState) -> Self {
        state.key.clone()
    }
}

pub fn vault_router(state: VaultState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route(
            "/passwords",
            get(passwords::list_passwords).post(passwords::generate_password),
        )
        .route(
            "/passwords/{id}",
            get(passwords::show_password)
                .put(passwords::update_password)
                .delete(passwords::delete_password),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
