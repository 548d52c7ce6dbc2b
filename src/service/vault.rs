use std::sync::Arc;

use tracing::{info, warn};

use crate::db::{EntryId, PasswordEntry, User, UserId, VaultStorage};
use crate::error::VaultError;
use crate::service::generator::PasswordGenerator;
use crate::service::guard::assert_ownership;
use crate::service::hasher::CredentialHasher;
use crate::types::session::SessionToken;

/// The vault's core operations: registration, login, and owner-gated
/// management of generated password entries.
#[derive(Clone)]
pub struct VaultService {
    storage: VaultStorage,
    hasher: Arc<dyn CredentialHasher>,
    generator: PasswordGenerator,
}

impl VaultService {
    pub fn new(
        storage: VaultStorage,
        hasher: Arc<dyn CredentialHasher>,
        generator: PasswordGenerator,
    ) -> Self {
        Self {
            storage,
            hasher,
            generator,
        }
    }

    pub async fn register_user(
        &self,
        username: &str,
        plaintext: &str,
    ) -> Result<User, VaultError> {
        let password_hash = self.hash_blocking(plaintext.to_string()).await?;
        let user = self
            .storage
            .create_user(username, &password_hash)
            .await
            .inspect_err(|e| {
                if matches!(e, VaultError::DuplicateUsername) {
                    info!(username, "registration rejected: username taken");
                }
            })?;
        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Unknown usernames and wrong passwords both yield `InvalidCredentials`.
    pub async fn authenticate(
        &self,
        username: &str,
        plaintext: &str,
    ) -> Result<SessionToken, VaultError> {
        let Some(user) = self.storage.find_user_by_username(username).await? else {
            warn!(username, "login failed: unknown user");
            return Err(VaultError::InvalidCredentials);
        };

        if !self
            .verify_blocking(plaintext.to_string(), user.password_hash.clone())
            .await?
        {
            warn!(username, "login failed: password mismatch");
            return Err(VaultError::InvalidCredentials);
        }

        info!(user_id = user.id, "user authenticated");
        Ok(SessionToken::issue(user.id))
    }

    pub async fn find_user(&self, user_id: UserId) -> Result<Option<User>, VaultError> {
        self.storage.find_user_by_id(user_id).await
    }

    pub async fn generate_and_store_password(
        &self,
        user_id: UserId,
        service_name: &str,
        length: Option<i64>,
        include_symbols: bool,
    ) -> Result<PasswordEntry, VaultError> {
        let secret = self.generator.generate(length, include_symbols)?;
        let entry = self
            .storage
            .create_entry(user_id, service_name, &secret)
            .await?;
        info!(
            user_id,
            entry_id = entry.id,
            length = entry.secret.len(),
            include_symbols,
            "password generated and stored"
        );
        Ok(entry)
    }

    pub async fn list_user_passwords(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PasswordEntry>, VaultError> {
        self.storage.list_entries_for_user(user_id).await
    }

    pub async fn get_password(
        &self,
        entry_id: EntryId,
        requester_id: UserId,
    ) -> Result<PasswordEntry, VaultError> {
        self.owned_entry(entry_id, requester_id).await
    }

    pub async fn update_password(
        &self,
        entry_id: EntryId,
        requester_id: UserId,
        new_secret: &str,
    ) -> Result<PasswordEntry, VaultError> {
        self.owned_entry(entry_id, requester_id).await?;
        let entry = self
            .storage
            .update_entry_secret(entry_id, new_secret)
            .await?;
        info!(user_id = requester_id, entry_id, "password updated");
        Ok(entry)
    }

    pub async fn delete_password(
        &self,
        entry_id: EntryId,
        requester_id: UserId,
    ) -> Result<(), VaultError> {
        self.owned_entry(entry_id, requester_id).await?;
        self.storage.delete_entry(entry_id).await?;
        info!(user_id = requester_id, entry_id, "password deleted");
        Ok(())
    }

    /// Resolve an entry and apply the ownership guard before it is used.
    async fn owned_entry(
        &self,
        entry_id: EntryId,
        requester_id: UserId,
    ) -> Result<PasswordEntry, VaultError> {
        let entry = self
            .storage
            .find_entry(entry_id)
            .await?
            .ok_or(VaultError::NotFound)?;
        assert_ownership(entry.user_id, requester_id).inspect_err(|_| {
            warn!(
                entry_id,
                owner_id = entry.user_id,
                requester_id,
                "ownership check failed"
            );
        })?;
        Ok(entry)
    }

    async fn hash_blocking(&self, plaintext: String) -> Result<String, VaultError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| VaultError::UnexpectedError(format!("hashing task failed: {e}")))?
    }

    async fn verify_blocking(&self, plaintext: String, hash: String) -> Result<bool, VaultError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .map_err(|e| VaultError::UnexpectedError(format!("verify task failed: {e}")))
    }
}
