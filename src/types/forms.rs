//! Request payloads accepted by the HTTP boundary, with field validation.

use serde::Deserialize;

use crate::error::VaultError;

const USERNAME_MIN_CHARS: usize = 2;
const USERNAME_MAX_CHARS: usize = 150;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), VaultError> {
        require_non_empty("username", &self.username)?;
        let chars = self.username.chars().count();
        if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&chars) {
            return Err(VaultError::InvalidArgument(format!(
                "username must be between {USERNAME_MIN_CHARS} and {USERNAME_MAX_CHARS} characters"
            )));
        }
        require_non_empty("password", &self.password)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), VaultError> {
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateForm {
    pub name: String,
    /// Falls back to the generator's default length when absent.
    #[serde(default)]
    pub length: Option<i64>,
    #[serde(default)]
    pub special_chars: bool,
}

impl GenerateForm {
    pub fn validate(&self) -> Result<(), VaultError> {
        require_non_empty("name", &self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSecretForm {
    pub password: String,
}

impl UpdateSecretForm {
    pub fn validate(&self) -> Result<(), VaultError> {
        require_non_empty("password", &self.password)
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), VaultError> {
    if value.trim().is_empty() {
        return Err(VaultError::InvalidArgument(format!("{field} is required")));
    }
    Ok(())
}
