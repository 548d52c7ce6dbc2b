//! Layered configuration: compiled defaults, then `config.toml`, then
//! `PASSVAULT_*` environment variables (`__` separates sections).

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "PASSVAULT_";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub generator: GeneratorConfig,
    pub hasher: HasherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// Base64 key (at least 64 bytes once decoded) used to encrypt session
    /// cookies. A random key is generated at startup when unset.
    pub cookie_key: Option<String>,
    /// Drop the `Secure` attribute from session cookies (plain-HTTP dev setups).
    pub insecure_cookie: bool,
    pub session_ttl_secs: u64,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:passwords.db".to_string(),
            loglevel: "info".to_string(),
            cookie_key: None,
            insecure_cookie: false,
            session_ttl_secs: 60 * 60 * 24,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub default_length: usize,
    pub max_length: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_length: 12,
            max_length: 1024,
        }
    }
}

/// Argon2id cost parameters. Defaults follow the argon2 crate's
/// recommended settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HasherConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl Config {
    /// Load from `config.toml` in the working directory plus env overrides.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment(DEFAULT_CONFIG_FILE).extract()
    }

    /// Build the figment for an explicit config file path.
    pub fn figment(path: &str) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Parse a TOML document on top of the defaults, ignoring the environment.
    pub fn from_toml_str(content: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(content))
            .extract()
    }
}
