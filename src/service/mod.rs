pub mod generator;
pub mod guard;
pub mod hasher;
pub mod vault;

pub use generator::PasswordGenerator;
pub use guard::assert_ownership;
pub use hasher::{Argon2Hasher, CredentialHasher};
pub use vault::VaultService;
