pub mod auth;
pub mod passwords;
