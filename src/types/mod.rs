pub mod forms;
pub mod session;

pub use forms::{GenerateForm, LoginForm, RegisterForm, UpdateSecretForm};
pub use session::SessionToken;
