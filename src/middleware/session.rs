//! Cookie-backed sessions: `Anonymous -> Authenticated -> Anonymous`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use base64::Engine;
use chrono::Utc;
use std::convert::Infallible;
use tracing::debug;

use crate::config::BasicConfig;
use crate::db::{User, UserId};
use crate::error::VaultError;
use crate::router::VaultState;
use crate::types::session::SessionToken;

pub const SESSION_COOKIE: &str = "passvault_session";

/// Establishes, resolves and tears down the authenticated identity held in
/// an encrypted private cookie.
#[derive(Debug, Clone)]
pub struct SessionManager {
    ttl: chrono::Duration,
    secure: bool,
}

impl SessionManager {
    pub fn new(ttl_secs: u64, secure: bool) -> Self {
        let ttl_secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self {
            ttl: chrono::Duration::try_seconds(ttl_secs).unwrap_or(chrono::Duration::MAX),
            secure,
        }
    }

    pub fn from_config(cfg: &BasicConfig) -> Self {
        Self::new(cfg.session_ttl_secs, !cfg.insecure_cookie)
    }

    pub fn establish(
        &self,
        jar: PrivateCookieJar,
        token: &SessionToken,
    ) -> Result<PrivateCookieJar, VaultError> {
        let value = serde_json::to_string(token)
            .map_err(|e| VaultError::UnexpectedError(format!("encode session: {e}")))?;
        Ok(jar.add(self.build_cookie(value)))
    }

    /// `None` for missing, undecryptable, malformed or expired sessions.
    pub fn current_user_id(&self, jar: &PrivateCookieJar) -> Option<UserId> {
        let cookie = jar.get(SESSION_COOKIE)?;
        let token: SessionToken = serde_json::from_str(cookie.value()).ok()?;
        if token.is_expired(self.ttl, Utc::now()) {
            debug!(user_id = token.user_id, "session expired");
            return None;
        }
        Some(token.user_id)
    }

    pub fn terminate(&self, jar: PrivateCookieJar) -> PrivateCookieJar {
        jar.remove(self.clear_cookie())
    }

    fn build_cookie(&self, value: String) -> Cookie<'static> {
        let max_age = time::Duration::seconds(self.ttl.num_seconds());
        Cookie::build(Cookie::new(SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(max_age)
            .build()
    }

    fn clear_cookie(&self) -> Cookie<'static> {
        Cookie::build(Cookie::new(SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }
}

/// Decode the configured cookie key, or `None` when none is configured.
pub fn cookie_key(cfg: &BasicConfig) -> Result<Option<Key>, VaultError> {
    let Some(encoded) = cfg.cookie_key.as_deref() else {
        return Ok(None);
    };
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| VaultError::InvalidArgument(format!("cookie_key is not base64: {e}")))?;
    let key = Key::try_from(bytes.as_slice()).map_err(|_| {
        VaultError::InvalidArgument("cookie_key must decode to at least 64 bytes".into())
    })?;
    Ok(Some(key))
}

/// The authenticated user behind the request; rejects anonymous callers
/// with `Unauthenticated`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<VaultState> for CurrentUser {
    type Rejection = VaultError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &VaultState,
    ) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never: Infallible| match never {});

        let user_id = state
            .sessions
            .current_user_id(&jar)
            .ok_or(VaultError::Unauthenticated)?;

        // A token for a user that no longer resolves counts as anonymous.
        let user = state
            .vault
            .find_user(user_id)
            .await?
            .ok_or(VaultError::Unauthenticated)?;
        Ok(Self(user))
    }
}
