use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::db::UserId;

/// Proof of a successful login, carried in the encrypted session cookie.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionToken {
    pub user_id: UserId,
    pub issued_at: DateTime<Utc>,
}

impl SessionToken {
    pub fn issue(user_id: UserId) -> Self {
        Self {
            user_id,
            issued_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match self.issued_at.checked_add_signed(ttl) {
            Some(expires_at) => expires_at <= now,
            None => false,
        }
    }
}
