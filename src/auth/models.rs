use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client-credentials read from the local credential file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String,
}

/// Persisted token record, `{"token": ..., "expiry": ...}` on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token: String,
    pub expiry: DateTime<Utc>,
}

impl TokenRecord {
    /// A token is stale from the instant of its expiry onwards
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry
    }
}

/// Token as handed out by the token endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: u64,
}

/// Observable authentication state, derived from the token record and the clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated { expiry: DateTime<Utc> },
    Expired { expiry: DateTime<Utc> },
}

impl AuthState {
    pub fn label(&self) -> &'static str {
        match self {
            AuthState::Unauthenticated => "UNAUTHENTICATED",
            AuthState::Authenticated { .. } => "AUTHENTICATED",
            AuthState::Expired { .. } => "EXPIRED",
        }
    }
}
