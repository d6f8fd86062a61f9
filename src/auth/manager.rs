//! Token lifecycle: issue, persist, load, expiry check and renewal
//!
//! Expiry is checked lazily whenever a caller asks for a token; there is no
//! background timer. Renewal re-reads the credential file and repeats the
//! same exchange as the initial authentication.

use chrono::Duration;
use log::{debug, error, info, warn};
use std::sync::Arc;

use super::clock::Clock;
use super::credentials::CredentialStore;
use super::issuer::TokenIssuer;
use super::models::{AuthState, TokenRecord};
use super::token_store::TokenStore;

/// Orchestrates the credential store, token issuer and token store
pub struct TokenManager {
    credentials: CredentialStore,
    store: TokenStore,
    issuer: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
}

impl TokenManager {
    pub fn new(
        credentials: CredentialStore,
        store: TokenStore,
        issuer: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials,
            store,
            issuer,
            clock,
        }
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.store
    }

    /// Explicit authenticate transition.
    ///
    /// Clears any stored token first, so a failure at any step leaves the
    /// system unauthenticated with nothing persisted.
    pub async fn authenticate(&self, base_url: &str) -> Option<String> {
        debug!("Starting authentication process against {}", base_url);

        if let Err(e) = self.store.clear() {
            warn!("Could not clear previous token: {:#}", e);
        }

        match self.issue_and_persist(base_url).await {
            Some(record) => {
                info!("Authentication successful, token valid until {}", record.expiry.to_rfc3339());
                Some(record.token)
            }
            None => {
                error!("Authentication failed");
                None
            }
        }
    }

    /// Get a usable token, renewing it first if it has expired.
    ///
    /// Returns `None` when nothing is stored or when renewal fails. A failed
    /// renewal leaves the expired record in place, so the next caller makes a
    /// fresh attempt.
    pub async fn load_token(&self, base_url: &str) -> Option<String> {
        let record = self.store.load()?;

        if !record.is_expired_at(self.clock.now()) {
            return Some(record.token);
        }

        info!("Stored token expired at {}, renewing", record.expiry.to_rfc3339());
        self.renew(base_url).await
    }

    /// Unconditionally replace the stored token with a freshly issued one
    pub async fn renew(&self, base_url: &str) -> Option<String> {
        match self.issue_and_persist(base_url).await {
            Some(record) => {
                info!("Token renewed, valid until {}", record.expiry.to_rfc3339());
                Some(record.token)
            }
            None => {
                warn!("Token renewal failed");
                None
            }
        }
    }

    /// Current state, computed from the stored record without side effects
    pub fn state(&self) -> AuthState {
        match self.store.load() {
            None => AuthState::Unauthenticated,
            Some(record) if record.is_expired_at(self.clock.now()) => AuthState::Expired {
                expiry: record.expiry,
            },
            Some(record) => AuthState::Authenticated {
                expiry: record.expiry,
            },
        }
    }

    /// Forget the stored token
    pub fn logout(&self) -> bool {
        match self.store.clear() {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to clear token: {:#}", e);
                false
            }
        }
    }

    async fn issue_and_persist(&self, base_url: &str) -> Option<TokenRecord> {
        let credentials = self.credentials.load_credentials()?;

        let issued = self.issuer.get_token(base_url, &credentials).await?;

        let expiry = i64::try_from(issued.expires_in)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| self.clock.now().checked_add_signed(ttl));
        let Some(expiry) = expiry else {
            error!("Token lifetime {}s is out of range", issued.expires_in);
            return None;
        };

        if let Err(e) = self.store.save(&issued.access_token, expiry) {
            error!("Failed to persist token: {:#}", e);
            return None;
        }

        Some(TokenRecord {
            token: issued.access_token,
            expiry,
        })
    }
}
