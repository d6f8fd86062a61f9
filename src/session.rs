//! Per-process session context
//!
//! Holds the base URL of the server, the token lifecycle manager and the
//! request layer. It is built once at start-up and passed to every operation
//! that talks to the server.

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::{JamfClient, build_http_client, constants};
use crate::auth::{
    AuthState, Clock, CredentialStore, HttpTokenIssuer, SystemClock, TokenIssuer, TokenManager, TokenStore,
};
use crate::config::AppConfig;

/// Key under which the last authenticated server URL is stored
pub const SESSION_URL_KEY: &str = "JAMF_PRO_URL";

/// Single-line `KEY=value` file remembering the last authenticated server
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the saved URL, if any
    pub fn load_url(&self) -> Option<String> {
        let entries = match dotenvy::from_path_iter(&self.path) {
            Ok(entries) => entries,
            Err(e) if e.not_found() => {
                debug!("No session file at {:?}", self.path);
                return None;
            }
            Err(e) => {
                warn!("Failed to open session file {:?}: {}", self.path, e);
                return None;
            }
        };

        for entry in entries {
            match entry {
                Ok((key, value)) if key == SESSION_URL_KEY && !value.trim().is_empty() => {
                    return Some(value.trim().to_string());
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Skipping unreadable line in session file {:?}: {}", self.path, e);
                }
            }
        }
        None
    }

    /// Overwrite the file with the given URL
    pub fn save_url(&self, url: &str) -> Result<()> {
        std::fs::write(&self.path, format!("{}={}\n", SESSION_URL_KEY, url))
            .with_context(|| format!("Failed to write session file {:?}", self.path))?;
        debug!("Saved server URL to {:?}: {}", self.path, url);
        Ok(())
    }
}

/// Result of an explicit authenticate action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated,
    Failed,
}

impl AuthOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            AuthOutcome::Authenticated => "AUTHENTICATED",
            AuthOutcome::Failed => "AUTH FAILED",
        }
    }
}

pub struct Session {
    base_url: Option<String>,
    tokens: Arc<TokenManager>,
    client: JamfClient,
    session_file: SessionFile,
    cache_dir: PathBuf,
}

impl Session {
    /// Build a session with explicit collaborators
    pub fn new(
        config: &AppConfig,
        http_client: reqwest::Client,
        issuer: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let tokens = Arc::new(TokenManager::new(
            CredentialStore::new(&config.credentials_path),
            TokenStore::new(&config.token_path),
            issuer,
            clock,
        ));
        let client = JamfClient::new(http_client, tokens.clone())
            .with_renew_on_unauthorized(config.renew_on_unauthorized);

        Self {
            base_url: None,
            tokens,
            client,
            session_file: SessionFile::new(&config.session_path),
            cache_dir: config.cache_dir.clone(),
        }
    }

    /// Build the production session: HTTP token issuer and the system clock
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http_client = build_http_client(&config.http)?;
        let issuer = Arc::new(HttpTokenIssuer::new(http_client.clone()));
        Ok(Self::new(config, http_client, issuer, Arc::new(SystemClock)))
    }

    /// Adopt the URL saved by the last successful authentication
    pub fn restore_url(&mut self) -> Option<&str> {
        if let Some(url) = self.session_file.load_url() {
            debug!("Restored server URL {}", url);
            self.base_url = Some(constants::normalize_base_url(&url));
        }
        self.base_url.as_deref()
    }

    /// Point the session at a server without authenticating
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = Some(constants::normalize_base_url(url));
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn client(&self) -> &JamfClient {
        &self.client
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Authenticate against `url`; on success remember it for this process and the next one
    pub async fn authenticate(&mut self, url: &str) -> AuthOutcome {
        let url = constants::normalize_base_url(url);
        debug!("Attempting to authenticate with URL: {}", url);

        if self.tokens.authenticate(&url).await.is_none() {
            return AuthOutcome::Failed;
        }

        if let Err(e) = self.session_file.save_url(&url) {
            warn!("{:#}", e);
        }
        info!("Authenticated against {}", url);
        self.base_url = Some(url);
        AuthOutcome::Authenticated
    }

    pub fn status(&self) -> AuthState {
        self.tokens.state()
    }

    pub fn logout(&self) -> bool {
        self.tokens.logout()
    }

    /// A usable token for the current server, renewing it if needed
    pub async fn token(&self) -> Option<String> {
        let base_url = self.require_base_url()?;
        self.tokens.load_token(base_url).await
    }

    /// Classic API GET with a freshly resolved token
    pub async fn classic(&self, endpoint: &str) -> Option<String> {
        let base_url = self.require_base_url()?;
        let Some(token) = self.tokens.load_token(base_url).await else {
            error!("No token found!");
            return None;
        };
        self.client.make_classic_api_request(base_url, endpoint, &token).await
    }

    /// Modern API GET
    pub async fn modern(&self, endpoint: &str) -> Option<Value> {
        let base_url = self.require_base_url()?;
        self.client.make_api_request(base_url, endpoint).await
    }

    fn require_base_url(&self) -> Option<&str> {
        if self.base_url.is_none() {
            error!("No Jamf URL found!");
        }
        self.base_url.as_deref()
    }
}
