//! Credential store backed by the local `.jcinf.json` descriptor

use log::{debug, error};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::models::Credentials;

/// Shape of the credential file; every key is optional so a missing key can be reported by name
#[derive(Debug, Deserialize)]
struct CredentialFile {
    client_id: Option<String>,
    client_secret: Option<String>,
    grant_type: Option<String>,
}

#[derive(Debug)]
enum LoadFailure {
    NotFound,
    Unreadable(std::io::Error),
    Malformed(serde_json::Error),
    MissingKey(&'static str),
}

/// Read-only access to the client-credentials file
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the credentials, or `None` if the file is missing, unreadable, malformed or incomplete.
    ///
    /// Never fails: each cause is logged and authentication simply cannot proceed.
    pub fn load_credentials(&self) -> Option<Credentials> {
        debug!("Attempting to load credentials from {:?}", self.path);

        match self.read() {
            Ok(credentials) => {
                debug!(
                    "Credentials loaded - client_id: {}, grant_type: {}",
                    credentials.client_id, credentials.grant_type
                );
                Some(credentials)
            }
            Err(LoadFailure::NotFound) => {
                error!("The credentials file ({:?}) is missing", self.path);
                None
            }
            Err(LoadFailure::Unreadable(e)) => {
                error!("Failed to read credentials file {:?}: {}", self.path, e);
                None
            }
            Err(LoadFailure::Malformed(e)) => {
                error!("Error decoding credentials file {:?}: {}", self.path, e);
                None
            }
            Err(LoadFailure::MissingKey(key)) => {
                error!("Error loading credentials from {:?}: missing key '{}'", self.path, key);
                None
            }
        }
    }

    fn read(&self) -> Result<Credentials, LoadFailure> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoadFailure::NotFound,
            _ => LoadFailure::Unreadable(e),
        })?;

        let file: CredentialFile =
            serde_json::from_str(&content).map_err(LoadFailure::Malformed)?;

        Ok(Credentials {
            client_id: required(file.client_id, "client_id")?,
            client_secret: required(file.client_secret, "client_secret")?,
            grant_type: required(file.grant_type, "grant_type")?,
        })
    }
}

// Empty strings count as missing, the token endpoint would reject them anyway
fn required(value: Option<String>, key: &'static str) -> Result<String, LoadFailure> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(LoadFailure::MissingKey(key))
}
