//! File-backed storage for the current access token and its absolute expiry

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::models::TokenRecord;

/// Sole owner of the token file
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save the token, replacing any previous record
    pub fn save(&self, token: &str, expiry: DateTime<Utc>) -> Result<()> {
        let record = TokenRecord {
            token: token.to_string(),
            expiry,
        };
        let json = serde_json::to_string_pretty(&record).context("Failed to serialize token record")?;

        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write token file {:?}", self.path))?;

        debug!("Token saved to {:?} (expires {})", self.path, expiry.to_rfc3339());
        Ok(())
    }

    /// Read the stored record as-is, without judging its expiry.
    ///
    /// Absent, empty, malformed or incomplete records all read as `None`.
    pub fn load(&self) -> Option<TokenRecord> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Token file {:?} not found, please authenticate", self.path);
                return None;
            }
            Err(e) => {
                warn!("Failed to read token file {:?}: {}", self.path, e);
                return None;
            }
        };

        if content.trim().is_empty() {
            debug!("Token file {:?} is empty", self.path);
            return None;
        }

        match serde_json::from_str::<TokenRecord>(&content) {
            Ok(record) if !record.token.is_empty() => {
                debug!("Token loaded from {:?}", self.path);
                Some(record)
            }
            Ok(_) => {
                warn!("Token file {:?} holds an empty token", self.path);
                None
            }
            Err(e) => {
                warn!("Ignoring malformed token file {:?}: {}", self.path, e);
                None
            }
        }
    }

    /// Delete the stored record. Deleting an absent record is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Token file {:?} cleared", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete token file {:?}", self.path)),
        }
    }
}
