use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration, read from `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Client-credentials descriptor (`client_id`, `client_secret`, `grant_type`)
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
    /// Persisted `{token, expiry}` record
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
    /// `KEY=value` file remembering the last authenticated server
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
    /// Where raw group member responses are cached
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default)]
    pub http: HttpSettings,
    /// Renew and retry once when the modern API answers 401
    #[serde(default)]
    pub renew_on_unauthorized: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from(".jcinf.json")
}

fn default_token_path() -> PathBuf {
    PathBuf::from(".jamf_token")
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".env")
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".cache")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("jamf-cli.log")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            token_path: default_token_path(),
            session_path: default_session_path(),
            cache_dir: default_cache_dir(),
            log_file: default_log_file(),
            http: HttpSettings::default(),
            renew_on_unauthorized: false,
        }
    }
}

impl AppConfig {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("jamf-cli")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".jamf-cli")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location; a missing file yields the defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file {:?} doesn't exist, using defaults", config_path);
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: AppConfig = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        Ok(config)
    }
}
