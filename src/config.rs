//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! the two remote endpoint URLs and the last username used (offered as the
//! prompt default on the next login).
//!
//! Configuration is stored at `~/.config/tokengate/config.json`. The
//! environment variables `TOKENGATE_AUTH_URL` and `TOKENGATE_CHECK_TOKEN_URL`
//! override the file.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/session directory paths
const APP_NAME: &str = "tokengate";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default endpoint for authenticating a username and password
const DEFAULT_AUTH_URL: &str = "http://url-for-auth.com/api/authenticate";

/// Default endpoint for checking whether a token is still valid
const DEFAULT_CHECK_TOKEN_URL: &str = "http://url-for-auth.com/api/check-token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_check_token_url")]
    pub check_token_url: String,
    #[serde(default)]
    pub last_username: Option<String>,
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_check_token_url() -> String {
    DEFAULT_CHECK_TOKEN_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_url: default_auth_url(),
            check_token_url: default_check_token_url(),
            last_username: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("TOKENGATE_AUTH_URL") {
            config.auth_url = url;
        }
        if let Ok(url) = std::env::var("TOKENGATE_CHECK_TOKEN_URL") {
            config.check_token_url = url;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the persisted session file
    pub fn session_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
        assert_eq!(config.check_token_url, DEFAULT_CHECK_TOKEN_URL);
        assert!(config.last_username.is_none());

        let partial: Config =
            serde_json::from_str(r#"{"last_username":"alice"}"#).unwrap();
        assert_eq!(partial.last_username.as_deref(), Some("alice"));
        assert_eq!(partial.auth_url, DEFAULT_AUTH_URL);
    }
}
