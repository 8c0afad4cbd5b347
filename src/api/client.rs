//! HTTP client for the remote authentication service.
//!
//! Two operations: submitting credentials for a token, and asking whether a
//! previously issued token is still good. The server signals both outcomes
//! through a `status` field in the JSON body, not through the transport
//! status code, so responses are decoded unconditionally and the body status
//! is interpreted by the caller.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

use super::AuthError;

/// HTTP request timeout in seconds.
/// Auth endpoints answer quickly; 10s fails fast enough that a stuck
/// login attempt does not leave the caller hanging.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Body status value the server uses to signal success
const STATUS_OK: u16 = 200;

/// A username/password pair for a single login attempt.
/// Transient by design - never persisted anywhere.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Keep the password out of logs and error chains
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parsed body of the authentication endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub status: u16,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl AuthResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Parsed body of the token-check endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationResponse {
    pub status: u16,
}

impl ValidationResponse {
    pub fn is_valid(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Client for the two auth endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    auth_url: String,
    check_token_url: String,
}

impl AuthClient {
    /// Create a client for the endpoints named in the config
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_timeout(config, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a client with a specific request timeout
    pub fn with_timeout(config: &Config, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            auth_url: config.auth_url.clone(),
            check_token_url: config.check_token_url.clone(),
        })
    }

    /// Submit credentials to the authentication endpoint.
    ///
    /// Transport and decode failures surface as errors; a well-formed body
    /// with a non-success status does not (the caller inspects it).
    pub async fn submit_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthResponse, AuthError> {
        debug!(username = %credentials.username, "Submitting credentials");

        let response = self
            .client
            .post(&self.auth_url)
            .json(credentials)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Submit a token to the check endpoint. Advisory only - the server
    /// re-authorizes every real request regardless of what this returns.
    pub async fn validate_token(&self, token: &str) -> Result<ValidationResponse, AuthError> {
        debug!("Validating stored token");

        let response = self
            .client
            .post(&self.check_token_url)
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AuthError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| AuthError::undecodable(&text, &e))
    }
}
