// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the vault's REST API.
//!
//! Stateless transport: authenticates with the bootstrap identity via the
//! OAuth2 password grant, then fetches one secret record. No caching and no
//! retries; every failure is terminal for the current resolution attempt.

use std::time::Duration;

use credstream_config::VaultConfig;
use credstream_core::{BootstrapIdentity, CredstreamError, SecretRecord};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::debug;

use crate::endpoints::VaultEndpoints;

/// Response body of the OAuth2 token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// HTTP client for vault communication.
///
/// Holds the connection pool and the configured endpoint suffixes; the base
/// URL is supplied per fetch so one client serves any number of handles.
#[derive(Debug, Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    api_path: String,
    token_path: String,
}

impl VaultClient {
    /// Creates a new vault client with the given endpoint suffixes and
    /// request timeout.
    pub fn new(
        api_path: impl Into<String>,
        token_path: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CredstreamError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CredstreamError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            http,
            api_path: api_path.into(),
            token_path: token_path.into(),
        })
    }

    /// Creates a client from the vault section of the configuration.
    pub fn from_config(config: &VaultConfig) -> Result<Self, CredstreamError> {
        Self::new(
            config.api_path.clone(),
            config.token_path.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Fetches a secret record from the vault at `base_url`.
    ///
    /// Authenticates with the bootstrap identity, then reads the record.
    /// Fails with `Authentication` when the identity is rejected, `NotFound`
    /// when the id does not resolve to a readable record, and `Transport`
    /// for network or protocol failures.
    pub async fn fetch_secret(
        &self,
        base_url: &str,
        secret_id: i64,
        identity: &BootstrapIdentity,
    ) -> Result<SecretRecord, CredstreamError> {
        let endpoints = VaultEndpoints::derive(base_url, &self.api_path, &self.token_path)?;
        let token = self.request_token(&endpoints.token_url, identity).await?;
        self.request_secret(&endpoints.api_url, secret_id, &token)
            .await
    }

    /// Obtain an access token via the OAuth2 password grant.
    async fn request_token(
        &self,
        token_url: &str,
        identity: &BootstrapIdentity,
    ) -> Result<String, CredstreamError> {
        let response = self
            .http
            .post(token_url)
            .form(&[
                ("username", identity.username.as_str()),
                ("password", identity.password.expose_secret()),
                ("grant_type", "password"),
            ])
            .send()
            .await
            .map_err(|e| CredstreamError::Transport {
                message: format!("token request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "token response received");

        if status.is_success() {
            let body: TokenResponse =
                response
                    .json()
                    .await
                    .map_err(|e| CredstreamError::Transport {
                        message: format!("malformed token response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
            return Ok(body.access_token);
        }

        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            // The token endpoint reports a bad grant as 400.
            return Err(CredstreamError::Authentication(format!(
                "token endpoint returned {status}"
            )));
        }

        Err(CredstreamError::Transport {
            message: format!("token endpoint returned {status}"),
            source: None,
        })
    }

    /// Read one secret record with a bearer token.
    async fn request_secret(
        &self,
        api_url: &str,
        secret_id: i64,
        token: &str,
    ) -> Result<SecretRecord, CredstreamError> {
        let response = self
            .http
            .get(format!("{api_url}/secrets/{secret_id}"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| CredstreamError::Transport {
                message: format!("secret request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, secret_id, "secret response received");

        match status {
            s if s.is_success() => {
                response
                    .json()
                    .await
                    .map_err(|e| CredstreamError::Transport {
                        message: format!("malformed secret response: {e}"),
                        source: Some(Box::new(e)),
                    })
            }
            StatusCode::NOT_FOUND => Err(CredstreamError::NotFound(format!(
                "secret {secret_id} does not exist or is not readable"
            ))),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
                CredstreamError::Authentication(format!("secret endpoint returned {status}")),
            ),
            _ => Err(CredstreamError::Transport {
                message: format!("secret endpoint returned {status}"),
                source: None,
            }),
        }
    }
}
