// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic endpoint URL derivation.
//!
//! Pure and side-effect-free so it can be unit-tested without a network.

use credstream_core::CredstreamError;

/// The two endpoint URLs derived from a vault base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEndpoints {
    /// REST API root, e.g. `https://vault.example.com/api/v1`.
    pub api_url: String,
    /// OAuth2 token endpoint, e.g. `https://vault.example.com/oauth2/token`.
    pub token_url: String,
}

impl VaultEndpoints {
    /// Derive the API root and token endpoint from a vault base URL.
    ///
    /// Any trailing slash on the base URL is stripped before the configured
    /// suffixes are appended. Fails with a config error when the base URL is
    /// blank or not a well-formed http(s) URL.
    pub fn derive(
        base_url: &str,
        api_path: &str,
        token_path: &str,
    ) -> Result<Self, CredstreamError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(CredstreamError::Config(
                "vault base URL is not configured".to_string(),
            ));
        }
        let parsed = url::Url::parse(trimmed)
            .map_err(|e| CredstreamError::Config(format!("invalid vault URL `{trimmed}`: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(CredstreamError::Config(format!(
                "vault URL must use http or https, got `{trimmed}`"
            )));
        }
        Ok(Self {
            api_url: format!("{trimmed}{api_path}"),
            token_url: format!("{trimmed}{token_path}"),
        })
    }
}
