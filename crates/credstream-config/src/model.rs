// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for credstream.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Default API root suffix appended to the vault base URL.
pub const DEFAULT_API_PATH: &str = "/api/v1";
/// Default OAuth2 token endpoint suffix appended to the vault base URL.
pub const DEFAULT_TOKEN_PATH: &str = "/oauth2/token";
/// Default prefix for environment variables carrying resolved values.
pub const DEFAULT_ENV_PREFIX: &str = "TSS_";
/// Default vault request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level credstream configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections default to sensible values; only
/// `vault.base_url` and `vault.credential_id` normally need to be set.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CredstreamConfig {
    /// Vault connection settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Secret field selector defaults.
    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// Vault connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Base URL of the vault (e.g. `https://vault.example.com`).
    /// A trailing slash is tolerated and stripped during endpoint derivation.
    #[serde(default)]
    pub base_url: String,

    /// Suffix appended to the base URL for the REST API root.
    #[serde(default = "default_api_path")]
    pub api_path: String,

    /// Suffix appended to the base URL for the OAuth2 token endpoint.
    #[serde(default = "default_token_path")]
    pub token_path: String,

    /// Prefix for environment variables carrying resolved values
    /// (`{prefix}USERNAME`, `{prefix}PASSWORD`).
    #[serde(default = "default_env_prefix")]
    pub env_prefix: String,

    /// Request timeout in seconds; timeouts surface as transport errors.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Id of the bootstrap credential in the host platform's store.
    #[serde(default)]
    pub credential_id: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_path: DEFAULT_API_PATH.to_owned(),
            token_path: DEFAULT_TOKEN_PATH.to_owned(),
            env_prefix: DEFAULT_ENV_PREFIX.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            credential_id: String::new(),
        }
    }
}

/// Secret field selector defaults.
///
/// The labels here match secrets whose field display name or slug equals the
/// label case-insensitively; they preserve compatibility with schemas that
/// only use the stock "Username"/"Password" field names.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SelectorConfig {
    /// Label of the field holding the username.
    #[serde(default = "default_username_label")]
    pub username: String,

    /// Label of the field holding the password.
    #[serde(default = "default_password_label")]
    pub password: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            username: default_username_label(),
            password: default_password_label(),
        }
    }
}

fn default_api_path() -> String {
    DEFAULT_API_PATH.to_owned()
}

fn default_token_path() -> String {
    DEFAULT_TOKEN_PATH.to_owned()
}

fn default_env_prefix() -> String {
    DEFAULT_ENV_PREFIX.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_username_label() -> String {
    "Username".to_owned()
}

fn default_password_label() -> String {
    "Password".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_server_conventions() {
        let config = CredstreamConfig::default();
        assert_eq!(config.vault.api_path, "/api/v1");
        assert_eq!(config.vault.token_path, "/oauth2/token");
        assert_eq!(config.vault.env_prefix, "TSS_");
        assert_eq!(config.vault.timeout_secs, 30);
        assert_eq!(config.selectors.username, "Username");
        assert_eq!(config.selectors.password, "Password");
    }
}
