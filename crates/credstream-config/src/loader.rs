// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./credstream.toml` >
//! `~/.config/credstream/credstream.toml` > `/etc/credstream/credstream.toml`
//! with environment variable overrides via the `CREDSTREAM_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CredstreamConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/credstream/credstream.toml` (system-wide)
/// 3. `~/.config/credstream/credstream.toml` (user XDG config)
/// 4. `./credstream.toml` (local directory)
/// 5. `CREDSTREAM_*` environment variables
pub fn load_config() -> Result<CredstreamConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CredstreamConfig::default()))
        .merge(Toml::file("/etc/credstream/credstream.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("credstream/credstream.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("credstream.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<CredstreamConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CredstreamConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CredstreamConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CredstreamConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay intact: `CREDSTREAM_VAULT_CREDENTIAL_ID` must map to
/// `vault.credential_id`, not `vault.credential.id`.
fn env_provider() -> Env {
    Env::prefixed("CREDSTREAM_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: CREDSTREAM_VAULT_BASE_URL -> "vault_base_url"
        let mapped = key
            .as_str()
            .replacen("vault_", "vault.", 1)
            .replacen("selectors_", "selectors.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn load_from_str_applies_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.vault.api_path, "/api/v1");
        assert_eq!(config.vault.base_url, "");
    }

    #[test]
    fn load_from_str_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [vault]
            base_url = "https://vault.example.com"
            credential_id = "vault-bootstrap"
            timeout_secs = 10

            [selectors]
            username = "Machine Username"
            "#,
        )
        .unwrap();
        assert_eq!(config.vault.base_url, "https://vault.example.com");
        assert_eq!(config.vault.credential_id, "vault-bootstrap");
        assert_eq!(config.vault.timeout_secs, 10);
        assert_eq!(config.selectors.username, "Machine Username");
        // Untouched keys keep their defaults.
        assert_eq!(config.selectors.password, "Password");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = load_config_from_str("[vault]\nbase_uri = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn env_vars_override_file_values() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[vault]\nbase_url = \"https://from-file\"\n").unwrap();

        unsafe { std::env::set_var("CREDSTREAM_VAULT_BASE_URL", "https://from-env") };
        unsafe { std::env::set_var("CREDSTREAM_VAULT_CREDENTIAL_ID", "env-cred") };
        let config = load_config_from_path(file.path()).unwrap();
        unsafe { std::env::remove_var("CREDSTREAM_VAULT_BASE_URL") };
        unsafe { std::env::remove_var("CREDSTREAM_VAULT_CREDENTIAL_ID") };

        assert_eq!(config.vault.base_url, "https://from-env");
        // Underscore-containing key maps to vault.credential_id.
        assert_eq!(config.vault.credential_id, "env-cred");
    }
}
