// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as well-formed vault URLs and path suffixes.

use crate::diagnostic::ConfigError;
use crate::model::CredstreamConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CredstreamConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate base_url parses as an http(s) URL when set. An empty value is
    // allowed here; commands that need the vault fail with a clearer message.
    let base_url = config.vault.base_url.trim();
    if !base_url.is_empty() {
        match url::Url::parse(base_url) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
            Ok(parsed) => errors.push(ConfigError::Validation {
                message: format!(
                    "vault.base_url must use http or https, got scheme `{}`",
                    parsed.scheme()
                ),
            }),
            Err(e) => errors.push(ConfigError::Validation {
                message: format!("vault.base_url `{base_url}` is not a valid URL: {e}"),
            }),
        }
    }

    for (key, value) in [
        ("vault.api_path", &config.vault.api_path),
        ("vault.token_path", &config.vault.token_path),
    ] {
        if !value.starts_with('/') {
            errors.push(ConfigError::Validation {
                message: format!("{key} must start with `/`, got `{value}`"),
            });
        }
    }

    if config.vault.env_prefix.is_empty() {
        errors.push(ConfigError::Validation {
            message: "vault.env_prefix must not be empty".to_string(),
        });
    } else if !config
        .vault
        .env_prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.env_prefix `{}` may only contain letters, digits, and `_`",
                config.vault.env_prefix
            ),
        });
    }

    if config.vault.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "vault.timeout_secs must be non-zero".to_string(),
        });
    }

    for (key, value) in [
        ("selectors.username", &config.selectors.username),
        ("selectors.password", &config.selectors.password),
    ] {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SelectorConfig, VaultConfig};

    fn config_with_vault(vault: VaultConfig) -> CredstreamConfig {
        CredstreamConfig {
            vault,
            selectors: SelectorConfig::default(),
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&CredstreamConfig::default()).is_ok());
    }

    #[test]
    fn valid_base_url_passes() {
        let config = config_with_vault(VaultConfig {
            base_url: "https://vault.example.com/".into(),
            ..VaultConfig::default()
        });
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn malformed_base_url_fails() {
        let config = config_with_vault(VaultConfig {
            base_url: "not a url".into(),
            ..VaultConfig::default()
        });
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("vault.base_url"));
    }

    #[test]
    fn non_http_scheme_fails() {
        let config = config_with_vault(VaultConfig {
            base_url: "ftp://vault.example.com".into(),
            ..VaultConfig::default()
        });
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn path_without_leading_slash_fails() {
        let config = config_with_vault(VaultConfig {
            api_path: "api/v1".into(),
            ..VaultConfig::default()
        });
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("vault.api_path"));
    }

    #[test]
    fn collects_multiple_errors() {
        let config = config_with_vault(VaultConfig {
            base_url: "::bad::".into(),
            env_prefix: "".into(),
            timeout_secs: 0,
            ..VaultConfig::default()
        });
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn env_prefix_with_punctuation_fails() {
        let config = config_with_vault(VaultConfig {
            env_prefix: "TSS-".into(),
            ..VaultConfig::default()
        });
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn blank_selector_fails() {
        let config = CredstreamConfig {
            vault: VaultConfig::default(),
            selectors: SelectorConfig {
                username: "  ".into(),
                password: "Password".into(),
            },
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("selectors.username"));
    }
}
