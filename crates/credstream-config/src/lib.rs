// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for credstream.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, and miette diagnostic rendering.
//!
//! # Usage
//!
//! ```no_run
//! use credstream_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("vault: {}", config.vault.base_url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{CredstreamConfig, SelectorConfig, VaultConfig};

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid [`CredstreamConfig`] or the list of diagnostic
/// errors collected during parsing and validation.
pub fn load_and_validate() -> Result<CredstreamConfig, Vec<ConfigError>> {
    finish(loader::load_config())
}

/// Load configuration from a specific TOML file path and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<CredstreamConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path))
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<CredstreamConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content))
}

fn finish(loaded: Result<CredstreamConfig, figment::Error>) -> Result<CredstreamConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(err
            .into_iter()
            .map(|e| ConfigError::Parse {
                message: e.to_string(),
            })
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_and_validate_str_accepts_valid_config() {
        let config = load_and_validate_str(
            "[vault]\nbase_url = \"https://vault.example.com\"\ncredential_id = \"boot\"\n",
        )
        .unwrap();
        assert_eq!(config.vault.credential_id, "boot");
    }

    #[test]
    fn load_and_validate_str_reports_parse_errors() {
        let errors = load_and_validate_str("[vault]\nnot_a_key = 1\n").unwrap_err();
        assert!(!errors.is_empty());
        assert!(errors[0].to_string().contains("failed to load configuration"));
    }

    #[test]
    fn load_and_validate_str_reports_validation_errors() {
        let errors = load_and_validate_str("[vault]\nbase_url = \"gopher://x\"\n").unwrap_err();
        assert!(errors[0].to_string().contains("http"));
    }
}
