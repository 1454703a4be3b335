// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for credential resolution.

use std::sync::Arc;

use thiserror::Error;

/// The primary error type used across the credstream workspace.
///
/// The first four variants are the terminal causes a single resolution
/// attempt can fail with; none of them is retried automatically.
/// [`CredstreamError::Resolution`] is the wrapper a credential handle
/// surfaces to its callers, carrying the terminal cause that was cached
/// for the handle's lifetime.
#[derive(Debug, Error)]
pub enum CredstreamError {
    /// The vault rejected the bootstrap identity.
    #[error("vault rejected the bootstrap identity: {0}")]
    Authentication(String),

    /// The secret id, the bootstrap credential, or an expected secret field
    /// does not exist (or is not readable by the bootstrap identity).
    #[error("not found: {0}")]
    NotFound(String),

    /// Network or protocol failure talking to the vault. Timeouts surface
    /// here; they are owned by the transport, not by callers.
    #[error("vault transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed vault URL, selector, or other configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// A credential resolution failed; wraps the terminal cause.
    ///
    /// The cause is shared so a handle can cache one failure and hand it to
    /// every subsequent caller.
    #[error("credential resolution failed: {source}")]
    Resolution { source: Arc<CredstreamError> },
}

impl CredstreamError {
    /// Wrap a terminal cause as a resolution failure.
    pub fn resolution(cause: Arc<CredstreamError>) -> Self {
        CredstreamError::Resolution { source: cause }
    }
}
