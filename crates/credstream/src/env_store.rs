// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bootstrap credential lookup backed by environment variables.
//!
//! The host platform's credential store is an external collaborator; for the
//! CLI the process environment stands in for it. A credential id `boot` with
//! prefix `TSS_` reads `TSS_BOOT_USERNAME` and `TSS_BOOT_PASSWORD`.

use async_trait::async_trait;
use credstream_core::{BootstrapIdentity, BootstrapStore, CredstreamError};
use tracing::debug;

/// Reads bootstrap identities from the process environment.
#[derive(Debug)]
pub struct EnvBootstrapStore {
    prefix: String,
}

impl EnvBootstrapStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Env-var name for one part of the identity: the credential id is
    /// uppercased with non-alphanumerics folded to `_`.
    fn var_name(&self, credential_id: &str, part: &str) -> String {
        let id: String = credential_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}{}_{}", self.prefix, id, part)
    }
}

#[async_trait]
impl BootstrapStore for EnvBootstrapStore {
    async fn lookup(
        &self,
        credential_id: &str,
        _scope: Option<&str>,
    ) -> Result<Option<BootstrapIdentity>, CredstreamError> {
        let username_var = self.var_name(credential_id, "USERNAME");
        let password_var = self.var_name(credential_id, "PASSWORD");
        match (
            std::env::var(&username_var),
            std::env::var(&password_var),
        ) {
            (Ok(username), Ok(password)) => Ok(Some(BootstrapIdentity {
                username,
                password: password.into(),
            })),
            _ => {
                debug!(%username_var, %password_var, "bootstrap env vars not set");
                Ok(None)
            }
        }
    }
}
