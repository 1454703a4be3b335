// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-handle cached credential resolution.
//!
//! A [`CredentialHandle`] represents one configured resolution request. The
//! first accessor call performs the fetch-and-extract pipeline exactly once,
//! then the outcome (success or terminal failure) is cached for the
//! handle's lifetime. Re-creating the handle is the only way to force a
//! refresh.

use std::sync::Arc;

use credstream_core::{BootstrapStore, CredstreamError, FieldSelector, ResolvedCredential};
use secrecy::SecretString;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::client::VaultClient;
use crate::extract;

/// A long-lived, lazily-resolved credential.
///
/// Resolution is expensive (network round trip plus vault authentication)
/// and the resolved value is immutable for the handle's lifetime, so the
/// outcome is computed once behind a [`OnceCell`]: concurrent first
/// accessors trigger exactly one fetch and all observe the same result.
#[derive(Debug)]
pub struct CredentialHandle {
    client: VaultClient,
    vault_url: String,
    credential_id: String,
    secret_id: i64,
    username_selector: FieldSelector,
    password_selector: FieldSelector,
    cached: OnceCell<Result<ResolvedCredential, Arc<CredstreamError>>>,
}

impl CredentialHandle {
    pub fn new(
        client: VaultClient,
        vault_url: impl Into<String>,
        credential_id: impl Into<String>,
        secret_id: i64,
        username_selector: FieldSelector,
        password_selector: FieldSelector,
    ) -> Self {
        Self {
            client,
            vault_url: vault_url.into(),
            credential_id: credential_id.into(),
            secret_id,
            username_selector,
            password_selector,
            cached: OnceCell::new(),
        }
    }

    pub fn secret_id(&self) -> i64 {
        self.secret_id
    }

    /// Resolve the credential, fetching at most once per handle.
    ///
    /// `store` and `scope` are captured at the moment of first resolution,
    /// not at construction: a handle built during declarative configuration
    /// loading must bind the calling context, which may not exist yet when
    /// the handle is created. Failures are cached like successes and
    /// re-surfaced wrapped in [`CredstreamError::Resolution`]; they are
    /// never retried for this handle.
    pub async fn resolve(
        &self,
        store: &dyn BootstrapStore,
        scope: Option<&str>,
    ) -> Result<ResolvedCredential, CredstreamError> {
        let outcome = self
            .cached
            .get_or_init(|| async {
                debug!(secret_id = self.secret_id, "resolving credential");
                self.resolve_uncached(store, scope).await.map_err(Arc::new)
            })
            .await;
        match outcome {
            Ok(credential) => Ok(credential.clone()),
            Err(cause) => Err(CredstreamError::resolution(Arc::clone(cause))),
        }
    }

    /// Resolve and return only the username.
    pub async fn username(
        &self,
        store: &dyn BootstrapStore,
        scope: Option<&str>,
    ) -> Result<String, CredstreamError> {
        Ok(self.resolve(store, scope).await?.username)
    }

    /// Resolve and return only the password.
    pub async fn password(
        &self,
        store: &dyn BootstrapStore,
        scope: Option<&str>,
    ) -> Result<SecretString, CredstreamError> {
        Ok(self.resolve(store, scope).await?.password)
    }

    async fn resolve_uncached(
        &self,
        store: &dyn BootstrapStore,
        scope: Option<&str>,
    ) -> Result<ResolvedCredential, CredstreamError> {
        let identity = store
            .lookup(&self.credential_id, scope)
            .await?
            .ok_or_else(|| {
                CredstreamError::NotFound(format!(
                    "bootstrap credential `{}` not found",
                    self.credential_id
                ))
            })?;
        let record = self
            .client
            .fetch_secret(&self.vault_url, self.secret_id, &identity)
            .await?;
        extract::extract(&record, &self.username_selector, &self.password_selector).ok_or_else(
            || {
                CredstreamError::NotFound(format!(
                    "secret {} has no fields matching `{}` and `{}`",
                    self.secret_id, self.username_selector.name, self.password_selector.name
                ))
            },
        )
    }
}
