// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host-platform credential store lookup.

use async_trait::async_trait;

use crate::error::CredstreamError;
use crate::types::BootstrapIdentity;

/// Lookup of the bootstrap identity in the host platform's credential store.
///
/// Implementations are injected explicitly; the core never reaches into
/// ambient global state. The optional `scope` is an opaque host-side boundary
/// (e.g. a folder or project) and is passed through uninterpreted.
///
/// Returns `Ok(None)` when no credential with the given id is visible in the
/// given scope; callers decide whether that is fatal.
#[async_trait]
pub trait BootstrapStore: Send + Sync {
    async fn lookup(
        &self,
        credential_id: &str,
        scope: Option<&str>,
    ) -> Result<Option<BootstrapIdentity>, CredstreamError>;
}
