// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection test: resolve the configured credential once and report.

use credstream_core::BootstrapStore;
use credstream_vault::CredentialHandle;

/// Resolve the credential and report the outcome. The failure message
/// carries the wrapped cause so a rejected identity, a missing secret, and
/// a transport problem are distinguishable.
pub async fn run(
    handle: &CredentialHandle,
    store: &dyn BootstrapStore,
    scope: Option<&str>,
) -> i32 {
    match handle.resolve(store, scope).await {
        Ok(credential) => {
            println!(
                "connection successful: secret {} resolved (username `{}`)",
                handle.secret_id(),
                credential.username
            );
            0
        }
        Err(e) => {
            eprintln!("failed to establish connection: {e}");
            1
        }
    }
}
