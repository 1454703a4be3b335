// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolve a credential and print it for downstream consumption.

use credstream_core::BootstrapStore;
use credstream_vault::CredentialHandle;
use secrecy::ExposeSecret;

/// Resolve and print. Without `--export` only the username is printed; with
/// it, `{prefix}USERNAME=` / `{prefix}PASSWORD=` lines suitable for shell
/// `eval` are emitted, plaintext password included -- that is the command's
/// purpose, so it is the one place a secret intentionally reaches stdout.
pub async fn run(
    handle: &CredentialHandle,
    store: &dyn BootstrapStore,
    scope: Option<&str>,
    env_prefix: &str,
    export: bool,
) -> i32 {
    match handle.resolve(store, scope).await {
        Ok(credential) => {
            if export {
                println!("{env_prefix}USERNAME={}", credential.username);
                println!("{env_prefix}PASSWORD={}", credential.password.expose_secret());
            } else {
                println!("{}", credential.username);
            }
            0
        }
        Err(e) => {
            eprintln!("{e}");
            1
        }
    }
}
