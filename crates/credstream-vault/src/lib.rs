// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault client and cached credential resolution.
//!
//! The pipeline: [`resolver::CredentialHandle`] asks [`client::VaultClient`]
//! for the raw secret record (once per handle), [`extract::extract`] pulls
//! the username/password fields out, and the result is cached for the
//! handle's lifetime.

pub mod client;
pub mod endpoints;
pub mod extract;
pub mod resolver;

pub use client::VaultClient;
pub use endpoints::VaultEndpoints;
pub use extract::extract;
pub use resolver::CredentialHandle;
