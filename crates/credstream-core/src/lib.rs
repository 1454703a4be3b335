// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for credstream.
//!
//! This crate provides the error taxonomy, the domain types shared across the
//! workspace (secret records, field selectors, resolved credentials), and the
//! trait through which the host platform's credential store is injected.

pub mod error;
pub mod lookup;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::CredstreamError;
pub use lookup::BootstrapStore;
pub use types::{BootstrapIdentity, FieldSelector, ResolvedCredential, SecretField, SecretRecord};
