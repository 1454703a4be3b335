// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-execution registry of secret literals to mask.

use std::sync::{Arc, RwLock};

use credstream_core::ResolvedCredential;
use secrecy::ExposeSecret;

use crate::pattern::{self, MaskPattern};

/// A growable set of secret literals associated with one execution context.
///
/// Created when the execution starts, populated as credentials resolve,
/// discarded when the execution ends. Clones share the same underlying set,
/// so a writer attached before any secret is known observes literals
/// registered later.
#[derive(Debug, Clone, Default)]
pub struct MaskRegistry {
    values: Arc<RwLock<Vec<String>>>,
}

impl MaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a literal to the set. Empty values and duplicates are ignored.
    pub fn add(&self, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        if let Ok(mut values) = self.values.write()
            && !values.contains(&value)
        {
            values.push(value);
        }
    }

    /// Register both plaintext values of a resolved credential.
    pub fn register(&self, credential: &ResolvedCredential) {
        self.add(credential.username.clone());
        self.add(credential.password.expose_secret().to_owned());
    }

    /// Compile the current literal set. `None` when the set is empty or the
    /// pattern fails to compile (masking is then a passthrough).
    pub fn pattern(&self) -> Option<MaskPattern> {
        let values = self.values.read().map(|v| v.clone()).unwrap_or_default();
        pattern::compile_aggregate(values)
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().map(|v| v.is_empty()).unwrap_or(true)
    }

    pub fn len(&self) -> usize {
        self.values.read().map(|v| v.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_deduplicates() {
        let registry = MaskRegistry::new();
        registry.add("p@ss");
        registry.add("p@ss");
        registry.add("");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_registry_has_no_pattern() {
        assert!(MaskRegistry::new().pattern().is_none());
    }

    #[test]
    fn clones_share_the_same_set() {
        let registry = MaskRegistry::new();
        let clone = registry.clone();
        registry.add("p@ss");
        assert_eq!(clone.len(), 1);
        assert!(clone.pattern().is_some());
    }

    #[test]
    fn register_adds_username_and_password() {
        let registry = MaskRegistry::new();
        registry.register(&ResolvedCredential {
            username: "svc1".into(),
            password: "p@ss".to_owned().into(),
        });
        assert_eq!(registry.len(), 2);
        let pattern = registry.pattern().unwrap();
        assert_eq!(pattern.mask("svc1:p@ss"), "[REDACTED]:[REDACTED]");
    }
}
