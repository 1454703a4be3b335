// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the credstream workspace.
//!
//! `SecretRecord` and `SecretField` mirror the vault's wire shape and are
//! never retained beyond field extraction. Password-like values are held as
//! [`SecretString`] so they zeroize on drop and stay out of `Debug` output.

use secrecy::SecretString;
use serde::Deserialize;

/// One field of a secret record, as returned by the vault.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretField {
    /// Display name of the field (e.g. "Username").
    #[serde(rename = "fieldName")]
    pub name: String,
    /// Stable machine-readable identifier (e.g. "username").
    #[serde(default)]
    pub slug: String,
    /// The field value. Treated as secret regardless of field kind.
    #[serde(rename = "itemValue")]
    pub value: SecretString,
}

/// A secret record fetched from the vault.
///
/// Immutable after fetch; owned exclusively by the resolution attempt that
/// fetched it.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretRecord {
    pub id: i64,
    #[serde(rename = "items", default)]
    pub fields: Vec<SecretField>,
}

/// Identifies which field of a secret record to extract.
///
/// A field is selected when its display name or its slug case-insensitively
/// equals the selector's name or slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelector {
    pub name: String,
    pub slug: String,
}

impl FieldSelector {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }

    /// Build a selector from a single configured label, deriving the slug as
    /// its lowercase form (vault slugs are lowercased display names).
    pub fn from_label(label: &str) -> Self {
        Self {
            name: label.to_owned(),
            slug: label.to_lowercase(),
        }
    }

    /// The default username selector.
    pub fn username() -> Self {
        Self::from_label("Username")
    }

    /// The default password selector.
    pub fn password() -> Self {
        Self::from_label("Password")
    }

    /// Whether this selector matches the given field.
    pub fn matches(&self, field: &SecretField) -> bool {
        [&field.name, &field.slug].into_iter().any(|candidate| {
            candidate.eq_ignore_ascii_case(&self.name) || candidate.eq_ignore_ascii_case(&self.slug)
        })
    }
}

/// The credential used to authenticate to the vault itself.
///
/// Resolved from the host platform's credential store, not from the vault.
#[derive(Clone)]
pub struct BootstrapIdentity {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for BootstrapIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapIdentity")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// The end product of a credential resolution. Immutable once constructed.
#[derive(Clone)]
pub struct ResolvedCredential {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn field(name: &str, slug: &str, value: &str) -> SecretField {
        SecretField {
            name: name.into(),
            slug: slug.into(),
            value: value.to_owned().into(),
        }
    }

    #[test]
    fn selector_matches_name_case_insensitively() {
        let sel = FieldSelector::username();
        assert!(sel.matches(&field("USERNAME", "", "x")));
        assert!(sel.matches(&field("username", "", "x")));
        assert!(!sel.matches(&field("login", "login", "x")));
    }

    #[test]
    fn selector_matches_slug() {
        let sel = FieldSelector::new("Machine Username", "machine-username");
        assert!(sel.matches(&field("User", "machine-username", "x")));
        assert!(sel.matches(&field("Machine Username", "other", "x")));
    }

    #[test]
    fn from_label_lowercases_slug() {
        let sel = FieldSelector::from_label("Password");
        assert_eq!(sel.name, "Password");
        assert_eq!(sel.slug, "password");
    }

    #[test]
    fn record_deserializes_from_vault_wire_shape() {
        let json = r#"{
            "id": 42,
            "items": [
                {"fieldName": "Username", "slug": "username", "itemValue": "svc1"},
                {"fieldName": "Password", "slug": "password", "itemValue": "p@ss"}
            ]
        }"#;
        let record: SecretRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.fields.len(), 2);
        assert_eq!(record.fields[0].name, "Username");
        assert_eq!(record.fields[1].value.expose_secret(), "p@ss");
    }

    #[test]
    fn debug_output_redacts_password() {
        let cred = ResolvedCredential {
            username: "svc1".into(),
            password: "p@ss".to_owned().into(),
        };
        let rendered = format!("{cred:?}");
        assert!(rendered.contains("svc1"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("p@ss"));
    }
}
