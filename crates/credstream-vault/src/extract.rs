// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field extraction from a fetched secret record.

use credstream_core::{FieldSelector, ResolvedCredential, SecretRecord};
use secrecy::ExposeSecret;

/// Extract a username/password pair from a secret record.
///
/// Each selector independently picks the first matching field in record
/// order (case-insensitive against the field's display name or slug).
/// Returns `None` when either selector has no match; that is an expected
/// "secret is missing expected fields" outcome, not a transport failure,
/// and callers decide whether it is fatal.
pub fn extract(
    record: &SecretRecord,
    username_selector: &FieldSelector,
    password_selector: &FieldSelector,
) -> Option<ResolvedCredential> {
    let username = record
        .fields
        .iter()
        .find(|f| username_selector.matches(f))?;
    let password = record
        .fields
        .iter()
        .find(|f| password_selector.matches(f))?;
    Some(ResolvedCredential {
        username: username.value.expose_secret().to_owned(),
        password: password.value.clone(),
    })
}

#[cfg(test)]
mod tests {
    use credstream_core::SecretField;
    use secrecy::ExposeSecret;

    use super::*;

    fn field(name: &str, slug: &str, value: &str) -> SecretField {
        SecretField {
            name: name.into(),
            slug: slug.into(),
            value: value.to_owned().into(),
        }
    }

    fn record(fields: Vec<SecretField>) -> SecretRecord {
        SecretRecord { id: 42, fields }
    }

    #[test]
    fn extracts_default_fields() {
        let record = record(vec![
            field("Username", "username", "svc1"),
            field("Password", "password", "p@ss"),
        ]);
        let cred = extract(&record, &FieldSelector::username(), &FieldSelector::password())
            .unwrap();
        assert_eq!(cred.username, "svc1");
        assert_eq!(cred.password.expose_secret(), "p@ss");
    }

    #[test]
    fn first_match_wins_in_record_order() {
        let record = record(vec![
            field("Username", "username", "first"),
            field("username", "username-2", "second"),
            field("Password", "password", "p@ss"),
        ]);
        let cred = extract(&record, &FieldSelector::username(), &FieldSelector::password())
            .unwrap();
        assert_eq!(cred.username, "first");
    }

    #[test]
    fn selectors_are_evaluated_independently() {
        // Username selector matches, password selector does not.
        let record = record(vec![field("Username", "username", "svc1")]);
        assert!(
            extract(&record, &FieldSelector::username(), &FieldSelector::password()).is_none()
        );
    }

    #[test]
    fn no_matching_fields_returns_none() {
        let record = record(vec![
            field("Username", "username", "svc1"),
            field("Password", "password", "p@ss"),
        ]);
        let user_sel = FieldSelector::from_label("login");
        let pass_sel = FieldSelector::from_label("secret");
        assert!(extract(&record, &user_sel, &pass_sel).is_none());
    }

    #[test]
    fn matches_by_slug_when_names_differ() {
        let record = record(vec![
            field("Account Name", "username", "svc1"),
            field("Account Secret", "password", "p@ss"),
        ]);
        let cred = extract(&record, &FieldSelector::username(), &FieldSelector::password())
            .unwrap();
        assert_eq!(cred.username, "svc1");
    }
}
