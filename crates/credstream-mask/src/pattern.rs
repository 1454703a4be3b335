// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregate pattern compilation from a set of secret literals.

use regex::Regex;
use tracing::warn;

/// The redaction placeholder.
pub const REDACTED: &str = "[REDACTED]";

/// One compiled matcher over a set of secret literals.
///
/// Rebuilt whenever the literal set changes; absent when the set is empty.
#[derive(Debug, Clone)]
pub struct MaskPattern {
    regex: Regex,
    max_len: usize,
}

impl MaskPattern {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Byte length of the longest literal; sizes the writer's look-back
    /// window.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Replace every literal occurrence in `text` with [`REDACTED`].
    pub fn mask(&self, text: &str) -> String {
        self.regex.replace_all(text, REDACTED).into_owned()
    }
}

/// Compile a set of secret literals into one alternation pattern.
///
/// Every literal is escaped so regex metacharacters match verbatim. Literals
/// are ordered longest-first so that when one literal is a prefix of
/// another, the longer occurrence is masked in full. Returns `None` for an
/// empty set (masking is then a no-op passthrough). A compilation failure is
/// logged and also yields `None`: masking is best-effort and must never fail
/// the host operation.
pub fn compile_aggregate<I, S>(literals: I) -> Option<MaskPattern>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut literals: Vec<String> = literals
        .into_iter()
        .map(|l| l.as_ref().to_owned())
        .filter(|l| !l.is_empty())
        .collect();
    if literals.is_empty() {
        return None;
    }
    literals.sort_by_key(|l| std::cmp::Reverse(l.len()));

    let max_len = literals.iter().map(|l| l.len()).max().unwrap_or(0);
    let joined = literals
        .iter()
        .map(|l| regex::escape(l))
        .collect::<Vec<_>>()
        .join("|");

    match Regex::new(&joined) {
        Ok(regex) => Some(MaskPattern { regex, max_len }),
        Err(e) => {
            warn!(error = %e, "failed to compile mask pattern; masking disabled");
            None
        }
    }
}
