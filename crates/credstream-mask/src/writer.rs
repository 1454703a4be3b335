// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A writer wrapper that masks registered secret literals from output.
//!
//! The pattern is supplied lazily by the [`MaskRegistry`] on every write, so
//! literals registered after the writer is attached are still masked. To
//! catch literals split across write calls the writer holds back a bounded
//! look-back window (one byte short of the longest literal) and emits it
//! once the following write or a flush proves it safe. Non-UTF-8 chunks are
//! decoded lossily while a pattern is active; binary fidelity is only
//! guaranteed for the passthrough case.

use std::io::Write;

use crate::pattern::MaskPattern;
use crate::registry::MaskRegistry;

/// Wraps a downstream sink and substitutes `[REDACTED]` for every secret
/// literal currently registered.
pub struct MaskingWriter<W> {
    inner: W,
    registry: MaskRegistry,
    carry: Vec<u8>,
}

impl<W: Write> MaskingWriter<W> {
    pub fn new(inner: W, registry: MaskRegistry) -> Self {
        Self {
            inner,
            registry,
            carry: Vec::new(),
        }
    }

    /// Consumes the writer, flushing the held tail into the inner sink.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.flush()?;
        Ok(self.inner)
    }

    /// Split point separating what is safe to emit from the tail that could
    /// still be the start of a literal completed by a later write.
    fn split_point(text: &str, pattern: &MaskPattern) -> usize {
        let mut split = text.len().saturating_sub(pattern.max_len().saturating_sub(1));
        // A match straddling the split is held back entirely.
        for m in pattern.regex().find_iter(text) {
            if m.start() < split && m.end() > split {
                split = m.start();
                break;
            }
            if m.start() >= split {
                break;
            }
        }
        while split > 0 && !text.is_char_boundary(split) {
            split -= 1;
        }
        split
    }
}

impl<W: Write> Write for MaskingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let Some(pattern) = self.registry.pattern() else {
            // No literals registered (or compilation failed): passthrough.
            // The carry can only be non-empty if a pattern existed earlier;
            // the registry never shrinks, so this tail cannot contain a
            // registered literal start worth holding.
            if !self.carry.is_empty() {
                let held = std::mem::take(&mut self.carry);
                self.inner.write_all(&held)?;
            }
            self.inner.write_all(buf)?;
            return Ok(buf.len());
        };

        self.carry.extend_from_slice(buf);
        let text = String::from_utf8_lossy(&self.carry).into_owned();
        let split = Self::split_point(&text, &pattern);
        let (emit, hold) = text.split_at(split);
        if !emit.is_empty() {
            let masked = pattern.mask(emit);
            self.inner.write_all(masked.as_bytes())?;
        }
        self.carry = hold.as_bytes().to_vec();
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.carry.is_empty() {
            let held = std::mem::take(&mut self.carry);
            let text = String::from_utf8_lossy(&held).into_owned();
            let out = match self.registry.pattern() {
                Some(pattern) => pattern.mask(&text),
                None => text,
            };
            self.inner.write_all(out.as_bytes())?;
        }
        self.inner.flush()
    }
}
