// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret masking for streamed build/console output.
//!
//! Secret literals registered in a per-execution [`MaskRegistry`] are
//! compiled into one aggregate pattern; a [`MaskingWriter`] wrapped around
//! the output sink substitutes `[REDACTED]` for every occurrence, including
//! occurrences split across separate writes (bounded look-back). Masking is
//! a best-effort safety net: it degrades to passthrough rather than failing
//! the host operation.

pub mod pattern;
pub mod registry;
pub mod writer;

pub use pattern::{MaskPattern, REDACTED, compile_aggregate};
pub use registry::MaskRegistry;
pub use writer::MaskingWriter;
