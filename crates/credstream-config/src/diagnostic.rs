// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic error types for configuration loading and validation.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error suitable for miette rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The configuration could not be parsed or deserialized.
    #[error("failed to load configuration: {message}")]
    #[diagnostic(
        code(credstream::config::parse),
        help("check the TOML syntax and key names; unknown keys are rejected")
    )]
    Parse { message: String },

    /// A configuration value failed semantic validation.
    #[error("{message}")]
    #[diagnostic(code(credstream::config::validation))]
    Validation { message: String },
}

/// Render config errors to stderr as miette reports.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
