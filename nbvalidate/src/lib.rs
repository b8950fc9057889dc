//! # nbvalidate
//!
//! Validates Jupyter notebook documents against the nbformat v4 JSON schema.
//!
//! The **core validation engine** works on text already in memory and never
//! panics or propagates errors: every outcome, including unreadable input, is
//! folded into a [`ValidationReport`]. **Input strategies** (currently a
//! bounded reader used for standard input) feed it.
//!
//! ## Quick Start
//!
//! ```rust
//! use nbvalidate::{SourceConfig, ValidationConfig, validate_reader};
//!
//! let notebook = r#"{"cells": [], "metadata": {}, "nbformat": 4, "nbformat_minor": 5}"#;
//! let report = validate_reader(
//!     notebook.as_bytes(),
//!     &SourceConfig::default(),
//!     &ValidationConfig::default(),
//! );
//! assert_eq!(report.status_line(), "valid");
//!
//! let report = validate_reader(
//!     &b"not json"[..],
//!     &SourceConfig::default(),
//!     &ValidationConfig::default(),
//! );
//! assert!(report.status_line().starts_with("invalid: "));
//! assert_eq!(report.exit_code(), 1);
//! ```

mod config;
mod error;
pub mod output;
mod report;
mod schema;
mod strategy;
mod validator;
mod version;

pub use config::{DEFAULT_MAX_INPUT_BYTES, SourceConfig, ValidationConfig};
pub use error::{Failure, FailureKind, NotebookError};
pub use report::{INVALID, VALID, ValidationReport};
pub use strategy::reader::read_bounded;
pub use validator::validate_document;
pub use version::{LATEST_KNOWN_MINOR, NotebookVersion, SUPPORTED_MAJOR};

use std::io::Read;

use version::detect_version;

/// Read a whole notebook document from `reader` and validate it.
///
/// The input is fully consumed (up to `source_config.max_input_bytes`)
/// before validation starts. Read failures, oversized input and invalid
/// UTF-8 are reported the same way as schema failures.
#[must_use]
pub fn validate_reader<R: Read>(
    reader: R,
    source_config: &SourceConfig,
    validation_config: &ValidationConfig,
) -> ValidationReport {
    match read_bounded(reader, source_config.max_input_bytes) {
        Ok(text) => {
            tracing::debug!(bytes = text.len(), "read notebook input");
            validate_text(&text, validation_config)
        }
        Err(error) => finish(None, Err(error)),
    }
}

/// Validate a notebook document that is already in memory.
#[must_use]
pub fn validate_str(text: &str, validation_config: &ValidationConfig) -> ValidationReport {
    validate_text(text, validation_config)
}

fn validate_text(text: &str, config: &ValidationConfig) -> ValidationReport {
    let mut detected = None;
    let result = validator::parse_document(text).and_then(|document| {
        let version = detect_version(&document)?;
        detected = Some(version);
        validator::check_document(&document, version, config).map(|()| version)
    });
    finish(detected, result)
}

fn finish(
    detected: Option<NotebookVersion>,
    result: Result<NotebookVersion, NotebookError>,
) -> ValidationReport {
    match result {
        Ok(version) => {
            tracing::info!(%version, "notebook is valid");
            ValidationReport::valid(version)
        }
        Err(error) => {
            tracing::info!(kind = ?error.kind(), %error, "notebook is invalid");
            ValidationReport::invalid(&error, detected)
        }
    }
}
