//! Validation report types.

use serde::Serialize;

use crate::error::{Failure, NotebookError};
use crate::version::NotebookVersion;

/// Status line printed for an accepted notebook.
pub const VALID: &str = "valid";

/// Prefix of the status line printed for a rejected notebook.
pub const INVALID: &str = "invalid";

/// Result of validating one notebook document.
///
/// `failure` is `Some` exactly when `ok` is `false`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ValidationReport {
    /// Whether the document passed every check.
    pub ok: bool,
    /// The declared format version, when detection succeeded. Set on
    /// rejections that happen after detection (schema, duplicate ids).
    pub nbformat: Option<NotebookVersion>,
    /// Why the document was rejected.
    pub failure: Option<Failure>,
}

impl ValidationReport {
    /// Report for an accepted document.
    #[must_use]
    pub fn valid(version: NotebookVersion) -> Self {
        Self {
            ok: true,
            nbformat: Some(version),
            failure: None,
        }
    }

    /// Report for a rejected document, with the version if it was detected.
    #[must_use]
    pub fn invalid(error: &NotebookError, nbformat: Option<NotebookVersion>) -> Self {
        Self {
            ok: false,
            nbformat,
            failure: Some(Failure::from(error)),
        }
    }

    /// The single status line: `valid`, or `invalid: <detail>`.
    #[must_use]
    pub fn status_line(&self) -> String {
        match &self.failure {
            None => VALID.to_owned(),
            Some(failure) => format!("{INVALID}: {}", failure.message),
        }
    }

    /// Process exit code for this outcome: 0 when valid, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.ok)
    }
}
