//! Notebook format version detection.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::NotebookError;

/// The only major format version this validator accepts.
pub const SUPPORTED_MAJOR: u64 = 4;

/// Newest minor version with a known schema. Documents declaring a newer
/// minor are validated against this one.
pub const LATEST_KNOWN_MINOR: u64 = 5;

/// First minor version in which cells carry a required, unique `id`.
pub const CELL_ID_MINOR: u64 = 5;

/// The `nbformat.nbformat_minor` pair declared by a notebook document.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct NotebookVersion {
    pub major: u64,
    pub minor: u64,
}

impl NotebookVersion {
    /// Whether this version requires cell ids.
    #[must_use]
    pub fn has_cell_ids(self) -> bool {
        self.minor >= CELL_ID_MINOR
    }
}

impl fmt::Display for NotebookVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Read and check the declared format version of a parsed document.
///
/// # Errors
///
/// Returns [`NotebookError::NotAnObject`] for non-object documents,
/// [`NotebookError::MissingVersion`] / [`NotebookError::InvalidVersion`] when a
/// version field is absent or not a non-negative integer, and
/// [`NotebookError::UnsupportedVersion`] when the major version is not
/// [`SUPPORTED_MAJOR`]. Other major versions are never converted.
pub fn detect_version(document: &Value) -> Result<NotebookVersion, NotebookError> {
    let Value::Object(root) = document else {
        return Err(NotebookError::NotAnObject);
    };

    let major = version_field(root, "nbformat")?;
    if major != SUPPORTED_MAJOR {
        return Err(NotebookError::UnsupportedVersion {
            found: major,
            expected: SUPPORTED_MAJOR,
        });
    }

    let minor = version_field(root, "nbformat_minor")?;
    Ok(NotebookVersion { major, minor })
}

fn version_field(root: &Map<String, Value>, field: &'static str) -> Result<u64, NotebookError> {
    root.get(field)
        .ok_or(NotebookError::MissingVersion { field })?
        .as_u64()
        .ok_or(NotebookError::InvalidVersion { field })
}
