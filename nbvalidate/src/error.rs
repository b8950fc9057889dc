//! Error types for notebook validation.

use serde::Serialize;
use thiserror::Error;

/// Upper bound on the characters of a single violation message kept in a
/// failure detail.
const MAX_VIOLATION_CHARS: usize = 240;

/// The category of a validation failure.
///
/// Every kind is reported to the user the same way (`invalid: ...`, exit 1);
/// the kind exists so callers and the JSON output can tell causes apart.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FailureKind {
    /// No non-whitespace input was provided.
    EmptyInput,
    /// The input exceeded the configured byte limit.
    InputTooLarge,
    /// The input is not valid UTF-8.
    InvalidEncoding,
    /// Reading the input failed.
    IoError,
    /// The input could not be parsed as JSON.
    JsonParseError,
    /// The top-level JSON value is not an object.
    NotAnObject,
    /// `nbformat` or `nbformat_minor` is absent.
    MissingVersion,
    /// `nbformat` or `nbformat_minor` is not a non-negative integer.
    InvalidVersion,
    /// The notebook's major format version is not the supported one.
    UnsupportedVersion,
    /// The document violates the nbformat JSON schema.
    SchemaViolation,
    /// Two cells share the same `id`.
    DuplicateCellId,
    /// The embedded schema could not be compiled.
    SchemaCompileError,
}

/// Why a notebook document was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotebookError {
    #[error("input is empty")]
    EmptyInput,

    #[error("input exceeds maximum size of {limit} bytes")]
    InputTooLarge { limit: u64 },

    #[error("input is not valid UTF-8")]
    InvalidEncoding,

    #[error("failed to read input: {0}")]
    Io(String),

    #[error("notebook is not valid JSON: {0}")]
    Json(String),

    #[error("notebook must be a JSON object")]
    NotAnObject,

    #[error("notebook is missing the '{field}' field")]
    MissingVersion { field: &'static str },

    #[error("notebook field '{field}' must be a non-negative integer")]
    InvalidVersion { field: &'static str },

    #[error("unsupported nbformat version {found} (expected {expected})")]
    UnsupportedVersion { found: u64, expected: u64 },

    #[error("{}", summarize_violations(.violations))]
    Schema { violations: Vec<String> },

    #[error("duplicate cell id '{id}'")]
    DuplicateCellId { id: String },

    #[error("failed to compile nbformat schema: {0}")]
    SchemaCompile(String),
}

impl NotebookError {
    /// The failure category of this error.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::EmptyInput => FailureKind::EmptyInput,
            Self::InputTooLarge { .. } => FailureKind::InputTooLarge,
            Self::InvalidEncoding => FailureKind::InvalidEncoding,
            Self::Io(_) => FailureKind::IoError,
            Self::Json(_) => FailureKind::JsonParseError,
            Self::NotAnObject => FailureKind::NotAnObject,
            Self::MissingVersion { .. } => FailureKind::MissingVersion,
            Self::InvalidVersion { .. } => FailureKind::InvalidVersion,
            Self::UnsupportedVersion { .. } => FailureKind::UnsupportedVersion,
            Self::Schema { .. } => FailureKind::SchemaViolation,
            Self::DuplicateCellId { .. } => FailureKind::DuplicateCellId,
            Self::SchemaCompile(_) => FailureKind::SchemaCompileError,
        }
    }
}

/// A rejected notebook, flattened for reporting.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Failure {
    /// The failure category.
    pub kind: FailureKind,
    /// Single-line human-readable description.
    pub message: String,
}

impl From<&NotebookError> for Failure {
    fn from(err: &NotebookError) -> Self {
        Self {
            kind: err.kind(),
            message: single_line(&err.to_string()),
        }
    }
}

/// Collapse all whitespace runs (including newlines) into single spaces.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn summarize_violations(violations: &[String]) -> String {
    let Some(first) = violations.first() else {
        return "notebook does not match the nbformat schema".to_owned();
    };

    let summary = truncate_chars(&single_line(first), MAX_VIOLATION_CHARS);
    match violations.len() - 1 {
        0 => summary,
        more => format!("{summary} (and {more} more)"),
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}
