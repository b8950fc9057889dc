//! Configuration types for notebook validation.
//!
//! Split into core validation config (what is checked) and source config
//! (how the document is read), so the core API does not leak input concerns.

/// Default upper bound on the size of a notebook document (10 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10_485_760;

/// Core validation config — applies regardless of where the document came from.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ValidationConfig {
    /// Reject notebooks (nbformat 4.5+) in which two cells share an `id`.
    ///
    /// Uniqueness cannot be expressed in JSON Schema, so this runs as a
    /// separate structural pass after schema validation. Defaults to `true`.
    pub enforce_unique_cell_ids: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enforce_unique_cell_ids: true,
        }
    }
}

/// Input source options.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SourceConfig {
    /// Maximum document size in bytes (default: 10 MiB).
    /// Input beyond this limit is rejected without being parsed.
    pub max_input_bytes: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}
