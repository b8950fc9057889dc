//! Core validation engine: text in, detected version or rejection out.

use std::collections::HashSet;

use jsonschema::ValidationError;
use serde_json::Value;

use crate::config::ValidationConfig;
use crate::error::NotebookError;
use crate::schema;
use crate::version::{LATEST_KNOWN_MINOR, NotebookVersion, detect_version};

/// Validate an in-memory notebook document.
///
/// Steps run in order and stop at the first failure: emptiness, JSON
/// parsing, version detection, JSON Schema validation, then structural
/// checks that the schema language cannot express.
///
/// # Errors
///
/// Returns the [`NotebookError`] describing why the document was rejected.
pub fn validate_document(
    text: &str,
    config: &ValidationConfig,
) -> Result<NotebookVersion, NotebookError> {
    let document = parse_document(text)?;
    let version = detect_version(&document)?;
    check_document(&document, version, config)?;
    Ok(version)
}

/// Parse non-empty text into a JSON value.
///
/// # Errors
///
/// [`NotebookError::EmptyInput`] for blank text, [`NotebookError::Json`] for
/// anything `serde_json` rejects.
pub fn parse_document(text: &str) -> Result<Value, NotebookError> {
    if text.trim().is_empty() {
        return Err(NotebookError::EmptyInput);
    }
    serde_json::from_str(text).map_err(|e| NotebookError::Json(e.to_string()))
}

/// Run the schema and structural checks on a document whose version is known.
///
/// # Errors
///
/// [`NotebookError::Schema`] or [`NotebookError::DuplicateCellId`], or
/// [`NotebookError::SchemaCompile`] if the embedded schema is unusable.
pub fn check_document(
    document: &Value,
    version: NotebookVersion,
    config: &ValidationConfig,
) -> Result<(), NotebookError> {
    tracing::debug!(%version, "detected notebook format");

    if version.minor > LATEST_KNOWN_MINOR {
        tracing::warn!(
            %version,
            latest = LATEST_KNOWN_MINOR,
            "notebook minor version is newer than the latest known schema; validating against 4.{LATEST_KNOWN_MINOR}"
        );
    }

    let violations: Vec<String> = schema::validator_for(version)?
        .iter_errors(document)
        .map(|error| describe_violation(&error))
        .collect();
    if !violations.is_empty() {
        tracing::debug!(count = violations.len(), "schema violations found");
        return Err(NotebookError::Schema { violations });
    }

    if config.enforce_unique_cell_ids && version.has_cell_ids() {
        check_unique_cell_ids(document)?;
    }

    Ok(())
}

/// `<instance path>: <reason>`, with the offending value masked.
fn describe_violation(error: &ValidationError<'_>) -> String {
    let path = error.instance_path().as_str();
    let reason = error.masked();
    if path.is_empty() {
        reason.to_string()
    } else {
        format!("{path}: {reason}")
    }
}

/// Every cell `id` must appear at most once.
///
/// Runs after schema validation, so cells are known to be objects and ids to
/// be strings; anything else is skipped rather than reported twice.
fn check_unique_cell_ids(document: &Value) -> Result<(), NotebookError> {
    let Some(cells) = document.get("cells").and_then(Value::as_array) else {
        return Ok(());
    };

    let mut seen = HashSet::with_capacity(cells.len());
    for id in cells
        .iter()
        .filter_map(|cell| cell.get("id").and_then(Value::as_str))
    {
        if !seen.insert(id) {
            return Err(NotebookError::DuplicateCellId { id: id.to_owned() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(text: &str) -> Result<NotebookVersion, NotebookError> {
        validate_document(text, &ValidationConfig::default())
    }

    #[test]
    fn test_minimal_notebook_is_valid() {
        let result = validate(r#"{"cells": [], "metadata": {}, "nbformat": 4, "nbformat_minor": 5}"#);
        assert_eq!(result, Ok(NotebookVersion { major: 4, minor: 5 }));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(validate(""), Err(NotebookError::EmptyInput));
        assert_eq!(validate(" \n\t "), Err(NotebookError::EmptyInput));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(validate("not json"), Err(NotebookError::Json(_))));
    }

    #[test]
    fn test_missing_required_field_is_schema_violation() {
        let result = validate(r#"{"metadata": {}, "nbformat": 4, "nbformat_minor": 5}"#);
        let Err(NotebookError::Schema { violations }) = result else {
            panic!("expected schema violation, got {result:?}");
        };
        assert!(violations.iter().any(|v| v.contains("cells")), "{violations:?}");
    }

    #[test]
    fn test_violation_names_path_and_reason_not_the_cell() {
        let doc = json!({
            "cells": [{
                "cell_type": "code",
                "execution_count": "x",
                "id": "a",
                "metadata": {},
                "outputs": [],
                "source": "y".repeat(300)
            }],
            "metadata": {},
            "nbformat": 4,
            "nbformat_minor": 5
        })
        .to_string();

        let result = validate(&doc);
        let Err(NotebookError::Schema { violations }) = result else {
            panic!("expected schema violation, got {result:?}");
        };
        assert!(
            violations
                .iter()
                .any(|v| v.starts_with("/cells/0: ") && v.contains("oneOf")),
            "{violations:?}"
        );
        assert!(violations.iter().all(|v| !v.contains("yyyy")), "{violations:?}");
    }

    #[test]
    fn test_parse_document_rejects_blank_and_malformed_text() {
        assert_eq!(parse_document("\n"), Err(NotebookError::EmptyInput));
        assert!(matches!(parse_document("{"), Err(NotebookError::Json(_))));
        assert_eq!(parse_document("[]"), Ok(json!([])));
    }

    #[test]
    fn test_unknown_top_level_field_is_rejected() {
        let result = validate(
            r#"{"cells": [], "metadata": {}, "nbformat": 4, "nbformat_minor": 5, "extra": 1}"#,
        );
        assert!(matches!(result, Err(NotebookError::Schema { .. })));
    }

    #[test]
    fn test_future_minor_uses_latest_schema() {
        let result = validate(r#"{"cells": [], "metadata": {}, "nbformat": 4, "nbformat_minor": 9}"#);
        assert_eq!(result, Ok(NotebookVersion { major: 4, minor: 9 }));
    }

    #[test]
    fn test_duplicate_cell_ids() {
        let doc = json!({
            "cells": [
                {"cell_type": "markdown", "id": "intro", "metadata": {}, "source": "a"},
                {"cell_type": "raw", "id": "intro", "metadata": {}, "source": "b"}
            ],
            "metadata": {},
            "nbformat": 4,
            "nbformat_minor": 5
        })
        .to_string();

        assert_eq!(
            validate(&doc),
            Err(NotebookError::DuplicateCellId {
                id: "intro".to_owned()
            })
        );

        let mut lenient = ValidationConfig::default();
        lenient.enforce_unique_cell_ids = false;
        assert!(validate_document(&doc, &lenient).is_ok());
    }

    #[test]
    fn test_check_unique_cell_ids_ignores_missing_cells() {
        assert_eq!(check_unique_cell_ids(&json!({})), Ok(()));
        assert_eq!(
            check_unique_cell_ids(&json!({"cells": [{"id": "a"}, {"id": "b"}, {}]})),
            Ok(())
        );
    }
}
