//! Embedded nbformat v4 JSON schemas.
//!
//! Only the v4.5 schema ships with the crate. The schema for minors 0-4 is
//! derived from it: those minors predate cell ids, and because every cell
//! definition forbids additional properties, removing `id` from the cell
//! definitions also makes an `id` on an older-minor cell a violation.
//!
//! Both schemas are compiled once per process and shared read-only.

use std::sync::LazyLock;

use jsonschema::Validator;
use serde_json::{Value, json};

use crate::error::NotebookError;
use crate::version::NotebookVersion;

const NBFORMAT_V4_5_SCHEMA: &str = include_str!("../schemas/nbformat.v4.5.schema.json");

/// Schema definitions that describe a cell and carry the `id` property.
const CELL_DEFINITIONS: [&str; 3] = ["raw_cell", "markdown_cell", "code_cell"];

static SCHEMAS: LazyLock<Result<CompiledSchemas, String>> = LazyLock::new(CompiledSchemas::compile);

struct CompiledSchemas {
    without_cell_ids: Validator,
    with_cell_ids: Validator,
}

impl CompiledSchemas {
    fn compile() -> Result<Self, String> {
        let v4_5 = v4_5_schema().map_err(|e| e.to_string())?;
        let v4_4 = strip_cell_ids(v4_5.clone());

        let with_cell_ids =
            jsonschema::validator_for(&v4_5).map_err(|e| format!("nbformat v4.5: {e}"))?;
        let without_cell_ids =
            jsonschema::validator_for(&v4_4).map_err(|e| format!("nbformat v4.4: {e}"))?;

        tracing::debug!("compiled nbformat v4.4 and v4.5 schemas");
        Ok(Self {
            without_cell_ids,
            with_cell_ids,
        })
    }
}

/// The compiled schema that applies to a notebook of `version`.
///
/// # Errors
///
/// Returns [`NotebookError::SchemaCompile`] if the embedded schema failed to
/// compile.
pub fn validator_for(version: NotebookVersion) -> Result<&'static Validator, NotebookError> {
    let schemas = SCHEMAS
        .as_ref()
        .map_err(|e| NotebookError::SchemaCompile(e.clone()))?;

    Ok(if version.has_cell_ids() {
        &schemas.with_cell_ids
    } else {
        &schemas.without_cell_ids
    })
}

/// The embedded nbformat v4.5 schema document.
///
/// # Errors
///
/// Returns [`NotebookError::SchemaCompile`] if the embedded text is not JSON.
pub fn v4_5_schema() -> Result<Value, NotebookError> {
    serde_json::from_str(NBFORMAT_V4_5_SCHEMA)
        .map_err(|e| NotebookError::SchemaCompile(format!("embedded schema is not JSON: {e}")))
}

/// Derive the pre-4.5 schema: no cell `id` property, any minor accepted.
fn strip_cell_ids(mut schema: Value) -> Value {
    if let Some(definitions) = schema.get_mut("definitions").and_then(Value::as_object_mut) {
        for name in CELL_DEFINITIONS {
            let Some(cell) = definitions.get_mut(name).and_then(Value::as_object_mut) else {
                continue;
            };
            if let Some(properties) = cell.get_mut("properties").and_then(Value::as_object_mut) {
                properties.remove("id");
            }
            if let Some(required) = cell.get_mut("required").and_then(Value::as_array_mut) {
                required.retain(|field| field.as_str() != Some("id"));
            }
        }
        definitions.remove("cell_id");
    }

    if let Some(minor) = schema
        .pointer_mut("/properties/nbformat_minor")
        .and_then(Value::as_object_mut)
    {
        minor.insert("minimum".to_owned(), json!(0));
    }

    if let Some(root) = schema.as_object_mut() {
        root.insert(
            "description".to_owned(),
            json!("Jupyter Notebook v4.0-v4.4 JSON schema."),
        );
    }

    schema
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const V4_4: NotebookVersion = NotebookVersion { major: 4, minor: 4 };
    const V4_5: NotebookVersion = NotebookVersion { major: 4, minor: 5 };

    #[test]
    fn test_embedded_schema_is_draft4() {
        let schema = v4_5_schema().unwrap();
        assert_eq!(
            schema["$schema"],
            json!("http://json-schema.org/draft-04/schema#")
        );
        assert_eq!(schema["properties"]["nbformat"]["minimum"], json!(4));
    }

    #[test]
    fn test_strip_cell_ids_removes_id_from_every_cell_definition() {
        let stripped = strip_cell_ids(v4_5_schema().unwrap());
        for name in CELL_DEFINITIONS {
            let cell = &stripped["definitions"][name];
            assert!(cell["properties"].get("id").is_none(), "{name} still has id");
            let required = cell["required"].as_array().unwrap();
            assert!(!required.iter().any(|f| f == "id"), "{name} still requires id");
            assert!(required.iter().any(|f| f == "cell_type"));
        }
        assert!(stripped["definitions"].get("cell_id").is_none());
        assert_eq!(
            stripped["properties"]["nbformat_minor"]["minimum"],
            json!(0)
        );
    }

    #[test]
    fn test_embedded_schemas_compile() {
        assert!(validator_for(V4_4).is_ok());
        assert!(validator_for(V4_5).is_ok());
    }

    #[test]
    fn test_minor_selects_schema() {
        let cell_without_id = json!({
            "cells": [{"cell_type": "markdown", "metadata": {}, "source": "# Title"}],
            "metadata": {},
            "nbformat": 4,
            "nbformat_minor": 4
        });
        assert!(validator_for(V4_4).unwrap().is_valid(&cell_without_id));

        let mut newer = cell_without_id;
        newer["nbformat_minor"] = json!(5);
        assert!(!validator_for(V4_5).unwrap().is_valid(&newer));
    }
}
