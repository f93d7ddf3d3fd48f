//! Embedded JSON Schema for style documents.
//!
//! The schema pins down the document's outer shape only: the root is an
//! object, `sources` an object and `layers` an array. A violation there
//! leaves nothing to render, so the load fails and every violation is
//! reported together. Individual entries are not checked here; a bad layer
//! or source is dropped later with a diagnostic.

use jsonschema::JSONSchema;
use serde_json::Value;
use std::sync::OnceLock;

const STYLE_SCHEMA: &str = include_str!("../schema/style_document.schema.json");

static SCHEMA_VALUE: OnceLock<Result<Value, String>> = OnceLock::new();
static COMPILED: OnceLock<Result<JSONSchema, String>> = OnceLock::new();

fn schema_value() -> Result<&'static Value, String> {
    SCHEMA_VALUE
        .get_or_init(|| {
            serde_json::from_str(STYLE_SCHEMA)
                .map_err(|err| format!("parsing embedded style schema: {err}"))
        })
        .as_ref()
        .map_err(Clone::clone)
}

fn compiled_schema() -> Result<&'static JSONSchema, String> {
    COMPILED
        .get_or_init(|| {
            let schema = schema_value()?;
            JSONSchema::compile(schema)
                .map_err(|err| format!("compiling embedded style schema: {err}"))
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// The embedded schema, for callers that want to publish or inspect it.
pub fn style_schema() -> Result<&'static Value, String> {
    schema_value()
}

/// Validate `document` against the style schema.
///
/// Returns every violation as `"<instance path>: <message>"`, in the order the
/// validator reports them.
pub fn validate_style_value(document: &Value) -> Result<(), Vec<String>> {
    let schema = compiled_schema().map_err(|err| vec![err])?;
    schema.validate(document).map_err(|errors| {
        errors
            .map(|err| {
                let path = err.instance_path.to_string();
                if path.is_empty() {
                    err.to_string()
                } else {
                    format!("{path}: {err}")
                }
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_schema_compiles() {
        assert!(compiled_schema().is_ok());
        assert!(style_schema().unwrap().get("properties").is_some());
    }

    #[test]
    fn accepts_minimal_documents() {
        assert!(validate_style_value(&json!({})).is_ok());
        assert!(validate_style_value(&json!({"version": 8, "sprite": "x"})).is_ok());
        assert!(
            validate_style_value(&json!({
                "sources": {"s": {"type": "bogus"}},
                "layers": [{"id": "a", "type": "bogus"}]
            }))
            .is_ok()
        );
    }

    #[test]
    fn entry_level_problems_pass_validation() {
        assert!(
            validate_style_value(&json!({
                "sources": {"s": {"url": 5}},
                "layers": [{"type": "fill"}, {"id": "x", "type": "line", "minzoom": "low"}, 3]
            }))
            .is_ok()
        );
    }

    #[test]
    fn reports_every_violation() {
        let errors = validate_style_value(&json!({
            "sources": ["not", "a", "map"],
            "layers": {"id": "x"}
        }))
        .unwrap_err();
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert!(errors.iter().any(|e| e.starts_with("/layers")));
        assert!(errors.iter().any(|e| e.starts_with("/sources")));
    }

    #[test]
    fn rejects_non_object_root() {
        assert!(validate_style_value(&json!([1, 2])).is_err());
    }
}
