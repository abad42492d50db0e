//! Final schema gates
//!
//! Two checks stand between the synthetic schema and a published result:
//! the document has to compile as a Draft 7 JSON Schema, and every method
//! has to come out of the second resolution pass with a params schema and,
//! where the markdown documents one, a result schema.

use crate::synthetic::MethodSchemas;
use crate::ROOT_TYPE;
use jsonschema::{Draft, JSONSchema};
use lsp_json_schema_common::{GeneratedSchema, GeneratorError, Result};
use tracing::{error, info};

/// Check that the synthetic schema is a usable Draft 7 document
///
/// # Errors
/// [`GeneratorError::InvalidSchema`] when the document does not compile, or
/// when it lacks the [`ROOT_TYPE`] definition.
pub fn validate_synthetic_schema(schema: &GeneratedSchema) -> Result<()> {
    if !schema.contains(ROOT_TYPE) {
        return Err(GeneratorError::InvalidSchema(format!(
            "synthetic schema has no `{}` definition",
            ROOT_TYPE
        )));
    }

    let document = schema.to_value();
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&document)
        .map_err(|e| GeneratorError::InvalidSchema(e.to_string()))?;

    info!(
        "synthetic schema compiles with {} definitions",
        schema.definitions().len()
    );
    Ok(())
}

/// Check that every method resolved
///
/// All offenders are collected and logged before failing.
///
/// # Errors
/// [`GeneratorError::IncompleteSchema`] naming every method without a params
/// schema and every method with a documented result but no result schema.
pub fn validate_final(methods: &[MethodSchemas]) -> Result<()> {
    let missing_params: Vec<String> = methods
        .iter()
        .filter(|m| m.params_schema.is_none())
        .map(|m| m.method.clone())
        .collect();

    let missing_results: Vec<String> = methods
        .iter()
        .filter(|m| m.expects_result && m.result_schema.is_none())
        .map(|m| m.method.clone())
        .collect();

    if missing_params.is_empty() && missing_results.is_empty() {
        info!("all {} methods resolved", methods.len());
        return Ok(());
    }

    if !missing_params.is_empty() {
        error!("{} missing params:", missing_params.len());
        for method in &missing_params {
            error!("  {}", method);
        }
    }
    if !missing_results.is_empty() {
        error!("{} missing results:", missing_results.len());
        for method in &missing_results {
            error!("  {}", method);
        }
    }

    Err(GeneratorError::IncompleteSchema {
        missing_params,
        missing_results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsp_json_schema_common::FeatureKind;
    use serde_json::json;

    fn method(name: &str, params: bool, result: bool, expects_result: bool) -> MethodSchemas {
        MethodSchemas {
            kind: FeatureKind::ClientRequest,
            method: name.to_string(),
            title: name.to_string(),
            params_schema: params.then(|| json!({ "type": "null" })),
            result_schema: result.then(|| json!({ "type": "null" })),
            expects_result,
        }
    }

    #[test]
    fn test_complete_methods_pass() {
        let methods = vec![
            method("shutdown", true, true, true),
            method("exit", true, false, false),
        ];
        assert!(validate_final(&methods).is_ok());
    }

    #[test]
    fn test_every_offender_is_reported() {
        let methods = vec![
            method("initialize", false, true, true),
            method("textDocument/hover", true, false, true),
            method("textDocument/codeAction", false, false, true),
            method("exit", true, false, false),
        ];

        match validate_final(&methods) {
            Err(GeneratorError::IncompleteSchema {
                missing_params,
                missing_results,
            }) => {
                assert_eq!(missing_params, vec!["initialize", "textDocument/codeAction"]);
                assert_eq!(
                    missing_results,
                    vec!["textDocument/hover", "textDocument/codeAction"]
                );
            }
            other => panic!("expected incomplete schema, got {:?}", other),
        }
    }

    #[test]
    fn test_synthetic_schema_compiles() {
        let schema = GeneratedSchema::from_value(json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "$ref": "#/definitions/_AnyFeature",
            "definitions": {
                "_AnyFeature": { "$ref": "#/definitions/_ShutdownResponse" },
                "_ShutdownResponse": {
                    "type": "object",
                    "properties": { "result": { "type": "null" } },
                    "required": ["result"]
                }
            }
        }))
        .unwrap();
        assert!(validate_synthetic_schema(&schema).is_ok());
    }

    #[test]
    fn test_synthetic_schema_without_root_is_invalid() {
        let schema = GeneratedSchema::from_value(json!({ "definitions": {} })).unwrap();
        assert!(matches!(
            validate_synthetic_schema(&schema),
            Err(GeneratorError::InvalidSchema(message)) if message.contains(ROOT_TYPE)
        ));
    }

    #[test]
    fn test_malformed_definition_is_invalid() {
        let schema = GeneratedSchema::from_value(json!({
            "definitions": {
                "_AnyFeature": { "type": 12 }
            }
        }))
        .unwrap();
        assert!(matches!(
            validate_synthetic_schema(&schema),
            Err(GeneratorError::InvalidSchema(_))
        ));
    }
}
