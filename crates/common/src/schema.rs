//! Read-only view of a tool-generated JSON Schema
//!
//! Both the naive and the synthetic schema are flat documents of the form
//! `{"definitions": {<TypeName>: <fragment>, ...}}`. Anything beyond the
//! `definitions` map is carried along untouched.

use crate::{GeneratorError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A generated schema document keyed by type name
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSchema {
    definitions: Map<String, Value>,
    /// Every other top-level member (`$schema`, `$ref`, ...)
    rest: Map<String, Value>,
}

impl GeneratedSchema {
    /// Wrap a parsed document; it must be an object with a `definitions` object
    pub fn from_value(document: Value) -> Result<Self> {
        let Value::Object(mut rest) = document else {
            return Err(GeneratorError::InvalidSchema(
                "schema document is not an object".to_string(),
            ));
        };

        match rest.remove("definitions") {
            Some(Value::Object(definitions)) => Ok(Self { definitions, rest }),
            Some(_) => Err(GeneratorError::InvalidSchema(
                "`definitions` is not an object".to_string(),
            )),
            None => Err(GeneratorError::InvalidSchema(
                "document has no `definitions`".to_string(),
            )),
        }
    }

    /// Parse a schema from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// The `definitions` map
    pub fn definitions(&self) -> &Map<String, Value> {
        &self.definitions
    }

    pub fn definition(&self, name: &str) -> Option<&Value> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Schema of a named property of a named definition
    pub fn property(&self, definition: &str, property: &str) -> Option<&Value> {
        self.definition(definition)?
            .get("properties")?
            .get(property)
    }

    /// The whole document, keys sorted at every level
    pub fn to_value(&self) -> Value {
        let mut document = self.rest.clone();
        document.insert(
            "definitions".to_string(),
            Value::Object(self.definitions.clone()),
        );
        sorted(Value::Object(document))
    }

    /// Write pretty-printed with sorted keys
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let rendered = serde_json::to_string_pretty(&self.to_value())?;
        fs::write(path, rendered + "\n").map_err(|e| {
            GeneratorError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write {}: {}", path.display(), e),
            ))
        })
    }
}

fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sorted(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> GeneratedSchema {
        GeneratedSchema::from_value(json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "definitions": {
                "Hover": { "type": "object", "properties": { "contents": {} } },
                "_HoverRequest": {
                    "type": "object",
                    "properties": { "params": { "$ref": "#/definitions/HoverParams" } }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_lookups() {
        let schema = schema();
        assert!(schema.contains("Hover"));
        assert!(!schema.contains("Location"));
        assert_eq!(
            schema.property("_HoverRequest", "params"),
            Some(&json!({ "$ref": "#/definitions/HoverParams" }))
        );
        assert_eq!(schema.property("_HoverRequest", "result"), None);
        assert_eq!(schema.property("Missing", "params"), None);
    }

    #[test]
    fn test_rejects_document_without_definitions() {
        let result = GeneratedSchema::from_value(json!({ "type": "object" }));
        assert!(matches!(result, Err(GeneratorError::InvalidSchema(_))));
    }

    #[test]
    fn test_write_sorted() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lsp.3.14.naive.schema.json");
        schema().write_to(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let hover = written.find("\"Hover\"").unwrap();
        let request = written.find("\"_HoverRequest\"").unwrap();
        assert!(hover < request);
        assert_eq!(GeneratedSchema::from_json(&written).unwrap(), schema());
    }
}
