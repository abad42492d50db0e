//! Template loading and management

use lsp_json_schema_common::{GeneratorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Name the synthetic type source template is registered under
pub const PROTOCOL_SCHEMA: &str = "protocol-schema.ts";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("doc_comment", doc_comment_filter);

    tera.add_raw_template(
        PROTOCOL_SCHEMA,
        include_str!("../templates/protocol-schema.ts.tera"),
    )
    .map_err(|e| {
        GeneratorError::Template(format!("Failed to load {} template: {}", PROTOCOL_SCHEMA, e))
    })?;

    Ok(tera)
}

/// Filter to make free text safe inside a `/** ... */` block
fn doc_comment_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("doc_comment filter expects a string"))?;

    let single_line = s.split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(Value::String(single_line.replace("*/", "*\\/")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        let tera = load_templates().unwrap();
        assert!(tera.get_template_names().any(|name| name == PROTOCOL_SCHEMA));
    }

    #[test]
    fn test_doc_comment_filter() {
        let args = HashMap::new();
        let value = Value::String("Close  */ comment\nearly".to_string());
        assert_eq!(
            doc_comment_filter(&value, &args).unwrap(),
            Value::String("Close *\\/ comment early".to_string())
        );
        assert!(doc_comment_filter(&Value::Bool(true), &args).is_err());
    }
}
