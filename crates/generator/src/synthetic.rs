//! Second resolution pass against the synthetic schema
//!
//! The first pass works per type name and cannot see method-shaped results
//! such as unions or arrays. Once the schema generator has seen the emitted
//! request/response interfaces, the `params` member of `_<Title>Request` and
//! the `result` member of `_<Title>Response` are the authoritative schemas
//! of a method.

use lsp_json_schema_common::{FeatureKind, FeatureRecord, GeneratedSchema};
use lsp_json_schema_parser::naming;
use serde::Serialize;
use serde_json::Value;

/// Final schemas of one method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSchemas {
    pub kind: FeatureKind,
    pub method: String,
    pub title: String,
    pub params_schema: Option<Value>,
    pub result_schema: Option<Value>,
    /// Whether the markdown documents a result for this method
    #[serde(skip)]
    pub expects_result: bool,
}

impl MethodSchemas {
    /// Look up the schemas of one record
    pub fn lookup(record: &FeatureRecord, synthetic: &GeneratedSchema) -> Self {
        let params_schema = synthetic
            .property(&naming::request_type(record), "params")
            .cloned();
        let result_schema = synthetic
            .property(&naming::response_type(record), "result")
            .cloned();

        Self {
            kind: record.kind,
            method: record.method.clone(),
            title: record.title.clone(),
            params_schema,
            result_schema,
            expects_result: record.has_raw_result(),
        }
    }
}

/// Look up the final schemas of every record, in record order
pub fn resolve_from_synthetic(
    records: &[FeatureRecord],
    synthetic: &GeneratedSchema,
) -> Vec<MethodSchemas> {
    records
        .iter()
        .map(|record| MethodSchemas::lookup(record, synthetic))
        .collect()
}
