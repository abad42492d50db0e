//! Synthetic type emission and final schema validation
//!
//! This crate turns first-pass resolved feature records into a TypeScript
//! source with one request/response interface pair per method, reads the
//! per-method schemas back out of the schema generated from that source, and
//! guards the final result.

pub mod synthetic;
mod templates;
pub mod validator;

pub use synthetic::{resolve_from_synthetic, MethodSchemas};
pub use validator::{validate_final, validate_synthetic_schema};

use lsp_json_schema_common::{FeatureRecord, GeneratorError, Result};
use lsp_json_schema_parser::naming::{self, NAMESPACE};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tera::Tera;
use tracing::debug;

/// Union of every response type, the single root of the synthetic schema
pub const ROOT_TYPE: &str = "_AnyFeature";

/// Template row for one method
#[derive(Debug, Serialize)]
struct FeatureRow<'a> {
    kind: &'static str,
    method: &'a str,
    title: &'a str,
    request_type: String,
    response_type: String,
    params_type: Option<String>,
    result_type: Option<String>,
}

impl<'a> FeatureRow<'a> {
    fn new(record: &'a FeatureRecord) -> Self {
        Self {
            kind: record.kind.symbols(),
            method: &record.method,
            title: &record.title,
            request_type: naming::request_type(record),
            response_type: naming::response_type(record),
            params_type: naming::params_type(record),
            result_type: naming::result_type(record),
        }
    }
}

/// Synthetic type emitter
///
/// Renders the `protocol-schema.ts` source that is handed to the schema
/// generator with [`ROOT_TYPE`] as its root type. A method whose parameters
/// were not resolved gets no `params` member, and a method without a
/// documented result gets no `result` member, so the final gate sees them as
/// missing.
pub struct SchemaSourceEmitter {
    spec_version: String,
    tera: Tera,
}

impl SchemaSourceEmitter {
    /// Create an emitter for one specification version
    pub fn new(spec_version: impl Into<String>) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self {
            spec_version: spec_version.into(),
            tera,
        })
    }

    /// Render the source text for the given records
    pub fn render(&self, records: &[FeatureRecord]) -> Result<String> {
        let rows: Vec<FeatureRow> = records.iter().map(FeatureRow::new).collect();
        for row in &rows {
            debug!(
                "{} params: {:?} result: {:?}",
                row.request_type, row.params_type, row.result_type
            );
        }

        let context = self.create_context(&rows);
        self.tera
            .render(templates::PROTOCOL_SCHEMA, &context)
            .map_err(|e| GeneratorError::Template(format!("Template error: {:?}", e)))
    }

    /// Render and write the source text
    pub fn write_to(&self, path: &Path, records: &[FeatureRecord]) -> Result<()> {
        let rendered = self.render(records)?;
        fs::write(path, rendered).map_err(|e| {
            GeneratorError::Template(format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    fn create_context(&self, rows: &[FeatureRow]) -> tera::Context {
        let mut context = tera::Context::new();
        context.insert("spec_version", &self.spec_version);
        context.insert("namespace", NAMESPACE);
        context.insert("root_type", ROOT_TYPE);
        context.insert("features", rows);
        context
    }
}
