//! Common types and utilities for lsp-json-schema
//!
//! This crate contains the shared data model (feature records, resolved
//! schema fragments, generated schemas, spec conventions), the error
//! taxonomy, and the generator configuration used by the parser,
//! generator, pipeline and CLI crates.

pub mod config;
pub mod convention;
pub mod feature;
pub mod schema;

pub use config::GeneratorConfig;
pub use convention::{ConventionTable, SpecConvention};
pub use feature::{FeatureKind, FeatureRecord, SchemaFragment};
pub use schema::GeneratedSchema;

use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while deriving the schema
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Spec structure error: {0}")]
    Structure(String),

    #[error("Malformed feature `{method}`: {reason}")]
    MalformedFeature { method: String, reason: String },

    #[error("Duplicate feature {kind} `{method}`")]
    DuplicateFeature { kind: FeatureKind, method: String },

    #[error("Unparsed results:\n  {}", .0.join("\n  "))]
    UnresolvedResults(Vec<String>),

    #[error(
        "Incomplete schema: {} missing params, {} missing results",
        missing_params.len(),
        missing_results.len()
    )]
    IncompleteSchema {
        missing_params: Vec<String>,
        missing_results: Vec<String>,
    },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("`{tool}` failed ({status}):\n{output}")]
    ExternalTool {
        tool: String,
        status: ExitStatus,
        output: String,
    },

    #[error("Git error: {0}")]
    Git(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
