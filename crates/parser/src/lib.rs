//! Feature extraction for the LSP markdown specification
//!
//! This crate turns the prose specification into [`FeatureRecord`]s and
//! performs the first, provisional resolution of each record's parameter
//! and result descriptions against the naive schema.
//!
//! ## Stages
//!
//! 1. [`slicer::slice`] cuts the document into one block per feature
//! 2. [`extractor::extract_features`] reads method, kind, title and the raw
//!    params/result/error text of each block
//! 3. [`annotate`] resolves parameters ([`params`]) and results
//!    ([`results`]) and fails if a documented result could not be resolved
//!
//! [`naming`] derives the names used by the synthesized type definitions.

pub mod emoji;
pub mod extractor;
pub mod naming;
pub mod params;
pub mod results;
pub mod slicer;
mod spec_parser;

pub use extractor::Extraction;
pub use params::ParamsResolver;
pub use spec_parser::SpecParser;

use lsp_json_schema_common::{FeatureRecord, GeneratedSchema, Result};

/// Run the first resolution pass over all records
///
/// # Errors
/// [`lsp_json_schema_common::GeneratorError::UnresolvedResults`] if any
/// documented result did not resolve against the naive schema.
pub fn annotate(records: &mut [FeatureRecord], naive: &GeneratedSchema) -> Result<()> {
    params::annotate_params(records, naive);
    results::annotate_results(records);
    results::annotate_result_schema(records, naive);
    results::check_results(records)
}
