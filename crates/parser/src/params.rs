//! First-pass parameter resolution against the naive schema

use lsp_json_schema_common::{FeatureRecord, GeneratedSchema, SchemaFragment};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static CODE_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.*?)`").expect("valid code span regex"));

/// Resolves free-text parameter descriptions
pub struct ParamsResolver;

impl ParamsResolver {
    /// First code span of the raw text, the candidate type name
    ///
    /// # Examples
    /// ```
    /// use lsp_json_schema_parser::ParamsResolver;
    ///
    /// assert_eq!(
    ///     ParamsResolver::candidate("[`HoverParams`](#hoverparams) defined as follows:"),
    ///     Some("HoverParams".to_string())
    /// );
    /// assert_eq!(ParamsResolver::candidate("void"), None);
    /// ```
    pub fn candidate(raw_params: &str) -> Option<String> {
        CODE_SPAN_RE
            .captures(raw_params)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Resolve parameters
    ///
    /// In order: a candidate naming a naive definition yields that definition
    /// unchanged; `void` and `none` yield the null type; `'any'` yields the
    /// unconstrained schema; anything else is unresolved.
    pub fn resolve(
        raw_params: Option<&str>,
        candidate: Option<&str>,
        naive: &GeneratedSchema,
    ) -> SchemaFragment {
        if let Some(definition) = candidate.and_then(|name| naive.definition(name)) {
            return SchemaFragment::Inline(definition.clone());
        }

        match raw_params {
            Some("void") | Some("none") => SchemaFragment::Null,
            Some("'any'") => SchemaFragment::Any,
            _ => SchemaFragment::Unresolved,
        }
    }
}

/// Fill `params` and `params_schema` of every record
pub fn annotate_params(records: &mut [FeatureRecord], naive: &GeneratedSchema) {
    for record in records.iter_mut() {
        record.params = record.raw_params.as_deref().and_then(ParamsResolver::candidate);
        record.params_schema = ParamsResolver::resolve(
            record.raw_params.as_deref(),
            record.params.as_deref(),
            naive,
        );

        if record.params_schema.is_resolved() {
            debug!("params {}: {:?}", record.method, record.params);
        } else {
            warn!(
                "params {} not resolved from naive schema: {:?}",
                record.method, record.raw_params
            );
        }
    }
}
