//! First-pass result resolution
//!
//! Result descriptions are prose with embedded code, e.g.
//! ``[`Hover`](#hover) \| `null` defined as follows:``. They are first
//! normalized into a type expression (`Hover | null`) by a fixed sequence of
//! [`NORMALIZATION_RULES`], then mapped onto the naive schema.

use lsp_json_schema_common::{
    FeatureRecord, GeneratedSchema, GeneratorError, Result, SchemaFragment,
};
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::LazyLock;
use tracing::{debug, trace, warn};

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(#[^)]*\)").expect("valid link regex"));

/// Phrases that introduce a trailing explanation
const CLAUSE_INTRODUCERS: &[&str] = &[" where ", " describing ", " as defined ", ". ", " if "];

/// Primitive type names accepted in result expressions
pub(crate) const PRIMITIVES: &[&str] = &["string", "number", "integer", "boolean"];

/// A named text transformation
pub struct NormalizationRule {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// Rules applied, in order, by [`normalize`]
pub const NORMALIZATION_RULES: &[NormalizationRule] = &[
    NormalizationRule {
        name: "strip_boilerplate",
        apply: strip_boilerplate,
    },
    NormalizationRule {
        name: "unescape_union",
        apply: unescape_union,
    },
    NormalizationRule {
        name: "collapse_links",
        apply: collapse_links,
    },
    NormalizationRule {
        name: "expand_shorthand",
        apply: expand_shorthand,
    },
    NormalizationRule {
        name: "truncate_clauses",
        apply: truncate_clauses,
    },
    NormalizationRule {
        name: "trim_period",
        apply: trim_period,
    },
];

/// Remove filler phrases and code-span backticks
pub fn strip_boilerplate(text: &str) -> String {
    text.replace("defined as follows:", "")
        .replace('`', "")
        .replace("the selected", "")
}

/// `\|` and `, or` become the union separator
pub fn unescape_union(text: &str) -> String {
    text.replace(r"\|", "|").replace(", or ", " | ")
}

/// `[text](#anchor)` becomes `text`
pub fn collapse_links(text: &str) -> String {
    LINK_RE.replace_all(text, "$1").trim().to_string()
}

/// Known phrases spelled out as type expressions
pub fn expand_shorthand(text: &str) -> String {
    text.replace("An array of DocumentLink", "DocumentLink[]")
}

/// Cut at the first clause introducer of each kind
pub fn truncate_clauses(text: &str) -> String {
    let mut result = text.trim();
    for introducer in CLAUSE_INTRODUCERS {
        if let Some((head, _)) = result.split_once(introducer) {
            result = head.trim();
        }
    }
    result.to_string()
}

/// Drop trailing periods
pub fn trim_period(text: &str) -> String {
    text.trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .trim_start()
        .to_string()
}

/// Normalize a raw result description into a type expression
///
/// # Examples
/// ```
/// use lsp_json_schema_parser::results::normalize;
///
/// assert_eq!(
///     normalize(r"[`Hover`](#hover) \| `null` defined as follows:"),
///     "Hover | null"
/// );
/// assert_eq!(
///     normalize("`TextEdit[]` \\| `null` describing the modification."),
///     "TextEdit[] | null"
/// );
/// ```
pub fn normalize(raw: &str) -> String {
    NORMALIZATION_RULES.iter().fold(raw.to_string(), |text, rule| {
        let next = (rule.apply)(&text);
        if next != text {
            trace!("{}: {:?} -> {:?}", rule.name, text, next);
        }
        next
    })
}

/// Map a normalized type expression onto the naive schema
///
/// `void` is the null type. Otherwise each `|` alternative is resolved; an
/// alternative starting with `null` or `void` is the null type, a `[]`
/// suffix makes an array, `(...)` groups a nested union and `{ a: T }` is an
/// object literal. If any alternative fails the whole expression is
/// [`SchemaFragment::Unresolved`].
pub fn result_to_schema(result: &str, naive: &GeneratedSchema) -> SchemaFragment {
    let result = result.trim();
    if result.is_empty() {
        return SchemaFragment::Unresolved;
    }
    if result == "void" || result == "void." {
        return SchemaFragment::Null;
    }
    parse_union(result, naive)
}

fn parse_union(expr: &str, naive: &GeneratedSchema) -> SchemaFragment {
    let alternatives = split_top_level(expr, &['|'])
        .into_iter()
        .map(|alternative| parse_alternative(alternative, naive))
        .collect();
    SchemaFragment::one_of(alternatives)
}

fn parse_alternative(alternative: &str, naive: &GeneratedSchema) -> SchemaFragment {
    let alternative = alternative.trim();

    if alternative.starts_with("null") || alternative.starts_with("void") {
        return SchemaFragment::Null;
    }
    if let Some(items) = alternative.strip_suffix("[]") {
        return SchemaFragment::array_of(parse_alternative(items, naive));
    }
    if let Some(group) = alternative
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_union(group, naive);
    }
    if let Some(body) = alternative
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    {
        return parse_object(body, naive);
    }

    if naive.contains(alternative) {
        SchemaFragment::Ref(alternative.to_string())
    } else if alternative == "any" {
        SchemaFragment::Any
    } else if PRIMITIVES.contains(&alternative) {
        SchemaFragment::Primitive(alternative.to_string())
    } else {
        SchemaFragment::Unresolved
    }
}

/// `{ range: Range, placeholder?: string }`
fn parse_object(body: &str, naive: &GeneratedSchema) -> SchemaFragment {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for member in split_top_level(body, &[',', ';']) {
        let member = member.trim();
        if member.is_empty() {
            continue;
        }
        let Some((name, ty)) = member.split_once(':') else {
            return SchemaFragment::Unresolved;
        };
        let name = name.trim();
        let (name, optional) = match name.strip_suffix('?') {
            Some(name) => (name.trim(), true),
            None => (name, false),
        };
        let Some(schema) = parse_union(ty, naive).to_json() else {
            return SchemaFragment::Unresolved;
        };
        properties.insert(name.to_string(), schema);
        if !optional {
            required.push(Value::String(name.to_string()));
        }
    }

    SchemaFragment::Inline(json!({
        "type": "object",
        "properties": properties,
        "required": required,
    }))
}

/// Split on separators that are not nested in brackets
pub(crate) fn split_top_level<'a>(expr: &'a str, separators: &[char]) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in expr.char_indices() {
        match c {
            '(' | '{' | '[' | '<' => depth += 1,
            ')' | '}' | ']' | '>' => depth = depth.saturating_sub(1),
            c if depth == 0 && separators.contains(&c) => {
                parts.push(&expr[start..i]);
                start = i + c.len_utf8();
            }
            _ => {},
        }
    }
    parts.push(&expr[start..]);
    parts
}

/// Fill `result` of every record
pub fn annotate_results(records: &mut [FeatureRecord]) {
    for record in records.iter_mut() {
        record.result = record.raw_result.as_deref().map(normalize);
    }
    debug!("with annotated results:");
    for record in records.iter() {
        debug!("  {}: {:?}", record.method, record.result);
    }
}

/// Fill `result_schema` of every record
pub fn annotate_result_schema(records: &mut [FeatureRecord], naive: &GeneratedSchema) {
    for record in records.iter_mut() {
        record.result_schema = match record.result.as_deref() {
            Some(result) => result_to_schema(result, naive),
            None => SchemaFragment::Unresolved,
        };

        if record.has_raw_result() && !record.result_schema.is_resolved() {
            warn!(
                "result {} not resolved: {:?}",
                record.method,
                record.result.as_deref().unwrap_or_default()
            );
        }
    }
}

/// Every documented result must have resolved
///
/// # Errors
/// [`GeneratorError::UnresolvedResults`] listing every record whose raw
/// result is non-empty but whose result schema is unresolved.
pub fn check_results(records: &[FeatureRecord]) -> Result<()> {
    let unparsed: Vec<String> = records
        .iter()
        .filter(|r| r.has_raw_result() && !r.result_schema.is_resolved())
        .map(|r| format!("{}: {}", r.method, r.raw_result.as_deref().unwrap_or_default()))
        .collect();

    if unparsed.is_empty() {
        Ok(())
    } else {
        Err(GeneratorError::UnresolvedResults(unparsed))
    }
}
