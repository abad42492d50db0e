//! Names of the synthesized per-method types
//!
//! The emitted source imports the reference definitions as a namespace, so
//! every domain type in a type expression gets the namespace prefix.

use crate::results::{split_top_level, PRIMITIVES};
use lsp_json_schema_common::{FeatureRecord, SchemaFragment};
use regex::Regex;
use std::sync::LazyLock;

/// Namespace the reference definitions are imported under
pub const NAMESPACE: &str = "proto";

static CAPITALIZED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z])").expect("valid capitalized word regex"));

/// PascalCase identifier of a wire method name
///
/// # Examples
/// ```
/// use lsp_json_schema_parser::naming::method_title;
///
/// assert_eq!(method_title("textDocument/hover"), "TextDocumentHover");
/// assert_eq!(method_title("$/cancelRequest"), "CancelRequest");
/// ```
pub fn method_title(method: &str) -> String {
    method
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "$")
        .map(capitalize)
        .collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prefix every capitalized word of a type expression with the namespace
///
/// # Examples
/// ```
/// use lsp_json_schema_parser::naming::ns_result;
///
/// assert_eq!(ns_result("Location[] | null"), "proto.Location[] | null");
/// ```
pub fn ns_result(result: &str) -> String {
    CAPITALIZED_RE
        .replace_all(result, format!("{}.$1", NAMESPACE).as_str())
        .into_owned()
}

/// TypeScript rendering of a normalized result expression
///
/// Follows the grammar the result resolver accepts rather than the raw
/// text: an alternative starting with `null` or `void` is `null`, `integer`
/// is `number`, and every other name is namespaced.
///
/// # Examples
/// ```
/// use lsp_json_schema_parser::naming::result_expression;
///
/// assert_eq!(
///     result_expression("WorkspaceFolder[] | null defined as follows"),
///     "proto.WorkspaceFolder[] | null"
/// );
/// assert_eq!(result_expression("integer | null"), "number | null");
/// ```
pub fn result_expression(result: &str) -> String {
    if result.trim() == "void" {
        return "null".to_string();
    }
    render_union(result)
}

fn render_union(expr: &str) -> String {
    split_top_level(expr, &['|'])
        .into_iter()
        .map(render_alternative)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_alternative(alternative: &str) -> String {
    let alternative = alternative.trim();

    if alternative.starts_with("null") || alternative.starts_with("void") {
        return "null".to_string();
    }
    if let Some(items) = alternative.strip_suffix("[]") {
        return format!("{}[]", render_alternative(items));
    }
    if let Some(group) = alternative
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return format!("({})", render_union(group));
    }
    if let Some(body) = alternative
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    {
        return render_object(body);
    }

    match alternative {
        "any" => "any".to_string(),
        "integer" => "number".to_string(),
        primitive if PRIMITIVES.contains(&primitive) => primitive.to_string(),
        name => ns_result(name),
    }
}

fn render_object(body: &str) -> String {
    let members: Vec<String> = split_top_level(body, &[',', ';'])
        .into_iter()
        .map(str::trim)
        .filter(|member| !member.is_empty())
        .map(|member| match member.split_once(':') {
            Some((name, ty)) => format!("{}: {}", name.trim(), render_union(ty)),
            None => member.to_string(),
        })
        .collect();
    format!("{{ {} }}", members.join(", "))
}

/// Name of the synthesized request type
pub fn request_type(record: &FeatureRecord) -> String {
    format!("_{}Request", method_title(&record.method))
}

/// Name of the synthesized response type
pub fn response_type(record: &FeatureRecord) -> String {
    format!("_{}Response", method_title(&record.method))
}

/// Type expression of the `params` member, if the first pass resolved one
pub fn params_type(record: &FeatureRecord) -> Option<String> {
    match (&record.params_schema, record.params.as_deref()) {
        (SchemaFragment::Inline(_), Some(name)) => Some(format!("{}.{}", NAMESPACE, name)),
        (SchemaFragment::Null, _) => Some("null".to_string()),
        (SchemaFragment::Any, _) => Some("any".to_string()),
        _ => None,
    }
}

/// Type expression of the `result` member, if the method documents one and
/// the first pass resolved it
pub fn result_type(record: &FeatureRecord) -> Option<String> {
    if !record.has_raw_result() {
        return None;
    }
    match (&record.result_schema, record.result.as_deref()) {
        (SchemaFragment::Null, _) => Some("null".to_string()),
        (schema, Some(result)) if schema.is_resolved() && !result.is_empty() => {
            Some(result_expression(result))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsp_json_schema_common::FeatureKind;
    use serde_json::json;

    #[test]
    fn test_method_title() {
        assert_eq!(method_title("textDocument/definition"), "TextDocumentDefinition");
        assert_eq!(method_title("$/cancelRequest"), "CancelRequest");
        assert_eq!(method_title("initialize"), "Initialize");
        assert_eq!(
            method_title("window/workDoneProgress/create"),
            "WindowWorkDoneProgressCreate"
        );
    }

    #[test]
    fn test_ns_result() {
        assert_eq!(ns_result("Hover | null"), "proto.Hover | null");
        assert_eq!(
            ns_result("(Command | CodeAction)[] | null"),
            "(proto.Command | proto.CodeAction)[] | null"
        );
        assert_eq!(
            ns_result("{ range: Range, placeholder: string }"),
            "{ range: proto.Range, placeholder: string }"
        );
        assert_eq!(ns_result("void"), "void");
    }

    #[test]
    fn test_type_names() {
        let record = FeatureRecord::new("$/progress", FeatureKind::BidirectionalNotification, "Progress");
        assert_eq!(request_type(&record), "_ProgressRequest");
        assert_eq!(response_type(&record), "_ProgressResponse");
    }

    #[test]
    fn test_params_type() {
        let mut record = FeatureRecord::new("textDocument/hover", FeatureKind::ClientRequest, "Hover");
        assert_eq!(params_type(&record), None);

        record.params = Some("HoverParams".to_string());
        record.params_schema = SchemaFragment::Inline(json!({ "type": "object" }));
        assert_eq!(params_type(&record).as_deref(), Some("proto.HoverParams"));

        record.params_schema = SchemaFragment::Null;
        assert_eq!(params_type(&record).as_deref(), Some("null"));

        record.params_schema = SchemaFragment::Any;
        assert_eq!(params_type(&record).as_deref(), Some("any"));
    }

    #[test]
    fn test_result_type() {
        let mut record = FeatureRecord::new("shutdown", FeatureKind::ClientRequest, "Shutdown");
        assert_eq!(result_type(&record), None);

        record.raw_result = Some("void".to_string());
        record.result = Some("void".to_string());
        record.result_schema = SchemaFragment::Null;
        assert_eq!(result_type(&record).as_deref(), Some("null"));

        record.raw_result = Some("`Hover` \\| `null`".to_string());
        record.result = Some("Hover | null".to_string());
        record.result_schema = SchemaFragment::OneOf(vec![
            SchemaFragment::Ref("Hover".to_string()),
            SchemaFragment::Null,
        ]);
        assert_eq!(result_type(&record).as_deref(), Some("proto.Hover | null"));

        record.result_schema = SchemaFragment::Unresolved;
        assert_eq!(result_type(&record), None);
    }

    #[test]
    fn test_result_expression_follows_resolved_grammar() {
        assert_eq!(
            result_expression("WorkspaceFolder[] | null defined as follows"),
            "proto.WorkspaceFolder[] | null"
        );
        assert_eq!(result_expression("integer | null"), "number | null");
        assert_eq!(result_expression("void"), "null");
        assert_eq!(
            result_expression("(Command | CodeAction)[] | null"),
            "(proto.Command | proto.CodeAction)[] | null"
        );
        assert_eq!(
            result_expression("{ range: Range, placeholder?: string }"),
            "{ range: proto.Range, placeholder?: string }"
        );
        assert_eq!(result_expression("any"), "any");
    }

    #[test]
    fn test_trailing_prose_is_not_emitted() {
        use crate::results::{annotate_result_schema, annotate_results, check_results};
        use lsp_json_schema_common::GeneratedSchema;

        let naive = GeneratedSchema::from_value(json!({
            "definitions": { "WorkspaceFolder": { "type": "object" } }
        }))
        .unwrap();

        let mut folders = FeatureRecord::new(
            "workspace/workspaceFolders",
            FeatureKind::ServerRequest,
            "Workspace folders",
        );
        folders.raw_result = Some(
            "`WorkspaceFolder[] \\| null` defined as follows. `null` is returned if only a single file is open."
                .to_string(),
        );
        let mut count = FeatureRecord::new("foo/count", FeatureKind::ClientRequest, "Count");
        count.raw_result = Some("`integer` \\| `null`".to_string());

        let mut records = vec![folders, count];
        annotate_results(&mut records);
        annotate_result_schema(&mut records, &naive);
        check_results(&records).unwrap();

        assert_eq!(
            result_type(&records[0]).as_deref(),
            Some("proto.WorkspaceFolder[] | null")
        );
        assert_eq!(result_type(&records[1]).as_deref(), Some("number | null"));
    }
}
