//! Feature records and resolved schema fragments
//!
//! A [`FeatureRecord`] is created by the extractor from one block of the
//! specification and enriched by each later stage. Resolution results are
//! kept as [`SchemaFragment`]s so that "not resolved" is a variant of its own
//! rather than an absent value.

use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt;

/// Direction and shape of a protocol method, as marked by the LSP markdown's emoji
///
/// Variants are ordered the way their symbols sort, which gives the record
/// set its canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// ↩️ request sent by the client
    ClientRequest,
    /// ↩️ ↪️ request sent by either side
    BidirectionalRequest,
    /// ↪️ request sent by the server
    ServerRequest,
    /// ➡️ notification sent by the client
    ClientNotification,
    /// ➡️ ⬅️ notification sent by either side
    BidirectionalNotification,
    /// ⬅️ notification sent by the server
    ServerNotification,
}

impl FeatureKind {
    /// Classify the decoded text of a header parenthetical
    ///
    /// # Examples
    /// ```
    /// use lsp_json_schema_common::FeatureKind;
    ///
    /// assert_eq!(FeatureKind::from_symbols("↩️"), Some(FeatureKind::ClientRequest));
    /// assert_eq!(
    ///     FeatureKind::from_symbols("➡️ ⬅️"),
    ///     Some(FeatureKind::BidirectionalNotification)
    /// );
    /// assert_eq!(FeatureKind::from_symbols("maybe"), None);
    /// ```
    pub fn from_symbols(text: &str) -> Option<Self> {
        let mut client_request = false;
        let mut server_request = false;
        let mut client_notification = false;
        let mut server_notification = false;

        for token in text.split_whitespace() {
            match token.trim_end_matches('\u{fe0f}') {
                "↩" => client_request = true,
                "↪" => server_request = true,
                "➡" => client_notification = true,
                "⬅" => server_notification = true,
                _ => return None,
            }
        }

        match (
            client_request,
            server_request,
            client_notification,
            server_notification,
        ) {
            (true, false, false, false) => Some(Self::ClientRequest),
            (true, true, false, false) => Some(Self::BidirectionalRequest),
            (false, true, false, false) => Some(Self::ServerRequest),
            (false, false, true, false) => Some(Self::ClientNotification),
            (false, false, true, true) => Some(Self::BidirectionalNotification),
            (false, false, false, true) => Some(Self::ServerNotification),
            _ => None,
        }
    }

    /// Whether the method expects a response
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Self::ClientRequest | Self::BidirectionalRequest | Self::ServerRequest
        )
    }

    /// Symbols used in the LSP markdown for this kind
    pub fn symbols(&self) -> &'static str {
        match self {
            Self::ClientRequest => "↩️",
            Self::BidirectionalRequest => "↩️ ↪️",
            Self::ServerRequest => "↪️",
            Self::ClientNotification => "➡️",
            Self::BidirectionalNotification => "➡️ ⬅️",
            Self::ServerNotification => "⬅️",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbols())
    }
}

/// A schema fragment produced by resolution
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaFragment {
    /// Resolution was attempted and failed
    Unresolved,
    /// `{"type": "null"}`
    Null,
    /// `{}`, any value
    Any,
    /// A JSON primitive, e.g. `{"type": "string"}`
    Primitive(String),
    /// `{"$ref": "#/definitions/<name>"}`
    Ref(String),
    /// `{"type": "array", "items": <inner>}`
    ArrayOf(Box<SchemaFragment>),
    /// `{"oneOf": [...]}`, never containing an unresolved member
    OneOf(Vec<SchemaFragment>),
    /// A fragment copied verbatim out of a generated schema
    Inline(Value),
}

impl SchemaFragment {
    /// Union of alternatives
    ///
    /// Collapses to [`SchemaFragment::Unresolved`] if any alternative is
    /// unresolved, and to the alternative itself if there is only one.
    pub fn one_of(alternatives: Vec<SchemaFragment>) -> Self {
        if alternatives.is_empty() || alternatives.iter().any(|a| !a.is_resolved()) {
            return Self::Unresolved;
        }
        if alternatives.len() == 1 {
            return alternatives.into_iter().next().unwrap_or(Self::Unresolved);
        }
        Self::OneOf(alternatives)
    }

    /// Array of an item schema; arrays of unresolved items stay unresolved
    pub fn array_of(items: SchemaFragment) -> Self {
        if items.is_resolved() {
            Self::ArrayOf(Box::new(items))
        } else {
            Self::Unresolved
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    /// JSON rendering, `None` when unresolved
    pub fn to_json(&self) -> Option<Value> {
        let value = match self {
            Self::Unresolved => return None,
            Self::Null => json!({ "type": "null" }),
            Self::Any => json!({}),
            Self::Primitive(ty) => json!({ "type": ty }),
            Self::Ref(name) => json!({ "$ref": format!("#/definitions/{}", name) }),
            Self::ArrayOf(items) => json!({ "type": "array", "items": items.to_json()? }),
            Self::OneOf(alternatives) => {
                let rendered = alternatives
                    .iter()
                    .map(SchemaFragment::to_json)
                    .collect::<Option<Vec<_>>>()?;
                json!({ "oneOf": rendered })
            }
            Self::Inline(value) => value.clone(),
        };
        Some(value)
    }
}

impl Serialize for SchemaFragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// One documented protocol method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    /// Wire identifier, e.g. `textDocument/hover`
    pub method: String,
    pub kind: FeatureKind,
    /// Human title from the block header
    pub title: String,

    pub raw_params: Option<String>,
    pub raw_result: Option<String>,
    pub raw_error: Option<String>,

    /// First code span of `raw_params`, the candidate type name
    pub params: Option<String>,
    /// Normalized result type expression
    pub result: Option<String>,

    /// Provisional parameter schema from the naive schema
    pub params_schema: SchemaFragment,
    /// Provisional result schema from the naive schema
    pub result_schema: SchemaFragment,
}

impl FeatureRecord {
    pub fn new(method: impl Into<String>, kind: FeatureKind, title: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            kind,
            title: title.into(),
            raw_params: None,
            raw_result: None,
            raw_error: None,
            params: None,
            result: None,
            params_schema: SchemaFragment::Unresolved,
            result_schema: SchemaFragment::Unresolved,
        }
    }

    /// Unique key of the record
    pub fn key(&self) -> (FeatureKind, &str) {
        (self.kind, self.method.as_str())
    }

    /// Whether the markdown documents a non-empty result
    pub fn has_raw_result(&self) -> bool {
        self.raw_result
            .as_deref()
            .is_some_and(|raw| !raw.trim().is_empty())
    }
}
