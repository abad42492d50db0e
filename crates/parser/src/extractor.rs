//! Feature record extraction
//!
//! Each block produced by the slicer is searched for a handful of markers:
//!
//! ```text
//! ="#textDocument_hover" ...>Hover Request (:leftwards_arrow_with_hook:)</a>
//! * method: 'textDocument/hover'
//! * params: `TextDocumentPositionParams`
//! * result: `Hover` \| `null`
//! * error: code and message set in case an exception happens
//! ```
//!
//! Blocks without a `* method: '...'` marker are prose asides and are
//! dropped, not rejected.

use crate::emoji;
use lsp_json_schema_common::{FeatureKind, FeatureRecord, GeneratorError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

static METHOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\* method: '(.*)'").expect("valid method regex"));
static PARAMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\* params: (.*)").expect("valid params regex"));
static RESULT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)\* result: (.*)").expect("valid result regex"));
static ERROR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)\* error: (.*)").expect("valid error regex"));

/// Records extracted from a specification, plus what was left out
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Method records sorted by `(kind, method)`
    pub records: Vec<FeatureRecord>,
    /// Anchor text of every block that did not describe a method
    pub dropped: Vec<String>,
}

/// Extract the record of one feature block
///
/// Returns `Ok(None)` for blocks that are not methods.
///
/// # Errors
/// [`GeneratorError::MalformedFeature`] if a method block's header does not
/// read `<title> (<kind>)` with a known kind.
pub fn extract_record(block: &str) -> Result<Option<FeatureRecord>> {
    let Some(method) = first_capture(&METHOD_RE, block) else {
        return Ok(None);
    };

    let (title, kind_text) = parse_header(block).ok_or_else(|| GeneratorError::MalformedFeature {
        method: method.clone(),
        reason: "header does not read `<title> (<kind>)`".to_string(),
    })?;

    let decoded = emoji::emojify(&kind_text);
    let kind = FeatureKind::from_symbols(&decoded).ok_or_else(|| {
        GeneratorError::MalformedFeature {
            method: method.clone(),
            reason: format!("unknown kind {:?}", decoded),
        }
    })?;

    let mut record = FeatureRecord::new(method, kind, title);
    record.raw_params = first_capture(&PARAMS_RE, block);
    record.raw_result = first_capture(&RESULT_RE, block);
    record.raw_error = first_capture(&ERROR_RE, block);

    Ok(Some(record))
}

/// Extract, de-duplicate check and sort the records of all blocks
pub fn extract_features<'a, I>(blocks: I) -> Result<Extraction>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut extraction = Extraction::default();

    for block in blocks {
        match extract_record(block)? {
            Some(record) => extraction.records.push(record),
            None => extraction.dropped.push(preview(block)),
        }
    }

    if !extraction.dropped.is_empty() {
        warn!("dropping {} non-methods:", extraction.dropped.len());
        for dropped in &extraction.dropped {
            warn!("  {}", dropped);
        }
    }

    let mut seen = HashSet::new();
    for record in &extraction.records {
        if !seen.insert(record.key()) {
            return Err(GeneratorError::DuplicateFeature {
                kind: record.kind,
                method: record.method.clone(),
            });
        }
    }

    extraction
        .records
        .sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.method.cmp(&b.method)));

    debug!("extracted {} features", extraction.records.len());
    for record in &extraction.records {
        debug!("  {} {} ({})", record.kind, record.method, record.title);
    }

    Ok(extraction)
}

/// Title and raw kind text of the block header
///
/// The header is the text between the first `>` and the following `<`,
/// i.e. the content of the anchor element.
fn parse_header(block: &str) -> Option<(String, String)> {
    let (_, after_tag) = block.split_once('>')?;
    let header = after_tag.split('<').next()?.trim();
    let (title, rest) = header.split_once('(')?;
    let kind = rest.split('(').next()?.replace(')', "");
    let kind = kind.trim();

    if kind.is_empty() {
        return None;
    }

    Some((title.trim().to_string(), kind.to_string()))
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end().to_string())
}

/// Anchor text of a block, or its first line when it has none
fn preview(block: &str) -> String {
    let anchor = block
        .split_once('>')
        .and_then(|(_, rest)| rest.split('<').next())
        .map(str::trim)
        .filter(|text| !text.is_empty());

    let line = anchor.unwrap_or_else(|| {
        block
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default()
    });
    line.chars().take(80).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOVER: &str = r##"="#textDocument_hover" name="textDocument_hover" class="anchor">Hover Request (:leftwards_arrow_with_hook:)</a>

The hover request is sent from the client to the server.

_Request_:
* method: 'textDocument/hover'
* params: [`TextDocumentPositionParams`](#textdocumentpositionparams)

_Response_:
* result: [`Hover`](#hover) \| `null` defined as follows:
* error: code and message set in case an exception happens during the hover request.
"##;

    #[test]
    fn test_extract_hover() {
        let record = extract_record(HOVER).unwrap().unwrap();
        assert_eq!(record.method, "textDocument/hover");
        assert_eq!(record.title, "Hover Request");
        assert_eq!(record.kind, FeatureKind::ClientRequest);
        assert_eq!(
            record.raw_params.as_deref(),
            Some("[`TextDocumentPositionParams`](#textdocumentpositionparams)")
        );
        assert_eq!(
            record.raw_result.as_deref(),
            Some(r"[`Hover`](#hover) \| `null` defined as follows:")
        );
        assert!(record
            .raw_error
            .as_deref()
            .unwrap()
            .starts_with("code and message"));
    }

    #[test]
    fn test_result_marker_is_case_insensitive() {
        let block = "=\"#exit\">Exit Notification (:arrow_right:)</a>\n\
                     * method: 'exit'\n* params: void\n* Result: void\n";
        let record = extract_record(block).unwrap().unwrap();
        assert_eq!(record.kind, FeatureKind::ClientNotification);
        assert_eq!(record.raw_result.as_deref(), Some("void"));
        assert_eq!(record.raw_error, None);
    }

    #[test]
    fn test_non_method_block_is_dropped() {
        let block = "=\"#general\">General Messages</a>\nSome prose.\n";
        assert!(extract_record(block).unwrap().is_none());
    }

    #[test]
    fn test_header_without_kind_is_an_error() {
        let block = "=\"#foo\">Foo Request</a>\n* method: 'foo'\n* params: void\n";
        match extract_record(block) {
            Err(GeneratorError::MalformedFeature { method, .. }) => assert_eq!(method, "foo"),
            other => panic!("expected malformed feature, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let block = "=\"#foo\">Foo Request (:tada:)</a>\n* method: 'foo'\n";
        match extract_record(block) {
            Err(GeneratorError::MalformedFeature { reason, .. }) => {
                assert!(reason.contains(":tada:"))
            }
            other => panic!("expected malformed feature, got {:?}", other),
        }
    }

    #[test]
    fn test_bidirectional_notification() {
        let block = "=\"#cancelRequest\">Cancellation Support (:arrow_right: :arrow_left:)</a>\n\
                     * method: '$/cancelRequest'\n* params: `CancelParams` defined as follows:\n";
        let record = extract_record(block).unwrap().unwrap();
        assert_eq!(record.kind, FeatureKind::BidirectionalNotification);
        assert_eq!(record.title, "Cancellation Support");
    }

    #[test]
    fn test_extract_features_sorts_and_reports_dropped() {
        let blocks = vec![
            "=\"#b\">B (:arrow_right:)</a>\n* method: 'b'\n",
            "=\"#prose\">Prose</a>\nwords\n",
            "=\"#z\">Z (:leftwards_arrow_with_hook:)</a>\n* method: 'z'\n",
            "=\"#a\">A (:arrow_right:)</a>\n* method: 'a'\n",
        ];
        let extraction = extract_features(blocks).unwrap();

        let keys: Vec<_> = extraction.records.iter().map(|r| r.key()).collect();
        assert_eq!(
            keys,
            vec![
                (FeatureKind::ClientRequest, "z"),
                (FeatureKind::ClientNotification, "a"),
                (FeatureKind::ClientNotification, "b"),
            ]
        );
        assert_eq!(extraction.dropped, vec!["Prose".to_string()]);
    }

    #[test]
    fn test_duplicate_features_rejected() {
        let block = "=\"#a\">A (:arrow_right:)</a>\n* method: 'a'\n";
        let result = extract_features(vec![block, block]);
        assert!(matches!(
            result,
            Err(GeneratorError::DuplicateFeature { ref method, .. }) if method == "a"
        ));
    }

    #[test]
    fn test_same_method_different_kind_is_allowed() {
        let blocks = vec![
            "=\"#a\">A (:arrow_right:)</a>\n* method: 'a'\n",
            "=\"#a2\">A (:arrow_left:)</a>\n* method: 'a'\n",
        ];
        assert_eq!(extract_features(blocks).unwrap().records.len(), 2);
    }
}
