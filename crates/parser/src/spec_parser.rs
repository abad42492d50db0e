//! Markdown specification loader

use crate::extractor::{self, Extraction};
use crate::slicer;
use lsp_json_schema_common::{GeneratorError, Result, SpecConvention};
use std::fs;
use std::path::Path;
use tracing::info;

/// LSP markdown specification parser
///
/// Holds the raw text of one specification version together with the
/// convention used to slice it.
pub struct SpecParser {
    /// Raw markdown
    markdown: String,

    /// Delimiters of this specification version
    convention: SpecConvention,
}

impl SpecParser {
    /// Load the LSP markdown from a file
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = SpecParser::from_file(
    ///     "language-server-protocol/_specifications/specification-3-14.md",
    ///     SpecConvention::v3_14(),
    /// )?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P, convention: SpecConvention) -> Result<Self> {
        let markdown = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Structure(format!(
                "Failed to read specification {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Ok(Self::from_markdown(markdown, convention))
    }

    /// Use already loaded markdown
    pub fn from_markdown(markdown: impl Into<String>, convention: SpecConvention) -> Self {
        Self {
            markdown: markdown.into(),
            convention,
        }
    }

    /// Slice the markdown and extract one record per method
    pub fn parse(&self) -> Result<Extraction> {
        let blocks = slicer::slice(&self.markdown, &self.convention)?;
        info!(
            "sliced {} feature blocks from the {} specification",
            blocks.len(),
            self.convention.version
        );
        extractor::extract_features(blocks)
    }

    pub fn convention(&self) -> &SpecConvention {
        &self.convention
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }
}
