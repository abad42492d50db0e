//! Typographical conventions of the LSP markdown specifications
//!
//! Each published LSP version marks the start of the
//! method listing, the end of it, and the boundary between two methods with
//! fixed strings. A [`ConventionTable`] is built once at startup and handed
//! to the slicer by reference.

/// Delimiters used to slice one LSP version's markdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecConvention {
    /// Specification version label (e.g. "3.14")
    pub version: &'static str,
    /// Marks the end of the preamble; features follow it
    pub preamble_separator: &'static str,
    /// Marks the start of the implementation considerations
    pub epilogue_separator: &'static str,
    /// Marks the start of every feature block
    pub feature_separator: &'static str,
}

impl SpecConvention {
    /// Convention of the 3.14 specification
    pub const fn v3_14() -> Self {
        Self {
            version: "3.14",
            preamble_separator: "#### $ Notifications and Requests",
            epilogue_separator: "### Implementation considerations",
            feature_separator: "#### <a href",
        }
    }

    /// Convention of the 3.15 specification
    ///
    /// The `$` section moved, so the preamble now ends at the server lifetime
    /// heading. Everything else is inherited from 3.14.
    pub const fn v3_15() -> Self {
        Self {
            version: "3.15",
            preamble_separator: "#### Server lifetime",
            ..Self::v3_14()
        }
    }

    /// File name of this version's markdown document
    ///
    /// # Examples
    /// ```
    /// use lsp_json_schema_common::SpecConvention;
    ///
    /// assert_eq!(
    ///     SpecConvention::v3_14().spec_file_name(),
    ///     "specification-3-14.md"
    /// );
    /// ```
    pub fn spec_file_name(&self) -> String {
        format!("specification-{}.md", self.version.replace('.', "-"))
    }
}

/// Immutable lookup of conventions by version, oldest first
#[derive(Debug, Clone)]
pub struct ConventionTable {
    conventions: [SpecConvention; 2],
}

impl ConventionTable {
    /// Table of every supported specification version
    pub fn new() -> Self {
        Self {
            conventions: [SpecConvention::v3_14(), SpecConvention::v3_15()],
        }
    }

    /// Exact lookup
    pub fn get(&self, version: &str) -> Option<&SpecConvention> {
        self.conventions.iter().find(|c| c.version == version)
    }

    /// Newest known convention
    pub fn latest(&self) -> &SpecConvention {
        let [.., latest] = &self.conventions;
        latest
    }

    /// Lookup falling back to the newest known convention
    pub fn resolve(&self, version: &str) -> &SpecConvention {
        self.get(version).unwrap_or_else(|| self.latest())
    }

    /// All known version labels, oldest first
    pub fn versions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.conventions.iter().map(|c| c.version)
    }
}

impl Default for ConventionTable {
    fn default() -> Self {
        Self::new()
    }
}
