//! Locations of pipeline inputs and outputs

use crate::toolchain::PROTOCOL_DIR;
use lsp_json_schema_common::SpecConvention;
use std::path::{Path, PathBuf};

/// Files written to the output directory for one specification version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub naive_schema: PathBuf,
    pub synthetic_schema: PathBuf,
    pub features: PathBuf,
}

impl ArtifactPaths {
    pub fn new(output: &Path, version: &str) -> Self {
        Self {
            naive_schema: output.join(format!("lsp.{}.naive.schema.json", version)),
            synthetic_schema: output.join(format!("lsp.{}.synthetic.schema.json", version)),
            features: output.join(format!("lsp.{}.features.json", version)),
        }
    }
}

/// Markdown document inside the LSP checkout
pub fn spec_markdown(lsp_dir: &Path, convention: &SpecConvention) -> PathBuf {
    lsp_dir
        .join("_specifications")
        .join(convention.spec_file_name())
}

/// Reference type definitions inside the reference checkout
pub fn protocol_source(vlspn_dir: &Path) -> PathBuf {
    vlspn_dir.join(PROTOCOL_DIR).join("src").join("protocol.ts")
}

/// Emitted per-method type definitions, next to the reference ones
pub fn protocol_schema_source(vlspn_dir: &Path) -> PathBuf {
    vlspn_dir
        .join(PROTOCOL_DIR)
        .join("src")
        .join("protocol-schema.ts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_names() {
        let paths = ArtifactPaths::new(Path::new("out"), "3.14");
        assert_eq!(paths.naive_schema, Path::new("out/lsp.3.14.naive.schema.json"));
        assert_eq!(
            paths.synthetic_schema,
            Path::new("out/lsp.3.14.synthetic.schema.json")
        );
        assert_eq!(paths.features, Path::new("out/lsp.3.14.features.json"));
    }

    #[test]
    fn test_input_locations() {
        assert_eq!(
            spec_markdown(Path::new("work/lsp"), &SpecConvention::v3_15()),
            Path::new("work/lsp/_specifications/specification-3-15.md")
        );
        assert_eq!(
            protocol_source(Path::new("work/vlspn")),
            Path::new("work/vlspn/protocol/src/protocol.ts")
        );
        assert_eq!(
            protocol_schema_source(Path::new("work/vlspn")),
            Path::new("work/vlspn/protocol/src/protocol-schema.ts")
        );
    }
}
