//! Generator configuration
//!
//! Every top-level section has a default, so a YAML file only needs the
//! sections it overrides:
//!
//! ```yaml
//! spec_version: "3.15"
//! lsp:
//!   url: https://github.com/microsoft/language-server-protocol
//!   revision: gh-pages
//! ```

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_SPEC_VERSION: &str = "3.14";
pub const DEFAULT_LSP_REPO: &str = "https://github.com/microsoft/language-server-protocol";
pub const DEFAULT_LSP_REVISION: &str = "gh-pages";
pub const DEFAULT_VLSPN_REPO: &str = "https://github.com/microsoft/vscode-languageserver-node";
pub const DEFAULT_VLSPN_REVISION: &str = "release/protocol/3.15.3";
pub const DEFAULT_SCHEMA_GENERATOR: &str = "ts-json-schema-generator";
pub const DEFAULT_SCHEMA_GENERATOR_VERSION: &str = "0.70.2";
pub const DEFAULT_FORMATTER: &str = "prettier";
pub const DEFAULT_FORMATTER_VERSION: &str = "2.0.5";

/// A git repository pinned to a revision
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RepoSource {
    pub url: String,
    /// Branch, tag or commit
    pub revision: String,
}

/// An npm package pinned to a version
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageSource {
    pub name: String,
    pub version: String,
}

/// Settings for one generator run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Specification version, selects the convention and the markdown file
    pub spec_version: String,
    /// Repository holding the markdown specification
    pub lsp: RepoSource,
    /// Repository holding the reference type definitions
    pub vlspn: RepoSource,
    /// Schema generation tool
    pub schema_generator: PackageSource,
    /// Source formatter
    pub formatter: PackageSource,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            spec_version: DEFAULT_SPEC_VERSION.to_string(),
            lsp: RepoSource {
                url: DEFAULT_LSP_REPO.to_string(),
                revision: DEFAULT_LSP_REVISION.to_string(),
            },
            vlspn: RepoSource {
                url: DEFAULT_VLSPN_REPO.to_string(),
                revision: DEFAULT_VLSPN_REVISION.to_string(),
            },
            schema_generator: PackageSource {
                name: DEFAULT_SCHEMA_GENERATOR.to_string(),
                version: DEFAULT_SCHEMA_GENERATOR_VERSION.to_string(),
            },
            formatter: PackageSource {
                name: DEFAULT_FORMATTER.to_string(),
                version: DEFAULT_FORMATTER_VERSION.to_string(),
            },
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            GeneratorError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot name anything
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("spec_version", &self.spec_version),
            ("lsp.url", &self.lsp.url),
            ("lsp.revision", &self.lsp.revision),
            ("vlspn.url", &self.vlspn.url),
            ("vlspn.revision", &self.vlspn.revision),
            ("schema_generator.name", &self.schema_generator.name),
            ("schema_generator.version", &self.schema_generator.version),
            ("formatter.name", &self.formatter.name),
            ("formatter.version", &self.formatter.version),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(GeneratorError::Config(format!("`{}` must not be empty", field)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.spec_version, "3.14");
        assert_eq!(config.schema_generator.name, "ts-json-schema-generator");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = GeneratorConfig::from_yaml(
            r#"
spec_version: "3.15"
lsp:
  url: https://example.com/spec.git
  revision: main
"#,
        )
        .unwrap();

        assert_eq!(config.spec_version, "3.15");
        assert_eq!(config.lsp.revision, "main");
        assert_eq!(config.vlspn, GeneratorConfig::default().vlspn);
        assert_eq!(config.formatter.name, "prettier");
    }

    #[test]
    fn test_empty_value_rejected() {
        let result = GeneratorConfig::from_yaml("spec_version: ''\n");
        assert!(matches!(result, Err(GeneratorError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "formatter:\n  name: prettier\n  version: 2.1.0").unwrap();

        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.formatter.version, "2.1.0");
    }

    #[test]
    fn test_load_missing_file() {
        let result = GeneratorConfig::load(Path::new("/nonexistent/lsp-json-schema.yaml"));
        assert!(matches!(result, Err(GeneratorError::Config(_))));
    }
}
