//! End-to-end schema derivation

use crate::artifacts::{self, ArtifactPaths};
use crate::toolchain::Toolchain;
use lsp_json_schema_common::{
    ConventionTable, FeatureRecord, GeneratedSchema, GeneratorConfig, GeneratorError, Result,
    SpecConvention,
};
use lsp_json_schema_generator::{
    resolve_from_synthetic, validate_final, validate_synthetic_schema, MethodSchemas,
    SchemaSourceEmitter, ROOT_TYPE,
};
use lsp_json_schema_parser::{annotate, SpecParser};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Specification version the artifacts are named after
    pub version: String,
    /// First-pass annotated records
    pub records: Vec<FeatureRecord>,
    /// Final per-method schemas
    pub methods: Vec<MethodSchemas>,
    /// Number of non-method blocks skipped by the extractor
    pub dropped: usize,
    pub artifacts: ArtifactPaths,
}

/// Derives the schema for one specification version
pub struct SpecGenerator<T: Toolchain> {
    config: GeneratorConfig,
    conventions: ConventionTable,
    workdir: PathBuf,
    output: PathBuf,
    toolchain: T,
}

impl<T: Toolchain> SpecGenerator<T> {
    pub fn new(
        config: GeneratorConfig,
        workdir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        toolchain: T,
    ) -> Self {
        Self {
            config,
            conventions: ConventionTable::new(),
            workdir: workdir.into(),
            output: output.into(),
            toolchain,
        }
    }

    /// Convention for the configured version, or the newest one
    pub fn convention(&self) -> &SpecConvention {
        match self.conventions.get(&self.config.spec_version) {
            Some(convention) => convention,
            None => {
                let latest = self.conventions.latest();
                warn!(
                    "no convention for specification {}, using {}",
                    self.config.spec_version, latest.version
                );
                latest
            }
        }
    }

    /// Run every stage, stopping at the first fatal error
    pub fn generate(&self) -> Result<GenerationReport> {
        let convention = *self.convention();
        let artifacts = ArtifactPaths::new(&self.output, convention.version);

        create_dir(&self.workdir)?;
        create_dir(&self.output)?;

        info!("fetching repositories into {}", self.workdir.display());
        let lsp_dir = self.toolchain.ensure_repo(&self.workdir, &self.config.lsp)?;
        let vlspn_dir = self.toolchain.ensure_repo(&self.workdir, &self.config.vlspn)?;

        let spec_path = artifacts::spec_markdown(&lsp_dir, &convention);
        let parser = SpecParser::from_file(&spec_path, convention)?;

        info!("ensuring node tooling in {}", vlspn_dir.display());
        self.toolchain
            .ensure_package(&vlspn_dir, &self.config.schema_generator)?;
        self.toolchain
            .ensure_package(&vlspn_dir, &self.config.formatter)?;

        info!("building naive schema");
        let naive = GeneratedSchema::from_value(
            self.toolchain
                .generate_schema(&vlspn_dir, &artifacts::protocol_source(&vlspn_dir))?,
        )?;
        naive.write_to(&artifacts.naive_schema)?;
        info!(
            "{} naive definitions written to {}",
            naive.definitions().len(),
            artifacts.naive_schema.display()
        );

        let extraction = parser.parse()?;
        let mut records = extraction.records;
        annotate(&mut records, &naive)?;

        let emitted = artifacts::protocol_schema_source(&vlspn_dir);
        info!("emitting {} methods to {}", records.len(), emitted.display());
        SchemaSourceEmitter::new(convention.version)?.write_to(&emitted, &records)?;
        self.toolchain.format(&vlspn_dir, &emitted)?;

        info!("building synthetic schema");
        let synthetic = GeneratedSchema::from_value(
            self.toolchain
                .generate_rooted_schema(&vlspn_dir, &emitted, ROOT_TYPE)?,
        )?;
        synthetic.write_to(&artifacts.synthetic_schema)?;
        validate_synthetic_schema(&synthetic)?;

        let methods = resolve_from_synthetic(&records, &synthetic);
        validate_final(&methods)?;

        write_features(&artifacts.features, &methods)?;
        info!("features written to {}", artifacts.features.display());

        Ok(GenerationReport {
            version: convention.version.to_string(),
            records,
            methods,
            dropped: extraction.dropped.len(),
            artifacts,
        })
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        GeneratorError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to create {}: {}", path.display(), e),
        ))
    })
}

fn write_features(path: &Path, methods: &[MethodSchemas]) -> Result<()> {
    let rendered = serde_json::to_string_pretty(methods)?;
    fs::write(path, rendered + "\n").map_err(|e| {
        GeneratorError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to write {}: {}", path.display(), e),
        ))
    })
}
