//! lsp-json-schema CLI
//!
//! Command-line interface for deriving the Language Server Protocol JSON
//! Schema from its markdown specification.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use lsp_json_schema_common::{ConventionTable, GeneratedSchema, GeneratorConfig};
use lsp_json_schema_parser::{annotate, SpecParser};
use lsp_json_schema_pipeline::{SpecGenerator, SystemToolchain};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lsp-json-schema")]
#[command(version, about = "Derive a JSON Schema for the Language Server Protocol", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML configuration file, overridden by command-line flags
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the LSP markdown and reference types and derive the schema
    #[command(after_help = "EXAMPLES:\n  \
        # Derive the 3.14 schema with the default repositories\n  \
        lsp-json-schema lsp --workdir ./work --output ./output\n\n  \
        # Use a fork of the reference implementation\n  \
        lsp-json-schema lsp \\\n    \
        --vlspn-repo https://github.com/example/vscode-languageserver-node \\\n    \
        --vlspn-committish my-branch")]
    Lsp {
        /// Directory the repositories are checked out into
        #[arg(short, long, default_value = "./work")]
        workdir: PathBuf,

        /// Output directory for the generated schemas
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Extract the methods of a local specification file
    #[command(after_help = "EXAMPLES:\n  \
        # List the methods of a checked-out specification\n  \
        lsp-json-schema parse --spec work/language-server-protocol/_specifications/specification-3-14.md\n\n  \
        # Also run the first resolution pass against a naive schema\n  \
        lsp-json-schema parse --spec specification-3-14.md --naive output/lsp.3.14.naive.schema.json")]
    Parse {
        /// Path to the markdown specification
        #[arg(short, long)]
        spec: PathBuf,

        /// Naive schema to resolve params and results against
        #[arg(long)]
        naive: Option<PathBuf>,

        /// Specification version, selects the slicing convention
        #[arg(long)]
        lsp_spec_version: Option<String>,
    },
}

/// Overrides of the configured repositories and version
#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Specification version (e.g. 3.14)
    #[arg(long)]
    lsp_spec_version: Option<String>,

    /// Repository holding the markdown specification
    #[arg(long)]
    lsp_repo: Option<String>,

    /// Branch, tag or commit of the LSP repository
    #[arg(long)]
    lsp_committish: Option<String>,

    /// Repository holding the reference type definitions
    #[arg(long)]
    vlspn_repo: Option<String>,

    /// Branch, tag or commit of the reference repository
    #[arg(long)]
    vlspn_committish: Option<String>,
}

impl SourceArgs {
    fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(version) = &self.lsp_spec_version {
            config.spec_version = version.clone();
        }
        if let Some(url) = &self.lsp_repo {
            config.lsp.url = url.clone();
        }
        if let Some(revision) = &self.lsp_committish {
            config.lsp.revision = revision.clone();
        }
        if let Some(url) = &self.vlspn_repo {
            config.vlspn.url = url.clone();
        }
        if let Some(revision) = &self.vlspn_committish {
            config.vlspn.revision = revision.clone();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Lsp {
            workdir,
            output,
            sources,
        } => {
            lsp_command(config, &sources, &workdir, &output, cli.verbose)?;
        }
        Commands::Parse {
            spec,
            naive,
            lsp_spec_version,
        } => {
            let version = lsp_spec_version.unwrap_or(config.spec_version);
            parse_command(&spec, naive.as_deref(), &version, cli.verbose)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

fn lsp_command(
    mut config: GeneratorConfig,
    sources: &SourceArgs,
    workdir: &Path,
    output: &Path,
    verbose: bool,
) -> Result<()> {
    sources.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    println!(
        "{} Deriving LSP {} schema",
        "→".cyan(),
        config.spec_version.yellow()
    );
    if verbose {
        println!("  Specification: {} @ {}", config.lsp.url, config.lsp.revision);
        println!("  Reference: {} @ {}", config.vlspn.url, config.vlspn.revision);
        println!("  Workdir: {}", workdir.display());
        println!("  Output: {}", output.display());
    }

    let toolchain = SystemToolchain::new(&config);
    let generator = SpecGenerator::new(config, workdir, output, toolchain);
    let report = generator.generate().context("Failed to derive the schema")?;

    if report.dropped > 0 {
        println!(
            "{} Skipped {} non-method sections",
            "⚠".yellow(),
            report.dropped
        );
    }

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("  Methods: {}", report.methods.len());
    println!("\n{}", "Generated files:".bold());
    println!("  {}", report.artifacts.naive_schema.display());
    println!("  {}", report.artifacts.synthetic_schema.display());
    println!("  {}", report.artifacts.features.display());

    Ok(())
}

fn parse_command(spec: &Path, naive: Option<&Path>, version: &str, verbose: bool) -> Result<()> {
    println!("{} Parsing specification: {}", "→".cyan(), spec.display());

    let conventions = ConventionTable::new();
    if conventions.get(version).is_none() {
        println!(
            "{} No convention for {}, using {}",
            "⚠".yellow(),
            version,
            conventions.latest().version
        );
    }
    let convention = *conventions.resolve(version);

    let parser = SpecParser::from_file(spec, convention).context("Failed to load specification")?;
    let extraction = parser.parse().context("Failed to parse specification")?;
    let mut records = extraction.records;

    if let Some(naive) = naive {
        let content = fs::read_to_string(naive)
            .with_context(|| format!("Failed to read {}", naive.display()))?;
        let schema = GeneratedSchema::from_json(&content).context("Failed to load naive schema")?;
        annotate(&mut records, &schema).context("Failed to resolve methods")?;
        println!("{} Resolved params and results", "✓".green());
    }

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("  Convention: {}", convention.version.yellow());
    println!("  Methods: {}", records.len());
    println!("  Skipped sections: {}", extraction.dropped.len());

    if verbose {
        println!("\n{}", "Methods:".bold());
        for record in &records {
            println!("  {} {} ({})", record.kind, record.method.cyan(), record.title);
            if let Some(params) = &record.raw_params {
                println!("    params: {}", params);
            }
            if let Some(result) = &record.raw_result {
                println!("    result: {}", result);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsp_defaults() {
        let cli = Cli::try_parse_from(["lsp-json-schema", "lsp"]).unwrap();
        match cli.command {
            Commands::Lsp {
                workdir,
                output,
                sources,
            } => {
                assert_eq!(workdir, PathBuf::from("./work"));
                assert_eq!(output, PathBuf::from("./output"));
                assert!(sources.lsp_spec_version.is_none());
            }
            _ => panic!("expected lsp command"),
        }
    }

    #[test]
    fn test_source_overrides() {
        let cli = Cli::try_parse_from([
            "lsp-json-schema",
            "lsp",
            "--lsp-spec-version",
            "3.15",
            "--vlspn-committish",
            "main",
        ])
        .unwrap();
        let Commands::Lsp { sources, .. } = cli.command else {
            panic!("expected lsp command");
        };

        let mut config = GeneratorConfig::default();
        sources.apply(&mut config);
        assert_eq!(config.spec_version, "3.15");
        assert_eq!(config.vlspn.revision, "main");
        assert_eq!(config.lsp, GeneratorConfig::default().lsp);
    }

    #[test]
    fn test_parse_requires_spec() {
        assert!(Cli::try_parse_from(["lsp-json-schema", "parse"]).is_err());

        let cli = Cli::try_parse_from([
            "lsp-json-schema",
            "--verbose",
            "parse",
            "--spec",
            "specification-3-14.md",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Parse { naive: None, .. }));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(load_config(Some(Path::new("does/not/exist.yaml"))).is_err());
        assert_eq!(load_config(None).unwrap(), GeneratorConfig::default());
    }
}
