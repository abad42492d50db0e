//! External collaborators of the pipeline
//!
//! Everything that leaves the process (git, npm, node) sits behind
//! [`Toolchain`], so the stages can run against a mock.

use crate::{git_fetcher, npm, process};
use lsp_json_schema_common::config::{PackageSource, RepoSource};
use lsp_json_schema_common::{GeneratorConfig, Result};
use serde_json::Value;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Directory of a reference checkout the node tools run from
pub const PROTOCOL_DIR: &str = "protocol";

#[cfg_attr(test, mockall::automock)]
pub trait Toolchain {
    /// Working copy of `source` under `workdir`, checked out at its revision
    fn ensure_repo(&self, workdir: &Path, source: &RepoSource) -> Result<PathBuf>;

    /// Make `package` a dev dependency of the npm project at `root`
    fn ensure_package(&self, root: &Path, package: &PackageSource) -> Result<()>;

    /// Schema of every type exposed by `source`
    fn generate_schema(&self, root: &Path, source: &Path) -> Result<Value>;

    /// Schema of `root_type` in `source` and everything it references
    fn generate_rooted_schema(&self, root: &Path, source: &Path, root_type: &str)
        -> Result<Value>;

    /// Reformat `file` in place
    fn format(&self, root: &Path, file: &Path) -> Result<()>;
}

/// Toolchain backed by git2 and the `npm`/`node` executables on `PATH`
#[derive(Debug, Clone)]
pub struct SystemToolchain {
    schema_generator: String,
    formatter: String,
}

impl SystemToolchain {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            schema_generator: config.schema_generator.name.clone(),
            formatter: config.formatter.name.clone(),
        }
    }

    /// `node <root>/node_modules/.bin/<tool>`
    fn node_tool(root: &Path, tool: &str) -> Command {
        let mut command = Command::new("node");
        command.arg(root.join("node_modules").join(".bin").join(tool));
        command
    }

    fn run_schema_generator<I, S>(&self, root: &Path, source: &Path, extra: I) -> Result<Value>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Self::node_tool(root, &self.schema_generator);
        command
            .arg("--path")
            .arg(source)
            .args(["--expose", "all"])
            .args(extra)
            .current_dir(root.join(PROTOCOL_DIR));

        let stdout = process::run(&mut command, &self.schema_generator)?;
        Ok(serde_json::from_slice(&stdout)?)
    }
}

impl Toolchain for SystemToolchain {
    fn ensure_repo(&self, workdir: &Path, source: &RepoSource) -> Result<PathBuf> {
        git_fetcher::ensure_repo(workdir, source)
    }

    fn ensure_package(&self, root: &Path, package: &PackageSource) -> Result<()> {
        npm::ensure_package(root, package)
    }

    fn generate_schema(&self, root: &Path, source: &Path) -> Result<Value> {
        self.run_schema_generator(root, source, std::iter::empty::<&str>())
    }

    fn generate_rooted_schema(
        &self,
        root: &Path,
        source: &Path,
        root_type: &str,
    ) -> Result<Value> {
        self.run_schema_generator(root, source, ["--type", root_type])
    }

    fn format(&self, root: &Path, file: &Path) -> Result<()> {
        let mut command = Self::node_tool(root, &self.formatter);
        command.arg("--write").arg(file).current_dir(root);
        process::run(&mut command, &self.formatter)?;
        Ok(())
    }
}
