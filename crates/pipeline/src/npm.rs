//! npm dev-dependency pinning

use crate::process;
use lsp_json_schema_common::config::PackageSource;
use lsp_json_schema_common::{GeneratorError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Version spec of a dev dependency as recorded in a `package.json`
pub fn dev_dependency<'a>(manifest: &'a Value, package: &str) -> Option<&'a str> {
    manifest.get("devDependencies")?.get(package)?.as_str()
}

/// Whether the manifest at `root` lacks the pinned package
pub fn needs_install(root: &Path, package: &PackageSource) -> Result<bool> {
    let path = root.join("package.json");
    let content = fs::read_to_string(&path).map_err(|e| {
        GeneratorError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {}: {}", path.display(), e),
        ))
    })?;
    let manifest: Value = serde_json::from_str(&content)?;

    Ok(match dev_dependency(&manifest, &package.name) {
        Some(spec) => !spec.contains(package.version.as_str()),
        None => true,
    })
}

/// Make sure `root` has the package installed as a dev dependency
///
/// Installs `<name>@<version>` and then the rest of the tree when the
/// manifest does not already pin that version.
pub fn ensure_package(root: &Path, package: &PackageSource) -> Result<()> {
    if !needs_install(root, package)? {
        debug!("{}@{} already pinned", package.name, package.version);
        return Ok(());
    }

    info!(
        "installing {}@{} in {}",
        package.name,
        package.version,
        root.display()
    );

    let pinned = format!("{}@{}", package.name, package.version);
    process::run(
        Command::new("npm")
            .args(["install", "--save-dev", pinned.as_str()])
            .current_dir(root),
        "npm install --save-dev",
    )?;
    process::run(
        Command::new("npm").arg("install").current_dir(root),
        "npm install",
    )?;

    Ok(())
}
