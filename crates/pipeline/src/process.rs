//! Blocking subprocess invocation

use lsp_json_schema_common::{GeneratorError, Result};
use std::io;
use std::process::Command;
use tracing::debug;

/// Run a command to completion and return its stdout
///
/// A non-zero exit becomes [`GeneratorError::ExternalTool`] carrying the
/// captured stderr followed by stdout.
pub fn run(command: &mut Command, tool: &str) -> Result<Vec<u8>> {
    debug!("running {:?}", command);

    let output = command.output().map_err(|e| {
        GeneratorError::Io(io::Error::new(
            e.kind(),
            format!("Failed to run {}: {}", tool, e),
        ))
    })?;

    if output.status.success() {
        return Ok(output.stdout);
    }

    let mut captured = String::from_utf8_lossy(&output.stderr).into_owned();
    captured.push_str(&String::from_utf8_lossy(&output.stdout));

    Err(GeneratorError::ExternalTool {
        tool: tool.to_string(),
        status: output.status,
        output: captured.trim_end().to_string(),
    })
}
