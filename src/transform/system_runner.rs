//! Production command runner — `std::process` with captured output.

use super::runner::{CommandRunner, ToolError, ToolOutput};
use std::process::Command;

/// Runs tools via [`std::process::Command`], blocking until exit.
///
/// No timeout lives here: a caller needing bounded latency must kill the
/// child from outside. Both streams are captured, never inherited — the
/// tools' chatter only surfaces through the dispatcher's verbose log.
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput, ToolError> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| ToolError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
