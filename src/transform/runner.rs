//! Subprocess execution seam.
//!
//! The [`CommandRunner`] trait is the single substitutable boundary between
//! the dispatcher and real processes: run a program with an argument list,
//! capture both streams, report the exit outcome. The production
//! implementation is [`SystemRunner`](super::system_runner::SystemRunner);
//! tests inject the `RecordingRunner` from `runner::tests`, which records
//! argument lists instead of spawning anything.

use std::io;
use thiserror::Error;

/// External tool failure.
///
/// Diagnostic output is not carried here — captured stderr goes to the
/// verbose log sink only, and is never parsed.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool could not be started at all (typically: not installed).
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The tool ran and reported failure.
    #[error("'{program}' exited with {}", .code.map_or("a signal".to_string(), |c| format!("status {c}")))]
    ExitFailure { program: String, code: Option<i32> },
}

/// Captured result of one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Runs one external command to completion, capturing its streams.
///
/// Implementations block until the tool exits; there is no cancellation or
/// timeout primitive at this seam.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput, ToolError>;
}
