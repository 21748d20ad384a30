//! Transform dispatch — pick the tool family, build the argv, run the tool.
//!
//! [`Dispatcher::process`] is the single entry point. Steps, each
//! short-circuiting on failure:
//!
//! 1. Normalize the output token and map it to a [`ToolFamily`].
//! 2. Sniff the input's real content type and check the allow-list.
//! 3. Build the invocation plan for the family.
//! 4. Run each planned invocation, in order.
//!
//! ```text
//! jpg/jpeg/png/gif/pdf ──────────────► convert
//! webp, static source ───────────────► cwebp
//! webp, animated source, no geometry ► gif2webp
//! webp, animated source, geometry ───► convert (crop/resize → gif) ► gif2webp
//! ```
//!
//! The last row is the two-pass pipeline: animated encoders cannot crop or
//! resize, so the raster converter applies the geometry into an intermediate
//! gif which is then re-encoded. A first-pass failure aborts the second.
//!
//! Dispatch is stateless per call. The verbose toggle and quality are
//! per-instance values, so concurrent dispatchers stay independent.

use super::args;
use super::params::{Quality, Transform};
use super::runner::{CommandRunner, ToolError};
use super::sniff::{self, MimeSniffer, SniffError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tool family handling a given output token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFamily {
    /// General-purpose raster converter (`convert`).
    Raster,
    /// Block-codec encoders (`cwebp` / `gif2webp`).
    BlockCodec,
}

impl ToolFamily {
    /// Map a normalized (lowercase) output token to its family.
    pub fn for_output(token: &str) -> Option<Self> {
        match token {
            "jpg" | "jpeg" | "gif" | "png" | "pdf" => Some(Self::Raster),
            "webp" => Some(Self::BlockCodec),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("output format '{0}' is not supported")]
    UnsupportedOutput(String),
    #[error("content type detection failed: {0}")]
    MimeDetection(#[from] SniffError),
    #[error("input mime type '{0}' is not supported")]
    UnsupportedInputMime(String),
    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// One tool invocation the dispatcher would run for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedInvocation {
    pub program: String,
    pub args: Vec<String>,
}

/// Dispatches one transform request to the right external tool.
pub struct Dispatcher<S, R> {
    sniffer: S,
    runner: R,
    quality: Quality,
    verbose: bool,
}

impl<S: MimeSniffer, R: CommandRunner> Dispatcher<S, R> {
    /// Dispatcher with the default quality and verbose off.
    ///
    /// The sniffer is an owned handle rather than process state so tests can
    /// substitute a fake; same for the runner.
    pub fn new(sniffer: S, runner: R) -> Self {
        Self {
            sniffer,
            runner,
            quality: Quality::default(),
            verbose: false,
        }
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// When on: each invoked command line and both captured streams are
    /// emitted to the log, and the tools get their own verbose flags.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the transform: `input` → external tool(s) → `output`.
    ///
    /// The caller owns both paths; on failure any partial artifact is left
    /// in place for the caller to clean up.
    pub fn process(
        &self,
        t: &Transform,
        input: &Path,
        output: &Path,
    ) -> Result<(), DispatchError> {
        let plan = self.plan(t, input, output)?;

        let mime = self
            .sniffer
            .type_by_file(input)?
            .unwrap_or_else(|| "application/octet-stream".to_string());
        if !sniff::is_allowed_input(&mime) {
            return Err(DispatchError::UnsupportedInputMime(mime));
        }

        for invocation in &plan {
            self.call_tool(&invocation.program, &invocation.args)?;
        }

        // Both passes landed: the intermediate gif has served its purpose.
        if plan.len() == 2 {
            let _ = std::fs::remove_file(two_pass_intermediate(output));
        }

        Ok(())
    }

    /// The invocation(s) `process` would run, without sniffing or executing
    /// anything. Deterministic: identical inputs give identical argv.
    pub fn plan(
        &self,
        t: &Transform,
        input: &Path,
        output: &Path,
    ) -> Result<Vec<PlannedInvocation>, DispatchError> {
        let token = t.output.to_ascii_lowercase();
        let family = ToolFamily::for_output(&token)
            .ok_or_else(|| DispatchError::UnsupportedOutput(t.output.clone()))?;

        let plan = match family {
            ToolFamily::Raster => vec![PlannedInvocation {
                program: "convert".to_string(),
                args: args::raster_args(t, &token, input, output, self.quality, self.verbose),
            }],
            ToolFamily::BlockCodec => self.plan_block_codec(t, input, output),
        };

        Ok(plan)
    }

    /// The webp branch routes on the *declared* source extension: a static
    /// source goes straight to `cwebp`; an animated one needing geometry
    /// takes the two-pass route through the raster converter.
    fn plan_block_codec(
        &self,
        t: &Transform,
        input: &Path,
        output: &Path,
    ) -> Vec<PlannedInvocation> {
        if t.extension != "gif" {
            return vec![PlannedInvocation {
                program: "cwebp".to_string(),
                args: args::cwebp_args(t, input, output, self.quality, self.verbose),
            }];
        }

        if t.wants_geometry() {
            let intermediate = two_pass_intermediate(output);
            return vec![
                PlannedInvocation {
                    program: "convert".to_string(),
                    args: args::raster_args(
                        t,
                        "gif",
                        input,
                        &intermediate,
                        self.quality,
                        self.verbose,
                    ),
                },
                PlannedInvocation {
                    program: "gif2webp".to_string(),
                    args: args::gif2webp_args(&intermediate, output, self.quality, self.verbose),
                },
            ];
        }

        vec![PlannedInvocation {
            program: "gif2webp".to_string(),
            args: args::gif2webp_args(input, output, self.quality, self.verbose),
        }]
    }

    fn call_tool(&self, program: &str, argv: &[String]) -> Result<(), DispatchError> {
        if self.verbose {
            log::info!("{} {}", program, argv.join(" "));
        }

        let out = self.runner.run(program, argv)?;

        if self.verbose {
            log::info!("{} stdout: {}", program, String::from_utf8_lossy(&out.stdout));
            log::info!("{} stderr: {}", program, String::from_utf8_lossy(&out.stderr));
        }

        if !out.success {
            return Err(ToolError::ExitFailure {
                program: program.to_string(),
                code: out.code,
            }
            .into());
        }

        Ok(())
    }
}

/// Sibling path for the first-pass raster output of a gif→webp conversion.
///
/// Distinct from the final output so the second pass never reads the same
/// path it is writing.
fn two_pass_intermediate(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".pass1.gif");
    output.with_file_name(name)
}
