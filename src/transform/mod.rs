//! Transform dispatch — request descriptors in, external tool runs out.
//!
//! | Concern | Module |
//! |---|---|
//! | Request descriptors (`Transform`, `Crop`, `Quality`) | `params` |
//! | Pure argv construction per tool grammar | `args` |
//! | Content-type sniffing + input allow-list | [`sniff`] |
//! | Subprocess seam (trait, errors, recording fake) | [`runner`] |
//! | Production runner on `std::process` | [`system_runner`] |
//! | Family selection, two-pass pipeline, execution | [`dispatcher`] |
//!
//! The module is split the same way the work splits: *describing* a
//! transform is pure data, *planning* it is pure computation, and only
//! *running* it touches the system. Tests exercise the first two without
//! ever spawning a process.

mod args;
pub mod dispatcher;
mod params;
pub mod runner;
pub mod sniff;
pub mod system_runner;

pub use dispatcher::{DispatchError, Dispatcher, PlannedInvocation, ToolFamily};
pub use params::{Crop, ParseCropError, Quality, Transform};
pub use runner::{CommandRunner, ToolError, ToolOutput};
pub use sniff::{ByteSniffer, MimeSniffer, SniffError};
pub use system_runner::SystemRunner;
