//! # pixrelay
//!
//! An image-transform dispatcher: fetch a source image (HTTP URL or local
//! path), decide which external processing tool matches the requested
//! output, build that tool's argument list, and run it.
//!
//! # Architecture: Two Independent Components
//!
//! ```text
//! caller ──► AssetLoader ──► working file ──► Dispatcher ──► external tool ──► output file
//!            (URL / path                      (sniff, pick
//!             → local bytes)                   family, argv, run)
//! ```
//!
//! The components never call each other — a caller (the CLI's `run`
//! command, or a service embedding this crate) composes them and owns the
//! working file in between. This separation exists for three reasons:
//!
//! - **Independent failure routing**: "could not get the bytes" and "could
//!   not transform the bytes" are different operational problems; each side
//!   has its own typed error enum.
//! - **Testability**: loader tests need a canned HTTP server and a temp
//!   directory; dispatcher tests need neither — they inject a fake sniffer
//!   and a recording runner and assert on argument lists.
//! - **Reuse**: a cache layer slots between the two without touching either.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`loader`] | Resolves a source identifier into bytes at a destination path, with cause-classified errors |
//! | [`transform`] | Descriptor types, tool-family selection, argv construction, subprocess execution |
//!
//! # Design Decisions
//!
//! ## External Tools, Not In-Process Codecs
//!
//! All pixel work is delegated to installed tools — the general-purpose
//! raster converter (`convert`) and the webp encoders (`cwebp`,
//! `gif2webp`). This crate only decides *which* tool and *which arguments*.
//! The trade is deliberate: the reference encoders handle every edge of
//! their formats (animated webp in particular has no complete pure-Rust
//! encode path), and process isolation means a codec crash cannot take the
//! host down. The cost is a system dependency, reported cleanly at runtime
//! as a spawn error naming the missing tool.
//!
//! ## Bytes Decide, Names Don't
//!
//! The input's content type is always sniffed from its magic bytes, never
//! inferred from a filename or the request's declared extension. A renamed
//! `.html` stops at the allow-list instead of reaching an encoder. The one
//! place the declared extension *is* consulted is routing inside the webp
//! family — animated sources take a different encoder — and even there the
//! sniff has already vouched that the file is an image.
//!
//! ## Seams Over Globals
//!
//! The natural shape of this problem tempts three globals: a process-wide
//! mime database, a package-level verbose flag, and direct `exec` calls.
//! All three are explicit values here: the sniffer and the command runner
//! are constructor-injected traits, and verbose/quality ride on the
//! dispatcher instance. Two dispatchers in one process cannot observe each
//! other.

pub mod loader;
pub mod transform;
