//! Pure argument construction for the external tools.
//!
//! All functions here are pure and deterministic: the same transform and
//! paths produce a byte-identical argv every time. No I/O, no execution —
//! that lives in the [`dispatcher`](super::dispatcher).
//!
//! ## Argument grammars
//!
//! | Tool | Grammar |
//! |---|---|
//! | `convert` | `[-verbose] -quality <q> <input> -strip [-crop WxH+X+Y +repage] [-resize [W]x[H]] <format>:<output>` |
//! | `cwebp` | `-q <q> [-crop X Y W H] [-resize W H] [-v] <input> -o <output>` |
//! | `gif2webp` | `-q <q> [-v] <input> -o <output>` |
//!
//! Notes on the quirks each grammar encodes:
//!
//! - `convert` takes one-sided resizes as `400x` / `x300`; `cwebp` wants both
//!   axes as integers with literal `0` meaning "auto".
//! - `convert` output carries an explicit `format:` prefix so the codec never
//!   depends on the destination's file extension.
//! - `+repage` resets the page geometry after a crop, otherwise the canvas
//!   offset survives into the output.

use super::params::{Quality, Transform};
use std::path::Path;

/// Argv for the raster converter (`convert`).
///
/// `format` must already be normalized to lowercase — it becomes the output
/// codec prefix.
pub fn raster_args(
    t: &Transform,
    format: &str,
    input: &Path,
    output: &Path,
    quality: Quality,
    verbose: bool,
) -> Vec<String> {
    let mut args = Vec::new();

    if verbose {
        args.push("-verbose".to_string());
    }

    args.push("-quality".to_string());
    args.push(quality.value().to_string());
    args.push(path_arg(input));
    args.push("-strip".to_string());

    if t.crop.is_complete() {
        args.push("-crop".to_string());
        args.push(t.crop.to_string());
        args.push("+repage".to_string());
    }

    if t.wants_resize() {
        args.push("-resize".to_string());
        args.push(resize_geometry(t.width, t.height));
    }

    args.push(format!("{}:{}", format, output.display()));
    args
}

/// One-sided ImageMagick resize geometry: `400x`, `x300`, or `400x300`.
fn resize_geometry(width: u32, height: u32) -> String {
    let mut geometry = String::new();
    if width > 0 {
        geometry.push_str(&width.to_string());
    }
    geometry.push('x');
    if height > 0 {
        geometry.push_str(&height.to_string());
    }
    geometry
}

/// Argv for the static-image block encoder (`cwebp`).
pub fn cwebp_args(
    t: &Transform,
    input: &Path,
    output: &Path,
    quality: Quality,
    verbose: bool,
) -> Vec<String> {
    let mut args = vec!["-q".to_string(), quality.value().to_string()];

    if t.crop.is_complete() {
        args.push("-crop".to_string());
        args.push(t.crop.x.to_string());
        args.push(t.crop.y.to_string());
        args.push(t.crop.width.to_string());
        args.push(t.crop.height.to_string());
    }

    if t.wants_resize() {
        // A zero axis is passed through literally; cwebp reads it as "auto".
        args.push("-resize".to_string());
        args.push(t.width.to_string());
        args.push(t.height.to_string());
    }

    if verbose {
        args.push("-v".to_string());
    }

    args.push(path_arg(input));
    args.push("-o".to_string());
    args.push(path_arg(output));
    args
}

/// Argv for the animated block encoder (`gif2webp`).
///
/// No crop/resize here — the encoder cannot do geometry, which is why the
/// dispatcher routes animated sources through the raster converter first.
pub fn gif2webp_args(input: &Path, output: &Path, quality: Quality, verbose: bool) -> Vec<String> {
    let mut args = vec!["-q".to_string(), quality.value().to_string()];

    if verbose {
        args.push("-v".to_string());
    }

    args.push(path_arg(input));
    args.push("-o".to_string());
    args.push(path_arg(output));
    args
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}
