//! Parameter types for transform requests.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between callers (the CLI, a service wrapper) and the
//! [`dispatcher`](super::dispatcher), which turns them into concrete tool
//! invocations. Keeping them plain data means a request can be logged,
//! serialized, and replayed without touching any tool.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100, default 92). Clamped on construction.
//! - [`Crop`] — Crop rectangle; all-zero width+height means "no crop".
//! - [`Transform`] — Full request: output token, target dimensions, crop, source extension.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    /// 92 — the fixed setting both tool families run at.
    fn default() -> Self {
        Self(92)
    }
}

/// Crop rectangle in source-image pixels.
///
/// An all-zero width+height means "no crop". The dispatcher only emits crop
/// arguments when both dimensions are positive; a half-specified rectangle is
/// not validated here and simply produces no crop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Crop {
    /// No crop requested at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    /// Well-formed rectangle: both dimensions positive.
    pub fn is_complete(&self) -> bool {
        self.width != 0 && self.height != 0
    }
}

/// Renders ImageMagick geometry: `WxH+X+Y`.
impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid crop geometry '{0}', expected WxH+X+Y")]
pub struct ParseCropError(String);

/// Parses ImageMagick geometry: `WxH+X+Y`, e.g. `400x300+10+20`.
impl FromStr for Crop {
    type Err = ParseCropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCropError(s.to_string());

        let (size, offsets) = s.split_once('+').ok_or_else(err)?;
        let (w, h) = size.split_once('x').ok_or_else(err)?;
        let (x, y) = offsets.split_once('+').ok_or_else(err)?;

        Ok(Crop {
            x: x.parse().map_err(|_| err())?,
            y: y.parse().map_err(|_| err())?,
            width: w.parse().map_err(|_| err())?,
            height: h.parse().map_err(|_| err())?,
        })
    }
}

/// One transform request: what to produce from a loaded source image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    /// Target format token, matched case-insensitively (jpg, jpeg, png, gif, pdf, webp).
    pub output: String,
    /// Target width in pixels; `0` means "auto" on that axis.
    pub width: u32,
    /// Target height in pixels; `0` means "auto" on that axis.
    pub height: u32,
    /// Crop rectangle, applied before resizing.
    #[serde(default)]
    pub crop: Crop,
    /// Declared source format token. Only consulted to pick the animated-source
    /// branch — the real input type is always sniffed from bytes.
    pub extension: String,
}

impl Transform {
    /// A resize was requested on at least one axis.
    pub fn wants_resize(&self) -> bool {
        self.width != 0 || self.height != 0
    }

    /// Any geometric change was requested — crop or resize, on any axis.
    pub fn wants_geometry(&self) -> bool {
        !self.crop.is_empty() || self.wants_resize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_92() {
        assert_eq!(Quality::default().value(), 92);
    }

    #[test]
    fn crop_geometry_round_trips() {
        let crop: Crop = "400x300+10+20".parse().unwrap();
        assert_eq!(
            crop,
            Crop {
                x: 10,
                y: 20,
                width: 400,
                height: 300
            }
        );
        assert_eq!(crop.to_string(), "400x300+10+20");
    }

    #[test]
    fn crop_parse_rejects_malformed_geometry() {
        for bad in ["", "400x300", "400+10+20", "400x300+10", "ax300+10+20", "400x300+10+b"] {
            assert!(bad.parse::<Crop>().is_err(), "'{bad}' should not parse");
        }
    }

    #[test]
    fn empty_and_complete_predicates() {
        assert!(Crop::default().is_empty());
        assert!(!Crop::default().is_complete());

        let half = Crop {
            width: 100,
            ..Crop::default()
        };
        assert!(!half.is_empty());
        assert!(!half.is_complete());

        let full = Crop {
            width: 100,
            height: 50,
            ..Crop::default()
        };
        assert!(full.is_complete());
    }

    #[test]
    fn wants_geometry_covers_each_axis() {
        let none = Transform::default();
        assert!(!none.wants_geometry());

        let width_only = Transform {
            width: 400,
            ..Transform::default()
        };
        assert!(width_only.wants_geometry());

        let crop_only = Transform {
            crop: Crop {
                width: 10,
                ..Crop::default()
            },
            ..Transform::default()
        };
        assert!(crop_only.wants_geometry());
        assert!(!crop_only.wants_resize());
    }
}
