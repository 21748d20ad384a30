//! Content-type detection from file bytes.
//!
//! The filename and the request's declared extension are never trusted — a
//! renamed `.html` must not reach the encoders. Detection reads the file's
//! magic bytes via the `infer` matcher table, which is plain data and needs
//! no process-wide initialization.
//!
//! [`MimeSniffer`] is a trait so the dispatcher can be tested with a fake
//! that returns canned types without touching the filesystem.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Input mime types the dispatcher accepts.
pub const ALLOWED_INPUT_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Whether a sniffed type is on the input allow-list.
pub fn is_allowed_input(mime: &str) -> bool {
    ALLOWED_INPUT_TYPES.contains(&mime)
}

/// Mechanism-level sniffing failure: the file could not be read at all.
///
/// "Bytes read fine but match no known signature" is not an error — that is
/// `Ok(None)` from [`MimeSniffer::type_by_file`].
#[derive(Debug, Error)]
#[error("type detection failed for '{}': {source}", path.display())]
pub struct SniffError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Detects a file's real content type from its bytes.
pub trait MimeSniffer {
    /// Returns the detected mime type, or `None` when the bytes match no
    /// known signature.
    fn type_by_file(&self, path: &Path) -> Result<Option<String>, SniffError>;
}

/// Magic-byte sniffer backed by the `infer` matcher table.
#[derive(Debug, Clone, Copy)]
pub struct ByteSniffer;

impl ByteSniffer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ByteSniffer {
    fn default() -> Self {
        Self::new()
    }
}

impl MimeSniffer for ByteSniffer {
    fn type_by_file(&self, path: &Path) -> Result<Option<String>, SniffError> {
        let kind = infer::get_from_path(path).map_err(|source| SniffError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(kind.map(|k| k.mime_type().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn detects_png_from_signature() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(&tmp, "renamed.txt", b"\x89PNG\r\n\x1a\n rest of file");

        let mime = ByteSniffer::new().type_by_file(&path).unwrap();
        assert_eq!(mime.as_deref(), Some("image/png"));
    }

    #[test]
    fn detects_gif_and_jpeg() {
        let tmp = TempDir::new().unwrap();

        let gif = write_file(&tmp, "a.gif", b"GIF89a\x01\x00\x01\x00");
        let jpeg = write_file(&tmp, "b.jpg", &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]);

        let sniffer = ByteSniffer::new();
        assert_eq!(
            sniffer.type_by_file(&gif).unwrap().as_deref(),
            Some("image/gif")
        );
        assert_eq!(
            sniffer.type_by_file(&jpeg).unwrap().as_deref(),
            Some("image/jpeg")
        );
    }

    #[test]
    fn unknown_bytes_are_none_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(&tmp, "page.html", b"<html><body>not an image</body></html>");

        let mime = ByteSniffer::new().type_by_file(&path).unwrap();
        assert_eq!(mime, None);
    }

    #[test]
    fn missing_file_is_a_mechanism_error() {
        let tmp = TempDir::new().unwrap();
        let result = ByteSniffer::new().type_by_file(&tmp.path().join("absent.png"));
        assert!(result.is_err());
    }

    #[test]
    fn allow_list_matches_exactly_the_four_input_types() {
        for mime in ["image/jpeg", "image/png", "image/webp", "image/gif"] {
            assert!(is_allowed_input(mime), "{mime} should be allowed");
        }
        for mime in ["image/tiff", "image/avif", "application/pdf", "text/html"] {
            assert!(!is_allowed_input(mime), "{mime} should be rejected");
        }
    }
}
