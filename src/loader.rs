//! Asset acquisition — one local working file from a URL or a path.
//!
//! [`AssetLoader::load`] normalizes "fetch from HTTP(S)" and "copy a local
//! file" into the same contract: bytes land at a caller-supplied destination
//! path, the byte count comes back, and failures carry a cause the caller
//! can route on:
//!
//! | Cause | Error |
//! |---|---|
//! | Destination cannot be created/written | [`LoadError::DestinationInvalid`] |
//! | Origin answered non-2xx (not 404), or transport broke | [`LoadError::Backend`] |
//! | Origin answered 404, or local source missing/unreadable | [`LoadError::NotFound`] |
//!
//! The backend/not-found split matters downstream: "the origin is broken"
//! and "the file truly does not exist" get different treatment (retry
//! policy, cache headers, user messaging) — none of which lives here. One
//! attempt per call, no retries, no timeout; bounded latency comes from the
//! injected client.
//!
//! Whether a source is remote is decided by URL parse (absolute http/https),
//! never by a flag — `dir/file.png` parses as no scheme and is a path.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The destination path could not be created or written.
    #[error("destination '{}' cannot be written: {source}", path.display())]
    DestinationInvalid {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The origin answered with a non-2xx status other than 404, or the
    /// transfer broke underneath us.
    #[error("backend failure for '{source_id}': {detail}")]
    Backend { source_id: String, detail: String },
    /// Remote 404, or a local source path that does not exist or cannot be
    /// opened.
    #[error("resource not found: '{0}'")]
    NotFound(String),
}

/// Resolves source identifiers into bytes on disk.
pub struct AssetLoader {
    client: reqwest::blocking::Client,
}

impl AssetLoader {
    /// Loader with a stock client. Callers wanting timeouts or proxies build
    /// their own client and use [`AssetLoader::with_client`].
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    /// Resolve `source` into bytes at `dest` (created or truncated).
    /// Returns the number of bytes written.
    pub fn load(&self, source: &str, dest: &Path) -> Result<u64, LoadError> {
        match parse_http_url(source) {
            Some(url) => self.fetch(url, source, dest),
            None => copy_local(source, dest),
        }
    }

    fn fetch(&self, url: reqwest::Url, source: &str, dest: &Path) -> Result<u64, LoadError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| backend(source, e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LoadError::NotFound(source.to_string()));
        }
        if !status.is_success() {
            return Err(backend(source, format!("HTTP {status}")));
        }

        let mut file = create_dest(dest)?;
        response
            .copy_to(&mut file)
            .map_err(|e| backend(source, format!("transfer broke: {e}")))
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Absolute http/https URL, or nothing — anything else is a local path.
fn parse_http_url(source: &str) -> Option<reqwest::Url> {
    let url = reqwest::Url::parse(source).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

fn copy_local(source: &str, dest: &Path) -> Result<u64, LoadError> {
    let mut reader =
        File::open(source).map_err(|_| LoadError::NotFound(source.to_string()))?;
    let mut file = create_dest(dest)?;

    // Once both ends are open, a failure mid-copy is the write side's.
    io::copy(&mut reader, &mut file).map_err(|e| LoadError::DestinationInvalid {
        path: dest.to_path_buf(),
        source: e,
    })
}

fn create_dest(dest: &Path) -> Result<File, LoadError> {
    File::create(dest).map_err(|e| LoadError::DestinationInvalid {
        path: dest.to_path_buf(),
        source: e,
    })
}

fn backend(source: &str, detail: String) -> LoadError {
    LoadError::Backend {
        source_id: source.to_string(),
        detail,
    }
}
