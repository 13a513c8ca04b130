//! Text retrieval seam: the composer consumes raw payloads, callers own the
//! transport.

use std::fs;

use anyhow::{Context, Result};

/// Fetches raw mesh/material text for a model-specific URL.
pub trait TextSource {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Filesystem-backed source; model "URLs" are plain paths.
pub struct FileSource;

impl TextSource for FileSource {
    fn fetch(&self, url: &str) -> Result<String> {
        fs::read_to_string(url).with_context(|| format!("Failed to read {url}"))
    }
}

/// Resolve `name` against the directory of `base`, the way a relative URL
/// resolves against the document that referenced it. Absolute paths and
/// scheme-qualified names pass through untouched.
pub fn resolve_relative(base: &str, name: &str) -> String {
    if name.contains("://") || name.starts_with('/') {
        return name.to_string();
    }
    match base.rfind('/') {
        Some(at) => format!("{}/{}", &base[..at], name),
        None => name.to_string(),
    }
}
