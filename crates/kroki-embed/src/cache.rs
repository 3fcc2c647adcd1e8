//! Content-addressed cache file naming.
//!
//! Cached diagram files are named by the SHA-256 hex digest of the final
//! (post-insertion) diagram source plus the output format extension. The
//! format is carried by the extension rather than mixed into the hash, so
//! one file exists per distinct (content, format) pair.

use sha2::{Digest, Sha256};

use crate::config::OutputFormat;

/// SHA-256 hex digest of the final diagram source.
#[must_use]
pub fn content_hash(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hex::encode(hasher.finalize())
}

/// Cache file name for a (content, format) pair: `<sha256-hex>.<format>`.
#[must_use]
pub fn cache_file_name(source: &str, format: OutputFormat) -> String {
    format!("{}.{}", content_hash(source), format.as_str())
}
