//! HTTP cache validators
//!
//! `ETag` and `Last-Modified` are derived from file metadata, so a file is
//! never hashed just to answer a conditional request.

use std::fs::Metadata;
use std::time::{SystemTime, UNIX_EPOCH};

/// Validators for one file version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validators {
    pub etag: String,
    pub last_modified: SystemTime,
}

impl Validators {
    pub fn new(len: u64, last_modified: SystemTime) -> Self {
        let secs = unix_secs(last_modified);
        Self {
            etag: format!("\"{len:x}-{secs:x}\""),
            last_modified,
        }
    }

    /// Platforms without mtime fall back to the epoch; the length still varies the tag.
    pub fn from_metadata(meta: &Metadata) -> Self {
        Self::new(meta.len(), meta.modified().unwrap_or(UNIX_EPOCH))
    }

    pub fn last_modified_header(&self) -> String {
        httpdate::fmt_http_date(self.last_modified)
    }

    /// Whether the client's cached copy is still current.
    ///
    /// `If-None-Match` wins when present; `If-Modified-Since` is only
    /// consulted without it, at one-second resolution.
    pub fn is_not_modified(
        &self,
        if_none_match: Option<&str>,
        if_modified_since: Option<&str>,
    ) -> bool {
        if if_none_match.is_some() {
            return check_etag_match(if_none_match, &self.etag);
        }
        if_modified_since
            .and_then(|v| httpdate::parse_http_date(v).ok())
            .is_some_and(|since| unix_secs(self.last_modified) <= unix_secs(since))
    }
}

/// Check a client `If-None-Match` list (or `*`) against `etag`
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client| {
        client.split(',').map(str::trim).any(|e| {
            e == "*" || e == etag || e.strip_prefix("W/").is_some_and(|weak| weak == etag)
        })
    })
}

fn unix_secs(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs())
}
