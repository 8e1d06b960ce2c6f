//! Notification message for resolved caches.
//!
//! When every requested filter of an asset has been resolved, callers
//! may want to announce the resulting locations to interested parties
//! (cache warmers, CDN invalidation). Only the wire shape lives here;
//! the transport is the caller's concern.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Message published after cache locations for an asset were resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheResolved {
    path: String,
    uris: BTreeMap<String, String>,
}

impl CacheResolved {
    /// Creates a message for `path` with its per-filter URIs.
    pub fn new(path: impl Into<String>, uris: BTreeMap<String, String>) -> Self {
        Self {
            path: path.into(),
            uris,
        }
    }

    /// The source asset path the caches were resolved for.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Resolved URI per filter name.
    pub fn uris(&self) -> &BTreeMap<String, String> {
        &self.uris
    }
}
