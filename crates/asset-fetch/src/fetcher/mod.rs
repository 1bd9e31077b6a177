//! Idempotent asset acquisition primitives.
//!
//! `CacheStore` ensures a remote asset is present in a local cache
//! (fetch-once-cache-forever), `PublishMirror` copies cached assets into a
//! public directory only when absent. Both are append-only: existing files
//! are never overwritten.

mod mirror;
mod store;

pub use mirror::PublishMirror;
pub use store::CacheStore;

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;

use crate::Result;

/// Network seam for fetching remote assets into memory.
///
/// Implemented by [`crate::http::HttpClient`]; tests inject counting fakes.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Check whether a path exists.
///
/// Only "not found" maps to `false`; permission or disk errors propagate so
/// they are never mistaken for a cache miss.
pub async fn path_exists(path: &Path) -> Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}
