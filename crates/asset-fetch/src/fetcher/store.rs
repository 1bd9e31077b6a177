//! Cache-or-fetch store for remote assets.

use std::path::Path;
use std::sync::Arc;

use crate::Result;

use super::{path_exists, AssetFetcher};

/// Ensures remote assets are present in a local cache, fetching on miss.
///
/// The cache is the durable result: once a path exists it is never refetched
/// or overwritten. The full body is buffered in memory before anything lands
/// on disk, so a partially written asset is never discoverable at the cache
/// path.
pub struct CacheStore {
    fetcher: Arc<dyn AssetFetcher>,
}

impl CacheStore {
    pub fn new(fetcher: Arc<dyn AssetFetcher>) -> Self {
        Self { fetcher }
    }

    /// Ensure the asset at `url` is present at `cache_path`.
    ///
    /// Returns `true` if a network fetch was performed, `false` on cache hit.
    pub async fn ensure_cached(&self, url: &str, cache_path: &Path) -> Result<bool> {
        if path_exists(cache_path).await? {
            return Ok(false);
        }

        log::info!("downloading {}", url);
        let bytes = self.fetcher.fetch(url).await?;

        if let Some(parent) = cache_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(cache_path, &bytes).await?;

        Ok(true)
    }

    /// Fetch the asset at `url` into memory without touching the cache.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        log::info!("downloading {}", url);
        self.fetcher.fetch(url).await
    }
}
