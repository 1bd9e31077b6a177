//! Publish mirror: copy cached assets into a public directory.

use std::path::Path;

use crate::Result;

use super::path_exists;

/// Copies cached assets into their public location, only when absent.
pub struct PublishMirror;

impl PublishMirror {
    /// Ensure `public_path` holds a copy of `cache_path`.
    ///
    /// If the public path already exists nothing happens, even if the cached
    /// bytes have since changed. Returns `true` if a copy was performed.
    pub async fn ensure_published(cache_path: &Path, public_path: &Path) -> Result<bool> {
        if path_exists(public_path).await? {
            return Ok(false);
        }

        if let Some(parent) = public_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::copy(cache_path, public_path).await?;

        Ok(true)
    }
}
