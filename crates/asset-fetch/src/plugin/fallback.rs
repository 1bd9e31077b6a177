//! Synthetic fallback implementations of the download capabilities.
//!
//! Used when no registered candidate satisfies a capability. The single-file
//! hook fetches a remote asset into the cache and mirrors it into the public
//! directory; the SDK-bundle hook fetches a ZIP bundle, extracts it under the
//! cache's assets subdirectory, and mirrors the bundle's marker file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::archive::ZipExtractor;
use crate::fetcher::{path_exists, AssetFetcher, CacheStore, PublishMirror};
use crate::Result;

use super::{BuildContext, BuildHook};

/// Layout and default source of the SDK bundle.
///
/// Constructor configuration rather than module constants, so tests can
/// inject deterministic URLs and layouts.
#[derive(Debug, Clone)]
pub struct SdkBundleConfig {
    /// Source URL used when an invocation does not supply one.
    pub default_url: String,
    /// Top-level directory the archive extracts to.
    pub bundle_dir: String,
    /// File inside the bundle whose presence marks a complete extraction.
    pub marker_file: String,
    /// Subdirectory under the cache/public roots holding extracted bundles.
    pub assets_subdir: String,
}

impl Default for SdkBundleConfig {
    fn default() -> Self {
        Self {
            default_url: "https://cubism.live2d.com/sdk-web/bin/CubismSdkForWeb-5-r.3.zip"
                .to_string(),
            bundle_dir: "CubismSdkForWeb-5-r.3".to_string(),
            marker_file: "Core/live2dcubismcore.min.js".to_string(),
            assets_subdir: "assets/js".to_string(),
        }
    }
}

/// Options accepted by the SDK-bundle capability.
#[derive(Debug, Clone, Default)]
pub struct SdkFetchOptions {
    pub source: Option<String>,
}

/// Builds the synthetic capabilities from the fetch/cache/extract primitives.
#[derive(Clone)]
pub struct FallbackFactory {
    fetcher: Arc<dyn AssetFetcher>,
    sdk: SdkBundleConfig,
}

impl FallbackFactory {
    pub fn new(fetcher: Arc<dyn AssetFetcher>) -> Self {
        Self::with_sdk_config(fetcher, SdkBundleConfig::default())
    }

    pub fn with_sdk_config(fetcher: Arc<dyn AssetFetcher>, sdk: SdkBundleConfig) -> Self {
        Self { fetcher, sdk }
    }

    /// Single-file fetch-and-place capability.
    pub fn download_file(&self, url: &str, filename: &str, destination: &str) -> Box<dyn BuildHook> {
        Box::new(FileFetchHook {
            name: format!("fallback-download:{}", filename),
            url: url.to_string(),
            filename: filename.to_string(),
            destination: destination.to_string(),
            fetcher: self.fetcher.clone(),
        })
    }

    /// SDK-bundle fetch-and-extract capability.
    pub fn download_sdk(&self, options: SdkFetchOptions) -> Box<dyn BuildHook> {
        Box::new(SdkFetchHook {
            source: options.source,
            sdk: self.sdk.clone(),
            fetcher: self.fetcher.clone(),
        })
    }

    /// A hook that is valid to invoke but performs no work.
    pub fn noop_hook(identifier: &str) -> Box<dyn BuildHook> {
        Box::new(NoopHook {
            name: format!("noop:{}", identifier),
        })
    }
}

struct FileFetchHook {
    name: String,
    url: String,
    filename: String,
    destination: String,
    fetcher: Arc<dyn AssetFetcher>,
}

#[async_trait]
impl BuildHook for FileFetchHook {
    fn name(&self) -> &str {
        &self.name
    }

    async fn config_resolved(&self, ctx: &BuildContext) -> Result<()> {
        let cache_path = ctx.cache_dir.join(&self.destination).join(&self.filename);
        let public_path = ctx.public_dir.join(&self.destination).join(&self.filename);

        let store = CacheStore::new(self.fetcher.clone());
        store.ensure_cached(&self.url, &cache_path).await?;
        PublishMirror::ensure_published(&cache_path, &public_path).await?;

        Ok(())
    }
}

struct SdkFetchHook {
    source: Option<String>,
    sdk: SdkBundleConfig,
    fetcher: Arc<dyn AssetFetcher>,
}

impl SdkFetchHook {
    fn marker_under(&self, root: &Path) -> PathBuf {
        root.join(&self.sdk.assets_subdir)
            .join(&self.sdk.bundle_dir)
            .join(&self.sdk.marker_file)
    }
}

#[async_trait]
impl BuildHook for SdkFetchHook {
    fn name(&self) -> &str {
        "fallback-download-sdk"
    }

    async fn config_resolved(&self, ctx: &BuildContext) -> Result<()> {
        let source = self.source.as_deref().unwrap_or(&self.sdk.default_url);
        let cache_marker = self.marker_under(&ctx.cache_dir);
        let public_marker = self.marker_under(&ctx.public_dir);

        if !path_exists(&cache_marker).await? {
            let store = CacheStore::new(self.fetcher.clone());
            let buffer = store.fetch_bytes(source).await?;
            ZipExtractor::extract(buffer, &ctx.cache_dir.join(&self.sdk.assets_subdir)).await?;
        }

        PublishMirror::ensure_published(&cache_marker, &public_marker).await?;

        Ok(())
    }
}

struct NoopHook {
    name: String,
}

#[async_trait]
impl BuildHook for NoopHook {
    fn name(&self) -> &str {
        &self.name
    }

    async fn config_resolved(&self, _ctx: &BuildContext) -> Result<()> {
        Ok(())
    }
}
