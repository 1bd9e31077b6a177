/// Integration tests for the full acquisition pipeline.
///
/// These drive the subsystem the way a build host does: resolve the two
/// download capabilities at startup, build the plugin hook list, then invoke
/// every hook once the configuration directories are known.

use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use asset_fetch::{
    run_hooks, AssetFetcher, BuildContext, BuildHook, CapabilityRegistry, CapabilitySource,
    FallbackFactory, Result, SdkBundleConfig, SdkFetchOptions,
};

/// Serves one ZIP bundle and one flat file body, counting every fetch.
struct FixtureFetcher {
    bundle_url: String,
    bundle: Vec<u8>,
    file_body: Vec<u8>,
    calls: AtomicUsize,
}

#[async_trait]
impl AssetFetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url == self.bundle_url {
            Ok(self.bundle.clone())
        } else {
            Ok(self.file_body.clone())
        }
    }
}

fn sdk_config() -> SdkBundleConfig {
    SdkBundleConfig {
        default_url: "https://sdk.test/TestSdk-2.1.zip".to_string(),
        bundle_dir: "TestSdk-2.1".to_string(),
        marker_file: "Core/runtime.min.js".to_string(),
        assets_subdir: "assets/js".to_string(),
    }
}

fn sdk_bundle_zip(sdk: &SdkBundleConfig) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer
        .add_directory(format!("{}/", sdk.bundle_dir), options)
        .unwrap();
    writer
        .add_directory(format!("{}/Core/", sdk.bundle_dir), options)
        .unwrap();
    writer
        .start_file(format!("{}/{}", sdk.bundle_dir, sdk.marker_file), options)
        .unwrap();
    writer.write_all(b"runtime code").unwrap();
    writer
        .start_file(format!("{}/Core/runtime.d.ts", sdk.bundle_dir), options)
        .unwrap();
    writer.write_all(b"declarations").unwrap();

    writer.finish().unwrap().into_inner()
}

fn fixture(sdk: &SdkBundleConfig) -> Arc<FixtureFetcher> {
    Arc::new(FixtureFetcher {
        bundle_url: sdk.default_url.clone(),
        bundle: sdk_bundle_zip(sdk),
        file_body: b"avatar model bytes".to_vec(),
        calls: AtomicUsize::new(0),
    })
}

#[tokio::test]
async fn test_full_pipeline_with_fallback_capabilities() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = BuildContext::new(temp_dir.path());
    let sdk = sdk_config();
    let fetcher = fixture(&sdk);
    let factory = FallbackFactory::with_sdk_config(fetcher.clone(), sdk);

    // No primary providers registered: both capabilities fall back.
    let resolved = CapabilityRegistry::new().resolve_all(&factory);
    assert_eq!(resolved.download_file.source, CapabilitySource::Fallback);
    assert_eq!(resolved.download_sdk.source, CapabilitySource::Fallback);

    let hooks: Vec<Box<dyn BuildHook>> = vec![
        (resolved.download_sdk.value)(SdkFetchOptions::default()),
        (resolved.download_file.value)(
            "https://dist.test/models/hiyori.zip",
            "hiyori.zip",
            "assets/live2d/models",
        ),
        (resolved.download_file.value)(
            "https://dist.test/vrm/sample.vrm",
            "sample.vrm",
            "assets/vrm/models",
        ),
    ];

    run_hooks(&hooks, &ctx).await.unwrap();

    // Cache layout
    let cache = &ctx.cache_dir;
    assert!(cache.join("assets/js/TestSdk-2.1/Core/runtime.min.js").is_file());
    assert!(cache.join("assets/js/TestSdk-2.1/Core/runtime.d.ts").is_file());
    assert!(cache.join("assets/live2d/models/hiyori.zip").is_file());
    assert!(cache.join("assets/vrm/models/sample.vrm").is_file());

    // Public mirror
    let public = &ctx.public_dir;
    assert!(public.join("assets/js/TestSdk-2.1/Core/runtime.min.js").is_file());
    assert_eq!(
        std::fs::read(public.join("assets/live2d/models/hiyori.zip")).unwrap(),
        b"avatar model bytes"
    );

    // One fetch per asset: the bundle and the two files.
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_second_run_is_pure_existence_checks() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = BuildContext::new(temp_dir.path());
    let sdk = sdk_config();
    let fetcher = fixture(&sdk);
    let factory = FallbackFactory::with_sdk_config(fetcher.clone(), sdk);

    let resolved = CapabilityRegistry::new().resolve_all(&factory);
    let hooks: Vec<Box<dyn BuildHook>> = vec![
        (resolved.download_sdk.value)(SdkFetchOptions::default()),
        (resolved.download_file.value)("https://dist.test/a.bin", "a.bin", "m"),
    ];

    run_hooks(&hooks, &ctx).await.unwrap();
    let first_run_calls = fetcher.calls.load(Ordering::SeqCst);
    assert_eq!(first_run_calls, 2);

    // Rebuild: everything is cached and mirrored, so no network traffic.
    run_hooks(&hooks, &ctx).await.unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), first_run_calls);
}

#[tokio::test]
async fn test_public_survives_cache_removal() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = BuildContext::new(temp_dir.path());
    let sdk = sdk_config();
    let fetcher = fixture(&sdk);
    let factory = FallbackFactory::with_sdk_config(fetcher.clone(), sdk);

    let resolved = CapabilityRegistry::new().resolve_all(&factory);
    let hook = (resolved.download_file.value)("https://dist.test/a.bin", "a.bin", "m");
    hook.config_resolved(&ctx).await.unwrap();

    // Dropping the cache refetches; the already-published copy is untouched.
    std::fs::remove_dir_all(&ctx.cache_dir).unwrap();
    hook.config_resolved(&ctx).await.unwrap();

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        std::fs::read(ctx.public_dir.join("m/a.bin")).unwrap(),
        b"avatar model bytes"
    );
}
