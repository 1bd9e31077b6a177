pub mod archive;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod plugin;

pub use archive::ZipExtractor;
pub use error::{AssetError, Result};
pub use fetcher::{path_exists, AssetFetcher, CacheStore, PublishMirror};
pub use http::{HttpClient, HttpClientConfig};
pub use plugin::{
    resolve, run_hooks, BuildContext, BuildHook, Candidate, CandidateError, CapabilityRegistry,
    CapabilitySource, FallbackFactory, FileFetchFactory, Resolved, ResolvedCapabilities,
    SdkBundleConfig, SdkFetchFactory, SdkFetchOptions, DOWNLOAD_FILE, DOWNLOAD_SDK_BUNDLE,
};
