//! Well-known capability identifiers and startup resolution.
//!
//! The host registers any primary providers it has (an embedding application
//! may supply its own download implementations), then resolves both
//! capabilities before assembling the rest of its configuration. The
//! fallback factory is the implicit terminal candidate.

use super::fallback::{FallbackFactory, SdkFetchOptions};
use super::resolver::{resolve, Candidate, Resolved};
use super::BuildHook;

pub const DOWNLOAD_FILE: &str = "download-file";
pub const DOWNLOAD_SDK_BUNDLE: &str = "download-sdk-bundle";

/// Factory callable for the single-file capability:
/// `(source_url, filename, destination_subpath)`.
pub type FileFetchFactory = Box<dyn Fn(&str, &str, &str) -> Box<dyn BuildHook> + Send + Sync>;

/// Factory callable for the SDK-bundle capability.
pub type SdkFetchFactory = Box<dyn Fn(SdkFetchOptions) -> Box<dyn BuildHook> + Send + Sync>;

/// Ordered candidate lists for the two well-known capabilities.
#[derive(Default)]
pub struct CapabilityRegistry {
    file_candidates: Vec<Candidate<FileFetchFactory>>,
    sdk_candidates: Vec<Candidate<SdkFetchFactory>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_file_provider(&mut self, candidate: Candidate<FileFetchFactory>) {
        self.file_candidates.push(candidate);
    }

    pub fn register_sdk_provider(&mut self, candidate: Candidate<SdkFetchFactory>) {
        self.sdk_candidates.push(candidate);
    }

    /// Resolve both capabilities, degrading to the fallback factory.
    ///
    /// Never fails: every capability resolves to a usable callable.
    pub fn resolve_all(self, factory: &FallbackFactory) -> ResolvedCapabilities {
        let file_fallback = factory.clone();
        let download_file = resolve(DOWNLOAD_FILE, self.file_candidates, move || {
            Box::new(move |url: &str, filename: &str, destination: &str| {
                file_fallback.download_file(url, filename, destination)
            }) as FileFetchFactory
        });

        let sdk_fallback = factory.clone();
        let download_sdk = resolve(DOWNLOAD_SDK_BUNDLE, self.sdk_candidates, move || {
            Box::new(move |options: SdkFetchOptions| sdk_fallback.download_sdk(options))
                as SdkFetchFactory
        });

        ResolvedCapabilities {
            download_file,
            download_sdk,
        }
    }
}

/// The two capabilities, resolved once at startup and held for the process
/// lifetime.
pub struct ResolvedCapabilities {
    pub download_file: Resolved<FileFetchFactory>,
    pub download_sdk: Resolved<SdkFetchFactory>,
}
