//! Build capability resolution and the host-facing hook surface.
//!
//! The host resolves a small fixed set of named capabilities at startup
//! (download a file, download an SDK bundle) through an ordered candidate
//! list. Unresolvable capabilities degrade to the synthetic fallback
//! implementations in [`fallback`], never to a hard failure. Resolved
//! capabilities produce [`BuildHook`]s the host invokes once its own
//! configuration is finalized.

mod fallback;
mod registry;
mod resolver;

pub use fallback::{FallbackFactory, SdkBundleConfig, SdkFetchOptions};
pub use registry::{
    CapabilityRegistry, FileFetchFactory, ResolvedCapabilities, SdkFetchFactory, DOWNLOAD_FILE,
    DOWNLOAD_SDK_BUNDLE,
};
pub use resolver::{resolve, Candidate, CandidateError, CapabilitySource, Resolved};

use std::path::PathBuf;

use async_trait::async_trait;

use crate::Result;

/// Directories supplied by the build host once its configuration is final.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub root: PathBuf,
    pub cache_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl BuildContext {
    /// Derive the conventional cache and public directories from a project root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            cache_dir: root.join(".cache"),
            public_dir: root.join("public"),
            root,
        }
    }

    pub fn with_dirs(
        root: impl Into<PathBuf>,
        cache_dir: impl Into<PathBuf>,
        public_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            cache_dir: cache_dir.into(),
            public_dir: public_dir.into(),
        }
    }
}

/// A build-time plugin hook.
///
/// `config_resolved` runs once the host's configuration is finalized, so the
/// hook can read the cache and public directories.
#[async_trait]
pub trait BuildHook: Send + Sync {
    fn name(&self) -> &str;

    async fn config_resolved(&self, ctx: &BuildContext) -> Result<()>;
}

/// Drive a hook list the way a host's setup phase iterates its plugins.
///
/// Hooks run sequentially; the first failure aborts the remainder.
pub async fn run_hooks(hooks: &[Box<dyn BuildHook>], ctx: &BuildContext) -> Result<()> {
    for hook in hooks {
        log::debug!("running build hook {}", hook.name());
        hook.config_resolved(ctx).await?;
    }
    Ok(())
}
