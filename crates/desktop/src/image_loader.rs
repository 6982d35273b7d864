//! Image loader configuration.
//!
//! The loader itself (fetching, decoding, caching, eviction) belongs to the
//! webview. This module fixes the cache budgets and the on-disk location, and
//! translates them into the knobs each platform's webview engine exposes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::platform::{self, Environment, OperatingSystem, PlatformError};

pub const MEMORY_CACHE_MAX_BYTES: u64 = 32 * 1024 * 1024;
pub const DISK_CACHE_MAX_BYTES: u64 = 512 * 1024 * 1024;
/// Subdirectory of the platform cache directory holding cached images.
pub const IMAGE_CACHE_DIR: &str = "image_cache";

/// Arguments WebView2 is started with when none are given. Passing our own
/// replaces them, so they are repeated.
pub const WEBVIEW2_DEFAULT_ARGS: &str =
    "--disable-features=msWebOOUI,msPdfOOUI,msSmartScreenProtection";

/// Setting names, as reported when an engine cannot honor them.
pub const MEMORY_BUDGET: &str = "memory_cache_max_bytes";
pub const DISK_BUDGET: &str = "disk_cache_max_bytes";
pub const DISK_DIRECTORY: &str = "disk_cache_dir";

/// How one platform's webview applies an [`ImageLoaderConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebviewCachePlan {
    /// Webview profile directory; the HTTP cache lives inside it.
    pub data_directory: Option<PathBuf>,
    /// Extra engine arguments (WebView2 only).
    pub browser_args: Option<String>,
    /// Settings this engine offers no way to apply.
    pub unapplied: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLoaderConfig {
    pub memory_cache_max_bytes: u64,
    pub disk_cache_dir: PathBuf,
    pub disk_cache_max_bytes: u64,
}

impl ImageLoaderConfig {
    /// Build the configuration for `application_name` on `os`.
    ///
    /// Fails when the platform cache directory cannot be resolved; callers
    /// treat that as fatal.
    pub fn for_platform(
        os: OperatingSystem,
        application_name: &str,
        env: &impl Environment,
    ) -> Result<Self, PlatformError> {
        let cache_dir = platform::resolve(os, application_name, env)?;
        Ok(Self {
            memory_cache_max_bytes: MEMORY_CACHE_MAX_BYTES,
            disk_cache_dir: cache_dir.join(IMAGE_CACHE_DIR),
            disk_cache_max_bytes: DISK_CACHE_MAX_BYTES,
        })
    }

    /// Webview settings for `os`.
    ///
    /// - Windows (WebView2): profile directory plus `--disk-cache-size`; the
    ///   in-memory cache is sized by the engine.
    /// - Linux (WebKitGTK): profile directory only.
    /// - macOS (WKWebView): always uses the system data store.
    pub fn webview_plan(&self, os: OperatingSystem) -> WebviewCachePlan {
        match os {
            OperatingSystem::Windows => WebviewCachePlan {
                data_directory: Some(self.disk_cache_dir.clone()),
                browser_args: Some(format!(
                    "{WEBVIEW2_DEFAULT_ARGS} --disk-cache-size={}",
                    self.disk_cache_max_bytes
                )),
                unapplied: vec![MEMORY_BUDGET],
            },
            OperatingSystem::Linux => WebviewCachePlan {
                data_directory: Some(self.disk_cache_dir.clone()),
                browser_args: None,
                unapplied: vec![MEMORY_BUDGET, DISK_BUDGET],
            },
            OperatingSystem::MacOs | OperatingSystem::Unknown => WebviewCachePlan {
                data_directory: None,
                browser_args: None,
                unapplied: vec![MEMORY_BUDGET, DISK_BUDGET, DISK_DIRECTORY],
            },
        }
    }
}
