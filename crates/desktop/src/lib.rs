//! `kmpapp-desktop`
//!
//! **Responsibility:** desktop shell of the catalog browser.
//!
//! This crate provides:
//! - Platform detection and cache directory resolution
//! - Image loader configuration derived from it, and its per-platform
//!   webview settings
//! - Inline styles of the grid page
//! - Static product seed loading
//! - Tauri commands + background grid worker (`tauri` feature)
//! - The Leptos front-end (wasm32 builds)
//!
//! The view-model itself lives in `kmpapp-catalog`; this crate is a **thin
//! shell** around it.

/// Event carrying a fresh `GridFrame` from the backend to the webview.
pub const GRID_UPDATED_EVENT: &str = "grid-updated";

pub mod image_loader;
pub mod platform;
pub mod styles;
pub mod thumbnail;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod seed;

#[cfg(all(feature = "tauri", not(target_arch = "wasm32")))]
pub mod commands;
#[cfg(all(feature = "tauri", not(target_arch = "wasm32")))]
pub mod grid_worker;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use image_loader::{ImageLoaderConfig, WebviewCachePlan};
pub use platform::{OperatingSystem, PlatformError};
