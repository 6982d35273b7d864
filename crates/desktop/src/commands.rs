//! Tauri commands for frontend integration.

use std::sync::{Arc, Mutex};

use kmpapp_catalog::{Dp, GridFrame, ProductGrid, ProductStore, Subscription, Viewport};
use tauri::State;

use crate::image_loader::ImageLoaderConfig;

/// Application state shared across Tauri commands.
///
/// The store is owned here for the whole process; the grid worker and the
/// commands only read it through subscriptions or the grid model.
pub struct AppState {
    pub store: Mutex<ProductStore>,
    pub grid: tokio::sync::Mutex<ProductGrid>,
    pub image_loader: ImageLoaderConfig,
}

impl AppState {
    pub fn new(store: ProductStore, viewport: Viewport, image_loader: ImageLoaderConfig) -> Self {
        Self {
            store: Mutex::new(store),
            grid: tokio::sync::Mutex::new(ProductGrid::new(viewport)),
            image_loader,
        }
    }

    /// Subscribe to the product stream.
    pub fn subscribe(&self) -> Subscription {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .subscribe()
    }
}

/// Report the webview's size; returns the re-laid-out grid.
#[tauri::command]
pub async fn resize_viewport(
    width: f32,
    height: f32,
    state: State<'_, Arc<AppState>>,
) -> Result<GridFrame, String> {
    if !width.is_finite() || !height.is_finite() {
        return Err(format!("Invalid viewport size: {width}x{height}"));
    }

    let mut grid = state.grid.lock().await;
    if grid.resize(Viewport::new(width, height)) {
        tracing::info!(
            width,
            columns = grid.layout().column_count,
            "Grid layout changed"
        );
    }
    Ok(grid.frame())
}

/// Report the scroll position of the grid container.
#[tauri::command]
pub async fn scroll_grid(
    offset: f32,
    state: State<'_, Arc<AppState>>,
) -> Result<GridFrame, String> {
    if !offset.is_finite() {
        return Err(format!("Invalid scroll offset: {offset}"));
    }

    let mut grid = state.grid.lock().await;
    grid.scroll_to(Dp(offset));
    Ok(grid.frame())
}
