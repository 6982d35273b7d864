//! Tauri application entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(feature = "tauri")]
use std::sync::Arc;

#[cfg(feature = "tauri")]
use anyhow::Context;
#[cfg(feature = "tauri")]
use kmpapp_catalog::ProductStore;
#[cfg(feature = "tauri")]
use kmpapp_desktop::commands::*;
#[cfg(feature = "tauri")]
use kmpapp_desktop::config::AppConfig;
#[cfg(feature = "tauri")]
use kmpapp_desktop::platform::{OperatingSystem, SystemEnvironment};
#[cfg(feature = "tauri")]
use kmpapp_desktop::{ImageLoaderConfig, seed};

#[cfg(feature = "tauri")]
#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();
    kmpapp_observability::init(&config.log);

    tauri::async_runtime::set(tokio::runtime::Handle::current());

    if let Err(err) = run(config) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

#[cfg(feature = "tauri")]
fn run(config: AppConfig) -> anyhow::Result<()> {
    let os = OperatingSystem::current();
    let image_loader = ImageLoaderConfig::for_platform(os, &config.app_name, &SystemEnvironment)
        .with_context(|| format!("cannot resolve the image cache directory on {os}"))?;

    tracing::info!(
        %os,
        disk_cache_dir = %image_loader.disk_cache_dir.display(),
        disk_cache_max_bytes = image_loader.disk_cache_max_bytes,
        memory_cache_max_bytes = image_loader.memory_cache_max_bytes,
        "Image loader configured"
    );

    let products = match &config.seed_path {
        Some(path) => seed::load_products(path)
            .with_context(|| format!("failed to load product seed from {}", path.display()))?,
        None => Vec::new(),
    };
    let store = ProductStore::with_products(products).context("invalid product seed")?;

    let app_state = Arc::new(AppState::new(store, config.initial_viewport, image_loader));
    let webview_plan = app_state.image_loader.webview_plan(os);
    if !webview_plan.unapplied.is_empty() {
        tracing::warn!(
            %os,
            unapplied = ?webview_plan.unapplied,
            "Webview engine cannot apply these image cache settings"
        );
    }

    let title = config.app_name.clone();
    let shutdown = Arc::new(tokio::sync::Notify::new());
    let worker_shutdown = shutdown.clone();

    let app = tauri::Builder::default()
        .manage(app_state.clone())
        .invoke_handler(tauri::generate_handler![resize_viewport, scroll_grid])
        .setup(move |app| {
            let builder = tauri::WebviewWindowBuilder::new(app, "main", tauri::WebviewUrl::default())
                .title(&title)
                .inner_size(
                    f64::from(config.initial_viewport.width.get()),
                    f64::from(config.initial_viewport.height.get()),
                );
            let builder = match webview_plan.data_directory.clone() {
                Some(dir) => builder.data_directory(dir),
                None => builder,
            };
            #[cfg(windows)]
            let builder = match webview_plan.browser_args.as_deref() {
                Some(args) => builder.additional_browser_args(args),
                None => builder,
            };
            builder.build()?;

            let worker = kmpapp_desktop::grid_worker::GridWorker::new(
                app.handle().clone(),
                app_state.clone(),
                worker_shutdown.clone(),
            );
            let _worker_handle = worker.start();

            Ok(())
        })
        .build(tauri::generate_context!())
        .context("error while building tauri application")?;

    app.run(move |_app, event| {
        if let tauri::RunEvent::Exit = event {
            tracing::info!("Application exiting");
            shutdown.notify_one();
        }
    });
    Ok(())
}

#[cfg(not(feature = "tauri"))]
fn main() {
    eprintln!("This binary requires the 'tauri' feature to be enabled.");
    eprintln!("Build with: cargo build --features tauri");
    std::process::exit(1);
}
