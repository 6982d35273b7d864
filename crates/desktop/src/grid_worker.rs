//! Background worker forwarding store snapshots to the grid.

use std::sync::Arc;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use kmpapp_catalog::{ProductSnapshot, Subscription};
use tauri::async_runtime::JoinHandle;
use tauri::{AppHandle, Emitter};

use crate::GRID_UPDATED_EVENT;
use crate::commands::AppState;

/// How often the blocking bridge checks whether the worker is gone.
const BRIDGE_POLL: Duration = Duration::from_millis(250);

/// Applies every product snapshot to the grid model and pushes the new frame
/// to the webview as a `grid-updated` event.
pub struct GridWorker {
    app_handle: AppHandle,
    state: Arc<AppState>,
    subscription: Subscription,
    shutdown: Arc<tokio::sync::Notify>,
}

impl GridWorker {
    /// The worker stops once `shutdown` is notified.
    pub fn new(
        app_handle: AppHandle,
        state: Arc<AppState>,
        shutdown: Arc<tokio::sync::Notify>,
    ) -> Self {
        let subscription = state.subscribe();
        Self {
            app_handle,
            state,
            subscription,
            shutdown,
        }
    }

    /// Start the worker.
    ///
    /// The store subscription is blocking, so a blocking task drains it
    /// (conflating bursts to the newest snapshot) and hands snapshots to the
    /// async loop, which owns the grid lock and the event emission.
    pub fn start(self) -> JoinHandle<()> {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Arc<ProductSnapshot>>();
        let subscription = self.subscription;

        tauri::async_runtime::spawn_blocking(move || {
            loop {
                match subscription.recv_timeout(BRIDGE_POLL) {
                    Ok(snapshot) => {
                        let snapshot = subscription.latest().unwrap_or(snapshot);
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        if tx.is_closed() {
                            break;
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::debug!("Product subscription bridge stopped");
        });

        let shutdown = self.shutdown;
        let app_handle = self.app_handle;
        let state = self.state;

        tauri::async_runtime::spawn(async move {
            tracing::info!("Grid worker started");

            loop {
                tokio::select! {
                    _ = shutdown.notified() => {
                        tracing::info!("Grid worker received shutdown signal");
                        break;
                    }
                    next = rx.recv() => {
                        let Some(snapshot) = next else {
                            tracing::info!("Product stream closed");
                            break;
                        };
                        Self::render(&app_handle, &state, &snapshot).await;
                    }
                }
            }

            tracing::info!("Grid worker stopped");
        })
    }

    async fn render(app_handle: &AppHandle, state: &Arc<AppState>, snapshot: &ProductSnapshot) {
        let frame = {
            let mut grid = state.grid.lock().await;
            let diff = grid.apply_snapshot(snapshot);
            if diff.is_empty() {
                tracing::debug!(version = snapshot.version, "Snapshot did not change the grid");
            } else {
                tracing::info!(
                    version = snapshot.version,
                    inserted = diff.inserted,
                    removed = diff.removed,
                    moved = diff.moved,
                    updated = diff.updated,
                    "Grid updated"
                );
            }
            grid.frame()
        };

        if let Err(e) = app_handle.emit(GRID_UPDATED_EVENT, &frame) {
            tracing::warn!("Failed to emit {} event: {}", GRID_UPDATED_EVENT, e);
        }
    }
}
