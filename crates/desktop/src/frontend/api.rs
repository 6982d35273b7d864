//! Bindings to the backend through `window.__TAURI__`.

use kmpapp_catalog::GridFrame;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::window;

use crate::GRID_UPDATED_EVENT;

fn tauri_namespace(name: &str) -> Result<JsValue, String> {
    let window = window().ok_or_else(|| "No window object".to_string())?;
    let tauri_obj = js_sys::Reflect::get(&window, &JsValue::from_str("__TAURI__"))
        .map_err(|e| format!("Failed to get __TAURI__: {:?}", e))?;
    js_sys::Reflect::get(&tauri_obj, &JsValue::from_str(name))
        .map_err(|e| format!("Failed to get {name}: {:?}", e))
}

/// Invoke a backend command; `args` is passed as the command's argument object.
async fn invoke_tauri<A, T>(cmd: &str, args: &A) -> Result<T, String>
where
    A: Serialize,
    T: serde::de::DeserializeOwned,
{
    let core = tauri_namespace("core")?;
    let invoke_fn = js_sys::Reflect::get(&core, &JsValue::from_str("invoke"))
        .map_err(|e| format!("Failed to get invoke: {:?}", e))?;

    let args = serde_wasm_bindgen::to_value(args)
        .map_err(|e| format!("Failed to serialize args: {:?}", e))?;

    let promise = js_sys::Function::from(invoke_fn)
        .call2(&core, &JsValue::from_str(cmd), &args)
        .map_err(|e| format!("Failed to call invoke: {:?}", e))?;

    let result = JsFuture::from(js_sys::Promise::from(promise))
        .await
        .map_err(|e| format!("Invoke failed: {:?}", e))?;

    serde_wasm_bindgen::from_value(result)
        .map_err(|e| format!("Failed to deserialize result: {:?}", e))
}

#[derive(Serialize)]
struct ResizeArgs {
    width: f32,
    height: f32,
}

#[derive(Serialize)]
struct ScrollArgs {
    offset: f32,
}

/// Report the viewport size and get the re-laid-out grid.
pub async fn resize_viewport(width: f32, height: f32) -> Result<GridFrame, String> {
    invoke_tauri("resize_viewport", &ResizeArgs { width, height }).await
}

/// Report the scroll offset of the grid container.
pub async fn scroll_grid(offset: f32) -> Result<GridFrame, String> {
    invoke_tauri("scroll_grid", &ScrollArgs { offset }).await
}

#[derive(Deserialize)]
struct EventEnvelope<T> {
    payload: T,
}

/// Call `on_frame` with every frame the backend pushes after a catalog change.
///
/// The listener lives for the rest of the page.
pub fn listen_grid_updated(on_frame: impl Fn(GridFrame) + 'static) -> Result<(), String> {
    let event = tauri_namespace("event")?;
    let listen_fn = js_sys::Reflect::get(&event, &JsValue::from_str("listen"))
        .map_err(|e| format!("Failed to get listen: {:?}", e))?;

    let handler = Closure::<dyn FnMut(JsValue)>::new(move |raw: JsValue| {
        match serde_wasm_bindgen::from_value::<EventEnvelope<GridFrame>>(raw) {
            Ok(envelope) => on_frame(envelope.payload),
            Err(e) => web_sys::console::error_1(&format!("Bad grid frame: {:?}", e).into()),
        }
    });

    js_sys::Function::from(listen_fn)
        .call2(&event, &JsValue::from_str(GRID_UPDATED_EVENT), handler.as_ref())
        .map_err(|e| format!("Failed to call listen: {:?}", e))?;
    handler.forget();
    Ok(())
}
