//! Catalog grid page.
//!
//! The backend owns layout and virtualization; this side only positions the
//! cells of the latest [`GridFrame`] and reports size and scroll changes back.
//! Frames arrive from command replies and pushed updates in any order; a
//! [`FrameCursor`] drops the stale ones and decides when the scroll container
//! has to follow the backend.

use kmpapp_catalog::{FrameAction, FrameCursor, GridFrame, HeaderCell, TextBlock};
use kmpapp_core::ProductId;
use leptos::*;

use crate::frontend::api;
use crate::styles;
use crate::thumbnail::ThumbnailState;

fn log_error(context: &str, error: String) {
    web_sys::console::error_1(&format!("{context}: {error}").into());
}

fn window_size() -> Option<(f32, f32)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width as f32, height as f32))
}

#[component]
pub fn App() -> impl IntoView {
    let (frame, set_frame) = create_signal::<Option<GridFrame>>(None);
    let cursor = store_value(FrameCursor::default());
    let scroller = create_node_ref::<html::Div>();

    let apply_frame = move |next: GridFrame| {
        let mut action = FrameAction::Stale;
        cursor.update_value(|c| action = c.accept(&next));
        match action {
            FrameAction::Stale => {}
            FrameAction::Render => set_frame.set(Some(next)),
            FrameAction::RenderAndScroll(offset) => {
                set_frame.set(Some(next));
                if let Some(el) = scroller.get_untracked() {
                    el.set_scroll_top(offset.get() as i32);
                }
            }
        }
    };

    let report_viewport = move || {
        let Some((width, height)) = window_size() else {
            return;
        };
        spawn_local(async move {
            match api::resize_viewport(width, height).await {
                Ok(next) => apply_frame(next),
                Err(e) => log_error("resize_viewport", e),
            }
        });
    };

    if let Err(e) = api::listen_grid_updated(apply_frame) {
        log_error("listen", e);
    }
    report_viewport();
    let _ = window_event_listener(ev::resize, move |_| report_viewport());

    let on_scroll = move |ev: ev::Event| {
        let offset = event_target::<web_sys::Element>(&ev).scroll_top() as f32;
        spawn_local(async move {
            match api::scroll_grid(offset).await {
                Ok(next) => apply_frame(next),
                Err(e) => log_error("scroll_grid", e),
            }
        });
    };

    let header = create_memo(move |_| frame.with(|f| f.as_ref().map(|f| f.header.clone())));
    let content_style = move || frame.with(|f| styles::content_style(f.as_ref()));

    let visible_ids = move || {
        frame.with(|f| {
            f.as_ref()
                .map(|f| f.cells.iter().map(|c| c.key.clone()).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };

    view! {
        <div
            class="catalog"
            node_ref=scroller
            style=styles::SCROLLER_STYLE
            on:scroll=on_scroll
        >
            <div class="catalog-content" style=content_style>
                {move || header.get().map(|header| view! { <SearchHeader header=header/> })}
                <For
                    each=visible_ids
                    key=|id| id.clone()
                    children=move |id| view! { <Card id=id frame=frame/> }
                />
            </div>
        </div>
    }
}

#[component]
fn SearchHeader(header: HeaderCell) -> impl IntoView {
    let style = styles::header_style(&header);
    view! {
        <div class="search-header" style=style>
            <span class="material-icons">{header.search.leading_icon}</span>
            <input
                type="search"
                readonly=true
                tabindex="-1"
                style="flex:1"
                placeholder=header.search.placeholder
                prop:value=header.search.query
            />
        </div>
    }
}

/// One product card, found in the current frame by its id.
#[component]
fn Card(id: ProductId, frame: ReadSignal<Option<GridFrame>>) -> impl IntoView {
    let cell = create_memo(move |_| {
        frame.with(|f| f.as_ref().and_then(|f| f.cells.iter().find(|c| c.key == id).cloned()))
    });
    let thumbnail_state = create_rw_signal(ThumbnailState::default());

    move || {
        cell.get().map(|cell| {
            let card_style = styles::card_style(&cell);
            let thumb = cell.thumbnail;
            let uri = thumb.uri.clone();
            let image_failed = move || thumbnail_state.with(|state| state.shows_placeholder(&uri));
            let placeholder_style = styles::thumbnail_placeholder_style(&thumb);
            let image_style = styles::thumbnail_style(&thumb);

            view! {
                <div class="card" data-index=cell.index style=card_style>
                    <div class="card-surface" style=styles::card_surface_style()>
                        <Show
                            when=move || !image_failed()
                            fallback=move || view! { <div class="thumbnail-placeholder" style=placeholder_style.clone()></div> }
                        >
                            {
                                let uri = thumb.uri.clone();
                                view! {
                                    <img
                                        src=thumb.uri.clone()
                                        alt=thumb.description.clone()
                                        loading="lazy"
                                        style=image_style.clone()
                                        on:error=move |_| thumbnail_state.update(|state| state.mark_failed(&uri))
                                    />
                                }
                            }
                        </Show>
                        <div style=styles::card_text_style()>
                            <TextLines block=cell.title class="title"/>
                            <div style=styles::text_spacer_style()></div>
                            <TextLines block=cell.price class="price"/>
                        </div>
                    </div>
                </div>
            }
        })
    }
}

#[component]
fn TextLines(block: TextBlock, class: &'static str) -> impl IntoView {
    let style = styles::text_block_style(&block);
    view! {
        <div class=class style=style>
            {block
                .lines
                .into_iter()
                .map(|line| view! { <div style=styles::TEXT_LINE_STYLE>{line}</div> })
                .collect_view()}
        </div>
    }
}
