//! Product grid view-model.
//!
//! Keeps the product sequence received from the store in an array with an
//! `id → index` map, applies the responsive layout policy, tracks the scroll
//! position and materializes only the cards that intersect the viewport (plus
//! one row of overscan on each side).
//!
//! Row 0 is the search header, spanning all columns. It is never part of the
//! keyed product cells and never diffed.
//!
//! Geometry is expressed in [`Dp`]; the front-end positions cells exactly as
//! described by the [`GridFrame`] it receives.

use std::collections::HashMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use kmpapp_core::{Entity, ProductId};

use crate::layout::{self, Dp, LayoutDecision};
use crate::product::Product;
use crate::store::ProductSnapshot;
use crate::text::{DEFAULT_MAX_LINES, TextBlock};

pub const CONTENT_PADDING: Dp = Dp(16.0);
pub const HEADER_HEIGHT: Dp = Dp(72.0);
pub const CARD_PADDING: Dp = Dp(8.0);
pub const CARD_CORNER_RADIUS: Dp = Dp(15.0);
pub const THUMBNAIL_HEIGHT: Dp = Dp(130.0);
pub const THUMBNAIL_PADDING: Dp = Dp(8.0);
pub const TEXT_HORIZONTAL_PADDING: Dp = Dp(16.0);
pub const TEXT_LINE_HEIGHT: Dp = Dp(20.0);
/// Gap between the title block and the price block.
pub const TEXT_SPACER: Dp = Dp(16.0);
/// Average glyph advance used to turn a text width into a column budget.
pub const GLYPH_WIDTH: Dp = Dp(8.0);
pub const OVERSCAN_ROWS: usize = 1;

pub const SEARCH_PLACEHOLDER: &str = "Search products";

/// Height of one row of cards. Uniform because text blocks reserve two lines.
pub fn row_height() -> Dp {
    let text_block = TEXT_LINE_HEIGHT.get() * DEFAULT_MAX_LINES as f32;
    Dp(CARD_PADDING.get() * 2.0 + THUMBNAIL_HEIGHT.get() + text_block * 2.0 + TEXT_SPACER.get())
}

fn products_top() -> f32 {
    CONTENT_PADDING.get() + HEADER_HEIGHT.get()
}

/// Host viewport size.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: Dp,
    pub height: Dp,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: Dp(width.max(0.0)),
            height: Dp(height.max(0.0)),
        }
    }
}

/// The search input shown in the header. Accepts no input and runs no query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBar {
    pub query: String,
    pub active: bool,
    pub placeholder: String,
    pub leading_icon: String,
}

impl SearchBar {
    pub fn inert() -> Self {
        Self {
            query: String::new(),
            active: false,
            placeholder: SEARCH_PLACEHOLDER.to_string(),
            leading_icon: "search".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderCell {
    pub row: usize,
    pub span: usize,
    pub top: Dp,
    pub left: Dp,
    pub width: Dp,
    pub height: Dp,
    pub search: SearchBar,
}

/// Image request handed to the image loader. Failures are rendered as a
/// placeholder by the loader itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub uri: String,
    pub height: Dp,
    pub padding: Dp,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardCell {
    /// Render key; equal to the product id.
    pub key: ProductId,
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub top: Dp,
    pub left: Dp,
    pub width: Dp,
    pub height: Dp,
    pub thumbnail: Thumbnail,
    pub title: TextBlock,
    pub price: TextBlock,
}

/// Everything the front-end needs to paint the grid once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridFrame {
    /// Bumped on every change to the grid; orders frames from any source.
    pub revision: u64,
    /// Revision at which the grid last moved the scroll offset on its own
    /// (anchoring or clamping) rather than following a scroll request.
    pub scroll_revision: u64,
    pub snapshot_version: u64,
    pub layout: LayoutDecision,
    pub viewport: Viewport,
    pub content_width: Dp,
    pub content_height: Dp,
    pub scroll_offset: Dp,
    pub total_products: usize,
    pub header: HeaderCell,
    pub cells: Vec<CardCell>,
}

impl GridFrame {
    pub fn keys(&self) -> Vec<&ProductId> {
        self.cells.iter().map(|c| &c.key).collect()
    }
}

/// Outcome of applying a new snapshot, counted by product id.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDiff {
    pub inserted: usize,
    pub removed: usize,
    /// Ids present before and after, at a different index.
    pub moved: usize,
    /// Ids present before and after whose displayed content changed.
    pub updated: usize,
    pub retained: usize,
}

impl GridDiff {
    pub fn is_empty(&self) -> bool {
        self.inserted == 0 && self.removed == 0 && self.moved == 0 && self.updated == 0
    }
}

/// What the front-end should do with an incoming [`GridFrame`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FrameAction {
    /// Older than a frame already shown; drop it.
    Stale,
    Render,
    /// Render and move the scroll container to the given offset.
    RenderAndScroll(Dp),
}

/// Front-end bookkeeping for frames arriving from command replies and
/// pushed updates in any order.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FrameCursor {
    revision: Option<u64>,
    scroll_revision: u64,
}

impl FrameCursor {
    pub fn accept(&mut self, frame: &GridFrame) -> FrameAction {
        if self.revision.is_some_and(|r| frame.revision <= r) {
            return FrameAction::Stale;
        }
        self.revision = Some(frame.revision);
        if frame.scroll_revision > self.scroll_revision {
            self.scroll_revision = frame.scroll_revision;
            FrameAction::RenderAndScroll(frame.scroll_offset)
        } else {
            FrameAction::Render
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ScrollAnchor {
    id: ProductId,
    /// Offset into the anchor's row.
    delta: f32,
}

/// Keyed, virtualized product grid.
#[derive(Debug, Clone)]
pub struct ProductGrid {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
    snapshot_version: Option<u64>,
    viewport: Viewport,
    layout: LayoutDecision,
    scroll_offset: f32,
    anchor: Option<ScrollAnchor>,
    overscan_rows: usize,
    revision: u64,
    scroll_revision: u64,
}

impl ProductGrid {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            products: Vec::new(),
            index: HashMap::new(),
            snapshot_version: None,
            viewport,
            layout: layout::decide(viewport.width),
            scroll_offset: 0.0,
            anchor: None,
            overscan_rows: OVERSCAN_ROWS,
            revision: 0,
            scroll_revision: 0,
        }
    }

    #[must_use]
    pub fn with_overscan(mut self, rows: usize) -> Self {
        self.overscan_rows = rows;
        self
    }

    pub fn layout(&self) -> LayoutDecision {
        self.layout
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn scroll_offset(&self) -> Dp {
        Dp(self.scroll_offset)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn index_of(&self, id: &ProductId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Replace the product sequence with `snapshot`.
    ///
    /// Snapshots older than the one already applied are ignored.
    pub fn apply_snapshot(&mut self, snapshot: &ProductSnapshot) -> GridDiff {
        if self.snapshot_version.is_some_and(|v| snapshot.version <= v) {
            tracing::debug!(
                version = snapshot.version,
                applied = ?self.snapshot_version,
                "ignoring stale product snapshot"
            );
            return GridDiff::default();
        }

        let mut diff = GridDiff::default();
        let mut next_index = HashMap::with_capacity(snapshot.products.len());
        for (i, product) in snapshot.products.iter().enumerate() {
            next_index.insert(product.id().clone(), i);
            match self.index.get(product.id()) {
                Some(&old) => {
                    diff.retained += 1;
                    if old != i {
                        diff.moved += 1;
                    }
                    if self.products[old] != *product {
                        diff.updated += 1;
                    }
                }
                None => diff.inserted += 1,
            }
        }
        diff.removed = self.products.len() - diff.retained;

        self.revision += 1;
        self.products = snapshot.products.clone();
        self.index = next_index;
        self.snapshot_version = Some(snapshot.version);
        self.restore_anchor();

        tracing::debug!(version = snapshot.version, ?diff, "applied product snapshot");
        diff
    }

    /// Report a new viewport size. Returns `true` when the column count changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        let previous = self.layout;
        self.revision += 1;
        self.viewport = viewport;
        self.layout = layout::decide(viewport.width);
        self.restore_anchor();

        let flipped = previous.column_count != self.layout.column_count;
        if flipped {
            tracing::debug!(
                width = %viewport.width,
                from = previous.column_count,
                to = self.layout.column_count,
                "grid column count changed"
            );
        }
        flipped
    }

    /// Follow a scroll request. Non-finite offsets are ignored.
    pub fn scroll_to(&mut self, offset: Dp) {
        let requested = offset.get();
        if !requested.is_finite() {
            tracing::debug!(offset = requested, "ignoring non-finite scroll offset");
            return;
        }
        self.revision += 1;
        self.scroll_offset = requested.clamp(0.0, self.max_scroll_offset());
        if self.scroll_offset != requested {
            self.scroll_revision = self.revision;
        }
        self.anchor = self.compute_anchor();
    }

    pub fn scroll_by(&mut self, delta: Dp) {
        self.scroll_to(Dp(self.scroll_offset + delta.get()));
    }

    /// Scroll so that `id` is in the first visible row. Returns `false` when
    /// the product is not in the grid.
    pub fn scroll_to_product(&mut self, id: &ProductId) -> bool {
        match self.index_of(id) {
            Some(i) => {
                self.scroll_to(Dp(self.row_top(i / self.columns())));
                self.scroll_revision = self.revision;
                true
            }
            None => false,
        }
    }

    pub fn row_count(&self) -> usize {
        self.products.len().div_ceil(self.columns())
    }

    pub fn content_height(&self) -> Dp {
        Dp(products_top() + self.row_count() as f32 * row_height().get() + CONTENT_PADDING.get())
    }

    /// Product indices that are materialized for the current scroll position.
    pub fn visible_range(&self) -> Range<usize> {
        if self.products.is_empty() {
            return 0..0;
        }
        let cols = self.columns();
        let row_h = row_height().get();
        let top = self.scroll_offset - products_top();
        let bottom = top + self.viewport.height.get();
        if bottom <= 0.0 {
            // Only the header is on screen; still materialize the overscan rows.
            let end = (self.overscan_rows * cols).min(self.products.len());
            return 0..end;
        }

        let first_row = (top.max(0.0) / row_h).floor() as usize;
        let last_row = ((bottom / row_h).ceil() as usize).max(first_row + 1);

        let first_row = first_row.saturating_sub(self.overscan_rows);
        let last_row = (last_row + self.overscan_rows).min(self.row_count());

        let start = (first_row * cols).min(self.products.len());
        let end = (last_row * cols).min(self.products.len());
        start..end
    }

    pub fn frame(&self) -> GridFrame {
        let cols = self.columns();
        let content_width = self.layout.content_width(self.viewport.width);
        let inner_width = (content_width.get() - CONTENT_PADDING.get() * 2.0).max(0.0);
        let column_width = inner_width / cols as f32;
        let text_columns = text_columns(column_width);
        let row_h = row_height();

        let header = HeaderCell {
            row: 0,
            span: cols,
            top: CONTENT_PADDING,
            left: CONTENT_PADDING,
            width: Dp(inner_width),
            height: HEADER_HEIGHT,
            search: SearchBar::inert(),
        };

        let cells = self
            .visible_range()
            .map(|i| {
                let product = &self.products[i];
                let row = i / cols;
                let column = i % cols;
                CardCell {
                    key: product.id().clone(),
                    index: i,
                    row: row + 1,
                    column,
                    top: Dp(self.row_top(row)),
                    left: Dp(CONTENT_PADDING.get() + column as f32 * column_width),
                    width: Dp(column_width),
                    height: row_h,
                    thumbnail: Thumbnail {
                        uri: product.image().as_str().to_string(),
                        height: THUMBNAIL_HEIGHT,
                        padding: THUMBNAIL_PADDING,
                        description: product.title().to_string(),
                    },
                    title: TextBlock::clamp(product.title(), text_columns, DEFAULT_MAX_LINES),
                    price: TextBlock::clamp(&product.price().label(), text_columns, DEFAULT_MAX_LINES),
                }
            })
            .collect();

        GridFrame {
            revision: self.revision,
            scroll_revision: self.scroll_revision,
            snapshot_version: self.snapshot_version.unwrap_or_default(),
            layout: self.layout,
            viewport: self.viewport,
            content_width,
            content_height: self.content_height(),
            scroll_offset: Dp(self.scroll_offset),
            total_products: self.products.len(),
            header,
            cells,
        }
    }

    fn columns(&self) -> usize {
        self.layout.column_count.max(1)
    }

    fn row_top(&self, row: usize) -> f32 {
        products_top() + row as f32 * row_height().get()
    }

    fn max_scroll_offset(&self) -> f32 {
        (self.content_height().get() - self.viewport.height.get()).max(0.0)
    }

    fn compute_anchor(&self) -> Option<ScrollAnchor> {
        let top = self.scroll_offset - products_top();
        if top < 0.0 || self.products.is_empty() {
            return None;
        }
        let row_h = row_height().get();
        let row = ((top / row_h).floor() as usize).min(self.row_count().saturating_sub(1));
        let index = row * self.columns();
        self.products.get(index).map(|p| ScrollAnchor {
            id: p.id().clone(),
            delta: top - row as f32 * row_h,
        })
    }

    /// Re-derive the scroll offset after the sequence or the column count
    /// changed, keeping the anchored product in the first visible row.
    fn restore_anchor(&mut self) {
        let before = self.scroll_offset;
        if let Some(anchor) = self.anchor.take() {
            if let Some(&i) = self.index.get(&anchor.id) {
                self.scroll_offset = self.row_top(i / self.columns()) + anchor.delta;
            }
        }
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll_offset());
        if self.scroll_offset != before {
            self.scroll_revision = self.revision;
        }
        self.anchor = self.compute_anchor();
    }
}

fn text_columns(column_width: f32) -> usize {
    let text_width = column_width - CARD_PADDING.get() * 2.0 - TEXT_HORIZONTAL_PADDING.get() * 2.0;
    (text_width / GLYPH_WIDTH.get()).floor().max(1.0) as usize
}
