//! Catalog view-model.
//!
//! This crate holds the presentation core of the catalog browser as pure,
//! deterministic logic (no IO, no UI toolkit):
//!
//! - [`store`]: the observable, single-writer product sequence
//! - [`layout`]: viewport width → column count / content width
//! - [`grid`]: keyed, virtualized grid model rendered into [`GridFrame`]s
//! - [`text`]: two-line clamping of card text

pub mod error;
pub mod grid;
pub mod layout;
pub mod product;
pub mod store;
pub mod text;

pub use error::{CatalogError, CatalogResult};
pub use grid::{
    CardCell, FrameAction, FrameCursor, GridDiff, GridFrame, HeaderCell, ProductGrid, SearchBar, Thumbnail,
    Viewport,
};
pub use layout::{Dp, LayoutDecision, decide};
pub use product::{ImageUri, Price, Product};
pub use store::{ProductSnapshot, ProductStore, Subscription};
pub use text::TextBlock;
