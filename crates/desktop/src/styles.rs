//! Inline CSS for the grid page, built from frame geometry.
//!
//! Kept outside the wasm-only front-end so the generated styles are covered by
//! host tests.

use kmpapp_catalog::grid::{
    CARD_CORNER_RADIUS, CARD_PADDING, TEXT_HORIZONTAL_PADDING, TEXT_LINE_HEIGHT, TEXT_SPACER,
};
use kmpapp_catalog::{CardCell, GridFrame, HeaderCell, TextBlock, Thumbnail};

pub const SCROLLER_STYLE: &str = "position:fixed;inset:0;overflow-y:auto";

/// One rendered text line. The browser measures glyphs itself, so a line the
/// model thought would fit still ends in an ellipsis instead of wrapping.
pub const TEXT_LINE_STYLE: &str = "white-space:nowrap;overflow:hidden;text-overflow:ellipsis";

pub fn content_style(frame: Option<&GridFrame>) -> String {
    match frame {
        Some(f) => format!(
            "position:relative;margin:0 auto;width:{}px;height:{}px",
            f.content_width.get(),
            f.content_height.get()
        ),
        None => "position:relative;margin:0 auto".to_string(),
    }
}

pub fn header_style(header: &HeaderCell) -> String {
    format!(
        "position:absolute;top:{}px;left:{}px;width:{}px;height:{}px;display:flex;align-items:center",
        header.top.get(),
        header.left.get(),
        header.width.get(),
        header.height.get()
    )
}

pub fn card_style(cell: &CardCell) -> String {
    format!(
        "position:absolute;box-sizing:border-box;top:{}px;left:{}px;width:{}px;height:{}px;padding:{}px",
        cell.top.get(),
        cell.left.get(),
        cell.width.get(),
        cell.height.get(),
        CARD_PADDING.get()
    )
}

pub fn card_surface_style() -> String {
    format!(
        "height:100%;border-radius:{}px;overflow:hidden;box-shadow:0 1px 3px rgba(0,0,0,.2)",
        CARD_CORNER_RADIUS.get()
    )
}

pub fn thumbnail_style(thumb: &Thumbnail) -> String {
    format!(
        "display:block;box-sizing:border-box;width:100%;height:{}px;padding:{}px;object-fit:contain",
        thumb.height.get(),
        thumb.padding.get()
    )
}

pub fn thumbnail_placeholder_style(thumb: &Thumbnail) -> String {
    format!("height:{}px", thumb.height.get())
}

pub fn card_text_style() -> String {
    format!("padding:0 {}px", TEXT_HORIZONTAL_PADDING.get())
}

pub fn text_spacer_style() -> String {
    format!("height:{}px", TEXT_SPACER.get())
}

/// Container of a clamped text block: exactly its reserved height, whatever
/// the number of lines.
pub fn text_block_style(block: &TextBlock) -> String {
    let reserved = block.min_height(TEXT_LINE_HEIGHT).get();
    format!(
        "min-height:{reserved}px;max-height:{reserved}px;overflow:hidden;line-height:{}px",
        TEXT_LINE_HEIGHT.get()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmpapp_catalog::{ImageUri, Price, Product, ProductGrid, ProductStore, Viewport};
    use kmpapp_core::ProductId;

    fn frame_for(title: &str, width: f32) -> GridFrame {
        let product = Product::new(
            ProductId::from(1u64),
            title,
            ImageUri::new("http://x/a.png").unwrap(),
            Price::from_decimal(9.99).unwrap(),
        );
        let store = ProductStore::with_products(vec![product]).unwrap();
        let mut grid = ProductGrid::new(Viewport::new(width, 800.0));
        grid.apply_snapshot(&store.current());
        grid.frame()
    }

    #[test]
    fn text_lines_never_wrap_in_the_browser() {
        assert!(TEXT_LINE_STYLE.contains("white-space:nowrap"));
        assert!(TEXT_LINE_STYLE.contains("overflow:hidden"));
        assert!(TEXT_LINE_STYLE.contains("text-overflow:ellipsis"));
    }

    #[test]
    fn text_block_is_capped_at_its_reserved_height() {
        let frame = frame_for("WIRELESS HEADPHONES WITH MAXIMUM NOISE CANCELLATION", 500.0);
        let title = &frame.cells[0].title;
        assert_eq!(title.lines.len(), 2);
        assert_eq!(
            text_block_style(title),
            "min-height:40px;max-height:40px;overflow:hidden;line-height:20px"
        );

        let short = &frame.cells[0].price;
        assert_eq!(short.lines.len(), 1);
        assert_eq!(text_block_style(short), text_block_style(title));
    }

    #[test]
    fn card_is_positioned_from_its_cell() {
        let frame = frame_for("Widget", 1024.0);
        let cell = &frame.cells[0];
        assert_eq!(
            card_style(cell),
            format!(
                "position:absolute;box-sizing:border-box;top:{}px;left:16px;width:{}px;height:242px;padding:8px",
                cell.top.get(),
                cell.width.get()
            )
        );
        assert_eq!(
            content_style(Some(&frame)),
            format!(
                "position:relative;margin:0 auto;width:1000px;height:{}px",
                frame.content_height.get()
            )
        );
    }

    #[test]
    fn thumbnail_keeps_its_fixed_height() {
        let frame = frame_for("Widget", 500.0);
        let thumb = &frame.cells[0].thumbnail;
        assert!(thumbnail_style(thumb).contains("height:130px;padding:8px"));
        assert_eq!(thumbnail_placeholder_style(thumb), "height:130px");
    }
}
