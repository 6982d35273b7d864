//! Card text clamping.
//!
//! Titles and prices are shown in at most two lines; overflowing text ends in
//! an ellipsis. The block always reserves room for two lines so cards with a
//! short title line up with cards whose title was cut.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::layout::Dp;

pub const ELLIPSIS: &str = "…";
pub const DEFAULT_MAX_LINES: usize = 2;

/// Wrapped, possibly truncated text ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub truncated: bool,
    /// Lines of vertical space reserved regardless of `lines.len()`.
    pub reserved_lines: usize,
}

impl TextBlock {
    /// Wrap `text` to `columns` display cells and keep at most `max_lines`.
    pub fn clamp(text: &str, columns: usize, max_lines: usize) -> Self {
        let columns = columns.max(1);
        let max_lines = max_lines.max(1);

        let mut lines = wrap(text, columns);
        let truncated = lines.len() > max_lines;
        if truncated {
            lines.truncate(max_lines);
            if let Some(last) = lines.last_mut() {
                *last = with_ellipsis(last, columns);
            }
        }

        Self {
            lines,
            truncated,
            reserved_lines: max_lines,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Minimum block height; independent of how many lines were rendered.
    pub fn min_height(&self, line_height: Dp) -> Dp {
        Dp(line_height.get() * self.reserved_lines as f32)
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let sep = usize::from(!line.is_empty());

        if line_width + sep + word_width <= width {
            if sep == 1 {
                line.push(' ');
            }
            line.push_str(word);
            line_width += sep + word_width;
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }

        if word_width <= width {
            line.push_str(word);
            line_width = word_width;
            continue;
        }

        // Word is wider than a whole line: break between graphemes.
        for grapheme in word.graphemes(true) {
            let grapheme_width = grapheme.width();
            if line_width + grapheme_width > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push_str(grapheme);
            line_width += grapheme_width;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn with_ellipsis(line: &str, columns: usize) -> String {
    let budget = columns.saturating_sub(ELLIPSIS.width());
    let mut kept = String::new();
    let mut kept_width = 0;
    for grapheme in line.graphemes(true) {
        let grapheme_width = grapheme.width();
        if kept_width + grapheme_width > budget {
            break;
        }
        kept.push_str(grapheme);
        kept_width += grapheme_width;
    }
    format!("{}{ELLIPSIS}", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        let block = TextBlock::clamp("Widget", 20, 2);
        assert_eq!(block.lines, vec!["Widget"]);
        assert!(!block.truncated);
        assert_eq!(block.reserved_lines, 2);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let block = TextBlock::clamp("Deluxe stainless kettle", 12, 2);
        assert_eq!(block.lines, vec!["Deluxe", "stainless…"]);
        assert!(block.truncated);
    }

    #[test]
    fn overflow_is_truncated_with_ellipsis() {
        let block = TextBlock::clamp("one two three four five six seven", 9, 2);
        assert_eq!(block.lines, vec!["one two", "three…"]);
        assert!(block.truncated);
    }

    #[test]
    fn long_words_are_hard_broken() {
        let block = TextBlock::clamp("abcdefghij", 4, 3);
        assert_eq!(block.lines, vec!["abcd", "efgh", "ij"]);
        assert!(!block.truncated);
    }

    #[test]
    fn reserved_height_is_constant_for_one_or_two_lines() {
        let one = TextBlock::clamp("Mug", 10, 2);
        let two = TextBlock::clamp("Coffee mug large", 10, 2);
        assert_eq!(one.lines.len(), 1);
        assert_eq!(two.lines.len(), 2);
        assert_eq!(one.min_height(Dp(20.0)), two.min_height(Dp(20.0)));
        assert_eq!(one.min_height(Dp(20.0)), Dp(40.0));
    }

    #[test]
    fn empty_text_has_no_lines_but_keeps_reserved_space() {
        let block = TextBlock::clamp("", 10, 2);
        assert!(block.lines.is_empty());
        assert_eq!(block.reserved_lines, 2);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: never more than the line budget, never wider than the column budget.
            #[test]
            fn clamp_respects_line_and_width_budget(
                text in "[a-zA-Z ]{0,200}",
                columns in 2usize..40,
            ) {
                let block = TextBlock::clamp(&text, columns, 2);
                prop_assert!(block.lines.len() <= 2);
                prop_assert_eq!(block.reserved_lines, 2);
                for line in &block.lines {
                    prop_assert!(line.width() <= columns);
                }
            }

            /// Property: ellipsis appears exactly when text was cut.
            #[test]
            fn ellipsis_marks_truncation(
                text in "[a-z]{1,8}( [a-z]{1,8}){0,30}",
                columns in 8usize..30,
            ) {
                let block = TextBlock::clamp(&text, columns, 2);
                let ends_with_ellipsis = block
                    .lines
                    .last()
                    .map(|l| l.ends_with(ELLIPSIS))
                    .unwrap_or(false);
                prop_assert_eq!(block.truncated, ends_with_ellipsis);
                if !block.truncated {
                    let rejoined = block.lines.join(" ");
                    let original: Vec<&str> = text.split_whitespace().collect();
                    prop_assert_eq!(rejoined, original.join(" "));
                }
            }
        }
    }
}
