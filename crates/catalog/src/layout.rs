//! Responsive layout policy.
//!
//! Maps the available viewport width to a column count and an optional cap on
//! the content width. One breakpoint, evaluated independently on every query.

use serde::{Deserialize, Serialize};

/// Density-independent length.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dp(pub f32);

impl Dp {
    pub const ZERO: Dp = Dp(0.0);

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn min(self, other: Dp) -> Dp {
        Dp(self.0.min(other.0))
    }
}

impl core::fmt::Display for Dp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}dp", self.0)
    }
}

/// Widths strictly above this get the wide layout.
pub const WIDE_BREAKPOINT: Dp = Dp(840.0);
/// Content cap in the wide layout.
pub const WIDE_MAX_CONTENT_WIDTH: Dp = Dp(1000.0);
pub const WIDE_COLUMNS: usize = 3;
pub const COMPACT_COLUMNS: usize = 2;

/// Column arrangement for one viewport width.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDecision {
    pub column_count: usize,
    /// `None` means the content fills the available width.
    pub max_content_width: Option<Dp>,
}

impl LayoutDecision {
    /// Width actually occupied by the grid; capped content is centered.
    pub fn content_width(&self, viewport_width: Dp) -> Dp {
        match self.max_content_width {
            Some(cap) => viewport_width.min(cap),
            None => viewport_width,
        }
    }

    pub fn is_wide(&self) -> bool {
        self.column_count == WIDE_COLUMNS
    }
}

/// Decide the layout for `viewport_width`.
///
/// A width of exactly 840dp is still compact.
pub fn decide(viewport_width: Dp) -> LayoutDecision {
    if viewport_width > WIDE_BREAKPOINT {
        LayoutDecision {
            column_count: WIDE_COLUMNS,
            max_content_width: Some(WIDE_MAX_CONTENT_WIDTH),
        }
    } else {
        LayoutDecision {
            column_count: COMPACT_COLUMNS,
            max_content_width: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_strictly_greater_than() {
        assert_eq!(decide(Dp(840.0)).column_count, 2);
        assert_eq!(decide(Dp(840.0)).max_content_width, None);
        assert_eq!(decide(Dp(840.5)).column_count, 3);
    }

    #[test]
    fn wide_layout_caps_content_at_1000() {
        let decision = decide(Dp(1024.0));
        assert_eq!(decision.column_count, 3);
        assert_eq!(decision.max_content_width, Some(Dp(1000.0)));
        assert_eq!(decision.content_width(Dp(1024.0)), Dp(1000.0));
        assert_eq!(decision.content_width(Dp(900.0)), Dp(900.0));
    }

    #[test]
    fn compact_layout_fills_viewport() {
        let decision = decide(Dp(500.0));
        assert_eq!(decision.column_count, 2);
        assert!(!decision.is_wide());
        assert_eq!(decision.content_width(Dp(500.0)), Dp(500.0));
    }

    #[test]
    fn rapid_resizes_flip_immediately() {
        let widths = [839.0, 841.0, 840.0, 841.0, 100.0, 2000.0];
        let columns: Vec<usize> = widths.iter().map(|w| decide(Dp(*w)).column_count).collect();
        assert_eq!(columns, vec![2, 3, 2, 3, 2, 3]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every width up to the breakpoint is compact and unconstrained.
            #[test]
            fn narrow_widths_use_two_columns(w in 0.0f32..=840.0) {
                let decision = decide(Dp(w));
                prop_assert_eq!(decision.column_count, 2);
                prop_assert_eq!(decision.max_content_width, None);
            }

            /// Property: every width past the breakpoint is wide and capped.
            #[test]
            fn wide_widths_use_three_columns(w in 840.001f32..10_000.0) {
                let decision = decide(Dp(w));
                prop_assert_eq!(decision.column_count, 3);
                prop_assert_eq!(decision.max_content_width, Some(Dp(1000.0)));
            }

            /// Property: decide is pure (same width, same decision).
            #[test]
            fn decide_is_deterministic(w in 0.0f32..10_000.0) {
                prop_assert_eq!(decide(Dp(w)), decide(Dp(w)));
            }
        }
    }
}
