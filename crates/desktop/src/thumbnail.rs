//! Per-card thumbnail load state.

/// Remembers which URI failed to load for one card. A product updated with a
/// different image gets a fresh attempt instead of the stale placeholder.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ThumbnailState {
    failed_uri: Option<String>,
}

impl ThumbnailState {
    pub fn mark_failed(&mut self, uri: &str) {
        self.failed_uri = Some(uri.to_string());
    }

    pub fn shows_placeholder(&self, uri: &str) -> bool {
        self.failed_uri.as_deref() == Some(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_until_a_failure_is_reported() {
        let mut state = ThumbnailState::default();
        assert!(!state.shows_placeholder("http://x/a.png"));
        state.mark_failed("http://x/a.png");
        assert!(state.shows_placeholder("http://x/a.png"));
    }

    #[test]
    fn a_new_image_uri_is_retried() {
        let mut state = ThumbnailState::default();
        state.mark_failed("http://x/a.png");
        assert!(!state.shows_placeholder("http://x/b.png"));

        state.mark_failed("http://x/b.png");
        assert!(state.shows_placeholder("http://x/b.png"));
        assert!(!state.shows_placeholder("http://x/a.png"));
    }
}
