//! Scroll position for a virtualized table.
//!
//! This module provides:
//! - `ScrollState`: offset, viewport and content height, always clamped
//! - `ScrollRequest`: relative and absolute scroll actions

// =============================================================================
// ScrollRequest
// =============================================================================

/// Actions that can be requested on scroll state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    /// Scroll by relative amount (positive = down, negative = up).
    Delta(i64),
    /// Scroll to absolute offset.
    ToOffset(u64),
    /// Scroll to make item at index visible.
    IntoView(usize),
    /// Scroll up by one page.
    PageUp,
    /// Scroll down by one page.
    PageDown,
    /// Scroll to top.
    Home,
    /// Scroll to bottom.
    End,
}

// =============================================================================
// ScrollState
// =============================================================================

/// Scroll state for a virtualized container.
///
/// The offset is kept within `0..=max_offset()` whenever the viewport or the
/// content height changes, so a shrinking row set pulls the offset back
/// instead of resetting it to the top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Current scroll offset from the top.
    pub offset: u64,

    /// Viewport height (reported by the renderer).
    pub viewport: u64,

    /// Total content height (from the virtualizer).
    pub content_height: u64,
}

impl ScrollState {
    /// Create a new scroll state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum scroll offset (content_height - viewport).
    pub fn max_offset(&self) -> u64 {
        self.content_height.saturating_sub(self.viewport)
    }

    /// Current scroll progress (0.0 = top, 1.0 = bottom).
    pub fn progress(&self) -> f32 {
        let max = self.max_offset();
        if max == 0 {
            0.0
        } else {
            self.offset as f32 / max as f32
        }
    }

    /// Set viewport size.
    pub fn set_viewport(&mut self, height: u64) {
        self.viewport = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Set content height.
    pub fn set_content_height(&mut self, height: u64) {
        self.content_height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scroll to an absolute offset, clamped.
    pub fn scroll_to(&mut self, offset: u64) {
        self.offset = offset.min(self.max_offset());
    }

    /// Apply a scroll request directly to the offset.
    ///
    /// `IntoView` needs item positions, so it is returned unhandled for the
    /// caller to resolve.
    pub fn apply_request(&mut self, request: ScrollRequest) -> Option<ScrollRequest> {
        let max = self.max_offset();
        match request {
            ScrollRequest::Delta(d) => {
                self.offset = self.offset.saturating_add_signed(d).min(max);
                None
            }
            ScrollRequest::ToOffset(o) => {
                self.offset = o.min(max);
                None
            }
            ScrollRequest::PageUp => {
                self.offset = self.offset.saturating_sub(self.viewport);
                None
            }
            ScrollRequest::PageDown => {
                self.offset = self.offset.saturating_add(self.viewport).min(max);
                None
            }
            ScrollRequest::Home => {
                self.offset = 0;
                None
            }
            ScrollRequest::End => {
                self.offset = max;
                None
            }
            ScrollRequest::IntoView(_) => Some(request),
        }
    }

    /// Scroll the minimum distance that shows `[start, end)`.
    pub fn reveal(&mut self, start: u64, end: u64) {
        if start < self.offset {
            self.offset = start;
        } else if end > self.offset.saturating_add(self.viewport) {
            self.offset = end.saturating_sub(self.viewport);
        }
        self.offset = self.offset.min(self.max_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(offset: u64, viewport: u64, content: u64) -> ScrollState {
        ScrollState {
            offset,
            viewport,
            content_height: content,
        }
    }

    #[test]
    fn shrinking_content_clamps_offset() {
        let mut s = state(900, 100, 10_000);
        s.set_content_height(500);
        assert_eq!(s.offset, 400);
        s.set_content_height(50);
        assert_eq!(s.offset, 0);
    }

    #[test]
    fn requests_stay_in_bounds() {
        let mut s = state(0, 100, 1000);
        assert_eq!(s.apply_request(ScrollRequest::Delta(-20)), None);
        assert_eq!(s.offset, 0);
        s.apply_request(ScrollRequest::End);
        assert_eq!(s.offset, 900);
        s.apply_request(ScrollRequest::PageDown);
        assert_eq!(s.offset, 900);
        s.apply_request(ScrollRequest::PageUp);
        assert_eq!(s.offset, 800);
        assert_eq!(
            s.apply_request(ScrollRequest::IntoView(3)),
            Some(ScrollRequest::IntoView(3))
        );
    }

    #[test]
    fn progress_runs_top_to_bottom() {
        assert_eq!(state(0, 100, 1000).progress(), 0.0);
        assert_eq!(state(450, 100, 1000).progress(), 0.5);
        assert_eq!(state(900, 100, 1000).progress(), 1.0);
        // Nothing to scroll.
        assert_eq!(state(0, 100, 50).progress(), 0.0);
    }

    #[test]
    fn reveal_scrolls_minimally() {
        let mut s = state(100, 100, 1000);
        s.reveal(250, 260);
        assert_eq!(s.offset, 160);
        s.reveal(40, 50);
        assert_eq!(s.offset, 40);
        s.reveal(60, 70);
        assert_eq!(s.offset, 40);
    }
}
