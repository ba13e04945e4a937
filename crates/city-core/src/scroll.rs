//! Scroll position shared between the input handler and the render loop.
//!
//! One writer (scroll listener or wheel handler) updates the cell, the frame
//! callback samples it once per tick. Both run on the same thread, so a plain
//! `Cell` is enough.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub offset_px: f64,
    pub max_scroll_px: f64,
}

impl ScrollState {
    /// Build from raw page metrics; the scrollable distance is the document
    /// height beyond one viewport.
    pub fn from_metrics(offset_px: f64, document_height_px: f64, viewport_height_px: f64) -> Self {
        Self {
            offset_px,
            max_scroll_px: (document_height_px - viewport_height_px).max(0.0),
        }
    }

    /// Normalized progress in [0, 1]. A page that cannot scroll stays at 0.
    pub fn progress(&self) -> f32 {
        if !(self.max_scroll_px > 0.0) || !self.offset_px.is_finite() {
            return 0.0;
        }
        (self.offset_px / self.max_scroll_px).clamp(0.0, 1.0) as f32
    }
}

/// Single-writer, many-reader handle to the session's scroll state.
#[derive(Clone, Debug, Default)]
pub struct ScrollCell {
    inner: Rc<Cell<ScrollState>>,
}

impl ScrollCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, state: ScrollState) {
        self.inner.set(state);
    }

    pub fn set_offset(&self, offset_px: f64) {
        let mut s = self.inner.get();
        s.offset_px = offset_px;
        self.inner.set(s);
    }

    /// Update the scrollable extent, keeping the current offset inside it.
    pub fn set_extent(&self, document_height_px: f64, viewport_height_px: f64) {
        let s = self.inner.get();
        let mut next = ScrollState::from_metrics(s.offset_px, document_height_px, viewport_height_px);
        next.offset_px = next.offset_px.clamp(0.0, next.max_scroll_px);
        self.inner.set(next);
    }

    /// Relative scroll (mouse wheel); the offset stays within the scrollable range.
    pub fn scroll_by(&self, delta_px: f64) {
        let mut s = self.inner.get();
        s.offset_px = (s.offset_px + delta_px).clamp(0.0, s.max_scroll_px.max(0.0));
        self.inner.set(s);
    }

    pub fn snapshot(&self) -> ScrollState {
        self.inner.get()
    }

    pub fn progress(&self) -> f32 {
        self.inner.get().progress()
    }
}
