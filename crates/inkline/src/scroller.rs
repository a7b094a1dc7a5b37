//! Viewport windowing for a fixed-width display.
//!
//! The scroller maintains the half-open grapheme range of the buffer that is
//! currently rendered, keeping the caret visible within the collaborator's
//! pixel budget without re-scanning the whole buffer on every keystroke.

use std::ops::Range;

use crate::metrics::TextMetrics;

/// The draw window over the text buffer.
///
/// Invariants after every [`refresh`](Self::refresh):
/// `0 <= draw_start <= draw_end <= len`, and the summed grapheme widths of
/// the window do not exceed the display budget, except when a single
/// grapheme is wider than the whole budget, in which case the window
/// degrades to exactly that grapheme.
#[derive(Debug, Clone, Default)]
pub struct ViewportScroller {
    draw_start: usize,
    draw_end: usize,
}

impl ViewportScroller {
    /// Create a scroller with an empty window.
    pub fn new() -> Self {
        Self {
            draw_start: 0,
            draw_end: 0,
        }
    }

    /// First grapheme index of the window.
    pub fn draw_start(&self) -> usize {
        self.draw_start
    }

    /// One past the last grapheme index of the window.
    pub fn draw_end(&self) -> usize {
        self.draw_end
    }

    /// The current window as a range.
    pub fn window(&self) -> Range<usize> {
        self.draw_start..self.draw_end
    }

    /// Forget the window, e.g. across a wholesale buffer replacement.
    pub fn reset(&mut self) {
        self.draw_start = 0;
        self.draw_end = 0;
    }

    /// Recompute the window for the given caret position and buffer length.
    ///
    /// Three cases:
    ///
    /// - The caret moved past `draw_end`, or sits at the end of the buffer
    ///   while `draw_start > 0` (so trailing space becomes visible): anchor
    ///   the window's end at the caret and walk *backward* accumulating
    ///   grapheme widths until the budget is filled.
    /// - The caret moved before `draw_start`: anchor the window's start at
    ///   the caret and walk *forward*.
    /// - The caret is still inside the window: leave it alone, so the
    ///   visible text does not jump while the caret is already visible.
    ///
    /// On either walk, the grapheme whose width pushes the accumulated total
    /// strictly past the budget is excluded again, unless it is the only
    /// grapheme in the window, which covers the single-grapheme-wider-than-
    /// budget degradation.
    ///
    /// Widths are read through `metrics` and are only meaningful after the
    /// most recent measurement notification for the full text.
    pub fn refresh(&mut self, caret: usize, len: usize, metrics: &dyn TextMetrics) -> Range<usize> {
        let budget = metrics.display_width().max(0.0);

        if caret > self.draw_end || (caret == len && self.draw_start > 0) {
            self.draw_end = caret;

            let mut width = 0.0;
            let mut start = self.draw_end;
            while width < budget && start > 0 {
                start -= 1;
                width += metrics.grapheme_width(start);
            }
            if width > budget && self.draw_end - start > 1 {
                start += 1;
            }
            self.draw_start = start;

            tracing::trace!(
                target: "inkline::scroller",
                caret,
                draw_start = self.draw_start,
                draw_end = self.draw_end,
                "forward rescan"
            );
        } else if caret < self.draw_start {
            self.draw_start = caret;

            let mut width = 0.0;
            let mut end = self.draw_start;
            while width < budget && end < len {
                width += metrics.grapheme_width(end);
                end += 1;
            }
            if width > budget && end - self.draw_start > 1 {
                end -= 1;
            }
            self.draw_end = end;

            tracing::trace!(
                target: "inkline::scroller",
                caret,
                draw_start = self.draw_start,
                draw_end = self.draw_end,
                "backward rescan"
            );
        }

        self.draw_end = self.draw_end.min(len);
        self.draw_start = self.draw_start.min(self.draw_end);
        self.window()
    }
}
