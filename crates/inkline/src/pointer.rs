//! Pointer-to-caret mapping.
//!
//! Converts display-area-local pointer coordinates into caret indices. The
//! actual glyph geometry lookup belongs to the rendering collaborator
//! ([`TextMetrics::grapheme_index_at`]); this component only re-bases the
//! hit result against the current draw window and applies the edge policy
//! for drags.

use crate::events::Point;
use crate::metrics::TextMetrics;

/// Maps pointer coordinates onto the text buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerMapper;

impl PointerMapper {
    /// Create a pointer mapper.
    pub fn new() -> Self {
        Self
    }

    /// Caret index for a press at `pos`.
    ///
    /// The collaborator hit-tests within the displayed text; adding
    /// `draw_start` re-bases that onto the full buffer.
    pub fn index_at(&self, pos: Point, draw_start: usize, metrics: &dyn TextMetrics) -> usize {
        metrics.grapheme_index_at(pos.x) + draw_start
    }

    /// Caret index for a drag at `pos`.
    ///
    /// Dragging past the left or right edge of the display area moves the
    /// caret one position per event instead of jumping to the edge, which
    /// produces continuous auto-scroll while the pointer stays out of
    /// bounds. Inside the display area, drags hit-test like presses.
    pub fn drag_index(
        &self,
        pos: Point,
        caret_index: usize,
        draw_start: usize,
        metrics: &dyn TextMetrics,
    ) -> usize {
        if pos.x < 0.0 {
            caret_index.saturating_sub(1)
        } else if pos.x > metrics.display_width() {
            // Clamped against the buffer by the caller's move.
            caret_index + 1
        } else {
            self.index_at(pos, draw_start, metrics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UnitMetrics;

    impl TextMetrics for UnitMetrics {
        fn grapheme_width(&self, _index: usize) -> f32 {
            1.0
        }
        fn display_width(&self) -> f32 {
            5.0
        }
        fn grapheme_index_at(&self, x: f32) -> usize {
            x.round().max(0.0) as usize
        }
    }

    #[test]
    fn test_press_rebases_against_window() {
        let mapper = PointerMapper::new();
        assert_eq!(mapper.index_at(Point::new(2.0, 0.0), 0, &UnitMetrics), 2);
        assert_eq!(mapper.index_at(Point::new(2.0, 0.0), 3, &UnitMetrics), 5);
    }

    #[test]
    fn test_drag_left_of_display_steps_back() {
        let mapper = PointerMapper::new();
        assert_eq!(
            mapper.drag_index(Point::new(-1.0, 0.0), 4, 2, &UnitMetrics),
            3
        );
        // Already at the start: stays put.
        assert_eq!(
            mapper.drag_index(Point::new(-1.0, 0.0), 0, 0, &UnitMetrics),
            0
        );
    }

    #[test]
    fn test_drag_right_of_display_steps_forward() {
        let mapper = PointerMapper::new();
        assert_eq!(
            mapper.drag_index(Point::new(6.0, 0.0), 4, 2, &UnitMetrics),
            5
        );
    }

    #[test]
    fn test_drag_inside_display_hit_tests() {
        let mapper = PointerMapper::new();
        assert_eq!(
            mapper.drag_index(Point::new(3.0, 0.0), 4, 2, &UnitMetrics),
            5
        );
    }
}
