//! Measurement collaborator interface.
//!
//! The editing core is headless: it never shapes or rasterizes text itself.
//! Instead the host supplies a per-instance measurement context that answers
//! width and hit-testing queries against its own text layout engine. There
//! is no process-wide layout state; every field carries its own
//! `Arc<dyn TextMetrics>`.

/// Width and hit-testing queries answered by the rendering collaborator.
///
/// # Measurement protocol
///
/// Before every viewport recomputation the field emits
/// [`measure_requested`](crate::InputField::measure_requested) with the full
/// populated text (masked in password mode). Width queries are only trusted
/// *after* that notification: the collaborator is expected to lay the text
/// out then, and answer subsequent queries from that layout.
pub trait TextMetrics: Send + Sync {
    /// Width in pixels of the grapheme at `index` within the most recently
    /// populated text.
    fn grapheme_width(&self, index: usize) -> f32;

    /// The display area's width budget in pixels.
    fn display_width(&self) -> f32;

    /// The grapheme index within the *displayed* text closest to the
    /// horizontal coordinate `x` (display-area-local).
    ///
    /// Used for pointer hit testing; the field re-bases the result against
    /// the current draw window.
    fn grapheme_index_at(&self, x: f32) -> usize;
}
