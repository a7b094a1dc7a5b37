//! The input field controller.
//!
//! `InputField` is a plain orchestrator composing the editing components
//! (text buffer, caret/selection model, edit-operation processor, viewport
//! scroller) plus the pointer mapper. There is no inheritance
//! chain and no global state: the host hands the field a per-instance
//! measurement context and a blink scheduler, connects to its signals, and
//! feeds it raw key/pointer events.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use inkline::{InputField, NullBlinkScheduler, TextMetrics};
//!
//! struct Monospace;
//!
//! impl TextMetrics for Monospace {
//!     fn grapheme_width(&self, _index: usize) -> f32 { 8.0 }
//!     fn display_width(&self) -> f32 { 160.0 }
//!     fn grapheme_index_at(&self, x: f32) -> usize { (x / 8.0).round() as usize }
//! }
//!
//! let mut field = InputField::new(Arc::new(Monospace), Arc::new(NullBlinkScheduler))
//!     .expect("valid display budget");
//!
//! field.display_changed.connect(|text| {
//!     println!("render: {}", text);
//! });
//!
//! field.activate();
//! field.set_text("hello");
//! assert_eq!(field.text(), "hello");
//! assert!(field.has_selection()); // set_text selects the new content
//! ```

use std::sync::Arc;

use inkline_core::Signal;

use crate::blink::BlinkScheduler;
use crate::buffer::TextBuffer;
use crate::caret::CaretModel;
use crate::error::{FieldError, FieldResult};
use crate::events::{KeyEvent, PointerButton, PointerEvent};
use crate::metrics::TextMetrics;
use crate::pointer::PointerMapper;
use crate::processor::{EditProcessor, LineMode};
use crate::scroller::ViewportScroller;

/// Echo mode determines how text is surfaced for measurement and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EchoMode {
    /// Surface the buffer content as entered (default).
    #[default]
    Normal,
    /// Surface a mask grapheme per buffer grapheme (for passwords).
    Password,
}

/// A headless single-line/multi-line text-input field.
///
/// # Signals
///
/// - `measure_requested`: the full populated text; the collaborator must
///   re-layout before width queries are trusted
/// - `display_changed`: the windowed text currently visible
/// - `text_changed`: the buffer content after any mutation
/// - `editing_finished`: the final text, once per explicit finish
/// - `clipboard_copy`: text surfaced by a copy or cut operation
///
/// # Activation
///
/// Edit and pointer events are processed only while the field is active.
/// Events arriving while inactive are documented no-ops, not errors.
/// Programmatic operations (`set_text`, `copy`, `cut`, `paste`,
/// `finish_input`) work in either state.
pub struct InputField {
    /// The logical content. Mutated only through the processor.
    buffer: TextBuffer,

    /// Caret index, selection anchor and blink visibility.
    caret: CaretModel,

    /// Key-event classification and buffer mutation.
    processor: EditProcessor,

    /// The draw window over the buffer.
    scroller: ViewportScroller,

    /// Pointer-to-caret mapping.
    pointer: PointerMapper,

    /// Per-instance measurement context.
    metrics: Arc<dyn TextMetrics>,

    /// Periodic caret blink, external to the core.
    blink: Arc<dyn BlinkScheduler>,

    /// Whether the field accepts edit/pointer input.
    active: bool,

    /// How text is surfaced for measurement and display.
    echo_mode: EchoMode,

    /// Mask grapheme for password mode.
    mask_char: char,

    // Signals

    /// Emitted with the full populated text before width queries.
    pub measure_requested: Signal<String>,

    /// Emitted with the windowed text whenever the display changes.
    pub display_changed: Signal<String>,

    /// Emitted with the buffer content whenever it changes.
    pub text_changed: Signal<String>,

    /// Emitted with the final text on an explicit finish.
    pub editing_finished: Signal<String>,

    /// Emitted with copied text on copy/cut operations.
    pub clipboard_copy: Signal<String>,
}

impl InputField {
    /// Create an inactive, empty field.
    ///
    /// The measurement collaborator is probed once: a display budget that is
    /// negative or not finite is a precondition violation fatal to
    /// construction. Later per-call queries clamp defensively instead.
    pub fn new(
        metrics: Arc<dyn TextMetrics>,
        blink: Arc<dyn BlinkScheduler>,
    ) -> FieldResult<Self> {
        let budget = metrics.display_width();
        if !budget.is_finite() || budget < 0.0 {
            return Err(FieldError::InvalidDisplayBudget { budget });
        }

        Ok(Self {
            buffer: TextBuffer::new(),
            caret: CaretModel::new(),
            processor: EditProcessor::new(LineMode::SingleLine),
            scroller: ViewportScroller::new(),
            pointer: PointerMapper::new(),
            metrics,
            blink,
            active: false,
            echo_mode: EchoMode::Normal,
            mask_char: '•',
            measure_requested: Signal::new(),
            display_changed: Signal::new(),
            text_changed: Signal::new(),
            editing_finished: Signal::new(),
            clipboard_copy: Signal::new(),
        })
    }

    /// Set initial text using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Set line mode using builder pattern.
    pub fn with_mode(mut self, mode: LineMode) -> Self {
        self.processor.set_mode(mode);
        self
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Enter the active state: refresh the display and start the caret blink.
    ///
    /// Activating an already-active field does nothing.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        tracing::debug!(target: "inkline::field", "activating");
        self.refresh_display();
        self.active = true;
        self.caret.set_visible(true);
        self.blink.start();
    }

    /// Leave the active state: stop the blink and hide the caret.
    ///
    /// Idempotent. Once this returns, no edit-path refresh can be observed:
    /// edit, pointer and blink input is suppressed, not queued.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        tracing::debug!(target: "inkline::field", "deactivating");
        self.active = false;
        self.caret.set_visible(false);
        self.blink.stop();
    }

    /// Whether the field accepts edit/pointer input.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Report the current content on `editing_finished`.
    ///
    /// Performs no state transition; the caller decides whether to
    /// deactivate.
    pub fn finish_input(&self) {
        self.editing_finished.emit(self.buffer.as_str().to_owned());
    }

    // =========================================================================
    // Text Access
    // =========================================================================

    /// The current text.
    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    /// Replace the whole content.
    ///
    /// Allowed in either activation state. The new content is selected in
    /// full (anchor 0, caret at the end) so a caller can highlight freshly
    /// injected text, and the display is refreshed unconditionally.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let mut new_text: String = text.into();
        if let Some(max) = self.processor.max_length() {
            if TextBuffer::grapheme_len(&new_text) > max {
                let mut truncated = TextBuffer::with_text(new_text);
                truncated.truncate(max);
                new_text = truncated.as_str().to_owned();
            }
        }

        let changed = new_text != self.buffer.as_str();
        self.buffer.replace_all(new_text);
        self.caret.select_all(self.buffer.len());
        self.scroller.reset();

        if changed {
            self.text_changed.emit(self.buffer.as_str().to_owned());
        }
        self.refresh_display();
    }

    /// Clear all text.
    pub fn clear(&mut self) {
        self.set_text("");
    }

    /// The text length in graphemes.
    pub fn text_length(&self) -> usize {
        self.buffer.len()
    }

    // =========================================================================
    // Caret and Selection
    // =========================================================================

    /// The caret position (grapheme index).
    pub fn caret_index(&self) -> usize {
        self.caret.index()
    }

    /// The selection anchor position (grapheme index).
    pub fn selection_index(&self) -> usize {
        self.caret.selection_index()
    }

    /// Whether a selection is active.
    pub fn has_selection(&self) -> bool {
        self.caret.has_selection()
    }

    /// The selected text.
    pub fn selected_text(&self) -> &str {
        self.buffer.slice(self.caret.selection_range())
    }

    /// Select all text.
    pub fn select_all(&mut self) {
        if !self.buffer.is_empty() {
            self.caret.select_all(self.buffer.len());
            self.refresh_display();
        }
    }

    /// Clear the selection without deleting text.
    pub fn deselect(&mut self) {
        if self.caret.has_selection() {
            self.caret.deselect();
            self.refresh_display();
        }
    }

    /// Whether the caret is currently visible.
    pub fn is_caret_visible(&self) -> bool {
        self.caret.is_visible()
    }

    /// Set the caret visibility directly.
    ///
    /// Suppressed while inactive, so a cancelled blink task cannot produce
    /// further visual updates.
    pub fn set_caret_visible(&mut self, visible: bool) {
        if self.active {
            self.caret.set_visible(visible);
        }
    }

    /// Flip the caret visibility, called by the blink task on each tick.
    ///
    /// The caret stays solid while a selection is active. Suppressed while
    /// inactive.
    pub fn toggle_caret_visibility(&mut self) {
        if !self.active {
            return;
        }
        if self.caret.has_selection() {
            self.caret.set_visible(true);
        } else {
            let visible = !self.caret.is_visible();
            self.caret.set_visible(visible);
        }
    }

    // =========================================================================
    // Display Window
    // =========================================================================

    /// First grapheme index of the draw window.
    pub fn draw_start(&self) -> usize {
        self.scroller.draw_start()
    }

    /// The draw window as a half-open grapheme range.
    pub fn draw_window(&self) -> std::ops::Range<usize> {
        self.scroller.window()
    }

    /// The windowed text currently displayed.
    pub fn display_text(&self) -> String {
        self.windowed_text(self.scroller.window())
    }

    // =========================================================================
    // Event Processing
    // =========================================================================

    /// Process one key event.
    ///
    /// Returns `false` when the event ended editing (the field deactivates
    /// itself first). While inactive this is a no-op and the returned flag
    /// carries no meaning.
    pub fn process_key(&mut self, event: &KeyEvent) -> bool {
        if !self.active {
            tracing::trace!(target: "inkline::field", "key event while inactive, ignoring");
            return true;
        }

        let outcome = self.processor.process(event, &mut self.buffer, &mut self.caret);

        if let Some(copied) = &outcome.copied {
            self.clipboard_copy.emit(copied.clone());
        }
        if outcome.text_changed {
            self.text_changed.emit(self.buffer.as_str().to_owned());
        }

        if !outcome.continue_editing {
            self.deactivate();
            return false;
        }

        if outcome.text_changed || outcome.caret_moved {
            self.refresh_display();
        }
        true
    }

    /// Process a pointer press: move the caret to the hit position.
    ///
    /// Shift-press extends the selection instead of collapsing it. No-op
    /// while inactive or for non-primary buttons.
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        if !self.active || event.button != PointerButton::Primary {
            return;
        }
        let index = self
            .pointer
            .index_at(event.pos, self.scroller.draw_start(), self.metrics.as_ref());
        self.caret
            .move_to(index, event.modifiers.shift, self.buffer.len());
        self.refresh_display();
    }

    /// Process a pointer drag: extend the selection toward the pointer.
    ///
    /// Dragging past the display edges steps the caret one position per
    /// event, auto-scrolling the window. No-op while inactive or for
    /// non-primary buttons.
    pub fn pointer_drag(&mut self, event: &PointerEvent) {
        if !self.active || event.button != PointerButton::Primary {
            return;
        }
        let index = self.pointer.drag_index(
            event.pos,
            self.caret.index(),
            self.scroller.draw_start(),
            self.metrics.as_ref(),
        );
        self.caret.move_to(index, true, self.buffer.len());
        self.refresh_display();
    }

    // =========================================================================
    // Clipboard Operations (logical; the host owns the OS clipboard)
    // =========================================================================

    /// Copy the selected text.
    ///
    /// Returns the text and emits it on `clipboard_copy`, or `None` when
    /// there is no selection or the content is masked.
    pub fn copy(&self) -> Option<String> {
        let copied = self.processor.copy_selection(&self.buffer, &self.caret);
        if let Some(text) = &copied {
            self.clipboard_copy.emit(text.clone());
        }
        copied
    }

    /// Cut the selected text: copy it and delete the selection.
    pub fn cut(&mut self) -> Option<String> {
        let copied = self.processor.cut_selection(&mut self.buffer, &mut self.caret);
        if let Some(text) = &copied {
            self.clipboard_copy.emit(text.clone());
            self.text_changed.emit(self.buffer.as_str().to_owned());
            self.refresh_display();
        }
        copied
    }

    /// Insert text at the caret, replacing any selection.
    ///
    /// Returns `true` when the buffer changed.
    pub fn paste(&mut self, text: &str) -> bool {
        if self.processor.paste(text, &mut self.buffer, &mut self.caret) {
            self.text_changed.emit(self.buffer.as_str().to_owned());
            self.refresh_display();
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The line mode.
    pub fn line_mode(&self) -> LineMode {
        self.processor.mode()
    }

    /// Whether the field is read-only.
    pub fn is_read_only(&self) -> bool {
        self.processor.is_read_only()
    }

    /// Set read-only mode. Navigation and selection still work.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.processor.set_read_only(read_only);
    }

    /// The maximum text length in graphemes, if any.
    pub fn max_length(&self) -> Option<usize> {
        self.processor.max_length()
    }

    /// Limit the text length, truncating the current content if needed.
    pub fn set_max_length(&mut self, max: Option<usize>) {
        self.processor.set_max_length(max);
        if let Some(max) = max {
            if self.buffer.len() > max {
                self.buffer.truncate(max);
                self.caret.clamp_to(self.buffer.len());
                self.text_changed.emit(self.buffer.as_str().to_owned());
                self.refresh_display();
            }
        }
    }

    /// The echo mode.
    pub fn echo_mode(&self) -> EchoMode {
        self.echo_mode
    }

    /// Change how text is surfaced for measurement and display.
    ///
    /// Password mode also suppresses clipboard exposure.
    pub fn set_echo_mode(&mut self, mode: EchoMode) {
        if self.echo_mode != mode {
            self.echo_mode = mode;
            self.processor.set_secure(mode == EchoMode::Password);
            self.refresh_display();
        }
    }

    /// The password mask character.
    pub fn mask_char(&self) -> char {
        self.mask_char
    }

    /// Set the password mask character.
    pub fn set_mask_char(&mut self, ch: char) {
        if self.mask_char != ch {
            self.mask_char = ch;
            if self.echo_mode == EchoMode::Password {
                self.refresh_display();
            }
        }
    }

    // =========================================================================
    // Internal: display pipeline
    // =========================================================================

    /// Re-run the display pipeline: populate the full text for measurement,
    /// recompute the viewport, then push the windowed text. The order
    /// matters: the scroller's width queries are only valid once the
    /// collaborator has re-measured the full (not windowed) text.
    fn refresh_display(&mut self) {
        self.measure_requested.emit(self.populated_text());

        let window =
            self.scroller
                .refresh(self.caret.index(), self.buffer.len(), self.metrics.as_ref());
        let display = self.windowed_text(window);

        tracing::trace!(
            target: "inkline::field",
            caret = self.caret.index(),
            draw_start = self.scroller.draw_start(),
            draw_end = self.scroller.draw_end(),
            "display refreshed"
        );
        self.display_changed.emit(display);
    }

    /// The full text as surfaced to the collaborator for measurement.
    fn populated_text(&self) -> String {
        match self.echo_mode {
            EchoMode::Normal => self.buffer.as_str().to_owned(),
            EchoMode::Password => self.mask_char.to_string().repeat(self.buffer.len()),
        }
    }

    /// The text covered by `window`, masked per the echo mode.
    fn windowed_text(&self, window: std::ops::Range<usize>) -> String {
        match self.echo_mode {
            EchoMode::Normal => self.buffer.slice(window).to_owned(),
            EchoMode::Password => self.mask_char.to_string().repeat(window.len()),
        }
    }
}

// The field is single-threaded by contract; Send + Sync lets a host park it
// behind its own serialization boundary.
static_assertions::assert_impl_all!(InputField: Send, Sync);
