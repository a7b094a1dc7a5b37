//! Key-event classification and buffer mutation.
//!
//! The processor turns one raw key event into one editing action applied to
//! the buffer and caret model, and reports whether editing continues. Every
//! mutation follows the same ordering: edit the buffer first, then reposition
//! the caret through [`CaretModel::move_to`], so index clamping always sees
//! the post-edit length.

use unicode_segmentation::UnicodeSegmentation;

use crate::buffer::TextBuffer;
use crate::caret::CaretModel;
use crate::events::{Key, KeyEvent};

/// Whether Return inserts a line break or ends editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineMode {
    /// Return/Enter ends editing.
    #[default]
    SingleLine,
    /// Return/Enter inserts a newline and editing continues.
    MultiLine,
}

/// What a processed key event did.
#[derive(Debug, Clone, Default)]
pub struct EditOutcome {
    /// `false` when the event ends editing (Return in single-line mode,
    /// Tab, Escape).
    pub continue_editing: bool,
    /// The buffer content changed.
    pub text_changed: bool,
    /// The caret or selection changed.
    pub caret_moved: bool,
    /// Text surfaced by a copy or cut action.
    pub copied: Option<String>,
}

impl EditOutcome {
    /// Nothing happened; editing continues.
    fn idle() -> Self {
        Self {
            continue_editing: true,
            ..Self::default()
        }
    }

    /// The caret or selection changed; editing continues.
    fn moved() -> Self {
        Self {
            continue_editing: true,
            caret_moved: true,
            ..Self::default()
        }
    }

    /// The buffer changed (the caret always moves with it).
    fn edited() -> Self {
        Self {
            continue_editing: true,
            text_changed: true,
            caret_moved: true,
            ..Self::default()
        }
    }

    /// The event ends editing without touching the buffer.
    fn finished() -> Self {
        Self::default()
    }
}

/// Interprets key events against a text buffer and caret model.
pub struct EditProcessor {
    mode: LineMode,
    read_only: bool,
    max_length: Option<usize>,
    /// Suppress clipboard exposure (password echo modes).
    secure: bool,
}

impl EditProcessor {
    /// Create a processor for the given line mode.
    pub fn new(mode: LineMode) -> Self {
        Self {
            mode,
            read_only: false,
            max_length: None,
            secure: false,
        }
    }

    /// The line mode.
    pub fn mode(&self) -> LineMode {
        self.mode
    }

    /// Change the line mode.
    pub fn set_mode(&mut self, mode: LineMode) {
        self.mode = mode;
    }

    /// Whether mutating actions are rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Set read-only mode. Navigation and selection still work.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// The maximum buffer length in graphemes, if any.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Limit the buffer length; inserts are truncated to fit.
    pub fn set_max_length(&mut self, max: Option<usize>) {
        self.max_length = max;
    }

    /// Whether clipboard exposure is suppressed.
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Suppress copy/cut output (used while a mask echo mode is active).
    pub fn set_secure(&mut self, secure: bool) {
        self.secure = secure;
    }

    /// Classify and apply one key event.
    pub fn process(
        &self,
        event: &KeyEvent,
        buffer: &mut TextBuffer,
        caret: &mut CaretModel,
    ) -> EditOutcome {
        let ctrl = event.modifiers.control || event.modifiers.meta;
        let shift = event.modifiers.shift;

        match event.key {
            // Navigation
            Key::ArrowLeft => self.move_left(ctrl, shift, buffer, caret),
            Key::ArrowRight => self.move_right(ctrl, shift, buffer, caret),
            Key::Home => {
                caret.move_to(0, shift, buffer.len());
                EditOutcome::moved()
            }
            Key::End => {
                caret.move_to(buffer.len(), shift, buffer.len());
                EditOutcome::moved()
            }

            // Deletion
            Key::Backspace => {
                if ctrl {
                    self.delete_word_before(buffer, caret)
                } else {
                    self.delete_before(buffer, caret)
                }
            }
            Key::Delete => {
                if ctrl {
                    self.delete_word_after(buffer, caret)
                } else {
                    self.delete_after(buffer, caret)
                }
            }

            // Editing termination
            Key::Enter => match self.mode {
                LineMode::SingleLine => EditOutcome::finished(),
                LineMode::MultiLine => self.insert_text("\n", buffer, caret),
            },
            Key::Tab | Key::Escape => EditOutcome::finished(),

            // Select all
            Key::A if ctrl => {
                caret.select_all(buffer.len());
                EditOutcome::moved()
            }

            // Clipboard operations (logical; the host owns the OS clipboard)
            Key::C if ctrl => EditOutcome {
                copied: self.copy_selection(buffer, caret),
                ..EditOutcome::idle()
            },
            Key::X if ctrl => {
                let copied = self.cut_selection(buffer, caret);
                if copied.is_some() {
                    EditOutcome {
                        copied,
                        ..EditOutcome::edited()
                    }
                } else {
                    EditOutcome::idle()
                }
            }
            // Paste must be fed through `paste` by the host; the key alone
            // carries no clipboard content.
            Key::V if ctrl => EditOutcome::idle(),

            // Character input
            _ => {
                if !event.text.is_empty() && !ctrl && !event.modifiers.alt {
                    self.insert_text(&event.text, buffer, caret)
                } else {
                    EditOutcome::idle()
                }
            }
        }
    }

    // =========================================================================
    // Clipboard contract
    // =========================================================================

    /// The selected text, unless there is no selection or the content is
    /// masked.
    pub fn copy_selection(&self, buffer: &TextBuffer, caret: &CaretModel) -> Option<String> {
        if self.secure || !caret.has_selection() {
            return None;
        }
        let selected = buffer.slice(caret.selection_range());
        if selected.is_empty() {
            None
        } else {
            Some(selected.to_owned())
        }
    }

    /// Copy the selection and delete it from the buffer.
    pub fn cut_selection(
        &self,
        buffer: &mut TextBuffer,
        caret: &mut CaretModel,
    ) -> Option<String> {
        if self.read_only {
            return None;
        }
        let copied = self.copy_selection(buffer, caret)?;
        self.delete_selection(buffer, caret);
        Some(copied)
    }

    /// Insert text at the caret, replacing any selection.
    ///
    /// Returns `true` when the buffer changed.
    pub fn paste(&self, text: &str, buffer: &mut TextBuffer, caret: &mut CaretModel) -> bool {
        self.insert_text(text, buffer, caret).text_changed
    }

    // =========================================================================
    // Internal: text manipulation
    // =========================================================================

    fn insert_text(
        &self,
        text: &str,
        buffer: &mut TextBuffer,
        caret: &mut CaretModel,
    ) -> EditOutcome {
        if self.read_only {
            return EditOutcome::idle();
        }

        let filtered = self.sanitize(text);
        if filtered.is_empty() {
            return EditOutcome::idle();
        }

        let mut changed = false;
        if caret.has_selection() {
            let range = caret.selection_range();
            buffer.remove(range.clone());
            caret.move_to(range.start, false, buffer.len());
            changed = true;
        }

        // Truncate the insertion to the remaining capacity.
        let insert: &str = match self.max_length {
            Some(max) => {
                let available = max.saturating_sub(buffer.len());
                grapheme_prefix(&filtered, available)
            }
            None => &filtered,
        };

        if insert.is_empty() {
            return if changed {
                EditOutcome::edited()
            } else {
                EditOutcome::idle()
            };
        }

        let inserted = buffer.insert(caret.index(), insert);
        caret.move_to(caret.index() + inserted, false, buffer.len());
        EditOutcome::edited()
    }

    fn delete_selection(&self, buffer: &mut TextBuffer, caret: &mut CaretModel) {
        let range = caret.selection_range();
        buffer.remove(range.clone());
        caret.move_to(range.start, false, buffer.len());
    }

    /// Backspace: delete the selection, or the grapheme before the caret.
    fn delete_before(&self, buffer: &mut TextBuffer, caret: &mut CaretModel) -> EditOutcome {
        if self.read_only {
            return EditOutcome::idle();
        }
        if caret.has_selection() {
            self.delete_selection(buffer, caret);
            return EditOutcome::edited();
        }
        let index = caret.index();
        if index == 0 {
            return EditOutcome::idle();
        }
        buffer.remove(index - 1..index);
        caret.move_to(index - 1, false, buffer.len());
        EditOutcome::edited()
    }

    /// Delete: delete the selection, or the grapheme at the caret.
    fn delete_after(&self, buffer: &mut TextBuffer, caret: &mut CaretModel) -> EditOutcome {
        if self.read_only {
            return EditOutcome::idle();
        }
        if caret.has_selection() {
            self.delete_selection(buffer, caret);
            return EditOutcome::edited();
        }
        let index = caret.index();
        if index >= buffer.len() {
            return EditOutcome::idle();
        }
        buffer.remove(index..index + 1);
        caret.move_to(index, false, buffer.len());
        EditOutcome::edited()
    }

    fn delete_word_before(&self, buffer: &mut TextBuffer, caret: &mut CaretModel) -> EditOutcome {
        if self.read_only {
            return EditOutcome::idle();
        }
        if caret.has_selection() {
            self.delete_selection(buffer, caret);
            return EditOutcome::edited();
        }
        let index = caret.index();
        if index == 0 {
            return EditOutcome::idle();
        }
        let boundary = buffer.prev_word_boundary(index);
        buffer.remove(boundary..index);
        caret.move_to(boundary, false, buffer.len());
        EditOutcome::edited()
    }

    fn delete_word_after(&self, buffer: &mut TextBuffer, caret: &mut CaretModel) -> EditOutcome {
        if self.read_only {
            return EditOutcome::idle();
        }
        if caret.has_selection() {
            self.delete_selection(buffer, caret);
            return EditOutcome::edited();
        }
        let index = caret.index();
        if index >= buffer.len() {
            return EditOutcome::idle();
        }
        let boundary = buffer.next_word_boundary(index);
        buffer.remove(index..boundary);
        caret.move_to(index, false, buffer.len());
        EditOutcome::edited()
    }

    // =========================================================================
    // Internal: caret movement
    // =========================================================================

    fn move_left(
        &self,
        word: bool,
        shift: bool,
        buffer: &TextBuffer,
        caret: &mut CaretModel,
    ) -> EditOutcome {
        let len = buffer.len();
        if word {
            let target = buffer.prev_word_boundary(caret.index());
            caret.move_to(target, shift, len);
            return EditOutcome::moved();
        }
        if !shift && caret.has_selection() {
            // Collapse to the selection's left edge rather than moving.
            let start = caret.selection_range().start;
            caret.move_to(start, false, len);
            return EditOutcome::moved();
        }
        caret.move_to(caret.index().saturating_sub(1), shift, len);
        EditOutcome::moved()
    }

    fn move_right(
        &self,
        word: bool,
        shift: bool,
        buffer: &TextBuffer,
        caret: &mut CaretModel,
    ) -> EditOutcome {
        let len = buffer.len();
        if word {
            let target = buffer.next_word_boundary(caret.index());
            caret.move_to(target, shift, len);
            return EditOutcome::moved();
        }
        if !shift && caret.has_selection() {
            // Collapse to the selection's right edge rather than moving.
            let end = caret.selection_range().end;
            caret.move_to(end, false, len);
            return EditOutcome::moved();
        }
        caret.move_to(caret.index() + 1, shift, len);
        EditOutcome::moved()
    }

    /// Strip control characters the buffer must never hold. Tab survives;
    /// newline survives only in multi-line mode.
    fn sanitize(&self, text: &str) -> String {
        text.chars()
            .filter(|c| {
                !c.is_control()
                    || *c == '\t'
                    || (*c == '\n' && self.mode == LineMode::MultiLine)
            })
            .collect()
    }
}

impl Default for EditProcessor {
    fn default() -> Self {
        Self::new(LineMode::SingleLine)
    }
}

/// The longest prefix of `s` holding at most `max` grapheme clusters.
fn grapheme_prefix(s: &str, max: usize) -> &str {
    match s.grapheme_indices(true).nth(max) {
        Some((offset, _)) => &s[..offset],
        None => s,
    }
}
