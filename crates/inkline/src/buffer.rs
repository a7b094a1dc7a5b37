//! The logical text content of an input field.
//!
//! All public indices are *grapheme cluster* indices: the user-perceived
//! characters that caret positions, selection ranges and the per-character
//! width lookup are quoted against. Byte offsets never escape this module.
//!
//! The buffer is owned by the field controller and mutated only through the
//! edit-operation processor.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// An ordered sequence of grapheme clusters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Create a buffer with initial content.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The full content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of grapheme clusters in the buffer.
    pub fn len(&self) -> usize {
        self.text.graphemes(true).count()
    }

    /// Whether the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of grapheme clusters in an arbitrary string.
    pub fn grapheme_len(s: &str) -> usize {
        s.graphemes(true).count()
    }

    /// Byte offset of the grapheme at `index`.
    ///
    /// An index at or past the end maps to the end of the underlying string.
    pub fn byte_offset(&self, index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }

    /// The text covered by a half-open grapheme range.
    ///
    /// Out-of-range bounds are clamped to the buffer.
    pub fn slice(&self, range: Range<usize>) -> &str {
        if range.start >= range.end {
            return "";
        }
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end);
        &self.text[start..end]
    }

    /// Insert `s` before the grapheme at `index` (clamped to the end).
    ///
    /// Returns the number of grapheme clusters inserted.
    pub fn insert(&mut self, index: usize, s: &str) -> usize {
        let offset = self.byte_offset(index);
        self.text.insert_str(offset, s);
        Self::grapheme_len(s)
    }

    /// Remove the graphemes covered by a half-open range (clamped).
    pub fn remove(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end);
        self.text.replace_range(start..end, "");
    }

    /// Replace the entire content.
    pub fn replace_all(&mut self, s: impl Into<String>) {
        self.text = s.into();
    }

    /// Drop any graphemes past `max`, keeping the first `max`.
    pub fn truncate(&mut self, max: usize) {
        if self.len() > max {
            let offset = self.byte_offset(max);
            self.text.truncate(offset);
        }
    }

    /// Find the start of the word at or before `index`.
    ///
    /// Walks over a run of non-word graphemes, then to the start of the
    /// preceding alphanumeric run.
    pub fn prev_word_boundary(&self, index: usize) -> usize {
        let graphemes: Vec<&str> = self.text.graphemes(true).collect();
        if index == 0 || graphemes.is_empty() {
            return 0;
        }

        let mut i = index.min(graphemes.len());
        i -= 1;

        // Skip whitespace/punctuation
        while i > 0 && !is_word_grapheme(graphemes[i]) {
            i -= 1;
        }

        // Skip word characters
        while i > 0 && is_word_grapheme(graphemes[i - 1]) {
            i -= 1;
        }

        i
    }

    /// Find the position just past the word at or after `index`.
    pub fn next_word_boundary(&self, index: usize) -> usize {
        let graphemes: Vec<&str> = self.text.graphemes(true).collect();
        if index >= graphemes.len() {
            return graphemes.len();
        }

        let mut i = index;

        // Skip word characters
        while i < graphemes.len() && is_word_grapheme(graphemes[i]) {
            i += 1;
        }

        // Skip whitespace/punctuation
        while i < graphemes.len() && !is_word_grapheme(graphemes[i]) {
            i += 1;
        }

        i
    }
}

/// A grapheme counts as part of a word when its leading scalar is alphanumeric.
fn is_word_grapheme(g: &str) -> bool {
    g.chars().next().is_some_and(|c| c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.len(), 0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_str(), "");
        assert_eq!(buffer.byte_offset(0), 0);
        assert_eq!(buffer.slice(0..0), "");
    }

    #[test]
    fn test_len_counts_graphemes() {
        // é as 'e' + combining acute is one grapheme, two scalars
        let buffer = TextBuffer::with_text("He\u{0301}llo");
        assert_eq!(buffer.len(), 5);
        assert_eq!(TextBuffer::grapheme_len("e\u{0301}"), 1);
    }

    #[test]
    fn test_byte_offset() {
        let buffer = TextBuffer::with_text("He\u{0301}llo");
        assert_eq!(buffer.byte_offset(0), 0);
        assert_eq!(buffer.byte_offset(1), 1);
        assert_eq!(buffer.byte_offset(2), 4); // past the combined grapheme
        assert_eq!(buffer.byte_offset(99), buffer.as_str().len());
    }

    #[test]
    fn test_slice() {
        let buffer = TextBuffer::with_text("hello world");
        assert_eq!(buffer.slice(0..5), "hello");
        assert_eq!(buffer.slice(6..11), "world");
        assert_eq!(buffer.slice(6..99), "world");
        assert_eq!(buffer.slice(5..5), "");
    }

    #[test]
    fn test_insert() {
        let mut buffer = TextBuffer::with_text("hllo");
        let inserted = buffer.insert(1, "e");
        assert_eq!(inserted, 1);
        assert_eq!(buffer.as_str(), "hello");

        let inserted = buffer.insert(5, "!!");
        assert_eq!(inserted, 2);
        assert_eq!(buffer.as_str(), "hello!!");
    }

    #[test]
    fn test_insert_past_end_clamps() {
        let mut buffer = TextBuffer::with_text("ab");
        buffer.insert(99, "c");
        assert_eq!(buffer.as_str(), "abc");
    }

    #[test]
    fn test_remove() {
        let mut buffer = TextBuffer::with_text("hello world");
        buffer.remove(5..11);
        assert_eq!(buffer.as_str(), "hello");

        buffer.remove(0..1);
        assert_eq!(buffer.as_str(), "ello");

        // Empty and inverted ranges are no-ops
        buffer.remove(2..2);
        assert_eq!(buffer.as_str(), "ello");
    }

    #[test]
    fn test_remove_multibyte() {
        let mut buffer = TextBuffer::with_text("ae\u{0301}b");
        buffer.remove(1..2);
        assert_eq!(buffer.as_str(), "ab");
    }

    #[test]
    fn test_truncate() {
        let mut buffer = TextBuffer::with_text("hello world");
        buffer.truncate(5);
        assert_eq!(buffer.as_str(), "hello");

        // Truncating to a longer length is a no-op
        buffer.truncate(99);
        assert_eq!(buffer.as_str(), "hello");
    }

    #[test]
    fn test_word_boundaries() {
        let buffer = TextBuffer::with_text("Hello World Test");

        // Boundary before position 11 (end of "World")
        assert_eq!(buffer.prev_word_boundary(11), 6);

        // Boundary after position 0 lands at the start of "World"
        assert_eq!(buffer.next_word_boundary(0), 6);

        assert_eq!(buffer.prev_word_boundary(0), 0);
        assert_eq!(buffer.next_word_boundary(16), 16);
    }

    #[test]
    fn test_word_boundary_over_punctuation() {
        let buffer = TextBuffer::with_text("foo,  bar");
        assert_eq!(buffer.prev_word_boundary(6), 0);
        assert_eq!(buffer.next_word_boundary(0), 6);
    }
}
