//! Inkline - a headless text-input core for real-time UIs.
//!
//! Inkline owns the hard part of a text-input widget: caret position,
//! selection range, keyboard-driven editing and the scrolling/truncation of
//! text to a fixed-width display. Rendering, text layout and platform event
//! plumbing stay with the embedding host:
//!
//! - The host implements [`TextMetrics`] (per-grapheme widths, the display
//!   width budget, pointer hit testing) against its own layout engine.
//! - The host connects to the field's signals (`measure_requested`,
//!   `display_changed`, `text_changed`, `editing_finished`,
//!   `clipboard_copy`) and redraws from them.
//! - The host translates its key/pointer input into [`KeyEvent`] /
//!   [`PointerEvent`] values and feeds them to the field while it is active.
//!
//! # Components
//!
//! - [`InputField`]: the orchestrator owning the state machine
//! - [`TextBuffer`]: grapheme-indexed text content
//! - [`CaretModel`]: caret index + selection anchor
//! - [`EditProcessor`]: key-event classification and buffer mutation
//! - [`ViewportScroller`]: the visible-window recomputation
//! - [`PointerMapper`]: pointer-to-caret conversion
//! - [`BlinkScheduler`]: the externally driven caret blink
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use inkline::{
//!     InputField, Key, KeyEvent, KeyboardModifiers, NullBlinkScheduler, TextMetrics,
//! };
//!
//! struct Monospace;
//!
//! impl TextMetrics for Monospace {
//!     fn grapheme_width(&self, _index: usize) -> f32 { 8.0 }
//!     fn display_width(&self) -> f32 { 40.0 } // five glyphs
//!     fn grapheme_index_at(&self, x: f32) -> usize { (x / 8.0).round() as usize }
//! }
//!
//! let mut field = InputField::new(Arc::new(Monospace), Arc::new(NullBlinkScheduler))?;
//! field.activate();
//!
//! for ch in ["h", "e", "l", "l", "o", "!"] {
//!     field.process_key(&KeyEvent::new(Key::Unknown(0), KeyboardModifiers::NONE, ch));
//! }
//!
//! assert_eq!(field.text(), "hello!");
//! assert_eq!(field.display_text(), "ello!"); // scrolled to keep the caret visible
//! # Ok::<(), inkline::FieldError>(())
//! ```

pub mod blink;
pub mod buffer;
pub mod caret;
mod error;
pub mod events;
pub mod field;
pub mod metrics;
pub mod pointer;
pub mod processor;
pub mod scroller;

pub use blink::{BlinkScheduler, NullBlinkScheduler, TimerBlinkScheduler};
pub use buffer::TextBuffer;
pub use caret::CaretModel;
pub use error::{FieldError, FieldResult};
pub use events::{Key, KeyEvent, KeyboardModifiers, Point, PointerButton, PointerEvent};
pub use field::{EchoMode, InputField};
pub use metrics::TextMetrics;
pub use pointer::PointerMapper;
pub use processor::{EditOutcome, EditProcessor, LineMode};
pub use scroller::ViewportScroller;

// Re-export the foundation types hosts touch when wiring a field.
pub use inkline_core::{Signal, SharedTimerManager, TimerId, TimerManager};
