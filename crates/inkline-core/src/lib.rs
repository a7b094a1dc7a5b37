//! Core systems for Inkline.
//!
//! This crate provides the foundational components of the Inkline text-input
//! core:
//!
//! - **Signal/Slot System**: Type-safe notifications from the editing core
//!   to its host (display updates, measurement requests, edit completion)
//! - **Timers**: One-shot and repeating cooperative timers, pumped by the
//!   host, used to drive the caret blink
//! - **Errors**: Shared error types for the foundation layer
//!
//! # Signal/Slot Example
//!
//! ```
//! use inkline_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use inkline_core::TimerManager;
//! use std::time::Duration;
//!
//! let mut timers = TimerManager::new();
//! let blink = timers.start_repeating(Duration::from_millis(500));
//!
//! // From the host's tick:
//! for id in timers.process_expired() {
//!     if id == blink {
//!         // toggle the caret
//!     }
//! }
//! ```

mod error;
pub mod signal;
mod timer;

pub use error::{CoreError, Result, TimerError};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{SharedTimerManager, TimerId, TimerKind, TimerManager};
