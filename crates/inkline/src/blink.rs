//! Caret blink scheduling.
//!
//! The blink is a periodic, cancellable task that lives *outside* the
//! editing core: the core only flips the caret visibility flag when told to.
//! Hosts provide the scheduling through the [`BlinkScheduler`] capability;
//! [`TimerBlinkScheduler`] is the reference implementation for hosts that
//! pump an [`inkline_core::TimerManager`], and [`NullBlinkScheduler`] suits
//! hosts that draw a steady caret.
//!
//! # Wiring the reference scheduler
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use inkline::TimerBlinkScheduler;
//! use inkline_core::SharedTimerManager;
//!
//! let timers = Arc::new(SharedTimerManager::new());
//! let blink = TimerBlinkScheduler::new(timers.clone(), Duration::from_millis(530)).unwrap();
//!
//! // field.activate() calls blink.start(); then, from the host tick:
//! // for id in timers.process_expired() {
//! //     if blink.is_tick(id) {
//! //         field.toggle_caret_visibility();
//! //     }
//! // }
//! ```

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use inkline_core::{SharedTimerManager, TimerId};

use crate::error::{FieldError, FieldResult};

/// Capability for starting and stopping the periodic caret blink.
///
/// Both operations are idempotent. `stop` takes effect immediately: no tick
/// scheduled by a stopped scheduler may be observed afterwards.
pub trait BlinkScheduler: Send + Sync {
    /// Begin (or keep) blinking.
    fn start(&self);

    /// Cancel blinking immediately.
    fn stop(&self);
}

/// A scheduler for hosts that render a steady, non-blinking caret.
#[derive(Debug, Default)]
pub struct NullBlinkScheduler;

impl BlinkScheduler for NullBlinkScheduler {
    fn start(&self) {}

    fn stop(&self) {}
}

/// Reference blink scheduler driven by a repeating timer.
///
/// Owns the lifecycle of one repeating timer inside a shared
/// [`SharedTimerManager`]. The host pumps the manager and, for each fired
/// timer that [`is_tick`](Self::is_tick) recognizes, toggles the field's
/// caret visibility.
pub struct TimerBlinkScheduler {
    timers: Arc<SharedTimerManager>,
    interval: Duration,
    active: Mutex<Option<TimerId>>,
}

impl TimerBlinkScheduler {
    /// Create a scheduler ticking every `interval` (half a blink period).
    ///
    /// A zero interval is a construction error.
    pub fn new(timers: Arc<SharedTimerManager>, interval: Duration) -> FieldResult<Self> {
        if interval.is_zero() {
            return Err(FieldError::ZeroBlinkInterval);
        }
        Ok(Self {
            timers,
            interval,
            active: Mutex::new(None),
        })
    }

    /// Whether `id` is this scheduler's currently running blink timer.
    pub fn is_tick(&self, id: TimerId) -> bool {
        *self.active.lock() == Some(id)
    }
}

impl BlinkScheduler for TimerBlinkScheduler {
    fn start(&self) {
        let mut active = self.active.lock();
        if active.is_none() {
            let id = self.timers.start_repeating(self.interval);
            tracing::debug!(target: "inkline::blink", ?id, "blink timer started");
            *active = Some(id);
        }
    }

    fn stop(&self) {
        let mut active = self.active.lock();
        if let Some(id) = active.take() {
            // Stopping an already-expired id is harmless.
            let _ = self.timers.stop(id);
            tracing::debug!(target: "inkline::blink", ?id, "blink timer stopped");
        }
    }
}
