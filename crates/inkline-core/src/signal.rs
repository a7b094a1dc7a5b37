//! Signal/slot system for Inkline.
//!
//! This module provides a type-safe signal/slot mechanism used for the
//! boundary notifications of the editing core: the input field emits signals
//! when its text or displayed window changes, and the host connects slots
//! (callbacks) to drive measurement and redraws.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! Emission is direct: slots run synchronously on the emitting thread, in
//! connection order, which matches the single-threaded cooperative model of
//! the editing core. `Signal` is still `Send + Sync` so a host may share a
//! field behind its own serialization boundary.
//!
//! # Example
//!
//! ```
//! use inkline_core::Signal;
//!
//! // Create a signal that passes a string argument
//! let display_changed = Signal::<String>::new();
//!
//! // Connect a slot (closure)
//! let conn_id = display_changed.connect(|text| {
//!     println!("Display now shows: {}", text);
//! });
//!
//! // Emit the signal
//! display_changed.emit("hello".to_string());
//!
//! // Disconnect when done
//! display_changed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// Internal storage for a single connection.
struct Connection<Args> {
    /// The slot function to invoke (Arc-wrapped for safe shared capture).
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// Signals are the notification half of the editing core's boundary: when a
/// signal is emitted, all connected slots are invoked with the provided
/// arguments, in the order they were connected.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for
///   signals with no arguments.
///
/// # Related Types
///
/// - [`ConnectionId`] - Returned by [`connect`](Self::connect), used to disconnect
/// - [`ConnectionGuard`] - RAII-style connection that auto-disconnects on drop
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: Clone + Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use inkline_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let connection = Connection {
            slot: Arc::new(slot),
        };
        self.connections.lock().insert(connection)
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` will do nothing. This is useful
    /// during initialization or batch updates to prevent cascading
    /// notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// If the signal is blocked, this does nothing. Slots are invoked
    /// synchronously on the emitting thread; the slot set is snapshotted
    /// before invocation so a slot may connect or disconnect without
    /// deadlocking against the connection map.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "inkline_core::signal", "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = {
            let connections = self.connections.lock();
            tracing::trace!(
                target: "inkline_core::signal",
                connection_count = connections.len(),
                "emitting signal"
            );
            connections.iter().map(|(_, conn)| conn.slot.clone()).collect()
        };

        for slot in slots {
            slot(&args);
        }
    }
}

// Signal is Send + Sync when Args is Send
unsafe impl<Args: Send> Send for Signal<Args> {}
unsafe impl<Args: Send> Sync for Signal<Args> {}

/// A connection guard that automatically disconnects when dropped.
///
/// This is useful for RAII-style connection management, ensuring connections
/// are cleaned up when the receiver goes out of scope. Created via
/// [`Signal::connect_scoped`].
///
/// # Example
///
/// ```
/// use inkline_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<i32>::new();
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);  // counter = 42
/// }
/// signal.emit(43);  // Nothing happens - connection was dropped
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
pub struct ConnectionGuard<Args: Clone + Send + 'static> {
    signal: *const Signal<Args>,
    id: ConnectionId,
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    /// Connect a slot with automatic disconnection when the guard is dropped.
    ///
    /// # Safety
    ///
    /// The returned guard holds a raw pointer to this signal. The signal must
    /// outlive the guard. Using `Arc<Signal<Args>>` is recommended for shared
    /// ownership.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            signal: self as *const Signal<Args>,
            id,
        }
    }
}

impl<Args: Clone + Send + 'static> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        // SAFETY: The signal pointer is valid if the guard is used correctly.
        // The caller must ensure the signal outlives the guard.
        unsafe {
            if !self.signal.is_null() {
                let _ = (*self.signal).disconnect(self.id);
            }
        }
    }
}

// SAFETY: ConnectionGuard is Send + Sync because:
// - The raw pointer `signal` is only dereferenced in `drop()`.
// - Signal<Args> itself is Send + Sync (uses Mutex internally for connections).
// - The ConnectionId is a simple Copy type (slotmap key).
// - The guard's safety contract (documented in `connect_scoped`) requires the
//   Signal to outlive the guard, which the caller must ensure.
unsafe impl<Args: Clone + Send + 'static> Send for ConnectionGuard<Args> {}
unsafe impl<Args: Clone + Send + 'static> Sync for ConnectionGuard<Args> {}

// Ensure the notification types stay shareable across host threads
static_assertions::assert_impl_all!(Signal<String>: Send, Sync);
static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
