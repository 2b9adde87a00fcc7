//! Signal/slot system for Concertina.
//!
//! This module provides a type-safe signal/slot mechanism for inter-object
//! communication. Signals are emitted by objects when their state changes,
//! and connected slots (callbacks) are invoked in response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Threading Model
//!
//! Concertina targets a single-UI-thread cooperative model: signals are
//! emitted and slots run on the thread that calls [`Signal::emit`]. There is
//! no cross-thread queuing; deferred delivery goes through
//! [`crate::UiTaskQueue`] instead. `Signal` itself is still `Send + Sync` so
//! it can live inside shared widget state.
//!
//! # Example
//!
//! ```
//! use concertina_core::Signal;
//!
//! // Create a signal that passes a string argument
//! let text_changed = Signal::<String>::new();
//!
//! // Connect a slot (closure)
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! // Emit the signal
//! text_changed.emit("Hello, World!".to_string());
//!
//! // Disconnect when done
//! text_changed.disconnect(conn_id).unwrap();
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, SignalError};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// A boxed, shareable slot closure.
type SharedSlot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked in connection
/// order with a reference to the provided arguments.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for
///   signals with no arguments, or a tuple like `(usize, bool)` for multiple
///   arguments.
///
/// # Re-entrancy
///
/// Slots may connect or disconnect other slots on the same signal; such
/// changes take effect from the next emission, not the one in flight.
///
/// # Related Types
///
/// - [`ConnectionId`] - Returned by [`connect`](Self::connect), used to disconnect
/// - [`ConnectionGuard`] - RAII-style connection that auto-disconnects on drop
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, SharedSlot<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
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
    /// use concertina_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns an error if the connection was not found (already
    /// disconnected, or belonging to another signal).
    pub fn disconnect(&self, id: ConnectionId) -> Result<()> {
        if self.connections.lock().remove(id).is_some() {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection.into())
        }
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
    /// While blocked, calls to `emit()` do nothing. This is useful during
    /// initialization or batch updates to prevent cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// If the signal is blocked, this does nothing. Slots run synchronously
    /// on the calling thread, in connection order. The connection list is
    /// snapshotted before the first slot runs, so re-entrant connects and
    /// disconnects do not affect the emission in flight.
    #[tracing::instrument(skip_all, target = "concertina_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "concertina_core::signal", "signal blocked, skipping emit");
            return;
        }

        // Snapshot under the lock, invoke outside it.
        let slots: Vec<SharedSlot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: "concertina_core::signal", connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }

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

/// A connection guard that automatically disconnects when dropped.
///
/// This is useful for RAII-style connection management, ensuring connections
/// are cleaned up when the receiver goes out of scope. Created via
/// [`Signal::connect_scoped`].
///
/// # Example
///
/// ```
/// use concertina_core::Signal;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicI32, Ordering};
///
/// let signal = Signal::<i32>::new();
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42); // counter = 42
/// }
/// signal.emit(43); // Nothing happens - connection was dropped
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
pub struct ConnectionGuard<Args: 'static> {
    signal: *const Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        // SAFETY: connect_scoped requires the signal to outlive the guard.
        let _ = unsafe { (*self.signal).disconnect(self.id) };
    }
}

static_assertions::assert_impl_all!(Signal<usize>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_connect_and_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let recv = received.clone();
        signal.connect(move |&n| {
            recv.lock().push(n);
        });

        signal.emit(1);
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1, 2]);
    }

    #[test]
    fn test_multiple_slots_in_connection_order() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = order.clone();
            signal.connect(move |_| {
                order.lock().push(tag);
            });
        }

        signal.emit(());
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_disconnect() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        let id = signal.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(signal.connection_count(), 1);

        signal.emit(());
        signal.disconnect(id).unwrap();
        signal.emit(());

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_disconnect_invalid_id() {
        let signal = Signal::<()>::new();
        let id = signal.connect(|_| {});
        signal.disconnect(id).unwrap();

        // A second disconnect of the same ID is an error.
        assert!(signal.disconnect(id).is_err());
    }

    #[test]
    fn test_blocked_signal_skips_emit() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        signal.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        signal.set_blocked(true);
        assert!(signal.is_blocked());
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        signal.set_blocked(false);
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reentrant_disconnect_takes_effect_next_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let count = Arc::new(AtomicUsize::new(0));

        let sig = signal.clone();
        let c = count.clone();
        let id = Arc::new(Mutex::new(None));
        let id_slot = id.clone();
        let conn = signal.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            // Disconnect ourselves mid-emission.
            if let Some(own_id) = *id_slot.lock() {
                let _ = sig.disconnect(own_id);
            }
        });
        *id.lock() = Some(conn);

        signal.emit(());
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_scoped_connection_disconnects_on_drop() {
        let signal = Signal::<i32>::new();
        let count = Arc::new(AtomicUsize::new(0));
        {
            let c = count.clone();
            let _guard = signal.connect_scoped(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            });
            assert_eq!(signal.connection_count(), 1);
            signal.emit(7);
        }
        assert_eq!(signal.connection_count(), 0);
        signal.emit(8);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
