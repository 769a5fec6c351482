//! Signal/slot system for Trellis.
//!
//! Signals are the notification mechanism between widgets and application
//! code. A [`Signal<Args>`] holds a set of connected slots (closures) and
//! invokes them synchronously, in connection order, when the signal is
//! emitted. Emission runs on the caller's thread; the UI event model is
//! sequential, so handlers always run to completion before the next event.
//!
//! # Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let clicked: Signal<()> = Signal::new();
//! let id = clicked.connect(|_| println!("clicked"));
//! clicked.emit(());
//! clicked.disconnect(id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Identifier for a single signal/slot connection.
    pub struct ConnectionId;
}

struct Connection<Args> {
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A typed signal with any number of connected slots.
///
/// `Args` is the payload delivered to each slot by reference. Signals with no
/// payload use `Signal<()>`.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    blocked: AtomicBool,
    emission_count: AtomicU64,
}

impl<Args> Signal<Args> {
    /// Create a signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
            emission_count: AtomicU64::new(0),
        }
    }

    /// Connect a slot. Returns the connection's ID for later disconnection.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connections.lock().insert(Connection {
            slot: Arc::new(slot),
        });
        tracing::trace!(target: "trellis_core::signal", ?id, "slot connected");
        id
    }

    /// Connect a slot with a guard that disconnects it when dropped.
    pub fn connect_with_guard<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            signal: self,
            id: self.connect(slot),
        }
    }

    /// Remove a connection. Returns true if it existed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let removed = self.connections.lock().remove(id).is_some();
        if removed {
            tracing::trace!(target: "trellis_core::signal", ?id, "slot disconnected");
        }
        removed
    }

    /// Remove every connection.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block or unblock emission. A blocked signal drops emits silently.
    pub fn set_blocked(&self, blocked: bool) -> bool {
        self.blocked.swap(blocked, Ordering::SeqCst)
    }

    /// Whether emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Number of times this signal has been emitted (ignores blocked emits).
    pub fn emission_count(&self) -> u64 {
        self.emission_count.load(Ordering::Relaxed)
    }

    /// Emit the signal, invoking every connected slot with `args`.
    ///
    /// Slots are cloned out of the connection map before invocation so a slot
    /// may connect or disconnect on this same signal without deadlocking.
    #[tracing::instrument(skip_all, target = "trellis_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "trellis_core::signal", "emit on blocked signal dropped");
            return;
        }
        self.emission_count.fetch_add(1, Ordering::Relaxed);

        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = self
            .connections
            .lock()
            .values()
            .map(|c| Arc::clone(&c.slot))
            .collect();

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

/// RAII guard for a signal connection.
///
/// Dropping the guard disconnects the slot, scoping an observer's lifetime to
/// the guard's.
pub struct ConnectionGuard<'a, Args> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<'_, Args> {
    /// The guarded connection's ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;
    use std::sync::atomic::AtomicUsize;

    assert_impl_all!(Signal<i32>: Send, Sync);
    assert_impl_all!(Signal<String>: Send, Sync);

    #[test]
    fn test_connect_and_emit() {
        let signal: Signal<i32> = Signal::new();
        let fired = Arc::new(AtomicBool::new(false));

        let fired_clone = Arc::clone(&fired);
        signal.connect(move |value| {
            assert_eq!(*value, 7);
            fired_clone.store(true, Ordering::SeqCst);
        });

        signal.emit(7);
        assert!(fired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let signal: Signal<()> = Signal::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let order = Arc::clone(&order);
            signal.connect(move |_| order.lock().push(i));
        }

        signal.emit(());
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_disconnect() {
        let signal: Signal<()> = Signal::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = Arc::clone(&count);
        let id = signal.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(());
        assert!(signal.disconnect(id));
        signal.emit(());

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!signal.disconnect(id));
    }

    #[test]
    fn test_disconnect_all() {
        let signal: Signal<()> = Signal::new();
        signal.connect(|_| {});
        signal.connect(|_| {});
        assert_eq!(signal.connection_count(), 2);

        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_blocked_signal_drops_emits() {
        let signal: Signal<()> = Signal::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = Arc::clone(&count);
        signal.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!signal.set_blocked(true));
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        assert!(signal.set_blocked(false));
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_connection_guard_disconnects_on_drop() {
        let signal: Signal<()> = Signal::new();
        {
            let _guard = signal.connect_with_guard(|_| {});
            assert_eq!(signal.connection_count(), 1);
        }
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_emission_count() {
        let signal: Signal<()> = Signal::new();
        signal.emit(());
        signal.emit(());
        signal.set_blocked(true);
        signal.emit(());
        assert_eq!(signal.emission_count(), 2);
    }

    #[test]
    fn test_slot_may_disconnect_during_emit() {
        let signal: Arc<Signal<()>> = Arc::new(Signal::new());

        let signal_clone = Arc::clone(&signal);
        let id_cell = Arc::new(Mutex::new(None::<ConnectionId>));
        let id_cell_clone = Arc::clone(&id_cell);
        let id = signal.connect(move |_| {
            if let Some(id) = *id_cell_clone.lock() {
                signal_clone.disconnect(id);
            }
        });
        *id_cell.lock() = Some(id);

        // Must not deadlock.
        signal.emit(());
        assert_eq!(signal.connection_count(), 0);
    }
}
