//! Observer registry for SDK events.

use parking_lot::RwLock;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// Error a listener may return; it is logged and otherwise ignored.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by a listener.
pub type ListenerResult = Result<(), ListenerError>;

type Handler<T> = Arc<dyn Fn(&T) -> ListenerResult + Send + Sync>;

/// Handlers for one event, invoked synchronously in registration order.
///
/// A handler that returns an error or panics is logged and skipped; the
/// remaining handlers still run and the emitter is unaffected.
///
/// # Example
///
/// ```
/// use dblapi_interface::Listeners;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// let posted = Listeners::<u64>::new("posted");
/// let total = Arc::new(AtomicU64::new(0));
/// let seen = total.clone();
/// posted.register(move |count| {
///     seen.fetch_add(*count, Ordering::SeqCst);
///     Ok(())
/// });
///
/// assert_eq!(posted.emit(&1500), 1);
/// assert_eq!(total.load(Ordering::SeqCst), 1500);
/// ```
pub struct Listeners<T> {
    event: &'static str,
    handlers: RwLock<Vec<Handler<T>>>,
}

impl<T> Listeners<T> {
    /// Create an empty registry for the named event.
    pub fn new(event: &'static str) -> Self {
        Self {
            event,
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Event name used in logs.
    pub fn event(&self) -> &'static str {
        self.event
    }

    /// Append a handler.
    pub fn register<F>(&self, handler: F)
    where
        F: Fn(&T) -> ListenerResult + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.write();
        handlers.push(Arc::new(handler));
        tracing::debug!(event = self.event, handlers = handlers.len(), "Registered listener");
    }

    /// Invoke every handler with `payload`.
    ///
    /// Returns the number of handlers that completed without error.
    pub fn emit(&self, payload: &T) -> usize {
        // Snapshot so a handler may register further handlers.
        let handlers: Vec<Handler<T>> = self.handlers.read().clone();
        let mut succeeded = 0;

        for (index, handler) in handlers.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                Ok(Ok(())) => succeeded += 1,
                Ok(Err(e)) => {
                    tracing::warn!(event = self.event, index, error = %e, "Listener returned an error");
                }
                Err(_) => {
                    tracing::error!(event = self.event, index, "Listener panicked");
                }
            }
        }

        succeeded
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    /// True when no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }
}

impl<T> std::fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("event", &self.event)
            .field("handlers", &self.len())
            .finish()
    }
}
