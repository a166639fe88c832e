//! A thread-safe holder that builds its value on first use.
//!
//! `Singleton<T, F>` owns one instance slot. The first caller of
//! [`Singleton::get_instance`] runs the initializer; everybody else gets the same
//! `Arc<T>`. Once the slot is occupied, reads never take a lock.
//!
//! # Examples
//!
//! ```
//! use lazy_singleton::{BoxError, Singleton};
//! use std::sync::Arc;
//!
//! struct Settings {
//!     endpoint: String,
//! }
//!
//! fn load() -> Result<Settings, BoxError> {
//!     Ok(Settings { endpoint: "https://api.example.com".to_string() })
//! }
//!
//! static SETTINGS: Singleton<Settings> = Singleton::new(load);
//!
//! let a = SETTINGS.get_instance().unwrap();
//! let b = SETTINGS.get_instance().unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//! assert_eq!(a.endpoint, "https://api.example.com");
//! ```

use std::{
    fmt,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use crate::{BoxError, FailurePolicy, SingletonError, SingletonEvent};

/// Type alias for the user-supplied tracing callback.
///
/// It must be thread-safe because the holder may be shared across threads.
pub type TraceCallback = dyn Fn(&SingletonEvent) + Send + Sync + 'static;

/// Initializer type used when none is named, so `static` items can be written as `Singleton<T>`.
pub type InitFn<T> = fn() -> Result<T, BoxError>;

/// Lazily constructed, process-scoped instance of `T`.
///
/// The holder can live in a `static`, or be owned by an application context and
/// handed to consumers by reference (see [`InstanceProvider`](crate::InstanceProvider)).
///
/// The initializer must not call `get_instance` on the holder it belongs to;
/// doing so deadlocks, just like re-entering a `LazyLock`.
pub struct Singleton<T, F = InitFn<T>> {
    slot: OnceLock<Arc<T>>,
    // Construction lock. The payload is the recorded failure under `FailurePolicy::Poison`.
    init_lock: Mutex<Option<SingletonError>>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
    policy: FailurePolicy,
    init: F,
}

impl<T, F> Singleton<T, F> {
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Returns the instance if it has been built, without building it.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Empties the slot and forgets any recorded failure.
    ///
    /// Requires exclusive access, so it can never race with `get_instance`.
    /// Handles already given out stay valid.
    pub fn take(&mut self) -> Option<Arc<T>> {
        *self
            .init_lock
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner) = None;

        let taken = self.slot.take();
        if taken.is_some() {
            self.emit_event(&SingletonEvent::Reset {
                type_name: std::any::type_name::<T>(),
            });
        }
        taken
    }

    // ---------------------------------------------------------------------------------------------
    // Tracing
    // ---------------------------------------------------------------------------------------------

    /// Sets a callback invoked on every slow-path transition of this holder.
    ///
    /// The callback runs while the construction lock is held and must not call
    /// back into the same holder.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// A poisoned trace lock is recovered; the callback slot holds no invariants.
    pub fn set_trace_callback(&self, callback: impl Fn(&SingletonEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(callback));
    }

    /// Clears the tracing callback.
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    fn emit_event(&self, event: &SingletonEvent) {
        let guard = self.trace.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(callback) = guard.as_ref() {
            callback(event);
        }
    }
}

impl<T, F> Singleton<T, F>
where
    T: Send + Sync + 'static,
    F: Fn() -> Result<T, BoxError>,
{
    /// Creates an empty holder with the [`FailurePolicy::Retry`] policy.
    pub const fn new(init: F) -> Self {
        Self::with_policy(init, FailurePolicy::Retry)
    }

    /// Creates an empty holder with an explicit failure policy.
    ///
    /// ```
    /// use lazy_singleton::{BoxError, FailurePolicy, Singleton};
    ///
    /// fn connect() -> Result<u16, BoxError> {
    ///     Err("connection refused".into())
    /// }
    ///
    /// static PORT: Singleton<u16> = Singleton::with_policy(connect, FailurePolicy::Poison);
    ///
    /// assert!(!PORT.get_instance().unwrap_err().is_poisoned());
    /// assert!(PORT.get_instance().unwrap_err().is_poisoned());
    /// ```
    pub const fn with_policy(init: F, policy: FailurePolicy) -> Self {
        Singleton {
            slot: OnceLock::new(),
            init_lock: Mutex::new(None),
            trace: Mutex::new(None),
            policy,
            init,
        }
    }

    /// Returns the shared instance, building it first if no caller has yet.
    ///
    /// Concurrent first callers block on the construction lock; exactly one of
    /// them runs the initializer and the rest receive its result.
    ///
    /// # Errors
    ///
    /// - [`SingletonError::ConstructionFailure`] for the caller whose attempt failed.
    /// - [`SingletonError::Poisoned`] for later callers, under [`FailurePolicy::Poison`].
    ///
    /// # Panics
    ///
    /// A panic in the initializer propagates to the caller that ran it. The slot
    /// stays empty and the next caller tries again.
    pub fn get_instance(&self) -> Result<Arc<T>, SingletonError> {
        // Acquire load: a non-empty slot is fully constructed.
        if let Some(instance) = self.slot.get() {
            return Ok(Arc::clone(instance));
        }
        self.construct()
    }

    #[cold]
    fn construct(&self) -> Result<Arc<T>, SingletonError> {
        let type_name = std::any::type_name::<T>();

        // A panicking initializer poisons the mutex but leaves the slot empty
        // and the failure record untouched, so the guard is safe to reuse.
        let mut failure = self
            .init_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Someone else finished while we were waiting.
        if let Some(instance) = self.slot.get() {
            return Ok(Arc::clone(instance));
        }

        if let Some(err) = failure.as_ref() {
            tracing::warn!(type_name, "singleton is poisoned, rejecting caller");
            self.emit_event(&SingletonEvent::Rejected { type_name });
            return Err(err.clone());
        }

        tracing::debug!(type_name, policy = %self.policy, "constructing singleton");
        self.emit_event(&SingletonEvent::Construct { type_name });

        match (self.init)() {
            Ok(value) => {
                // Release store, published while the lock is still held.
                let instance = Arc::clone(self.slot.get_or_init(|| Arc::new(value)));
                tracing::debug!(type_name, "singleton constructed");
                self.emit_event(&SingletonEvent::Constructed { type_name });
                Ok(instance)
            }
            Err(cause) => {
                let err = SingletonError::construction::<T>(cause);
                let poisoned = self.policy == FailurePolicy::Poison;
                if poisoned {
                    *failure = Some(err.clone().into_poisoned());
                }
                tracing::warn!(type_name, policy = %self.policy, error = %err, "singleton construction failed");
                self.emit_event(&SingletonEvent::Failed {
                    type_name,
                    poisoned,
                });
                Err(err)
            }
        }
    }
}

impl<T: Default + Send + Sync + 'static> Default for Singleton<T> {
    fn default() -> Self {
        Singleton::new(|| Ok(T::default()))
    }
}

impl<T, F> fmt::Debug for Singleton<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Singleton")
            .field("type_name", &std::any::type_name::<T>())
            .field("policy", &self.policy)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
