//! Single-threaded lazy holder.
//!
//! The plain "check, then construct" form: no lock, no atomics, and therefore
//! `!Sync`. Use it for per-thread or per-context state where a
//! [`Singleton`](crate::Singleton) would only add synchronization cost.

use std::cell::OnceCell;
use std::fmt;

use crate::{BoxError, SingletonError};

/// Lazily constructed instance of `T` for use from one thread.
///
/// Always behaves like [`FailurePolicy::Retry`](crate::FailurePolicy::Retry):
/// a failed attempt leaves the slot empty.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::LocalSingleton;
///
/// let primes = LocalSingleton::new(|| Ok(vec![2, 3, 5]));
///
/// let a = primes.get_instance().unwrap();
/// let b = primes.get_instance().unwrap();
/// assert!(std::ptr::eq(a, b));
/// ```
pub struct LocalSingleton<T, F = fn() -> Result<T, BoxError>> {
    slot: OnceCell<T>,
    init: F,
}

impl<T, F> LocalSingleton<T, F>
where
    F: Fn() -> Result<T, BoxError>,
{
    pub const fn new(init: F) -> Self {
        LocalSingleton {
            slot: OnceCell::new(),
            init,
        }
    }

    /// Returns the instance, building it on first use.
    ///
    /// If the initializer itself reaches this holder and fills it first, the
    /// value stored first wins and the later one is dropped.
    ///
    /// # Errors
    ///
    /// [`SingletonError::ConstructionFailure`] when the initializer fails.
    pub fn get_instance(&self) -> Result<&T, SingletonError> {
        if let Some(instance) = self.slot.get() {
            return Ok(instance);
        }

        let value = (self.init)().map_err(SingletonError::construction::<T>)?;
        Ok(self.slot.get_or_init(|| value))
    }
}

impl<T, F> LocalSingleton<T, F> {
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }
}

impl<T, F> fmt::Debug for LocalSingleton<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSingleton")
            .field("type_name", &std::any::type_name::<T>())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
