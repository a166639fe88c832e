//! Dependency-injection seam for lazily built instances.
//!
//! Consumers take `&impl InstanceProvider<T>` (or `&dyn InstanceProvider<T>`)
//! instead of reaching for a global. Production code passes a [`Singleton`],
//! tests pass a pre-built `Arc<T>` or their own provider.

use std::sync::Arc;

use crate::{BoxError, Singleton, SingletonError};

/// Source of the shared instance of `T`.
///
/// Only [`instance`](InstanceProvider::instance) must be implemented; the rest
/// has default implementations on top of it.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::{InstanceProvider, Singleton};
/// use std::sync::Arc;
///
/// struct Greeter {
///     name: String,
/// }
///
/// fn greet(greeter: &impl InstanceProvider<Greeter>) -> String {
///     let greeter = greeter.instance().unwrap();
///     format!("hello from {}", greeter.name)
/// }
///
/// let holder = Singleton::new(|| Ok(Greeter { name: "prod".to_string() }));
/// assert_eq!(greet(&holder), "hello from prod");
///
/// let double = Arc::new(Greeter { name: "test".to_string() });
/// assert_eq!(greet(&double), "hello from test");
/// ```
pub trait InstanceProvider<T: Send + Sync + 'static> {
    /// Returns the shared instance, building it if the provider is lazy.
    ///
    /// # Errors
    ///
    /// Whatever the underlying provider reports; a [`Singleton`] returns
    /// [`SingletonError`] when its initializer fails.
    fn instance(&self) -> Result<Arc<T>, SingletonError>;

    /// Returns an owned copy of the shared instance.
    fn instance_cloned(&self) -> Result<T, SingletonError>
    where
        T: Clone,
    {
        let arc = self.instance()?;
        Ok((*arc).clone())
    }
}

impl<T, F> InstanceProvider<T> for Singleton<T, F>
where
    T: Send + Sync + 'static,
    F: Fn() -> Result<T, BoxError>,
{
    fn instance(&self) -> Result<Arc<T>, SingletonError> {
        self.get_instance()
    }
}

/// An already built instance; never fails.
impl<T: Send + Sync + 'static> InstanceProvider<T> for Arc<T> {
    fn instance(&self) -> Result<Arc<T>, SingletonError> {
        Ok(Arc::clone(self))
    }
}

impl<T, P> InstanceProvider<T> for &P
where
    T: Send + Sync + 'static,
    P: InstanceProvider<T> + ?Sized,
{
    fn instance(&self) -> Result<Arc<T>, SingletonError> {
        (**self).instance()
    }
}
