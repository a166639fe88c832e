//! Macros for declaring process-wide singletons.
//!
//! Each invocation produces its own module with a private holder, so singletons
//! declared this way never share state.

/// Declares a process-wide singleton with a single macro invocation.
///
/// The macro generates a module containing:
/// - A private `static` [`Singleton`](crate::Singleton) holder
/// - Free functions delegating to it (`get_instance`, `get`, `is_initialized`,
///   `set_trace_callback`, `clear_trace_callback`)
/// - `holder()`, returning the holder itself for injection into consumers
///
/// The generated module imports its parent's items, so the type and the
/// initializer can be named as they are where the macro is invoked. The
/// initializer must be a function or a non-capturing closure.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::{define_singleton, BoxError};
/// use std::sync::Arc;
///
/// pub struct Config {
///     pub workers: usize,
/// }
///
/// fn load_config() -> Result<Config, BoxError> {
///     Ok(Config { workers: 4 })
/// }
///
/// define_singleton!(config: Config = load_config);
///
/// fn main() {
///     let a: Arc<Config> = config::get_instance().unwrap();
///     let b: Arc<Config> = config::get_instance().unwrap();
///     assert!(Arc::ptr_eq(&a, &b));
///     assert_eq!(a.workers, 4);
/// }
/// ```
///
/// # Failure Policy
///
/// ```rust
/// use lazy_singleton::{define_singleton, FailurePolicy};
///
/// define_singleton!(port: u16 = || Err("no port configured".into()), policy = FailurePolicy::Poison);
///
/// fn main() {
///     assert!(!port::get_instance().unwrap_err().is_poisoned());
///     assert!(port::get_instance().unwrap_err().is_poisoned());
/// }
/// ```
///
/// # Injection
///
/// ```rust
/// use lazy_singleton::{define_singleton, InstanceProvider};
///
/// define_singleton!(greeting: String = || Ok("hello".to_string()));
///
/// fn shout(source: &impl InstanceProvider<String>) -> String {
///     source.instance().unwrap().to_uppercase()
/// }
///
/// assert_eq!(shout(greeting::holder()), "HELLO");
/// ```
#[macro_export]
macro_rules! define_singleton {
    ($name:ident : $ty:ty = $init:expr) => {
        $crate::define_singleton!($name: $ty = $init, policy = $crate::FailurePolicy::Retry);
    };
    ($name:ident : $ty:ty = $init:expr, policy = $policy:expr) => {
        #[allow(dead_code)]
        pub mod $name {
            #[allow(unused_imports)]
            use super::*;

            // Holder for the instance (module-private)
            static HOLDER: $crate::Singleton<$ty> = $crate::Singleton::with_policy($init, $policy);

            /// The holder behind this module, for passing to consumers.
            pub fn holder() -> &'static $crate::Singleton<$ty> {
                &HOLDER
            }

            /// Return the shared instance, building it on first use.
            pub fn get_instance() -> ::std::result::Result<::std::sync::Arc<$ty>, $crate::SingletonError> {
                HOLDER.get_instance()
            }

            /// Return the instance if it has already been built.
            pub fn get() -> ::std::option::Option<::std::sync::Arc<$ty>> {
                HOLDER.get()
            }

            /// Check whether the instance has been built.
            pub fn is_initialized() -> bool {
                HOLDER.is_initialized()
            }

            /// Set a tracing callback for this singleton.
            pub fn set_trace_callback(callback: impl Fn(&$crate::SingletonEvent) + Send + Sync + 'static) {
                HOLDER.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                HOLDER.clear_trace_callback()
            }
        }
    };
}
