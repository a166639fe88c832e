//! # Lazy Singleton
//!
//! Thread-safe, lazily constructed singletons that are owned explicitly.
//!
//! A [`Singleton<T>`] holds one instance slot. The first call to
//! [`Singleton::get_instance`] runs the initializer; every later call, from any
//! thread, receives the same `Arc<T>` without taking a lock.
//!
//! ## Quick Start
//!
//! ```rust
//! use lazy_singleton::{BoxError, Singleton};
//! use std::sync::Arc;
//!
//! fn connect() -> Result<String, BoxError> {
//!     Ok("postgres://localhost/app".to_string())
//! }
//!
//! static DATABASE_URL: Singleton<String> = Singleton::new(connect);
//!
//! let url: Arc<String> = DATABASE_URL.get_instance().unwrap();
//! assert_eq!(&*url, "postgres://localhost/app");
//! ```
//!
//! ## Features
//!
//! - **Exactly-once construction**: concurrent first callers race to one initializer run
//! - **Explicit ownership**: holders can live in a `static` or be owned and injected
//! - **Failure policies**: retry after a failed initializer, or poison the holder
//! - **Tracing support**: `tracing` logs plus an optional per-holder event callback
//!
//! ## Main Items
//!
//! - [`Singleton`] - Thread-safe lazy holder
//! - [`LocalSingleton`] - Single-threaded lazy holder
//! - [`InstanceProvider`] - Injection seam implemented by holders and `Arc<T>`
//! - [`define_singleton!`] - Declare a process-wide singleton with free functions
//! - [`FailurePolicy`] - What happens after an initializer fails

mod failure_policy;
mod local;
mod macros;
mod provider;
mod singleton;
mod singleton_error;
mod singleton_event;

pub use failure_policy::{FailurePolicy, ParsePolicyError};
pub use local::LocalSingleton;
pub use provider::InstanceProvider;
pub use singleton::{InitFn, Singleton, TraceCallback};
pub use singleton_error::{BoxError, SharedCause, SingletonError};
pub use singleton_event::SingletonEvent;
