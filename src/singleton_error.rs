use std::error::Error;
use std::sync::Arc;

/// Boxed error returned by initializer functions.
///
/// Any error type can be turned into it with `?` or `.into()`.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Shared cause attached to a [`SingletonError`].
///
/// Held behind an `Arc` so one recorded failure can be handed to every caller.
pub type SharedCause = Arc<dyn Error + Send + Sync>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SingletonError {
    /// The one construction attempt for `type_name` failed.
    #[error("failed to construct singleton {type_name}: {source}")]
    ConstructionFailure {
        type_name: &'static str,
        source: SharedCause,
    },

    /// An earlier attempt failed and the holder refuses to retry.
    #[error("singleton {type_name} is poisoned by an earlier failure: {source}")]
    Poisoned {
        type_name: &'static str,
        source: SharedCause,
    },
}

impl SingletonError {
    pub(crate) fn construction<T>(cause: BoxError) -> Self {
        SingletonError::ConstructionFailure {
            type_name: std::any::type_name::<T>(),
            source: Arc::from(cause),
        }
    }

    /// Turns a construction failure into the error later callers receive.
    pub(crate) fn into_poisoned(self) -> Self {
        match self {
            SingletonError::ConstructionFailure { type_name, source } => {
                SingletonError::Poisoned { type_name, source }
            }
            poisoned => poisoned,
        }
    }

    /// Name of the type whose construction failed.
    pub fn type_name(&self) -> &'static str {
        match self {
            SingletonError::ConstructionFailure { type_name, .. }
            | SingletonError::Poisoned { type_name, .. } => type_name,
        }
    }

    /// The initializer's original error.
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        match self {
            SingletonError::ConstructionFailure { source, .. }
            | SingletonError::Poisoned { source, .. } => source.as_ref(),
        }
    }

    pub fn is_poisoned(&self) -> bool {
        matches!(self, SingletonError::Poisoned { .. })
    }
}
