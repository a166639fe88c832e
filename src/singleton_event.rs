/// Events emitted by a [`Singleton`](crate::Singleton) on its slow path.
///
/// These events are passed to the callback set via `set_trace_callback`.
/// Reads served by an already initialized holder emit nothing.
///
/// # Examples
///
/// ```rust
/// use lazy_singleton::SingletonEvent;
///
/// let event = SingletonEvent::Construct { type_name: "i32" };
/// assert_eq!(event.to_string(), "construct { type_name: i32 }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingletonEvent {
    /// The initializer is about to run.
    Construct {
        /// The type name of the value being built (e.g., "i32", "alloc::string::String")
        type_name: &'static str,
    },

    /// The initializer finished and the instance was published.
    Constructed { type_name: &'static str },

    /// The initializer returned an error.
    Failed {
        type_name: &'static str,
        /// Whether the failure poisoned the holder.
        poisoned: bool,
    },

    /// A caller was turned away by a poisoned holder.
    Rejected { type_name: &'static str },

    /// The slot was emptied through `take`.
    Reset { type_name: &'static str },
}

impl std::fmt::Display for SingletonEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SingletonEvent::Construct { type_name } => {
                write!(f, "construct {{ type_name: {type_name} }}")
            }
            SingletonEvent::Constructed { type_name } => {
                write!(f, "constructed {{ type_name: {type_name} }}")
            }
            SingletonEvent::Failed {
                type_name,
                poisoned,
            } => {
                write!(
                    f,
                    "failed {{ type_name: {type_name}, poisoned: {poisoned} }}"
                )
            }
            SingletonEvent::Rejected { type_name } => {
                write!(f, "rejected {{ type_name: {type_name} }}")
            }
            SingletonEvent::Reset { type_name } => write!(f, "reset {{ type_name: {type_name} }}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_event_display() {
        let event = SingletonEvent::Construct { type_name: "i32" };
        assert_eq!(event.to_string(), "construct { type_name: i32 }");

        let event = SingletonEvent::Constructed {
            type_name: "String",
        };
        assert_eq!(event.to_string(), "constructed { type_name: String }");

        let event = SingletonEvent::Failed {
            type_name: "u8",
            poisoned: false,
        };
        assert_eq!(event.to_string(), "failed { type_name: u8, poisoned: false }");

        let event = SingletonEvent::Rejected { type_name: "u8" };
        assert_eq!(event.to_string(), "rejected { type_name: u8 }");

        let event = SingletonEvent::Reset { type_name: "u16" };
        assert_eq!(event.to_string(), "reset { type_name: u16 }");
    }

    #[test]
    fn test_singleton_event_clone() {
        let event = SingletonEvent::Failed {
            type_name: "i32",
            poisoned: true,
        };
        let cloned = event.clone();
        assert_eq!(event, cloned);
    }
}
