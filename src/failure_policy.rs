//! What a holder does after its initializer fails.

use std::fmt;
use std::str::FromStr;

/// Behavior of a [`Singleton`](crate::Singleton) after a failed construction attempt.
///
/// The caller that triggered the attempt always receives
/// [`SingletonError::ConstructionFailure`](crate::SingletonError::ConstructionFailure).
/// The policy only decides what *later* callers see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FailurePolicy {
    /// Leave the slot empty; the next caller runs the initializer again.
    #[default]
    Retry,
    /// Record the failure; every later caller gets
    /// [`SingletonError::Poisoned`](crate::SingletonError::Poisoned).
    Poison,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Retry => write!(f, "retry"),
            FailurePolicy::Poison => write!(f, "poison"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown failure policy '{0}', expected 'retry' or 'poison'")]
pub struct ParsePolicyError(String);

impl FromStr for FailurePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retry" => Ok(FailurePolicy::Retry),
            "poison" => Ok(FailurePolicy::Poison),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_retry() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Retry);
    }

    #[test]
    fn test_parse() {
        assert_eq!("retry".parse::<FailurePolicy>(), Ok(FailurePolicy::Retry));
        assert_eq!(" Poison ".parse::<FailurePolicy>(), Ok(FailurePolicy::Poison));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "panic".parse::<FailurePolicy>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown failure policy 'panic', expected 'retry' or 'poison'"
        );
    }

    #[test]
    fn test_display_matches_parse() {
        for policy in [FailurePolicy::Retry, FailurePolicy::Poison] {
            assert_eq!(policy.to_string().parse::<FailurePolicy>(), Ok(policy));
        }
    }
}
