//! Typed failures for element and registry operations.
//!
//! Two failure surfaces exist side by side. The `try_*` operations return
//! booleans for expected contention (slot already taken, cap reached) and
//! never allocate an error. The typed errors here signal malformed input
//! from the caller: negative deltas, inverted bounds, assignments outside
//! an element's range, lookups of unregistered ids. Frozen elements are a
//! third case — they silently ignore mutation, because freezing is a lock,
//! not a fault.

use core::fmt;

/// Coarse classification of an error, independent of variant details.
///
/// Callers that only care about the failure class (reject vs. diagnose vs.
/// re-register) can branch on this instead of matching every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed input: negative delta, inverted bounds, bad initial stack.
    InvalidArgument,

    /// An explicit stack assignment fell outside the element's bounds.
    StackOutOfBound,

    /// A lookup or mutation referenced an id absent from the registry.
    NotFound,
}

/// Errors produced by element construction and stack mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementError {
    /// Stack deltas are magnitudes; direction comes from add vs. remove.
    #[error("stack delta {delta} is negative; deltas must be non-negative")]
    NegativeDelta { delta: i32 },

    /// Exclusive elements are presence/absence only.
    #[error("exclusive element cannot start with {stack} stacks; only 0 or 1 allowed")]
    ExclusiveInitialStack { stack: i32 },

    #[error("initial stack {stack} is outside {min}..={max}")]
    InitialStackOutOfBounds { stack: i32, min: i32, max: i32 },

    #[error("requested bounds {requested_min}..={requested_max} are inverted")]
    InvertedBounds { requested_min: i32, requested_max: i32 },

    #[error(
        "stack is {current}, setting it to {requested} was rejected; allowed range is {min}..={max}"
    )]
    StackOutOfBound {
        current: i32,
        requested: i32,
        min: i32,
        max: i32,
    },
}

impl ElementError {
    /// The coarse classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NegativeDelta { .. }
            | Self::ExclusiveInitialStack { .. }
            | Self::InitialStackOutOfBounds { .. }
            | Self::InvertedBounds { .. } => ErrorKind::InvalidArgument,
            Self::StackOutOfBound { .. } => ErrorKind::StackOutOfBound,
        }
    }
}

/// Errors produced by keyed registries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError<I: fmt::Debug> {
    /// No element is registered under the requested id.
    #[error("no element registered under id {id:?}")]
    NotFound { id: I },

    /// A mutation delegated to the element failed.
    #[error(transparent)]
    Element(#[from] ElementError),
}

impl<I: fmt::Debug> HandlerError<I> {
    /// The coarse classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Element(inner) => inner.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_errors_classify_as_invalid_argument() {
        assert_eq!(
            ElementError::NegativeDelta { delta: -3 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            ElementError::InvertedBounds {
                requested_min: 5,
                requested_max: 2
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn out_of_bound_and_not_found_keep_their_own_kinds() {
        let out_of_bound = ElementError::StackOutOfBound {
            current: 3,
            requested: 1000,
            min: 0,
            max: 999,
        };
        assert_eq!(out_of_bound.kind(), ErrorKind::StackOutOfBound);

        let not_found: HandlerError<&str> = HandlerError::NotFound { id: "slow" };
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let delegated: HandlerError<&str> = HandlerError::Element(out_of_bound);
        assert_eq!(delegated.kind(), ErrorKind::StackOutOfBound);
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(ErrorKind::InvalidArgument.as_ref(), "invalid_argument");
        assert_eq!(ErrorKind::StackOutOfBound.to_string(), "stack_out_of_bound");
    }
}
