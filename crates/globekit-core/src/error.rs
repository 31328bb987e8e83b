//! Error handling for GlobeKit
//!
//! Provides the error types shared by the drawing subsystem:
//! - Argument errors (malformed shape kinds, options, coordinates)
//! - Gesture lifecycle errors (overlapping draws)
//!
//! The event registry keeps its own error type next to the registry
//! (see [`crate::events`]). All error types use `thiserror`.

use thiserror::Error;

/// Drawing subsystem error type
///
/// Every failure is detected synchronously, before any gesture state is
/// mutated or any handler is installed. Pick misses are not errors; they
/// are silently ignored by the capture protocols.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// A caller-supplied argument failed validation
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// The argument or option field that failed validation.
        argument: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A gesture is already being captured
    #[error("A {kind} gesture is already in progress")]
    GestureInProgress {
        /// The shape kind of the active gesture.
        kind: String,
    },
}

impl DrawError {
    /// Shorthand for an [`DrawError::InvalidArgument`] with owned strings.
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for drawing operations
pub type Result<T> = std::result::Result<T, DrawError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DrawError::invalid_argument("layer", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'layer': must not be empty"
        );

        let err = DrawError::GestureInProgress {
            kind: "Polygon".to_string(),
        };
        assert_eq!(err.to_string(), "A Polygon gesture is already in progress");
    }
}
