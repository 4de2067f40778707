//! Error types for strata-state operations.

use thiserror::Error;

/// Result type alias for strata-state operations.
pub type StrataResult<T> = Result<T, StrataError>;

/// Errors that can occur during reducer composition or dispatch.
///
/// Both variants are fatal: a `Shape` error means the reducer map is
/// misconfigured and composition aborts; an `UndefinedSlice` error means a
/// reducer broke its contract during a live dispatch and the resulting
/// state cannot be trusted. Neither is caught or retried internally.
#[derive(Debug, Error)]
pub enum StrataError {
    /// A reducer produced no slice when probed with the init action at
    /// composition time. The reducer does not know how to initialize its
    /// slice, so the composed reducer would be unusable.
    #[error(
        "reducer \"{key}\" returned no state when probed with the init action; \
         it must produce an initial slice when given absent input"
    )]
    Shape {
        /// The reducer map key that failed the probe.
        key: String,
    },

    /// A reducer produced no slice for a real action during dispatch.
    #[error(
        "reducer \"{key}\" returned no state for action \"{action_kind}\"; \
         reducers must return their current slice for actions they ignore"
    )]
    UndefinedSlice {
        /// The reducer map key that produced no slice.
        key: String,
        /// The kind of the action being dispatched.
        action_kind: String,
    },
}

impl StrataError {
    /// Create a shape error for the given key.
    #[inline]
    pub fn shape(key: impl Into<String>) -> Self {
        StrataError::Shape { key: key.into() }
    }

    /// Create an undefined-slice error for the given key and action kind.
    #[inline]
    pub fn undefined_slice(key: impl Into<String>, action_kind: impl Into<String>) -> Self {
        StrataError::UndefinedSlice {
            key: key.into(),
            action_kind: action_kind.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_display() {
        let err = StrataError::shape("counter");
        let msg = err.to_string();
        assert!(msg.contains("counter"));
        assert!(msg.contains("init action"));
    }

    #[test]
    fn test_undefined_slice_display_names_key_and_action() {
        let err = StrataError::undefined_slice("todos", "ADD_TODO");
        let msg = err.to_string();
        assert!(msg.contains("todos"));
        assert!(msg.contains("ADD_TODO"));
    }
}
