//! Error types for Trellis core.
//!
//! Fallible framework operations return [`Result`] with a [`TrellisError`].
//! Widget-level conditions that are ordinary steady states (for example text
//! that does not parse in a validating field) are not errors and never appear
//! here.

use std::fmt;

use crate::object::ObjectError;

/// Top-level error type for the framework core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrellisError {
    /// An object system error (invalid ID, bad parentage, missing registry).
    Object(ObjectError),
}

impl fmt::Display for TrellisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(err) => write!(f, "object error: {}", err),
        }
    }
}

impl std::error::Error for TrellisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Object(err) => Some(err),
        }
    }
}

impl From<ObjectError> for TrellisError {
    fn from(err: ObjectError) -> Self {
        Self::Object(err)
    }
}

/// Convenience alias for results with [`TrellisError`].
pub type Result<T> = std::result::Result<T, TrellisError>;
