//! Error types for the Time and Leave Accounting Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The taxonomy is fixed: not-found for unresolvable ids, conflict for
//! duplicate-state violations, validation for business-rule violations, and
//! forbidden for authority failures. Every guard in the engine is evaluated
//! before any mutation, so a returned error implies no partial state change.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the Time and Leave Accounting Engine.
///
/// # Example
///
/// ```
/// use hr_engine::error::EngineError;
///
/// let error = EngineError::validation("insufficient leave balance");
/// assert_eq!(error.to_string(), "Validation error: insufficient leave balance");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An employee id did not resolve.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        id: Uuid,
    },

    /// A leave type code did not resolve.
    #[error("Leave type not found: {code}")]
    LeaveTypeNotFound {
        /// The leave type code that was not found.
        code: String,
    },

    /// A leave request id did not resolve.
    #[error("Leave request not found: {id}")]
    RequestNotFound {
        /// The leave request id that was not found.
        id: Uuid,
    },

    /// A regularization id did not resolve.
    #[error("Regularization not found: {id}")]
    RegularizationNotFound {
        /// The regularization id that was not found.
        id: Uuid,
    },

    /// A comp-off grant id did not resolve.
    #[error("Comp-off grant not found: {id}")]
    CompOffNotFound {
        /// The comp-off grant id that was not found.
        id: Uuid,
    },

    /// The operation would duplicate state that must be unique, such as a
    /// second open clock entry or a second pending regularization for the
    /// same day.
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the conflicting state.
        message: String,
    },

    /// A business rule was violated.
    #[error("Validation error: {message}")]
    Validation {
        /// A description of the violated rule.
        message: String,
    },

    /// The actor lacks the authority for the attempted operation.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// A description of the missing authority.
        message: String,
    },
}

impl EngineError {
    /// Creates a [`EngineError::Conflict`] from any displayable message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a [`EngineError::Validation`] from any displayable message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a [`EngineError::Forbidden`] from any displayable message.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
