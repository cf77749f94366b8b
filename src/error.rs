//! Unified error type for callscope.
//!
//! Wraps the errors of each layer so callers of the facade match on one
//! enum.

use callscope_core::ValidationError;
use callscope_engine::TraceError;
use thiserror::Error;

/// All callscope errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input outside the algorithm's domain
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Evaluation failed part way through
    #[error("trace failed: {0}")]
    Trace(#[from] TraceError),

    /// Controller refused a command in its current state
    #[error("{0}")]
    InvalidTransition(String),

    /// Controller had nothing selected
    #[error("no algorithm selected")]
    NoSelection,
}

/// Result type for callscope operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this error came from arithmetic overflow.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Error::Trace(TraceError::Overflow { .. }))
    }
}

// Flatten controller errors so validation and trace failures keep one shape
impl From<callscope_executor::Error> for Error {
    fn from(e: callscope_executor::Error) -> Self {
        use callscope_executor::Error as ControllerError;
        match e {
            ControllerError::Validation(v) => Error::Validation(v),
            ControllerError::Trace(t) => Error::Trace(t),
            ControllerError::NoSelection => Error::NoSelection,
            err @ ControllerError::InvalidTransition { .. } => {
                Error::InvalidTransition(err.to_string())
            }
        }
    }
}
