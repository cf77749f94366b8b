//! Controller errors

use callscope_core::ValidationError;
use callscope_engine::TraceError;
use thiserror::Error;

use crate::controller::ControllerState;

/// Errors surfaced by the [`crate::Controller`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input rejected at evaluator construction; controller stays Idle
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Command not valid in the current state; nothing changed
    #[error("cannot {command} while {state}")]
    InvalidTransition {
        /// Command that was refused
        command: &'static str,
        /// State the controller was in
        state: ControllerState,
    },

    /// Evaluator failed mid-trace; controller froze to Paused
    #[error("trace failed: {0}")]
    Trace(#[from] TraceError),

    /// `start` or `step` with nothing selected
    #[error("no algorithm selected")]
    NoSelection,
}

/// Result type for controller operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the caller can simply retry with corrected input or state
    ///
    /// Trace errors need a `reset` first.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Trace(_))
    }

    /// Check if this is an invalid-transition error
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Error::InvalidTransition { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
