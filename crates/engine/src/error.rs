//! Mid-trace failures

use callscope_core::CallId;
use thiserror::Error;

/// Failure raised by [`crate::Evaluator::step`]
///
/// Unlike validation errors these surface after events have already been
/// emitted. `Overflow` and `Internal` poison the evaluator: every later
/// step returns the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// Checked arithmetic overflowed while computing an activation's value
    #[error("arithmetic overflow in activation {call_id}: {operation}")]
    Overflow {
        /// Activation whose computation overflowed
        call_id: CallId,
        /// The failed operation, e.g. `"21 * 2432902008176640000"`
        operation: String,
    },

    /// Activation state no algorithm can produce (bug or invariant violation)
    #[error("internal trace error in activation {call_id}: {reason}")]
    Internal {
        /// Activation in the impossible state
        call_id: CallId,
        /// What was wrong
        reason: String,
    },

    /// `step` called after the final result was already produced
    #[error("evaluator already produced its final result")]
    Exhausted,
}
