//! Validation errors raised before any event is emitted.

use thiserror::Error;

use crate::algorithm::Algorithm;

/// Input outside an algorithm's domain.
///
/// Always raised synchronously at evaluator construction, never mid-trace.
/// These errors are recoverable: the caller may retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A parameter that must be non-negative was negative
    #[error("{name} must be non-negative, got {value}")]
    Negative {
        /// Parameter name (e.g. "n", "exponent")
        name: &'static str,
        /// The rejected value
        value: i64,
    },

    /// A token in textual input did not parse as an integer
    #[error("not an integer: {input:?}")]
    NotAnInteger {
        /// The offending token
        input: String,
    },

    /// Array input with no elements
    #[error("array input must contain at least one element")]
    EmptyArray,

    /// Wrong number of arguments for the selected algorithm
    #[error("{algorithm} takes {expected} argument(s), got {found}")]
    Arity {
        /// Algorithm the input was parsed for
        algorithm: Algorithm,
        /// Required argument count
        expected: usize,
        /// Argument count supplied
        found: usize,
    },

    /// Algorithm name not in the catalogue
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}
