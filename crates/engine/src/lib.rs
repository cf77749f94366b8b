//! Traced evaluation for callscope
//!
//! The [`Evaluator`] runs one recursive algorithm as an explicit state
//! machine over a work stack of activation records. Each call to
//! [`Evaluator::step`] advances to exactly one emission point:
//!
//! ```text
//! Enter    -> emit Call for the top activation
//! Continue -> base case or all child results in: emit Return, pop,
//!             hand the value to the parent
//!          -> otherwise push the next child and emit its Call
//! ```
//!
//! After the root's Return the next step yields [`Step::Done`] with the
//! final result. The evaluator never performs I/O or timing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod evaluator;
mod frame;
pub mod reference;

pub use error::TraceError;
pub use evaluator::{create_evaluator, Evaluator, Step};
