//! Core types for callscope
//!
//! This crate defines the vocabulary shared by every other layer:
//! - [`TraceEvent`]: the unit of observation emitted at each call and return
//! - [`Algorithm`]: the fixed catalogue of traceable recursive algorithms
//! - [`Input`]: validated arguments for one algorithm run
//! - [`ValidationError`]: construction-time domain failures
//!
//! Nothing here performs evaluation; see `callscope-engine` for that.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithm;
pub mod error;
pub mod event;
pub mod input;

pub use algorithm::{Algorithm, AlgorithmDescriptor};
pub use error::ValidationError;
pub use event::{CallId, EventKind, Locals, TraceEvent};
pub use input::Input;
