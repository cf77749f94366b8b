//! Execution control for callscope
//!
//! The [`Controller`] owns at most one [`callscope_engine::Evaluator`] and
//! paces pulls from it, forwarding every event to its projections and to any
//! registered [`TraceSink`]s.
//!
//! ## State machine
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//! Idle --step---> Paused  (one pull)  Paused --step--> Paused
//! Running --pull yields Done--> Completed
//! any --reset--> Idle
//! ```
//!
//! Two front doors are offered: typed methods (`start`, `step`, ...) and the
//! [`Command`]/[`Output`] dispatch used by the CLI.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
mod controller;
mod error;
mod options;
pub mod sink;

pub use command::{Command, ControllerStatus, Output};
pub use controller::{Controller, ControllerState};
pub use error::{Error, Result};
pub use options::ControllerOptions;
pub use sink::{
    CallNode, CallStack, CallTree, HistoryEntry, NodeStatus, StackFrame, TraceHistory, TraceSink,
    MAX_RENDER_INDENT,
};

// Re-exports so front ends need only this crate
pub use callscope_core::{
    Algorithm, AlgorithmDescriptor, CallId, EventKind, Input, Locals, TraceEvent, ValidationError,
};
pub use callscope_engine::{Step, TraceError};
