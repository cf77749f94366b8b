//! # callscope
//!
//! Step-through tracing of small recursive algorithms.
//!
//! An evaluator runs one of five classic recursive algorithms as an explicit
//! work-stack, yielding a Call or Return event per pull. A controller paces
//! those pulls (start, step, pause, reset, delay) and feeds every event to
//! sinks that project it as a call tree, a live call stack and a history.
//!
//! ## Quick Start
//!
//! ```
//! use callscope::prelude::*;
//!
//! // One shot: collect the whole trace
//! let t = callscope::trace(Input::Factorial { n: 5 })?;
//! assert_eq!(t.result, 120);
//!
//! // Interactive: pull events one at a time
//! let mut controller = Controller::new(ControllerOptions::new().delay_ms(0));
//! controller.select(Input::Gcd { a: 48, b: 18 });
//! controller.step()?;
//! assert_eq!(controller.stack().depth(), 1);
//! assert_eq!(controller.run_to_completion()?, 6);
//! println!("{}", controller.tree().render());
//! # Ok::<(), callscope::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`callscope_core`]: events, algorithm catalogue, input validation
//! - [`callscope_engine`]: the suspendable evaluator
//! - [`callscope_executor`]: controller, commands and sinks

#![warn(missing_docs)]

mod error;
mod trace;

pub mod prelude;

pub use error::{Error, Result};
pub use trace::{trace, Trace};

// Re-export the layer APIs
pub use callscope_core::{
    Algorithm, AlgorithmDescriptor, CallId, EventKind, Input, Locals, TraceEvent, ValidationError,
};
pub use callscope_engine::{create_evaluator, Evaluator, Step, TraceError};
pub use callscope_executor::{
    sink, CallNode, CallStack, CallTree, Command, Controller, ControllerOptions, ControllerState,
    ControllerStatus, HistoryEntry, NodeStatus, Output, StackFrame, TraceHistory, TraceSink,
};

pub use callscope_core;
pub use callscope_engine;
pub use callscope_executor;
