//! Convenient imports for callscope.
//!
//! ```
//! use callscope::prelude::*;
//!
//! let mut controller = Controller::default();
//! controller.select(Input::Factorial { n: 3 });
//! assert_eq!(controller.state(), ControllerState::Idle);
//! ```

// Entry points
pub use crate::trace::{trace, Trace};
pub use callscope_executor::{Controller, ControllerOptions, ControllerState};

// Error handling
pub use crate::error::{Error, Result};

// Event model
pub use callscope_core::{Algorithm, Input, TraceEvent};
pub use callscope_engine::Step;

// Sinks
pub use callscope_executor::TraceSink;
