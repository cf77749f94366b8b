//! Trace sinks
//!
//! A sink projects the event stream into something renderable. The
//! controller is the only writer: it calls the sink methods in delivery
//! order and never concurrently.
//!
//! Built-in projections:
//! - [`CallTree`]: every activation of the run, parent to children
//! - [`CallStack`]: the live stack, depth = current recursion depth
//! - [`TraceHistory`]: timestamped log of delivered events

mod history;
mod stack;
mod tree;

pub use history::{HistoryEntry, TraceHistory};
pub use stack::{CallStack, StackFrame};
pub use tree::{CallNode, CallTree, NodeStatus, MAX_RENDER_INDENT};

use callscope_core::TraceEvent;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Consumer of controller callbacks
///
/// Only `on_event` is required; the rest default to no-ops.
pub trait TraceSink {
    /// An event was pulled from the evaluator
    fn on_event(&mut self, event: &TraceEvent);

    /// The root returned and the evaluator reported its result
    fn on_complete(&mut self, _result: i64, _elapsed: Duration) {}

    /// The evaluator failed mid-trace; projections keep their partial state
    fn on_error(&mut self, _message: &str) {}

    /// The controller was reset; drop all state
    fn on_reset(&mut self) {}
}

/// Lets a front end keep a handle on a sink the controller also owns
impl<S: TraceSink> TraceSink for Arc<Mutex<S>> {
    fn on_event(&mut self, event: &TraceEvent) {
        self.lock().on_event(event);
    }

    fn on_complete(&mut self, result: i64, elapsed: Duration) {
        self.lock().on_complete(result, elapsed);
    }

    fn on_error(&mut self, message: &str) {
        self.lock().on_error(message);
    }

    fn on_reset(&mut self) {
        self.lock().on_reset();
    }
}
