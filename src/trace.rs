//! One-shot tracing without a controller.

use callscope_core::{Input, TraceEvent};
use callscope_engine::create_evaluator;

use crate::error::Result;

/// A completed run: every event in order, and the root's return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    /// Events in emission order
    pub events: Vec<TraceEvent>,
    /// Root return value
    pub result: i64,
}

impl Trace {
    /// Number of activations
    pub fn call_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_call()).count()
    }

    /// Deepest nesting reached
    pub fn max_depth(&self) -> usize {
        let mut depth = 0usize;
        let mut max = 0;
        for event in &self.events {
            if event.is_call() {
                depth += 1;
                max = max.max(depth);
            } else {
                depth = depth.saturating_sub(1);
            }
        }
        max
    }
}

/// Validate `input` and evaluate it to the end, collecting every event.
///
/// ```
/// use callscope::{trace, Input};
///
/// let t = trace(Input::Fibonacci { n: 5 }).unwrap();
/// assert_eq!(t.result, 5);
/// assert_eq!(t.call_count(), 15);
/// ```
pub fn trace(input: Input) -> Result<Trace> {
    let mut evaluator = create_evaluator(input)?;
    let (events, result) = evaluator.run_to_end()?;
    Ok(Trace { events, result })
}
