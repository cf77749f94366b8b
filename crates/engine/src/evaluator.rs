//! The suspendable traced evaluator

use callscope_core::{Algorithm, CallId, Input, TraceEvent, ValidationError};
use tracing::{debug, error, warn};

use crate::error::TraceError;
use crate::frame::{Fault, Frame, Next};

/// One unit of work produced by [`Evaluator::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The next trace event in sequence
    Event(TraceEvent),
    /// The run is over; carries the root activation's value
    Done(i64),
}

impl Step {
    /// The event, if this step produced one
    pub fn event(&self) -> Option<&TraceEvent> {
        match self {
            Step::Event(event) => Some(event),
            Step::Done(_) => None,
        }
    }

    /// Check if this is the terminal step
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    /// Call event not yet emitted
    Enter,
    /// Waiting to recurse again or return
    Continue,
}

#[derive(Debug, Clone)]
struct Activation {
    id: CallId,
    parent: Option<CallId>,
    frame: Frame,
    /// Values returned by children, in call order
    results: Vec<i64>,
    resume: Resume,
}

#[derive(Debug, Clone)]
enum Phase {
    Running,
    /// Root returned; the next step reports `Done`
    Finished(i64),
    /// `Done` already reported
    Exhausted,
    Failed(TraceError),
}

/// A single traced run of one algorithm
///
/// The evaluator keeps its own position in the recursion between calls to
/// [`step`](Evaluator::step); callers may pull at any pace.
///
/// # Example
///
/// ```
/// use callscope_core::Input;
/// use callscope_engine::{Evaluator, Step};
///
/// let mut evaluator = Evaluator::new(Input::Factorial { n: 3 }).unwrap();
/// let mut calls = 0;
/// let result = loop {
///     match evaluator.step().unwrap() {
///         Step::Event(event) if event.is_call() => calls += 1,
///         Step::Event(_) => {}
///         Step::Done(result) => break result,
///     }
/// };
/// assert_eq!(result, 6);
/// assert_eq!(calls, 3);
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator {
    input: Input,
    /// Array operand for sum_array, empty otherwise
    values: Vec<i64>,
    stack: Vec<Activation>,
    last_id: u64,
    phase: Phase,
    emitted: u64,
}

/// Construct an evaluator, validating `input` first
pub fn create_evaluator(input: Input) -> Result<Evaluator, ValidationError> {
    Evaluator::new(input)
}

impl Evaluator {
    /// Create an evaluator for `input`
    ///
    /// Fails with a [`ValidationError`] if the input is outside the
    /// algorithm's domain; no events exist in that case.
    pub fn new(input: Input) -> Result<Self, ValidationError> {
        input.validate()?;

        if input.exceeds_recommended() {
            warn!(
                input = %input,
                recommended_max = input.algorithm().descriptor().recommended_max,
                "input exceeds the recommended size, the trace will be long"
            );
        }

        let values = match &input {
            Input::SumArray { values } => values.clone(),
            _ => Vec::new(),
        };
        let root = Frame::root(&input);

        let mut evaluator = Self {
            input,
            values,
            stack: Vec::new(),
            last_id: 0,
            phase: Phase::Running,
            emitted: 0,
        };
        evaluator.push(root, None);
        debug!(input = %evaluator.input, "evaluator created");
        Ok(evaluator)
    }

    /// Advance by exactly one emission point
    ///
    /// Returns the next event, or [`Step::Done`] once the root has returned.
    /// Further calls after `Done` fail with [`TraceError::Exhausted`].
    pub fn step(&mut self) -> Result<Step, TraceError> {
        match &self.phase {
            Phase::Running => {}
            Phase::Finished(result) => {
                let result = *result;
                self.phase = Phase::Exhausted;
                debug!(result, events = self.emitted, "evaluation done");
                return Ok(Step::Done(result));
            }
            Phase::Exhausted => return Err(TraceError::Exhausted),
            Phase::Failed(err) => return Err(err.clone()),
        }

        match self.advance() {
            Ok(event) => {
                self.emitted += 1;
                Ok(Step::Event(event))
            }
            Err(err) => {
                error!(error = %err, events = self.emitted, "evaluation failed");
                self.phase = Phase::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Drive the evaluator to the end, collecting every event
    pub fn run_to_end(&mut self) -> Result<(Vec<TraceEvent>, i64), TraceError> {
        let mut events = Vec::new();
        loop {
            match self.step()? {
                Step::Event(event) => events.push(event),
                Step::Done(result) => return Ok((events, result)),
            }
        }
    }

    /// Algorithm being evaluated
    pub fn algorithm(&self) -> Algorithm {
        self.input.algorithm()
    }

    /// The validated input
    pub fn input(&self) -> &Input {
        &self.input
    }

    /// Number of live activations
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Events produced so far
    pub fn events_emitted(&self) -> u64 {
        self.emitted
    }

    /// Final result once the root activation has returned
    pub fn result(&self) -> Option<i64> {
        match self.phase {
            Phase::Finished(result) => Some(result),
            _ => None,
        }
    }

    /// True once `Done` has been reported
    pub fn is_exhausted(&self) -> bool {
        matches!(self.phase, Phase::Exhausted)
    }

    fn push(&mut self, frame: Frame, parent: Option<CallId>) {
        self.last_id += 1;
        self.stack.push(Activation {
            id: CallId(self.last_id),
            parent,
            frame,
            results: Vec::new(),
            resume: Resume::Enter,
        });
    }

    fn advance(&mut self) -> Result<TraceEvent, TraceError> {
        loop {
            let top = self.stack.last_mut().ok_or(TraceError::Exhausted)?;

            if top.resume == Resume::Enter {
                top.resume = Resume::Continue;
                return Ok(TraceEvent::call(
                    top.id,
                    top.frame.algorithm(),
                    top.frame.arguments(),
                    top.parent,
                    top.frame.entry_locals(&self.values),
                ));
            }

            let call_id = top.id;
            match top.frame.advance(&top.results, &self.values) {
                Ok(Next::Recurse(child)) => {
                    // The child's Call is this step's emission point.
                    self.push(child, Some(call_id));
                }
                Ok(Next::Return { value, locals }) => {
                    let finished = self.stack.pop().ok_or(TraceError::Exhausted)?;
                    match self.stack.last_mut() {
                        Some(parent) => parent.results.push(value),
                        None => self.phase = Phase::Finished(value),
                    }
                    return Ok(TraceEvent::ret(
                        finished.id,
                        finished.frame.algorithm(),
                        finished.frame.arguments(),
                        locals,
                        value,
                    ));
                }
                Err(Fault::Overflow(operation)) => {
                    return Err(TraceError::Overflow { call_id, operation })
                }
                Err(Fault::Resume(count)) => {
                    return Err(TraceError::Internal {
                        call_id,
                        reason: format!("resumed with {} child results", count),
                    })
                }
            }
        }
    }
}
