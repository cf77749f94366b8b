//! The execution controller

use callscope_core::{Input, TraceEvent};
use callscope_engine::{Evaluator, Step};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::options::ControllerOptions;
use crate::sink::{CallStack, CallTree, TraceHistory, TraceSink};

/// Lifecycle state of a [`Controller`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    /// No evaluator; sinks empty
    Idle,
    /// Pulling on a schedule
    Running,
    /// Evaluator kept, no pull scheduled
    Paused,
    /// Root returned; result recorded
    Completed,
}

impl ControllerState {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerState::Idle => "idle",
            ControllerState::Running => "running",
            ControllerState::Paused => "paused",
            ControllerState::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Owns one traced run and paces delivery of its events
///
/// The controller is the single writer of every projection. Pulls happen
/// only inside [`step`](Controller::step) and [`tick`](Controller::tick);
/// the wait between paced pulls is a deadline that `pause`, `reset` and
/// `set_delay` adjust without touching already-delivered events.
///
/// # Example
///
/// ```
/// use callscope_executor::{Controller, ControllerOptions, ControllerState, Input};
///
/// let mut controller = Controller::new(ControllerOptions::new().delay_ms(0));
/// controller.select(Input::Gcd { a: 48, b: 18 });
/// assert_eq!(controller.run_to_completion().unwrap(), 6);
/// assert_eq!(controller.state(), ControllerState::Completed);
/// assert_eq!(controller.call_count(), 4);
/// ```
pub struct Controller {
    state: ControllerState,
    selection: Option<Input>,
    evaluator: Option<Evaluator>,

    delay: Duration,
    /// Deadline of the scheduled pull, if any
    next_pull_at: Option<Instant>,
    last_pull_at: Option<Instant>,
    first_pull_at: Option<Instant>,

    call_count: u64,
    event_count: u64,
    result: Option<i64>,
    elapsed: Option<Duration>,
    last_error: Option<String>,

    tree: CallTree,
    stack: CallStack,
    history: Option<TraceHistory>,
    sinks: Vec<Box<dyn TraceSink + Send>>,
}

impl Controller {
    /// Create an idle controller with nothing selected
    pub fn new(options: ControllerOptions) -> Self {
        Self {
            state: ControllerState::Idle,
            selection: None,
            evaluator: None,
            delay: options.delay,
            next_pull_at: None,
            last_pull_at: None,
            first_pull_at: None,
            call_count: 0,
            event_count: 0,
            result: None,
            elapsed: None,
            last_error: None,
            tree: CallTree::new(),
            stack: CallStack::new(),
            history: options.history.then(TraceHistory::new),
            sinks: Vec::new(),
        }
    }

    /// Register an additional sink; it receives every later callback
    pub fn add_sink(&mut self, sink: Box<dyn TraceSink + Send>) {
        self.sinks.push(sink);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current lifecycle state
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Input used for the next evaluator
    pub fn selection(&self) -> Option<&Input> {
        self.selection.as_ref()
    }

    /// Current inter-pull delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Call events delivered this run
    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// Events of either kind delivered this run
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Final result, once Completed
    pub fn result(&self) -> Option<i64> {
        self.result
    }

    /// Time from the first pull to completion
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Message of the last mid-trace failure
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// When the scheduled pull is due, if one is scheduled
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_pull_at
    }

    /// Call-tree projection of the current run
    pub fn tree(&self) -> &CallTree {
        &self.tree
    }

    /// Call-stack projection of the current run
    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    /// Event history, when enabled in [`ControllerOptions`]
    pub fn history(&self) -> Option<&TraceHistory> {
        self.history.as_ref()
    }

    /// True if an evaluator is live
    pub fn has_evaluator(&self) -> bool {
        self.evaluator.is_some()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Choose what the next run evaluates
    ///
    /// Resets the controller. Validation is deferred until an evaluator is
    /// created by `start` or `step`.
    pub fn select(&mut self, input: Input) {
        self.reset();
        info!(input = %input, "selected");
        self.selection = Some(input);
    }

    /// Begin or resume paced pulling
    ///
    /// From Idle this creates the evaluator, reporting validation errors
    /// without leaving Idle. The first pull is due immediately.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            ControllerState::Idle => self.ensure_evaluator()?,
            ControllerState::Paused => {}
            state @ (ControllerState::Running | ControllerState::Completed) => {
                return Err(Error::InvalidTransition {
                    command: "start",
                    state,
                })
            }
        }
        self.state = ControllerState::Running;
        self.next_pull_at = Some(Instant::now());
        info!(delay_ms = self.delay.as_millis() as u64, "running");
        Ok(())
    }

    /// Perform exactly one pull, without scheduling another
    ///
    /// Valid from Idle or Paused. Leaves the controller Paused, or Completed
    /// if the pull reported the result.
    pub fn step(&mut self) -> Result<Step> {
        match self.state {
            ControllerState::Idle => self.ensure_evaluator()?,
            ControllerState::Paused => {}
            state @ (ControllerState::Running | ControllerState::Completed) => {
                return Err(Error::InvalidTransition {
                    command: "step",
                    state,
                })
            }
        }
        let step = self.pull(Instant::now())?;
        if !step.is_done() {
            self.state = ControllerState::Paused;
        }
        Ok(step)
    }

    /// Stop paced pulling, keeping the evaluator where it is
    pub fn pause(&mut self) -> Result<()> {
        if self.state != ControllerState::Running {
            return Err(Error::InvalidTransition {
                command: "pause",
                state: self.state,
            });
        }
        self.state = ControllerState::Paused;
        self.next_pull_at = None;
        info!(events = self.event_count, "paused");
        Ok(())
    }

    /// Discard the evaluator and all projection state; valid from any state
    ///
    /// The selection is kept so the same input can be run again.
    pub fn reset(&mut self) {
        self.state = ControllerState::Idle;
        self.evaluator = None;
        self.next_pull_at = None;
        self.last_pull_at = None;
        self.first_pull_at = None;
        self.call_count = 0;
        self.event_count = 0;
        self.result = None;
        self.elapsed = None;
        self.last_error = None;

        self.tree.on_reset();
        self.stack.on_reset();
        if let Some(history) = self.history.as_mut() {
            history.on_reset();
        }
        for sink in &mut self.sinks {
            sink.on_reset();
        }
        debug!("reset");
    }

    /// Change the pacing delay
    ///
    /// A pending pull is rescheduled to `last pull + ms` right away.
    pub fn set_delay(&mut self, ms: u64) {
        self.delay = Duration::from_millis(ms);
        if let (Some(_), Some(last)) = (self.next_pull_at, self.last_pull_at) {
            self.next_pull_at = Some(last + self.delay);
        }
        debug!(delay_ms = ms, "delay changed");
    }

    // =========================================================================
    // Scheduling
    // =========================================================================

    /// Perform the scheduled pull if it is due now
    pub fn tick(&mut self) -> Result<Option<Step>> {
        self.tick_at(Instant::now())
    }

    /// Perform the scheduled pull if it is due at `now`
    ///
    /// Returns `Ok(None)` when not Running or the deadline is still ahead.
    pub fn tick_at(&mut self, now: Instant) -> Result<Option<Step>> {
        if self.state != ControllerState::Running {
            return Ok(None);
        }
        match self.next_pull_at {
            Some(deadline) if deadline <= now => {}
            _ => return Ok(None),
        }

        let step = self.pull(now)?;
        if self.state == ControllerState::Running {
            self.next_pull_at = Some(now + self.delay);
        }
        Ok(Some(step))
    }

    /// Start if needed and block, honouring the delay, until completion
    pub fn run_to_completion(&mut self) -> Result<i64> {
        if self.state != ControllerState::Running {
            self.start()?;
        }
        loop {
            if let Some(Step::Done(result)) = self.wait_and_tick()? {
                return Ok(result);
            }
            if self.state != ControllerState::Running {
                return Err(Error::InvalidTransition {
                    command: "run",
                    state: self.state,
                });
            }
        }
    }

    /// Start if needed and block until `max_events` more events are
    /// delivered, then pause
    ///
    /// Returns the result if the run completed first.
    pub fn run_for(&mut self, max_events: u64) -> Result<Option<i64>> {
        if self.state != ControllerState::Running {
            self.start()?;
        }
        let mut delivered = 0;
        while delivered < max_events {
            match self.wait_and_tick()? {
                Some(Step::Done(result)) => return Ok(Some(result)),
                Some(Step::Event(_)) => delivered += 1,
                None => {}
            }
        }
        if self.state == ControllerState::Running {
            self.pause()?;
        }
        Ok(None)
    }

    fn wait_and_tick(&mut self) -> Result<Option<Step>> {
        if let Some(deadline) = self.next_pull_at {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
        }
        self.tick()
    }

    // =========================================================================
    // Pull and delivery
    // =========================================================================

    fn ensure_evaluator(&mut self) -> Result<()> {
        if self.evaluator.is_some() {
            return Ok(());
        }
        let input = self.selection.clone().ok_or(Error::NoSelection)?;
        let evaluator = Evaluator::new(input)?;
        self.evaluator = Some(evaluator);
        Ok(())
    }

    fn pull(&mut self, now: Instant) -> Result<Step> {
        let Some(evaluator) = self.evaluator.as_mut() else {
            return Err(Error::InvalidTransition {
                command: "pull",
                state: self.state,
            });
        };
        let first = *self.first_pull_at.get_or_insert(now);
        self.last_pull_at = Some(now);

        match evaluator.step() {
            Ok(Step::Event(event)) => {
                if event.is_call() {
                    self.call_count += 1;
                }
                self.event_count += 1;
                debug!(event = %event, "pulled");
                self.deliver(&event);
                Ok(Step::Event(event))
            }
            Ok(Step::Done(result)) => {
                let elapsed = now.saturating_duration_since(first);
                self.state = ControllerState::Completed;
                self.evaluator = None;
                self.next_pull_at = None;
                self.result = Some(result);
                self.elapsed = Some(elapsed);
                info!(
                    result,
                    calls = self.call_count,
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    "completed"
                );
                self.notify_complete(result, elapsed);
                Ok(Step::Done(result))
            }
            Err(err) => {
                let message = err.to_string();
                error!(error = %message, events = self.event_count, "trace failed, pausing");
                self.state = ControllerState::Paused;
                self.next_pull_at = None;
                self.last_error = Some(message.clone());
                self.notify_error(&message);
                Err(Error::Trace(err))
            }
        }
    }

    fn deliver(&mut self, event: &TraceEvent) {
        self.tree.on_event(event);
        self.stack.on_event(event);
        if let Some(history) = self.history.as_mut() {
            history.on_event(event);
        }
        for sink in &mut self.sinks {
            sink.on_event(event);
        }
    }

    fn notify_complete(&mut self, result: i64, elapsed: Duration) {
        if let Some(history) = self.history.as_mut() {
            history.on_complete(result, elapsed);
        }
        for sink in &mut self.sinks {
            sink.on_complete(result, elapsed);
        }
    }

    fn notify_error(&mut self, message: &str) {
        if let Some(history) = self.history.as_mut() {
            history.on_error(message);
        }
        for sink in &mut self.sinks {
            sink.on_error(message);
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ControllerOptions::default())
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("state", &self.state)
            .field("selection", &self.selection)
            .field("delay", &self.delay)
            .field("call_count", &self.call_count)
            .field("event_count", &self.event_count)
            .field("result", &self.result)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
