//! Command and Output types
//!
//! Every controller operation has a serializable [`Command`] variant, and
//! every result a serializable [`Output`] variant, so a front end can drive
//! the controller from parsed text or JSON and print the answer uniformly.

use callscope_core::{Algorithm, AlgorithmDescriptor, Input, TraceEvent};
use callscope_engine::Step;
use serde::{Deserialize, Serialize};

use crate::controller::{Controller, ControllerState};
use crate::error::Result;

/// A controller operation
///
/// ```
/// use callscope_executor::{Command, Input};
///
/// let cmd: Command = serde_json::from_str(
///     r#"{"command":"select","input":{"algorithm":"gcd","a":48,"b":18}}"#,
/// ).unwrap();
/// assert_eq!(cmd, Command::Select { input: Input::Gcd { a: 48, b: 18 } });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Reset and choose the input for the next run
    Select {
        /// Algorithm and arguments
        input: Input,
    },
    /// Begin or resume paced pulling
    Start,
    /// Exactly one pull
    Step,
    /// Stop paced pulling
    Pause,
    /// Back to Idle
    Reset,
    /// Change the pacing delay
    SetDelay {
        /// Milliseconds between pulls
        ms: u64,
    },
    /// Perform the scheduled pull if due
    Tick,
    /// Block until completion, or until `max_events` more events
    Run {
        /// Pause after this many events
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_events: Option<u64>,
    },
    /// Snapshot of the controller
    Status,
    /// Static metadata for an algorithm
    Describe {
        /// Which algorithm
        algorithm: Algorithm,
    },
}

impl Command {
    /// Command name as used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Command::Select { .. } => "select",
            Command::Start => "start",
            Command::Step => "step",
            Command::Pause => "pause",
            Command::Reset => "reset",
            Command::SetDelay { .. } => "set_delay",
            Command::Tick => "tick",
            Command::Run { .. } => "run",
            Command::Status => "status",
            Command::Describe { .. } => "describe",
        }
    }
}

/// Result of [`Controller::execute`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Output {
    /// Command succeeded with nothing to report
    Unit,
    /// A pull delivered this event
    Event(TraceEvent),
    /// The run finished
    Completed {
        /// Root return value
        result: i64,
        /// Milliseconds from first pull to completion
        elapsed_ms: f64,
    },
    /// `tick` found no pull due, or `run` stopped early
    Pending,
    /// Controller snapshot
    Status(ControllerStatus),
    /// Algorithm metadata
    Descriptor(AlgorithmDescriptor),
}

/// Point-in-time view of a [`Controller`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerStatus {
    /// Lifecycle state
    pub state: ControllerState,
    /// Selected algorithm
    pub algorithm: Option<Algorithm>,
    /// Selected input, formatted
    pub input: Option<String>,
    /// Call events delivered
    pub call_count: u64,
    /// Events delivered
    pub event_count: u64,
    /// Live stack depth
    pub depth: usize,
    /// Pacing delay in milliseconds
    pub delay_ms: u64,
    /// Result, once Completed
    pub result: Option<i64>,
    /// Elapsed milliseconds, once Completed
    pub elapsed_ms: Option<f64>,
    /// Last mid-trace failure
    pub error: Option<String>,
}

impl std::fmt::Display for ControllerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "state: {}", self.state)?;
        match &self.input {
            Some(input) => write!(f, "\ninput: {}", input)?,
            None => write!(f, "\ninput: (none)")?,
        }
        write!(
            f,
            "\ncalls: {}\nevents: {}\ndepth: {}\ndelay: {} ms",
            self.call_count, self.event_count, self.depth, self.delay_ms
        )?;
        if let Some(result) = self.result {
            write!(f, "\nresult: {}", result)?;
        }
        if let Some(elapsed) = self.elapsed_ms {
            write!(f, "\nelapsed: {:.2} ms", elapsed)?;
        }
        if let Some(error) = &self.error {
            write!(f, "\nerror: {}", error)?;
        }
        Ok(())
    }
}

fn step_output(step: Step, controller: &Controller) -> Output {
    match step {
        Step::Event(event) => Output::Event(event),
        Step::Done(result) => Output::Completed {
            result,
            elapsed_ms: elapsed_ms(controller).unwrap_or_default(),
        },
    }
}

fn elapsed_ms(controller: &Controller) -> Option<f64> {
    controller.elapsed().map(|d| d.as_secs_f64() * 1000.0)
}

impl Controller {
    /// Execute a command
    ///
    /// Typed methods and commands share the same transitions; this is the
    /// entry point for front ends that parse their input.
    pub fn execute(&mut self, command: Command) -> Result<Output> {
        tracing::trace!(command = command.name(), "execute");
        match command {
            Command::Select { input } => {
                self.select(input);
                Ok(Output::Unit)
            }
            Command::Start => {
                self.start()?;
                Ok(Output::Unit)
            }
            Command::Step => {
                let step = self.step()?;
                Ok(step_output(step, self))
            }
            Command::Pause => {
                self.pause()?;
                Ok(Output::Unit)
            }
            Command::Reset => {
                self.reset();
                Ok(Output::Unit)
            }
            Command::SetDelay { ms } => {
                self.set_delay(ms);
                Ok(Output::Unit)
            }
            Command::Tick => match self.tick()? {
                Some(step) => Ok(step_output(step, self)),
                None => Ok(Output::Pending),
            },
            Command::Run { max_events: None } => {
                let result = self.run_to_completion()?;
                Ok(Output::Completed {
                    result,
                    elapsed_ms: elapsed_ms(self).unwrap_or_default(),
                })
            }
            Command::Run {
                max_events: Some(max),
            } => match self.run_for(max)? {
                Some(result) => Ok(Output::Completed {
                    result,
                    elapsed_ms: elapsed_ms(self).unwrap_or_default(),
                }),
                None => Ok(Output::Pending),
            },
            Command::Status => Ok(Output::Status(self.status())),
            Command::Describe { algorithm } => Ok(Output::Descriptor(*algorithm.descriptor())),
        }
    }

    /// Snapshot of the controller
    pub fn status(&self) -> ControllerStatus {
        ControllerStatus {
            state: self.state(),
            algorithm: self.selection().map(Input::algorithm),
            input: self.selection().map(ToString::to_string),
            call_count: self.call_count(),
            event_count: self.event_count(),
            depth: self.stack().depth(),
            delay_ms: self.delay().as_millis() as u64,
            result: self.result(),
            elapsed_ms: elapsed_ms(self),
            error: self.last_error().map(str::to_string),
        }
    }
}
