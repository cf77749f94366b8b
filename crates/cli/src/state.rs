//! Session state for the CLI.
//!
//! Owns the controller for the lifetime of the process. Paced runs are
//! driven here by sleeping until each deadline and issuing `Tick`, so events
//! print as they are delivered.

use std::time::Instant;

use callscope_executor::{
    Command, Controller, ControllerOptions, ControllerState, Input, Output, Result,
};
use tracing::debug;

/// Mutable state carried between commands.
pub struct SessionState {
    controller: Controller,
}

impl SessionState {
    /// Create a session; `delay` overrides the default pacing.
    pub fn new(delay: Option<u64>) -> Self {
        let mut options = ControllerOptions::new();
        if let Some(ms) = delay {
            options = options.delay_ms(ms);
        }
        Self {
            controller: Controller::new(options),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Execute a single command.
    pub fn execute(&mut self, command: Command) -> Result<Output> {
        self.controller.execute(command)
    }

    /// Start (after an optional select) and deliver events at the paced rate.
    ///
    /// Stops at completion, or pauses after `limit` events.
    pub fn drive(
        &mut self,
        select: Option<Input>,
        limit: Option<u64>,
        mut emit: impl FnMut(&Output),
    ) -> Result<()> {
        if let Some(input) = select {
            self.execute(Command::Select { input })?;
        }
        if self.controller.state() != ControllerState::Running {
            self.execute(Command::Start)?;
        }

        let mut delivered = 0u64;
        while self.controller.state() == ControllerState::Running {
            if limit.is_some_and(|max| delivered >= max) {
                self.execute(Command::Pause)?;
                break;
            }
            if let Some(deadline) = self.controller.next_deadline() {
                let now = Instant::now();
                if deadline > now {
                    std::thread::sleep(deadline - now);
                }
            }
            match self.execute(Command::Tick)? {
                Output::Pending => {}
                output => {
                    if matches!(output, Output::Event(_)) {
                        delivered += 1;
                    }
                    emit(&output);
                }
            }
        }
        debug!(delivered, state = %self.controller.state(), "drive finished");
        Ok(())
    }

    /// Take up to `count` single steps, stopping early at completion.
    pub fn step(&mut self, count: u64, mut emit: impl FnMut(&Output)) -> Result<()> {
        for _ in 0..count {
            let output = self.execute(Command::Step)?;
            emit(&output);
            if matches!(output, Output::Completed { .. }) {
                break;
            }
        }
        Ok(())
    }
}
