//! Shared helpers for the integration suites.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use callscope::{Controller, ControllerOptions, Input, Step, TraceEvent, TraceSink};
use parking_lot::Mutex;

/// Sink that records every callback it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<TraceEvent>,
    pub completions: Vec<i64>,
    pub errors: Vec<String>,
    pub resets: usize,
}

impl TraceSink for RecordingSink {
    fn on_event(&mut self, event: &TraceEvent) {
        self.events.push(event.clone());
    }

    fn on_complete(&mut self, result: i64, _elapsed: Duration) {
        self.completions.push(result);
    }

    fn on_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn on_reset(&mut self) {
        self.events.clear();
        self.resets += 1;
    }
}

pub type Recorder = Arc<Mutex<RecordingSink>>;

/// Zero-delay controller with a recording sink attached and `input` selected.
pub fn controller_with(input: Input) -> (Controller, Recorder) {
    let recorder: Recorder = Arc::new(Mutex::new(RecordingSink::default()));
    let mut controller = Controller::new(ControllerOptions::new().delay_ms(0));
    controller.add_sink(Box::new(Arc::clone(&recorder)));
    controller.select(input);
    (controller, recorder)
}

/// Step until the result is reported, returning the delivered events.
pub fn step_to_end(controller: &mut Controller) -> (Vec<TraceEvent>, i64) {
    let mut events = Vec::new();
    loop {
        match controller.step().expect("step failed") {
            Step::Event(event) => events.push(event),
            Step::Done(result) => return (events, result),
        }
    }
}

/// Events of an uninterrupted run.
pub fn full_trace(input: Input) -> (Vec<TraceEvent>, i64) {
    let t = callscope::trace(input).expect("trace failed");
    (t.events, t.result)
}

/// Inputs small enough to trace quickly, one per algorithm and then some.
pub fn sample_inputs() -> Vec<Input> {
    vec![
        Input::Factorial { n: 0 },
        Input::Factorial { n: 5 },
        Input::Fibonacci { n: 0 },
        Input::Fibonacci { n: 10 },
        Input::Gcd { a: 48, b: 18 },
        Input::Gcd { a: 0, b: 7 },
        Input::Power { base: 2, exponent: 10 },
        Input::Power { base: -3, exponent: 3 },
        Input::SumArray { values: vec![1, 2, 3, 4] },
        Input::SumArray { values: vec![-5] },
    ]
}
