//! State machine transitions and their side effects

use callscope::{Command, ControllerState, Error, Input, Output, ValidationError};

use crate::common::*;

// ============================================================================
// Reference results
// ============================================================================

#[test]
fn reference_results() {
    let cases = [
        (Input::Factorial { n: 5 }, 120),
        (Input::Fibonacci { n: 10 }, 55),
        (Input::Gcd { a: 48, b: 18 }, 6),
        (Input::Power { base: 2, exponent: 10 }, 1024),
        (Input::SumArray { values: vec![1, 2, 3, 4] }, 10),
    ];
    for (input, expected) in cases {
        let (mut controller, recorder) = controller_with(input.clone());
        assert_eq!(controller.run_to_completion().unwrap(), expected, "{}", input);
        assert_eq!(recorder.lock().completions, vec![expected]);
    }
}

#[test]
fn factorial_three_event_sequence() {
    let (mut controller, _) = controller_with(Input::Factorial { n: 3 });
    let (events, result) = step_to_end(&mut controller);
    let lines: Vec<String> = events
        .iter()
        .map(|e| format!("{} {} {}", e.kind, e.call_id, e.arguments))
        .collect();
    assert_eq!(
        lines,
        vec![
            "call #1 n=3",
            "call #2 n=2",
            "call #3 n=1",
            "return #3 n=1",
            "return #2 n=2",
            "return #1 n=3",
        ]
    );
    assert_eq!(result, 6);
    let values: Vec<_> = events.iter().filter_map(|e| e.value).collect();
    assert_eq!(values, vec![1, 2, 6]);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn domain_violations_emit_nothing() {
    let bad = [
        Input::Factorial { n: -1 },
        Input::Fibonacci { n: -2 },
        Input::Gcd { a: 4, b: -1 },
        Input::Power { base: 2, exponent: -1 },
        Input::SumArray { values: vec![] },
    ];
    for input in bad {
        let (mut controller, recorder) = controller_with(input.clone());
        let err = controller.start().unwrap_err();
        assert!(err.is_validation(), "{}: {:?}", input, err);
        assert_eq!(controller.state(), ControllerState::Idle);

        let err = controller.step().unwrap_err();
        assert!(err.is_validation());
        assert!(recorder.lock().events.is_empty());
        assert!(controller.tree().is_empty());
    }
}

#[test]
fn validation_error_converts_to_facade_error() {
    let (mut controller, _) = controller_with(Input::SumArray { values: vec![] });
    let err: Error = controller.start().unwrap_err().into();
    assert_eq!(err, Error::Validation(ValidationError::EmptyArray));
}

// ============================================================================
// Transitions
// ============================================================================

#[test]
fn start_pause_resume() {
    let (mut controller, _) = controller_with(Input::Fibonacci { n: 4 });
    controller.start().unwrap();
    assert_eq!(controller.state(), ControllerState::Running);
    controller.tick().unwrap();
    controller.pause().unwrap();
    assert_eq!(controller.state(), ControllerState::Paused);
    assert!(controller.has_evaluator());

    controller.start().unwrap();
    assert_eq!(controller.state(), ControllerState::Running);
    assert_eq!(controller.run_to_completion().unwrap(), 3);
}

#[test]
fn refused_commands_change_nothing() {
    let (mut controller, recorder) = controller_with(Input::Factorial { n: 4 });
    assert!(controller.pause().unwrap_err().is_invalid_transition());

    controller.start().unwrap();
    assert!(controller.start().unwrap_err().is_invalid_transition());
    assert!(controller.step().unwrap_err().is_invalid_transition());
    assert_eq!(controller.state(), ControllerState::Running);
    assert!(recorder.lock().events.is_empty());

    controller.run_to_completion().unwrap();
    assert!(controller.start().unwrap_err().is_invalid_transition());
    assert!(controller.step().unwrap_err().is_invalid_transition());
    assert!(controller.pause().unwrap_err().is_invalid_transition());
    assert_eq!(controller.state(), ControllerState::Completed);
}

#[test]
fn step_from_completed_needs_reset() {
    let (mut controller, _) = controller_with(Input::Gcd { a: 9, b: 6 });
    step_to_end(&mut controller);
    assert_eq!(controller.state(), ControllerState::Completed);
    controller.reset();
    let (_, result) = step_to_end(&mut controller);
    assert_eq!(result, 3);
}

#[test]
fn reset_is_idempotent() {
    let (mut controller, recorder) = controller_with(Input::Fibonacci { n: 5 });
    controller.step().unwrap();
    controller.step().unwrap();

    controller.reset();
    let once = controller.status();
    controller.reset();
    let twice = controller.status();

    assert_eq!(once, twice);
    assert_eq!(once.state, ControllerState::Idle);
    assert_eq!(once.call_count, 0);
    assert!(controller.tree().is_empty());
    assert!(controller.stack().is_empty());
    assert!(recorder.lock().events.is_empty());
    assert_eq!(recorder.lock().resets, 3);
}

#[test]
fn select_resets_previous_run() {
    let (mut controller, recorder) = controller_with(Input::Factorial { n: 3 });
    controller.step().unwrap();
    controller.select(Input::Power { base: 5, exponent: 2 });
    assert_eq!(controller.state(), ControllerState::Idle);
    assert_eq!(controller.call_count(), 0);
    assert!(recorder.lock().events.is_empty());
    assert_eq!(controller.run_to_completion().unwrap(), 25);
}

#[test]
fn no_selection() {
    let mut controller = callscope::Controller::default();
    let err: Error = controller.start().unwrap_err().into();
    assert_eq!(err, Error::NoSelection);
}

// ============================================================================
// Trace failure
// ============================================================================

#[test]
fn overflow_freezes_controller() {
    let (mut controller, recorder) = controller_with(Input::Factorial { n: 21 });
    let err: Error = controller.run_to_completion().unwrap_err().into();
    assert!(err.is_overflow());
    assert_eq!(controller.state(), ControllerState::Paused);

    let recorder = recorder.lock();
    assert_eq!(recorder.events.len(), 41);
    assert_eq!(recorder.errors.len(), 1);
    assert!(recorder.completions.is_empty());
    drop(recorder);

    // partial projection survives: root still running
    let root = controller.tree().root().unwrap();
    assert_eq!(root.return_value, None);
    assert_eq!(controller.stack().depth(), 1);

    // the evaluator is poisoned; a further step reports the same failure
    let err: Error = controller.step().unwrap_err().into();
    assert!(err.is_overflow());
}

// ============================================================================
// Command dispatch
// ============================================================================

#[test]
fn execute_matches_typed_methods() {
    let (mut typed, _) = controller_with(Input::SumArray { values: vec![3, 4] });
    let (typed_events, _) = step_to_end(&mut typed);

    let (mut dispatched, _) = controller_with(Input::SumArray { values: vec![3, 4] });
    let mut events = Vec::new();
    loop {
        match dispatched.execute(Command::Step).unwrap() {
            Output::Event(event) => events.push(event),
            Output::Completed { result, .. } => {
                assert_eq!(result, 7);
                break;
            }
            other => panic!("unexpected output {:?}", other),
        }
    }
    assert_eq!(events, typed_events);
}
