//! Deadline-driven pacing

use std::time::Duration;

use callscope::{Controller, ControllerOptions, ControllerState, Input};

use crate::common::*;

fn paced(delay_ms: u64, input: Input) -> Controller {
    let mut controller = Controller::new(ControllerOptions::new().delay_ms(delay_ms));
    controller.select(input);
    controller
}

#[test]
fn one_pull_per_elapsed_delay() {
    let mut controller = paced(100, Input::Factorial { n: 3 });
    controller.start().unwrap();
    let t0 = controller.next_deadline().unwrap();

    // pull at t0, then one per 100ms
    let mut pulls = 0;
    for ms in (0..=1000).step_by(10) {
        if controller.tick_at(t0 + Duration::from_millis(ms)).unwrap().is_some() {
            pulls += 1;
        }
    }
    // 6 events then Done
    assert_eq!(pulls, 7);
    assert_eq!(controller.state(), ControllerState::Completed);
}

#[test]
fn shortening_delay_pulls_sooner() {
    let mut controller = paced(1000, Input::Fibonacci { n: 3 });
    controller.start().unwrap();
    let t0 = controller.next_deadline().unwrap();
    controller.tick_at(t0).unwrap();

    controller.set_delay(50);
    assert!(controller.tick_at(t0 + Duration::from_millis(49)).unwrap().is_none());
    assert!(controller.tick_at(t0 + Duration::from_millis(50)).unwrap().is_some());
    assert_eq!(controller.next_deadline(), Some(t0 + Duration::from_millis(100)));
}

#[test]
fn set_delay_while_paused_affects_next_start() {
    let mut controller = paced(1000, Input::Fibonacci { n: 3 });
    controller.start().unwrap();
    controller.pause().unwrap();
    controller.set_delay(5);
    assert_eq!(controller.next_deadline(), None);
    assert_eq!(controller.delay(), Duration::from_millis(5));
}

#[test]
fn pause_resume_is_transparent() {
    let input = Input::Fibonacci { n: 6 };
    let (expected, expected_result) = full_trace(input.clone());

    let (mut controller, recorder) = controller_with(input);
    for pause_after in [1u64, 3, 7, 11] {
        controller.run_for(pause_after).unwrap();
        assert_eq!(controller.state(), ControllerState::Paused);
    }
    assert_eq!(controller.run_to_completion().unwrap(), expected_result);
    assert_eq!(recorder.lock().events, expected);
}

#[test]
fn step_equivalence_with_uninterrupted_run() {
    for input in sample_inputs() {
        let (expected, expected_result) = full_trace(input.clone());
        let (mut controller, _) = controller_with(input.clone());
        let (events, result) = step_to_end(&mut controller);
        assert_eq!(events, expected, "{}", input);
        assert_eq!(result, expected_result);
    }
}

#[test]
fn paced_run_matches_uninterrupted_run() {
    for delay_ms in [100u64, 250] {
        let delay = Duration::from_millis(delay_ms);
        for input in sample_inputs() {
            let (expected, expected_result) = full_trace(input.clone());
            let mut controller = paced(delay_ms, input.clone());
            controller.start().unwrap();
            let mut now = controller.next_deadline().unwrap();

            while controller.state() == ControllerState::Running {
                assert!(controller.tick_at(now).unwrap().is_some(), "{}", input);
                // nothing is due halfway to the next deadline
                assert!(controller.tick_at(now + delay / 2).unwrap().is_none());
                now += delay;
            }

            let delivered: Vec<_> = controller.history().unwrap().events().cloned().collect();
            assert_eq!(delivered, expected, "{} at {}ms", input, delay_ms);
            assert_eq!(controller.state(), ControllerState::Completed);
            assert_eq!(controller.result(), Some(expected_result));
        }
    }
}

#[test]
fn mixing_step_and_start() {
    let input = Input::Power { base: 3, exponent: 5 };
    let (expected, _) = full_trace(input.clone());

    let (mut controller, recorder) = controller_with(input);
    controller.step().unwrap();
    controller.step().unwrap();
    controller.start().unwrap();
    controller.tick().unwrap();
    controller.pause().unwrap();
    controller.step().unwrap();
    assert_eq!(controller.run_to_completion().unwrap(), 243);
    assert_eq!(recorder.lock().events, expected);
}

#[test]
fn elapsed_measured_from_first_pull() {
    let (mut controller, _) = controller_with(Input::Factorial { n: 2 });
    assert!(controller.elapsed().is_none());
    controller.run_to_completion().unwrap();
    assert!(controller.elapsed().is_some());
    assert_eq!(controller.status().result, Some(2));
}
