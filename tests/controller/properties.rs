//! Property tests over random inputs and random command interleavings

use callscope::{Controller, ControllerState, Input};
use proptest::prelude::*;

use crate::common::*;

fn small_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        (0i64..=20).prop_map(|n| Input::Factorial { n }),
        (0i64..=12).prop_map(|n| Input::Fibonacci { n }),
        (-500i64..500, 0i64..500).prop_map(|(a, b)| Input::Gcd { a, b }),
        (-5i64..=5, 0i64..=12).prop_map(|(base, exponent)| Input::Power { base, exponent }),
        prop::collection::vec(-1000i64..1000, 1..12).prop_map(|values| Input::SumArray { values }),
    ]
}

/// Operations a user can interleave while a run is in progress
#[derive(Debug, Clone)]
enum Op {
    Step,
    StartTickPause(u8),
    Reset,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Step),
        3 => (1u8..5).prop_map(Op::StartTickPause),
        1 => Just(Op::Reset),
    ]
}

fn apply(controller: &mut Controller, op: &Op) {
    match op {
        Op::Step => {
            if controller.state() != ControllerState::Completed {
                controller.step().unwrap();
            }
        }
        Op::StartTickPause(ticks) => {
            if controller.state() == ControllerState::Completed {
                return;
            }
            controller.start().unwrap();
            for _ in 0..*ticks {
                controller.tick().unwrap();
            }
            if controller.state() == ControllerState::Running {
                controller.pause().unwrap();
            }
        }
        Op::Reset => controller.reset(),
    }
}

proptest! {
    #[test]
    fn any_interleaving_delivers_the_reference_stream(
        input in small_input(),
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let (expected, expected_result) = full_trace(input.clone());
        let (mut controller, recorder) = controller_with(input);

        for op in &ops {
            apply(&mut controller, op);
            // whatever has been delivered since the last reset is a prefix
            let delivered = recorder.lock().events.clone();
            prop_assert!(delivered.len() <= expected.len());
            prop_assert_eq!(&delivered[..], &expected[..delivered.len()]);
            prop_assert_eq!(controller.stack().depth(), open_depth(&delivered));
        }

        if controller.state() != ControllerState::Completed {
            prop_assert_eq!(controller.run_to_completion().unwrap(), expected_result);
        }
        prop_assert_eq!(controller.result(), Some(expected_result));
    }

    #[test]
    fn counter_and_tree_agree(input in small_input(), steps in 0usize..60) {
        let (mut controller, recorder) = controller_with(input);
        for _ in 0..steps {
            if controller.state() == ControllerState::Completed {
                break;
            }
            controller.step().unwrap();
        }
        let calls = recorder.lock().events.iter().filter(|e| e.is_call()).count() as u64;
        prop_assert_eq!(controller.call_count(), calls);
        prop_assert_eq!(controller.tree().len() as u64, calls);
    }
}

fn open_depth(events: &[callscope::TraceEvent]) -> usize {
    events
        .iter()
        .fold(0usize, |depth, e| if e.is_call() { depth + 1 } else { depth - 1 })
}
