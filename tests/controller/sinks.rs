//! Projections fed by the controller

use std::sync::Arc;

use callscope::{CallId, Input, NodeStatus, Step, TraceHistory, TraceSink};
use parking_lot::Mutex;

use crate::common::*;

#[test]
fn stack_depth_tracks_live_activations() {
    let (mut controller, _) = controller_with(Input::Factorial { n: 5 });
    let mut depths = Vec::new();
    while let Step::Event(_) = controller.step().unwrap() {
        depths.push(controller.stack().depth());
    }
    assert_eq!(depths, vec![1, 2, 3, 4, 5, 4, 3, 2, 1, 0]);
    assert_eq!(controller.stack().max_depth(), 5);
}

#[test]
fn stack_top_is_innermost() {
    let (mut controller, _) = controller_with(Input::Gcd { a: 48, b: 18 });
    controller.step().unwrap();
    controller.step().unwrap();
    let top = controller.stack().top().unwrap();
    assert_eq!(top.call_id, CallId(2));
    assert_eq!(top.arguments, "a=18,b=12");
}

#[test]
fn tree_matches_call_structure() {
    let (mut controller, _) = controller_with(Input::Fibonacci { n: 5 });
    controller.run_to_completion().unwrap();

    let tree = controller.tree();
    assert_eq!(tree.len(), 15);
    assert_eq!(tree.len() as u64, controller.call_count());
    assert!(tree.nodes().all(|n| n.status == NodeStatus::Completed));
    for node in tree.nodes() {
        if let Some(parent) = node.parent {
            assert!(tree.get(parent).unwrap().children.contains(&node.id));
        }
    }
    assert_eq!(tree.root().unwrap().return_value, Some(5));
}

#[test]
fn call_counter_equals_call_events() {
    for input in sample_inputs() {
        let (mut controller, recorder) = controller_with(input);
        controller.run_to_completion().unwrap();
        let calls = recorder.lock().events.iter().filter(|e| e.is_call()).count();
        assert_eq!(controller.call_count(), calls as u64);
    }
}

#[test]
fn history_matches_delivery() {
    let (mut controller, recorder) = controller_with(Input::SumArray { values: vec![5, 6, 7] });
    controller.run_to_completion().unwrap();
    let history = controller.history().unwrap();
    let delivered: Vec<_> = history.events().cloned().collect();
    assert_eq!(delivered, recorder.lock().events);
    assert_eq!(history.completed().map(|(r, _)| r), Some(18));
    assert!(history
        .entries()
        .windows(2)
        .all(|w| w[0].at <= w[1].at));
}

#[test]
fn every_sink_sees_the_same_stream() {
    let extra = Arc::new(Mutex::new(TraceHistory::new()));
    let (mut controller, recorder) = controller_with(Input::Power { base: 2, exponent: 4 });
    controller.add_sink(Box::new(Arc::clone(&extra)));
    controller.run_to_completion().unwrap();

    let from_extra: Vec<_> = extra.lock().events().cloned().collect();
    assert_eq!(from_extra, recorder.lock().events);
    assert_eq!(extra.lock().completed().map(|(r, _)| r), Some(16));
}

#[test]
fn sinks_cleared_on_reset() {
    let extra = Arc::new(Mutex::new(TraceHistory::new()));
    let (mut controller, _) = controller_with(Input::Factorial { n: 4 });
    controller.add_sink(Box::new(Arc::clone(&extra)));
    controller.step().unwrap();
    assert_eq!(extra.lock().len(), 1);
    controller.reset();
    assert!(extra.lock().is_empty());
}

/// A sink counting calls by depth, written the way a front end would.
#[derive(Default)]
struct DepthHistogram {
    depth: usize,
    counts: Vec<usize>,
}

impl TraceSink for DepthHistogram {
    fn on_event(&mut self, event: &callscope::TraceEvent) {
        if event.is_call() {
            if self.counts.len() <= self.depth {
                self.counts.push(0);
            }
            self.counts[self.depth] += 1;
            self.depth += 1;
        } else {
            self.depth -= 1;
        }
    }
}

#[test]
fn custom_sink() {
    let histogram = Arc::new(Mutex::new(DepthHistogram::default()));
    let (mut controller, _) = controller_with(Input::Fibonacci { n: 4 });
    controller.add_sink(Box::new(Arc::clone(&histogram)));
    controller.run_to_completion().unwrap();
    assert_eq!(histogram.lock().counts, vec![1, 2, 4, 2]);
}
