//! Call-stack projection

use callscope_core::{Algorithm, CallId, EventKind, Locals, TraceEvent};
use serde::Serialize;
use tracing::warn;

use super::TraceSink;

/// A live frame on the projected stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackFrame {
    /// Activation id
    pub call_id: CallId,
    /// Algorithm of the activation
    pub function: Algorithm,
    /// Argument descriptor
    pub arguments: String,
    /// Locals at call time
    pub locals: Locals,
}

/// The live call stack
///
/// Call pushes, Return pops. A Return that does not match the top frame is
/// logged and ignored.
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<StackFrame>,
    max_depth: usize,
}

impl CallStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Current recursion depth
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Deepest point reached this run
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Innermost live frame
    pub fn top(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    /// Frames from outermost to innermost
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    /// True when no activation is live
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Text rendering, innermost frame first
    pub fn render(&self) -> String {
        if self.frames.is_empty() {
            return "Stack is empty\n".to_string();
        }
        let mut out = String::new();
        for frame in self.frames.iter().rev() {
            out.push_str(&format!(
                "{} {}({}) [{}]\n",
                frame.call_id, frame.function, frame.arguments, frame.locals
            ));
        }
        out
    }
}

impl TraceSink for CallStack {
    fn on_event(&mut self, event: &TraceEvent) {
        match event.kind {
            EventKind::Call => {
                self.frames.push(StackFrame {
                    call_id: event.call_id,
                    function: event.function,
                    arguments: event.arguments.clone(),
                    locals: event.locals.clone(),
                });
                self.max_depth = self.max_depth.max(self.frames.len());
            }
            EventKind::Return => match self.frames.last() {
                Some(top) if top.call_id == event.call_id => {
                    self.frames.pop();
                }
                Some(top) => warn!(
                    call_id = %event.call_id,
                    top = %top.call_id,
                    "return does not match top of stack"
                ),
                None => warn!(call_id = %event.call_id, "return on empty stack"),
            },
        }
    }

    fn on_reset(&mut self) {
        self.frames.clear();
        self.max_depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callscope_core::Input;
    use callscope_engine::{Evaluator, Step};

    #[test]
    fn test_depth_follows_recursion() {
        let mut stack = CallStack::new();
        let mut evaluator = Evaluator::new(Input::Factorial { n: 4 }).unwrap();
        while let Step::Event(event) = evaluator.step().unwrap() {
            stack.on_event(&event);
            assert_eq!(stack.depth(), evaluator.depth());
        }
        assert!(stack.is_empty());
        assert_eq!(stack.max_depth(), 4);
    }

    #[test]
    fn test_mismatched_return_is_ignored() {
        let mut stack = CallStack::new();
        let call = TraceEvent::call(
            CallId(1),
            Algorithm::Factorial,
            "n=1".into(),
            None,
            Locals::new(),
        );
        let stray = TraceEvent::ret(CallId(9), Algorithm::Factorial, "n=1".into(), Locals::new(), 1);
        stack.on_event(&call);
        stack.on_event(&stray);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top().unwrap().call_id, CallId(1));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(CallStack::new().render(), "Stack is empty\n");
    }

    #[test]
    fn test_render_innermost_first() {
        let mut stack = CallStack::new();
        let mut evaluator = Evaluator::new(Input::Power {
            base: 2,
            exponent: 1,
        })
        .unwrap();
        for _ in 0..2 {
            if let Step::Event(event) = evaluator.step().unwrap() {
                stack.on_event(&event);
            }
        }
        let rendered = stack.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("#2 power(base=2,exponent=0)"));
        assert!(lines[1].starts_with("#1 power(base=2,exponent=1)"));
    }
}
