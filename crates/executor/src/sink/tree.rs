//! Call-tree projection

use callscope_core::{Algorithm, CallId, EventKind, Locals, TraceEvent};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use super::TraceSink;

/// Deepest level [`CallTree::render`] indents to
pub const MAX_RENDER_INDENT: usize = 32;

/// Lifecycle of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// Call seen, Return not yet
    Running,
    /// Return seen
    Completed,
}

/// One activation in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallNode {
    /// Activation id
    pub id: CallId,
    /// Algorithm of the activation
    pub function: Algorithm,
    /// Argument descriptor
    pub arguments: String,
    /// Issuing activation, `None` for the root
    pub parent: Option<CallId>,
    /// Child activations in call order
    pub children: Vec<CallId>,
    /// Running or Completed
    pub status: NodeStatus,
    /// Set when Completed
    pub return_value: Option<i64>,
    /// Latest locals seen for this activation
    pub locals: Locals,
}

impl CallNode {
    /// `function(arguments)` label
    pub fn label(&self) -> String {
        format!("{}({})", self.function, self.arguments)
    }
}

/// Every activation of the current run, keyed by id
///
/// Nodes are created on Call and completed on the matching Return. They are
/// never removed during a run; only `on_reset` clears the tree.
#[derive(Debug, Clone, Default)]
pub struct CallTree {
    nodes: BTreeMap<CallId, CallNode>,
    root: Option<CallId>,
}

impl CallTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// The root activation
    pub fn root(&self) -> Option<&CallNode> {
        self.root.and_then(|id| self.nodes.get(&id))
    }

    /// Look up a node
    pub fn get(&self, id: CallId) -> Option<&CallNode> {
        self.nodes.get(&id)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no Call has been seen
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &CallNode> {
        self.nodes.values()
    }

    /// Number of Completed nodes
    pub fn completed(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| n.status == NodeStatus::Completed)
            .count()
    }

    /// Distance from the root (root = 0)
    pub fn depth_of(&self, id: CallId) -> Option<usize> {
        let mut node = self.nodes.get(&id)?;
        let mut depth = 0;
        while let Some(parent) = node.parent {
            node = self.nodes.get(&parent)?;
            depth += 1;
        }
        Some(depth)
    }

    /// Indented text rendering, one node per line, in call order
    ///
    /// ```text
    /// factorial(n=2) = 2
    ///   factorial(n=1) = 1
    /// ```
    ///
    /// Indentation stops growing after [`MAX_RENDER_INDENT`] levels; deeper
    /// lines carry a `[depth N]` marker instead.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut pending: Vec<(CallId, usize)> = self.root.into_iter().map(|id| (id, 0)).collect();
        while let Some((id, depth)) = pending.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            out.push_str(&"  ".repeat(depth.min(MAX_RENDER_INDENT)));
            if depth > MAX_RENDER_INDENT {
                out.push_str(&format!("[depth {}] ", depth));
            }
            out.push_str(&node.label());
            match node.return_value {
                Some(value) => out.push_str(&format!(" = {}", value)),
                None => out.push_str(" [running]"),
            }
            out.push('\n');
            pending.extend(node.children.iter().rev().map(|child| (*child, depth + 1)));
        }
        out
    }

    fn on_call(&mut self, event: &TraceEvent) {
        if self.nodes.contains_key(&event.call_id) {
            warn!(call_id = %event.call_id, "duplicate call id ignored by call tree");
            return;
        }
        match event.parent_id {
            Some(parent) => match self.nodes.get_mut(&parent) {
                Some(node) => node.children.push(event.call_id),
                None => warn!(call_id = %event.call_id, %parent, "call under unknown parent"),
            },
            None if self.root.is_none() => self.root = Some(event.call_id),
            None => warn!(call_id = %event.call_id, "second root call ignored"),
        }
        self.nodes.insert(
            event.call_id,
            CallNode {
                id: event.call_id,
                function: event.function,
                arguments: event.arguments.clone(),
                parent: event.parent_id,
                children: Vec::new(),
                status: NodeStatus::Running,
                return_value: None,
                locals: event.locals.clone(),
            },
        );
    }

    fn on_return(&mut self, event: &TraceEvent) {
        match self.nodes.get_mut(&event.call_id) {
            Some(node) => {
                node.status = NodeStatus::Completed;
                node.return_value = event.value;
                node.locals = event.locals.clone();
            }
            None => warn!(call_id = %event.call_id, "return for unknown call"),
        }
    }
}

impl TraceSink for CallTree {
    fn on_event(&mut self, event: &TraceEvent) {
        match event.kind {
            EventKind::Call => self.on_call(event),
            EventKind::Return => self.on_return(event),
        }
    }

    fn on_reset(&mut self) {
        self.nodes.clear();
        self.root = None;
    }
}
