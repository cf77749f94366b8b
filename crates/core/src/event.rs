//! Trace events
//!
//! A run produces a well-nested sequence of [`TraceEvent`]s: every Return
//! matches exactly one earlier Call with the same [`CallId`], and a Call's
//! Return only follows once every Call issued beneath it has returned.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::algorithm::Algorithm;

/// Identifier of one activation
///
/// Allocated from a per-run counter, so equal arguments at different depths
/// never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(pub u64);

impl CallId {
    /// The raw counter value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether an event marks entry to or exit from an activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Activation entered
    Call,
    /// Activation produced its value
    Return,
}

impl EventKind {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Call => "call",
            EventKind::Return => "return",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Local variables of an activation at the moment of emission
///
/// Keys are unique; inserting an existing name overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locals(BTreeMap<String, i64>);

impl Locals {
    /// Create an empty set of locals
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, value: i64) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a local, replacing any previous value
    pub fn insert(&mut self, name: &str, value: i64) {
        self.0.insert(name.to_string(), value);
    }

    /// Look up a local by name
    pub fn get(&self, name: &str) -> Option<i64> {
        self.0.get(name).copied()
    }

    /// Number of locals
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no locals are recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl std::fmt::Display for Locals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
            first = false;
        }
        Ok(())
    }
}

/// A single observable point in a traced run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Call or Return
    pub kind: EventKind,
    /// Activation this event belongs to
    pub call_id: CallId,
    /// Algorithm the activation runs
    pub function: Algorithm,
    /// Human-readable arguments, e.g. `"a=12,b=8"`
    pub arguments: String,
    /// Issuing activation; set only on Call events, `None` for the root
    pub parent_id: Option<CallId>,
    /// Locals at emission time
    pub locals: Locals,
    /// Value produced; set only on Return events
    pub value: Option<i64>,
}

impl TraceEvent {
    /// Build a Call event
    pub fn call(
        call_id: CallId,
        function: Algorithm,
        arguments: String,
        parent_id: Option<CallId>,
        locals: Locals,
    ) -> Self {
        Self {
            kind: EventKind::Call,
            call_id,
            function,
            arguments,
            parent_id,
            locals,
            value: None,
        }
    }

    /// Build a Return event
    pub fn ret(
        call_id: CallId,
        function: Algorithm,
        arguments: String,
        locals: Locals,
        value: i64,
    ) -> Self {
        Self {
            kind: EventKind::Return,
            call_id,
            function,
            arguments,
            parent_id: None,
            locals,
            value: Some(value),
        }
    }

    /// Check if this is a Call event
    pub fn is_call(&self) -> bool {
        matches!(self.kind, EventKind::Call)
    }

    /// Check if this is a Return event
    pub fn is_return(&self) -> bool {
        matches!(self.kind, EventKind::Return)
    }

    /// `function(arguments)` label used by renderers
    pub fn label(&self) -> String {
        format!("{}({})", self.function, self.arguments)
    }
}

impl std::fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            EventKind::Call => write!(f, "call   {} {}", self.call_id, self.label())?,
            EventKind::Return => {
                write!(f, "return {} {}", self.call_id, self.label())?;
                if let Some(value) = self.value {
                    write!(f, " = {}", value)?;
                }
            }
        }
        if !self.locals.is_empty() {
            write!(f, " [{}]", self.locals)?;
        }
        Ok(())
    }
}
