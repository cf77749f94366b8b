//! Event history
//!
//! The textual counterpart of the stack view: every delivered event with the
//! wall-clock time it arrived, plus how the run ended.

use callscope_core::TraceEvent;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use super::TraceSink;

/// A delivered event and its arrival time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// When the controller delivered the event
    pub at: DateTime<Utc>,
    /// The event
    pub event: TraceEvent,
}

/// Append-only log of the current run
#[derive(Debug, Clone, Default)]
pub struct TraceHistory {
    entries: Vec<HistoryEntry>,
    completed: Option<(i64, Duration)>,
    error: Option<String>,
}

impl TraceHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in delivery order
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Events in delivery order, without timestamps
    pub fn events(&self) -> impl Iterator<Item = &TraceEvent> {
        self.entries.iter().map(|entry| &entry.event)
    }

    /// Number of delivered events
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been delivered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Result and elapsed time, once the run completed
    pub fn completed(&self) -> Option<(i64, Duration)> {
        self.completed
    }

    /// Last mid-trace error message
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// One line per event: `HH:MM:SS.mmm call   #1 factorial(n=3) [n=3]`
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!("{} {}\n", entry.at.format("%H:%M:%S%.3f"), entry.event));
        }
        if let Some((result, elapsed)) = self.completed {
            out.push_str(&format!(
                "result {} in {:.2} ms\n",
                result,
                elapsed.as_secs_f64() * 1000.0
            ));
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("error: {}\n", error));
        }
        out
    }
}

impl TraceSink for TraceHistory {
    fn on_event(&mut self, event: &TraceEvent) {
        self.entries.push(HistoryEntry {
            at: Utc::now(),
            event: event.clone(),
        });
    }

    fn on_complete(&mut self, result: i64, elapsed: Duration) {
        self.completed = Some((result, elapsed));
    }

    fn on_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn on_reset(&mut self) {
        self.entries.clear();
        self.completed = None;
        self.error = None;
    }
}
