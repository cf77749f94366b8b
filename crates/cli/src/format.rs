//! Output formatting for the three output modes.

use callscope_executor::{Algorithm, AlgorithmDescriptor, Controller, Error, Output};
use serde::Serialize;

use crate::parse::View;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Readable text with labels.
    Human,
    /// One JSON document per output.
    Json,
    /// Bare values, for scripting.
    Raw,
}

/// Format a command output. Empty string means "print nothing".
pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(output),
        OutputMode::Raw => match output {
            Output::Unit | Output::Pending => String::new(),
            Output::Event(event) => event.to_string(),
            Output::Completed { result, .. } => result.to_string(),
            Output::Status(status) => status.state.to_string(),
            Output::Descriptor(d) => d.name.to_string(),
        },
        OutputMode::Human => match output {
            Output::Unit => "OK".to_string(),
            Output::Pending => String::new(),
            Output::Event(event) => event.to_string(),
            Output::Completed { result, elapsed_ms } => {
                format!("result: {} ({:.2} ms)", result, elapsed_ms)
            }
            Output::Status(status) => status.to_string(),
            Output::Descriptor(d) => format_descriptor(d),
        },
    }
}

/// Format an error for stderr.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::json!({ "error": err.to_string() }).to_string(),
        OutputMode::Raw => err.to_string(),
        OutputMode::Human => format!("(error) {}", err),
    }
}

/// Render one of the controller's projections.
pub fn format_view(view: View, controller: &Controller, mode: OutputMode) -> String {
    match (view, mode) {
        (View::Tree, OutputMode::Json) => {
            to_json(&controller.tree().nodes().collect::<Vec<_>>())
        }
        (View::Tree, _) if controller.tree().is_empty() => "(empty tree)".to_string(),
        (View::Tree, _) => trim(controller.tree().render()),

        (View::Stack, OutputMode::Json) => to_json(controller.stack().frames()),
        (View::Stack, _) => trim(controller.stack().render()),

        (View::History, OutputMode::Json) => match controller.history() {
            Some(history) => to_json(history.entries()),
            None => "[]".to_string(),
        },
        (View::History, _) => match controller.history() {
            Some(history) if !history.is_empty() => trim(history.render()),
            Some(_) => "(no events)".to_string(),
            None => "(history disabled)".to_string(),
        },

        (View::Algorithms, OutputMode::Json) => to_json(
            &Algorithm::ALL
                .iter()
                .map(Algorithm::descriptor)
                .collect::<Vec<_>>(),
        ),
        (View::Algorithms, OutputMode::Raw) => Algorithm::ALL
            .iter()
            .map(Algorithm::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        (View::Algorithms, OutputMode::Human) => Algorithm::ALL
            .iter()
            .map(|a| {
                let d = a.descriptor();
                format!("{:<10} {} [{}]", a.as_str(), d.time_complexity, d.input_labels.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn format_descriptor(d: &AlgorithmDescriptor) -> String {
    format!(
        "{}\n{}\ntime: {}  space: {}\ninputs: {}\nrecommended max: {}",
        d.name,
        d.description,
        d.time_complexity,
        d.space_complexity,
        d.input_labels.join(", "),
        d.recommended_max
    )
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

fn trim(mut text: String) -> String {
    while text.ends_with('\n') {
        text.pop();
    }
    text
}
