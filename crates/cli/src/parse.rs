//! ArgMatches → CliAction conversion.
//!
//! - Controller commands → `CliAction::Execute(Command)`
//! - Paced runs and repeated steps → `CliAction::Drive` / `CliAction::Step`
//! - Projections → `CliAction::View`
//!
//! REPL meta-commands are recognised separately by [`check_meta_command`].

use callscope_executor::{Algorithm, Command, Input};
use clap::ArgMatches;

/// The result of parsing user input.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// A single controller command.
    Execute(Command),
    /// Start (optionally selecting first) and drive ticks until done or
    /// `limit` events have been delivered.
    Drive {
        select: Option<Input>,
        limit: Option<u64>,
    },
    /// `count` single steps, printing each.
    Step(u64),
    /// Render a projection.
    View(View),
}

/// Renderable projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Tree,
    Stack,
    History,
    Algorithms,
}

/// REPL meta-commands.
#[derive(Debug, PartialEq, Eq)]
pub enum MetaCommand {
    Help { command: Option<String> },
    Quit,
    Clear,
}

/// Check for REPL meta-commands before delegating to clap.
///
/// Returns `Some(MetaCommand)` if the line is a meta-command, `None` otherwise.
pub fn check_meta_command(line: &str) -> Option<MetaCommand> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "quit" | "exit" => Some(MetaCommand::Quit),
        "clear" => Some(MetaCommand::Clear),
        "help" => Some(MetaCommand::Help {
            command: parts.next().map(str::to_string),
        }),
        _ => None,
    }
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, m) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "select" => Ok(CliAction::Execute(Command::Select {
            input: parse_input(m)?,
        })),
        "start" => Ok(CliAction::Drive {
            select: None,
            limit: m.get_one::<u64>("for").copied(),
        }),
        "step" => Ok(CliAction::Step(m.get_one::<u64>("count").copied().unwrap_or(1))),
        "pause" => Ok(CliAction::Execute(Command::Pause)),
        "reset" => Ok(CliAction::Execute(Command::Reset)),
        "delay" => {
            let ms = m
                .get_one::<u64>("ms")
                .copied()
                .ok_or("Missing delay in milliseconds")?;
            Ok(CliAction::Execute(Command::SetDelay { ms }))
        }
        "run" => Ok(CliAction::Drive {
            select: Some(parse_input(m)?),
            limit: None,
        }),
        "tree" => Ok(CliAction::View(View::Tree)),
        "stack" => Ok(CliAction::View(View::Stack)),
        "history" => Ok(CliAction::View(View::History)),
        "status" => Ok(CliAction::Execute(Command::Status)),
        "info" => match m.get_one::<String>("algorithm") {
            Some(name) => Ok(CliAction::Execute(Command::Describe {
                algorithm: parse_algorithm(name)?,
            })),
            None => Ok(CliAction::View(View::Algorithms)),
        },
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn parse_algorithm(name: &str) -> Result<Algorithm, String> {
    name.parse::<Algorithm>().map_err(|e| e.to_string())
}

/// Join the `input` values with commas so `48 18`, `48,18` and `48, 18`
/// all parse the same way.
fn parse_input(m: &ArgMatches) -> Result<Input, String> {
    let name = m
        .get_one::<String>("algorithm")
        .ok_or("Missing algorithm")?;
    let algorithm = parse_algorithm(name)?;
    let text = m
        .get_many::<String>("input")
        .map(|values| {
            values
                .flat_map(|v| v.split(','))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_default();
    Input::parse(algorithm, &text).map_err(|e| e.to_string())
}
