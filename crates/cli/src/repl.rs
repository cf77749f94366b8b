//! REPL and pipe modes.
//!
//! Each line is split with shlex and parsed by the same clap tree as shell
//! mode. Meta-commands (`help`, `quit`, `clear`) are checked first.

use std::io::BufRead;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use callscope_executor::Output;

use crate::commands::build_cli;
use crate::format::{format_error, format_output, format_view, OutputMode};
use crate::parse::{check_meta_command, matches_to_action, CliAction, MetaCommand};
use crate::state::SessionState;

const PROMPT: &str = "callscope> ";

/// Outcome of one input line.
enum LineResult {
    Continue,
    Failed,
    Clear,
    Quit,
}

/// Interactive prompt with line editing and history.
pub fn run_repl(state: &mut SessionState, mode: OutputMode) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("(error) Failed to start line editor: {}", e);
            return;
        }
    };

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                match process_line(&line, state, mode) {
                    LineResult::Quit => break,
                    LineResult::Clear => {
                        let _ = rl.clear_screen();
                    }
                    LineResult::Continue | LineResult::Failed => {}
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("(error) {}", e);
                break;
            }
        }
    }
}

/// Execute stdin line by line. Returns the process exit code: 1 if any
/// line failed.
pub fn run_pipe(state: &mut SessionState, mode: OutputMode) -> i32 {
    let stdin = std::io::stdin();
    let mut exit_code = 0;
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("(error) {}", e);
                return 1;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match process_line(trimmed, state, mode) {
            LineResult::Quit => break,
            LineResult::Failed => exit_code = 1,
            LineResult::Continue | LineResult::Clear => {}
        }
    }
    exit_code
}

fn process_line(line: &str, state: &mut SessionState, mode: OutputMode) -> LineResult {
    if let Some(meta) = check_meta_command(line) {
        return match meta {
            MetaCommand::Quit => LineResult::Quit,
            MetaCommand::Clear => LineResult::Clear,
            MetaCommand::Help { command } => {
                print_help(command.as_deref());
                LineResult::Continue
            }
        };
    }

    let Some(words) = shlex::split(line) else {
        eprintln!("(error) Unbalanced quotes");
        return LineResult::Failed;
    };
    let argv = std::iter::once("callscope".to_string()).chain(words);
    let matches = match build_cli().try_get_matches_from(argv) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e.render());
            return LineResult::Failed;
        }
    };

    match matches_to_action(&matches) {
        Ok(action) => {
            if run_action(action, state, mode) {
                LineResult::Continue
            } else {
                LineResult::Failed
            }
        }
        Err(e) => {
            eprintln!("(error) {}", e);
            LineResult::Failed
        }
    }
}

/// Run a parsed action, printing its output. Returns false on error.
pub fn run_action(action: CliAction, state: &mut SessionState, mode: OutputMode) -> bool {
    let print = |output: &Output| {
        let formatted = format_output(output, mode);
        if !formatted.is_empty() {
            println!("{}", formatted);
        }
    };

    let result = match action {
        CliAction::Execute(cmd) => state.execute(cmd).map(|output| print(&output)),
        CliAction::Drive { select, limit } => state.drive(select, limit, print),
        CliAction::Step(count) => state.step(count, print),
        CliAction::View(view) => {
            println!("{}", format_view(view, state.controller(), mode));
            Ok(())
        }
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            false
        }
    }
}

fn print_help(command: Option<&str>) {
    let mut cli = build_cli();
    if let Some(sub) = command.and_then(|name| cli.find_subcommand_mut(name)) {
        let _ = sub.print_help();
        return;
    }
    let _ = cli.print_help();
    println!("\nREPL only: help [command], clear, quit | exit");
}
