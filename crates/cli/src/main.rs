//! callscope CLI — step through traced recursive algorithms.
//!
//! Three modes:
//! - **Shell mode**: `callscope [flags] COMMAND` — single command, exit
//! - **REPL mode**: `callscope [flags]` — interactive prompt (if stdin is TTY)
//! - **Pipe mode**: `echo "run factorial 5" | callscope` — line-by-line from stdin
//!
//! Logging goes to stderr, filtered by `CALLSCOPE_LOG` (default `warn`).

mod commands;
mod format;
mod parse;
mod repl;
mod state;

use std::io::IsTerminal;
use std::process;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::build_cli;
use format::OutputMode;
use parse::matches_to_action;
use state::SessionState;

const LOG_ENV: &str = "CALLSCOPE_LOG";

fn main() {
    init_logging();

    let matches = build_cli().get_matches();

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("raw") {
        OutputMode::Raw
    } else {
        OutputMode::Human
    };

    let mut state = SessionState::new(matches.get_one::<u64>("delay").copied());

    if matches.subcommand().is_some() {
        let exit_code = run_shell_mode(&matches, &mut state, output_mode);
        process::exit(exit_code);
    } else if std::io::stdin().is_terminal() {
        repl::run_repl(&mut state, output_mode);
    } else {
        let exit_code = repl::run_pipe(&mut state, output_mode);
        process::exit(exit_code);
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_shell_mode(matches: &clap::ArgMatches, state: &mut SessionState, mode: OutputMode) -> i32 {
    match matches_to_action(matches) {
        Ok(action) => {
            if repl::run_action(action, state, mode) {
                0
            } else {
                1
            }
        }
        Err(e) => {
            eprintln!("(error) {}", e);
            1
        }
    }
}
