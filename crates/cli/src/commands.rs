//! clap command tree.
//!
//! The same tree serves shell mode (`callscope run factorial 5`) and each
//! line typed in REPL or pipe mode.

use clap::{Arg, ArgAction, Command};

const ALGORITHM_HELP: &str = "factorial | fibonacci | gcd | power | sum_array";

/// Build the top-level CLI.
pub fn build_cli() -> Command {
    Command::new("callscope")
        .about("Step through traced recursive algorithms")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("delay")
                .long("delay")
                .short('d')
                .global(true)
                .value_name("MS")
                .value_parser(clap::value_parser!(u64))
                .help("Milliseconds between paced pulls"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("raw")
                .help("Print output as JSON"),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print bare values without decoration"),
        )
        .subcommand(
            Command::new("select")
                .about("Choose an algorithm and its input; resets the run")
                .arg(algorithm_arg())
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("start")
                .about("Start or resume paced execution")
                .arg(
                    Arg::new("for")
                        .long("for")
                        .value_name("EVENTS")
                        .value_parser(clap::value_parser!(u64))
                        .help("Pause after this many events"),
                ),
        )
        .subcommand(
            Command::new("step").about("Deliver exactly one event").arg(
                Arg::new("count")
                    .value_parser(clap::value_parser!(u64).range(1..))
                    .help("Number of single steps to take"),
            ),
        )
        .subcommand(Command::new("pause").about("Stop paced execution"))
        .subcommand(Command::new("reset").about("Discard the run and clear all views"))
        .subcommand(
            Command::new("delay").about("Change the pacing delay").arg(
                Arg::new("ms")
                    .required(true)
                    .value_parser(clap::value_parser!(u64))
                    .help("Milliseconds between pulls"),
            ),
        )
        .subcommand(
            Command::new("run")
                .about("Select and run to completion")
                .arg(algorithm_arg())
                .arg(input_arg()),
        )
        .subcommand(Command::new("tree").about("Show the call tree"))
        .subcommand(Command::new("stack").about("Show the live call stack, innermost first"))
        .subcommand(Command::new("history").about("Show every delivered event"))
        .subcommand(Command::new("status").about("Show controller state and counters"))
        .subcommand(
            Command::new("info")
                .about("Describe an algorithm, or list them all")
                .arg(Arg::new("algorithm").help(ALGORITHM_HELP)),
        )
}

fn algorithm_arg() -> Arg {
    Arg::new("algorithm").required(true).help(ALGORITHM_HELP)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .num_args(1..)
        .allow_negative_numbers(true)
        .required(true)
        .help("Integers, e.g. `5`, `48 18` or `1,2,3,4`")
}
