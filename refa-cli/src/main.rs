mod matcher;
mod pack;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line front-end for the `refa` regular-expression engine.
#[derive(Debug, Parser)]
#[command(name = "refa", version, about)]
struct RefaArgs {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v for debug, -vv for trace). Also
    /// controllable via RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run full_match: accept only if the whole text matches PATTERN.
    Match { pattern: String, text: String },
    /// Run prefix_match: report the longest accepting prefix of TEXT.
    Prefix { pattern: String, text: String },
    /// Run search: report the first (leftmost) match of PATTERN in TEXT.
    Search { pattern: String, text: String },
    /// Run find_all: report every maximal, non-overlapping match.
    FindAll { pattern: String, text: String },
    /// Compile PATTERN and write the packed DFA to FILE.
    Compile {
        pattern: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Load a packed DFA from FILE and run full_match against TEXT.
    Run { file: PathBuf, text: String },
}

fn main() -> ExitCode {
    let args = RefaArgs::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    let result: Result<(), String> = match &args.command {
        Command::Match { pattern, text } => {
            matcher::run(matcher::Op::Full, pattern, text).map_err(|e| e.to_string())
        }
        Command::Prefix { pattern, text } => {
            matcher::run(matcher::Op::Prefix, pattern, text).map_err(|e| e.to_string())
        }
        Command::Search { pattern, text } => {
            matcher::run(matcher::Op::Search, pattern, text).map_err(|e| e.to_string())
        }
        Command::FindAll { pattern, text } => {
            matcher::run(matcher::Op::FindAll, pattern, text).map_err(|e| e.to_string())
        }
        Command::Compile { pattern, output } => {
            pack::compile(pattern, output).map_err(|e| e.to_string())
        }
        Command::Run { file, text } => pack::run(file, text).map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
