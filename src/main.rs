//! branch-mirror: clone a git repository and create a local tracking branch
//! for every remote branch.
//!
//! This is the entry point for the `branch-mirror` CLI. It parses arguments,
//! sets up logging, runs the mirror workflow, and maps errors to exit codes.

mod branch;
mod cli;
mod config;
mod error;
mod exit_codes;
mod git;
mod location;
mod logging;
mod mirror;
mod refs;

#[cfg(test)]
mod test_support;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors go to stderr, --help and --version to stdout.
            let _ = err.print();
            return ExitCode::from(cli::parse_failure_exit_code(&err) as u8);
        }
    };

    logging::init(cli.verbose);

    match mirror::cmd_mirror(&cli) {
        Ok(_) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
