//! tilereel CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, dispatch to the
//! merge or gif pipeline, and exit with appropriate status.
//! For programmatic use, prefer the library API (`tilereel::api`).

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
