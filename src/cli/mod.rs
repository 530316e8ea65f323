//! Command Line Interface (CLI) layer for tilereel.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `merge` and `gif`
//! subcommands. It maps user-provided options onto the parameter structs
//! consumed by `tilereel::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
