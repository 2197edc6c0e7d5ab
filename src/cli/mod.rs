//! Command Line Interface (CLI) layer for DeepTor.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `prepare`, `mask` and
//! `segment` subcommands. It wires user-provided options to the library
//! functionality exposed via `deeptor::api`.
//!
//! If you are embedding DeepTor into another application, prefer using
//! the library API instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
