//! Command-line interface definitions.
//!
//! - `Cli`, `Commands`: argument definitions via clap
//! - `Display`: styled terminal output for status and errors

mod commands;
mod display;

pub use commands::{infer_language, Cli, Commands, ConfigAction, OutputFormat, PriorityArg};
pub use display::Display;
