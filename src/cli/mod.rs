//! CLI module - argument parsing, interactive prompts and command runners

mod args;
pub mod commands;
mod prompts;

pub use args::{Cli, Commands, EstimateArgs};
pub use commands::*;
pub use prompts::*;
