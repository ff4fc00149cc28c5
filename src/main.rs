//! Costlens: Cost-of-Living CLI Tool
//!
//! Browse per-city cost-of-living figures derived from price-survey data,
//! compare two cities, or estimate affordability from your own budget.

use anyhow::Result;
use clap::Parser;

use costlens::cli::{run, Cli};

fn main() -> Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();
    run(&cli)
}
