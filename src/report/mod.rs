//! Report module - console and JSON renderings of pipeline results

pub mod breakdown;
pub mod comparison;
pub mod estimate;
pub mod summary;

pub use breakdown::*;
pub use comparison::*;
pub use estimate::*;
pub use summary::*;

use anyhow::{Context, Result};
use serde::Serialize;

/// Print any serializable result as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result to JSON")?;
    println!("{}", json);
    Ok(())
}
