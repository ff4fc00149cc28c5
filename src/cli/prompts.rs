//! Interactive prompts using dialoguer

use anyhow::{bail, Result};
use dialoguer::Select;

use crate::pipeline::Dataset;

/// Prompt the user to pick one item from a sorted list
pub fn select_item(prompt: &str, items: &[&str]) -> Result<String> {
    if items.is_empty() {
        bail!("Nothing to choose from for '{}'", prompt);
    }
    let index = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?;
    Ok(items[index].to_string())
}

/// Resolve a (country, city) pair, prompting for whichever part is missing.
///
/// Returns `None` when the city must be chosen but the country has none.
pub fn select_location(
    dataset: &Dataset,
    country: Option<String>,
    city: Option<String>,
) -> Result<Option<(String, String)>> {
    let country = match country {
        Some(c) => c,
        None => select_item("Select Country", &dataset.countries())?,
    };
    let city = match city {
        Some(c) => c,
        None => {
            let cities = dataset.cities(&country);
            if cities.is_empty() {
                return Ok(None);
            }
            select_item("Select City", &cities)?
        }
    };
    Ok(Some((country, city)))
}
