//! Command runners for each subcommand

use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;
use serde_json::json;

use super::args::{Cli, Commands, EstimateArgs};
use super::prompts::select_location;
use crate::pipeline::{estimate, Dataset, DatasetCache, PipelineError};
use crate::report::{
    comparison_rows, display_comparison, display_estimate, display_overview, display_summary,
    display_tiers, print_json,
};
use crate::utils::{
    create_spinner, finish_with_failure, finish_with_success, print_banner, print_info,
    print_source, print_warning,
};

/// Dispatch a parsed command line
pub fn run(cli: &Cli) -> Result<()> {
    // The estimator never needs the dataset
    if let Commands::Estimate(args) = &cli.command {
        return run_estimate(args, cli.json);
    }

    let cache = DatasetCache::new(cli.data.clone(), cli.load_options());
    if !cli.json {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_source(cache.path());
    }
    let dataset = load_dataset(&cache, cli.json)?;

    match &cli.command {
        Commands::Countries => run_countries(&dataset, cli.json),
        Commands::Cities { country } => run_cities(&dataset, country, cli.json),
        Commands::Overview { country, city } => {
            match select_location(&dataset, country.clone(), city.clone())? {
                Some((country, city)) => run_overview(&dataset, &country, &city, cli.json),
                None => run_unknown_country(country.as_deref().unwrap_or_default(), cli.json),
            }
        }
        Commands::Compare {
            country_a,
            city_a,
            country_b,
            city_b,
        } => run_compare(
            &dataset,
            (country_a.as_str(), city_a.as_str()),
            (country_b.as_str(), city_b.as_str()),
            cli.json,
        ),
        Commands::Tiers => run_tiers(&dataset, cli.json),
        Commands::Estimate(args) => run_estimate(args, cli.json),
    }
}

/// Load through the cache, with a spinner unless output is machine-readable
pub fn load_dataset(cache: &DatasetCache, quiet: bool) -> Result<Arc<Dataset>> {
    if quiet {
        return cache.get().map_err(explain_load_error);
    }

    println!();
    let spinner = create_spinner("Loading and indexing survey data...");
    match cache.get() {
        Ok(dataset) => {
            finish_with_success(&spinner, &format!("Indexed {} cities", dataset.len()));
            display_summary(dataset.summary());
            Ok(dataset)
        }
        Err(err) => {
            finish_with_failure(&spinner);
            Err(explain_load_error(err))
        }
    }
}

fn explain_load_error(err: PipelineError) -> anyhow::Error {
    let hint = match &err {
        PipelineError::EmptyResult => "No data: every row was discarded as too sparse",
        PipelineError::DataFormat(_) => "The data file does not match the expected schema",
        _ => "Failed to load the data file",
    };
    anyhow::Error::new(err).context(hint)
}

pub fn run_countries(dataset: &Dataset, json: bool) -> Result<()> {
    let countries = dataset.countries();
    if json {
        return print_json(&countries);
    }
    println!();
    for country in &countries {
        println!("    {} {}", style("•").dim(), country);
    }
    println!();
    print_info(&format!("{} countries", countries.len()));
    Ok(())
}

pub fn run_cities(dataset: &Dataset, country: &str, json: bool) -> Result<()> {
    let cities = dataset.cities(country);
    if json {
        return print_json(&cities);
    }
    if cities.is_empty() {
        print_warning(&format!("No cities found for '{}'", country));
        return Ok(());
    }
    println!();
    for city in &cities {
        println!("    {} {}", style("•").dim(), city);
    }
    println!();
    print_info(&format!("{} cities in {}", cities.len(), country));
    Ok(())
}

pub fn run_overview(dataset: &Dataset, country: &str, city: &str, json: bool) -> Result<()> {
    let record = dataset.find(country, city);
    if json {
        return print_json(&record);
    }
    match record {
        Some(record) => display_overview(record),
        None => print_warning(&format!("No data available for {}, {}", city, country)),
    }
    Ok(())
}

/// Notice for a country with no cities in the dataset
pub fn run_unknown_country(country: &str, json: bool) -> Result<()> {
    if json {
        return print_json(&serde_json::Value::Null);
    }
    print_warning(&format!("No data available for {}", country));
    Ok(())
}

pub fn run_compare(
    dataset: &Dataset,
    first: (&str, &str),
    second: (&str, &str),
    json: bool,
) -> Result<()> {
    let a = dataset.find(first.0, first.1);
    let b = dataset.find(second.0, second.1);

    match (a, b) {
        (Some(a), Some(b)) => {
            if json {
                print_json(&json!({
                    "first": a,
                    "second": b,
                    "rows": comparison_rows(a, b),
                }))
            } else {
                display_comparison(a, b);
                Ok(())
            }
        }
        _ => {
            if json {
                return print_json(&serde_json::Value::Null);
            }
            for ((country, city), found) in [(first, a.is_some()), (second, b.is_some())] {
                if !found {
                    print_warning(&format!("No data available for {}, {}", city, country));
                }
            }
            Ok(())
        }
    }
}

pub fn run_estimate(args: &EstimateArgs, json: bool) -> Result<()> {
    let input = args.to_input();
    let result = estimate(&input).context("Could not compute the estimate")?;
    if json {
        return print_json(&result);
    }
    display_estimate(&input, &result);
    Ok(())
}

pub fn run_tiers(dataset: &Dataset, json: bool) -> Result<()> {
    if json {
        let counts: serde_json::Map<String, serde_json::Value> = dataset
            .tier_counts()
            .into_iter()
            .map(|(tier, count)| (tier.to_string(), json!(count)))
            .collect();
        return print_json(&json!({
            "edges": dataset.tier_edges(),
            "counts": counts,
        }));
    }
    display_tiers(dataset);
    Ok(())
}
