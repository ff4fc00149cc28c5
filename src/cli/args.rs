//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{CustomEstimateInput, LoadOptions};

/// Costlens - estimate and compare the cost of living across cities
#[derive(Parser, Debug)]
#[command(name = "costlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Price-survey file with `country`, `city` and `x1`..`x55` columns
    #[arg(short, long, global = true, default_value = "cost-of-living.csv")]
    pub data: PathBuf,

    /// Field delimiter of the data file (single ASCII character)
    #[arg(long, global = true, default_value = ",", value_parser = validate_separator)]
    pub separator: u8,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan (slow for large files).
    #[arg(long, global = true, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Print results as JSON instead of tables
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all countries in the dataset
    Countries,

    /// List the cities of one country
    Cities {
        /// Country name (exact match)
        #[arg(short, long)]
        country: String,
    },

    /// Category breakdown, cost of living, ratio and income tier for one city.
    /// Country and city are chosen interactively when omitted.
    Overview {
        #[arg(short, long)]
        country: Option<String>,

        #[arg(long)]
        city: Option<String>,
    },

    /// Compare two cities side by side
    Compare {
        #[arg(long)]
        country_a: String,

        #[arg(long)]
        city_a: String,

        #[arg(long)]
        country_b: String,

        #[arg(long)]
        city_b: String,
    },

    /// Estimate cost of living from your own monthly amounts (no dataset needed)
    Estimate(EstimateArgs),

    /// Income tier edges and record counts per tier
    Tiers,
}

/// Monthly amounts for the custom estimator
#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    /// Monthly net income
    #[arg(long, default_value = "3000", value_parser = validate_positive)]
    pub income: f64,

    #[arg(long, default_value = "1000", value_parser = validate_non_negative)]
    pub housing: f64,

    /// Food & Restaurants
    #[arg(long, default_value = "400", value_parser = validate_non_negative)]
    pub food: f64,

    #[arg(long, default_value = "300", value_parser = validate_non_negative)]
    pub groceries: f64,

    #[arg(long, default_value = "200", value_parser = validate_non_negative)]
    pub transportation: f64,

    /// Utilities & Lifestyle
    #[arg(long, default_value = "150", value_parser = validate_non_negative)]
    pub utilities: f64,

    #[arg(long, default_value = "100", value_parser = validate_non_negative)]
    pub education: f64,
}

impl EstimateArgs {
    pub fn to_input(&self) -> CustomEstimateInput {
        CustomEstimateInput {
            income: self.income,
            housing: self.housing,
            food_restaurants: self.food,
            groceries: self.groceries,
            transportation: self.transportation,
            utilities_lifestyle: self.utilities,
            education: self.education,
        }
    }
}

impl Cli {
    /// Loader settings derived from the global flags
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            separator: self.separator,
            infer_schema_length: self.infer_schema_length,
        }
    }
}

/// Validator for the separator parameter
fn validate_separator(s: &str) -> Result<u8, String> {
    let unescaped = if s == "\\t" { "\t" } else { s };
    match unescaped.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!(
            "separator must be a single ASCII character, got '{}'",
            s
        )),
    }
}

/// Validator for strictly positive amounts
fn validate_positive(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("value must be greater than 0, got {}", value))
    }
}

/// Validator for non-negative amounts
fn validate_non_negative(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("value must be 0 or greater, got {}", value))
    }
}
