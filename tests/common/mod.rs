//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

use costlens::pipeline::{RawRecord, NUMERIC_FIELD_COUNT};
use rand::Rng;
use tempfile::TempDir;

/// Zero-based index of the net monthly salary field (`x54`)
pub const INCOME_INDEX: usize = 53;

/// One survey row as it appears in the CSV file; `None` writes an empty cell
#[derive(Debug, Clone)]
pub struct SurveyRow {
    pub country: String,
    pub city: String,
    pub values: Vec<Option<f64>>,
}

impl SurveyRow {
    /// A complete row where field `xN` holds `base + N`
    pub fn complete(country: &str, city: &str, base: f64) -> Self {
        Self {
            country: country.to_string(),
            city: city.to_string(),
            values: (1..=NUMERIC_FIELD_COUNT).map(|n| Some(base + n as f64)).collect(),
        }
    }

    /// A complete row with a specific monthly income
    pub fn with_income(country: &str, city: &str, income: f64) -> Self {
        let mut row = Self::complete(country, city, 10.0);
        row.values[INCOME_INDEX] = Some(income);
        row
    }

    /// Blank out the first `count` numeric fields
    pub fn with_missing(mut self, count: usize) -> Self {
        for v in self.values.iter_mut().take(count) {
            *v = None;
        }
        self
    }

    pub fn into_raw(self) -> RawRecord {
        RawRecord {
            country: Some(self.country),
            city: Some(self.city),
            values: self.values,
        }
    }
}

/// Header line with every required column
pub fn survey_header(separator: char) -> String {
    let mut columns = vec!["country".to_string(), "city".to_string()];
    columns.extend((1..=NUMERIC_FIELD_COUNT).map(|n| format!("x{}", n)));
    columns.join(&separator.to_string())
}

fn format_row(row: &SurveyRow, separator: char) -> String {
    let mut cells = vec![row.country.clone(), row.city.clone()];
    cells.extend(
        row.values
            .iter()
            .map(|v| v.map(|x| x.to_string()).unwrap_or_default()),
    );
    cells.join(&separator.to_string())
}

/// Create a temporary directory with a survey CSV file
pub fn create_survey_csv(rows: &[SurveyRow]) -> (TempDir, PathBuf) {
    create_survey_file(rows, ',', "cost-of-living.csv")
}

/// Create a temporary survey file with a custom separator
pub fn create_survey_file(rows: &[SurveyRow], separator: char, name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);

    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{}", survey_header(separator)).unwrap();
    for row in rows {
        writeln!(file, "{}", format_row(row, separator)).unwrap();
    }
    drop(file);

    (temp_dir, path)
}

/// Write arbitrary text to a temporary file
pub fn create_text_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

/// A small realistic dataset: three countries, one duplicate, one sparse row
pub fn create_world_rows() -> Vec<SurveyRow> {
    vec![
        SurveyRow::with_income("Germany", "Berlin", 3200.0),
        SurveyRow::with_income("Germany", "Munich", 3900.0),
        SurveyRow::with_income("Germany", "Leipzig", 2400.0).with_missing(5),
        SurveyRow::with_income("India", "Pune", 600.0),
        SurveyRow::with_income("India", "Delhi", 750.0),
        SurveyRow::with_income("Mexico", "Puebla", 500.0),
        SurveyRow::with_income("Mexico", "Puebla", 500.0),
        SurveyRow::with_income("Mexico", "Merida", 450.0).with_missing(30),
    ]
}

/// Random rows with at most `max_missing` blank fields each.
/// The first row is complete so every field can be imputed.
pub fn random_rows(rng: &mut impl Rng, count: usize, max_missing: usize) -> Vec<SurveyRow> {
    let countries = ["Aland", "Borduria", "Carpania", "Dorne"];
    (0..count)
        .map(|i| {
            let country = countries[rng.gen_range(0..countries.len())];
            let mut values: Vec<Option<f64>> = (0..NUMERIC_FIELD_COUNT)
                .map(|_| Some(rng.gen_range(1..5000) as f64 / 4.0))
                .collect();
            if i > 0 {
                let missing = rng.gen_range(0..=max_missing);
                for _ in 0..missing {
                    let idx = rng.gen_range(0..NUMERIC_FIELD_COUNT);
                    values[idx] = None;
                }
            }
            SurveyRow {
                country: country.to_string(),
                city: format!("City {}", i),
                values,
            }
        })
        .collect()
}
