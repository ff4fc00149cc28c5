//! Dataset loader for delimited price-survey files

use std::path::Path;
use std::sync::Arc;

use polars::prelude::*;

use super::error::{PipelineError, Result};
use super::schema::{
    all_fields, required_columns, FieldId, CITY_COLUMN, COUNTRY_COLUMN, MISSING_SENTINELS,
    NUMERIC_FIELD_COUNT,
};

/// Settings that control how the source file is read
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field delimiter
    pub separator: u8,
    /// Number of rows used for CSV type inference
    pub infer_schema_length: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            infer_schema_length: 10000,
        }
    }
}

/// One surveyed city as read from the source; `None` marks a missing cell
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub country: Option<String>,
    pub city: Option<String>,
    pub values: Vec<Option<f64>>,
}

impl RawRecord {
    pub fn value(&self, field: FieldId) -> Option<f64> {
        self.values.get(field.index()).copied().flatten()
    }

    /// Count of missing numeric fields
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}

/// Read the source file into a DataFrame without interpreting it.
///
/// Numeric fields are read as text and parsed by [`extract_records`], so
/// their values never depend on type inference. The inference length only
/// affects the label columns and any extra columns.
pub fn read_source(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    if !path.exists() {
        return Err(PipelineError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Data file not found: {}", path.display()),
        )));
    }

    // Zero means full table scan
    let infer_length = if options.infer_schema_length == 0 {
        None
    } else {
        Some(options.infer_schema_length)
    };
    let reader = || {
        LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(options.separator)
            .with_infer_schema_length(infer_length)
    };

    let header = reader().finish()?.collect_schema()?;
    let text_fields: Schema = all_fields()
        .map(FieldId::column_name)
        .filter(|name| header.contains(name))
        .map(|name| Field::new(name.into(), DataType::String))
        .collect();

    let df = reader()
        .with_dtype_overwrite(Some(Arc::new(text_fields)))
        .finish()?
        .collect()?;

    Ok(df)
}

/// Verify that every required column is present in the header
pub fn validate_columns(df: &DataFrame) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<String> = required_columns()
        .into_iter()
        .filter(|c| !present.contains(c))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::DataFormat(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

/// Convert a validated DataFrame into raw records
pub fn extract_records(df: &DataFrame) -> Result<Vec<RawRecord>> {
    validate_columns(df)?;

    let countries = string_column(df, COUNTRY_COLUMN)?;
    let cities = string_column(df, CITY_COLUMN)?;

    let mut numeric: Vec<Vec<Option<f64>>> = Vec::with_capacity(NUMERIC_FIELD_COUNT);
    for field in all_fields() {
        numeric.push(numeric_column(df, field)?);
    }

    let records = (0..df.height())
        .map(|row| RawRecord {
            country: countries[row].clone(),
            city: cities[row].clone(),
            values: numeric.iter().map(|column| column[row]).collect(),
        })
        .collect();

    Ok(records)
}

/// Load raw records from a delimited file
pub fn load_raw_records(path: &Path, options: &LoadOptions) -> Result<Vec<RawRecord>> {
    let df = read_source(path, options)?;
    log::info!(
        "Read {} row(s) and {} column(s) from {}",
        df.height(),
        df.width(),
        path.display()
    );
    extract_records(&df)
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let values = column
        .str()?
        .into_iter()
        .map(|v| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .collect();
    Ok(values)
}

fn numeric_column(df: &DataFrame, field: FieldId) -> Result<Vec<Option<f64>>> {
    let name = field.column_name();
    let text = df.column(&name)?.cast(&DataType::String)?;

    text.str()?
        .into_iter()
        .enumerate()
        .map(|(row, cell)| parse_cell(cell, &name, row))
        .collect()
}

/// Parse one numeric cell; blanks and missing-value markers become `None`
fn parse_cell(cell: Option<&str>, column: &str, row: usize) -> Result<Option<f64>> {
    let text = match cell.map(str::trim) {
        Some(text) if !text.is_empty() && !MISSING_SENTINELS.contains(&text) => text,
        _ => return Ok(None),
    };

    let value: f64 = text.parse().map_err(|_| {
        PipelineError::DataFormat(format!(
            "column '{}' row {}: '{}' is not a number",
            column,
            row + 1,
            text
        ))
    })?;

    if !value.is_finite() {
        return Err(PipelineError::DataFormat(format!(
            "column '{}' row {}: '{}' is not a finite number",
            column,
            row + 1,
            text
        )));
    }

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey_frame() -> DataFrame {
        let mut columns = vec![
            Column::new("country".into(), ["Norway", "Chile"]),
            Column::new("city".into(), ["Oslo", "Santiago"]),
        ];
        for field in all_fields() {
            let values = [Some(field.0 as f64), None];
            columns.push(Column::new(field.column_name().into(), values));
        }
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_extract_records() {
        let df = survey_frame();
        let records = extract_records(&df).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].country.as_deref(), Some("Norway"));
        assert_eq!(records[0].value(FieldId(17)), Some(17.0));
        assert_eq!(records[0].missing_count(), 0);
        assert_eq!(records[1].missing_count(), NUMERIC_FIELD_COUNT);
    }

    #[test]
    fn test_missing_column_is_format_error() {
        let df = survey_frame().drop("x42").unwrap();
        let err = extract_records(&df).unwrap_err();

        assert!(matches!(err, PipelineError::DataFormat(_)));
        assert!(err.to_string().contains("x42"));
    }

    #[test]
    fn test_non_numeric_column_is_format_error() {
        let mut df = survey_frame();
        df.with_column(Column::new("x3".into(), ["cheap", "dear"]))
            .unwrap();

        let err = extract_records(&df).unwrap_err();
        assert!(matches!(err, PipelineError::DataFormat(_)));
        assert!(err.to_string().contains("'cheap'"));
    }

    #[test]
    fn test_missing_markers_in_numeric_cells() {
        assert_eq!(parse_cell(Some("NA"), "x1", 0).unwrap(), None);
        assert_eq!(parse_cell(Some(" n/a "), "x1", 0).unwrap(), None);
        assert_eq!(parse_cell(Some("#N/A"), "x1", 0).unwrap(), None);
        assert_eq!(parse_cell(Some(""), "x1", 0).unwrap(), None);
        assert_eq!(parse_cell(None, "x1", 0).unwrap(), None);
        assert_eq!(parse_cell(Some(" 2.5 "), "x1", 0).unwrap(), Some(2.5));
    }

    #[test]
    fn test_infinite_cells_are_format_error() {
        for text in ["inf", "-inf", "infinity"] {
            let err = parse_cell(Some(text), "x9", 4).unwrap_err();
            assert!(matches!(err, PipelineError::DataFormat(_)));
            assert!(err.to_string().contains("row 5"));
        }
    }

    #[test]
    fn test_blank_city_is_missing() {
        let mut df = survey_frame();
        df.with_column(Column::new("city".into(), ["  ", "Santiago"]))
            .unwrap();

        let records = extract_records(&df).unwrap();
        assert_eq!(records[0].city, None);
        assert_eq!(records[1].city.as_deref(), Some("Santiago"));
    }
}
