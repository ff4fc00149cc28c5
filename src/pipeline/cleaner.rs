//! Row filtering, two-pass imputation, field pruning and deduplication

use std::collections::{BTreeMap, HashSet};

use rayon::prelude::*;
use serde::Serialize;

use super::error::{PipelineError, Result};
use super::loader::RawRecord;
use super::schema::{
    all_fields, FieldId, MAX_MISSING_FIELDS, NUMERIC_FIELD_COUNT, RETAINED_FIELDS,
};

/// A surveyed city with every retained field present
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanRecord {
    pub country: String,
    pub city: String,
    /// Values aligned with [`RETAINED_FIELDS`]
    values: Vec<f64>,
}

impl CleanRecord {
    /// Build a record from values given in [`RETAINED_FIELDS`] order
    pub fn new(
        country: impl Into<String>,
        city: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self> {
        if values.len() != RETAINED_FIELDS.len() {
            return Err(PipelineError::DataFormat(format!(
                "expected {} retained values, got {}",
                RETAINED_FIELDS.len(),
                values.len()
            )));
        }
        Ok(Self {
            country: country.into(),
            city: city.into(),
            values,
        })
    }

    /// Value of a retained field; `None` for pruned fields
    pub fn value(&self, field: FieldId) -> Option<f64> {
        RETAINED_FIELDS
            .binary_search(&field)
            .ok()
            .map(|pos| self.values[pos])
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn dedup_key(&self) -> (String, String, Vec<u64>) {
        (
            self.country.clone(),
            self.city.clone(),
            self.values.iter().map(|v| v.to_bits()).collect(),
        )
    }
}

/// Counts observed while cleaning one load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub dropped_sparse: usize,
    pub dropped_unlabeled: usize,
    pub filled_by_country: usize,
    pub filled_by_global_mean: usize,
    pub duplicates_removed: usize,
    pub records: usize,
}

/// Step 1: discard rows with too many missing fields or no country/city label
pub fn filter_sparse_rows(records: Vec<RawRecord>, summary: &mut LoadSummary) -> Vec<RawRecord> {
    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        if record.missing_count() > MAX_MISSING_FIELDS {
            summary.dropped_sparse += 1;
        } else if record.country.is_none() || record.city.is_none() {
            summary.dropped_unlabeled += 1;
        } else {
            kept.push(record);
        }
    }
    kept
}

/// Median of the given values; mean of the middle pair for even counts
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Row indices per country, in first-seen order within each group
fn group_by_country(records: &[RawRecord]) -> BTreeMap<&str, Vec<usize>> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (row, record) in records.iter().enumerate() {
        let country = record.country.as_deref().unwrap_or_default();
        groups.entry(country).or_default().push(row);
    }
    groups
}

fn column(records: &[RawRecord], field: FieldId) -> Vec<Option<f64>> {
    records.iter().map(|r| r.value(field)).collect()
}

/// Write a recomputed column back, returning how many cells were filled
fn write_column(records: &mut [RawRecord], field: FieldId, filled: Vec<Option<f64>>) -> usize {
    let mut count = 0;
    for (record, value) in records.iter_mut().zip(filled) {
        let slot = &mut record.values[field.index()];
        if slot.is_none() && value.is_some() {
            count += 1;
        }
        *slot = value;
    }
    count
}

/// Step 2: fill missing values with the median of the same country's values
pub fn impute_by_country(records: &mut [RawRecord]) -> usize {
    let groups = group_by_country(records);

    let filled_columns: Vec<(FieldId, Vec<Option<f64>>)> = all_fields()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|field| {
            let mut values = column(records, field);
            for rows in groups.values() {
                let present: Vec<f64> = rows.iter().filter_map(|&r| values[r]).collect();
                if present.len() == rows.len() {
                    continue;
                }
                if let Some(fill) = median(&present) {
                    for &r in rows {
                        values[r].get_or_insert(fill);
                    }
                }
            }
            (field, values)
        })
        .collect();

    let mut filled = 0;
    for (field, values) in filled_columns {
        let count = write_column(records, field, values);
        if count > 0 {
            log::debug!("{}: filled {} value(s) with country medians", field, count);
        }
        filled += count;
    }
    filled
}

/// Step 3: fill what is still missing with the field mean over all rows
pub fn impute_global(records: &mut [RawRecord]) -> usize {
    let filled_columns: Vec<(FieldId, Vec<Option<f64>>)> = all_fields()
        .collect::<Vec<_>>()
        .into_par_iter()
        .filter_map(|field| {
            let values = column(records, field);
            let present: Vec<f64> = values.iter().flatten().copied().collect();
            if present.len() == values.len() {
                return None;
            }
            let fill = mean(&present)?;
            Some((field, values.into_iter().map(|v| v.or(Some(fill))).collect()))
        })
        .collect();

    let mut filled = 0;
    for (field, values) in filled_columns {
        let count = write_column(records, field, values);
        log::debug!("{}: filled {} value(s) with the global mean", field, count);
        filled += count;
    }
    filled
}

/// Step 4: drop pruned fields; every retained field must be present by now
pub fn prune_fields(records: Vec<RawRecord>) -> Result<Vec<CleanRecord>> {
    records
        .into_iter()
        .map(|record| {
            let values = RETAINED_FIELDS
                .iter()
                .map(|&field| {
                    record.value(field).ok_or_else(|| {
                        PipelineError::DataFormat(format!(
                            "column '{}' has no values to impute from",
                            field
                        ))
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            CleanRecord::new(
                record.country.unwrap_or_default(),
                record.city.unwrap_or_default(),
                values,
            )
        })
        .collect()
}

/// Step 5: drop exact duplicates, keeping the first occurrence
pub fn dedup_records(records: Vec<CleanRecord>) -> (Vec<CleanRecord>, usize) {
    let mut seen = HashSet::with_capacity(records.len());
    let before = records.len();
    let unique: Vec<CleanRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.dedup_key()))
        .collect();
    let removed = before - unique.len();
    (unique, removed)
}

/// Run all cleaning steps in order
pub fn clean_records(raw: Vec<RawRecord>) -> Result<(Vec<CleanRecord>, LoadSummary)> {
    let mut summary = LoadSummary {
        rows_read: raw.len(),
        ..Default::default()
    };

    if let Some(bad) = raw.iter().find(|r| r.values.len() != NUMERIC_FIELD_COUNT) {
        return Err(PipelineError::DataFormat(format!(
            "expected {} numeric fields per row, got {}",
            NUMERIC_FIELD_COUNT,
            bad.values.len()
        )));
    }

    let mut rows = filter_sparse_rows(raw, &mut summary);
    log::info!(
        "Kept {} of {} row(s) ({} sparse, {} unlabeled)",
        rows.len(),
        summary.rows_read,
        summary.dropped_sparse,
        summary.dropped_unlabeled
    );
    if rows.is_empty() {
        return Err(PipelineError::EmptyResult);
    }

    summary.filled_by_country = impute_by_country(&mut rows);
    summary.filled_by_global_mean = impute_global(&mut rows);
    log::info!(
        "Imputed {} value(s) by country median and {} by global mean",
        summary.filled_by_country,
        summary.filled_by_global_mean
    );

    let pruned = prune_fields(rows)?;
    let (records, removed) = dedup_records(pruned);
    summary.duplicates_removed = removed;
    summary.records = records.len();
    if removed > 0 {
        log::info!("Removed {} duplicate row(s)", removed);
    }

    Ok((records, summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(country: &str, city: &str, fill: f64) -> RawRecord {
        RawRecord {
            country: Some(country.to_string()),
            city: Some(city.to_string()),
            values: vec![Some(fill); NUMERIC_FIELD_COUNT],
        }
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_sparse_threshold_boundary() {
        let mut at_limit = raw("A", "a", 1.0);
        for v in at_limit.values.iter_mut().take(MAX_MISSING_FIELDS) {
            *v = None;
        }
        let mut over_limit = raw("A", "b", 1.0);
        for v in over_limit.values.iter_mut().take(MAX_MISSING_FIELDS + 1) {
            *v = None;
        }

        let mut summary = LoadSummary::default();
        let kept = filter_sparse_rows(vec![at_limit, over_limit], &mut summary);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].city.as_deref(), Some("a"));
        assert_eq!(summary.dropped_sparse, 1);
    }

    #[test]
    fn test_unlabeled_rows_dropped() {
        let mut no_city = raw("A", "a", 1.0);
        no_city.city = None;

        let mut summary = LoadSummary::default();
        let kept = filter_sparse_rows(vec![no_city, raw("A", "b", 1.0)], &mut summary);

        assert_eq!(kept.len(), 1);
        assert_eq!(summary.dropped_unlabeled, 1);
    }

    #[test]
    fn test_country_median_before_global_mean() {
        let f = FieldId(5);
        let mut rows = vec![
            raw("A", "a1", 10.0),
            raw("A", "a2", 30.0),
            raw("A", "a3", 1.0),
            raw("B", "b1", 100.0),
            raw("C", "c1", 1.0),
        ];
        rows[2].values[f.index()] = None;
        rows[4].values[f.index()] = None;

        let by_country = impute_by_country(&mut rows);
        assert_eq!(by_country, 1);
        assert_eq!(rows[2].value(f), Some(20.0));
        assert_eq!(rows[4].value(f), None, "country C has no values for x5");

        let global = impute_global(&mut rows);
        assert_eq!(global, 1);
        // Mean over 10, 30, 20 (imputed), 100
        assert_eq!(rows[4].value(f), Some(40.0));
    }

    #[test]
    fn test_prune_fields_errors_on_unimputable_field() {
        let mut row = raw("A", "a", 1.0);
        row.values[FieldId(1).index()] = None;
        let err = prune_fields(vec![row]).unwrap_err();
        assert!(err.to_string().contains("x1"));
    }

    #[test]
    fn test_prune_fields_ignores_pruned_gaps() {
        let mut row = raw("A", "a", 1.0);
        row.values[FieldId(55).index()] = None;
        let clean = prune_fields(vec![row]).unwrap();
        assert_eq!(clean[0].values().len(), 40);
        assert_eq!(clean[0].value(FieldId(55)), None);
        assert_eq!(clean[0].value(FieldId(54)), Some(1.0));
    }

    #[test]
    fn test_dedup_keeps_first() {
        let rows = prune_fields(vec![
            raw("A", "a", 1.0),
            raw("B", "b", 2.0),
            raw("A", "a", 1.0),
        ])
        .unwrap();
        let (unique, removed) = dedup_records(rows);
        assert_eq!(removed, 1);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].city, "a");
        assert_eq!(unique[1].city, "b");
    }

    #[test]
    fn test_same_city_different_values_survive_dedup() {
        let rows = prune_fields(vec![raw("A", "a", 1.0), raw("A", "a", 2.0)]).unwrap();
        let (unique, removed) = dedup_records(rows);
        assert_eq!(removed, 0);
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_clean_records_empty_result() {
        let mut row = raw("A", "a", 1.0);
        row.values = vec![None; NUMERIC_FIELD_COUNT];
        let err = clean_records(vec![row]).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyResult));
    }
}
