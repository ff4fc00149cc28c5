//! Indexed dataset, its query surface, and the memoized loader

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::aggregate::categorize_all;
use super::cleaner::{clean_records, LoadSummary};
use super::error::Result;
use super::index::{index_records, IncomeTier, IndexedRecord, TierEdges};
use super::loader::{load_raw_records, LoadOptions, RawRecord};

/// The fully indexed dataset; immutable once built
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    records: Vec<IndexedRecord>,
    tier_edges: Option<TierEdges>,
    summary: LoadSummary,
}

impl Dataset {
    /// Run cleaning, aggregation and indexing over raw records
    pub fn from_raw(raw: Vec<RawRecord>) -> Result<Self> {
        let (clean, summary) = clean_records(raw)?;
        let categorized = categorize_all(clean);
        let (records, tier_edges) = index_records(categorized);
        log::info!("Indexed {} record(s)", records.len());
        Ok(Self {
            records,
            tier_edges,
            summary,
        })
    }

    /// Load and transform a source file
    pub fn load(path: &Path, options: &LoadOptions) -> Result<Self> {
        let raw = load_raw_records(path, options)?;
        Self::from_raw(raw)
    }

    /// Distinct countries, sorted
    pub fn countries(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(IndexedRecord::country)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct cities of one country, sorted; empty for an unknown country
    pub fn cities(&self, country: &str) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.country() == country)
            .map(IndexedRecord::city)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The record for a (country, city) pair; first match if several survived
    pub fn find(&self, country: &str, city: &str) -> Option<&IndexedRecord> {
        self.records
            .iter()
            .find(|r| r.country() == country && r.city() == city)
    }

    pub fn records(&self) -> &[IndexedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn tier_edges(&self) -> Option<TierEdges> {
        self.tier_edges
    }

    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }

    /// Record count per income tier, in ascending tier order
    pub fn tier_counts(&self) -> Vec<(IncomeTier, usize)> {
        IncomeTier::ALL
            .iter()
            .map(|&tier| {
                let count = self.records.iter().filter(|r| r.income_tier == tier).count();
                (tier, count)
            })
            .collect()
    }
}

/// Process-lifetime cache with single-flight loading
///
/// The slot mutex is held while a load runs, so concurrent first callers
/// wait for the one in-flight computation and then share its result.
/// Failed loads leave the slot empty.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    options: LoadOptions,
    slot: Mutex<Option<Arc<Dataset>>>,
    loads: AtomicUsize,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            path: path.into(),
            options,
            slot: Mutex::new(None),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached dataset, loading it on first use
    pub fn get(&self) -> Result<Arc<Dataset>> {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(dataset) = slot.as_ref() {
            return Ok(Arc::clone(dataset));
        }

        self.loads.fetch_add(1, Ordering::SeqCst);
        log::debug!("Loading dataset from {}", self.path.display());
        let dataset = Arc::new(Dataset::load(&self.path, &self.options)?);
        *slot = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the cached dataset; the next `get` reloads
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.take().is_some() {
            log::debug!("Dataset cache cleared");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.slot
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Number of load attempts started so far
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}
