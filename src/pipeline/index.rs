//! Composite cost index, cost-to-income ratio and income tiers
//!
//! The cost index is a fixed weighted sum of the six spending categories.
//! Income tiers are population-relative: they are tertiles of income across
//! the records indexed together, so a record's tier depends on its peers.
//!
//! # Tier convention
//!
//! The two tier edges are the 1/3 and 2/3 quantiles of income, using linear
//! interpolation between order statistics at position `(n - 1) * k / 3`.
//! A value at or below the first edge is `Low`, at or below the second edge
//! `Medium`, otherwise `High`. Ties on an edge therefore fall into the lower
//! tier, and duplicate edges are accepted rather than rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::aggregate::{CategorizedRecord, CategoryAmounts};
use super::error::{PipelineError, Result};
use super::schema::COST_WEIGHTS;

/// Number of income tiers
pub const TIER_COUNT: usize = 3;

/// Population-relative income bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IncomeTier {
    Low,
    Medium,
    High,
}

impl IncomeTier {
    pub const ALL: [IncomeTier; TIER_COUNT] =
        [IncomeTier::Low, IncomeTier::Medium, IncomeTier::High];
}

impl fmt::Display for IncomeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncomeTier::Low => write!(f, "Low"),
            IncomeTier::Medium => write!(f, "Medium"),
            IncomeTier::High => write!(f, "High"),
        }
    }
}

/// Upper income edges of the `Low` and `Medium` tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierEdges {
    pub low_upper: f64,
    pub medium_upper: f64,
}

impl TierEdges {
    pub fn classify(&self, income: f64) -> IncomeTier {
        if income <= self.low_upper {
            IncomeTier::Low
        } else if income <= self.medium_upper {
            IncomeTier::Medium
        } else {
            IncomeTier::High
        }
    }
}

/// Weighted composite cost of living; income is not part of the index
pub fn cost_of_living(amounts: &CategoryAmounts) -> f64 {
    COST_WEIGHTS
        .iter()
        .map(|&(category, weight)| weight * amounts.get(category))
        .sum()
}

/// Cost of living divided by income
pub fn cost_to_income_ratio(cost_of_living: f64, income: f64) -> Result<f64> {
    if income == 0.0 {
        return Err(PipelineError::DivisionUndefined);
    }
    Ok(cost_of_living / income)
}

/// Linearly interpolated quantile of already sorted values
fn interpolated_quantile(sorted: &[f64], numerator: usize, denominator: usize) -> f64 {
    let position = ((sorted.len() - 1) * numerator) as f64 / denominator as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    if fraction == 0.0 {
        sorted[lower]
    } else {
        sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
    }
}

/// Tertile edges of the given incomes; `None` when there are none
pub fn tier_edges(incomes: &[f64]) -> Option<TierEdges> {
    if incomes.is_empty() {
        return None;
    }
    let mut sorted = incomes.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(TierEdges {
        low_upper: interpolated_quantile(&sorted, 1, TIER_COUNT),
        medium_upper: interpolated_quantile(&sorted, 2, TIER_COUNT),
    })
}

/// A categorized record with its composite index and tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedRecord {
    #[serde(flatten)]
    pub categorized: CategorizedRecord,
    #[serde(rename = "CostOfLiving")]
    pub cost_of_living: f64,
    /// `None` when income is zero
    #[serde(rename = "CostToIncomeRatio")]
    pub cost_to_income_ratio: Option<f64>,
    #[serde(rename = "IncomeTier")]
    pub income_tier: IncomeTier,
}

impl IndexedRecord {
    pub fn country(&self) -> &str {
        &self.categorized.record.country
    }

    pub fn city(&self) -> &str {
        &self.categorized.record.city
    }

    pub fn categories(&self) -> &CategoryAmounts {
        &self.categorized.categories
    }

    pub fn income(&self) -> f64 {
        self.categorized.categories.income_finance
    }

    /// Ratio, or `DivisionUndefined` when income is zero
    pub fn ratio(&self) -> Result<f64> {
        self.cost_to_income_ratio
            .ok_or(PipelineError::DivisionUndefined)
    }
}

/// Index every record; tiers are computed across the whole slice
pub fn index_records(records: Vec<CategorizedRecord>) -> (Vec<IndexedRecord>, Option<TierEdges>) {
    let incomes: Vec<f64> = records.iter().map(|r| r.categories.income_finance).collect();
    let edges = tier_edges(&incomes);

    let indexed = records
        .into_iter()
        .map(|categorized| {
            let income = categorized.categories.income_finance;
            let cost = cost_of_living(&categorized.categories);
            let ratio = match cost_to_income_ratio(cost, income) {
                Ok(ratio) => Some(ratio),
                Err(_) => {
                    log::warn!(
                        "Cost-to-income ratio unavailable for {}, {}: zero income",
                        categorized.record.city,
                        categorized.record.country
                    );
                    None
                }
            };
            let income_tier = edges
                .map(|e| e.classify(income))
                .unwrap_or(IncomeTier::Low);
            IndexedRecord {
                categorized,
                cost_of_living: cost,
                cost_to_income_ratio: ratio,
                income_tier,
            }
        })
        .collect();

    (indexed, edges)
}
