//! Costlens: Cost-of-Living Library
//!
//! Turns per-city price-survey rows into category aggregates, a weighted
//! cost-of-living index, a cost-to-income ratio and a population-relative
//! income tier, and offers a what-if estimator for personal budgets.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
