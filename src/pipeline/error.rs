//! Error types for the cost-of-living pipeline.
//!
//! Every failure is terminal for the load attempt that raised it. A lookup
//! that finds nothing is not an error and is reported as `None` by the
//! dataset query surface instead.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while loading, transforming or estimating.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source is missing required columns or contains unparseable cells.
    #[error("Invalid data format: {0}")]
    DataFormat(String),

    /// No rows survived the sparse-row filter.
    #[error("No rows remain after filtering sparse records")]
    EmptyResult,

    /// Cost-to-income ratio requested for a zero income.
    #[error("Cost-to-income ratio is undefined for zero income")]
    DivisionUndefined,

    /// User-supplied estimate inputs are out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
