//! Pipeline module - turns raw survey rows into the indexed dataset

pub mod aggregate;
pub mod cleaner;
pub mod dataset;
pub mod error;
pub mod estimate;
pub mod index;
pub mod loader;
pub mod schema;

pub use aggregate::*;
pub use cleaner::*;
pub use dataset::*;
pub use error::{PipelineError, Result};
pub use estimate::*;
pub use index::*;
pub use loader::*;
pub use schema::*;
