//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - sparse input rows (`Observation`) and dense output rows (`Record`)
//! - the reconstruction parameters (`ReconstructConfig`)
//! - dashboard enums (`Metric`, `Lang`) and the run configuration (`RunConfig`)

pub mod types;

pub use types::*;
