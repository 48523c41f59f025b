//! Input/output helpers.
//!
//! - CSV observation ingest + validation (`ingest`)
//! - reconstructed view exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
