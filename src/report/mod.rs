//! Terminal reports: run summary, data tables, rankings, data issues.

pub mod format;

pub use format::*;
