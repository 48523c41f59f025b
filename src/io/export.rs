//! Export reconstructed views to CSV or JSON.
//!
//! The CSV is meant for spreadsheets; the JSON carries the run configuration
//! alongside the records so a file can be traced back to how it was produced.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::{ReconstructConfig, Record};
use crate::error::AppError;

/// JSON export document.
#[derive(Debug, Clone, Serialize)]
pub struct RecordsExport<'a> {
    pub tool: &'static str,
    pub generated_at: DateTime<Local>,
    pub config: ReconstructConfig,
    pub from_year: i32,
    pub to_year: i32,
    pub countries: Vec<String>,
    pub records: &'a [Record],
}

impl<'a> RecordsExport<'a> {
    pub fn new(config: ReconstructConfig, from_year: i32, to_year: i32, records: &'a [Record]) -> Self {
        Self {
            tool: "stem",
            generated_at: Local::now(),
            config,
            from_year,
            to_year,
            countries: crate::view::available_countries(records),
            records,
        }
    }
}

/// Write records to a CSV file (one row per country-year).
pub fn write_records_csv(path: &Path, records: &[Record]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for r in records {
        writer
            .serialize(r)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write a JSON export document.
pub fn write_records_json(path: &Path, export: &RecordsExport<'_>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, export)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}
