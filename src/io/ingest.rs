//! CSV ingest of observation tables.
//!
//! This module turns a user-supplied CSV into `Observation`s that are safe to
//! reconstruct.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Field-level degradation**: a bad numeric cell only drops that cell
//! - **Separation of concerns**: no interpolation logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::domain::{Field, Observation};
use crate::error::AppError;
use crate::reconstruct::DataIssue;

/// Markers that mean "no value" in published statistics tables.
const SENTINELS: [&str; 6] = [".", "na", "n/a", "nan", "-", "null"];

/// Accepted header names per logical column (first is canonical).
const COUNTRY_ALIASES: [&str; 2] = ["country", "pais"];
const YEAR_ALIASES: [&str; 3] = ["year", "año", "ano"];
const GRADUATE_ALIASES: [&str; 2] = ["graduate_count", "graduados"];
const WOMEN_ALIASES: [&str; 2] = ["women_pct", "mujeres_pct"];
const SPEND_ALIASES: [&str; 2] = ["gdp_spend_pct", "gasto_pbi"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: observations + field-level issues + row errors.
#[derive(Debug, Clone)]
pub struct IngestedObservations {
    pub observations: Vec<Observation>,
    pub issues: Vec<DataIssue>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Resolved column positions.
#[derive(Debug, Clone, Copy)]
struct Columns {
    country: usize,
    year: usize,
    graduates: usize,
    women: usize,
    spend: usize,
}

/// Load observations from a CSV file.
pub fn load_observations(path: &Path) -> Result<IngestedObservations, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let ingest = read_observations(file)?;
    debug!(
        path = %path.display(),
        rows_read = ingest.rows_read,
        rows_used = ingest.rows_used,
        "loaded observations"
    );
    Ok(ingest)
}

/// Read observations from any CSV source.
pub fn read_observations<R: std::io::Read>(source: R) -> Result<IngestedObservations, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let columns = resolve_columns(&build_header_map(&headers))?;

    let mut observations = Vec::new();
    let mut issues = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header line, and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, columns, &mut issues) {
            Ok(obs) => observations.push(obs),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for err in &row_errors {
        warn!(line = err.line, "skipped row: {}", err.message);
    }
    for issue in &issues {
        warn!(country = issue.country(), "data issue: {issue}");
    }

    let rows_used = observations.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid observation rows found in CSV."));
    }

    Ok(IngestedObservations {
        observations,
        issues,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_lowercase()
}

fn resolve_columns(header_map: &HashMap<String, usize>) -> Result<Columns, AppError> {
    let find = |aliases: &[&str]| -> Result<usize, AppError> {
        aliases
            .iter()
            .find_map(|a| header_map.get(*a).copied())
            .ok_or_else(|| AppError::new(2, format!("Missing required column: `{}`", aliases[0])))
    };

    Ok(Columns {
        country: find(&COUNTRY_ALIASES)?,
        year: find(&YEAR_ALIASES)?,
        graduates: find(&GRADUATE_ALIASES)?,
        women: find(&WOMEN_ALIASES)?,
        spend: find(&SPEND_ALIASES)?,
    })
}

fn parse_row(record: &StringRecord, columns: Columns, issues: &mut Vec<DataIssue>) -> Result<Observation, String> {
    let country = record
        .get(columns.country)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing required value: `country`".to_string())?
        .to_string();

    let raw_year = record
        .get(columns.year)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing required value: `year`".to_string())?;
    let year = raw_year
        .parse::<i32>()
        .map_err(|_| format!("Invalid year '{raw_year}'."))?;

    let mut field = |field: Field, idx: usize| -> Option<f64> {
        match parse_cell(record.get(idx)) {
            Cell::Value(v) => Some(v),
            Cell::Missing => None,
            Cell::Malformed(raw) => {
                issues.push(DataIssue::Malformed {
                    country: country.clone(),
                    year,
                    field,
                    raw,
                });
                None
            }
        }
    };

    let graduate_count = field(Field::GraduateCount, columns.graduates);
    let women_pct = field(Field::WomenPct, columns.women);
    let gdp_spend_pct = field(Field::GdpSpendPct, columns.spend);

    Ok(Observation {
        country,
        year,
        graduate_count,
        women_pct,
        gdp_spend_pct,
    })
}

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Value(f64),
    Missing,
    Malformed(String),
}

fn parse_cell(raw: Option<&str>) -> Cell {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Cell::Missing;
    };
    if SENTINELS.iter().any(|s| raw.eq_ignore_ascii_case(s)) {
        return Cell::Missing;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Value(v),
        _ => Cell::Malformed(raw.to_string()),
    }
}
