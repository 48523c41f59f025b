//! Data-quality issues found while ingesting or reconstructing.
//!
//! None of these abort a run; the affected value, row or projection is
//! omitted and the issue is reported.

use serde::Serialize;

use crate::domain::Field;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIssue {
    /// A numeric field could not be used (non-numeric or out of domain).
    Malformed {
        country: String,
        year: i32,
        field: Field,
        raw: String,
    },
    /// A second row for the same `(country, year)`; the first row wins.
    DuplicateYear { country: String, year: i32 },
    /// A country has no usable value for a field; it yields no records.
    NoUsableData { country: String, field: Field },
    /// No graduate observation at or before the anchor year; the country gets
    /// history only, no projected tail.
    MissingAnchorData { country: String, anchor_year: i32 },
}

impl DataIssue {
    pub fn country(&self) -> &str {
        match self {
            DataIssue::Malformed { country, .. }
            | DataIssue::DuplicateYear { country, .. }
            | DataIssue::NoUsableData { country, .. }
            | DataIssue::MissingAnchorData { country, .. } => country,
        }
    }
}

impl std::fmt::Display for DataIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataIssue::Malformed {
                country,
                year,
                field,
                raw,
            } => write!(f, "{country} {year}: unusable `{field}` value '{raw}' (excluded)"),
            DataIssue::DuplicateYear { country, year } => {
                write!(f, "{country} {year}: duplicate row ignored")
            }
            DataIssue::NoUsableData { country, field } => {
                write!(f, "{country}: no usable `{field}` values (country omitted)")
            }
            DataIssue::MissingAnchorData {
                country,
                anchor_year,
            } => write!(
                f,
                "{country}: no observation at or before {anchor_year} (projection skipped)"
            ),
        }
    }
}
