//! Series reconstruction: sparse per-country observations to a dense annual table.
//!
//! For each country, independently:
//! 1. history `[year_min, anchor_year]`: piecewise-linear interpolation between
//!    the nearest bracketing observations, flat fill outside the observed span
//! 2. tail `(anchor_year, year_max]`: `graduates(anchor) * growth_rate^(y - anchor)`
//!    with percentages frozen at their anchor values
//!
//! Countries are processed in parallel; the output keeps first-seen country order.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::domain::{Observation, ReconstructConfig, Record};
use crate::error::ReconstructError;

pub mod interp;
pub mod issues;
pub mod series;

pub use issues::DataIssue;
pub use series::{CountrySeries, reconstruct_country};

/// Dense records plus the data-quality issues met along the way.
#[derive(Debug, Clone, Default)]
pub struct Reconstruction {
    pub records: Vec<Record>,
    pub issues: Vec<DataIssue>,
}

/// Widest accepted `[year_min, year_max]`, in years.
pub const MAX_YEAR_SPAN: i64 = 1000;

/// Check the structural preconditions of a run.
pub fn validate_config(config: &ReconstructConfig) -> Result<(), ReconstructError> {
    let ReconstructConfig {
        year_min,
        year_max,
        anchor_year,
        growth_rate,
    } = *config;

    let span = i64::from(year_max) - i64::from(year_min);
    if year_min > year_max || anchor_year < year_min || anchor_year > year_max || span > MAX_YEAR_SPAN {
        return Err(ReconstructError::InvalidRange {
            year_min,
            year_max,
            anchor_year,
        });
    }
    if !(growth_rate.is_finite() && growth_rate > 0.0) {
        return Err(ReconstructError::InvalidGrowthRate(growth_rate));
    }
    Ok(())
}

/// Reconstruct the dense table, dropping the issue list.
pub fn reconstruct(
    observations: &[Observation],
    config: &ReconstructConfig,
) -> Result<Vec<Record>, ReconstructError> {
    Ok(reconstruct_with_issues(observations, config)?.records)
}

/// Reconstruct the dense table and report data-quality issues.
///
/// Each issue is also logged once at `warn` level.
pub fn reconstruct_with_issues(
    observations: &[Observation],
    config: &ReconstructConfig,
) -> Result<Reconstruction, ReconstructError> {
    validate_config(config)?;

    let groups = group_by_country(observations);
    debug!(
        countries = groups.len(),
        observations = observations.len(),
        year_min = config.year_min,
        year_max = config.year_max,
        anchor_year = config.anchor_year,
        growth_rate = config.growth_rate,
        "reconstructing series"
    );

    let per_country: Vec<CountrySeries> = groups
        .par_iter()
        .map(|(country, rows)| reconstruct_country(country, rows, config))
        .collect();

    let mut out = Reconstruction::default();
    for series in per_country {
        out.records.extend(series.records);
        out.issues.extend(series.issues);
    }

    for issue in &out.issues {
        warn!(country = issue.country(), "data issue: {issue}");
    }

    Ok(out)
}

/// Group rows by country, preserving first-seen country order.
fn group_by_country(observations: &[Observation]) -> Vec<(&str, Vec<&Observation>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Observation>)> = Vec::new();
    for obs in observations {
        let slot = *index.entry(obs.country.as_str()).or_insert_with(|| {
            groups.push((obs.country.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(obs);
    }
    groups
}
