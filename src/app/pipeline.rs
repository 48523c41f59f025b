//! Shared pipeline logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load observations -> reconstruct (memoized) -> filter view
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::data::seed_observations;
use crate::domain::{Observation, ReconstructConfig, Record, RunConfig};
use crate::error::{AppError, ReconstructError};
use crate::reconstruct::{DataIssue, Reconstruction, reconstruct_with_issues};
use crate::view::{ViewFilter, available_countries, filter_records};

/// The immutable observation table for the process lifetime.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub observations: Vec<Observation>,
    /// Issues found while reading the input (before reconstruction).
    pub ingest_issues: Vec<DataIssue>,
    /// Human-readable origin (`built-in seed` or the CSV path).
    pub source: String,
}

impl Dataset {
    pub fn seed() -> Self {
        Self {
            observations: seed_observations(),
            ingest_issues: Vec::new(),
            source: "built-in seed (UNESCO UIS / World Bank)".to_string(),
        }
    }

    /// Load from a CSV file, or the seed table when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Ok(Self::seed());
        };
        let ingest = crate::io::load_observations(path)?;
        if !ingest.row_errors.is_empty() {
            info!(
                skipped = ingest.row_errors.len(),
                used = ingest.rows_used,
                "some CSV rows were skipped"
            );
        }
        Ok(Self {
            observations: ingest.observations,
            ingest_issues: ingest.issues,
            source: path.display().to_string(),
        })
    }
}

/// Memo key: the configuration with the growth rate compared bitwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    year_min: i32,
    year_max: i32,
    anchor_year: i32,
    growth_bits: u64,
}

impl From<&ReconstructConfig> for CacheKey {
    fn from(c: &ReconstructConfig) -> Self {
        Self {
            year_min: c.year_min,
            year_max: c.year_max,
            anchor_year: c.anchor_year,
            growth_bits: c.growth_rate.to_bits(),
        }
    }
}

/// All computed outputs of a single CLI run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub reconstruction: Arc<Reconstruction>,
    /// Filtered copy of the reconstructed table.
    pub view: Vec<Record>,
    /// Ingest issues followed by reconstruction issues.
    pub issues: Vec<DataIssue>,
}

/// A dataset plus memoized reconstructions of it.
#[derive(Debug)]
pub struct Pipeline {
    dataset: Dataset,
    cache: HashMap<CacheKey, Arc<Reconstruction>>,
}

impl Pipeline {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            cache: HashMap::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Number of distinct configurations reconstructed so far.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Reconstruct the dataset, reusing an earlier result for the same config.
    pub fn reconstruction(&mut self, config: &ReconstructConfig) -> Result<Arc<Reconstruction>, ReconstructError> {
        let key = CacheKey::from(config);
        if let Some(hit) = self.cache.get(&key) {
            debug!(?config, "reconstruction cache hit");
            return Ok(Arc::clone(hit));
        }

        let recon = Arc::new(reconstruct_with_issues(&self.dataset.observations, config)?);
        self.cache.insert(key, Arc::clone(&recon));
        Ok(recon)
    }

    /// Execute the full pipeline for a CLI run.
    pub fn run(&mut self, config: &RunConfig) -> Result<RunOutput, AppError> {
        let reconstruction = self.reconstruction(&config.reconstruct)?;

        let countries = if config.countries.is_empty() {
            available_countries(&reconstruction.records)
        } else {
            config.countries.clone()
        };
        let filter = ViewFilter {
            countries,
            from_year: config.from_year,
            to_year: config.to_year,
        };
        let view = filter_records(&reconstruction.records, &filter);

        let mut issues = self.dataset.ingest_issues.clone();
        issues.extend(reconstruction.issues.iter().cloned());

        Ok(RunOutput {
            reconstruction,
            view,
            issues,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Lang, Metric};

    fn run_config(countries: &[&str]) -> RunConfig {
        RunConfig {
            data_path: None,
            reconstruct: ReconstructConfig::default(),
            countries: countries.iter().map(|c| c.to_string()).collect(),
            from_year: 2020,
            to_year: 2025,
            metric: Metric::Graduates,
            lang: Lang::Es,
            rank_year: None,
            show_issues: false,
            plot_width: 80,
            plot_height: 20,
            export_csv: None,
            export_json: None,
        }
    }

    #[test]
    fn memoizes_by_config() {
        let mut pipeline = Pipeline::new(Dataset::seed());
        let a = pipeline.reconstruction(&ReconstructConfig::default()).unwrap();
        let b = pipeline.reconstruction(&ReconstructConfig::default()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(pipeline.cached_len(), 1);

        let faster = ReconstructConfig {
            growth_rate: 1.05,
            ..ReconstructConfig::default()
        };
        let c = pipeline.reconstruction(&faster).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(pipeline.cached_len(), 2);
    }

    #[test]
    fn run_filters_without_mutating_reconstruction() {
        let mut pipeline = Pipeline::new(Dataset::seed());
        let out = pipeline.run(&run_config(&["Chile"])).unwrap();
        assert_eq!(out.view.len(), 6);
        assert!(out.view.iter().all(|r| r.country == "Chile"));
        assert_eq!(out.reconstruction.records.len(), 6 * 36);
        assert!(out.issues.is_empty());
    }

    #[test]
    fn empty_country_list_means_all() {
        let mut pipeline = Pipeline::new(Dataset::seed());
        let out = pipeline.run(&run_config(&[])).unwrap();
        assert_eq!(available_countries(&out.view).len(), 6);
    }

    #[test]
    fn invalid_range_is_usage_error() {
        let mut pipeline = Pipeline::new(Dataset::seed());
        let mut cfg = run_config(&[]);
        cfg.reconstruct.anchor_year = 2040;
        assert_eq!(pipeline.run(&cfg).unwrap_err().exit_code(), 2);
    }
}
