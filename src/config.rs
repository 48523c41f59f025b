//! Configuration file loading.
//!
//! Lookup order (first hit wins):
//! 1. `--config <path>`
//! 2. `STEM_CONFIG` (environment or `.env`)
//! 3. `./stem.toml` when present
//! 4. built-in defaults
//!
//! Every key is optional; CLI flags override whatever the file sets.
//!
//! ```toml
//! [reconstruct]
//! year_min = 1990
//! year_max = 2030
//! anchor_year = 2022
//! growth_rate = 1.02
//!
//! [dashboard]
//! countries = ["Argentina", "Chile"]
//! lang = "en"
//! metric = "women-pct"
//! data = "observations.csv"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::DEFAULT_COUNTRIES;
use crate::domain::{
    DEFAULT_ANCHOR_YEAR, DEFAULT_GROWTH_RATE, DEFAULT_YEAR_MAX, DEFAULT_YEAR_MIN, Lang, Metric,
    ReconstructConfig,
};
use crate::error::AppError;

const ENV_CONFIG: &str = "STEM_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "stem.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub reconstruct: ReconstructSection,
    #[serde(default)]
    pub dashboard: DashboardSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructSection {
    #[serde(default = "default_year_min")]
    pub year_min: i32,
    #[serde(default = "default_year_max")]
    pub year_max: i32,
    #[serde(default = "default_anchor_year")]
    pub anchor_year: i32,
    #[serde(default = "default_growth_rate")]
    pub growth_rate: f64,
}

fn default_year_min() -> i32 { DEFAULT_YEAR_MIN }
fn default_year_max() -> i32 { DEFAULT_YEAR_MAX }
fn default_anchor_year() -> i32 { DEFAULT_ANCHOR_YEAR }
fn default_growth_rate() -> f64 { DEFAULT_GROWTH_RATE }

impl Default for ReconstructSection {
    fn default() -> Self {
        Self {
            year_min: default_year_min(),
            year_max: default_year_max(),
            anchor_year: default_anchor_year(),
            growth_rate: default_growth_rate(),
        }
    }
}

impl From<&ReconstructSection> for ReconstructConfig {
    fn from(s: &ReconstructSection) -> Self {
        ReconstructConfig {
            year_min: s.year_min,
            year_max: s.year_max,
            anchor_year: s.anchor_year,
            growth_rate: s.growth_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSection {
    #[serde(default = "default_countries")]
    pub countries: Vec<String>,
    #[serde(default = "default_lang")]
    pub lang: Lang,
    #[serde(default = "default_metric")]
    pub metric: Metric,
    /// Observation CSV; the built-in seed table is used when unset.
    #[serde(default)]
    pub data: Option<PathBuf>,
}

fn default_countries() -> Vec<String> {
    DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect()
}
fn default_lang() -> Lang { Lang::Es }
fn default_metric() -> Metric { Metric::Graduates }

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            countries: default_countries(),
            lang: default_lang(),
            metric: default_metric(),
            data: None,
        }
    }
}

/// Load the configuration following the lookup order above.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig, AppError> {
    if let Some(path) = explicit {
        return load_file(path);
    }

    dotenvy::dotenv().ok();
    if let Ok(path) = std::env::var(ENV_CONFIG) {
        return load_file(Path::new(&path));
    }

    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return load_file(local);
    }

    debug!("no config file, using defaults");
    Ok(FileConfig::default())
}

/// Load and parse one TOML file.
pub fn load_file(path: &Path) -> Result<FileConfig, AppError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read config '{}': {e}", path.display())))?;
    let config = parse(&text)
        .map_err(|e| AppError::new(2, format!("Invalid config '{}': {e}", path.display())))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn parse(text: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(text)
}
