//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during reconstruction
//! - exported to JSON/CSV
//! - shown in the dashboard without further conversion

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default first year of the reconstructed range.
pub const DEFAULT_YEAR_MIN: i32 = 1990;
/// Default last year of the reconstructed range.
pub const DEFAULT_YEAR_MAX: i32 = 2025;
/// Default last year treated as ground truth.
pub const DEFAULT_ANCHOR_YEAR: i32 = 2022;
/// Default annual growth factor applied after the anchor year.
pub const DEFAULT_GROWTH_RATE: f64 = 1.02;

/// A single sparse data point for a `(country, year)` pair.
///
/// Numeric fields are `None` when the raw input was missing or a sentinel
/// marker. Such fields are skipped by interpolation, never read as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub country: String,
    pub year: i32,
    pub graduate_count: Option<f64>,
    pub women_pct: Option<f64>,
    pub gdp_spend_pct: Option<f64>,
}

impl Observation {
    /// A fully populated observation.
    pub fn new(
        country: impl Into<String>,
        year: i32,
        graduate_count: f64,
        women_pct: f64,
        gdp_spend_pct: f64,
    ) -> Self {
        Self {
            country: country.into(),
            year,
            graduate_count: Some(graduate_count),
            women_pct: Some(women_pct),
            gdp_spend_pct: Some(gdp_spend_pct),
        }
    }

    pub fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::GraduateCount => self.graduate_count,
            Field::WomenPct => self.women_pct,
            Field::GdpSpendPct => self.gdp_spend_pct,
        }
    }
}

/// Numeric columns shared by observations and records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    GraduateCount,
    WomenPct,
    GdpSpendPct,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::GraduateCount, Field::WomenPct, Field::GdpSpendPct];

    /// Column name used in CSV input/output.
    pub fn column(self) -> &'static str {
        match self {
            Field::GraduateCount => "graduate_count",
            Field::WomenPct => "women_pct",
            Field::GdpSpendPct => "gdp_spend_pct",
        }
    }

    /// Whether `v` is inside the field's domain.
    ///
    /// - graduate_count: finite and >= 0
    /// - women_pct: finite and in [0, 100]
    /// - gdp_spend_pct: finite and >= 0
    pub fn accepts(self, v: f64) -> bool {
        if !v.is_finite() {
            return false;
        }
        match self {
            Field::GraduateCount | Field::GdpSpendPct => v >= 0.0,
            Field::WomenPct => (0.0..=100.0).contains(&v),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// How a record's graduate count was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    /// The year is an exact observation.
    Observed,
    /// Derived from bracketing observations (or boundary fill).
    Interpolated,
    /// Compound growth after the anchor year.
    Projected,
}

impl RecordSource {
    pub fn label(self) -> &'static str {
        match self {
            RecordSource::Observed => "obs",
            RecordSource::Interpolated => "interp",
            RecordSource::Projected => "proj",
        }
    }
}

/// One row of the dense reconstructed series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub country: String,
    pub year: i32,
    /// Real-valued; fractional graduates are an expected artifact of the model.
    pub graduate_count: f64,
    pub women_pct: f64,
    pub gdp_spend_pct: f64,
    pub source: RecordSource,
}

/// Parameters of a reconstruction run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReconstructConfig {
    pub year_min: i32,
    pub year_max: i32,
    pub anchor_year: i32,
    pub growth_rate: f64,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            year_min: DEFAULT_YEAR_MIN,
            year_max: DEFAULT_YEAR_MAX,
            anchor_year: DEFAULT_ANCHOR_YEAR,
            growth_rate: DEFAULT_GROWTH_RATE,
        }
    }
}

/// Which metric a chart or ranking shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// STEM graduates per year.
    Graduates,
    /// Share of women among graduates (gender parity).
    WomenPct,
    /// Education spending as % of GDP.
    GdpSpendPct,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Graduates, Metric::WomenPct, Metric::GdpSpendPct];

    pub fn value(self, record: &Record) -> f64 {
        match self {
            Metric::Graduates => record.graduate_count,
            Metric::WomenPct => record.women_pct,
            Metric::GdpSpendPct => record.gdp_spend_pct,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Metric::Graduates => Metric::WomenPct,
            Metric::WomenPct => Metric::GdpSpendPct,
            Metric::GdpSpendPct => Metric::Graduates,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Metric::Graduates => Metric::GdpSpendPct,
            Metric::WomenPct => Metric::Graduates,
            Metric::GdpSpendPct => Metric::WomenPct,
        }
    }
}

/// Dashboard language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Es,
    En,
}

impl Lang {
    pub fn toggle(self) -> Self {
        match self {
            Lang::Es => Lang::En,
            Lang::En => Lang::Es,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::Es => "ES",
            Lang::En => "EN",
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from the config file, then CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// CSV observation table; the built-in seed data is used when `None`.
    pub data_path: Option<PathBuf>,
    pub reconstruct: ReconstructConfig,

    /// Countries shown in views. Empty means "all countries".
    pub countries: Vec<String>,
    pub from_year: i32,
    pub to_year: i32,
    pub metric: Metric,
    pub lang: Lang,

    /// Ranking year (defaults to `to_year`).
    pub rank_year: Option<i32>,
    pub show_issues: bool,

    pub plot_width: usize,
    pub plot_height: usize,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}
