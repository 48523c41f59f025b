//! Command-line parsing for the STEM graduates dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the reconstruction code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Lang, Metric};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "stem",
    version,
    about = "STEM graduates by country: interpolated history and projections"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the reconstructed table for the selected countries and years.
    Table(TableArgs),
    /// Rank countries by a metric in one year.
    Rank(RankArgs),
    /// Draw an ASCII chart of the selected metric.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same reconstruction pipeline as `stem table`, but renders
    /// results in a terminal UI using Ratatui.
    Tui(ViewArgs),
}

/// Options shared by every command.
///
/// Unset options fall back to the config file, then to built-in defaults.
#[derive(Debug, Args, Clone, Default)]
pub struct ViewArgs {
    /// Observation CSV (country, year, graduate_count, women_pct, gdp_spend_pct).
    /// Uses the built-in seed data when omitted.
    #[arg(long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Config file (TOML). Defaults to $STEM_CONFIG, then ./stem.toml.
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Country to show (repeatable or comma-separated).
    #[arg(short = 'c', long = "country", value_delimiter = ',')]
    pub countries: Vec<String>,

    /// Show every country in the dataset.
    #[arg(long, conflicts_with = "countries")]
    pub all: bool,

    /// First year shown.
    #[arg(long)]
    pub from: Option<i32>,

    /// Last year shown.
    #[arg(long)]
    pub to: Option<i32>,

    /// Metric for charts and rankings.
    #[arg(short = 'm', long, value_enum)]
    pub metric: Option<Metric>,

    /// Display language.
    #[arg(short = 'l', long, value_enum)]
    pub lang: Option<Lang>,

    /// First year of the reconstructed range.
    #[arg(long)]
    pub year_min: Option<i32>,

    /// Last year of the reconstructed range.
    #[arg(long)]
    pub year_max: Option<i32>,

    /// Last year treated as ground truth; later years are projected.
    #[arg(long)]
    pub anchor_year: Option<i32>,

    /// Annual growth factor applied after the anchor year (1.02 = +2%/yr).
    #[arg(long)]
    pub growth_rate: Option<f64>,

    /// Print data-quality issues found in the input.
    #[arg(long)]
    pub show_issues: bool,
}

#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Export the shown records to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the shown records (plus run configuration) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Print the summary header (enabled by default).
    #[arg(long)]
    pub no_summary: bool,
}

#[derive(Debug, Args, Clone)]
pub struct RankArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Ranking year (defaults to the last year shown).
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
