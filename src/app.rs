//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and merges them with the config file
//! - loads observations (seed table or CSV)
//! - runs the reconstruction pipeline
//! - prints tables/rankings/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, PlotArgs, RankArgs, TableArgs, ViewArgs};
use crate::config::FileConfig;
use crate::domain::{ReconstructConfig, RunConfig};
use crate::error::AppError;

pub mod pipeline;

use pipeline::{Dataset, Pipeline, RunOutput};

/// Entry point for the `stem` binary.
pub fn run() -> Result<(), AppError> {
    // We want `stem` and `stem -c Chile` to behave like `stem tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Table(args) => handle_table(args),
        Command::Rank(args) => handle_rank(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn prepare(args: &ViewArgs) -> Result<(RunConfig, Pipeline, RunOutput), AppError> {
    let file = crate::config::load(args.config.as_deref())?;
    let config = run_config_from_args(&file, args);
    let mut pipeline = Pipeline::new(Dataset::load(config.data_path.as_deref())?);
    let run = pipeline.run(&config)?;
    Ok((config, pipeline, run))
}

fn handle_table(args: TableArgs) -> Result<(), AppError> {
    let (mut config, pipeline, run) = prepare(&args.view)?;
    config.export_csv = args.export.clone();
    config.export_json = args.export_json.clone();

    if !args.no_summary {
        println!(
            "{}",
            crate::report::format_run_summary(&run.reconstruction, &run.view, &config, &pipeline.dataset().source)
        );
    }
    println!("{}", crate::report::format_records_table(&run.view, config.lang));
    print_issues(&config, &run);

    if let Some(path) = &config.export_csv {
        crate::io::write_records_csv(path, &run.view)?;
    }
    if let Some(path) = &config.export_json {
        let export = crate::io::RecordsExport::new(config.reconstruct, config.from_year, config.to_year, &run.view);
        crate::io::write_records_json(path, &export)?;
    }

    if !args.no_summary {
        println!("{}", crate::report::format_sources(config.lang));
    }
    Ok(())
}

fn handle_rank(args: RankArgs) -> Result<(), AppError> {
    let (mut config, _, run) = prepare(&args.view)?;
    config.rank_year = args.year;

    let year = config.rank_year.unwrap_or(config.to_year);
    let ranking = crate::view::rank_at_year(&run.view, year, config.metric);
    println!(
        "{}",
        crate::report::format_ranking(&ranking, year, config.metric, config.lang)
    );
    print_issues(&config, &run);
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let (mut config, _, run) = prepare(&args.view)?;
    config.plot_width = args.width;
    config.plot_height = args.height;

    let texts = crate::i18n::texts(config.lang);
    println!(
        "{} - {}",
        texts.evolution_title,
        crate::i18n::metric_label(config.metric, config.lang)
    );
    let series = crate::view::country_series(&run.view, config.metric);
    println!(
        "{}",
        crate::plot::render_ascii_chart(&series, config.plot_width, config.plot_height, config.lang)
    );
    print_issues(&config, &run);
    Ok(())
}

fn handle_tui(args: ViewArgs) -> Result<(), AppError> {
    let file = crate::config::load(args.config.as_deref())?;
    let config = run_config_from_args(&file, &args);
    let dataset = Dataset::load(config.data_path.as_deref())?;
    crate::tui::run(config, Pipeline::new(dataset))
}

fn print_issues(config: &RunConfig, run: &RunOutput) {
    if config.show_issues {
        println!("{}", crate::report::format_issues(&run.issues));
    }
}

/// Merge config-file values with CLI flags (flags win).
pub fn run_config_from_args(file: &FileConfig, args: &ViewArgs) -> RunConfig {
    let base = ReconstructConfig::from(&file.reconstruct);
    let reconstruct = ReconstructConfig {
        year_min: args.year_min.unwrap_or(base.year_min),
        year_max: args.year_max.unwrap_or(base.year_max),
        anchor_year: args.anchor_year.unwrap_or(base.anchor_year),
        growth_rate: args.growth_rate.unwrap_or(base.growth_rate),
    };

    let countries = if args.all {
        Vec::new()
    } else if !args.countries.is_empty() {
        args.countries.clone()
    } else {
        file.dashboard.countries.clone()
    };

    RunConfig {
        data_path: args.data.clone().or_else(|| file.dashboard.data.clone()),
        reconstruct,
        countries,
        from_year: args.from.unwrap_or(reconstruct.year_min),
        to_year: args.to.unwrap_or(reconstruct.year_max),
        metric: args.metric.unwrap_or(file.dashboard.metric),
        lang: args.lang.unwrap_or(file.dashboard.lang),
        rank_year: None,
        show_issues: args.show_issues,
        plot_width: 100,
        plot_height: 25,
        export_csv: None,
        export_json: None,
    }
}

/// Rewrite argv so `stem` defaults to `stem tui`.
///
/// Rules:
/// - `stem`                      -> `stem tui`
/// - `stem -c Chile ...`         -> `stem tui -c Chile ...`
/// - `stem --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "table" | "rank" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Lang, Metric};

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["stem"])), argv(&["stem", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["stem", "-c", "Chile"])),
            argv(&["stem", "tui", "-c", "Chile"])
        );
        assert_eq!(rewrite_args(argv(&["stem", "--help"])), argv(&["stem", "--help"]));
        assert_eq!(rewrite_args(argv(&["stem", "rank"])), argv(&["stem", "rank"]));
    }

    #[test]
    fn flags_override_file_values() {
        let file = crate::config::parse(
            "[reconstruct]\nyear_max = 2030\n[dashboard]\nlang = \"en\"\ncountries = [\"Chile\"]\n",
        )
        .unwrap();

        let defaults = run_config_from_args(&file, &ViewArgs::default());
        assert_eq!(defaults.reconstruct.year_max, 2030);
        assert_eq!(defaults.to_year, 2030);
        assert_eq!(defaults.lang, Lang::En);
        assert_eq!(defaults.countries, ["Chile"]);
        assert_eq!(defaults.metric, Metric::Graduates);

        let args = ViewArgs {
            countries: vec!["Brasil".to_string()],
            to: Some(2010),
            lang: Some(Lang::Es),
            growth_rate: Some(1.03),
            ..ViewArgs::default()
        };
        let merged = run_config_from_args(&file, &args);
        assert_eq!(merged.countries, ["Brasil"]);
        assert_eq!(merged.to_year, 2010);
        assert_eq!(merged.lang, Lang::Es);
        assert_eq!(merged.reconstruct.growth_rate, 1.03);
    }

    #[test]
    fn all_flag_clears_country_selection() {
        let args = ViewArgs {
            all: true,
            ..ViewArgs::default()
        };
        assert!(run_config_from_args(&FileConfig::default(), &args).countries.is_empty());
    }
}
