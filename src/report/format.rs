//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the reconstruction code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::data::SOURCES;
use crate::domain::{Lang, Metric, Record, RunConfig};
use crate::i18n::{country_label, metric_label, texts};
use crate::reconstruct::{DataIssue, Reconstruction};
use crate::view::{RankEntry, available_countries, graduate_cagr};

/// Format the run summary (configuration + dataset coverage).
pub fn format_run_summary(recon: &Reconstruction, view: &[Record], config: &RunConfig, source: &str) -> String {
    let t = texts(config.lang);
    let rc = &config.reconstruct;
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", t.title));
    out.push_str(&format!("{}\n", t.subtitle));
    out.push_str(&format!("Data: {source}\n"));
    out.push_str(&format!(
        "Range: {}..{} | anchor: {} | growth: x{:.4}/yr\n",
        rc.year_min, rc.year_max, rc.anchor_year, rc.growth_rate
    ));
    out.push_str(&format!(
        "Records: {} ({} countries) | issues: {}\n",
        recon.records.len(),
        available_countries(&recon.records).len(),
        recon.issues.len()
    ));
    out.push_str(&format!(
        "{} {}..{}\n",
        t.year_range, config.from_year, config.to_year
    ));

    let countries = available_countries(view);
    if !countries.is_empty() {
        out.push_str(&format!("\n{}\n", t.countries));
        for country in &countries {
            let cagr = graduate_cagr(view, country)
                .map(|g| format!("{:+.2}%/yr", g * 100.0))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!("- {:<16} {cagr}\n", country_label(country, config.lang)));
        }
    }
    out.push('\n');

    out
}

/// Format records as a fixed-width table.
pub fn format_records_table(records: &[Record], lang: Lang) -> String {
    if records.is_empty() {
        return format!("{}\n", texts(lang).empty_selection);
    }

    let mut out = String::new();
    let t = texts(lang);
    let [country, year, graduates, women, gdp, source] = t.columns;
    out.push_str(&format!("{}:\n", t.data_table));
    out.push_str(
        format!("{country:<16} {year:>6} {graduates:>14} {women:>9} {gdp:>9} {source:<6}")
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<16} {:-<6} {:-<14} {:-<9} {:-<9} {:-<6}", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for r in records {
        out.push_str(
            format!(
                "{:<16} {:>6} {:>14.2} {:>9.2} {:>9.2} {:<6}",
                truncate(country_label(&r.country, lang), 16),
                r.year,
                r.graduate_count,
                r.women_pct,
                r.gdp_spend_pct,
                r.source.label(),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format a ranking table.
pub fn format_ranking(ranking: &[RankEntry], year: i32, metric: Metric, lang: Lang) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {year} ({})\n",
        texts(lang).ranking_title,
        metric_label(metric, lang)
    ));
    if ranking.is_empty() {
        out.push_str(texts(lang).empty_selection);
        out.push('\n');
        return out;
    }
    for e in ranking {
        out.push_str(&format!(
            "{:>3}. {:<16} {}\n",
            e.rank,
            truncate(country_label(&e.country, lang), 16),
            fmt_metric(e.value, metric)
        ));
    }
    out
}

/// Format data-quality issues (one per line).
pub fn format_issues(issues: &[DataIssue]) -> String {
    if issues.is_empty() {
        return "Data issues: none\n".to_string();
    }
    let mut out = format!("Data issues ({}):\n", issues.len());
    for issue in issues {
        out.push_str(&format!("- {issue}\n"));
    }
    out
}

/// Format the sources footer.
pub fn format_sources(lang: Lang) -> String {
    let t = texts(lang);
    let mut out = format!("{}\n{}\n", t.sources_title, t.sources_text);
    for (name, url) in SOURCES {
        out.push_str(&format!("* {name} <{url}>\n"));
    }
    out
}

/// Format a metric value with units.
pub fn fmt_metric(v: f64, metric: Metric) -> String {
    match metric {
        Metric::Graduates => format!("{v:>12.1}"),
        Metric::WomenPct | Metric::GdpSpendPct => format!("{v:>11.2}%"),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordSource;

    fn rec(country: &str, year: i32, g: f64) -> Record {
        Record {
            country: country.to_string(),
            year,
            graduate_count: g,
            women_pct: 35.0,
            gdp_spend_pct: 5.6,
            source: RecordSource::Projected,
        }
    }

    #[test]
    fn table_translates_labels_and_keeps_fractions() {
        let out = format_records_table(&[rec("EEUU", 2023, 795600.4)], Lang::En);
        let row = out.lines().nth(3).unwrap();
        assert!(row.starts_with("USA"));
        assert!(row.contains("795600.40"));
        assert!(row.ends_with("proj"));
    }

    #[test]
    fn table_header_follows_language() {
        let es = format_records_table(&[rec("Chile", 2023, 1.0)], Lang::Es);
        let header = es.lines().nth(1).unwrap();
        assert!(header.starts_with("país"));
        assert!(header.ends_with("fuente"));
        let en = format_records_table(&[rec("Chile", 2023, 1.0)], Lang::En);
        assert!(en.lines().nth(1).unwrap().starts_with("country"));
    }

    #[test]
    fn empty_table_shows_selection_hint() {
        assert_eq!(
            format_records_table(&[], Lang::Es),
            "Selecciona al menos un país y un rango de años para visualizar los datos.\n"
        );
    }

    #[test]
    fn ranking_lines() {
        let ranking = vec![
            RankEntry {
                rank: 1,
                country: "Brasil".to_string(),
                value: 115000.0,
            },
            RankEntry {
                rank: 2,
                country: "Chile".to_string(),
                value: 15200.0,
            },
        ];
        let out = format_ranking(&ranking, 2022, Metric::Graduates, Lang::En);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "Graduates Ranking in year 2022 (Graduates)");
        assert!(lines[1].starts_with("  1. Brazil"));
        assert!(lines[2].trim_end().ends_with("15200.0"));
    }

    #[test]
    fn truncates_long_names() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }

    #[test]
    fn issues_listing() {
        let issues = vec![DataIssue::DuplicateYear {
            country: "X".to_string(),
            year: 2000,
        }];
        assert_eq!(format_issues(&issues), "Data issues (1):\n- X 2000: duplicate row ignored\n");
        assert_eq!(format_issues(&[]), "Data issues: none\n");
    }
}
