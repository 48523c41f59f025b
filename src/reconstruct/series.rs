//! Per-country reconstruction: interpolated history + projected tail.

use std::collections::HashSet;

use crate::domain::{Field, Observation, ReconstructConfig, Record, RecordSource};
use crate::reconstruct::interp::KnownPoints;
use crate::reconstruct::issues::DataIssue;

/// Records and issues for one country.
#[derive(Debug, Clone, Default)]
pub struct CountrySeries {
    pub records: Vec<Record>,
    pub issues: Vec<DataIssue>,
}

/// Known points for the three numeric fields of one country.
struct FieldPoints {
    graduates: KnownPoints,
    women: KnownPoints,
    spend: KnownPoints,
}

impl FieldPoints {
    fn get(&self, field: Field) -> &KnownPoints {
        match field {
            Field::GraduateCount => &self.graduates,
            Field::WomenPct => &self.women,
            Field::GdpSpendPct => &self.spend,
        }
    }
}

/// Reconstruct the dense series for one country.
///
/// `rows` may be in any order. The caller has already validated `config`.
pub fn reconstruct_country(
    country: &str,
    rows: &[&Observation],
    config: &ReconstructConfig,
) -> CountrySeries {
    let mut issues = Vec::new();

    let rows = dedupe_by_year(country, rows, &mut issues);
    let points = collect_points(country, &rows, &mut issues);

    let mut empty = false;
    for field in Field::ALL {
        if points.get(field).is_empty() {
            issues.push(DataIssue::NoUsableData {
                country: country.to_string(),
                field,
            });
            empty = true;
        }
    }
    if empty {
        return CountrySeries {
            records: Vec::new(),
            issues,
        };
    }

    let anchor = config.anchor_year;
    let has_anchor_base = points
        .graduates
        .first_year()
        .is_some_and(|first| first <= anchor);
    if !has_anchor_base {
        issues.push(DataIssue::MissingAnchorData {
            country: country.to_string(),
            anchor_year: anchor,
        });
    }

    let span = i64::from(config.year_max) - i64::from(config.year_min) + 1;
    let mut records = Vec::with_capacity(usize::try_from(span).unwrap_or(0));

    // History: every year in [year_min, anchor].
    for year in config.year_min..=anchor {
        records.push(history_record(country, year, &points));
    }

    // Tail: compound growth from the anchor value, percentages frozen.
    if let (true, Some(first_tail)) = (has_anchor_base, anchor.checked_add(1)) {
        let base = history_record(country, anchor, &points);
        for year in first_tail..=config.year_max {
            records.push(Record {
                country: country.to_string(),
                year,
                graduate_count: base.graduate_count * config.growth_rate.powi(year - anchor),
                women_pct: base.women_pct,
                gdp_spend_pct: base.gdp_spend_pct,
                source: RecordSource::Projected,
            });
        }
    }

    CountrySeries { records, issues }
}

fn history_record(country: &str, year: i32, points: &FieldPoints) -> Record {
    // Every field is non-empty here, so `value_at` always yields a value.
    let value = |field: Field| points.get(field).value_at(year).unwrap_or(f64::NAN);
    let source = if points.graduates.contains(year) {
        RecordSource::Observed
    } else {
        RecordSource::Interpolated
    };
    Record {
        country: country.to_string(),
        year,
        graduate_count: value(Field::GraduateCount),
        women_pct: value(Field::WomenPct),
        gdp_spend_pct: value(Field::GdpSpendPct),
        source,
    }
}

/// Sort by year; the first row seen for a year wins.
fn dedupe_by_year<'a>(
    country: &str,
    rows: &[&'a Observation],
    issues: &mut Vec<DataIssue>,
) -> Vec<&'a Observation> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(rows.len());
    for &row in rows {
        if seen.insert(row.year) {
            out.push(row);
        } else {
            issues.push(DataIssue::DuplicateYear {
                country: country.to_string(),
                year: row.year,
            });
        }
    }
    out.sort_by_key(|r| r.year);
    out
}

fn collect_points(country: &str, rows: &[&Observation], issues: &mut Vec<DataIssue>) -> FieldPoints {
    let mut per_field = |field: Field| {
        let mut pts = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(v) = row.value(field) else { continue };
            if field.accepts(v) {
                pts.push((row.year, v));
            } else {
                issues.push(DataIssue::Malformed {
                    country: country.to_string(),
                    year: row.year,
                    field,
                    raw: v.to_string(),
                });
            }
        }
        KnownPoints::from_sorted(pts)
    };

    FieldPoints {
        graduates: per_field(Field::GraduateCount),
        women: per_field(Field::WomenPct),
        spend: per_field(Field::GdpSpendPct),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ReconstructConfig {
        ReconstructConfig {
            year_min: 1990,
            year_max: 2025,
            anchor_year: 2022,
            growth_rate: 1.02,
        }
    }

    #[test]
    fn two_anchor_example() {
        let a = Observation::new("X", 1990, 100.0, 20.0, 4.0);
        let b = Observation::new("X", 2022, 200.0, 40.0, 5.0);
        let out = reconstruct_country("X", &[&b, &a], &cfg());
        assert!(out.issues.is_empty());
        assert_eq!(out.records.len(), 36);

        let r2006 = &out.records[(2006 - 1990) as usize];
        assert_eq!(r2006.year, 2006);
        assert!((r2006.graduate_count - 150.0).abs() < 1e-9);
        assert!((r2006.women_pct - 30.0).abs() < 1e-9);
        assert_eq!(r2006.source, RecordSource::Interpolated);

        let r2022 = &out.records[(2022 - 1990) as usize];
        assert_eq!(
            (r2022.graduate_count, r2022.women_pct, r2022.gdp_spend_pct),
            (200.0, 40.0, 5.0)
        );
        assert_eq!(r2022.source, RecordSource::Observed);

        let r2025 = out.records.last().unwrap();
        assert_eq!(r2025.year, 2025);
        assert!((r2025.graduate_count - 200.0 * 1.02_f64.powi(3)).abs() < 1e-9);
        assert!((r2025.graduate_count - 212.24).abs() < 0.01);
        assert_eq!(r2025.women_pct, 40.0);
        assert_eq!(r2025.gdp_spend_pct, 5.0);
        assert_eq!(r2025.source, RecordSource::Projected);
    }

    #[test]
    fn duplicate_year_keeps_first_row() {
        let a = Observation::new("X", 1990, 100.0, 20.0, 4.0);
        let dup = Observation::new("X", 1990, 999.0, 20.0, 4.0);
        let b = Observation::new("X", 2022, 200.0, 40.0, 5.0);
        let out = reconstruct_country("X", &[&a, &dup, &b], &cfg());
        assert_eq!(out.records[0].graduate_count, 100.0);
        assert_eq!(
            out.issues,
            vec![DataIssue::DuplicateYear {
                country: "X".to_string(),
                year: 1990
            }]
        );
    }

    #[test]
    fn out_of_domain_percentage_is_excluded() {
        let a = Observation::new("X", 1990, 100.0, 20.0, 4.0);
        let bad = Observation::new("X", 2000, 120.0, 180.0, 4.5);
        let b = Observation::new("X", 2022, 200.0, 40.0, 5.0);
        let out = reconstruct_country("X", &[&a, &bad, &b], &cfg());

        let r2000 = &out.records[10];
        // graduates still use the 2000 row; women_pct ignores it.
        assert_eq!(r2000.graduate_count, 120.0);
        let expected_women = 20.0 + 20.0 * 10.0 / 32.0;
        assert!((r2000.women_pct - expected_women).abs() < 1e-12);
        assert!(matches!(
            out.issues.as_slice(),
            [DataIssue::Malformed { field: Field::WomenPct, year: 2000, .. }]
        ));
    }

    #[test]
    fn missing_field_everywhere_omits_country() {
        let mut a = Observation::new("X", 1990, 100.0, 20.0, 4.0);
        a.gdp_spend_pct = None;
        let out = reconstruct_country("X", &[&a], &cfg());
        assert!(out.records.is_empty());
        assert_eq!(
            out.issues,
            vec![DataIssue::NoUsableData {
                country: "X".to_string(),
                field: Field::GdpSpendPct
            }]
        );
    }

    #[test]
    fn missing_cell_between_brackets_is_skipped() {
        let a = Observation::new("X", 1990, 100.0, 20.0, 4.0);
        let mut gap = Observation::new("X", 2000, 0.0, 25.0, 4.5);
        gap.graduate_count = None;
        let b = Observation::new("X", 2022, 200.0, 40.0, 5.0);
        let out = reconstruct_country("X", &[&a, &gap, &b], &cfg());
        assert!(out.issues.is_empty());

        let r2000 = &out.records[10];
        assert_eq!(r2000.year, 2000);
        assert!((r2000.graduate_count - 131.25).abs() < 1e-9);
        assert_eq!(r2000.source, RecordSource::Interpolated);
        // The other fields of the same row are still used.
        assert_eq!(r2000.women_pct, 25.0);
    }

    #[test]
    fn single_observation_before_anchor_is_flat_then_grows() {
        let a = Observation::new("X", 2000, 10.0, 30.0, 1.5);
        let out = reconstruct_country("X", &[&a], &cfg());
        assert!(out.issues.is_empty());
        assert_eq!(out.records.len(), 36);

        for r in out.records.iter().filter(|r| r.year <= 2022) {
            assert_eq!((r.graduate_count, r.women_pct, r.gdp_spend_pct), (10.0, 30.0, 1.5));
        }
        let r2025 = out.records.last().unwrap();
        assert_eq!(r2025.year, 2025);
        assert!((r2025.graduate_count - 10.61208).abs() < 1e-9);
        assert_eq!(r2025.women_pct, 30.0);
        assert_eq!(r2025.source, RecordSource::Projected);
    }

    #[test]
    fn no_rows_yields_empty_series() {
        let out = reconstruct_country("Ghost", &[], &cfg());
        assert!(out.records.is_empty());
        assert_eq!(out.issues.len(), 3);
    }

    #[test]
    fn observations_after_anchor_only_bracket_history() {
        let a = Observation::new("X", 2010, 100.0, 20.0, 4.0);
        let b = Observation::new("X", 2024, 240.0, 34.0, 5.4);
        let out = reconstruct_country("X", &[&a, &b], &cfg());
        assert!(out.issues.is_empty());

        // Anchor value is interpolated from 2010 and 2024.
        let anchor = &out.records[(2022 - 1990) as usize];
        let expected = 100.0 + 140.0 * 12.0 / 14.0;
        assert!((anchor.graduate_count - expected).abs() < 1e-9);

        // 2024 is projected, not the raw observation.
        let r2024 = &out.records[(2024 - 1990) as usize];
        assert_eq!(r2024.source, RecordSource::Projected);
        assert!((r2024.graduate_count - expected * 1.02_f64.powi(2)).abs() < 1e-9);
    }

    #[test]
    fn missing_anchor_data_returns_history_only() {
        let a = Observation::new("Late", 2024, 50.0, 30.0, 3.0);
        let out = reconstruct_country("Late", &[&a], &cfg());
        assert_eq!(out.records.len(), (2022 - 1990 + 1) as usize);
        assert!(out.records.iter().all(|r| r.source != RecordSource::Projected));
        assert!(out.records.iter().all(|r| r.year <= 2022));
        assert_eq!(
            out.issues,
            vec![DataIssue::MissingAnchorData {
                country: "Late".to_string(),
                anchor_year: 2022
            }]
        );
    }
}
