//! Dashboard views over the reconstructed table.
//!
//! Every function here returns a new collection; the reconstructed table is
//! never modified.

use std::collections::HashSet;

use crate::domain::{Metric, Record};

/// Which part of the reconstructed table a view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFilter {
    /// Selected countries. Empty selects nothing.
    pub countries: Vec<String>,
    pub from_year: i32,
    pub to_year: i32,
}

impl ViewFilter {
    pub fn matches(&self, record: &Record) -> bool {
        (self.from_year..=self.to_year).contains(&record.year)
            && self.countries.iter().any(|c| *c == record.country)
    }
}

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub rank: usize,
    pub country: String,
    pub value: f64,
}

/// Records matching `filter`, in table order.
pub fn filter_records(records: &[Record], filter: &ViewFilter) -> Vec<Record> {
    records.iter().filter(|r| filter.matches(r)).cloned().collect()
}

/// Unique countries in first-seen order.
pub fn available_countries(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.country.as_str()))
        .map(|r| r.country.clone())
        .collect()
}

/// Rank countries by `metric` at `year`, highest first.
///
/// Ties are broken by country name so the order is deterministic.
pub fn rank_at_year(records: &[Record], year: i32, metric: Metric) -> Vec<RankEntry> {
    let mut rows: Vec<(&str, f64)> = records
        .iter()
        .filter(|r| r.year == year)
        .map(|r| (r.country.as_str(), metric.value(r)))
        .collect();

    rows.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    rows.into_iter()
        .enumerate()
        .map(|(idx, (country, value))| RankEntry {
            rank: idx + 1,
            country: country.to_string(),
            value,
        })
        .collect()
}

/// Per-country `(year, value)` series for charts, first-seen country order.
pub fn country_series(records: &[Record], metric: Metric) -> Vec<(String, Vec<(i32, f64)>)> {
    available_countries(records)
        .into_iter()
        .map(|country| {
            let points = records
                .iter()
                .filter(|r| r.country == country)
                .map(|r| (r.year, metric.value(r)))
                .collect();
            (country, points)
        })
        .collect()
}

/// Compound annual growth of graduates between the first and last year of a
/// country's records in the view. `None` when undefined.
pub fn graduate_cagr(records: &[Record], country: &str) -> Option<f64> {
    let mut rows = records.iter().filter(|r| r.country == country);
    let first = rows.next()?;
    let last = rows.last()?;
    let years = last.year - first.year;
    if years <= 0 || first.graduate_count <= 0.0 {
        return None;
    }
    Some((last.graduate_count / first.graduate_count).powf(1.0 / f64::from(years)) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordSource;

    fn rec(country: &str, year: i32, g: f64, w: f64) -> Record {
        Record {
            country: country.to_string(),
            year,
            graduate_count: g,
            women_pct: w,
            gdp_spend_pct: 5.0,
            source: RecordSource::Interpolated,
        }
    }

    fn table() -> Vec<Record> {
        vec![
            rec("A", 2000, 10.0, 30.0),
            rec("A", 2001, 11.0, 31.0),
            rec("B", 2000, 20.0, 25.0),
            rec("B", 2001, 22.0, 26.0),
            rec("C", 2000, 5.0, 40.0),
            rec("C", 2001, 22.0, 41.0),
        ]
    }

    #[test]
    fn filter_selects_countries_and_years_without_touching_input() {
        let records = table();
        let before = records.clone();
        let filter = ViewFilter {
            countries: vec!["A".to_string(), "C".to_string()],
            from_year: 2001,
            to_year: 2001,
        };
        let view = filter_records(&records, &filter);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.year == 2001 && r.country != "B"));
        assert_eq!(records, before);
    }

    #[test]
    fn empty_selection_or_inverted_range_is_empty() {
        let records = table();
        let none = ViewFilter {
            countries: vec![],
            from_year: 2000,
            to_year: 2001,
        };
        assert!(filter_records(&records, &none).is_empty());
        let inverted = ViewFilter {
            countries: vec!["A".to_string()],
            from_year: 2001,
            to_year: 2000,
        };
        assert!(filter_records(&records, &inverted).is_empty());
    }

    #[test]
    fn ranking_descends_with_name_tiebreak() {
        let ranking = rank_at_year(&table(), 2001, Metric::Graduates);
        let order: Vec<_> = ranking.iter().map(|e| e.country.as_str()).collect();
        assert_eq!(order, ["B", "C", "A"]);
        assert_eq!(ranking[0].rank, 1);

        let women = rank_at_year(&table(), 2000, Metric::WomenPct);
        assert_eq!(women[0].country, "C");
    }

    #[test]
    fn series_keep_first_seen_order() {
        let series = country_series(&table(), Metric::WomenPct);
        let names: Vec<_> = series.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(series[1].1, vec![(2000, 25.0), (2001, 26.0)]);
    }

    #[test]
    fn cagr_over_view() {
        let g = graduate_cagr(&table(), "B").unwrap();
        assert!((g - 0.1).abs() < 1e-12);
        assert_eq!(graduate_cagr(&table(), "missing"), None);
    }
}
