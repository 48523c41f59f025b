use stem_trends::data::seed_observations;
use stem_trends::domain::{Observation, ReconstructConfig, Record, RecordSource};
use stem_trends::reconstruct::{reconstruct, reconstruct_with_issues};

fn rows<'a>(records: &'a [Record], country: &'a str) -> Vec<&'a Record> {
    records.iter().filter(|r| r.country == country).collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

#[test]
fn every_country_gets_one_row_per_year() {
    let config = ReconstructConfig::default();
    let records = reconstruct(&seed_observations(), &config).unwrap();

    for country in ["Argentina", "EEUU", "Brasil", "México", "Canadá", "Chile"] {
        let years: Vec<i32> = rows(&records, country).iter().map(|r| r.year).collect();
        let expected: Vec<i32> = (config.year_min..=config.year_max).collect();
        assert_eq!(years, expected, "{country}");
    }
}

#[test]
fn observed_years_are_reproduced_exactly() {
    let obs = seed_observations();
    let records = reconstruct(&obs, &ReconstructConfig::default()).unwrap();

    for o in &obs {
        let r = records
            .iter()
            .find(|r| r.country == o.country && r.year == o.year)
            .unwrap();
        assert_eq!(r.source, RecordSource::Observed);
        assert_eq!(Some(r.graduate_count), o.graduate_count);
        assert_eq!(Some(r.women_pct), o.women_pct);
        assert_eq!(Some(r.gdp_spend_pct), o.gdp_spend_pct);
    }
}

#[test]
fn history_between_anchors_is_linear() {
    let obs = vec![
        Observation::new("X", 1990, 100.0, 20.0, 1.0),
        Observation::new("X", 2000, 300.0, 30.0, 2.0),
        Observation::new("X", 2010, 250.0, 40.0, 2.0),
        Observation::new("X", 2022, 490.0, 46.0, 3.2),
    ];
    let records = reconstruct(&obs, &ReconstructConfig::default()).unwrap();
    let x = rows(&records, "X");

    for window in obs.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        for y in a.year..=b.year {
            let t = f64::from(y - a.year) / f64::from(b.year - a.year);
            let r = x.iter().find(|r| r.year == y).unwrap();
            let g = a.graduate_count.unwrap() + (b.graduate_count.unwrap() - a.graduate_count.unwrap()) * t;
            let w = a.women_pct.unwrap() + (b.women_pct.unwrap() - a.women_pct.unwrap()) * t;
            assert!(close(r.graduate_count, g), "{y}: {} vs {g}", r.graduate_count);
            assert!(close(r.women_pct, w), "{y}");
        }
    }

    let r2005 = x.iter().find(|r| r.year == 2005).unwrap();
    assert_eq!(r2005.source, RecordSource::Interpolated);
    assert!(close(r2005.graduate_count, 275.0));
}

#[test]
fn tail_grows_geometrically_with_frozen_percentages() {
    let config = ReconstructConfig::default();
    let records = reconstruct(&seed_observations(), &config).unwrap();

    for country in ["Argentina", "Chile"] {
        let series = rows(&records, country);
        let anchor = series.iter().find(|r| r.year == config.anchor_year).unwrap();
        for r in series.iter().filter(|r| r.year > config.anchor_year) {
            let k = r.year - config.anchor_year;
            assert_eq!(r.source, RecordSource::Projected);
            assert!(close(r.graduate_count, anchor.graduate_count * config.growth_rate.powi(k)));
            assert_eq!(r.women_pct, anchor.women_pct);
            assert_eq!(r.gdp_spend_pct, anchor.gdp_spend_pct);
        }
    }
}

#[test]
fn two_point_example() {
    let obs = vec![
        Observation::new("X", 1990, 100.0, 30.0, 1.0),
        Observation::new("X", 2022, 200.0, 40.0, 2.0),
    ];
    let records = reconstruct(&obs, &ReconstructConfig::default()).unwrap();
    let x = rows(&records, "X");

    let at = |year: i32| x.iter().find(|r| r.year == year).unwrap();
    assert!(close(at(2006).graduate_count, 150.0));
    assert!(close(at(2006).women_pct, 35.0));
    assert!(close(at(2025).graduate_count, 200.0 * 1.02_f64.powi(3)));
    assert!((at(2025).graduate_count - 212.2416).abs() < 1e-6);
}

#[test]
fn rerunning_gives_identical_output() {
    let obs = seed_observations();
    let config = ReconstructConfig {
        growth_rate: 1.035,
        ..ReconstructConfig::default()
    };
    let a = reconstruct_with_issues(&obs, &config).unwrap();
    let b = reconstruct_with_issues(&obs, &config).unwrap();
    assert_eq!(a.records, b.records);
    assert_eq!(a.issues, b.issues);
}

#[test]
fn countries_are_independent() {
    let mut obs = seed_observations();
    let alone = reconstruct(&obs, &ReconstructConfig::default()).unwrap();

    obs.push(Observation::new("Perú", 1995, 10.0, 30.0, 0.8));
    obs.push(Observation::new("Perú", 2022, 40.0, 33.0, 0.9));
    let with_extra = reconstruct(&obs, &ReconstructConfig::default()).unwrap();

    assert_eq!(rows(&alone, "Chile"), rows(&with_extra, "Chile"));
    assert_eq!(rows(&with_extra, "Perú").len(), 36);
}

#[test]
fn bad_configuration_is_rejected() {
    let obs = seed_observations();
    let inverted = ReconstructConfig {
        year_min: 2030,
        ..ReconstructConfig::default()
    };
    assert!(reconstruct(&obs, &inverted).is_err());

    let zero_growth = ReconstructConfig {
        growth_rate: 0.0,
        ..ReconstructConfig::default()
    };
    assert!(reconstruct(&obs, &zero_growth).is_err());
}
