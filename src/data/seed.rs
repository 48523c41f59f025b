//! Built-in seed dataset.
//!
//! Historical milestones (1990 and 2022) per country, normalized from UNESCO
//! Institute for Statistics and World Bank education figures. Country names are
//! the data keys; display names are translated in `i18n`.

use crate::domain::Observation;

/// Countries shown when the user has not selected any.
pub const DEFAULT_COUNTRIES: [&str; 4] = ["Argentina", "EEUU", "Brasil", "México"];

/// Public sources behind the seed figures.
pub const SOURCES: [(&str, &str); 2] = [
    (
        "UNESCO UIS - Science, Technology and Innovation",
        "https://uis.unesco.org/",
    ),
    (
        "World Bank - Education Statistics",
        "https://data.worldbank.org/topic/education",
    ),
];

/// `(year, country, graduates, women %, education spending % of GDP)`.
const SEED: [(i32, &str, f64, f64, f64); 12] = [
    (1990, "Argentina", 9_200.0, 30.0, 4.0),
    (2022, "Argentina", 16_800.0, 42.0, 5.1),
    (1990, "EEUU", 320_000.0, 25.0, 5.0),
    (2022, "EEUU", 780_000.0, 35.0, 5.6),
    (1990, "Brasil", 45_000.0, 20.0, 3.8),
    (2022, "Brasil", 115_000.0, 33.0, 6.0),
    (1990, "México", 35_000.0, 18.0, 3.5),
    (2022, "México", 138_000.0, 30.0, 5.2),
    (1990, "Canadá", 28_000.0, 28.0, 6.0),
    (2022, "Canadá", 75_000.0, 38.0, 6.5),
    (1990, "Chile", 5_800.0, 15.0, 3.2),
    (2022, "Chile", 15_200.0, 28.0, 5.0),
];

/// The seed observation table, in source order.
pub fn seed_observations() -> Vec<Observation> {
    SEED.iter()
        .map(|&(year, country, graduates, women, spend)| {
            Observation::new(country, year, graduates, women, spend)
        })
        .collect()
}
