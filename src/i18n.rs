//! Dashboard texts in Spanish and English.
//!
//! Translation is display-only: country names stay the data keys everywhere
//! else (filters, exports, rankings).

use crate::domain::{Lang, Metric};

/// Labels used by the report and TUI front-ends.
#[derive(Debug, Clone, Copy)]
pub struct Texts {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub settings: &'static str,
    pub countries: &'static str,
    pub year_range: &'static str,
    pub women_metric: &'static str,
    pub ranking_title: &'static str,
    pub evolution_title: &'static str,
    pub sources_title: &'static str,
    pub sources_text: &'static str,
    pub data_table: &'static str,
    pub empty_selection: &'static str,
    pub from: &'static str,
    pub to: &'static str,
    pub metric: &'static str,
    pub language: &'static str,
    pub growth: &'static str,
    /// Records table headers: country, year, graduates, women, spending, source.
    pub columns: [&'static str; 6],
}

const ES: Texts = Texts {
    title: "Análisis de Educación STEM",
    subtitle: "Análisis de graduados y paridad de género en América (Tendencias 1990-2025)",
    settings: "Configuración",
    countries: "Seleccionar Países:",
    year_range: "Rango de años:",
    women_metric: "Paridad de Género (Mujeres %)",
    ranking_title: "Ranking de Graduados en el año",
    evolution_title: "Evolución Histórica",
    sources_title: "Fuentes y Referencias Oficiales",
    sources_text: "Cifras normalizadas según informes de UNESCO y el Banco Mundial:",
    data_table: "Datos procesados (incluye interpolación matemática)",
    empty_selection: "Selecciona al menos un país y un rango de años para visualizar los datos.",
    from: "desde",
    to: "hasta",
    metric: "Métrica:",
    language: "Idioma:",
    growth: "Crecimiento anual:",
    columns: ["país", "año", "graduados", "mujeres%", "pbi%", "fuente"],
};

const EN: Texts = Texts {
    title: "STEM Education Analysis",
    subtitle: "STEM graduates and gender parity analysis (Trends 1990-2025)",
    settings: "Settings",
    countries: "Select Countries:",
    year_range: "Year Range:",
    women_metric: "Gender Parity (Women %)",
    ranking_title: "Graduates Ranking in year",
    evolution_title: "Historical Evolution",
    sources_title: "Official Sources & References",
    sources_text: "Figures normalized according to UNESCO and World Bank reports:",
    data_table: "Processed data (includes mathematical interpolation)",
    empty_selection: "Select at least one country and a year range to view the data.",
    from: "from",
    to: "to",
    metric: "Metric:",
    language: "Language:",
    growth: "Annual growth:",
    columns: ["country", "year", "graduates", "women%", "gdp%", "source"],
};

pub fn texts(lang: Lang) -> &'static Texts {
    match lang {
        Lang::Es => &ES,
        Lang::En => &EN,
    }
}

/// Display name of a country key. Unknown names pass through unchanged.
pub fn country_label(name: &str, lang: Lang) -> &str {
    match (lang, name) {
        (Lang::En, "EEUU") => "USA",
        (Lang::En, "Brasil") => "Brazil",
        (Lang::En, "Canadá") => "Canada",
        (Lang::En, "México") => "Mexico",
        _ => name,
    }
}

/// Axis / column label for a metric.
pub fn metric_label(metric: Metric, lang: Lang) -> &'static str {
    match (metric, lang) {
        (Metric::Graduates, Lang::Es) => "Graduados",
        (Metric::Graduates, Lang::En) => "Graduates",
        (Metric::WomenPct, lang) => texts(lang).women_metric,
        (Metric::GdpSpendPct, Lang::Es) => "Inversión (% PBI)",
        (Metric::GdpSpendPct, Lang::En) => "Spending (% GDP)",
    }
}
