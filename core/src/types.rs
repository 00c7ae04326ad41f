//! Shared primitive types used across the entire pipeline.

use serde::{Deserialize, Serialize};

/// A municipality's unique name. Lookups are exact-match.
pub type CityName = String;

/// Number of model input features.
pub const FEATURE_COUNT: usize = 8;

/// Model input column order. NEVER reorder: the scaler and every
/// tree index features by position.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "population",
    "median_income",
    "elderly_percentage",
    "internet_usage",
    "police_per_capita",
    "prior_scam_reports",
    "financial_institutions",
    "tech_literacy_score",
];

/// Demographic and infrastructure inputs for one municipality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Features {
    pub population:             u64,
    pub median_income:          f64,
    pub elderly_percentage:     f64,
    pub internet_usage:         f64,
    pub police_per_capita:      f64,
    pub prior_scam_reports:     u64,
    pub financial_institutions: u64,
    pub tech_literacy_score:    f64,
}

impl Features {
    /// The feature vector in FEATURE_NAMES order.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.population as f64,
            self.median_income,
            self.elderly_percentage,
            self.internet_usage,
            self.police_per_capita,
            self.prior_scam_reports as f64,
            self.financial_institutions as f64,
            self.tech_literacy_score,
        ]
    }
}

/// Round to one decimal place for presentation.
/// Exact halves round away from zero (`0.25` gives `0.3`), not to even.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
