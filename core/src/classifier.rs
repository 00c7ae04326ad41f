//! Score → discrete risk level.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "High")]
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow  => "Very Low",
            Self::Low      => "Low",
            Self::Moderate => "Moderate",
            Self::High     => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower bounds are inclusive: 20.0 is Low, 80.0 is VeryHigh.
pub fn classify(score: f64) -> RiskLevel {
    if score < 20.0 {
        RiskLevel::VeryLow
    } else if score < 40.0 {
        RiskLevel::Low
    } else if score < 60.0 {
        RiskLevel::Moderate
    } else if score < 80.0 {
        RiskLevel::High
    } else {
        RiskLevel::VeryHigh
    }
}
