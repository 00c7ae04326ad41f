//! Per-channel scam rates derived from the overall scam rate.
//!
//! Each channel rate is a Gaussian perturbation of the overall rate
//! (sigma = CATEGORY_STD_DEV), clipped to [CATEGORY_MIN, CATEGORY_MAX].

use crate::rng::SeededStream;
use serde::{Deserialize, Serialize};

pub const CATEGORY_STD_DEV: f64 = 5.0;
pub const CATEGORY_MIN: f64 = 1.0;
pub const CATEGORY_MAX: f64 = 100.0;

/// Scam delivery channel. Declaration order is the canonical order
/// used for tie-breaking, iteration, and recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScamCategory {
    Phone,
    Email,
    Text,
    InPerson,
    SocialMedia,
}

impl ScamCategory {
    pub const ALL: [ScamCategory; 5] = [
        Self::Phone,
        Self::Email,
        Self::Text,
        Self::InPerson,
        Self::SocialMedia,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Phone       => "phone",
            Self::Email       => "email",
            Self::Text        => "text",
            Self::InPerson    => "in_person",
            Self::SocialMedia => "social_media",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryRates {
    pub phone:        f64,
    pub email:        f64,
    pub text:         f64,
    pub in_person:    f64,
    pub social_media: f64,
}

impl CategoryRates {
    /// The same rate for every channel.
    pub fn uniform(rate: f64) -> Self {
        Self {
            phone: rate,
            email: rate,
            text: rate,
            in_person: rate,
            social_media: rate,
        }
    }

    pub fn get(&self, category: ScamCategory) -> f64 {
        match category {
            ScamCategory::Phone       => self.phone,
            ScamCategory::Email       => self.email,
            ScamCategory::Text        => self.text,
            ScamCategory::InPerson    => self.in_person,
            ScamCategory::SocialMedia => self.social_media,
        }
    }

    pub fn set(&mut self, category: ScamCategory, rate: f64) {
        match category {
            ScamCategory::Phone       => self.phone = rate,
            ScamCategory::Email       => self.email = rate,
            ScamCategory::Text        => self.text = rate,
            ScamCategory::InPerson    => self.in_person = rate,
            ScamCategory::SocialMedia => self.social_media = rate,
        }
    }

    /// (category, rate) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ScamCategory, f64)> + '_ {
        ScamCategory::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    /// Highest-rate channel. Ties go to the first in canonical order.
    pub fn highest(&self) -> (ScamCategory, f64) {
        self.iter()
            .fold((ScamCategory::Phone, f64::NEG_INFINITY), |best, (c, r)| {
                if r > best.1 { (c, r) } else { best }
            })
    }

    /// Lowest-rate channel. Ties go to the first in canonical order.
    pub fn lowest(&self) -> (ScamCategory, f64) {
        self.iter()
            .fold((ScamCategory::Phone, f64::INFINITY), |best, (c, r)| {
                if r < best.1 { (c, r) } else { best }
            })
    }
}

/// Derive category rates for every record from its overall scam rate.
///
/// Draws are made category by category, each over all records in order,
/// consuming the caller's stream. The results are therefore tied to the
/// stream position: they are not reproducible independently of the
/// draws that preceded them.
pub fn decompose_all(scam_rates: &[f64], rng: &mut SeededStream) -> Vec<CategoryRates> {
    let mut out: Vec<CategoryRates> = scam_rates
        .iter()
        .map(|&rate| CategoryRates::uniform(rate))
        .collect();

    for category in ScamCategory::ALL {
        for (rates, &scam_rate) in out.iter_mut().zip(scam_rates) {
            let drawn = rng.normal(scam_rate, CATEGORY_STD_DEV);
            rates.set(category, drawn.clamp(CATEGORY_MIN, CATEGORY_MAX));
        }
    }
    out
}
