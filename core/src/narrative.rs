//! Human-readable analysis and safety recommendations.
//!
//! Both outputs are pure functions of a record and its category rates.
//! Thresholds are strict: a channel at exactly 60 gets no advice.

use crate::{
    categories::{CategoryRates, ScamCategory},
    classifier::classify,
    feature_store::MunicipalityRecord,
};

pub const HIGH_CAUTION_THRESHOLD: f64 = 70.0;
pub const COMMON_TYPE_THRESHOLD: f64 = 40.0;
pub const ELDERLY_THRESHOLD: f64 = 20.0;
pub const AFFLUENT_INCOME: f64 = 120_000.0;
pub const HARDSHIP_INCOME: f64 = 60_000.0;
pub const CHANNEL_ADVICE_THRESHOLD: f64 = 60.0;

pub const BASELINE_RECOMMENDATIONS: [&str; 2] = [
    "Verify the identity of anyone requesting personal information",
    "Never send money to people you haven't met in person",
];

pub const ELDERLY_RECOMMENDATION: &str =
    "Set up community education programs for elderly residents about common scams";

/// Fixed advice for a channel whose rate exceeds the threshold.
pub fn channel_recommendations(category: ScamCategory) -> [&'static str; 2] {
    match category {
        ScamCategory::Phone => [
            "Be wary of unsolicited phone calls claiming to be from government agencies",
            "Consider using a call screening service or app",
        ],
        ScamCategory::Email => [
            "Use email filtering and never click suspicious links",
            "Enable two-factor authentication on all email and financial accounts",
        ],
        ScamCategory::Text => [
            "Be cautious of text messages from unknown numbers with urgent requests",
            "Don't respond to text messages requesting personal information",
        ],
        ScamCategory::InPerson => [
            "Ask for identification from anyone claiming to represent a company",
            "Verify service workers by calling the company directly",
        ],
        ScamCategory::SocialMedia => [
            "Be cautious of friend requests from unknown people",
            "Never share financial or personal information through social media platforms",
        ],
    }
}

/// Narrative summary: overall level, dominant channels, then
/// demographic and income clauses.
pub fn analyze(record: &MunicipalityRecord, rates: &CategoryRates) -> String {
    let scam_rate = record.scam_rate;
    let level = classify(scam_rate).label().to_lowercase();
    let (high_cat, high_rate) = rates.highest();
    let (low_cat, low_rate) = rates.lowest();

    let mut text = format!(
        "{} has a {level} scam risk with an overall scam rate of {scam_rate:.1}/100. ",
        record.city
    );

    if scam_rate > HIGH_CAUTION_THRESHOLD {
        text.push_str(&format!(
            "Residents should exercise high caution, particularly with {} scams, \
             which show the highest rate ({high_rate:.1}/100). ",
            high_cat.name()
        ));
        text.push_str(&format!(
            "Even {} scams, the least prevalent, remain elevated ({low_rate:.1}/100). ",
            low_cat.name()
        ));
    } else if scam_rate > COMMON_TYPE_THRESHOLD {
        text.push_str(&format!(
            "The most common scam type is {} ({high_rate:.1}/100), \
             while {} scams are less prevalent ({low_rate:.1}/100). ",
            high_cat.name(),
            low_cat.name()
        ));
    } else {
        text.push_str(&format!(
            "While the overall risk is {level}, residents should still be cautious \
             about {} scams ({high_rate:.1}/100). ",
            high_cat.name()
        ));
    }

    let f = &record.features;
    if f.elderly_percentage > ELDERLY_THRESHOLD {
        text.push_str(&format!(
            "The high elderly population ({:.1}%) \
             may contribute to increased vulnerability to certain scams. ",
            f.elderly_percentage
        ));
    }

    if f.median_income > AFFLUENT_INCOME {
        text.push_str("Higher median income may make this area a target for sophisticated financial scams.");
    } else if f.median_income < HARDSHIP_INCOME {
        text.push_str("Residents may be vulnerable to financial hardship scams promising quick money.");
    }

    text
}

/// Baseline advice, then two items per channel above the threshold
/// (canonical channel order), then the elderly outreach item.
pub fn recommend(record: &MunicipalityRecord, rates: &CategoryRates) -> Vec<String> {
    let mut out: Vec<String> = BASELINE_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect();

    for (category, rate) in rates.iter() {
        if rate > CHANNEL_ADVICE_THRESHOLD {
            out.extend(channel_recommendations(category).iter().map(|s| s.to_string()));
        }
    }

    if record.features.elderly_percentage > ELDERLY_THRESHOLD {
        out.push(ELDERLY_RECOMMENDATION.to_string());
    }
    out
}
