//! Analysis text and safety recommendations.

mod common;

use common::{features, rates, record};
use scamrisk_core::narrative::{
    analyze, channel_recommendations, recommend, BASELINE_RECOMMENDATIONS,
    ELDERLY_RECOMMENDATION,
};
use scamrisk_core::categories::ScamCategory;

#[test]
fn baseline_only_when_every_channel_is_at_or_below_sixty() {
    let r = record("Clark", 50.0, rates(60.0, 60.0, 10.0, 0.0, 59.9));
    let recs = recommend(&r, r.categories.as_ref().unwrap());
    assert_eq!(recs, BASELINE_RECOMMENDATIONS.to_vec());
}

#[test]
fn one_channel_above_threshold_adds_two_items() {
    let r = record("Clark", 50.0, rates(61.0, 60.0, 0.0, 0.0, 0.0));
    let recs = recommend(&r, r.categories.as_ref().unwrap());
    assert_eq!(recs.len(), 4);
    assert_eq!(
        recs[2],
        "Be wary of unsolicited phone calls claiming to be from government agencies"
    );
    assert_eq!(recs[3], "Consider using a call screening service or app");
}

#[test]
fn channels_follow_canonical_order_then_elderly() {
    let mut r = record("Summit", 85.0, rates(90.0, 90.0, 90.0, 90.0, 90.0));
    r.features = features(150_000.0, 22.5);
    let recs = recommend(&r, r.categories.as_ref().unwrap());

    assert_eq!(recs.len(), 2 + 5 * 2 + 1);
    assert_eq!(&recs[..2], &BASELINE_RECOMMENDATIONS.map(String::from)[..]);
    for (i, category) in ScamCategory::ALL.iter().enumerate() {
        let expected = channel_recommendations(*category);
        assert_eq!(recs[2 + 2 * i], expected[0]);
        assert_eq!(recs[3 + 2 * i], expected[1]);
    }
    assert_eq!(recs.last().map(String::as_str), Some(ELDERLY_RECOMMENDATION));
}

#[test]
fn social_media_and_in_person_text_is_verbatim() {
    assert_eq!(
        channel_recommendations(ScamCategory::SocialMedia),
        [
            "Be cautious of friend requests from unknown people",
            "Never share financial or personal information through social media platforms",
        ]
    );
    assert_eq!(
        channel_recommendations(ScamCategory::InPerson),
        [
            "Ask for identification from anyone claiming to represent a company",
            "Verify service workers by calling the company directly",
        ]
    );
}

#[test]
fn elderly_exactly_twenty_gets_no_outreach() {
    let mut r = record("Garwood", 30.0, rates(10.0, 10.0, 10.0, 10.0, 10.0));
    r.features = features(90_000.0, 20.0);
    let recs = recommend(&r, r.categories.as_ref().unwrap());
    assert!(!recs.iter().any(|s| s == ELDERLY_RECOMMENDATION));
}

#[test]
fn high_tier_analysis_names_highest_and_lowest() {
    let r = record("Elizabeth", 78.25, rates(85.0, 75.0, 80.0, 70.0, 82.0));
    let text = analyze(&r, r.categories.as_ref().unwrap());

    assert!(text.starts_with(
        "Elizabeth has a high scam risk with an overall scam rate of 78.2/100. "
    ) || text.starts_with(
        "Elizabeth has a high scam risk with an overall scam rate of 78.3/100. "
    ), "{text}");
    assert!(text.contains(
        "Residents should exercise high caution, particularly with phone scams, \
         which show the highest rate (85.0/100). "
    ), "{text}");
    assert!(text.contains("in_person scams"), "{text}");
}

#[test]
fn middle_tier_analysis_contrasts_common_and_rare() {
    let r = record("Plainfield", 55.0, rates(50.0, 65.5, 40.0, 30.25, 60.0));
    let text = analyze(&r, r.categories.as_ref().unwrap());
    assert!(text.starts_with("Plainfield has a moderate scam risk with an overall scam rate of 55.0/100. "));
    assert!(text.contains(
        "The most common scam type is email (65.5/100), while in_person scams are less prevalent (30.2/100). "
    ) || text.contains(
        "The most common scam type is email (65.5/100), while in_person scams are less prevalent (30.3/100). "
    ), "{text}");
}

#[test]
fn low_tier_analysis_still_warns_about_top_channel() {
    let r = record("Fanwood", 15.0, rates(12.0, 18.0, 18.0, 5.0, 9.0));
    let text = analyze(&r, r.categories.as_ref().unwrap());
    assert_eq!(
        text,
        "Fanwood has a very low scam risk with an overall scam rate of 15.0/100. \
         While the overall risk is very low, residents should still be cautious \
         about email scams (18.0/100). "
    );
}

#[test]
fn demographic_and_income_clauses() {
    let mut r = record("Hillside", 45.0, rates(40.0, 40.0, 40.0, 40.0, 40.0));

    r.features = features(150_000.0, 21.0);
    let text = analyze(&r, r.categories.as_ref().unwrap());
    assert!(text.contains(
        "The high elderly population (21.0%) may contribute to increased vulnerability to certain scams. "
    ));
    assert!(text.ends_with(
        "Higher median income may make this area a target for sophisticated financial scams."
    ));

    r.features = features(50_000.0, 12.0);
    let text = analyze(&r, r.categories.as_ref().unwrap());
    assert!(!text.contains("elderly"));
    assert!(text.ends_with(
        "Residents may be vulnerable to financial hardship scams promising quick money."
    ));

    r.features = features(60_000.0, 12.0);
    let text = analyze(&r, r.categories.as_ref().unwrap());
    assert!(!text.contains("median income") && !text.contains("hardship"));
    assert!(text.ends_with(". "));
}
