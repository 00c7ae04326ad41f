//! Query service: listing, lookup, alias normalization, data errors.

mod common;

use common::{rates, record};
use scamrisk_core::{
    classifier::RiskLevel,
    feature_store::{DataOrigin, FeatureStore},
    query::{normalize_city_name, QueryService},
    QueryError,
};

fn fixture() -> FeatureStore {
    FeatureStore::from_records(
        vec![
            record("Elizabeth", 78.04, rates(85.06, 75.0, 80.0, 70.0, 82.0)),
            record("Union Township", 65.0, rates(70.0, 65.0, 68.0, 60.0, 63.0)),
            record("Union", 30.0, rates(20.0, 20.0, 20.0, 20.0, 20.0)),
        ],
        DataOrigin::Synthetic { seed: 0 },
    )
    .unwrap()
}

#[test]
fn union_alias_is_case_insensitive() {
    assert_eq!(normalize_city_name("union"), "Union Township");
    assert_eq!(normalize_city_name("UNION"), "Union Township");
    assert_eq!(normalize_city_name("Union"), "Union Township");
    assert_eq!(normalize_city_name("Union Township"), "Union Township");
    assert_eq!(normalize_city_name("union township"), "union township");
}

#[test]
fn alias_spellings_return_the_same_record() {
    let store = fixture();
    let q = QueryService::new(&store);
    let a = q.get("union").unwrap();
    let b = q.get("UNION").unwrap();
    let c = q.get("Union Township").unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(a.city, "Union Township");
}

#[test]
fn plain_union_is_rewritten_before_lookup() {
    // A record literally named "Union" is unreachable: the alias wins.
    let store = fixture();
    let detail = QueryService::new(&store).get("Union").unwrap();
    assert_eq!(detail.city, "Union Township");
}

#[test]
fn other_names_are_case_sensitive() {
    let store = fixture();
    let q = QueryService::new(&store);
    assert!(q.get("Elizabeth").is_ok());
    assert_eq!(
        q.get("elizabeth"),
        Err(QueryError::NotFound { city: "elizabeth".into() })
    );
}

#[test]
fn unknown_city_is_not_found() {
    let store = fixture();
    let err = QueryService::new(&store).get("Nowhere").unwrap_err();
    assert_eq!(err, QueryError::NotFound { city: "Nowhere".into() });
    assert_eq!(err.to_string(), "City not found");
}

#[test]
fn detail_rounds_to_one_decimal() {
    let store = fixture();
    let d = QueryService::new(&store).get("Elizabeth").unwrap();
    assert_eq!(d.risk_score, 78.0);
    assert_eq!(d.risk_level, RiskLevel::High);
    assert_eq!(d.phone_scam_risk, 85.1);
    assert_eq!(d.email_scam_risk, 75.0);
    assert_eq!(d.in_person_scam_risk, 70.0);
    // every channel is above 60
    assert_eq!(d.recommendations.len(), 2 + 5 * 2);
    assert!(d.analysis.starts_with("Elizabeth has a high scam risk"));
}

#[test]
fn list_all_preserves_store_order_and_is_stable() {
    let store = fixture();
    let q = QueryService::new(&store);
    let first = q.list_all().unwrap();
    let second = q.list_all().unwrap();

    assert_eq!(first.len(), store.len());
    let names: Vec<&str> = first.iter().map(|c| c.city.as_str()).collect();
    assert_eq!(names, ["Elizabeth", "Union Township", "Union"]);
    assert_eq!(first, second);

    assert_eq!(first[0].scam_rate, 78.0);
    assert_eq!(first[0].categories.phone, 85.1);
    assert_eq!(first[0].population, 40_000);
    assert_eq!(first[2].risk_level, RiskLevel::Low);
}

#[test]
fn list_all_covers_the_synthetic_set() {
    let store = FeatureStore::generate(42).unwrap();
    let all = QueryService::new(&store).list_all().unwrap();
    assert_eq!(all.len(), 21);
    assert_eq!(all[2].city, "Union Township");
}

#[test]
fn missing_categories_surface_as_internal_errors() {
    let mut incomplete = record("Rahway", 50.0, rates(0.0, 0.0, 0.0, 0.0, 0.0));
    incomplete.categories = None;
    let store = FeatureStore::from_records(
        vec![record("Clark", 40.0, rates(40.0, 40.0, 40.0, 40.0, 40.0)), incomplete],
        DataOrigin::External { path: "test.csv".into() },
    )
    .unwrap();
    let q = QueryService::new(&store);

    assert!(q.get("Clark").is_ok());
    let err = q.get("Rahway").unwrap_err();
    assert!(matches!(err, QueryError::Internal { ref city, .. } if city == "Rahway"));
    assert_eq!(err.city(), "Rahway");

    // No partial listing.
    assert!(matches!(q.list_all(), Err(QueryError::Internal { .. })));
}
