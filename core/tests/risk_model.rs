//! Risk model training on the feature store.

use scamrisk_core::{
    feature_store::FeatureStore,
    model::{ForestConfig, RiskModel},
    types::FEATURE_NAMES,
    ModelError,
};

fn trained(seed: u64) -> (FeatureStore, RiskModel) {
    let store = FeatureStore::generate(42).unwrap();
    let model = RiskModel::train(store.records(), &ForestConfig::default(), seed)
        .expect("training succeeds");
    (store, model)
}

#[test]
fn trains_one_hundred_trees_over_eight_features() {
    let (_, model) = trained(42);
    assert_eq!(model.n_trees(), 100);
    assert_eq!(model.feature_names(), FEATURE_NAMES.map(String::from).as_slice());
    assert_eq!(model.scaler().n_features(), 8);
}

#[test]
fn in_sample_fit_is_strong() {
    let (_, model) = trained(42);
    assert!(model.training_r2() > 0.5, "r2 {}", model.training_r2());
    assert!(model.training_r2() <= 1.0);
}

#[test]
fn predictions_stay_within_the_label_range() {
    let (store, model) = trained(42);
    for record in store.records() {
        let p = model.predict(&record.features).unwrap();
        assert!((10.0..=100.0).contains(&p), "prediction {p} for {}", record.city);
    }
}

#[test]
fn same_model_seed_gives_identical_predictions() {
    let (store, a) = trained(7);
    let (_, b) = trained(7);
    for record in store.records() {
        assert_eq!(
            a.predict(&record.features).unwrap(),
            b.predict(&record.features).unwrap()
        );
    }
}

#[test]
fn importances_are_normalized() {
    let (_, model) = trained(42);
    let importances = model.feature_importances();
    assert_eq!(importances.len(), 8);
    let total: f64 = importances.iter().map(|(_, v)| v).sum();
    assert!((total - 1.0).abs() < 1e-9, "sum {total}");
    assert!(importances.iter().all(|(_, v)| *v >= 0.0));
}

#[test]
fn single_record_trains_to_its_own_rate() {
    let store = FeatureStore::synthesize(&["Kenilworth"], 42).unwrap();
    let model = RiskModel::train(store.records(), &ForestConfig::default(), 42).unwrap();
    let p = model.predict(&store.records()[0].features).unwrap();
    assert_eq!(p, 55.0);
    assert_eq!(model.training_r2(), 1.0);
}

#[test]
fn empty_store_cannot_train() {
    let err = RiskModel::train(&[], &ForestConfig::default(), 42).unwrap_err();
    assert_eq!(err, ModelError::EmptyTrainingSet);
}
