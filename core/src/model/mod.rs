//! The risk model: standardized features → random forest regressor.
//!
//! Trained once at startup on the whole feature store. The serving path
//! never calls `predict`: served scores are the stored scam rates. The
//! model is kept so unseen inputs could be scored with the same
//! transform, and its in-sample fit is checked at startup.

pub mod forest;
pub mod scaler;
pub mod tree;

pub use forest::{ForestConfig, RandomForest};
pub use scaler::StandardScaler;

use crate::{
    error::ModelError,
    feature_store::MunicipalityRecord,
    types::{Features, FEATURE_NAMES},
};

/// Row-major training matrix with one label per row.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub features: Vec<Vec<f64>>,
    pub labels:   Vec<f64>,
}

impl Dataset {
    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    pub fn n_features(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone)]
pub struct RiskModel {
    forest:        RandomForest,
    scaler:        StandardScaler,
    feature_names: Vec<String>,
    training_r2:   f64,
}

impl RiskModel {
    /// Fit the scaler and forest on every record, predicting scam_rate.
    pub fn train(
        records: &[MunicipalityRecord],
        config: &ForestConfig,
        seed: u64,
    ) -> Result<Self, ModelError> {
        if records.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let raw: Vec<Vec<f64>> = records.iter().map(|r| r.features.to_vector().to_vec()).collect();
        let labels: Vec<f64> = records.iter().map(|r| r.scam_rate).collect();

        let scaler = StandardScaler::fit(&raw)?;
        let scaled = raw
            .iter()
            .map(|row| scaler.transform(row))
            .collect::<Result<Vec<_>, _>>()?;
        let data = Dataset { features: scaled, labels };

        let mut forest = RandomForest::new(config.clone());
        forest.fit(&data, seed);

        let predictions: Vec<f64> = data.features.iter().map(|row| forest.predict_one(row)).collect();
        let training_r2 = r_squared(&data.labels, &predictions);

        Ok(Self {
            forest,
            scaler,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            training_r2,
        })
    }

    /// Score a feature set with the stored transform.
    pub fn predict(&self, features: &Features) -> Result<f64, ModelError> {
        let scaled = self.scaler.transform(&features.to_vector())?;
        Ok(self.forest.predict_one(&scaled))
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn n_trees(&self) -> usize {
        self.forest.n_trees()
    }

    /// In-sample coefficient of determination.
    pub fn training_r2(&self) -> f64 {
        self.training_r2
    }

    /// (feature name, normalized importance) in feature order.
    pub fn feature_importances(&self) -> Vec<(&str, f64)> {
        self.feature_names
            .iter()
            .map(String::as_str)
            .zip(self.forest.feature_importances().iter().copied())
            .collect()
    }
}

fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len() as f64;
    let mean = actual.iter().sum::<f64>() / n;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p).powi(2)).sum();
    if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else if ss_res == 0.0 {
        1.0
    } else {
        0.0
    }
}
