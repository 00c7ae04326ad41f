//! Bagged ensemble of regression trees.

use super::{
    tree::{RegressionTree, TreeConfig},
    Dataset,
};
use crate::rng::{RngBank, SeededStream, StageSlot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: Option<usize>,
    /// Resample rows with replacement for every tree.
    pub bootstrap: bool,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
        }
    }
}

impl ForestConfig {
    fn tree_config(&self) -> TreeConfig {
        TreeConfig {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf: self.min_samples_leaf,
            max_features: self.max_features,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<RegressionTree>,
    feature_importances: Vec<f64>,
}

impl RandomForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            feature_importances: Vec::new(),
        }
    }

    /// Train every tree sequentially. Each tree owns a stream seeded
    /// from one draw of the forest stream, so results depend only on
    /// `seed` and the data.
    pub fn fit(&mut self, data: &Dataset, seed: u64) {
        let n = data.n_samples();
        let mut forest_rng = RngBank::new(seed).for_stage(StageSlot::Forest);

        self.trees = (0..self.config.n_trees)
            .map(|i| {
                let mut rng = SeededStream::new(forest_rng.next_u64(), i as u64).with_name("tree");
                let rows: Vec<usize> = if self.config.bootstrap && n > 0 {
                    (0..n).map(|_| rng.next_u64_below(n as u64) as usize).collect()
                } else {
                    (0..n).collect()
                };
                let mut tree = RegressionTree::new(self.config.tree_config());
                tree.fit(data, &rows, &mut rng);
                tree
            })
            .collect();

        let mut importances = vec![0.0; data.n_features()];
        for tree in &self.trees {
            for (total, imp) in importances.iter_mut().zip(tree.importances()) {
                *total += imp;
            }
        }
        let sum: f64 = importances.iter().sum();
        if sum > 0.0 {
            importances.iter_mut().for_each(|imp| *imp /= sum);
        }
        self.feature_importances = importances;
    }

    /// Mean of all tree predictions.
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        self.trees.iter().map(|t| t.predict_one(features)).sum::<f64>() / self.trees.len() as f64
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Normalized impurity decrease per feature; sums to 1 unless no
    /// tree ever split.
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}
