//! Regression tree grown by variance reduction.

use super::Dataset;
use crate::rng::SeededStream;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// None grows until leaves are pure or too small to split.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Features considered per split (None = all).
    pub max_features: Option<usize>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Leaf {
        value: f64,
        n_samples: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        n_samples: usize,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    left: Vec<usize>,
    right: Vec<usize>,
    gain: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    config: TreeConfig,
    root: Option<TreeNode>,
    /// Unnormalized impurity decrease per feature.
    importances: Vec<f64>,
}

impl RegressionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            root: None,
            importances: Vec::new(),
        }
    }

    /// Fit on the given row indices of `data` (repeats allowed).
    pub fn fit(&mut self, data: &Dataset, rows: &[usize], rng: &mut SeededStream) {
        self.importances = vec![0.0; data.n_features()];
        if rows.is_empty() {
            self.root = None;
            return;
        }
        self.root = Some(self.grow(data, rows, 0, rng));
    }

    fn grow(
        &mut self,
        data: &Dataset,
        rows: &[usize],
        depth: usize,
        rng: &mut SeededStream,
    ) -> TreeNode {
        let labels: Vec<f64> = rows.iter().map(|&i| data.labels[i]).collect();
        let impurity = mse(&labels);
        let leaf = TreeNode::Leaf {
            value: mean(&labels),
            n_samples: rows.len(),
        };

        let depth_exhausted = self.config.max_depth.is_some_and(|d| depth >= d);
        if depth_exhausted || rows.len() < self.config.min_samples_split || impurity < 1e-12 {
            return leaf;
        }

        let Some(split) = self.best_split(data, rows, impurity, rng) else {
            return leaf;
        };

        self.importances[split.feature] += split.gain * rows.len() as f64;
        let left = self.grow(data, &split.left, depth + 1, rng);
        let right = self.grow(data, &split.right, depth + 1, rng);

        TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            n_samples: rows.len(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn best_split(
        &self,
        data: &Dataset,
        rows: &[usize],
        parent_impurity: f64,
        rng: &mut SeededStream,
    ) -> Option<BestSplit> {
        let n_features = data.n_features();
        let mut candidates: Vec<usize> = (0..n_features).collect();
        if let Some(k) = self.config.max_features.filter(|&k| k < n_features) {
            // Partial Fisher-Yates: the first k slots become the sample.
            for i in 0..k {
                let j = i + rng.next_u64_below((n_features - i) as u64) as usize;
                candidates.swap(i, j);
            }
            candidates.truncate(k);
        }

        let min_leaf = self.config.min_samples_leaf.max(1);
        let mut best: Option<BestSplit> = None;

        for &feature in &candidates {
            let mut values: Vec<f64> = rows.iter().map(|&i| data.features[i][feature]).collect();
            values.sort_by(f64::total_cmp);
            values.dedup();

            for pair in values.windows(2) {
                let threshold = (pair[0] + pair[1]) / 2.0;
                let (left, right): (Vec<usize>, Vec<usize>) = rows
                    .iter()
                    .partition(|&&i| data.features[i][feature] <= threshold);

                if left.len() < min_leaf || right.len() < min_leaf {
                    continue;
                }

                let left_labels: Vec<f64> = left.iter().map(|&i| data.labels[i]).collect();
                let right_labels: Vec<f64> = right.iter().map(|&i| data.labels[i]).collect();
                let n = rows.len() as f64;
                let weighted = (left.len() as f64 * mse(&left_labels)
                    + right.len() as f64 * mse(&right_labels))
                    / n;
                let gain = parent_impurity - weighted;

                if gain > best.as_ref().map_or(0.0, |b| b.gain) {
                    best = Some(BestSplit { feature, threshold, left, right, gain });
                }
            }
        }
        best
    }

    pub fn predict_one(&self, features: &[f64]) -> f64 {
        let mut node = match &self.root {
            Some(root) => root,
            None => return 0.0,
        };
        loop {
            match node {
                TreeNode::Leaf { value, .. } => return *value,
                TreeNode::Split { feature, threshold, left, right, .. } => {
                    node = if features[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    pub fn importances(&self) -> &[f64] {
        &self.importances
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn mse(values: &[f64]) -> f64 {
    let m = mean(values);
    mean(&values.iter().map(|v| (v - m).powi(2)).collect::<Vec<_>>())
}
