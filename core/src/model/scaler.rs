//! Zero-mean, unit-variance feature standardization.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means:  Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Fit per-column mean and population standard deviation.
    /// A constant column gets scale 1.0 so it maps to zero.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, ModelError> {
        let first = rows.first().ok_or(ModelError::EmptyTrainingSet)?;
        let n_features = first.len();
        let n = rows.len() as f64;

        let mut means = vec![0.0; n_features];
        for row in rows {
            check_width(row, n_features)?;
            for (m, v) in means.iter_mut().zip(row) {
                *m += v;
            }
        }
        means.iter_mut().for_each(|m| *m /= n);

        let mut scales = vec![0.0; n_features];
        for row in rows {
            for ((s, v), m) in scales.iter_mut().zip(row).zip(&means) {
                *s += (v - m).powi(2);
            }
        }
        for s in &mut scales {
            let std = (*s / n).sqrt();
            *s = if std > 0.0 { std } else { 1.0 };
        }

        Ok(Self { means, scales })
    }

    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_width(row, self.means.len())?;
        Ok(row
            .iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }
}

fn check_width(row: &[f64], expected: usize) -> Result<(), ModelError> {
    if row.len() != expected {
        return Err(ModelError::ShapeMismatch { expected, actual: row.len() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardized_columns_have_zero_mean_unit_variance() {
        let rows = vec![vec![1.0, 10.0], vec![2.0, 10.0], vec![3.0, 10.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();
        let out: Vec<Vec<f64>> = rows.iter().map(|r| scaler.transform(r).unwrap()).collect();

        let mean0: f64 = out.iter().map(|r| r[0]).sum::<f64>() / 3.0;
        let var0: f64 = out.iter().map(|r| r[0].powi(2)).sum::<f64>() / 3.0;
        assert!(mean0.abs() < 1e-12);
        assert!((var0 - 1.0).abs() < 1e-12);
        // constant column
        assert!(out.iter().all(|r| r[1] == 0.0));
    }

    #[test]
    fn wrong_width_is_rejected() {
        let scaler = StandardScaler::fit(&[vec![1.0, 2.0]]).unwrap();
        assert_eq!(
            scaler.transform(&[1.0]),
            Err(ModelError::ShapeMismatch { expected: 2, actual: 1 })
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(StandardScaler::fit(&[]), Err(ModelError::EmptyTrainingSet));
    }
}
