//! Ridge regression of the next value on the window.

use flowcast_window::Windows;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LinearModelError;
use crate::model::{FitSummary, SequenceModel};

/// Linear autoregressive model `ŷ = b + Σ w_j x_j` with an L2 penalty on `w`.
///
/// Solved in closed form on centred data, so the intercept is not
/// penalised. Fitting ignores the epoch and batch arguments.
///
/// # Example
///
/// ```
/// use flowcast_forecast::{LinearWindowModel, SequenceModel};
/// use flowcast_window::Windows;
///
/// let series: Vec<f64> = (0..20).map(|i| 0.1 * i as f64).collect();
/// let windows = Windows::new(&series, 3).unwrap();
///
/// let mut model = LinearWindowModel::new(1e-6).unwrap();
/// model.fit(&windows, None, 1, 1).unwrap();
/// assert!((model.predict(&[0.4, 0.5, 0.6]) - 0.7).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearWindowModel {
    ridge: f64,
    weights: Vec<f64>,
    intercept: f64,
}

impl LinearWindowModel {
    /// Creates an unfitted model with penalty `ridge`.
    pub fn new(ridge: f64) -> Result<Self, LinearModelError> {
        if !ridge.is_finite() || ridge < 0.0 {
            return Err(LinearModelError::InvalidRidge { ridge });
        }
        Ok(Self {
            ridge,
            weights: Vec::new(),
            intercept: 0.0,
        })
    }

    /// The L2 penalty.
    pub fn ridge(&self) -> f64 {
        self.ridge
    }

    /// Per-lag coefficients, oldest lag first. Empty before fit.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Fitted intercept.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Default for LinearWindowModel {
    fn default() -> Self {
        Self {
            ridge: 1e-4,
            weights: Vec::new(),
            intercept: 0.0,
        }
    }
}

impl SequenceModel for LinearWindowModel {
    type Error = LinearModelError;

    fn fit(
        &mut self,
        train: &Windows,
        _validation: Option<&Windows>,
        _epochs: usize,
        _batch_size: usize,
    ) -> Result<FitSummary, LinearModelError> {
        if train.is_empty() {
            return Err(LinearModelError::EmptyTrainingSet);
        }
        let l = train.window_len();
        let n = train.len() as f64;

        let mut x_mean = vec![0.0; l];
        let mut y_mean = 0.0;
        for (w, y) in train.iter() {
            for (m, v) in x_mean.iter_mut().zip(w) {
                *m += v / n;
            }
            y_mean += y / n;
        }

        // Normal equations (Xc'Xc + ridge I) w = Xc'yc, augmented with the rhs.
        let mut a = vec![vec![0.0; l + 1]; l];
        for (w, y) in train.iter() {
            let yc = y - y_mean;
            for i in 0..l {
                let xi = w[i] - x_mean[i];
                for j in 0..l {
                    a[i][j] += xi * (w[j] - x_mean[j]);
                }
                a[i][l] += xi * yc;
            }
        }
        for (i, row) in a.iter_mut().enumerate() {
            row[i] += self.ridge;
        }

        let weights = solve(a)?;
        let intercept = y_mean - weights.iter().zip(&x_mean).map(|(w, m)| w * m).sum::<f64>();

        self.weights = weights;
        self.intercept = intercept;

        let predicted = self.predict_windows(train);
        let train_loss = flowcast_stats::mse(train.labels(), &predicted);
        debug!(window_len = l, train_loss, "fitted linear window model");

        Ok(FitSummary {
            epochs_run: 1,
            train_loss: Some(train_loss),
            validation_loss: None,
            stopped_early: false,
        })
    }

    fn predict(&self, window: &[f64]) -> f64 {
        self.intercept
            + self
                .weights
                .iter()
                .zip(window)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }

    fn window_len_hint(&self) -> Option<usize> {
        (!self.weights.is_empty()).then_some(self.weights.len())
    }
}

/// Solves an augmented `n x (n + 1)` system by Gaussian elimination with
/// partial pivoting.
fn solve(mut a: Vec<Vec<f64>>) -> Result<Vec<f64>, LinearModelError> {
    let n = a.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&r, &s| a[r][col].abs().total_cmp(&a[s][col].abs()))
            .ok_or(LinearModelError::Singular)?;
        if a[pivot][col].abs() < 1e-12 {
            return Err(LinearModelError::Singular);
        }
        a.swap(col, pivot);
        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..=n {
                a[row][k] -= factor * a[col][k];
            }
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (a[row][n] - tail) / a[row][row];
    }
    Ok(x)
}
