//! Zero-mean, unit-variance standardisation.

use serde::{Deserialize, Serialize};

use crate::error::ScaleError;
use crate::{Scaler, columns, map_columns};

/// Per-column moments learned by [`StandardScaler::fit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Moments {
    mean: Vec<f64>,
    /// Population standard deviation, with zero replaced by 1.0.
    std: Vec<f64>,
}

/// Standardises each column to `(x - mean) / std`.
///
/// Uses the population standard deviation. A constant column has its
/// standard deviation replaced by 1.0 so it maps to zero and inverts exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    moments: Option<Moments>,
}

impl StandardScaler {
    /// Creates an unfitted scaler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fitted per-column means.
    pub fn mean(&self) -> Option<&[f64]> {
        self.moments.as_ref().map(|m| m.mean.as_slice())
    }

    /// Returns the fitted per-column standard deviations.
    pub fn std(&self) -> Option<&[f64]> {
        self.moments.as_ref().map(|m| m.std.as_slice())
    }

    fn fitted(&self) -> Result<&Moments, ScaleError> {
        self.moments.as_ref().ok_or(ScaleError::NotFitted)
    }
}

impl Scaler for StandardScaler {
    fn fit(&mut self, data: &[f64], n_features: usize) -> Result<(), ScaleError> {
        let cols = columns(data, n_features)?;
        let mean = cols.iter().map(|c| flowcast_stats::mean(c)).collect();
        let std = cols
            .iter()
            .map(|c| {
                let s = flowcast_stats::population_sd(c);
                if s > 1e-12 { s } else { 1.0 }
            })
            .collect();
        self.moments = Some(Moments { mean, std });
        Ok(())
    }

    fn transform(&self, data: &[f64]) -> Result<Vec<f64>, ScaleError> {
        let m = self.fitted()?;
        map_columns(data, m.mean.len(), |c, v| (v - m.mean[c]) / m.std[c])
    }

    fn inverse_transform(&self, data: &[f64]) -> Result<Vec<f64>, ScaleError> {
        let m = self.fitted()?;
        map_columns(data, m.mean.len(), |c, v| v * m.std[c] + m.mean[c])
    }

    fn is_fitted(&self) -> bool {
        self.moments.is_some()
    }

    fn n_features(&self) -> Option<usize> {
        self.moments.as_ref().map(|m| m.mean.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn standardises_columns() {
        let mut s = StandardScaler::new();
        // column 0: [1, 3] mean 2 std 1; column 1: [10, 10] constant
        let out = s.fit_transform(&[1.0, 10.0, 3.0, 10.0], 2).unwrap();
        assert_relative_eq!(out[0], -1.0);
        assert_relative_eq!(out[1], 0.0);
        assert_relative_eq!(out[2], 1.0);
        assert_relative_eq!(out[3], 0.0);
        assert_eq!(s.mean(), Some(&[2.0, 10.0][..]));
        assert_eq!(s.std(), Some(&[1.0, 1.0][..]));
    }

    #[test]
    fn transformed_training_data_has_unit_moments() {
        let data: Vec<f64> = (0..50).map(|i| (i as f64) * 1.7 - 3.0).collect();
        let mut s = StandardScaler::new();
        let out = s.fit_transform(&data, 1).unwrap();
        assert_relative_eq!(flowcast_stats::mean(&out), 0.0, epsilon = 1e-12);
        assert_relative_eq!(flowcast_stats::population_sd(&out), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn transform_before_fit() {
        let s = StandardScaler::new();
        assert_eq!(s.transform(&[0.0]), Err(ScaleError::NotFitted));
        assert_eq!(s.inverse_transform(&[0.0]), Err(ScaleError::NotFitted));
    }

    #[test]
    fn fit_rejects_empty_and_nan() {
        let mut s = StandardScaler::new();
        assert_eq!(s.fit(&[], 1), Err(ScaleError::EmptyData));
        assert_eq!(s.fit(&[1.0, f64::INFINITY], 1), Err(ScaleError::NonFiniteData));
        assert!(!s.is_fitted());
    }
}
