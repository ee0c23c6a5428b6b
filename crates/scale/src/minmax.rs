//! Min-max scaling to a bounded feature range.

use serde::{Deserialize, Serialize};

use crate::error::ScaleError;
use crate::{Scaler, columns, map_columns};

/// Per-column bounds learned by [`MinMaxScaler::fit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MinMaxBounds {
    data_min: Vec<f64>,
    data_max: Vec<f64>,
    /// `(hi - lo) / (max - min)`, or 1.0 for a constant column.
    scale: Vec<f64>,
}

/// Maps each column linearly onto a feature range (default `[0, 1]`).
///
/// The column minimum maps to `lo` and the maximum to `hi`. Values outside
/// the fitted bounds map outside the range; nothing is clipped. A constant
/// column uses a unit scale so it maps to `lo` and inverts exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    range: (f64, f64),
    bounds: Option<MinMaxBounds>,
}

impl MinMaxScaler {
    /// Creates an unfitted scaler with feature range `[0, 1]`.
    pub fn new() -> Self {
        Self {
            range: (0.0, 1.0),
            bounds: None,
        }
    }

    /// Creates an unfitted scaler with feature range `[lo, hi]`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::InvalidRange`] unless `lo < hi` and both are finite.
    pub fn with_range(lo: f64, hi: f64) -> Result<Self, ScaleError> {
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(ScaleError::InvalidRange { lo, hi });
        }
        Ok(Self {
            range: (lo, hi),
            bounds: None,
        })
    }

    /// Returns the target feature range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the fitted per-column minima.
    pub fn data_min(&self) -> Option<&[f64]> {
        self.bounds.as_ref().map(|b| b.data_min.as_slice())
    }

    /// Returns the fitted per-column maxima.
    pub fn data_max(&self) -> Option<&[f64]> {
        self.bounds.as_ref().map(|b| b.data_max.as_slice())
    }

    fn fitted(&self) -> Result<&MinMaxBounds, ScaleError> {
        self.bounds.as_ref().ok_or(ScaleError::NotFitted)
    }
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scaler for MinMaxScaler {
    fn fit(&mut self, data: &[f64], n_features: usize) -> Result<(), ScaleError> {
        let cols = columns(data, n_features)?;
        let (lo, hi) = self.range;

        let mut data_min = Vec::with_capacity(n_features);
        let mut data_max = Vec::with_capacity(n_features);
        let mut scale = Vec::with_capacity(n_features);
        for col in &cols {
            let min = col.iter().copied().fold(f64::INFINITY, f64::min);
            let max = col.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let span = max - min;
            data_min.push(min);
            data_max.push(max);
            scale.push(if span > 0.0 { (hi - lo) / span } else { 1.0 });
        }

        self.bounds = Some(MinMaxBounds {
            data_min,
            data_max,
            scale,
        });
        Ok(())
    }

    fn transform(&self, data: &[f64]) -> Result<Vec<f64>, ScaleError> {
        let b = self.fitted()?;
        let lo = self.range.0;
        map_columns(data, b.scale.len(), |c, v| (v - b.data_min[c]) * b.scale[c] + lo)
    }

    fn inverse_transform(&self, data: &[f64]) -> Result<Vec<f64>, ScaleError> {
        let b = self.fitted()?;
        let lo = self.range.0;
        map_columns(data, b.scale.len(), |c, v| (v - lo) / b.scale[c] + b.data_min[c])
    }

    fn is_fitted(&self) -> bool {
        self.bounds.is_some()
    }

    fn n_features(&self) -> Option<usize> {
        self.bounds.as_ref().map(|b| b.scale.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fit_maps_extremes_to_range() {
        let mut s = MinMaxScaler::new();
        let out = s.fit_transform(&[5.0, 15.0, 10.0], 1).unwrap();
        assert_relative_eq!(out[0], 0.0);
        assert_relative_eq!(out[1], 1.0);
        assert_relative_eq!(out[2], 0.5);
        assert_eq!(s.data_min(), Some(&[5.0][..]));
        assert_eq!(s.data_max(), Some(&[15.0][..]));
    }

    #[test]
    fn custom_range() {
        let mut s = MinMaxScaler::with_range(-1.0, 1.0).unwrap();
        let out = s.fit_transform(&[0.0, 50.0, 100.0], 1).unwrap();
        assert_relative_eq!(out[0], -1.0);
        assert_relative_eq!(out[1], 0.0);
        assert_relative_eq!(out[2], 1.0);
    }

    #[test]
    fn invalid_range_rejected() {
        assert_eq!(
            MinMaxScaler::with_range(1.0, 1.0),
            Err(ScaleError::InvalidRange { lo: 1.0, hi: 1.0 })
        );
        assert!(MinMaxScaler::with_range(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn constant_column_round_trips() {
        let mut s = MinMaxScaler::new();
        let out = s.fit_transform(&[7.0, 7.0, 7.0], 1).unwrap();
        assert_eq!(out, vec![0.0, 0.0, 0.0]);
        assert_eq!(s.inverse_transform(&out).unwrap(), vec![7.0, 7.0, 7.0]);
    }

    #[test]
    fn per_column_bounds() {
        let mut s = MinMaxScaler::new();
        let out = s.fit_transform(&[0.0, 100.0, 10.0, 300.0], 2).unwrap();
        assert_eq!(out, vec![0.0, 0.0, 1.0, 1.0]);
        assert_eq!(s.n_features(), Some(2));
    }

    #[test]
    fn values_outside_fit_are_not_clipped() {
        let mut s = MinMaxScaler::new();
        s.fit(&[0.0, 10.0], 1).unwrap();
        let out = s.transform(&[20.0, -10.0]).unwrap();
        assert_relative_eq!(out[0], 2.0);
        assert_relative_eq!(out[1], -1.0);
    }

    #[test]
    fn transform_before_fit() {
        let s = MinMaxScaler::new();
        assert_eq!(s.transform(&[1.0]), Err(ScaleError::NotFitted));
        assert_eq!(s.inverse_transform(&[1.0]), Err(ScaleError::NotFitted));
        assert!(!s.is_fitted());
        assert_eq!(s.n_features(), None);
    }

    #[test]
    fn transform_shape_mismatch() {
        let mut s = MinMaxScaler::new();
        s.fit(&[0.0, 1.0, 2.0, 3.0], 2).unwrap();
        assert_eq!(
            s.transform(&[1.0, 2.0, 3.0]),
            Err(ScaleError::ShapeMismatch {
                len: 3,
                n_features: 2
            })
        );
    }

    #[test]
    fn refit_replaces_bounds() {
        let mut s = MinMaxScaler::new();
        s.fit(&[0.0, 10.0], 1).unwrap();
        s.fit(&[0.0, 100.0], 1).unwrap();
        assert_relative_eq!(s.transform(&[50.0]).unwrap()[0], 0.5);
    }
}
