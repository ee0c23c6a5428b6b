//! The tabular regressor seam.

use flowcast_forest::{ForestError, RandomForest};

/// A regressor over row-major feature tables.
pub trait TabularModel {
    /// Error reported by fitting and prediction.
    type Error: std::error::Error;

    /// Fits on `features` (row-major, `n_features` columns) and `targets`.
    fn fit(&mut self, features: &[f64], n_features: usize, targets: &[f64])
    -> Result<(), Self::Error>;

    /// Predicts one row.
    fn predict(&self, row: &[f64]) -> Result<f64, Self::Error>;

    /// Feature count seen during fit.
    fn n_features(&self) -> Option<usize>;
}

impl TabularModel for RandomForest {
    type Error = ForestError;

    fn fit(
        &mut self,
        features: &[f64],
        n_features: usize,
        targets: &[f64],
    ) -> Result<(), ForestError> {
        RandomForest::fit(self, features, n_features, targets)
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ForestError> {
        RandomForest::predict(self, row)
    }

    fn n_features(&self) -> Option<usize> {
        RandomForest::n_features(self)
    }
}
