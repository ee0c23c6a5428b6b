//! Fitted normalisation transforms.
//!
//! A [`Scaler`] is created unfitted, learns per-column bounds from training
//! data with [`Scaler::fit`], and then maps values into a normalised space
//! with [`Scaler::transform`] and back with [`Scaler::inverse_transform`].
//! The two directions are exact inverses for the same fitted state.
//!
//! Data is passed as a row-major flat slice with `n_features` columns. A
//! univariate series is the `n_features = 1` case.
//!
//! | Scaler | Forward map | Typical use |
//! |--------|-------------|-------------|
//! | [`MinMaxScaler`] | `(x - min) * scale + lo` | Sequence inputs, bounded range |
//! | [`StandardScaler`] | `(x - mean) / std` | Tabular features |
//!
//! # Quick start
//!
//! ```
//! use flowcast_scale::{MinMaxScaler, Scaler};
//!
//! let mut scaler = MinMaxScaler::new();
//! let scaled = scaler.fit_transform(&[10.0, 20.0, 30.0], 1).unwrap();
//! assert_eq!(scaled, vec![0.0, 0.5, 1.0]);
//!
//! let restored = scaler.inverse_transform(&scaled).unwrap();
//! assert_eq!(restored, vec![10.0, 20.0, 30.0]);
//! ```

mod error;
mod minmax;
mod standard;

pub use error::ScaleError;
pub use minmax::MinMaxScaler;
pub use standard::StandardScaler;

/// A fitted, invertible per-column transform.
pub trait Scaler {
    /// Learns the scaling bounds from `data` (row-major, `n_features` columns).
    ///
    /// Refitting replaces any previously fitted state.
    fn fit(&mut self, data: &[f64], n_features: usize) -> Result<(), ScaleError>;

    /// Maps `data` into the normalised space using the fitted bounds.
    fn transform(&self, data: &[f64]) -> Result<Vec<f64>, ScaleError>;

    /// Maps normalised `data` back into original units.
    fn inverse_transform(&self, data: &[f64]) -> Result<Vec<f64>, ScaleError>;

    /// Returns `true` once [`Scaler::fit`] has succeeded.
    fn is_fitted(&self) -> bool;

    /// Number of columns seen during fit, or `None` if unfitted.
    fn n_features(&self) -> Option<usize>;

    /// Fits on `data` and returns its transformed copy.
    fn fit_transform(&mut self, data: &[f64], n_features: usize) -> Result<Vec<f64>, ScaleError> {
        self.fit(data, n_features)?;
        self.transform(data)
    }
}

/// Validates the shape of a flat matrix and returns its row count.
pub(crate) fn check_shape(data: &[f64], n_features: usize) -> Result<usize, ScaleError> {
    if n_features == 0 {
        return Err(ScaleError::ZeroFeatures);
    }
    if data.len() % n_features != 0 {
        return Err(ScaleError::ShapeMismatch {
            len: data.len(),
            n_features,
        });
    }
    Ok(data.len() / n_features)
}

/// Validates fit input and splits it into per-column vectors.
pub(crate) fn columns(data: &[f64], n_features: usize) -> Result<Vec<Vec<f64>>, ScaleError> {
    let n_rows = check_shape(data, n_features)?;
    if n_rows == 0 {
        return Err(ScaleError::EmptyData);
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(ScaleError::NonFiniteData);
    }
    let mut cols = vec![Vec::with_capacity(n_rows); n_features];
    for row in data.chunks_exact(n_features) {
        for (col, &v) in cols.iter_mut().zip(row) {
            col.push(v);
        }
    }
    Ok(cols)
}

/// Applies `f(column, value)` element-wise over a row-major flat matrix.
pub(crate) fn map_columns(
    data: &[f64],
    n_features: usize,
    f: impl Fn(usize, f64) -> f64,
) -> Result<Vec<f64>, ScaleError> {
    check_shape(data, n_features)?;
    Ok(data
        .iter()
        .enumerate()
        .map(|(i, &v)| f(i % n_features, v))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_shape_rejects_zero_features() {
        assert_eq!(check_shape(&[1.0], 0), Err(ScaleError::ZeroFeatures));
    }

    #[test]
    fn check_shape_rejects_ragged() {
        assert_eq!(
            check_shape(&[1.0, 2.0, 3.0], 2),
            Err(ScaleError::ShapeMismatch {
                len: 3,
                n_features: 2
            })
        );
    }

    #[test]
    fn columns_splits_row_major() {
        let cols = columns(&[1.0, 10.0, 2.0, 20.0, 3.0, 30.0], 2).unwrap();
        assert_eq!(cols, vec![vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]]);
    }

    #[test]
    fn columns_rejects_nan() {
        assert_eq!(
            columns(&[1.0, f64::NAN], 1),
            Err(ScaleError::NonFiniteData)
        );
    }

    #[test]
    fn map_columns_passes_column_index() {
        let out = map_columns(&[1.0, 1.0, 1.0, 1.0], 2, |c, v| v + c as f64).unwrap();
        assert_eq!(out, vec![1.0, 2.0, 1.0, 2.0]);
    }
}
