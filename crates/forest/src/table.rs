//! Validated borrowed view of a feature table.

use crate::error::ForestError;

/// Row-major features with one target per row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Table<'a> {
    features: &'a [f64],
    n_features: usize,
    targets: &'a [f64],
}

impl<'a> Table<'a> {
    /// Validates shapes and finiteness.
    pub(crate) fn new(
        features: &'a [f64],
        n_features: usize,
        targets: &'a [f64],
    ) -> Result<Self, ForestError> {
        if n_features == 0 {
            return Err(ForestError::ZeroFeatures);
        }
        if features.len() % n_features != 0 {
            return Err(ForestError::ShapeMismatch {
                len: features.len(),
                n_features,
            });
        }
        let rows = features.len() / n_features;
        if rows == 0 {
            return Err(ForestError::EmptyData);
        }
        if rows != targets.len() {
            return Err(ForestError::TargetCountMismatch {
                rows,
                targets: targets.len(),
            });
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(ForestError::NonFiniteInput { input: "features" });
        }
        if targets.iter().any(|v| !v.is_finite()) {
            return Err(ForestError::NonFiniteInput { input: "targets" });
        }
        Ok(Self {
            features,
            n_features,
            targets,
        })
    }

    pub(crate) fn n_rows(&self) -> usize {
        self.targets.len()
    }

    pub(crate) fn n_features(&self) -> usize {
        self.n_features
    }

    pub(crate) fn value(&self, row: usize, feature: usize) -> f64 {
        self.features[row * self.n_features + feature]
    }

    pub(crate) fn target(&self, row: usize) -> f64 {
        self.targets[row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_shapes() {
        assert_eq!(
            Table::new(&[1.0], 0, &[1.0]).unwrap_err(),
            ForestError::ZeroFeatures
        );
        assert_eq!(
            Table::new(&[1.0, 2.0, 3.0], 2, &[1.0]).unwrap_err(),
            ForestError::ShapeMismatch {
                len: 3,
                n_features: 2
            }
        );
        assert_eq!(
            Table::new(&[], 2, &[]).unwrap_err(),
            ForestError::EmptyData
        );
        assert_eq!(
            Table::new(&[1.0, 2.0], 1, &[1.0]).unwrap_err(),
            ForestError::TargetCountMismatch {
                rows: 2,
                targets: 1
            }
        );
        assert_eq!(
            Table::new(&[f64::NAN], 1, &[1.0]).unwrap_err(),
            ForestError::NonFiniteInput { input: "features" }
        );
    }

    #[test]
    fn indexes_row_major() {
        let t = Table::new(&[1.0, 2.0, 3.0, 4.0], 2, &[10.0, 20.0]).unwrap();
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.value(1, 0), 3.0);
        assert_eq!(t.value(0, 1), 2.0);
        assert_eq!(t.target(1), 20.0);
    }
}
