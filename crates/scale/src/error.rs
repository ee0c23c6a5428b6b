//! Error types for the flowcast-scale crate.

/// Error type for all fallible operations in the flowcast-scale crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScaleError {
    /// Returned by `transform` / `inverse_transform` before any `fit`.
    #[error("scaler has not been fitted")]
    NotFitted,

    /// Returned when fitting on empty data.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when a feature count of zero is requested.
    #[error("number of features must be at least 1")]
    ZeroFeatures,

    /// Returned when the flat data length is not a multiple of the feature count.
    #[error("data length {len} is not a multiple of n_features={n_features}")]
    ShapeMismatch {
        /// Length of the flat data slice.
        len: usize,
        /// Number of features (columns).
        n_features: usize,
    },

    /// Returned when fitting on data containing NaN or infinite values.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when a min-max feature range is empty or inverted.
    #[error("invalid feature range [{lo}, {hi}]: lo must be strictly below hi")]
    InvalidRange {
        /// Lower bound of the requested range.
        lo: f64,
        /// Upper bound of the requested range.
        hi: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_not_fitted() {
        assert_eq!(ScaleError::NotFitted.to_string(), "scaler has not been fitted");
    }

    #[test]
    fn error_shape_mismatch() {
        let e = ScaleError::ShapeMismatch {
            len: 7,
            n_features: 3,
        };
        assert_eq!(
            e.to_string(),
            "data length 7 is not a multiple of n_features=3"
        );
    }

    #[test]
    fn error_invalid_range() {
        let e = ScaleError::InvalidRange { lo: 1.0, hi: 0.0 };
        assert_eq!(
            e.to_string(),
            "invalid feature range [1, 0]: lo must be strictly below hi"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ScaleError>();
    }
}
