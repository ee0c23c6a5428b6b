//! Error types for the flowcast-forest crate.

/// Error type for all fallible operations in the flowcast-forest crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForestError {
    /// Returned when the training table has no rows.
    #[error("training data is empty")]
    EmptyData,

    /// Returned when a feature count of zero is given.
    #[error("number of features must be at least 1")]
    ZeroFeatures,

    /// Returned when the flat feature length is not a multiple of the feature count.
    #[error("feature data length {len} is not a multiple of n_features={n_features}")]
    ShapeMismatch {
        /// Length of the flat feature slice.
        len: usize,
        /// Number of features per row.
        n_features: usize,
    },

    /// Returned when the number of targets differs from the number of rows.
    #[error("target count mismatch: {rows} rows but {targets} targets")]
    TargetCountMismatch {
        /// Number of feature rows.
        rows: usize,
        /// Number of targets.
        targets: usize,
    },

    /// Returned when features or targets contain NaN or infinite values.
    #[error("{input} contains non-finite values")]
    NonFiniteInput {
        /// Which input was rejected.
        input: &'static str,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when predicting with an unfitted model.
    #[error("model has not been fitted")]
    NotFitted,

    /// Returned when a prediction row has the wrong number of features.
    #[error("feature count mismatch: model expects {expected}, got {got}")]
    FeatureCountMismatch {
        /// Feature count seen during fit.
        expected: usize,
        /// Feature count of the rejected row.
        got: usize,
    },
}
