//! Error types for the flowcast-regress crate.

use std::path::PathBuf;

use flowcast_artifact::ArtifactError;
use flowcast_scale::ScaleError;

/// Error type for all fallible operations in the flowcast-regress crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegressError {
    /// Wraps a scaler failure, including use of an unfitted scaler.
    #[error(transparent)]
    Scale(#[from] ScaleError),

    /// Returned when predicting, evaluating or saving before training or loading.
    #[error("model has not been trained or loaded")]
    ModelNotTrained,

    /// Returned when an artifact file does not exist.
    #[error("artifact not found: {}", path.display())]
    ArtifactNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Returned when caller-supplied data or parameters are unusable.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the stored model and scaler disagree on the feature count.
    #[error("incompatible artifact: scaler has {expected} features, model has {found}")]
    IncompatibleArtifact {
        /// Feature count of the stored scaler.
        expected: usize,
        /// Feature count of the stored model.
        found: usize,
    },

    /// Wraps a filesystem failure while reading or writing an artifact.
    #[error("I/O error on {}: {message}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Description of the underlying failure.
        message: String,
    },

    /// Wraps a JSON encoding or decoding failure.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the underlying failure.
        message: String,
    },

    /// Wraps a failure reported by the tabular model while fitting.
    #[error("training failed: {message}")]
    Training {
        /// Description of the underlying failure.
        message: String,
    },

    /// Wraps a failure reported by the tabular model while predicting.
    #[error("prediction failed: {message}")]
    Prediction {
        /// Description of the underlying failure.
        message: String,
    },
}

impl From<ArtifactError> for RegressError {
    fn from(e: ArtifactError) -> Self {
        match e {
            ArtifactError::NotFound { path } => Self::ArtifactNotFound { path },
            ArtifactError::Io { path, message } => Self::Io { path, message },
            ArtifactError::Serialization { path, message } => Self::Serialization {
                message: format!("{}: {message}", path.display()),
            },
        }
    }
}

impl RegressError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_model_not_trained() {
        assert_eq!(
            RegressError::ModelNotTrained.to_string(),
            "model has not been trained or loaded"
        );
    }

    #[test]
    fn error_incompatible_artifact() {
        let e = RegressError::IncompatibleArtifact {
            expected: 5,
            found: 4,
        };
        assert_eq!(
            e.to_string(),
            "incompatible artifact: scaler has 5 features, model has 4"
        );
    }

    #[test]
    fn error_training_and_prediction() {
        let e = RegressError::Training {
            message: "no rows".into(),
        };
        assert_eq!(e.to_string(), "training failed: no rows");
        let e = RegressError::Prediction {
            message: "not fitted".into(),
        };
        assert_eq!(e.to_string(), "prediction failed: not fitted");
    }

    #[test]
    fn error_io() {
        let e = RegressError::Io {
            path: PathBuf::from("out/model.json"),
            message: "permission denied".to_string(),
        };
        assert_eq!(e.to_string(), "I/O error on out/model.json: permission denied");
    }
}
