//! Error types for the flowcast-forecast crate.

use std::path::PathBuf;

use flowcast_artifact::ArtifactError;
use flowcast_scale::ScaleError;
use flowcast_window::WindowError;

/// Error type for all fallible operations in the flowcast-forecast crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForecastError {
    /// Wraps a scaler failure, including use of an unfitted scaler.
    #[error(transparent)]
    Scale(#[from] ScaleError),

    /// Wraps a windowing failure.
    #[error(transparent)]
    Window(#[from] WindowError),

    /// Returned when forecasting, evaluating or saving before training or loading.
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

    /// Returned when a loaded artifact was trained with a different window length.
    #[error("incompatible artifact: expected window length {expected}, found {found}")]
    IncompatibleArtifact {
        /// Configured window length.
        expected: usize,
        /// Window length recorded in the artifact.
        found: usize,
    },

    /// Returned when the model yields NaN or infinity during a forecast.
    #[error("model produced a non-finite value at forecast step {step}")]
    NonFinitePrediction {
        /// Zero-based step within the horizon.
        step: usize,
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

    /// Wraps a failure reported by the sequence model while fitting.
    #[error("training failed: {message}")]
    Training {
        /// Description of the underlying failure.
        message: String,
    },
}

/// Error type for [`LinearWindowModel`](crate::LinearWindowModel).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinearModelError {
    /// Returned when fitting on zero windows.
    #[error("training set has no windows")]
    EmptyTrainingSet,

    /// Returned when the ridge penalty is negative or not finite.
    #[error("ridge penalty must be finite and non-negative, got {ridge}")]
    InvalidRidge {
        /// The rejected penalty.
        ridge: f64,
    },

    /// Returned when the normal equations have no unique solution.
    #[error("normal equations are singular; increase the ridge penalty")]
    Singular,
}

impl From<ArtifactError> for ForecastError {
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

impl ForecastError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
