//! Error types for the flowcast-lstm crate.

/// Error type for all fallible operations in the flowcast-lstm crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LstmError {
    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when `fit` receives no training windows.
    #[error("training set contains no windows")]
    EmptyTrainingSet,

    /// Returned when `fit` is asked for zero epochs or a zero batch size.
    #[error("invalid training schedule: epochs={epochs}, batch_size={batch_size}")]
    InvalidSchedule {
        /// Requested number of epochs.
        epochs: usize,
        /// Requested batch size.
        batch_size: usize,
    },

    /// Returned when validation windows differ in length from training windows.
    #[error("window length mismatch: training uses {expected}, validation uses {got}")]
    WindowLengthMismatch {
        /// Training window length.
        expected: usize,
        /// Validation window length.
        got: usize,
    },

    /// Returned when the training loss becomes NaN or infinite.
    #[error("training diverged at epoch {epoch} (loss is not finite)")]
    Diverged {
        /// Zero-based epoch at which the loss stopped being finite.
        epoch: usize,
    },
}
