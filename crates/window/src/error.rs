//! Error types for the flowcast-window crate.

/// Error type for all fallible operations in the flowcast-window crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WindowError {
    /// Returned when a window length of zero is requested.
    #[error("window length must be at least 1")]
    ZeroLength,

    /// Returned when a split fraction is outside `[0, 1]`.
    #[error("split fraction must be in [0, 1], got {fraction}")]
    InvalidFraction {
        /// The rejected fraction.
        fraction: f64,
    },
}
