//! Lifecycle of a persisted predictor.

/// Where a predictor stands with respect to training and its artifacts.
///
/// ```text
/// Untrained ──train──▶ Trained ──save──▶ Saved
///                         ▲                 │
///                         └──────train──────┘
/// artifacts ──load──▶ Loaded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Neither trained nor loaded.
    Untrained,
    /// Trained in this process and not yet saved.
    Trained,
    /// Trained and written to its artifact paths.
    Saved,
    /// Restored from artifacts.
    Loaded,
}

impl Lifecycle {
    /// Whether inference, evaluation and saving are permitted.
    pub fn is_ready(self) -> bool {
        self != Self::Untrained
    }
}
