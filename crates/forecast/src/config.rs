//! Forecaster and training configuration.

use flowcast_artifact::ArtifactPaths;

use crate::error::ForecastError;

/// Configuration for a [`Forecaster`](crate::Forecaster).
///
/// # Example
///
/// ```
/// use flowcast_forecast::{ArtifactPaths, ForecasterConfig};
///
/// let config = ForecasterConfig::new(ArtifactPaths::in_dir("models", "congestion"))
///     .with_sequence_length(48)
///     .with_domain(0.0, 150.0);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.sequence_length(), 48);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ForecasterConfig {
    sequence_length: usize,
    domain: (f64, f64),
    artifacts: ArtifactPaths,
}

impl ForecasterConfig {
    /// Window length 24 and domain `[0, 100]`.
    pub fn new(artifacts: ArtifactPaths) -> Self {
        Self {
            sequence_length: 24,
            domain: (0.0, 100.0),
            artifacts,
        }
    }

    /// Sets the window length `L`.
    pub fn with_sequence_length(mut self, sequence_length: usize) -> Self {
        self.sequence_length = sequence_length;
        self
    }

    /// Sets the range forecasts are clipped to.
    pub fn with_domain(mut self, lo: f64, hi: f64) -> Self {
        self.domain = (lo, hi);
        self
    }

    /// Sets the artifact paths.
    pub fn with_artifacts(mut self, artifacts: ArtifactPaths) -> Self {
        self.artifacts = artifacts;
        self
    }

    /// Window length `L`.
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    /// Clipping range `(lo, hi)` in original units.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Artifact paths.
    pub fn artifacts(&self) -> &ArtifactPaths {
        &self.artifacts
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidInput`] if the window length is zero
    /// or the domain is not a finite, increasing range.
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.sequence_length == 0 {
            return Err(ForecastError::invalid("sequence_length must be at least 1"));
        }
        let (lo, hi) = self.domain;
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(ForecastError::invalid(format!(
                "domain must be a finite range with lo < hi, got [{lo}, {hi}]"
            )));
        }
        Ok(())
    }
}

/// Schedule for [`Forecaster::train`](crate::Forecaster::train).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainParams {
    /// Maximum passes over the training windows.
    pub epochs: usize,
    /// Windows per gradient step.
    pub batch_size: usize,
    /// Trailing fraction of windows held out for early stopping, in `[0, 1)`.
    pub validation_split: f64,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            epochs: 50,
            batch_size: 32,
            validation_split: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> ArtifactPaths {
        ArtifactPaths::new("m.json", "s.json")
    }

    #[test]
    fn test_defaults() {
        let cfg = ForecasterConfig::new(paths());
        assert_eq!(cfg.sequence_length(), 24);
        assert_eq!(cfg.domain(), (0.0, 100.0));
        assert!(cfg.validate().is_ok());

        let params = TrainParams::default();
        assert_eq!(params.epochs, 50);
        assert_eq!(params.batch_size, 32);
    }

    #[test]
    fn test_invalid() {
        assert!(ForecasterConfig::new(paths())
            .with_sequence_length(0)
            .validate()
            .is_err());
        assert!(ForecasterConfig::new(paths())
            .with_domain(5.0, 5.0)
            .validate()
            .is_err());
        assert!(ForecasterConfig::new(paths())
            .with_domain(f64::NEG_INFINITY, 1.0)
            .validate()
            .is_err());
    }
}
