//! Feature regressor configuration.

use flowcast_artifact::ArtifactPaths;

use crate::error::RegressError;

/// Configuration for a [`FeatureRegressor`](crate::FeatureRegressor).
#[derive(Debug, Clone, PartialEq)]
pub struct RegressorConfig {
    domain: (f64, f64),
    artifacts: ArtifactPaths,
}

impl RegressorConfig {
    /// Predictions are clipped to `[0, 100]` by default.
    pub fn new(artifacts: ArtifactPaths) -> Self {
        Self {
            domain: (0.0, 100.0),
            artifacts,
        }
    }

    /// Sets the range predictions are clipped to.
    pub fn with_domain(mut self, lo: f64, hi: f64) -> Self {
        self.domain = (lo, hi);
        self
    }

    /// Clipping range `(lo, hi)`.
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
    /// Returns [`RegressError::InvalidInput`] if the domain is not a finite,
    /// increasing range.
    pub fn validate(&self) -> Result<(), RegressError> {
        let (lo, hi) = self.domain;
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(RegressError::invalid(format!(
                "domain must be a finite range with lo < hi, got [{lo}, {hi}]"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let cfg = RegressorConfig::new(ArtifactPaths::in_dir("out", "traffic"));
        assert_eq!(cfg.domain(), (0.0, 100.0));
        assert_eq!(cfg.artifacts().scaler(), Path::new("out/traffic_scaler.json"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_invalid_domain() {
        let cfg = RegressorConfig::new(ArtifactPaths::new("m", "s")).with_domain(10.0, 0.0);
        assert!(cfg.validate().is_err());
    }
}
