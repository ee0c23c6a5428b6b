//! Train / predict / evaluate / persist orchestration for tabular features.

use flowcast_artifact::Lifecycle;
use flowcast_forest::RandomForest;
use flowcast_scale::{Scaler, StandardScaler};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::conditions::TrafficConditions;
use crate::config::RegressorConfig;
use crate::dataset::Dataset;
use crate::error::RegressError;
use crate::model::TabularModel;

/// Regression metrics on a labelled dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionScore {
    /// Mean squared error.
    pub mse: f64,
    /// Coefficient of determination.
    pub r2: f64,
    /// Number of rows scored.
    pub n: usize,
}

#[derive(Serialize)]
struct ModelArtifactRef<'a, M> {
    n_features: usize,
    model: &'a M,
}

#[derive(Deserialize)]
struct ModelArtifact<M> {
    n_features: usize,
    model: M,
}

/// Contextual load regressor: a feature scaler in front of a tabular model.
///
/// # Example
///
/// ```
/// use flowcast_forest::{ForestConfig, RandomForest};
/// use flowcast_regress::{ArtifactPaths, Dataset, FeatureRegressor, RegressorConfig};
/// use flowcast_scale::StandardScaler;
///
/// let features: Vec<f64> = (0..40u32).flat_map(|i| [f64::from(i % 24), 20.0]).collect();
/// let targets: Vec<f64> = (0..40u32).map(|i| if (7..=9).contains(&(i % 24)) { 80.0 } else { 30.0 }).collect();
/// let data = Dataset::new(features, 2, targets).unwrap();
///
/// let forest = RandomForest::new(ForestConfig::new().with_n_trees(10)).unwrap();
/// let config = RegressorConfig::new(ArtifactPaths::new("m.json", "s.json"));
/// let mut regressor = FeatureRegressor::new(config, forest, StandardScaler::new()).unwrap();
/// regressor.train(&data).unwrap();
///
/// let load = regressor.predict(&[8.0, 20.0]).unwrap();
/// assert!((0.0..=100.0).contains(&load));
/// ```
#[derive(Debug, Clone)]
pub struct FeatureRegressor<M = RandomForest, S = StandardScaler> {
    config: RegressorConfig,
    model: M,
    scaler: S,
    state: Lifecycle,
}

impl<M: TabularModel, S: Scaler> FeatureRegressor<M, S> {
    /// Creates an untrained regressor.
    ///
    /// # Errors
    ///
    /// Returns [`RegressError::InvalidInput`] if `config` fails validation.
    pub fn new(config: RegressorConfig, model: M, scaler: S) -> Result<Self, RegressError> {
        config.validate()?;
        Ok(Self {
            config,
            model,
            scaler,
            state: Lifecycle::Untrained,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RegressorConfig {
        &self.config
    }

    /// Returns the tabular model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns the feature scaler.
    pub fn scaler(&self) -> &S {
        &self.scaler
    }

    /// Current lifecycle state.
    pub fn state(&self) -> Lifecycle {
        self.state
    }

    fn fitted_features(&self) -> Result<usize, RegressError> {
        if !self.state.is_ready() {
            return Err(RegressError::ModelNotTrained);
        }
        self.scaler
            .n_features()
            .ok_or(RegressError::ModelNotTrained)
    }

    /// Predicts the load for one feature row, clipped to the domain.
    ///
    /// # Errors
    ///
    /// - [`RegressError::ModelNotTrained`] before training or loading.
    /// - [`RegressError::InvalidInput`] if the row has the wrong length or
    ///   holds non-finite values.
    /// - [`RegressError::Prediction`] if the model fails to predict.
    pub fn predict(&self, features: &[f64]) -> Result<f64, RegressError> {
        let expected = self.fitted_features()?;
        if features.len() != expected {
            return Err(RegressError::invalid(format!(
                "expected {expected} features, got {}",
                features.len()
            )));
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(RegressError::invalid("features hold non-finite values"));
        }
        let scaled = self.scaler.transform(features)?;
        let raw = self.model.predict(&scaled).map_err(|e| RegressError::Prediction {
            message: e.to_string(),
        })?;
        let (lo, hi) = self.config.domain();
        let load = raw.clamp(lo, hi);
        debug!(raw, load, "predicted load");
        Ok(load)
    }

    /// Validates `conditions` and predicts from its feature row.
    pub fn predict_conditions(&self, conditions: &TrafficConditions) -> Result<f64, RegressError> {
        conditions.validate()?;
        self.predict(&conditions.to_features())
    }

    /// Scores unclipped predictions against the targets of `data`.
    ///
    /// # Errors
    ///
    /// - [`RegressError::ModelNotTrained`] before training or loading.
    /// - [`RegressError::InvalidInput`] if the feature count differs.
    /// - [`RegressError::Prediction`] if the model fails to predict.
    pub fn evaluate(&self, data: &Dataset) -> Result<RegressionScore, RegressError> {
        let expected = self.fitted_features()?;
        if data.n_features() != expected {
            return Err(RegressError::invalid(format!(
                "expected {expected} features, got {}",
                data.n_features()
            )));
        }
        let scaled = self.scaler.transform(data.features())?;
        let predicted = scaled
            .chunks_exact(expected)
            .map(|row| self.model.predict(row))
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|e| RegressError::Prediction {
                message: e.to_string(),
            })?;

        let mse = flowcast_stats::mse(data.targets(), &predicted);
        let r2 = flowcast_stats::r2(data.targets(), &predicted)
            .ok_or_else(|| RegressError::invalid("dataset has no rows"))?;
        info!(mse, r2, n = data.n_rows(), "evaluated regressor");
        Ok(RegressionScore {
            mse,
            r2,
            n: data.n_rows(),
        })
    }
}

impl<M: TabularModel + Clone, S: Scaler + Clone> FeatureRegressor<M, S> {
    /// Fits the scaler on the features of `data` and the model on the scaled
    /// features. On error the regressor keeps its previous state.
    ///
    /// # Errors
    ///
    /// [`RegressError::Training`] if the model fails to fit.
    pub fn train(&mut self, data: &Dataset) -> Result<(), RegressError> {
        let mut scaler = self.scaler.clone();
        let scaled = scaler.fit_transform(data.features(), data.n_features())?;

        info!(
            n_rows = data.n_rows(),
            n_features = data.n_features(),
            "training regressor"
        );
        let mut model = self.model.clone();
        model
            .fit(&scaled, data.n_features(), data.targets())
            .map_err(|e| RegressError::Training {
                message: e.to_string(),
            })?;

        self.model = model;
        self.scaler = scaler;
        self.state = Lifecycle::Trained;
        info!("regressor trained");
        Ok(())
    }
}

impl<M: TabularModel + Serialize, S: Scaler + Serialize> FeatureRegressor<M, S> {
    /// Writes the model and scaler artifacts as a pair.
    ///
    /// # Errors
    ///
    /// - [`RegressError::ModelNotTrained`] before training or loading.
    /// - [`RegressError::Io`] or [`RegressError::Serialization`] on write failure.
    pub fn save(&mut self) -> Result<(), RegressError> {
        let n_features = self.fitted_features()?;
        let paths = self.config.artifacts();
        let stored = ModelArtifactRef {
            n_features,
            model: &self.model,
        };
        flowcast_artifact::save_pair(paths, &stored, &self.scaler)?;

        self.state = Lifecycle::Saved;
        info!(model = %paths.model().display(), "saved regressor artifacts");
        Ok(())
    }
}

impl<M: TabularModel + DeserializeOwned, S: Scaler + DeserializeOwned> FeatureRegressor<M, S> {
    /// Restores a regressor from the artifacts named in `config`.
    ///
    /// # Errors
    ///
    /// - [`RegressError::ArtifactNotFound`] if either file is missing.
    /// - [`RegressError::IncompatibleArtifact`] if model and scaler disagree
    ///   on the feature count.
    /// - [`RegressError::Serialization`] if a file cannot be decoded or the
    ///   scaler is unfitted.
    pub fn load(config: RegressorConfig) -> Result<Self, RegressError> {
        config.validate()?;
        let paths = config.artifacts();
        let (stored, scaler): (ModelArtifact<M>, S) = flowcast_artifact::load_pair(paths)?;

        let expected = scaler.n_features().ok_or_else(|| RegressError::Serialization {
            message: format!("{}: scaler is not fitted", paths.scaler().display()),
        })?;
        if stored.n_features != expected || stored.model.n_features() != Some(expected) {
            return Err(RegressError::IncompatibleArtifact {
                expected,
                found: stored.n_features,
            });
        }

        info!(model = %paths.model().display(), "loaded regressor artifacts");
        Ok(Self {
            config,
            model: stored.model,
            scaler,
            state: Lifecycle::Loaded,
        })
    }
}
