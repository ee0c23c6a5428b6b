//! Contextual traffic load regression.
//!
//! A [`FeatureRegressor`] scales a row of contextual features with a
//! [`StandardScaler`](flowcast_scale::StandardScaler) and feeds it to a
//! [`TabularModel`], by default a
//! [`RandomForest`](flowcast_forest::RandomForest). Predictions are clipped
//! to the configured domain, `[0, 100]` unless overridden.
//!
//! | Column | Source | Encoding |
//! |--------|--------|----------|
//! | 0 | hour of day | 0..=23 |
//! | 1 | day of week | 0 = Monday ..= 6 = Sunday |
//! | 2 | [`Weather`] | 0 clear, 1 cloudy, 2 rain, 3 snow |
//! | 3 | temperature | °C |
//! | 4 | holiday | 0 or 1 |
//!
//! [`TrafficConditions::to_features`] produces this row. The regressor
//! itself accepts any fixed column count.
//!
//! The model and the fitted scaler are persisted together through
//! `flowcast-artifact`; the model file records the feature count so a
//! mismatched pair is rejected on load.

mod conditions;
mod config;
mod dataset;
mod error;
mod model;
mod regressor;

pub use conditions::{N_FEATURES, TrafficConditions, Weather};
pub use config::RegressorConfig;
pub use dataset::Dataset;
pub use error::RegressError;
pub use model::TabularModel;
pub use regressor::{FeatureRegressor, RegressionScore};

pub use flowcast_artifact::{ArtifactPaths, Lifecycle};
