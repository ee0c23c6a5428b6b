//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::*;

use flowcast_forecast::{ArtifactPaths, ForecasterConfig, TrainParams};
use flowcast_forest::{ForestConfig, TreeConfig};
use flowcast_lstm::LstmConfig;
use flowcast_regress::RegressorConfig;

/// Which sequence model backs the congestion forecaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Stacked LSTM.
    Lstm,
    /// Closed-form ridge regression on the window.
    Linear,
}

/// Parses a sequence model name string into the corresponding enum variant.
pub fn parse_model_kind(s: &str) -> Result<ModelKind> {
    match s.to_lowercase().as_str() {
        "lstm" => Ok(ModelKind::Lstm),
        "linear" => Ok(ModelKind::Linear),
        other => bail!("unknown sequence model: {other:?}"),
    }
}

/// Builds a [`ForecasterConfig`] from the TOML congestion configuration.
pub fn build_forecaster_config(c: &CongestionToml) -> Result<ForecasterConfig> {
    let cfg = ForecasterConfig::new(ArtifactPaths::in_dir(&c.artifact_dir, &c.artifact_stem))
        .with_sequence_length(c.sequence_length)
        .with_domain(c.domain[0], c.domain[1]);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds [`TrainParams`] from the TOML training schedule.
pub fn build_train_params(t: &TrainToml) -> TrainParams {
    TrainParams {
        epochs: t.epochs,
        batch_size: t.batch_size,
        validation_split: t.validation_split,
    }
}

/// Builds an [`LstmConfig`] from the TOML LSTM configuration.
pub fn build_lstm_config(l: &LstmToml) -> Result<LstmConfig> {
    let cfg = LstmConfig::new()
        .with_hidden_sizes(l.hidden_sizes.clone())
        .with_dropout(l.dropout)
        .with_learning_rate(l.learning_rate)
        .with_patience(l.patience)
        .with_min_delta(l.min_delta)
        .with_clip_norm(l.clip_norm)
        .with_seed(l.seed);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`ForestConfig`] from the TOML forest configuration.
pub fn build_forest_config(f: &ForestToml) -> Result<ForestConfig> {
    let tree = TreeConfig::new()
        .with_max_depth(f.max_depth)
        .with_min_samples_split(f.min_samples_split)
        .with_min_samples_leaf(f.min_samples_leaf)
        .with_max_features(f.max_features);
    let cfg = ForestConfig::new()
        .with_n_trees(f.n_trees)
        .with_tree(tree)
        .with_bootstrap(f.bootstrap)
        .with_seed(f.seed);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`RegressorConfig`] from the TOML traffic configuration.
pub fn build_regressor_config(t: &TrafficToml) -> Result<RegressorConfig> {
    let cfg = RegressorConfig::new(ArtifactPaths::in_dir(&t.artifact_dir, &t.artifact_stem))
        .with_domain(t.domain[0], t.domain[1]);
    cfg.validate()?;
    Ok(cfg)
}
