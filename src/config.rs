use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Flowcast configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowcastConfig {
    /// Sequence forecaster settings.
    #[serde(default)]
    pub congestion: CongestionToml,

    /// Feature regressor settings.
    #[serde(default)]
    pub traffic: TrafficToml,
}

/// Reads and parses `path`, or returns the defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<FlowcastConfig> {
    let Some(path) = path else {
        return Ok(FlowcastConfig::default());
    };
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CongestionToml {
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,
    #[serde(default = "default_congestion_stem")]
    pub artifact_stem: String,
    #[serde(default = "default_sequence_length")]
    pub sequence_length: usize,
    #[serde(default = "default_domain")]
    pub domain: [f64; 2],
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub train: TrainToml,
    #[serde(default)]
    pub lstm: LstmToml,
    #[serde(default)]
    pub linear: LinearToml,
}

impl Default for CongestionToml {
    fn default() -> Self {
        Self {
            artifact_dir: default_artifact_dir(),
            artifact_stem: default_congestion_stem(),
            sequence_length: default_sequence_length(),
            domain: default_domain(),
            horizon: default_horizon(),
            samples: default_samples(),
            seed: default_seed(),
            test_fraction: default_test_fraction(),
            model: default_model(),
            train: TrainToml::default(),
            lstm: LstmToml::default(),
            linear: LinearToml::default(),
        }
    }
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("models")
}
fn default_congestion_stem() -> String {
    "congestion_forecast".to_string()
}
fn default_sequence_length() -> usize {
    24
}
fn default_domain() -> [f64; 2] {
    [0.0, 100.0]
}
fn default_horizon() -> usize {
    12
}
fn default_samples() -> usize {
    1000
}
fn default_seed() -> u64 {
    42
}
fn default_test_fraction() -> f64 {
    0.2
}
fn default_model() -> String {
    "lstm".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainToml {
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_validation_split")]
    pub validation_split: f64,
}

impl Default for TrainToml {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            batch_size: default_batch_size(),
            validation_split: default_validation_split(),
        }
    }
}

fn default_epochs() -> usize {
    50
}
fn default_batch_size() -> usize {
    32
}
fn default_validation_split() -> f64 {
    0.2
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LstmToml {
    #[serde(default = "default_hidden_sizes")]
    pub hidden_sizes: Vec<usize>,
    #[serde(default = "default_dropout")]
    pub dropout: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_patience")]
    pub patience: usize,
    #[serde(default)]
    pub min_delta: f64,
    #[serde(default = "default_clip_norm")]
    pub clip_norm: Option<f64>,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for LstmToml {
    fn default() -> Self {
        Self {
            hidden_sizes: default_hidden_sizes(),
            dropout: default_dropout(),
            learning_rate: default_learning_rate(),
            patience: default_patience(),
            min_delta: 0.0,
            clip_norm: default_clip_norm(),
            seed: default_seed(),
        }
    }
}

fn default_hidden_sizes() -> Vec<usize> {
    vec![50, 50]
}
fn default_dropout() -> f64 {
    0.2
}
fn default_learning_rate() -> f64 {
    1e-3
}
fn default_patience() -> usize {
    10
}
fn default_clip_norm() -> Option<f64> {
    Some(1.0)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearToml {
    #[serde(default = "default_ridge")]
    pub ridge: f64,
}

impl Default for LinearToml {
    fn default() -> Self {
        Self {
            ridge: default_ridge(),
        }
    }
}

fn default_ridge() -> f64 {
    1e-4
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrafficToml {
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,
    #[serde(default = "default_traffic_stem")]
    pub artifact_stem: String,
    #[serde(default = "default_domain")]
    pub domain: [f64; 2],
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    #[serde(default = "default_seed")]
    pub split_seed: u64,
    #[serde(default)]
    pub forest: ForestToml,
}

impl Default for TrafficToml {
    fn default() -> Self {
        Self {
            artifact_dir: default_artifact_dir(),
            artifact_stem: default_traffic_stem(),
            domain: default_domain(),
            samples: default_samples(),
            seed: default_seed(),
            test_fraction: default_test_fraction(),
            split_seed: default_seed(),
            forest: ForestToml::default(),
        }
    }
}

fn default_traffic_stem() -> String {
    "traffic_load".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForestToml {
    #[serde(default = "default_n_trees")]
    pub n_trees: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,
    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,
    #[serde(default)]
    pub max_features: Option<usize>,
    #[serde(default = "default_true")]
    pub bootstrap: bool,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for ForestToml {
    fn default() -> Self {
        Self {
            n_trees: default_n_trees(),
            max_depth: default_max_depth(),
            min_samples_split: default_min_samples_split(),
            min_samples_leaf: default_min_samples_leaf(),
            max_features: None,
            bootstrap: true,
            seed: default_seed(),
        }
    }
}

fn default_n_trees() -> usize {
    100
}
fn default_max_depth() -> usize {
    10
}
fn default_min_samples_split() -> usize {
    2
}
fn default_min_samples_leaf() -> usize {
    1
}
fn default_true() -> bool {
    true
}
