//! Network and optimiser configuration.

use serde::{Deserialize, Serialize};

use crate::error::LstmError;

/// Configuration for an [`Lstm`](crate::Lstm) network.
///
/// Defaults mirror a two-layer, 50-unit recurrent regressor with 20%
/// dropout, Adam at a learning rate of 1e-3 and early stopping after 10
/// epochs without validation improvement.
///
/// # Example
///
/// ```
/// use flowcast_lstm::LstmConfig;
///
/// let config = LstmConfig::new()
///     .with_hidden_sizes(vec![16, 16])
///     .with_dropout(0.1)
///     .with_seed(7);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LstmConfig {
    /// Hidden units per stacked LSTM layer, input side first.
    hidden_sizes: Vec<usize>,
    /// Dropout rate applied to each layer's output during training.
    dropout: f64,
    /// Adam step size.
    learning_rate: f64,
    /// Epochs without validation improvement before training stops.
    patience: usize,
    /// Minimum validation-loss decrease that counts as improvement.
    min_delta: f64,
    /// Global gradient-norm ceiling; `None` disables clipping.
    clip_norm: Option<f64>,
    /// Seed for weight initialisation, shuffling and dropout masks.
    seed: u64,
}

impl LstmConfig {
    /// Creates a configuration with default values.
    ///
    /// Defaults: `hidden_sizes = [50, 50]`, `dropout = 0.2`,
    /// `learning_rate = 1e-3`, `patience = 10`, `min_delta = 0.0`,
    /// `clip_norm = Some(1.0)`, `seed = 42`.
    pub fn new() -> Self {
        Self {
            hidden_sizes: vec![50, 50],
            dropout: 0.2,
            learning_rate: 1e-3,
            patience: 10,
            min_delta: 0.0,
            clip_norm: Some(1.0),
            seed: 42,
        }
    }

    /// Sets the hidden sizes of the stacked layers.
    pub fn with_hidden_sizes(mut self, hidden_sizes: Vec<usize>) -> Self {
        self.hidden_sizes = hidden_sizes;
        self
    }

    /// Sets the dropout rate.
    pub fn with_dropout(mut self, dropout: f64) -> Self {
        self.dropout = dropout;
        self
    }

    /// Sets the Adam learning rate.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the early-stopping patience in epochs.
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    /// Sets the minimum improvement for early stopping.
    pub fn with_min_delta(mut self, min_delta: f64) -> Self {
        self.min_delta = min_delta;
        self
    }

    /// Sets the gradient-norm ceiling.
    pub fn with_clip_norm(mut self, clip_norm: Option<f64>) -> Self {
        self.clip_norm = clip_norm;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the hidden sizes.
    pub fn hidden_sizes(&self) -> &[usize] {
        &self.hidden_sizes
    }

    /// Returns the dropout rate.
    pub fn dropout(&self) -> f64 {
        self.dropout
    }

    /// Returns the learning rate.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Returns the early-stopping patience.
    pub fn patience(&self) -> usize {
        self.patience
    }

    /// Returns the minimum improvement for early stopping.
    pub fn min_delta(&self) -> f64 {
        self.min_delta
    }

    /// Returns the gradient-norm ceiling.
    pub fn clip_norm(&self) -> Option<f64> {
        self.clip_norm
    }

    /// Returns the RNG seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), LstmError> {
        let invalid = |reason: &str| {
            Err(LstmError::InvalidConfig {
                reason: reason.to_string(),
            })
        };
        if self.hidden_sizes.is_empty() {
            return invalid("at least one LSTM layer is required");
        }
        if self.hidden_sizes.contains(&0) {
            return invalid("hidden sizes must be at least 1");
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return invalid("dropout must be in [0, 1)");
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return invalid("learning rate must be positive and finite");
        }
        if !self.min_delta.is_finite() || self.min_delta < 0.0 {
            return invalid("min_delta must be non-negative and finite");
        }
        if let Some(c) = self.clip_norm {
            if !c.is_finite() || c <= 0.0 {
                return invalid("clip_norm must be positive and finite");
            }
        }
        Ok(())
    }
}

impl Default for LstmConfig {
    fn default() -> Self {
        Self::new()
    }
}
