//! Stacked LSTM regressor over scalar windows.

use flowcast_window::Windows;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::LstmConfig;
use crate::error::LstmError;
use crate::history::TrainHistory;
use crate::layer::StepCache;
use crate::params::{Adam, Params};

/// A stacked LSTM mapping a window of scalars to the next scalar.
///
/// Each window is fed one value per time step through every layer; the last
/// layer's final hidden state passes through a linear head. During training
/// each layer's outputs go through inverted dropout.
///
/// # Example
///
/// ```
/// use flowcast_lstm::{Lstm, LstmConfig};
/// use flowcast_window::Windows;
///
/// let series: Vec<f64> = (0..60).map(|i| 0.5 + 0.4 * (i as f64 * 0.5).sin()).collect();
/// let windows = Windows::new(&series, 6).unwrap();
///
/// let config = LstmConfig::new().with_hidden_sizes(vec![4]).with_dropout(0.0);
/// let mut net = Lstm::new(config).unwrap();
/// let history = net.fit(&windows, None, 2, 8).unwrap();
///
/// assert_eq!(history.epochs_run(), 2);
/// assert!(net.predict(windows.window(0)).is_finite());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lstm {
    config: LstmConfig,
    params: Params,
    /// Window length seen by the last successful `fit`.
    window_len: Option<usize>,
}

/// Forward activations of one window, kept for backpropagation.
struct Trace {
    layers: Vec<Vec<StepCache>>,
    /// Dropout masks applied to each non-final layer's outputs, per step.
    masks: Vec<Vec<Array1<f64>>>,
    /// Dropout mask applied to the final hidden state.
    head_mask: Option<Array1<f64>>,
    /// Final hidden state after dropout (head input).
    head_in: Array1<f64>,
    output: f64,
}

impl Lstm {
    /// Creates an untrained network with seeded random weights.
    ///
    /// # Errors
    ///
    /// Returns [`LstmError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: LstmConfig) -> Result<Self, LstmError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed());
        let params = Params::init(config.hidden_sizes(), &mut rng);
        Ok(Self {
            config,
            params,
            window_len: None,
        })
    }

    /// Returns the network configuration.
    pub fn config(&self) -> &LstmConfig {
        &self.config
    }

    /// Window length of the last successful fit, or `None` if never fitted.
    pub fn window_len(&self) -> Option<usize> {
        self.window_len
    }

    /// Returns `true` once [`Lstm::fit`] has succeeded.
    pub fn is_fitted(&self) -> bool {
        self.window_len.is_some()
    }

    /// Predicts the value following `window` (inference mode, no dropout).
    pub fn predict(&self, window: &[f64]) -> f64 {
        self.trace::<StdRng>(window, None).output
    }

    /// Mean squared error over all windows in inference mode.
    pub fn mse(&self, windows: &Windows) -> f64 {
        if windows.is_empty() {
            return 0.0;
        }
        windows
            .iter()
            .map(|(w, y)| {
                let e = self.predict(w) - y;
                e * e
            })
            .sum::<f64>()
            / windows.len() as f64
    }

    /// Trains the network from freshly initialised weights.
    ///
    /// Runs up to `epochs` passes of shuffled mini-batches of `batch_size`
    /// windows. When `validation` holds windows, the validation MSE is
    /// tracked after every epoch; training stops once it has not improved
    /// by more than `min_delta` for `patience` epochs, and the weights of
    /// the best epoch are restored. Without validation all epochs run.
    ///
    /// On error the network is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`LstmError::EmptyTrainingSet`] if `train` has no windows.
    /// - [`LstmError::InvalidSchedule`] if `epochs` or `batch_size` is zero.
    /// - [`LstmError::WindowLengthMismatch`] if the window lengths differ.
    /// - [`LstmError::Diverged`] if the training loss stops being finite.
    pub fn fit(
        &mut self,
        train: &Windows,
        validation: Option<&Windows>,
        epochs: usize,
        batch_size: usize,
    ) -> Result<TrainHistory, LstmError> {
        if train.is_empty() {
            return Err(LstmError::EmptyTrainingSet);
        }
        if epochs == 0 || batch_size == 0 {
            return Err(LstmError::InvalidSchedule { epochs, batch_size });
        }
        let validation = validation.filter(|v| !v.is_empty());
        if let Some(v) = validation {
            if v.window_len() != train.window_len() {
                return Err(LstmError::WindowLengthMismatch {
                    expected: train.window_len(),
                    got: v.window_len(),
                });
            }
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed());
        let mut candidate = Self {
            config: self.config.clone(),
            params: Params::init(self.config.hidden_sizes(), &mut rng),
            window_len: Some(train.window_len()),
        };
        let mut adam = Adam::new(&candidate.params, self.config.learning_rate());
        let mut order: Vec<usize> = (0..train.len()).collect();
        let mut history = TrainHistory::default();
        let mut best: Option<(f64, Params)> = None;
        let mut wait = 0;

        info!(
            n_train = train.len(),
            n_validation = validation.map_or(0, Windows::len),
            epochs,
            batch_size,
            "training LSTM"
        );

        for epoch in 0..epochs {
            order.shuffle(&mut rng);
            let mut sq_err = 0.0;
            for batch in order.chunks(batch_size) {
                let mut grads = candidate.params.zeros_like();
                for &idx in batch {
                    sq_err += candidate.accumulate(
                        train.window(idx),
                        train.label(idx),
                        batch.len(),
                        &mut grads,
                        &mut rng,
                    );
                }
                if let Some(max_norm) = self.config.clip_norm() {
                    let norm = grads.norm();
                    if norm > max_norm {
                        grads.scale(max_norm / norm);
                    }
                }
                adam.step(&mut candidate.params, &grads);
            }

            let train_loss = sq_err / train.len() as f64;
            if !train_loss.is_finite() {
                return Err(LstmError::Diverged { epoch });
            }
            history.push_train(train_loss);

            let Some(v) = validation else {
                debug!(epoch, train_loss, "epoch complete");
                continue;
            };
            let val_loss = candidate.mse(v);
            history.push_validation(val_loss);
            debug!(epoch, train_loss, val_loss, "epoch complete");

            let improved = match &best {
                Some((best_loss, _)) => val_loss < best_loss - self.config.min_delta(),
                None => val_loss.is_finite(),
            };
            if improved {
                best = Some((val_loss, candidate.params.clone()));
                history.set_best_epoch(epoch);
                wait = 0;
            } else {
                wait += 1;
                if wait >= self.config.patience() {
                    info!(epoch, patience = self.config.patience(), "early stopping");
                    history.mark_stopped_early();
                    break;
                }
            }
        }

        if let Some((best_loss, params)) = best {
            debug!(best_epoch = ?history.best_epoch(), best_loss, "restoring best weights");
            candidate.params = params;
        }

        *self = candidate;
        Ok(history)
    }

    /// Forward pass over one window.
    ///
    /// With `rng` present, dropout masks are sampled for training.
    fn trace<R: Rng>(&self, window: &[f64], mut rng: Option<&mut R>) -> Trace {
        let p = self.config.dropout();
        let mask = |n: usize, rng: &mut Option<&mut R>| -> Option<Array1<f64>> {
            match rng {
                Some(r) if p > 0.0 => {
                    let keep = 1.0 / (1.0 - p);
                    Some(Array1::from_shape_fn(n, |_| {
                        if r.random::<f64>() < p { 0.0 } else { keep }
                    }))
                }
                _ => None,
            }
        };

        let n_layers = self.params.layers.len();
        let mut inputs: Vec<Array1<f64>> = window.iter().map(|&v| Array1::from_elem(1, v)).collect();
        let mut layers = Vec::with_capacity(n_layers);
        let mut masks = Vec::with_capacity(n_layers.saturating_sub(1));

        for (l, layer) in self.params.layers.iter().enumerate() {
            let caches = layer.forward(inputs);
            if l + 1 < n_layers {
                let mut step_masks = Vec::with_capacity(caches.len());
                inputs = caches
                    .iter()
                    .map(|c| match mask(layer.hidden(), &mut rng) {
                        Some(m) => {
                            let out = &c.h * &m;
                            step_masks.push(m);
                            out
                        }
                        None => c.h.clone(),
                    })
                    .collect();
                masks.push(step_masks);
            } else {
                inputs = Vec::new();
            }
            layers.push(caches);
        }

        let last_hidden = self.params.layers[n_layers - 1].hidden();
        let final_h = layers[n_layers - 1]
            .last()
            .map_or_else(|| Array1::zeros(last_hidden), |c| c.h.clone());
        let head_mask = mask(last_hidden, &mut rng);
        let head_in = match &head_mask {
            Some(m) => &final_h * m,
            None => final_h,
        };
        let output = self.params.head_w.dot(&head_in) + self.params.head_b[0];

        Trace {
            layers,
            masks,
            head_mask,
            head_in,
            output,
        }
    }

    /// Adds the gradient of one window's share of the batch MSE to `grads`.
    ///
    /// Returns the window's squared error.
    fn accumulate(
        &self,
        window: &[f64],
        label: f64,
        batch_len: usize,
        grads: &mut Params,
        rng: &mut StdRng,
    ) -> f64 {
        let trace = self.trace(window, Some(rng));
        let err = trace.output - label;
        let d_out = 2.0 * err / batch_len as f64;

        grads.head_w.scaled_add(d_out, &trace.head_in);
        grads.head_b[0] += d_out;

        let n_layers = self.params.layers.len();
        let steps = window.len();
        if steps == 0 {
            return err * err;
        }

        let mut d_final = &self.params.head_w * d_out;
        if let Some(m) = &trace.head_mask {
            d_final *= m;
        }
        let mut dh_out = vec![Array1::zeros(self.params.layers[n_layers - 1].hidden()); steps];
        dh_out[steps - 1] = d_final;

        for l in (0..n_layers).rev() {
            let dx = self.params.layers[l].backward(&trace.layers[l], &dh_out, &mut grads.layers[l]);
            if l == 0 {
                break;
            }
            let below = &trace.masks[l - 1];
            dh_out = dx
                .into_iter()
                .enumerate()
                .map(|(t, d)| match below.get(t) {
                    Some(m) => d * m,
                    None => d,
                })
                .collect();
        }

        err * err
    }
}
