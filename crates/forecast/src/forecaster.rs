//! Train / evaluate / forecast / persist orchestration.

use flowcast_artifact::Lifecycle;
use flowcast_lstm::Lstm;
use flowcast_scale::{MinMaxScaler, Scaler};
use flowcast_window::{SlidingWindow, Windows};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ForecasterConfig, TrainParams};
use crate::error::ForecastError;
use crate::model::{FitSummary, SequenceModel};

/// Outcome of [`Forecaster::train`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    /// Windows the model was fitted on.
    pub n_train: usize,
    /// Windows held out for validation.
    pub n_validation: usize,
    /// What the model reported.
    pub fit: FitSummary,
}

/// Error metrics in original units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Mean squared error.
    pub mse: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Number of windows scored.
    pub n: usize,
}

/// On-disk model artifact: the model plus the window length it was fitted on.
#[derive(Serialize)]
struct ModelArtifactRef<'a, M> {
    window_len: usize,
    model: &'a M,
}

#[derive(Deserialize)]
struct ModelArtifact<M> {
    window_len: usize,
    model: M,
}

/// Autoregressive forecaster over a scaled univariate series.
///
/// Owns a [`SequenceModel`] and a [`Scaler`] and keeps them consistent:
/// both are fitted together by [`train`](Self::train), saved together by
/// [`save`](Self::save) and restored together by [`load`](Self::load).
///
/// # Example
///
/// ```
/// use flowcast_forecast::{ArtifactPaths, Forecaster, ForecasterConfig, LinearWindowModel, TrainParams};
/// use flowcast_scale::MinMaxScaler;
///
/// let series: Vec<f64> = (0..200)
///     .map(|h| 50.0 + 20.0 * (h as f64 * std::f64::consts::TAU / 24.0).sin())
///     .collect();
///
/// let config = ForecasterConfig::new(ArtifactPaths::new("m.json", "s.json"));
/// let mut forecaster =
///     Forecaster::new(config, LinearWindowModel::default(), MinMaxScaler::new()).unwrap();
/// forecaster.train(&series, &TrainParams::default()).unwrap();
///
/// let next = forecaster.forecast(&series, 6).unwrap();
/// assert_eq!(next.len(), 6);
/// assert!(next.iter().all(|v| (0.0..=100.0).contains(v)));
/// ```
#[derive(Debug, Clone)]
pub struct Forecaster<M = Lstm, S = MinMaxScaler> {
    config: ForecasterConfig,
    model: M,
    scaler: S,
    state: Lifecycle,
}

impl<M: SequenceModel, S: Scaler> Forecaster<M, S> {
    /// Creates an untrained forecaster.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidInput`] if `config` fails validation.
    pub fn new(config: ForecasterConfig, model: M, scaler: S) -> Result<Self, ForecastError> {
        config.validate()?;
        Ok(Self {
            config,
            model,
            scaler,
            state: Lifecycle::Untrained,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ForecasterConfig {
        &self.config
    }

    /// Returns the sequence model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns the scaler.
    pub fn scaler(&self) -> &S {
        &self.scaler
    }

    /// Current lifecycle state.
    pub fn state(&self) -> Lifecycle {
        self.state
    }

    fn require_ready(&self) -> Result<(), ForecastError> {
        if self.state.is_ready() {
            Ok(())
        } else {
            Err(ForecastError::ModelNotTrained)
        }
    }

    /// Scales `series` with the fitted scaler and windows it.
    ///
    /// # Errors
    ///
    /// [`ForecastError::Scale`] wrapping `NotFitted` before training.
    pub fn scaled_windows(&self, series: &[f64]) -> Result<Windows, ForecastError> {
        check_finite(series, "series")?;
        let scaled = self.scaler.transform(series)?;
        Ok(Windows::new(&scaled, self.config.sequence_length())?)
    }

    /// Scores the model on scaled windows, reporting metrics in original units.
    ///
    /// # Errors
    ///
    /// - [`ForecastError::ModelNotTrained`] before training or loading.
    /// - [`ForecastError::InvalidInput`] if `windows` is empty or has a
    ///   different window length.
    pub fn evaluate(&self, windows: &Windows) -> Result<Evaluation, ForecastError> {
        self.require_ready()?;
        if windows.is_empty() {
            return Err(ForecastError::invalid("no windows to evaluate"));
        }
        if windows.window_len() != self.config.sequence_length() {
            return Err(ForecastError::invalid(format!(
                "window length {} does not match sequence_length {}",
                windows.window_len(),
                self.config.sequence_length()
            )));
        }

        let predicted = self.scaler.inverse_transform(&self.model.predict_windows(windows))?;
        let actual = self.scaler.inverse_transform(windows.labels())?;
        let evaluation = Evaluation {
            mse: flowcast_stats::mse(&actual, &predicted),
            mae: flowcast_stats::mae(&actual, &predicted),
            n: windows.len(),
        };
        info!(mse = evaluation.mse, mae = evaluation.mae, n = evaluation.n, "evaluated forecaster");
        Ok(evaluation)
    }

    /// Forecasts `horizon` steps after `history`.
    ///
    /// The last `sequence_length` observations seed a sliding window; each
    /// prediction is appended to the output and pushed into the window
    /// before the next step. The output is mapped back to original units
    /// and clipped to the configured domain.
    ///
    /// # Errors
    ///
    /// - [`ForecastError::ModelNotTrained`] before training or loading.
    /// - [`ForecastError::InvalidInput`] if `history` is shorter than
    ///   `sequence_length` or holds non-finite values.
    /// - [`ForecastError::NonFinitePrediction`] if the model emits NaN or infinity.
    pub fn forecast(&self, history: &[f64], horizon: usize) -> Result<Vec<f64>, ForecastError> {
        self.require_ready()?;
        let l = self.config.sequence_length();
        if history.len() < l {
            return Err(ForecastError::invalid(format!(
                "history has {} observations, need at least {l}",
                history.len()
            )));
        }
        check_finite(history, "history")?;
        if horizon == 0 {
            return Ok(Vec::new());
        }

        let seed = self.scaler.transform(&history[history.len() - l..])?;
        let mut buffer = SlidingWindow::new(&seed)?;
        let mut scaled = Vec::with_capacity(horizon);
        for step in 0..horizon {
            let next = self.model.predict(buffer.as_slice());
            if !next.is_finite() {
                return Err(ForecastError::NonFinitePrediction { step });
            }
            scaled.push(next);
            buffer.push(next);
        }

        let (lo, hi) = self.config.domain();
        let values = self
            .scaler
            .inverse_transform(&scaled)?
            .into_iter()
            .map(|v| v.clamp(lo, hi))
            .collect();
        debug!(horizon, "forecast complete");
        Ok(values)
    }
}

impl<M: SequenceModel + Clone, S: Scaler + Clone> Forecaster<M, S> {
    /// Fits the scaler and the model on `series`.
    ///
    /// The scaler is fitted on the whole series; the trailing
    /// `validation_split` fraction of windows is held out for the model's
    /// early stopping. Fitting runs on copies, so on error the forecaster
    /// keeps its previous state.
    ///
    /// # Errors
    ///
    /// - [`ForecastError::InvalidInput`] if the series is not longer than
    ///   `sequence_length`, holds non-finite values, the split is outside
    ///   `[0, 1)`, or no training windows remain after the split.
    /// - [`ForecastError::Training`] if the model fails to fit.
    pub fn train(
        &mut self,
        series: &[f64],
        params: &TrainParams,
    ) -> Result<TrainReport, ForecastError> {
        let l = self.config.sequence_length();
        if series.len() <= l {
            return Err(ForecastError::invalid(format!(
                "series has {} observations, need more than {l}",
                series.len()
            )));
        }
        check_finite(series, "series")?;
        if !(0.0..1.0).contains(&params.validation_split) {
            return Err(ForecastError::invalid(format!(
                "validation_split must be in [0, 1), got {}",
                params.validation_split
            )));
        }

        let mut scaler = self.scaler.clone();
        let scaled = scaler.fit_transform(series, 1)?;
        let windows = Windows::new(&scaled, l)?;
        let (train, validation) = windows.split_fraction(params.validation_split)?;
        if train.is_empty() {
            return Err(ForecastError::invalid(
                "no training windows remain after the validation split",
            ));
        }
        let validation = (!validation.is_empty()).then_some(&validation);

        info!(
            n_observations = series.len(),
            n_train = train.len(),
            n_validation = validation.map_or(0, Windows::len),
            "training forecaster"
        );

        let mut model = self.model.clone();
        let fit = model
            .fit(&train, validation, params.epochs, params.batch_size)
            .map_err(|e| ForecastError::Training {
                message: e.to_string(),
            })?;

        self.model = model;
        self.scaler = scaler;
        self.state = Lifecycle::Trained;
        info!(epochs_run = fit.epochs_run, stopped_early = fit.stopped_early, "forecaster trained");

        Ok(TrainReport {
            n_train: train.len(),
            n_validation: validation.map_or(0, Windows::len),
            fit,
        })
    }
}

impl<M: SequenceModel + Serialize, S: Scaler + Serialize> Forecaster<M, S> {
    /// Writes the model and scaler artifacts.
    ///
    /// Both files are staged as temporary siblings first and renamed into
    /// place only once both are written.
    ///
    /// # Errors
    ///
    /// - [`ForecastError::ModelNotTrained`] before training or loading.
    /// - [`ForecastError::Io`] or [`ForecastError::Serialization`] on write failure.
    pub fn save(&mut self) -> Result<(), ForecastError> {
        self.require_ready()?;
        let paths = self.config.artifacts();
        let stored = ModelArtifactRef {
            window_len: self.config.sequence_length(),
            model: &self.model,
        };
        flowcast_artifact::save_pair(paths, &stored, &self.scaler)?;

        self.state = Lifecycle::Saved;
        info!(
            model = %paths.model().display(),
            scaler = %paths.scaler().display(),
            "saved forecaster artifacts"
        );
        Ok(())
    }
}

impl<M: SequenceModel + DeserializeOwned, S: Scaler + DeserializeOwned> Forecaster<M, S> {
    /// Restores a forecaster from the artifacts named in `config`.
    ///
    /// # Errors
    ///
    /// - [`ForecastError::ArtifactNotFound`] if either file is missing.
    /// - [`ForecastError::IncompatibleArtifact`] if the model was fitted on a
    ///   different window length than `config` specifies, or the model's
    ///   own weights disagree with the recorded window length.
    /// - [`ForecastError::Serialization`] if a file cannot be decoded or
    ///   holds an unfitted scaler.
    pub fn load(config: ForecasterConfig) -> Result<Self, ForecastError> {
        config.validate()?;
        let paths = config.artifacts();
        let (stored, scaler): (ModelArtifact<M>, S) = flowcast_artifact::load_pair(paths)?;
        if stored.window_len != config.sequence_length() {
            return Err(ForecastError::IncompatibleArtifact {
                expected: config.sequence_length(),
                found: stored.window_len,
            });
        }
        if let Some(fitted) = stored.model.window_len_hint() {
            if fitted != stored.window_len {
                return Err(ForecastError::IncompatibleArtifact {
                    expected: config.sequence_length(),
                    found: fitted,
                });
            }
        }
        if scaler.n_features() != Some(1) {
            return Err(ForecastError::Serialization {
                message: format!(
                    "{}: scaler must be fitted on one column",
                    paths.scaler().display()
                ),
            });
        }

        info!(model = %paths.model().display(), "loaded forecaster artifacts");
        Ok(Self {
            config,
            model: stored.model,
            scaler,
            state: Lifecycle::Loaded,
        })
    }
}

fn check_finite(values: &[f64], what: &str) -> Result<(), ForecastError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ForecastError::invalid(format!(
            "{what} holds a non-finite value at index {i}"
        ))),
        None => Ok(()),
    }
}
