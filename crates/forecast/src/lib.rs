//! Autoregressive congestion forecasting.
//!
//! A [`Forecaster`] ties together a [`Scaler`](flowcast_scale::Scaler), the
//! windowing in `flowcast-window` and a [`SequenceModel`], and manages the
//! lifecycle of the pair:
//!
//! ```text
//! Untrained ──train──▶ Trained ──save──▶ Saved
//!                         ▲                 │
//!                         └──────train──────┘
//! artifacts ──load──▶ Loaded
//! ```
//!
//! `forecast`, `evaluate` and `save` are available in every state except
//! `Untrained`. None of them mutate the model or the scaler.
//!
//! # Sequence models
//!
//! | Model | Fitting |
//! |-------|---------|
//! | [`flowcast_lstm::Lstm`] | BPTT + Adam, early stopping on the validation windows |
//! | [`LinearWindowModel`] | closed-form ridge regression |
//!
//! # Pipeline
//!
//! ```text
//! series ─▶ scaler.fit_transform ─▶ Windows ─▶ split (train | validation)
//!                                                  │
//!                                            model.fit
//! history[-L..] ─▶ scaler.transform ─▶ SlidingWindow ⟲ model.predict
//!                                          │
//!                        scaler.inverse_transform ─▶ clip(domain)
//! ```
//!
//! # Artifacts
//!
//! Two JSON files per forecaster: the model (with the window length it was
//! fitted on) and the fitted scaler. Paths come from [`ArtifactPaths`].

mod config;
mod error;
mod forecaster;
mod linear;
mod model;

pub use config::{ForecasterConfig, TrainParams};
pub use error::{ForecastError, LinearModelError};
pub use forecaster::{Evaluation, Forecaster, TrainReport};
pub use linear::LinearWindowModel;
pub use model::{FitSummary, SequenceModel};

pub use flowcast_artifact::{ArtifactPaths, Lifecycle};
