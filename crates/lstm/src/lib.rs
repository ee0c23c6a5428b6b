//! Stacked LSTM window regressor.
//!
//! [`Lstm`] learns a mapping from a fixed-length window of scalar
//! observations to the next observation. It is trained with
//! backpropagation through time, mini-batch Adam and early stopping on a
//! held-out validation set.
//!
//! # Architecture
//!
//! ```text
//! window x[0..L]
//!   └─ LSTM layer 1 (hidden_sizes[0])  ── dropout ──┐
//!        └─ LSTM layer 2 (hidden_sizes[1]) ...       │ per time step
//!             └─ final hidden state ── dropout ── linear head ── ŷ
//! ```
//!
//! Dropout is active only during [`Lstm::fit`]. Weight initialisation,
//! shuffling and dropout masks all draw from one RNG seeded by
//! [`LstmConfig::seed`], so training is reproducible and
//! [`Lstm::predict`] is deterministic.

mod config;
mod error;
mod history;
mod layer;
mod network;
mod params;

pub use config::LstmConfig;
pub use error::LstmError;
pub use history::TrainHistory;
pub use network::Lstm;
