//! The window-to-scalar regressor seam.

use flowcast_lstm::{Lstm, LstmError};
use flowcast_window::Windows;

/// Outcome of one [`SequenceModel::fit`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct FitSummary {
    /// Passes over the training windows that actually ran.
    pub epochs_run: usize,
    /// Training loss after the last epoch, if the model reports one.
    pub train_loss: Option<f64>,
    /// Best validation loss, if a validation set was used.
    pub validation_loss: Option<f64>,
    /// Whether training halted before the epoch budget.
    pub stopped_early: bool,
}

/// A regressor that predicts the next normalised value from a window.
///
/// Implementations work entirely in the scaled space; the
/// [`Forecaster`](crate::Forecaster) handles scaling and windowing.
pub trait SequenceModel {
    /// Error reported by [`fit`](Self::fit).
    type Error: std::error::Error;

    /// Fits on `train`, optionally monitoring `validation`.
    ///
    /// Models without an iterative optimiser may ignore `epochs` and
    /// `batch_size`.
    fn fit(
        &mut self,
        train: &Windows,
        validation: Option<&Windows>,
        epochs: usize,
        batch_size: usize,
    ) -> Result<FitSummary, Self::Error>;

    /// Predicts the value following `window`. Must be deterministic.
    fn predict(&self, window: &[f64]) -> f64;

    /// Predicts the label of every window, in order.
    fn predict_windows(&self, windows: &Windows) -> Vec<f64> {
        windows.iter().map(|(w, _)| self.predict(w)).collect()
    }

    /// Window length the model was fitted on, if it tracks one.
    fn window_len_hint(&self) -> Option<usize> {
        None
    }
}

impl SequenceModel for Lstm {
    type Error = LstmError;

    fn fit(
        &mut self,
        train: &Windows,
        validation: Option<&Windows>,
        epochs: usize,
        batch_size: usize,
    ) -> Result<FitSummary, LstmError> {
        let history = Lstm::fit(self, train, validation, epochs, batch_size)?;
        Ok(FitSummary {
            epochs_run: history.epochs_run(),
            train_loss: history.train_loss().last().copied(),
            validation_loss: history.best_validation_loss(),
            stopped_early: history.stopped_early(),
        })
    }

    fn predict(&self, window: &[f64]) -> f64 {
        Lstm::predict(self, window)
    }

    fn window_len_hint(&self) -> Option<usize> {
        self.window_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcast_lstm::LstmConfig;

    #[test]
    fn lstm_summary_mirrors_history() {
        let series: Vec<f64> = (0..40).map(|i| 0.5 + 0.3 * (i as f64 * 0.4).sin()).collect();
        let windows = Windows::new(&series, 5).unwrap();
        let (train, validation) = windows.split_fraction(0.25).unwrap();

        let config = LstmConfig::new().with_hidden_sizes(vec![3]).with_dropout(0.0);
        let mut net = Lstm::new(config).unwrap();
        let summary = SequenceModel::fit(&mut net, &train, Some(&validation), 3, 4).unwrap();

        assert!(summary.epochs_run <= 3);
        assert!(summary.train_loss.is_some_and(f64::is_finite));
        assert!(summary.validation_loss.is_some());
        assert_eq!(net.window_len_hint(), Some(5));
        assert_eq!(net.predict_windows(&validation).len(), validation.len());
    }
}
