//! Per-epoch training record.

/// Loss curves and early-stopping outcome of one [`Lstm::fit`](crate::Lstm::fit).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainHistory {
    train_loss: Vec<f64>,
    validation_loss: Vec<f64>,
    best_epoch: Option<usize>,
    stopped_early: bool,
}

impl TrainHistory {
    pub(crate) fn push_train(&mut self, loss: f64) {
        self.train_loss.push(loss);
    }

    pub(crate) fn push_validation(&mut self, loss: f64) {
        self.validation_loss.push(loss);
    }

    pub(crate) fn set_best_epoch(&mut self, epoch: usize) {
        self.best_epoch = Some(epoch);
    }

    pub(crate) fn mark_stopped_early(&mut self) {
        self.stopped_early = true;
    }

    /// Mean training MSE per epoch (with dropout active).
    pub fn train_loss(&self) -> &[f64] {
        &self.train_loss
    }

    /// Validation MSE per epoch; empty when trained without validation.
    pub fn validation_loss(&self) -> &[f64] {
        &self.validation_loss
    }

    /// Zero-based epoch whose weights were kept, if validation was used.
    pub fn best_epoch(&self) -> Option<usize> {
        self.best_epoch
    }

    /// Number of epochs that ran.
    pub fn epochs_run(&self) -> usize {
        self.train_loss.len()
    }

    /// Returns `true` if early stopping ended training before the epoch budget.
    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }

    /// Validation loss of the restored epoch.
    pub fn best_validation_loss(&self) -> Option<f64> {
        self.best_epoch.map(|e| self.validation_loss[e])
    }
}
