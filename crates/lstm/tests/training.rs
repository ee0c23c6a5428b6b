//! Integration tests for LSTM training behaviour.

use approx::assert_relative_eq;
use flowcast_lstm::{Lstm, LstmConfig};
use flowcast_window::Windows;

/// A daily-cycle signal already squashed into [0, 1].
fn cycle(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 0.5 + 0.4 * (2.0 * std::f64::consts::PI * (i % 24) as f64 / 24.0).sin())
        .collect()
}

fn small_config() -> LstmConfig {
    LstmConfig::new()
        .with_hidden_sizes(vec![8])
        .with_dropout(0.0)
        .with_learning_rate(0.01)
        .with_seed(11)
}

#[test]
fn training_reduces_loss() {
    let windows = Windows::new(&cycle(200), 12).unwrap();
    let mut net = Lstm::new(small_config()).unwrap();
    let before = net.mse(&windows);

    let history = net.fit(&windows, None, 30, 16).unwrap();

    let losses = history.train_loss();
    assert_eq!(losses.len(), 30);
    assert!(losses[29] < losses[0], "loss did not decrease: {losses:?}");
    assert!(net.mse(&windows) < before);
    assert!(net.is_fitted());
}

#[test]
fn early_stopping_restores_best_epoch() {
    let windows = Windows::new(&cycle(120), 12).unwrap();
    let (train, val) = windows.split_fraction(0.25).unwrap();

    // A huge min_delta means no epoch after the first counts as improvement.
    let config = small_config().with_patience(2).with_min_delta(1e9);
    let mut net = Lstm::new(config).unwrap();
    let history = net.fit(&train, Some(&val), 50, 8).unwrap();

    assert!(history.stopped_early());
    assert_eq!(history.epochs_run(), 3);
    assert_eq!(history.best_epoch(), Some(0));
    assert_eq!(history.validation_loss().len(), 3);
    assert_relative_eq!(
        net.mse(&val),
        history.best_validation_loss().unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn validation_without_windows_trains_all_epochs() {
    let windows = Windows::new(&cycle(60), 12).unwrap();
    let empty = Windows::new(&[], 12).unwrap();
    let mut net = Lstm::new(small_config().with_patience(1)).unwrap();
    let history = net.fit(&windows, Some(&empty), 4, 8).unwrap();
    assert_eq!(history.epochs_run(), 4);
    assert!(!history.stopped_early());
    assert!(history.best_epoch().is_none());
}

#[test]
fn training_is_reproducible() {
    let windows = Windows::new(&cycle(80), 8).unwrap();
    let config = LstmConfig::new()
        .with_hidden_sizes(vec![4, 4])
        .with_dropout(0.2)
        .with_seed(5);

    let mut a = Lstm::new(config.clone()).unwrap();
    let mut b = Lstm::new(config).unwrap();
    let ha = a.fit(&windows, None, 3, 10).unwrap();
    let hb = b.fit(&windows, None, 3, 10).unwrap();

    assert_eq!(ha, hb);
    assert_eq!(a, b);
}

#[test]
fn refit_starts_from_fresh_weights() {
    let windows = Windows::new(&cycle(80), 8).unwrap();
    let mut net = Lstm::new(small_config()).unwrap();
    net.fit(&windows, None, 2, 8).unwrap();
    let first = net.clone();
    net.fit(&windows, None, 2, 8).unwrap();
    assert_eq!(net, first);
}

#[test]
fn serde_round_trip_preserves_predictions() {
    let windows = Windows::new(&cycle(60), 6).unwrap();
    let mut net = Lstm::new(LstmConfig::new().with_hidden_sizes(vec![3, 2])).unwrap();
    net.fit(&windows, None, 2, 8).unwrap();

    let json = serde_json::to_string(&net).unwrap();
    let restored: Lstm = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.window_len(), Some(6));
    for (w, _) in windows.iter() {
        assert_eq!(restored.predict(w), net.predict(w));
    }
}
