//! Round-trip integration tests: inverse_transform(transform(x)) == x.

use approx::assert_relative_eq;
use flowcast_scale::{MinMaxScaler, Scaler, StandardScaler};

fn daily_cycle(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 30.0 + 20.0 * (2.0 * std::f64::consts::PI * (i % 24) as f64 / 24.0).sin())
        .collect()
}

fn assert_round_trip<S: Scaler>(scaler: &mut S, data: &[f64], n_features: usize) {
    let scaled = scaler.fit_transform(data, n_features).unwrap();
    let restored = scaler.inverse_transform(&scaled).unwrap();
    assert_eq!(restored.len(), data.len());
    for (r, d) in restored.iter().zip(data) {
        assert_relative_eq!(*r, *d, epsilon = 1e-9);
    }
}

#[test]
fn minmax_round_trip_series() {
    assert_round_trip(&mut MinMaxScaler::new(), &daily_cycle(240), 1);
}

#[test]
fn standard_round_trip_series() {
    assert_round_trip(&mut StandardScaler::new(), &daily_cycle(240), 1);
}

#[test]
fn round_trip_multi_column() {
    let table: Vec<f64> = (0..60)
        .flat_map(|i| {
            let i = i as f64;
            [i % 24.0, (i * 3.0) % 7.0, 0.5 * i - 4.0]
        })
        .collect();
    assert_round_trip(&mut MinMaxScaler::new(), &table, 3);
    assert_round_trip(&mut StandardScaler::new(), &table, 3);
}

#[test]
fn minmax_training_data_within_unit_range() {
    let mut scaler = MinMaxScaler::new();
    let scaled = scaler.fit_transform(&daily_cycle(100), 1).unwrap();
    assert!(scaled.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn round_trip_values_outside_fitted_domain() {
    let mut scaler = MinMaxScaler::new();
    scaler.fit(&[10.0, 20.0], 1).unwrap();
    let unseen = [0.0, 15.0, 35.0];
    let back = scaler
        .inverse_transform(&scaler.transform(&unseen).unwrap())
        .unwrap();
    for (b, u) in back.iter().zip(&unseen) {
        assert_relative_eq!(*b, *u, epsilon = 1e-9);
    }
}

#[test]
fn serde_preserves_fitted_state() {
    let mut scaler = MinMaxScaler::new();
    scaler.fit(&daily_cycle(48), 1).unwrap();
    let json = serde_json::to_string(&scaler).unwrap();
    let restored: MinMaxScaler = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, scaler);
    assert_eq!(
        restored.transform(&[25.0]).unwrap(),
        scaler.transform(&[25.0]).unwrap()
    );
}
