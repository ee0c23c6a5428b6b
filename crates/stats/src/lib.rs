//! Statistical and error-metric helpers shared by the flowcast crates.
//!
//! Metric functions compare two equal-length slices pairwise. They do not
//! filter non-finite values: callers validate inputs before scoring.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Population variance (N denominator). Returns 0.0 if empty.
pub fn population_variance(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64
}

/// Population standard deviation (N denominator). Returns 0.0 if empty.
pub fn population_sd(data: &[f64]) -> f64 {
    population_variance(data).sqrt()
}

/// Mean squared error between `actual` and `predicted`.
///
/// Returns 0.0 for empty input.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    assert_eq!(
        actual.len(),
        predicted.len(),
        "mse: actual and predicted must have equal length"
    );
    if actual.is_empty() {
        return 0.0;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p) * (a - p))
        .sum::<f64>()
        / actual.len() as f64
}

/// Mean absolute error between `actual` and `predicted`.
///
/// Returns 0.0 for empty input.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    assert_eq!(
        actual.len(),
        predicted.len(),
        "mae: actual and predicted must have equal length"
    );
    if actual.is_empty() {
        return 0.0;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Coefficient of determination R² = 1 - SS_res / SS_tot.
///
/// A constant `actual` (SS_tot = 0) scores 1.0 for a perfect prediction
/// and 0.0 otherwise. Returns `None` for empty input.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn r2(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    assert_eq!(
        actual.len(),
        predicted.len(),
        "r2: actual and predicted must have equal length"
    );
    if actual.is_empty() {
        return None;
    }
    let m = mean(actual);
    let ss_tot: f64 = actual.iter().map(|a| (a - m) * (a - m)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p) * (a - p))
        .sum();

    if ss_tot == 0.0 {
        return Some(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Some(1.0 - ss_res / ss_tot)
}
