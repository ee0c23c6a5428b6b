//! Synthetic data for exercising the forecaster and the load regressor.
//!
//! | Generator | Output | Consumer |
//! |-----------|--------|----------|
//! | [`congestion_series`] | hourly congestion levels with calendar columns | `flowcast-forecast` |
//! | [`traffic_samples`] | contextual feature rows with load targets | `flowcast-regress` |
//!
//! Both generators are seeded and deterministic, and keep every value in
//! the `[0, 100]` load domain.

mod congestion;
mod traffic;

pub use congestion::{CongestionSeries, SERIES_START, congestion_series};
pub use traffic::{expected_load, traffic_samples};

/// Hours 07–09 and 17–19.
pub(crate) fn is_rush_hour(hour: u32) -> bool {
    (7..=9).contains(&hour) || (17..=19).contains(&hour)
}

pub(crate) fn clip_load(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
