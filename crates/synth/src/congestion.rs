//! Hourly congestion series with daily, weekly and rush-hour structure.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::{clip_load, is_rush_hour};

/// First timestamp of every generated series.
pub const SERIES_START: NaiveDateTime = match NaiveDate::from_ymd_opt(2023, 1, 1) {
    Some(date) => date.and_time(NaiveTime::MIN),
    None => panic!("invalid series start date"),
};

/// Probability that an hour carries an incident or event.
const EVENT_PROBABILITY: f64 = 0.05;
/// Standard deviation of the additive observation noise.
const NOISE_SD: f64 = 5.0;

/// A generated hourly series and its calendar columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CongestionSeries {
    /// Congestion level per hour, in `[0, 100]`.
    pub values: Vec<f64>,
    /// Hour of day, 0..=23.
    pub hours: Vec<u32>,
    /// Day of week, 0 = Monday ..= 6 = Sunday.
    pub days_of_week: Vec<u32>,
    /// Start of each hour.
    pub timestamps: Vec<NaiveDateTime>,
}

impl CongestionSeries {
    /// Number of hours.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` for an empty series.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Generates `n` hourly congestion values starting at [`SERIES_START`].
///
/// Each hour's level is `30 + 20 sin(2πh/24)`, scaled by 1.5 on weekdays,
/// by 1.5 during rush hours (07–09 and 17–19) and, with probability 5%, by
/// an event factor drawn from U(1.5, 2.5). Gaussian noise with σ = 5 is
/// added and the result is clipped to `[0, 100]`.
///
/// # Example
///
/// ```
/// let s = flowcast_synth::congestion_series(48, 42);
/// assert_eq!(s.len(), 48);
/// assert!(s.values.iter().all(|v| (0.0..=100.0).contains(v)));
/// assert_eq!(s.hours[25], 1);
/// ```
pub fn congestion_series(n: usize, seed: u64) -> CongestionSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut series = CongestionSeries {
        values: Vec::with_capacity(n),
        hours: Vec::with_capacity(n),
        days_of_week: Vec::with_capacity(n),
        timestamps: Vec::with_capacity(n),
    };

    let mut ts = SERIES_START;
    for _ in 0..n {
        let hour = ts.hour();
        let day = ts.weekday().num_days_from_monday();

        let mut level = 30.0 + 20.0 * (std::f64::consts::TAU * f64::from(hour) / 24.0).sin();
        if day < 5 {
            level *= 1.5;
        }
        if is_rush_hour(hour) {
            level *= 1.5;
        }
        if rng.random_bool(EVENT_PROBABILITY) {
            level *= rng.random_range(1.5..2.5);
        }
        let noise: f64 = rng.sample(StandardNormal);
        level += NOISE_SD * noise;

        series.values.push(clip_load(level));
        series.hours.push(hour);
        series.days_of_week.push(day);
        series.timestamps.push(ts);
        ts += TimeDelta::hours(1);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_a_sunday_midnight() {
        let s = congestion_series(30, 0);
        assert_eq!(s.timestamps[0], SERIES_START);
        assert_eq!(s.hours[0], 0);
        assert_eq!(s.days_of_week[0], 6);
        // Monday 2023-01-02 begins at index 24
        assert_eq!(s.days_of_week[24], 0);
        assert_eq!(s.hours[29], 5);
    }

    #[test]
    fn seeded_and_bounded() {
        let a = congestion_series(500, 9);
        let b = congestion_series(500, 9);
        assert_eq!(a, b);
        assert_ne!(a.values, congestion_series(500, 10).values);
        assert!(a.values.iter().all(|v| (0.0..=100.0).contains(v)));
    }

    #[test]
    fn weekday_rush_exceeds_weekend_night() {
        // average over four weeks smooths the noise
        let s = congestion_series(24 * 28, 3);
        let mean_where = |pred: &dyn Fn(usize) -> bool| {
            let picked: Vec<f64> = (0..s.len()).filter(|&i| pred(i)).map(|i| s.values[i]).collect();
            picked.iter().sum::<f64>() / picked.len() as f64
        };
        let rush = mean_where(&|i| s.days_of_week[i] < 5 && s.hours[i] == 8);
        let night = mean_where(&|i| s.days_of_week[i] >= 5 && s.hours[i] == 20);
        assert!(rush > night + 20.0, "rush {rush}, night {night}");
    }

    #[test]
    fn empty_series() {
        assert!(congestion_series(0, 1).is_empty());
    }
}
