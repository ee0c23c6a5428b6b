//! Labelled contextual samples for the load regressor.

use flowcast_regress::{Dataset, N_FEATURES, RegressError, TrafficConditions, Weather};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::{clip_load, is_rush_hour};

const BASE_LOAD: f64 = 30.0;
const HOLIDAY_PROBABILITY: f64 = 0.1;
const NOISE_SD: f64 = 5.0;

/// Noise-free load for `conditions`, clipped to `[0, 100]`.
///
/// `30 × rush(2.0) × weekday(1.5) × weather × holiday(0.7)` with weather
/// factors 1.0, 1.2, 1.5 and 1.8 for clear, cloudy, rain and snow.
pub fn expected_load(conditions: &TrafficConditions) -> f64 {
    let rush = if is_rush_hour(conditions.hour) { 2.0 } else { 1.0 };
    let weekday = if conditions.day_of_week < 5 { 1.5 } else { 1.0 };
    let weather = match conditions.weather {
        Weather::Clear => 1.0,
        Weather::Cloudy => 1.2,
        Weather::Rain => 1.5,
        Weather::Snow => 1.8,
    };
    let holiday = if conditions.is_holiday { 0.7 } else { 1.0 };
    clip_load(BASE_LOAD * rush * weekday * weather * holiday)
}

/// Draws `n` random conditions and their noisy loads.
///
/// Hour, weekday and weather are uniform, temperature is U(0, 40) and 10%
/// of rows are holidays. Each target is [`expected_load`] plus N(0, 5)
/// noise, clipped again to `[0, 100]`.
///
/// # Errors
///
/// Returns [`RegressError::InvalidInput`] when `n == 0`.
pub fn traffic_samples(n: usize, seed: u64) -> Result<Dataset, RegressError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut features = Vec::with_capacity(n * N_FEATURES);
    let mut targets = Vec::with_capacity(n);

    for _ in 0..n {
        let conditions = TrafficConditions {
            hour: rng.random_range(0..24),
            day_of_week: rng.random_range(0..7),
            weather: *Weather::ALL.choose(&mut rng).unwrap_or(&Weather::Clear),
            temperature: rng.random_range(0.0..40.0),
            is_holiday: rng.random_bool(HOLIDAY_PROBABILITY),
        };
        let noise: f64 = rng.sample(StandardNormal);
        features.extend(conditions.to_features());
        targets.push(clip_load(expected_load(&conditions) + NOISE_SD * noise));
    }
    Dataset::new(features, N_FEATURES, targets)
}
