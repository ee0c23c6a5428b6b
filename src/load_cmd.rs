//! Load command: train, evaluate and save the traffic load regressor.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use tracing::{info, info_span};

use flowcast_forest::RandomForest;
use flowcast_regress::{FeatureRegressor, TrafficConditions, Weather};
use flowcast_scale::StandardScaler;
use flowcast_synth::traffic_samples;

use crate::cli::LoadArgs;
use crate::convert;

/// Monday 08:00, clear, 25 °C.
const SAMPLE_CONDITIONS: TrafficConditions = TrafficConditions {
    hour: 8,
    day_of_week: 1,
    weather: Weather::Clear,
    temperature: 25.0,
    is_holiday: false,
};

/// Run the load regressor pipeline.
pub fn run(args: LoadArgs) -> Result<()> {
    let _cmd = info_span!("load").entered();
    let config = crate::config::load(args.config.as_deref())?;
    let cfg = &config.traffic;

    let regressor_config = convert::build_regressor_config(cfg)?;
    let forest = RandomForest::new(convert::build_forest_config(&cfg.forest)?)
        .context("failed to build forest")?;

    info!(samples = cfg.samples, seed = cfg.seed, "generating traffic samples");
    let data = traffic_samples(cfg.samples, cfg.seed)?;
    let mut rng = StdRng::seed_from_u64(cfg.split_seed);
    let (train, test) = data
        .split_random(cfg.test_fraction, &mut rng)
        .context("failed to split traffic samples")?;

    let mut regressor = FeatureRegressor::new(regressor_config, forest, StandardScaler::new())?;
    regressor.train(&train).context("training failed")?;
    let score = regressor.evaluate(&test)?;

    regressor.save().context("failed to save traffic artifacts")?;
    let artifacts = regressor.config().artifacts();
    info!(
        model = %artifacts.model().display(),
        scaler = %artifacts.scaler().display(),
        "artifacts saved"
    );

    let sample = regressor.predict_conditions(&SAMPLE_CONDITIONS)?;

    let report = json!({
        "n_train": train.n_rows(),
        "n_test": test.n_rows(),
        "test": { "mse": score.mse, "r2": score.r2, "n": score.n },
        "model_path": artifacts.model().display().to_string(),
        "scaler_path": artifacts.scaler().display().to_string(),
        "sample": { "conditions": SAMPLE_CONDITIONS, "load": sample },
    });
    let out = serde_json::to_string_pretty(&report).context("failed to encode report")?;
    println!("{out}");
    Ok(())
}
