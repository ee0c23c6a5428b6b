//! Forecast command: load saved congestion artifacts and forecast from a
//! JSON history.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{info, info_span};

use flowcast_forecast::{Forecaster, ForecasterConfig, LinearWindowModel, SequenceModel};
use flowcast_lstm::Lstm;
use flowcast_scale::MinMaxScaler;

use crate::cli::ForecastArgs;
use crate::convert::{self, ModelKind};

/// Run the forecast command.
pub fn run(args: ForecastArgs) -> Result<()> {
    let _cmd = info_span!("forecast").entered();
    let config = crate::config::load(args.config.as_deref())?;
    let cfg = &config.congestion;

    let history = read_series(&args.history)?;
    let horizon = args.horizon.unwrap_or(cfg.horizon);
    let forecaster_config = convert::build_forecaster_config(cfg)?;

    let values = match convert::parse_model_kind(&cfg.model)? {
        ModelKind::Lstm => load_and_forecast::<Lstm>(forecaster_config, &history, horizon)?,
        ModelKind::Linear => {
            load_and_forecast::<LinearWindowModel>(forecaster_config, &history, horizon)?
        }
    };

    let out = serde_json::to_string_pretty(&json!({ "horizon": horizon, "forecast": values }))
        .context("failed to encode forecast")?;
    println!("{out}");
    Ok(())
}

fn load_and_forecast<M>(config: ForecasterConfig, history: &[f64], horizon: usize) -> Result<Vec<f64>>
where
    M: SequenceModel + DeserializeOwned,
{
    let model_path = config.artifacts().model().to_path_buf();
    let forecaster = Forecaster::<M, MinMaxScaler>::load(config)
        .with_context(|| format!("failed to load artifacts: {}", model_path.display()))?;
    info!(n_history = history.len(), horizon, "forecasting");
    Ok(forecaster.forecast(history, horizon)?)
}

/// Reads a JSON array of observations, oldest first.
pub(crate) fn read_series(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read series: {}", path.display()))?;
    let series: Vec<f64> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse JSON array: {}", path.display()))?;
    info!(path = %path.display(), n = series.len(), "series loaded");
    Ok(series)
}
