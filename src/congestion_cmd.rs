//! Congestion command: train, evaluate and save the sequence forecaster,
//! then forecast past the end of the series.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::json;
use tracing::{info, info_span};

use flowcast_forecast::{
    Forecaster, ForecasterConfig, LinearWindowModel, SequenceModel, TrainParams,
};
use flowcast_lstm::Lstm;
use flowcast_scale::MinMaxScaler;
use flowcast_synth::congestion_series;

use crate::cli::CongestionArgs;
use crate::convert::{self, ModelKind};
use crate::forecast_cmd::read_series;

/// Run the congestion training pipeline.
pub fn run(args: CongestionArgs) -> Result<()> {
    let _cmd = info_span!("congestion").entered();
    let config = crate::config::load(args.config.as_deref())?;
    let cfg = &config.congestion;

    let series = match &args.input {
        Some(path) => read_series(path)?,
        None => {
            info!(samples = cfg.samples, seed = cfg.seed, "generating synthetic congestion series");
            congestion_series(cfg.samples, cfg.seed).values
        }
    };
    let horizon = args.horizon.unwrap_or(cfg.horizon);

    let forecaster_config = convert::build_forecaster_config(cfg)?;
    let params = convert::build_train_params(&cfg.train);
    let kind = convert::parse_model_kind(&cfg.model)?;

    let report = match kind {
        ModelKind::Lstm => {
            let model = Lstm::new(convert::build_lstm_config(&cfg.lstm)?)
                .context("failed to build LSTM")?;
            pipeline(forecaster_config, model, &series, &params, cfg.test_fraction, horizon)?
        }
        ModelKind::Linear => {
            let model = LinearWindowModel::new(cfg.linear.ridge)
                .context("failed to build linear model")?;
            pipeline(forecaster_config, model, &series, &params, cfg.test_fraction, horizon)?
        }
    };

    let out = serde_json::to_string_pretty(&report).context("failed to encode report")?;
    println!("{out}");
    Ok(())
}

/// Number of windows kept for training when `test_fraction` of the
/// `n_windows` trailing windows are held out.
fn train_window_count(n_windows: usize, test_fraction: f64) -> usize {
    ((1.0 - test_fraction) * n_windows as f64).floor() as usize
}

fn pipeline<M>(
    config: ForecasterConfig,
    model: M,
    series: &[f64],
    params: &TrainParams,
    test_fraction: f64,
    horizon: usize,
) -> Result<serde_json::Value>
where
    M: SequenceModel + Clone + Serialize,
{
    let l = config.sequence_length();
    if !(0.0..1.0).contains(&test_fraction) {
        bail!("test_fraction must be in [0, 1), got {test_fraction}");
    }
    if series.len() <= l {
        bail!(
            "series has {} observations, need more than sequence_length {l}",
            series.len()
        );
    }
    let n_windows = series.len() - l;
    let split = train_window_count(n_windows, test_fraction);
    if split == 0 {
        bail!("test_fraction {test_fraction} leaves no training windows");
    }

    let mut forecaster = Forecaster::new(config, model, MinMaxScaler::new())?;
    let train = forecaster
        .train(&series[..split + l], params)
        .context("training failed")?;

    // Test windows reuse the last L training values as context.
    let test_windows = forecaster.scaled_windows(&series[split..])?;
    let evaluation = if test_windows.is_empty() {
        None
    } else {
        Some(forecaster.evaluate(&test_windows)?)
    };

    forecaster.save().context("failed to save congestion artifacts")?;
    let artifacts = forecaster.config().artifacts();
    info!(
        model = %artifacts.model().display(),
        scaler = %artifacts.scaler().display(),
        "artifacts saved"
    );

    let forecast = forecaster.forecast(series, horizon)?;

    Ok(json!({
        "n_observations": series.len(),
        "n_train": train.n_train,
        "n_validation": train.n_validation,
        "epochs_run": train.fit.epochs_run,
        "stopped_early": train.fit.stopped_early,
        "train_loss": train.fit.train_loss,
        "validation_loss": train.fit.validation_loss,
        "test": evaluation.map(|e| json!({ "mse": e.mse, "mae": e.mae, "n": e.n })),
        "model_path": artifacts.model().display().to_string(),
        "scaler_path": artifacts.scaler().display().to_string(),
        "forecast": forecast,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use flowcast_forecast::ArtifactPaths;

    #[test]
    fn train_window_count_floors() {
        assert_eq!(train_window_count(976, 0.2), 780);
        assert_eq!(train_window_count(10, 0.0), 10);
        assert_eq!(train_window_count(3, 0.9), 0);
    }

    #[test]
    fn pipeline_with_linear_model() {
        let dir = tempfile::tempdir().unwrap();
        let config = ForecasterConfig::new(ArtifactPaths::in_dir(dir.path(), "c"))
            .with_sequence_length(6);
        let series: Vec<f64> = (0..120u32)
            .map(|i| 50.0 + 20.0 * (f64::from(i) * std::f64::consts::TAU / 24.0).sin())
            .collect();
        let report = pipeline(
            config,
            LinearWindowModel::default(),
            &series,
            &TrainParams::default(),
            0.2,
            5,
        )
        .unwrap();

        assert_eq!(report["forecast"].as_array().unwrap().len(), 5);
        assert!(report["test"]["mse"].as_f64().unwrap() >= 0.0);
        assert!(dir.path().join("c_model.json").exists());
        assert!(dir.path().join("c_scaler.json").exists());
    }

    #[test]
    fn pipeline_rejects_short_series() {
        let dir = tempfile::tempdir().unwrap();
        let config = ForecasterConfig::new(ArtifactPaths::in_dir(dir.path(), "c"));
        let err = pipeline(
            config,
            LinearWindowModel::default(),
            &[1.0; 10],
            &TrainParams::default(),
            0.2,
            5,
        )
        .unwrap_err();
        assert!(err.to_string().contains("need more than"));
    }
}
