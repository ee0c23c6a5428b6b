//! Predict command: load the saved regressor and predict one load value.

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{info, info_span};

use flowcast_forest::RandomForest;
use flowcast_regress::{FeatureRegressor, TrafficConditions};
use flowcast_scale::StandardScaler;

use crate::cli::PredictArgs;
use crate::convert;

/// Run the predict command.
pub fn run(args: PredictArgs) -> Result<()> {
    let _cmd = info_span!("predict").entered();
    let config = crate::config::load(args.config.as_deref())?;
    let regressor_config = convert::build_regressor_config(&config.traffic)?;

    let model_path = regressor_config.artifacts().model().to_path_buf();
    let regressor = FeatureRegressor::<RandomForest, StandardScaler>::load(regressor_config)
        .with_context(|| format!("failed to load artifacts: {}", model_path.display()))?;

    let conditions = conditions_from(&args);
    let load = regressor
        .predict_conditions(&conditions)
        .context("prediction failed")?;
    info!(load, "predicted traffic load");

    let out = serde_json::to_string_pretty(&json!({ "conditions": conditions, "load": load }))
        .context("failed to encode prediction")?;
    println!("{out}");
    Ok(())
}

fn conditions_from(args: &PredictArgs) -> TrafficConditions {
    TrafficConditions {
        hour: args.hour,
        day_of_week: args.day,
        weather: args.weather,
        temperature: args.temperature,
        is_holiday: args.holiday,
    }
}
