use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flowcast_regress::Weather;

/// Flowcast traffic congestion forecaster.
#[derive(Parser)]
#[command(
    name = "flowcast",
    version,
    about = "Short-term traffic congestion forecasting and load regression"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Train, evaluate and save the congestion forecaster, then forecast.
    Congestion(CongestionArgs),
    /// Forecast from saved congestion artifacts.
    Forecast(ForecastArgs),
    /// Train, evaluate and save the traffic load regressor.
    Load(LoadArgs),
    /// Predict traffic load from saved regressor artifacts.
    Predict(PredictArgs),
}

/// Arguments for the `congestion` subcommand.
#[derive(clap::Args)]
pub struct CongestionArgs {
    /// Path to TOML configuration file. Built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON array of hourly observations. Synthetic data when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override the forecast horizon from config.
    #[arg(long)]
    pub horizon: Option<usize>,
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// JSON array of recent observations, oldest first.
    #[arg(long)]
    pub history: PathBuf,

    /// Override the forecast horizon from config.
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Path to TOML configuration file. Built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `load` subcommand.
#[derive(clap::Args)]
pub struct LoadArgs {
    /// Path to TOML configuration file. Built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `predict` subcommand.
#[derive(clap::Args)]
pub struct PredictArgs {
    /// Hour of day (0-23).
    #[arg(long)]
    pub hour: u32,

    /// Day of week (0 = Monday .. 6 = Sunday).
    #[arg(long)]
    pub day: u32,

    /// Weather: clear, cloudy, rain or snow.
    #[arg(long, default_value = "clear")]
    pub weather: Weather,

    /// Air temperature in degrees Celsius.
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: f64,

    /// Mark the day as a public holiday.
    #[arg(long)]
    pub holiday: bool,

    /// Path to TOML configuration file. Built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
