//! toxisim: command-line front end for the ToxiSim kinetics models.
//!
//! Loads the model configuration once, then runs a single simulation,
//! prediction, report, sweep or fit and prints the result as text or JSON.

mod output;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use toxisim_core::config::ConfigLoader;
use toxisim_core::constants::{DEFAULT_DOSE_SWEEP, DEFAULT_TEMPERATURE_SWEEP};
use toxisim_core::types::{LightMode, Modifiers, ObservedPoint, SimulationInput};
use toxisim_kinetics::{Toolkit, dose_sweep, efficiency_grid, fit_first_order, rate_vs_temperature};
use tracing::{debug, info};

use crate::output::{OutputFormat, SweepOutput};

/// ToxiSim: first-order toxin decay and treatment efficiency.
#[derive(Parser, Debug)]
#[command(name = "toxisim")]
#[command(version, about = "Simulate toxin decay under treatment and predict removal efficiency")]
struct Cli {
    /// Model parameter file (JSON or TOML). Default: <config dir>/toxisim/ml_model.json
    #[arg(short, long, global = true, env = "TOXISIM_CONFIG")]
    config: Option<PathBuf>,

    /// Fail on a missing or invalid model file instead of using the defaults.
    #[arg(long, global = true)]
    strict_config: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Result output format.
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate the concentration time series.
    Simulate(InputArgs),
    /// Predict treatment efficiency.
    Predict(PredictArgs),
    /// Simulate, predict and summarise in one run.
    Report(InputArgs),
    /// Dose sensitivity, rate vs temperature, and the efficiency grid.
    Sweep(SweepArgs),
    /// Fit a first-order rate constant to observed points.
    Fit(FitArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Light {
    Dark,
    Ambient,
    Uv,
}

impl From<Light> for LightMode {
    fn from(light: Light) -> Self {
        match light {
            Light::Dark => LightMode::Dark,
            Light::Ambient => LightMode::Ambient,
            Light::Uv => LightMode::Uv,
        }
    }
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Initial toxin concentration (ng/mL).
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    initial: f64,

    /// Treatment compound dose (mg/L).
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    dose: f64,

    /// Reaction temperature (°C).
    #[arg(long, default_value_t = 25.0, allow_negative_numbers = true)]
    temperature: f64,

    /// Reaction time (h).
    #[arg(long, default_value_t = 24.0, allow_negative_numbers = true)]
    hours: f64,

    /// Light exposure during the reaction.
    #[arg(long, value_enum, default_value = "dark")]
    light: Light,

    /// An adsorbent is present.
    #[arg(long)]
    adsorbent: bool,
}

impl InputArgs {
    fn to_input(&self) -> SimulationInput {
        SimulationInput::new(self.initial, self.dose, self.temperature, self.hours).with_modifiers(
            Modifiers {
                light: self.light.into(),
                adsorbent: self.adsorbent,
            },
        )
    }
}

#[derive(Args, Debug)]
struct PredictArgs {
    /// Treatment compound dose (mg/L).
    #[arg(long, allow_negative_numbers = true)]
    dose: f64,

    /// Reaction temperature (°C).
    #[arg(long, allow_negative_numbers = true)]
    temperature: f64,

    /// Reaction time (h).
    #[arg(long, default_value_t = 24.0, allow_negative_numbers = true)]
    hours: f64,
}

#[derive(Args, Debug)]
struct SweepArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Doses to sweep (comma-separated, mg/L).
    #[arg(long, value_delimiter = ',')]
    doses: Vec<f64>,

    /// Temperatures to sweep (comma-separated, °C).
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    temperatures: Vec<f64>,
}

#[derive(Args, Debug)]
struct FitArgs {
    /// Observed point as `time:concentration`; repeat or comma-separate.
    #[arg(long = "point", required = true, value_delimiter = ',', value_parser = parse_point)]
    points: Vec<ObservedPoint>,
}

fn parse_point(s: &str) -> Result<ObservedPoint, String> {
    let (t, c) = s
        .split_once(':')
        .ok_or_else(|| format!("expected time:concentration, got {s:?}"))?;
    let time_hours = t
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad time {t:?}: {e}"))?;
    let concentration = c
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad concentration {c:?}: {e}"))?;
    Ok(ObservedPoint::new(time_hours, concentration))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    let toolkit = build_toolkit(cli.config.as_deref(), cli.strict_config)?;
    run(&toolkit, cli.command, cli.output)
}

fn build_toolkit(config: Option<&Path>, strict: bool) -> Result<Toolkit> {
    let loader = ConfigLoader::new().discover(config);
    if strict {
        return Toolkit::load_strict(&loader).context("model config rejected");
    }
    let loaded = loader.load();
    info!(source = ?loaded.source, "model parameters");
    Ok(Toolkit::initialize(loaded))
}

fn run(toolkit: &Toolkit, command: Commands, format: OutputFormat) -> Result<()> {
    match command {
        Commands::Simulate(args) => {
            let input = args.to_input();
            let result = toolkit.simulate(&input).context("simulation rejected input")?;
            debug!(points = result.len(), "simulate done");
            output::print_simulation(&result, format)
        }
        Commands::Predict(args) => {
            let eff = toolkit
                .predict(args.dose, args.temperature, args.hours)
                .context("prediction rejected input")?;
            output::print_prediction(eff, format)
        }
        Commands::Report(args) => {
            let report = toolkit.report(&args.to_input()).context("report rejected input")?;
            output::print_report(&report, format)
        }
        Commands::Sweep(args) => {
            let base = args.input.to_input();
            let doses = if args.doses.is_empty() {
                DEFAULT_DOSE_SWEEP.to_vec()
            } else {
                args.doses
            };
            let temperatures = if args.temperatures.is_empty() {
                DEFAULT_TEMPERATURE_SWEEP.to_vec()
            } else {
                args.temperatures
            };

            let curves = dose_sweep(toolkit.simulator(), &base, &doses).context("dose sweep")?;
            let rates = rate_vs_temperature(toolkit.rate_model(), &base, &temperatures)
                .context("temperature sweep")?;
            let grid = efficiency_grid(toolkit.predictor(), &doses, &temperatures, base.duration_hours)
                .context("efficiency grid")?;
            let optimum = grid.optimum();

            output::print_sweep(
                &SweepOutput {
                    curves,
                    rates,
                    grid,
                    optimum,
                },
                format,
            )
        }
        Commands::Fit(args) => {
            let fit = fit_first_order(&args.points).context("fit failed")?;
            output::print_fit(&fit, format)
        }
    }
}

/// Logs go to stderr so stdout carries only results.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
