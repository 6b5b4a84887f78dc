//! Model constants. Concentrations are in ng/mL, doses in mg/L, temperatures
//! in °C and times in hours. Rate constants are in 1/h.

// --- Rate model ---

/// Rate constant with no dose and no temperature contribution (1/h).
pub const DEFAULT_BASELINE_K: f64 = 0.002;

/// Rate constant contribution per mg/L of treatment compound.
pub const DEFAULT_DOSE_K_WEIGHT: f64 = 0.0006;

/// Rate constant contribution per °C above [`DEFAULT_REFERENCE_TEMPERATURE_C`].
pub const DEFAULT_TEMPERATURE_K_WEIGHT: f64 = 0.0008;

/// Temperature at and below which the temperature term contributes nothing.
pub const DEFAULT_REFERENCE_TEMPERATURE_C: f64 = 25.0;

/// Rate multiplier for ambient light exposure.
pub const AMBIENT_LIGHT_FACTOR: f64 = 1.15;

/// Rate multiplier for UV photostimulation.
pub const UV_LIGHT_FACTOR: f64 = 1.6;

/// Rate multiplier applied when an adsorbent is present.
pub const ADSORBENT_FACTOR: f64 = 1.5;

/// Upper bound on simulation steps. Durations beyond this many hours are
/// divided into this many equal steps instead of hourly ones.
pub const MAX_SIMULATION_STEPS: usize = 1_000;

// --- Efficiency model ---

/// Efficiency offset (percent) when every weighted term vanishes.
///
/// # Examples
///
/// ```
/// use toxisim_core::constants::DEFAULT_EFFICIENCY_OFFSET;
/// assert_eq!(DEFAULT_EFFICIENCY_OFFSET, 5.0);
/// ```
pub const DEFAULT_EFFICIENCY_OFFSET: f64 = 5.0;

/// Weight of the `dose * ln(1 + hours)` term.
pub const DEFAULT_EFFICIENCY_DOSE_WEIGHT: f64 = 0.12;

/// Weight of the temperature term.
pub const DEFAULT_EFFICIENCY_TEMPERATURE_WEIGHT: f64 = 0.045;

/// Weight of the `dose * temperature / 10` interaction term.
pub const DEFAULT_EFFICIENCY_INTERACTION_WEIGHT: f64 = 0.015;

/// Divisor applied to the dose-temperature interaction term.
pub const INTERACTION_SCALE: f64 = 10.0;

/// Lowest efficiency a prediction may report (percent).
pub const EFFICIENCY_MIN: f64 = 0.0;

/// Highest efficiency a prediction may report (percent).
pub const EFFICIENCY_MAX: f64 = 100.0;

// --- Summaries ---

/// Reduction below this percentage is classed as low removal.
pub const LOW_REMOVAL_PERCENT: f64 = 30.0;

/// Reduction below this percentage (and not low) is classed as moderate removal.
pub const MODERATE_REMOVAL_PERCENT: f64 = 60.0;

/// EU maximum residue level for AFM1 in milk (µg/L).
pub const EU_AFM1_LIMIT: f64 = 0.05;

// --- Sweeps ---

/// Doses (mg/L) used by the default dose sensitivity sweep.
pub const DEFAULT_DOSE_SWEEP: [f64; 6] = [0.0, 1.0, 2.5, 5.0, 10.0, 20.0];

/// Temperatures (°C) used by the default rate-vs-temperature sweep.
pub const DEFAULT_TEMPERATURE_SWEEP: [f64; 6] = [15.0, 20.0, 25.0, 30.0, 35.0, 40.0];

// --- Configuration ---

/// File name of the model parameter file inside the config directory.
pub const DEFAULT_MODEL_FILE: &str = "ml_model.json";

/// Application directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "toxisim";

/// Prefix for environment overrides, e.g. `TOXISIM__PARAMETERS__OFFSET=6`.
pub const ENV_PREFIX: &str = "TOXISIM";

/// Separator between nested keys in environment overrides.
pub const ENV_SEPARATOR: &str = "__";
