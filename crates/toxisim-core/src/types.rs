//! Data model shared by the simulator, the predictor and their callers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ADSORBENT_FACTOR, AMBIENT_LIGHT_FACTOR, MAX_SIMULATION_STEPS, UV_LIGHT_FACTOR,
};
use crate::error::InputError;

/// Reject NaN and infinities for a named field.
pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NonFinite { field, value })
    }
}

/// Light exposure during the reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightMode {
    /// No photostimulation.
    #[default]
    Dark,
    /// Ordinary room light.
    Ambient,
    /// UV photostimulation.
    Uv,
}

impl LightMode {
    /// Multiplier applied to the rate constant.
    pub fn rate_factor(&self) -> f64 {
        match self {
            Self::Dark => 1.0,
            Self::Ambient => AMBIENT_LIGHT_FACTOR,
            Self::Uv => UV_LIGHT_FACTOR,
        }
    }
}

impl fmt::Display for LightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dark => "dark",
            Self::Ambient => "ambient",
            Self::Uv => "uv",
        };
        f.write_str(s)
    }
}

/// Qualitative reaction conditions that scale the rate constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub light: LightMode,
    pub adsorbent: bool,
}

impl Modifiers {
    /// Combined multiplier for the rate constant. Always `>= 1`.
    pub fn rate_factor(&self) -> f64 {
        let adsorbent = if self.adsorbent { ADSORBENT_FACTOR } else { 1.0 };
        self.light.rate_factor() * adsorbent
    }
}

/// One experimental setup, built per user action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Toxin concentration at `t = 0` (ng/mL).
    pub initial_concentration: f64,
    /// Treatment compound dose (mg/L).
    pub dose: f64,
    /// Reaction temperature (°C).
    pub temperature: f64,
    /// Reaction time (h).
    pub duration_hours: f64,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl SimulationInput {
    /// Input with default modifiers (dark, no adsorbent).
    pub fn new(initial_concentration: f64, dose: f64, temperature: f64, duration_hours: f64) -> Self {
        Self {
            initial_concentration,
            dose,
            temperature,
            duration_hours,
            modifiers: Modifiers::default(),
        }
    }

    /// Replace the modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check every field against its domain.
    pub fn validate(&self) -> Result<(), InputError> {
        let initial = ensure_finite("initial concentration", self.initial_concentration)?;
        if initial < 0.0 {
            return Err(InputError::NegativeConcentration(initial));
        }
        validate_dose(self.dose)?;
        ensure_finite("temperature", self.temperature)?;
        validate_duration(self.duration_hours)?;
        Ok(())
    }

    /// Number of simulation steps: `floor(duration)`, clamped to
    /// `1..=MAX_SIMULATION_STEPS`.
    ///
    /// Only meaningful for a validated input.
    ///
    /// # Examples
    ///
    /// ```
    /// use toxisim_core::types::SimulationInput;
    /// assert_eq!(SimulationInput::new(1.0, 0.0, 20.0, 24.0).step_count(), 24);
    /// assert_eq!(SimulationInput::new(1.0, 0.0, 20.0, 0.5).step_count(), 1);
    /// ```
    pub fn step_count(&self) -> usize {
        let steps = self.duration_hours.floor().min(MAX_SIMULATION_STEPS as f64);
        (steps as usize).clamp(1, MAX_SIMULATION_STEPS)
    }
}

/// Dose must be finite and non-negative.
pub fn validate_dose(dose: f64) -> Result<f64, InputError> {
    let dose = ensure_finite("dose", dose)?;
    if dose < 0.0 {
        return Err(InputError::NegativeDose(dose));
    }
    Ok(dose)
}

/// Duration must be finite and strictly positive.
pub fn validate_duration(hours: f64) -> Result<f64, InputError> {
    let hours = ensure_finite("duration", hours)?;
    if hours <= 0.0 {
        return Err(InputError::NonPositiveDuration(hours));
    }
    Ok(hours)
}

/// First-order rate constant in 1/h.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateConstant(pub f64);

impl RateConstant {
    pub fn per_hour(&self) -> f64 {
        self.0
    }

    /// Time for the concentration to halve, `ln 2 / k`. `None` when `k <= 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use toxisim_core::types::RateConstant;
    /// let k = RateConstant(std::f64::consts::LN_2);
    /// assert!((k.half_life().unwrap() - 1.0).abs() < 1e-12);
    /// assert_eq!(RateConstant(0.0).half_life(), None);
    /// ```
    pub fn half_life(&self) -> Option<f64> {
        (self.0 > 0.0).then(|| std::f64::consts::LN_2 / self.0)
    }

    /// Fraction of the initial concentration left after `hours`.
    pub fn retention(&self, hours: f64) -> f64 {
        (-self.0 * hours).exp()
    }
}

impl fmt::Display for RateConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3e} 1/h", self.0)
    }
}

/// Concentration time series produced by the decay simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Hours, ascending and evenly spaced from 0 to the duration.
    pub time_points: Vec<f64>,
    /// Concentrations, pairwise with `time_points`.
    pub concentrations: Vec<f64>,
    pub rate: RateConstant,
}

impl SimulationResult {
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    pub fn initial_concentration(&self) -> f64 {
        self.concentrations.first().copied().unwrap_or(0.0)
    }

    pub fn final_concentration(&self) -> f64 {
        self.concentrations.last().copied().unwrap_or(0.0)
    }

    pub fn duration_hours(&self) -> f64 {
        self.time_points.last().copied().unwrap_or(0.0)
    }

    /// `(time, concentration)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time_points
            .iter()
            .copied()
            .zip(self.concentrations.iter().copied())
    }
}

/// Predicted treatment efficiency in percent, within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EfficiencyPrediction(pub f64);

impl EfficiencyPrediction {
    pub fn percent(&self) -> f64 {
        self.0
    }

    pub fn fraction(&self) -> f64 {
        self.0 / 100.0
    }
}

impl fmt::Display for EfficiencyPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

/// A measured `(time, concentration)` pair supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservedPoint {
    pub time_hours: f64,
    pub concentration: f64,
}

impl ObservedPoint {
    pub fn new(time_hours: f64, concentration: f64) -> Self {
        Self {
            time_hours,
            concentration,
        }
    }
}
