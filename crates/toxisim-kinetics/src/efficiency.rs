//! Log-linear efficiency regression with a dose-temperature interaction term.
//!
//! ```text
//! eff = offset
//!     + dose_weight * dose * ln(1 + hours)
//!     + temperature_weight * T
//!     + interaction_weight * dose * T / 10
//! ```
//!
//! The result is clamped to the configured bounds, which always lie within `[0, 100]`.
//! Each term saturates at `±f64::MAX` before summing, so any validated input
//! yields a finite raw value and a prediction.

use toxisim_core::config::{EfficiencyBounds, EfficiencyModelParameters};
use toxisim_core::constants::INTERACTION_SCALE;
use toxisim_core::error::InputError;
use toxisim_core::traits::EfficiencyModel;
use toxisim_core::types::{EfficiencyPrediction, ensure_finite, validate_dose, validate_duration};
use tracing::trace;

/// Efficiency predictor holding immutable model coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EfficiencyPredictor {
    params: EfficiencyModelParameters,
    bounds: EfficiencyBounds,
}

impl EfficiencyPredictor {
    pub fn new(params: EfficiencyModelParameters) -> Self {
        Self {
            params,
            bounds: EfficiencyBounds::default(),
        }
    }

    /// Narrow the clamp range. Bounds are expected to be validated.
    pub fn with_bounds(mut self, bounds: EfficiencyBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn params(&self) -> &EfficiencyModelParameters {
        &self.params
    }

    pub fn bounds(&self) -> &EfficiencyBounds {
        &self.bounds
    }
}

/// Clamp a non-NaN value into the finite range.
fn saturate(value: f64) -> f64 {
    value.clamp(-f64::MAX, f64::MAX)
}

impl EfficiencyModel for EfficiencyPredictor {
    fn raw_efficiency(&self, dose: f64, temperature: f64, duration_hours: f64) -> Result<f64, InputError> {
        let dose = validate_dose(dose)?;
        let temperature = ensure_finite("temperature", temperature)?;
        let hours = validate_duration(duration_hours)?;

        let p = &self.params;
        let dose_term = saturate(saturate(p.dose_weight * dose) * hours.ln_1p());
        let temperature_term = saturate(p.temperature_weight * temperature);
        let interaction_term =
            saturate(saturate(p.interaction_weight * dose) * temperature) / INTERACTION_SCALE;

        // Finite terms can overflow the sum to one infinity, never to NaN.
        Ok(saturate(p.offset + dose_term + temperature_term + interaction_term))
    }

    fn predict(
        &self,
        dose: f64,
        temperature: f64,
        duration_hours: f64,
    ) -> Result<EfficiencyPrediction, InputError> {
        let raw = self.raw_efficiency(dose, temperature, duration_hours)?;
        let clamped = self.bounds.clamp(raw);
        trace!(raw, clamped, "efficiency predicted");
        Ok(EfficiencyPrediction(clamped))
    }
}
