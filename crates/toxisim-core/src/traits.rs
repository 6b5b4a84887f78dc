//! Trait interfaces between the kinetics engine and its callers.
//!
//! - [`RateModel`]: rate constant from experimental conditions (toxisim-kinetics implements)
//! - [`EfficiencyModel`]: scalar efficiency from a regression (toxisim-kinetics implements)

use crate::error::InputError;
use crate::types::{EfficiencyPrediction, RateConstant, SimulationInput};

/// Pure derivation of a first-order rate constant.
///
/// Implementations must return a finite `k >= 0` for every input that passes
/// [`SimulationInput::validate`].
pub trait RateModel: Send + Sync {
    /// Rate constant for the given conditions. Validates the input first.
    fn rate_constant(&self, input: &SimulationInput) -> Result<RateConstant, InputError>;
}

/// Pure closed-form efficiency prediction.
pub trait EfficiencyModel: Send + Sync {
    /// Unclamped formula output. May fall outside `[0, 100]`.
    fn raw_efficiency(&self, dose: f64, temperature: f64, duration_hours: f64) -> Result<f64, InputError>;

    /// Clamped prediction in percent.
    fn predict(
        &self,
        dose: f64,
        temperature: f64,
        duration_hours: f64,
    ) -> Result<EfficiencyPrediction, InputError>;
}
