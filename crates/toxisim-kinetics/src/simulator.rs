//! First-order decay simulator.
//!
//! The duration is divided into `floor(duration)` equal steps, at least 1 and
//! at most [`MAX_SIMULATION_STEPS`], giving `steps + 1` time points from 0 to
//! the duration inclusive. Each point holds `c(t) = c0 * exp(-k * t)`; `exp`
//! underflowing to 0 is an accepted result.
//!
//! [`MAX_SIMULATION_STEPS`]: toxisim_core::constants::MAX_SIMULATION_STEPS

use toxisim_core::error::InputError;
use toxisim_core::traits::RateModel;
use toxisim_core::types::{SimulationInput, SimulationResult};
use tracing::debug;

use crate::rate::AffineRateModel;

/// Time series generator over a pluggable [`RateModel`].
#[derive(Debug, Clone, Default)]
pub struct DecaySimulator<R = AffineRateModel> {
    rate_model: R,
}

impl<R: RateModel> DecaySimulator<R> {
    pub fn new(rate_model: R) -> Self {
        Self { rate_model }
    }

    pub fn rate_model(&self) -> &R {
        &self.rate_model
    }

    /// Simulate decay for one validated experimental setup.
    pub fn simulate(&self, input: &SimulationInput) -> Result<SimulationResult, InputError> {
        let rate = self.rate_model.rate_constant(input)?;
        let k = rate.per_hour();
        let initial = input.initial_concentration;
        let duration = input.duration_hours;
        let steps = input.step_count();
        let step = duration / steps as f64;

        let mut time_points = Vec::with_capacity(steps + 1);
        let mut concentrations = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            // Pin the endpoint so the series ends exactly at the duration.
            let t = if i == steps {
                duration
            } else {
                step * i as f64
            };
            time_points.push(t);
            concentrations.push(initial * (-k * t).exp());
        }

        debug!(
            k,
            points = time_points.len(),
            final_concentration = concentrations[steps],
            "decay simulated"
        );

        Ok(SimulationResult {
            time_points,
            concentrations,
            rate,
        })
    }

    /// [`simulate`](Self::simulate) with default modifiers.
    pub fn simulate_with(
        &self,
        initial: f64,
        dose: f64,
        temperature: f64,
        duration_hours: f64,
    ) -> Result<SimulationResult, InputError> {
        self.simulate(&SimulationInput::new(initial, dose, temperature, duration_hours))
    }
}
