//! Affine rate-constant model implementing [`RateModel`].
//!
//! `k = (baseline + dose_weight * dose + temperature_weight * max(0, T - T_ref)) * modifiers`
//!
//! Every coefficient is validated non-negative at configuration load and every
//! modifier factor is `>= 1`, so `k >= baseline >= 0` for any valid input.

use toxisim_core::config::RateModelParameters;
use toxisim_core::error::InputError;
use toxisim_core::traits::RateModel;
use toxisim_core::types::{RateConstant, SimulationInput};
use tracing::trace;

/// The production rate model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AffineRateModel {
    params: RateModelParameters,
}

impl AffineRateModel {
    pub fn new(params: RateModelParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RateModelParameters {
        &self.params
    }

    /// Temperature contribution, zero at or below the reference temperature.
    fn temperature_term(&self, temperature: f64) -> f64 {
        self.params.temperature_weight * (temperature - self.params.reference_temperature).max(0.0)
    }
}

impl RateModel for AffineRateModel {
    fn rate_constant(&self, input: &SimulationInput) -> Result<RateConstant, InputError> {
        input.validate()?;

        let p = &self.params;
        let base = p.baseline + p.dose_weight * input.dose + self.temperature_term(input.temperature);
        let k = base * input.modifiers.rate_factor();

        // Huge doses can overflow the sum.
        if !k.is_finite() {
            return Err(InputError::NonFiniteRate(k));
        }

        trace!(k, dose = input.dose, temperature = input.temperature, "rate constant");
        Ok(RateConstant(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use toxisim_core::constants::{
        ADSORBENT_FACTOR, DEFAULT_BASELINE_K, DEFAULT_DOSE_K_WEIGHT,
        DEFAULT_REFERENCE_TEMPERATURE_C, DEFAULT_TEMPERATURE_K_WEIGHT, UV_LIGHT_FACTOR,
    };
    use toxisim_core::types::{LightMode, Modifiers};

    fn model() -> AffineRateModel {
        AffineRateModel::default()
    }

    fn k(input: SimulationInput) -> f64 {
        model().rate_constant(&input).unwrap().per_hour()
    }

    #[test]
    fn baseline_only_at_reference_temperature() {
        let input = SimulationInput::new(100.0, 0.0, DEFAULT_REFERENCE_TEMPERATURE_C, 10.0);
        assert_eq!(k(input), DEFAULT_BASELINE_K);
    }

    #[test]
    fn cold_temperature_adds_nothing() {
        let input = SimulationInput::new(100.0, 0.0, -40.0, 10.0);
        assert_eq!(k(input), DEFAULT_BASELINE_K);
    }

    #[test]
    fn dose_term_is_linear() {
        let input = SimulationInput::new(100.0, 10.0, 20.0, 10.0);
        let expected = DEFAULT_BASELINE_K + DEFAULT_DOSE_K_WEIGHT * 10.0;
        assert!((k(input) - expected).abs() < 1e-15);
    }

    #[test]
    fn temperature_term_above_reference() {
        let input = SimulationInput::new(100.0, 0.0, DEFAULT_REFERENCE_TEMPERATURE_C + 5.0, 10.0);
        let expected = DEFAULT_BASELINE_K + DEFAULT_TEMPERATURE_K_WEIGHT * 5.0;
        assert!((k(input) - expected).abs() < 1e-15);
    }

    #[test]
    fn modifiers_scale_rate() {
        let plain = SimulationInput::new(100.0, 5.0, 30.0, 10.0);
        let boosted = plain.with_modifiers(Modifiers {
            light: LightMode::Uv,
            adsorbent: true,
        });
        let ratio = k(boosted) / k(plain);
        assert!((ratio - UV_LIGHT_FACTOR * ADSORBENT_FACTOR).abs() < 1e-12);
    }

    #[test]
    fn custom_parameters() {
        let model = AffineRateModel::new(RateModelParameters {
            baseline: 0.05,
            dose_weight: 0.01,
            temperature_weight: 0.0,
            reference_temperature: 20.0,
        });
        let input = SimulationInput::new(1.0, 2.0, 80.0, 1.0);
        let rate = model.rate_constant(&input).unwrap();
        assert!((rate.per_hour() - 0.07).abs() < 1e-15);
    }

    #[test]
    fn invalid_input_rejected() {
        let err = model()
            .rate_constant(&SimulationInput::new(1.0, -1.0, 20.0, 1.0))
            .unwrap_err();
        assert_eq!(err, InputError::NegativeDose(-1.0));
    }

    #[test]
    fn overflowing_dose_rejected() {
        let model = AffineRateModel::new(RateModelParameters {
            dose_weight: 10.0,
            ..RateModelParameters::default()
        });
        let input = SimulationInput::new(1.0, f64::MAX, 20.0, 1.0);
        let err = model.rate_constant(&input).unwrap_err();
        assert!(matches!(err, InputError::NonFiniteRate(_)));
    }

    proptest! {
        #[test]
        fn rate_never_below_baseline(
            dose in 0.0f64..1.0e4,
            temperature in -100.0f64..1.0e3,
        ) {
            let rate = k(SimulationInput::new(1.0, dose, temperature, 1.0));
            prop_assert!(rate >= DEFAULT_BASELINE_K);
            prop_assert!(rate.is_finite());
        }

        #[test]
        fn rate_monotonic_in_dose(
            a in 0.0f64..1.0e3,
            b in 0.0f64..1.0e3,
            temperature in -20.0f64..80.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let k_lo = k(SimulationInput::new(1.0, lo, temperature, 1.0));
            let k_hi = k(SimulationInput::new(1.0, hi, temperature, 1.0));
            prop_assert!(k_lo <= k_hi);
        }
    }
}
