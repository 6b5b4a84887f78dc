//! Model properties checked across the public API.
//!
//! Each property holds for the built-in default parameters; the proptest
//! blocks sample the realistic input domain plus extreme values.

use proptest::prelude::*;
use toxisim_core::constants::{
    DEFAULT_BASELINE_K, DEFAULT_EFFICIENCY_OFFSET, MAX_SIMULATION_STEPS,
};
use toxisim_core::error::InputError;
use toxisim_core::traits::EfficiencyModel;
use toxisim_core::types::{LightMode, Modifiers, SimulationInput};
use toxisim_kinetics::{DecaySimulator, EfficiencyPredictor};
use toxisim_tests::helpers::approx_eq;

fn simulator() -> DecaySimulator {
    DecaySimulator::default()
}

fn predictor() -> EfficiencyPredictor {
    EfficiencyPredictor::default()
}

fn any_light() -> impl Strategy<Value = LightMode> {
    prop_oneof![
        Just(LightMode::Dark),
        Just(LightMode::Ambient),
        Just(LightMode::Uv),
    ]
}

// --- fixed cases ---

#[test]
fn baseline_reference_case() {
    let r = simulator().simulate_with(100.0, 0.0, 25.0, 10.0).unwrap();
    assert_eq!(r.rate.per_hour(), DEFAULT_BASELINE_K);
    assert_eq!(*r.time_points.last().unwrap(), 10.0);
    assert!(approx_eq(r.final_concentration(), 100.0 * (-0.02f64).exp(), 1e-12));
    assert!((r.final_concentration() - 98.02).abs() < 0.005);
}

#[test]
fn zero_inputs_give_offset() {
    let eff = predictor().predict(0.0, 0.0, 24.0).unwrap();
    assert_eq!(eff.percent(), DEFAULT_EFFICIENCY_OFFSET);
}

#[test]
fn extreme_prediction_is_clamped() {
    let eff = predictor().predict(10_000.0, 1_000.0, 24.0).unwrap();
    assert_eq!(eff.percent(), 100.0);
    let eff = predictor().predict(10_000.0, -1_000.0, 24.0).unwrap();
    assert_eq!(eff.percent(), 0.0);
}

#[test]
fn one_hour_gives_two_points() {
    let r = simulator().simulate_with(5.0, 1.0, 20.0, 1.0).unwrap();
    assert_eq!(r.time_points, vec![0.0, 1.0]);
    assert_eq!(r.concentrations[0], 5.0);
}

#[test]
fn invalid_simulation_inputs_rejected() {
    let s = simulator();
    assert!(matches!(
        s.simulate_with(-0.1, 0.0, 20.0, 1.0),
        Err(InputError::NegativeConcentration(_))
    ));
    assert!(matches!(
        s.simulate_with(1.0, 0.0, 20.0, 0.0),
        Err(InputError::NonPositiveDuration(_))
    ));
    assert!(matches!(
        s.simulate_with(1.0, 0.0, 20.0, f64::NAN),
        Err(InputError::NonFinite { .. })
    ));
    assert!(matches!(
        s.simulate_with(1.0, 0.0, f64::NEG_INFINITY, 1.0),
        Err(InputError::NonFinite { .. })
    ));
}

#[test]
fn default_half_life_below_reference() {
    let r = simulator().simulate_with(1.0, 0.0, 10.0, 1.0).unwrap();
    let expected = std::f64::consts::LN_2 / DEFAULT_BASELINE_K;
    assert!(approx_eq(r.rate.half_life().unwrap(), expected, 1e-12));
}

// --- proptest ---

proptest! {
    #[test]
    fn first_value_is_initial(
        initial in 0.0f64..1.0e9,
        dose in 0.0f64..1.0e4,
        temperature in -100.0f64..1.0e3,
        duration in 1.0e-3f64..500.0,
    ) {
        let r = simulator().simulate_with(initial, dose, temperature, duration).unwrap();
        prop_assert!(approx_eq(r.concentrations[0], initial, 1e-9));
    }

    #[test]
    fn concentrations_non_increasing(
        initial in 0.0f64..1.0e9,
        dose in 0.0f64..1.0e4,
        temperature in -100.0f64..1.0e3,
        duration in 1.0e-3f64..500.0,
        light in any_light(),
        adsorbent in any::<bool>(),
    ) {
        let input = SimulationInput::new(initial, dose, temperature, duration)
            .with_modifiers(Modifiers { light, adsorbent });
        let r = simulator().simulate(&input).unwrap();
        prop_assert!(r.rate.per_hour() >= 0.0);
        for w in r.concentrations.windows(2) {
            prop_assert!(w[1] <= w[0]);
        }
        prop_assert!(r.concentrations.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn output_shape(duration in 1.0e-3f64..500.0) {
        let r = simulator().simulate_with(1.0, 0.0, 20.0, duration).unwrap();
        prop_assert!(r.len() >= 2);
        prop_assert_eq!(r.time_points.len(), r.concentrations.len());
        prop_assert_eq!(r.time_points[0], 0.0);
        prop_assert_eq!(*r.time_points.last().unwrap(), duration);
    }

    #[test]
    fn long_durations_stay_bounded(duration in 1.0e3f64..1.0e300) {
        let r = simulator().simulate_with(50.0, 1.0, 30.0, duration).unwrap();
        prop_assert!(r.len() <= MAX_SIMULATION_STEPS + 1);
        prop_assert_eq!(*r.time_points.last().unwrap(), duration);
        prop_assert!(r.concentrations.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn prediction_always_a_percentage(
        dose in 0.0f64..1.0e6,
        temperature in -1.0e5f64..1.0e5,
        duration in 1.0e-6f64..1.0e6,
    ) {
        let eff = predictor().predict(dose, temperature, duration).unwrap().percent();
        prop_assert!((0.0..=100.0).contains(&eff));
    }

    #[test]
    fn simulate_is_bit_identical(
        initial in 0.0f64..1.0e6,
        dose in 0.0f64..100.0,
        temperature in -20.0f64..80.0,
        duration in 0.1f64..100.0,
    ) {
        let a = simulator().simulate_with(initial, dose, temperature, duration).unwrap();
        let b = simulator().simulate_with(initial, dose, temperature, duration).unwrap();
        prop_assert_eq!(a.rate.per_hour().to_bits(), b.rate.per_hour().to_bits());
        for (x, y) in a.concentrations.iter().zip(&b.concentrations) {
            prop_assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn predict_is_bit_identical(
        dose in 0.0f64..100.0,
        temperature in -20.0f64..80.0,
        duration in 0.1f64..100.0,
    ) {
        let a = predictor().predict(dose, temperature, duration).unwrap();
        let b = predictor().predict(dose, temperature, duration).unwrap();
        prop_assert_eq!(a.percent().to_bits(), b.percent().to_bits());
    }

    #[test]
    fn adsorbent_never_slows_decay(
        dose in 0.0f64..100.0,
        temperature in -20.0f64..80.0,
        duration in 1.0f64..100.0,
    ) {
        let plain = SimulationInput::new(100.0, dose, temperature, duration);
        let with = plain.with_modifiers(Modifiers { light: LightMode::Dark, adsorbent: true });
        let a = simulator().simulate(&plain).unwrap();
        let b = simulator().simulate(&with).unwrap();
        prop_assert!(b.final_concentration() < a.final_concentration());
    }
}
