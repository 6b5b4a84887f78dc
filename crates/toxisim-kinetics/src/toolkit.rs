//! One-time assembly of the models from a loaded configuration.
//!
//! A [`Toolkit`] is built once at startup and shared read-only. Where the
//! coefficients came from is kept alongside as [`ParameterSource`], so
//! callers learn about a fallback from a value rather than a flag.
//! [`Toolkit::load_strict`] refuses to fall back and returns the failure.

use serde::Serialize;
use toxisim_core::config::{ConfigLoader, LoadedConfig, ModelConfig, ParameterSource};
use toxisim_core::error::{InputError, ToxiSimError};
use toxisim_core::traits::EfficiencyModel;
use toxisim_core::types::{EfficiencyPrediction, SimulationInput, SimulationResult};
use tracing::info;

use crate::efficiency::EfficiencyPredictor;
use crate::rate::AffineRateModel;
use crate::simulator::DecaySimulator;
use crate::summary::SimulationSummary;

/// Simulation, prediction and summary for one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub input: SimulationInput,
    pub efficiency: EfficiencyPrediction,
    pub summary: SimulationSummary,
    pub simulation: SimulationResult,
}

#[derive(Debug, Clone)]
pub struct Toolkit {
    config: ModelConfig,
    source: ParameterSource,
    simulator: DecaySimulator<AffineRateModel>,
    predictor: EfficiencyPredictor,
}

impl Toolkit {
    pub fn initialize(loaded: LoadedConfig) -> Self {
        let LoadedConfig { config, source } = loaded;
        let simulator = DecaySimulator::new(AffineRateModel::new(config.kinetics));
        let predictor = EfficiencyPredictor::new(config.parameters).with_bounds(config.bounds);

        info!(
            model = config.model_name.as_deref().unwrap_or("unnamed"),
            fallback = source.is_fallback(),
            "toolkit ready"
        );

        Self {
            config,
            source,
            simulator,
            predictor,
        }
    }

    /// Toolkit from `loader`, failing instead of using the defaults.
    pub fn load_strict(loader: &ConfigLoader) -> Result<Self, ToxiSimError> {
        Ok(Self::initialize(loader.load_strict()?))
    }

    /// Toolkit over the built-in defaults.
    pub fn builtin() -> Self {
        Self::initialize(LoadedConfig::builtin())
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn source(&self) -> &ParameterSource {
        &self.source
    }

    pub fn simulator(&self) -> &DecaySimulator<AffineRateModel> {
        &self.simulator
    }

    pub fn rate_model(&self) -> &AffineRateModel {
        self.simulator.rate_model()
    }

    pub fn predictor(&self) -> &EfficiencyPredictor {
        &self.predictor
    }

    pub fn simulate(&self, input: &SimulationInput) -> Result<SimulationResult, InputError> {
        self.simulator.simulate(input)
    }

    pub fn predict(
        &self,
        dose: f64,
        temperature: f64,
        duration_hours: f64,
    ) -> Result<EfficiencyPrediction, InputError> {
        self.predictor.predict(dose, temperature, duration_hours)
    }

    pub fn report(&self, input: &SimulationInput) -> Result<Report, InputError> {
        let simulation = self.simulate(input)?;
        let efficiency = self.predict(input.dose, input.temperature, input.duration_hours)?;
        let summary = SimulationSummary::from_result(&simulation);
        Ok(Report {
            input: *input,
            efficiency,
            summary,
            simulation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toxisim_core::config::{EfficiencyBounds, EfficiencyModelParameters, RateModelParameters};
    use toxisim_core::error::ConfigError;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn toolkit_is_shareable() {
        assert_send_sync::<Toolkit>();
    }

    #[test]
    fn builtin_uses_defaults() {
        let tk = Toolkit::builtin();
        assert_eq!(tk.source(), &ParameterSource::Builtin);
        assert_eq!(tk.config(), &ModelConfig::default());
        assert_eq!(tk.predict(0.0, 0.0, 24.0).unwrap().percent(), 5.0);
    }

    #[test]
    fn load_strict_surfaces_config_errors() {
        let missing = std::env::temp_dir().join("toxisim-toolkit-absent.json");
        let loader = ConfigLoader::new().without_env().file(&missing);
        match Toolkit::load_strict(&loader) {
            Err(ToxiSimError::Config(ConfigError::NotFound(path))) => assert_eq!(path, missing),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn load_strict_without_file_is_builtin() {
        let tk = Toolkit::load_strict(&ConfigLoader::new().without_env()).unwrap();
        assert_eq!(tk.source(), &ParameterSource::Builtin);
    }

    #[test]
    fn fallback_source_is_preserved() {
        let loaded = LoadedConfig {
            config: ModelConfig::default(),
            source: ParameterSource::Fallback(ConfigError::Load("bad".into())),
        };
        let tk = Toolkit::initialize(loaded);
        assert!(tk.source().is_fallback());
    }

    #[test]
    fn configured_coefficients_flow_through() {
        let config = ModelConfig {
            model_name: Some("custom".into()),
            parameters: EfficiencyModelParameters {
                offset: 20.0,
                ..EfficiencyModelParameters::default()
            },
            bounds: EfficiencyBounds { min: 0.0, max: 50.0 },
            kinetics: RateModelParameters {
                baseline: 0.1,
                ..RateModelParameters::default()
            },
        };
        let tk = Toolkit::initialize(LoadedConfig {
            config,
            source: ParameterSource::Builtin,
        });
        assert_eq!(tk.predict(0.0, 0.0, 1.0).unwrap().percent(), 20.0);
        assert_eq!(tk.predict(1_000.0, 100.0, 24.0).unwrap().percent(), 50.0);
        assert_eq!(tk.rate_model().params().baseline, 0.1);
    }

    #[test]
    fn report_combines_parts() {
        let tk = Toolkit::builtin();
        let input = SimulationInput::new(100.0, 5.0, 30.0, 24.0);
        let report = tk.report(&input).unwrap();
        assert_eq!(report.input, input);
        assert_eq!(report.simulation.len(), 25);
        assert_eq!(report.summary.final_concentration, report.simulation.final_concentration());
        assert_eq!(report.efficiency, tk.predict(5.0, 30.0, 24.0).unwrap());
    }

    #[test]
    fn report_rejects_invalid_input() {
        let tk = Toolkit::builtin();
        let err = tk.report(&SimulationInput::new(1.0, 0.0, 20.0, -1.0)).unwrap_err();
        assert_eq!(err, InputError::NonPositiveDuration(-1.0));
    }
}
