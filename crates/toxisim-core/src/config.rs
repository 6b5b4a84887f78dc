//! Model configuration: rate and efficiency coefficients.
//!
//! A [`ModelConfig`] is read once at startup from an optional file (JSON or
//! TOML, the legacy `ml_model.json` layout) layered with
//! `TOXISIM__*` environment overrides. When the file is missing or invalid
//! the loader falls back to the built-in defaults and records why in
//! [`ParameterSource::Fallback`]; callers never see the failure as an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{
    APP_DIR_NAME, DEFAULT_BASELINE_K, DEFAULT_DOSE_K_WEIGHT, DEFAULT_EFFICIENCY_DOSE_WEIGHT,
    DEFAULT_EFFICIENCY_INTERACTION_WEIGHT, DEFAULT_EFFICIENCY_OFFSET,
    DEFAULT_EFFICIENCY_TEMPERATURE_WEIGHT, DEFAULT_MODEL_FILE, DEFAULT_REFERENCE_TEMPERATURE_C,
    DEFAULT_TEMPERATURE_K_WEIGHT, EFFICIENCY_MAX, EFFICIENCY_MIN, ENV_PREFIX, ENV_SEPARATOR,
};
use crate::error::ConfigError;

/// Coefficients of the rate-constant formula
/// `k = baseline + dose_weight * dose + temperature_weight * max(0, T - reference)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateModelParameters {
    pub baseline: f64,
    pub dose_weight: f64,
    pub temperature_weight: f64,
    pub reference_temperature: f64,
}

impl Default for RateModelParameters {
    fn default() -> Self {
        Self {
            baseline: DEFAULT_BASELINE_K,
            dose_weight: DEFAULT_DOSE_K_WEIGHT,
            temperature_weight: DEFAULT_TEMPERATURE_K_WEIGHT,
            reference_temperature: DEFAULT_REFERENCE_TEMPERATURE_C,
        }
    }
}

impl RateModelParameters {
    /// Coefficients must be finite and non-negative so that `k >= 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let coefficients = [
            ("baseline", self.baseline),
            ("dose_weight", self.dose_weight),
            ("temperature_weight", self.temperature_weight),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "kinetics.{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.reference_temperature.is_finite() {
            return Err(ConfigError::Invalid(
                "kinetics.reference_temperature must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Coefficients of the efficiency regression.
///
/// Field aliases accept the legacy `ml_model.json` field names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyModelParameters {
    #[serde(alias = "d_offset")]
    pub offset: f64,
    #[serde(alias = "a_curcumin")]
    pub dose_weight: f64,
    #[serde(alias = "b_temperature")]
    pub temperature_weight: f64,
    #[serde(alias = "c_interaction")]
    pub interaction_weight: f64,
}

impl Default for EfficiencyModelParameters {
    fn default() -> Self {
        Self {
            offset: DEFAULT_EFFICIENCY_OFFSET,
            dose_weight: DEFAULT_EFFICIENCY_DOSE_WEIGHT,
            temperature_weight: DEFAULT_EFFICIENCY_TEMPERATURE_WEIGHT,
            interaction_weight: DEFAULT_EFFICIENCY_INTERACTION_WEIGHT,
        }
    }
}

impl EfficiencyModelParameters {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let coefficients = [
            ("offset", self.offset),
            ("dose_weight", self.dose_weight),
            ("temperature_weight", self.temperature_weight),
            ("interaction_weight", self.interaction_weight),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "parameters.{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Clamp range for predictions. May narrow `[0, 100]`, never widen it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for EfficiencyBounds {
    fn default() -> Self {
        Self {
            min: EFFICIENCY_MIN,
            max: EFFICIENCY_MAX,
        }
    }
}

impl EfficiencyBounds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = EFFICIENCY_MIN <= self.min && self.min <= self.max && self.max <= EFFICIENCY_MAX;
        if !ordered {
            return Err(ConfigError::Invalid(format!(
                "bounds must satisfy {EFFICIENCY_MIN} <= min <= max <= {EFFICIENCY_MAX}, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Immutable model configuration for the process lifetime.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub model_name: Option<String>,
    pub parameters: EfficiencyModelParameters,
    pub bounds: EfficiencyBounds,
    pub kinetics: RateModelParameters,
}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parameters.validate()?;
        self.bounds.validate()?;
        self.kinetics.validate()
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterSource {
    /// Loaded from this file (plus any environment overrides).
    File(PathBuf),
    /// No file configured; built-in defaults plus any environment overrides.
    Builtin,
    /// A file was configured but could not be used; built-in defaults apply.
    Fallback(ConfigError),
}

impl ParameterSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Result of the one-time configuration load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: ModelConfig,
    pub source: ParameterSource,
}

impl LoadedConfig {
    /// Built-in defaults with no file involved.
    pub fn builtin() -> Self {
        Self {
            config: ModelConfig::default(),
            source: ParameterSource::Builtin,
        }
    }
}

/// `<config dir>/toxisim/ml_model.json`, if the platform has a config dir.
pub fn default_model_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(DEFAULT_MODEL_FILE))
}

/// Builder for the layered configuration load.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// No file, environment overrides enabled.
    pub fn new() -> Self {
        Self {
            path: None,
            env_prefix: Some(ENV_PREFIX.to_string()),
        }
    }

    /// Use the given file.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Use `explicit` if given, otherwise the default path when it exists.
    pub fn discover(self, explicit: Option<&Path>) -> Self {
        match explicit {
            Some(path) => self.file(path),
            None => match default_model_path().filter(|p| p.exists()) {
                Some(path) => self.file(path),
                None => self,
            },
        }
    }

    /// Read overrides from `<prefix>__*` instead of `TOXISIM__*`.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Skip `TOXISIM__*` environment overrides.
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// Load and validate, surfacing every failure.
    pub fn try_load(&self) -> Result<ModelConfig, ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = &self.path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.clone()));
            }
            builder = builder.add_source(::config::File::from(path.as_path()));
        }

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                ::config::Environment::with_prefix(prefix)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            );
        }

        let model: ModelConfig = builder.build()?.try_deserialize()?;
        model.validate()?;
        Ok(model)
    }

    /// Load with its source, without falling back.
    pub fn load_strict(&self) -> Result<LoadedConfig, ConfigError> {
        let config = self.try_load()?;
        let source = match &self.path {
            Some(path) => ParameterSource::File(path.clone()),
            None => ParameterSource::Builtin,
        };
        debug!(?source, model = config.model_name.as_deref().unwrap_or("unnamed"), "model config loaded");
        Ok(LoadedConfig { config, source })
    }

    /// Load, falling back to built-in defaults on any failure.
    pub fn load(&self) -> LoadedConfig {
        self.load_strict().unwrap_or_else(|err| {
            warn!(error = %err, "model config unavailable, using built-in defaults");
            LoadedConfig {
                config: ModelConfig::default(),
                source: ParameterSource::Fallback(err),
            }
        })
    }
}
