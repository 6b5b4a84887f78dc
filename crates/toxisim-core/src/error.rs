//! Error types for ToxiSim.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} must be finite, got {value}")] NonFinite { field: &'static str, value: f64 },
    #[error("initial concentration must be non-negative, got {0}")] NegativeConcentration(f64),
    #[error("dose must be non-negative, got {0}")] NegativeDose(f64),
    #[error("duration must be positive, got {0} h")] NonPositiveDuration(f64),
    #[error("derived rate constant is not finite: {0}")] NonFiniteRate(f64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config file not found: {0}")] NotFound(PathBuf),
    #[error("config load: {0}")] Load(String),
    #[error("invalid config: {0}")] Invalid(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FitError {
    #[error("need at least two usable points, got {usable}")] TooFewPoints { usable: usize },
    #[error("all usable points share the same time")] ZeroTimeSpread,
    #[error("observed point {index} is not finite")] NonFinite { index: usize },
}

#[derive(Error, Debug)]
pub enum ToxiSimError {
    #[error(transparent)] Input(#[from] InputError),
    #[error(transparent)] Config(#[from] ConfigError),
    #[error(transparent)] Fit(#[from] FitError),
}

impl From<::config::ConfigError> for ConfigError {
    fn from(err: ::config::ConfigError) -> Self {
        ConfigError::Load(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_names_field() {
        let err = InputError::NonFinite { field: "temperature", value: f64::NAN };
        assert!(err.to_string().starts_with("temperature must be finite"));
    }

    #[test]
    fn umbrella_is_transparent() {
        let err: ToxiSimError = InputError::NegativeDose(-1.0).into();
        assert_eq!(err.to_string(), "dose must be non-negative, got -1");
    }

    #[test]
    fn fit_error_message() {
        let err = FitError::TooFewPoints { usable: 1 };
        assert_eq!(err.to_string(), "need at least two usable points, got 1");
    }
}
