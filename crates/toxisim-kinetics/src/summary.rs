//! Headline figures derived from a simulated series.

use serde::{Deserialize, Serialize};
use toxisim_core::constants::{LOW_REMOVAL_PERCENT, MODERATE_REMOVAL_PERCENT};
use toxisim_core::types::SimulationResult;

/// Removal class by reduction percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalTier {
    /// Below [`LOW_REMOVAL_PERCENT`].
    Low,
    /// Below [`MODERATE_REMOVAL_PERCENT`].
    Moderate,
    Strong,
}

impl RemovalTier {
    pub fn from_reduction(percent: f64) -> Self {
        if percent < LOW_REMOVAL_PERCENT {
            Self::Low
        } else if percent < MODERATE_REMOVAL_PERCENT {
            Self::Moderate
        } else {
            Self::Strong
        }
    }

    /// Short guidance for the tier.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Low => {
                "Low removal. Increase the dose, extend the reaction time, or add photostimulation or an adsorbent."
            }
            Self::Moderate => {
                "Moderate removal. Raise the temperature slightly or allow a longer incubation."
            }
            Self::Strong => {
                "Strong removal predicted. Validate breakdown products before relying on the result."
            }
        }
    }
}

/// Summary of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub initial_concentration: f64,
    pub final_concentration: f64,
    pub duration_hours: f64,
    pub rate_per_hour: f64,
    /// `None` when the rate constant is zero.
    pub half_life_hours: Option<f64>,
    /// `(c0 - c_final) / c0 * 100`, zero when `c0 == 0`.
    pub reduction_percent: f64,
    pub tier: RemovalTier,
}

impl SimulationSummary {
    pub fn from_result(result: &SimulationResult) -> Self {
        let initial = result.initial_concentration();
        let final_concentration = result.final_concentration();
        let reduction_percent = if initial > 0.0 {
            (initial - final_concentration) / initial * 100.0
        } else {
            0.0
        };

        Self {
            initial_concentration: initial,
            final_concentration,
            duration_hours: result.duration_hours(),
            rate_per_hour: result.rate.per_hour(),
            half_life_hours: result.rate.half_life(),
            reduction_percent,
            tier: RemovalTier::from_reduction(reduction_percent),
        }
    }

    /// Whether the final concentration is above a regulatory `limit`.
    pub fn exceeds_limit(&self, limit: f64) -> bool {
        self.final_concentration > limit
    }
}
