//! Parameter sweeps: dose sensitivity, rate vs temperature, and the
//! dose x temperature efficiency grid.
//!
//! Every sweep evaluates its points independently and stops at the first
//! invalid point.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use toxisim_core::error::InputError;
use toxisim_core::traits::{EfficiencyModel, RateModel};
use toxisim_core::types::{RateConstant, SimulationInput, SimulationResult};

use crate::simulator::DecaySimulator;

/// One curve of a dose sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseCurve {
    pub dose: f64,
    pub result: SimulationResult,
}

/// Simulate `base` once per dose, keeping every other field.
pub fn dose_sweep<R: RateModel>(
    simulator: &DecaySimulator<R>,
    base: &SimulationInput,
    doses: &[f64],
) -> Result<Vec<DoseCurve>, InputError> {
    doses
        .iter()
        .map(|&dose| {
            let input = SimulationInput { dose, ..*base };
            simulator
                .simulate(&input)
                .map(|result| DoseCurve { dose, result })
        })
        .collect()
}

/// Rate constant of `base` at each temperature.
pub fn rate_vs_temperature<R: RateModel>(
    model: &R,
    base: &SimulationInput,
    temperatures: &[f64],
) -> Result<Vec<(f64, RateConstant)>, InputError> {
    temperatures
        .iter()
        .map(|&temperature| {
            let input = SimulationInput { temperature, ..*base };
            model.rate_constant(&input).map(|k| (temperature, k))
        })
        .collect()
}

/// Best cell of an [`EfficiencyGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridOptimum {
    pub dose: f64,
    pub temperature: f64,
    pub efficiency: f64,
}

/// Predicted efficiency for every `(temperature, dose)` pair.
///
/// `values[i][j]` is the prediction at `temperatures[i]` and `doses[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyGrid {
    pub doses: Vec<f64>,
    pub temperatures: Vec<f64>,
    pub duration_hours: f64,
    pub values: Vec<Vec<f64>>,
}

impl EfficiencyGrid {
    /// Highest-efficiency cell; the first one wins ties. `None` for an empty grid.
    pub fn optimum(&self) -> Option<GridOptimum> {
        let mut best: Option<GridOptimum> = None;
        for (i, row) in self.values.iter().enumerate() {
            for (j, &efficiency) in row.iter().enumerate() {
                let better = match best {
                    Some(b) => OrderedFloat(efficiency) > OrderedFloat(b.efficiency),
                    None => true,
                };
                if better {
                    best = Some(GridOptimum {
                        dose: self.doses[j],
                        temperature: self.temperatures[i],
                        efficiency,
                    });
                }
            }
        }
        best
    }
}

pub fn efficiency_grid<M: EfficiencyModel>(
    model: &M,
    doses: &[f64],
    temperatures: &[f64],
    duration_hours: f64,
) -> Result<EfficiencyGrid, InputError> {
    let values = temperatures
        .iter()
        .map(|&temperature| {
            doses
                .iter()
                .map(|&dose| {
                    model
                        .predict(dose, temperature, duration_hours)
                        .map(|e| e.percent())
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EfficiencyGrid {
        doses: doses.to_vec(),
        temperatures: temperatures.to_vec(),
        duration_hours,
        values,
    })
}
