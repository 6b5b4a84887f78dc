//! First-order fit of observed concentration data.
//!
//! Fits `ln c = ln c0 - k t` by ordinary least squares over the points with a
//! positive concentration. Points at or below zero carry no information on a
//! log scale and are skipped. A rising series yields a negative `k`, which is
//! reported unchanged.

use serde::{Deserialize, Serialize};
use toxisim_core::error::FitError;
use toxisim_core::types::{ObservedPoint, RateConstant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FirstOrderFit {
    pub rate: RateConstant,
    /// Fitted concentration at `t = 0`.
    pub initial_concentration: f64,
    /// Coefficient of determination on the log scale.
    pub r_squared: f64,
    pub points_used: usize,
}

impl FirstOrderFit {
    /// Fitted concentration at `t` hours.
    pub fn predict(&self, time_hours: f64) -> f64 {
        self.initial_concentration * (-self.rate.per_hour() * time_hours).exp()
    }
}

pub fn fit_first_order(points: &[ObservedPoint]) -> Result<FirstOrderFit, FitError> {
    let mut usable = Vec::with_capacity(points.len());
    for (index, p) in points.iter().enumerate() {
        if !p.time_hours.is_finite() || !p.concentration.is_finite() {
            return Err(FitError::NonFinite { index });
        }
        if p.concentration > 0.0 {
            usable.push((p.time_hours, p.concentration.ln()));
        }
    }

    let n = usable.len();
    if n < 2 {
        return Err(FitError::TooFewPoints { usable: n });
    }

    let nf = n as f64;
    let mean_t = usable.iter().map(|(t, _)| t).sum::<f64>() / nf;
    let mean_y = usable.iter().map(|(_, y)| y).sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for &(t, y) in &usable {
        sxx += (t - mean_t) * (t - mean_t);
        sxy += (t - mean_t) * (y - mean_y);
    }
    if sxx == 0.0 {
        return Err(FitError::ZeroTimeSpread);
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_t;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for &(t, y) in &usable {
        let fitted = intercept + slope * t;
        ss_res += (y - fitted) * (y - fitted);
        ss_tot += (y - mean_y) * (y - mean_y);
    }
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 1.0 };

    let fit = FirstOrderFit {
        rate: RateConstant(-slope),
        initial_concentration: intercept.exp(),
        r_squared,
        points_used: n,
    };
    debug!(k = fit.rate.per_hour(), r_squared, points = n, "first-order fit");
    Ok(fit)
}
