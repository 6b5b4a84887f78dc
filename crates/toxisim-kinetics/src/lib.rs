//! # toxisim-kinetics: Toxin decay simulation and treatment efficiency.
//!
//! This crate implements the two ToxiSim models:
//! - **Decay simulation**: first-order decay `c(t) = c0 * exp(-k t)` with a rate
//!   constant affine in dose and in temperature above a reference, scaled by
//!   light and adsorbent modifiers.
//! - **Efficiency prediction**: a log-linear regression with a dose-temperature
//!   interaction, clamped to a percentage.
//!
//! Around them sit run summaries, parameter sweeps, a first-order fit for
//! observed data, and [`Toolkit`], the one-time assembly from configuration.
//! Everything here is pure and synchronous.

pub mod efficiency;
pub mod fit;
pub mod rate;
pub mod sensitivity;
pub mod simulator;
pub mod summary;
pub mod toolkit;

pub use efficiency::EfficiencyPredictor;
pub use fit::{FirstOrderFit, fit_first_order};
pub use rate::AffineRateModel;
pub use sensitivity::{EfficiencyGrid, dose_sweep, efficiency_grid, rate_vs_temperature};
pub use simulator::DecaySimulator;
pub use summary::{RemovalTier, SimulationSummary};
pub use toolkit::{Report, Toolkit};
