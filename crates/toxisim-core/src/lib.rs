//! # toxisim-core
//! Foundation types, errors and model configuration for ToxiSim.

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
