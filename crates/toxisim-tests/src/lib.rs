//! Cross-crate test suite for ToxiSim.
//!
//! Integration tests exercise the kinetics models through the same entry
//! points the command line uses: configuration load, toolkit assembly, and
//! the pure simulate/predict operations.

pub mod helpers;
