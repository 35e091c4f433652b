//! Simulation module - batch shot dispersion without a window
//!
//! Resolves many simulated swings per club in parallel and reports
//! how far and how wide each club scatters.

pub mod config;
pub mod metrics;
pub mod parallel;
pub mod runner;

pub use config::SimConfig;
pub use metrics::{DispersionReport, DispersionStats, ShotRecord, aim_relative};
pub use parallel::{ShotConfig, build_batch, init_parallel, run_shot, run_shots_parallel, shot_seed};
pub use runner::{run_dispersion, run_simulation};
