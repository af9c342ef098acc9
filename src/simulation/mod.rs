//! Multi-ant simulation loop, score history and parameter sweeps.

pub mod config;
pub mod error;
pub mod history;
mod runner;
pub mod sweep;

pub use config::SimulationConfig;
pub use error::SimulationError;
pub use history::{History, Sample};
pub use runner::{RunSummary, Simulation, SimulationState};
pub use sweep::{ParameterSweep, SweepParams, SweepPoint};
