//! Configuration for rule-based simulation runs.

use crate::algorithms::deneubourg::SimilarityBasis;
use crate::config::{check_threshold, ConfigError, GridConfig};
use crate::grid::Adjacency;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable parameter bundle for a [`Simulation`](super::Simulation).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    // --- World ---
    /// Grid geometry, palette and initial fill.
    pub grid: GridConfig,

    // --- Population ---
    /// Number of ants sharing the grid.
    pub n_ants: usize,
    /// Step budget T. Zero completes immediately with an empty history.
    pub max_steps: u32,

    // --- Decision rule ---
    /// Pick threshold k1 (> 0).
    pub k1: f64,
    /// Drop threshold k2 (> 0).
    pub k2: f64,
    /// Neighborhood for similarity and movement.
    pub adjacency: Adjacency,
    /// Denominator of the local similarity.
    pub similarity: SimilarityBasis,

    // --- Recording ---
    /// Record the clustering score every N steps (and on the last step).
    pub track_interval: u32,
    /// Seed of the run's random generator.
    pub seed: u64,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if self.n_ants == 0 {
            return Err(ConfigError::NoAgents);
        }
        check_threshold("k1", self.k1)?;
        check_threshold("k2", self.k2)?;
        if self.track_interval == 0 {
            return Err(ConfigError::InvalidTrackInterval);
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            n_ants: 50,
            max_steps: 10_000,
            k1: 0.3,
            k2: 0.15,
            adjacency: Adjacency::Moore,
            similarity: SimilarityBasis::OccupiedNeighbors,
            track_interval: 1,
            seed: 42,
        }
    }
}
