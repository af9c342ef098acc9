//! antsort - ant-colony item sorting on a 2D grid
//!
//! Simulates ants that pick up and drop colored items to produce spatial
//! clusters, driven either by the probabilistic Deneubourg rule or by a
//! policy acting through a reinforcement-learning environment.

pub mod algorithms;
pub mod ant;
pub mod config;
pub mod grid;
pub mod metrics;
pub mod simulation;

use rand::SeedableRng;

pub use algorithms::rl::{AntSortEnv, EnvError, RlConfig};
pub use algorithms::{AntBehavior, DeneubourgRule};
pub use ant::{Ant, Outcome};
pub use config::{ConfigError, GridConfig};
pub use grid::{GridError, GridWorld};
pub use metrics::ClusteringMetric;
pub use simulation::{Simulation, SimulationConfig, SimulationError};

/// Random generator threaded through every draw of a run.
pub type SimRng = rand_chacha::ChaCha8Rng;

/// Creates the generator for `seed`. Equal seeds give equal runs.
pub fn seeded_rng(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}
