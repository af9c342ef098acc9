use thiserror::Error;

use crate::algorithms::rl::EnvError;
use crate::config::ConfigError;
use crate::grid::GridError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("Item count not conserved after step {step}: expected {expected}, found {found}")]
    ConservationViolated {
        step: u32,
        expected: usize,
        found: usize,
    },

    #[error("Simulation has already completed its step budget")]
    AlreadyCompleted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conservation_display() {
        let e = SimulationError::ConservationViolated {
            step: 3,
            expected: 5,
            found: 4,
        };
        assert_eq!(
            e.to_string(),
            "Item count not conserved after step 3: expected 5, found 4"
        );
    }

    #[test]
    fn wraps_grid_errors() {
        let e: SimulationError = GridError::InsufficientSpace {
            requested: 3,
            available: 1,
        }
        .into();
        assert!(matches!(e, SimulationError::Grid(_)));
    }
}
