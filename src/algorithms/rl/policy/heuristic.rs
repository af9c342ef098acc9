//! Deneubourg heuristic policy.
//!
//! Evaluates the probabilistic pick/drop rule from the observation vector
//! alone, so the rule-based behavior can be compared against learned
//! policies through the same environment.

use rand::seq::IteratorRandom;
use rand::Rng;

use super::trait_::Policy;
use crate::algorithms::deneubourg::{drop_probability, pick_probability};
use crate::algorithms::rl::observation::ObservationLayout;
use crate::algorithms::rl::types::{Action, ActionMask};
use crate::config::{check_threshold, ConfigError};
use crate::{seeded_rng, SimRng};

/// Pick isolated items, drop beside matching ones, otherwise wander.
///
/// Similarity is read from the 8 neighbors in the observed window:
/// ```text
/// s = same-color neighbors / occupied neighbors   (0 when none are occupied)
/// ```
///
/// Off-grid cells are encoded as empty and so never count as occupied.
#[derive(Debug)]
pub struct HeuristicPolicy {
    layout: ObservationLayout,
    k1: f64,
    k2: f64,
    rng: SimRng,
}

impl HeuristicPolicy {
    /// Creates a new heuristic policy.
    ///
    /// # Arguments
    ///
    /// * `layout` - Layout of the observations this policy will receive
    /// * `k1` - Pick threshold, > 0
    /// * `k2` - Drop threshold, > 0
    /// * `seed` - Seed for the gate draws and random moves
    pub fn new(layout: ObservationLayout, k1: f64, k2: f64, seed: u64) -> Result<Self, ConfigError> {
        check_threshold("k1", k1)?;
        check_threshold("k2", k2)?;
        Ok(Self {
            layout,
            k1,
            k2,
            rng: seeded_rng(seed),
        })
    }

    /// Color slot of window cell `i`: 0 for empty, `c + 1` for color `c`.
    fn slot(&self, observation: &[f64], i: usize) -> usize {
        observation[self.layout.cell(i)]
            .iter()
            .position(|&v| v > 0.5)
            .unwrap_or(0)
    }

    /// Similarity of slot `target` among the 8 neighbors.
    fn similarity(&self, observation: &[f64], target: usize) -> f64 {
        let mut same = 0usize;
        let mut occupied = 0usize;
        let neighbors =
            (0..ObservationLayout::NEIGHBORHOOD_CELLS).filter(|&i| i != ObservationLayout::CENTER);
        for i in neighbors {
            let slot = self.slot(observation, i);
            if slot != 0 {
                occupied += 1;
                if slot == target {
                    same += 1;
                }
            }
        }
        if occupied == 0 {
            0.0
        } else {
            same as f64 / occupied as f64
        }
    }

    fn wander(&mut self, mask: &ActionMask) -> usize {
        Action::moves()
            .into_iter()
            .filter(|a| mask[a.index()])
            .choose(&mut self.rng)
            .unwrap_or(Action::NoOp)
            .index()
    }
}

impl Policy for HeuristicPolicy {
    fn select_action(&mut self, observation: &[f64], mask: &ActionMask) -> usize {
        if observation.len() != self.layout.len() {
            return self.wander(mask);
        }

        if mask[Action::Pick.index()] {
            let slot = self.slot(observation, ObservationLayout::CENTER);
            let s = self.similarity(observation, slot);
            if self.rng.gen::<f64>() < pick_probability(self.k1, s) {
                return Action::Pick.index();
            }
        } else if mask[Action::Drop.index()] {
            let carried = observation[self.layout.carrying()]
                .iter()
                .position(|&v| v > 0.5)
                .unwrap_or(0);
            let s = self.similarity(observation, carried);
            if self.rng.gen::<f64>() < drop_probability(self.k2, s) {
                return Action::Drop.index();
            }
        }

        self.wander(mask)
    }

    fn name(&self) -> &str {
        "deneubourg_heuristic"
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = seeded_rng(seed);
    }
}
