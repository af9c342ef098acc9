//! Shaped reward for the RL environment.
//!
//! Combines a global term driven by the change in clustering score with an
//! action-conditioned auxiliary term for picks and drops.

use super::config::RewardConfig;
use super::types::Action;
use crate::algorithms::deneubourg::same_color_neighbors;
use crate::ant::Ant;
use crate::grid::{Adjacency, Cell, GridWorld};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two components of one step's reward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewardBreakdown {
    pub global: f64,
    pub auxiliary: f64,
    pub total: f64,
}

/// Computes rewards for the RL environment.
pub struct RewardComputer;

impl RewardComputer {
    /// Auxiliary term for `action`, read from the world *before* it is applied.
    ///
    /// # Components
    ///
    /// 1. **Stray pick**: picking an item with no same-color 8-neighbor.
    /// 2. **Cluster-breaking pick**: picking an item with at least one.
    /// 3. **Drop**: litter penalty with no same-color 8-neighbor, then the
    ///    tiered bonuses for 1, 2 and 3-or-more.
    ///
    /// Moves, no-ops and actions that cannot apply score 0.
    pub fn auxiliary(ant: &Ant, world: &GridWorld, action: Action, config: &RewardConfig) -> f64 {
        let cell = match world.get(ant.position) {
            Ok(cell) => cell,
            Err(_) => return 0.0,
        };
        match (action, ant.carrying, cell) {
            (Action::Pick, None, Cell::Occupied(color)) => {
                if same_color_neighbors(world, ant.position, color, Adjacency::Moore) == 0 {
                    config.stray_pick
                } else {
                    config.cluster_break_pick
                }
            }
            (Action::Drop, Some(color), Cell::Empty) => {
                let n = same_color_neighbors(world, ant.position, color, Adjacency::Moore);
                Self::drop_bonus(n, config)
            }
            _ => 0.0,
        }
    }

    /// Drop reward for `same_color` matching neighbors; non-decreasing in
    /// `same_color` for any valid [`RewardConfig`].
    pub fn drop_bonus(same_color: usize, config: &RewardConfig) -> f64 {
        match same_color {
            0 => config.litter_drop,
            1 => config.drop_tier1,
            2 => config.drop_tier2,
            _ => config.drop_tier3,
        }
    }

    /// `global_scale × (score_after − score_before)`.
    pub fn global(score_before: f64, score_after: f64, config: &RewardConfig) -> f64 {
        config.global_scale * (score_after - score_before)
    }

    /// Combines both terms for one environment step.
    pub fn compute(
        score_before: f64,
        score_after: f64,
        auxiliary: f64,
        config: &RewardConfig,
    ) -> RewardBreakdown {
        let global = Self::global(score_before, score_after, config);
        RewardBreakdown {
            global,
            auxiliary,
            total: global + auxiliary,
        }
    }
}
