//! Configuration for the RL sorting environment and its reward shaping.

use super::observation::ObservationLayout;
use super::types::Action;
use crate::config::{ConfigError, GridConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shaping constants of the environment reward.
///
/// `reward = global_scale × (score_after − score_before) + auxiliary`, where
/// the auxiliary term depends on the action and on the number of same-color
/// items among the 8 neighbors of the acting ant's cell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewardConfig {
    // --- Global term ---
    /// Multiplier of the clustering-score delta.
    pub global_scale: f64,

    // --- Pick shaping ---
    /// Bonus for picking an item with no same-color neighbor.
    pub stray_pick: f64,
    /// Reward (normally negative) for picking an item out of a cluster.
    pub cluster_break_pick: f64,

    // --- Drop shaping ---
    /// Reward (normally negative) for dropping with no same-color neighbor.
    pub litter_drop: f64,
    /// Bonus for dropping beside exactly one same-color item.
    pub drop_tier1: f64,
    /// Bonus for dropping beside exactly two same-color items.
    pub drop_tier2: f64,
    /// Bonus for dropping beside three or more same-color items.
    pub drop_tier3: f64,
}

impl RewardConfig {
    /// Checks monotonicity of the drop tiers and sign-correctness of picks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            self.global_scale,
            self.stray_pick,
            self.cluster_break_pick,
            self.litter_drop,
            self.drop_tier1,
            self.drop_tier2,
            self.drop_tier3,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::RewardShaping("all constants must be finite"));
        }
        if self.global_scale < 0.0 {
            return Err(ConfigError::RewardShaping("global scale must be non-negative"));
        }
        if !(self.litter_drop <= self.drop_tier1
            && self.drop_tier1 <= self.drop_tier2
            && self.drop_tier2 <= self.drop_tier3)
        {
            return Err(ConfigError::RewardShaping(
                "drop rewards must not decrease with same-color neighbors",
            ));
        }
        if self.cluster_break_pick >= self.stray_pick {
            return Err(ConfigError::RewardShaping(
                "cluster-breaking picks must score below stray picks",
            ));
        }
        Ok(())
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            global_scale: 100.0,
            stray_pick: 0.5,
            cluster_break_pick: -1.0,
            litter_drop: -0.5,
            drop_tier1: 0.5,
            drop_tier2: 1.0,
            drop_tier3: 2.0,
        }
    }
}

/// Configuration for the RL sorting environment.
///
/// Controls world geometry, episode length, observation encoding and
/// reward shaping. Treated as an immutable bundle once the environment is
/// built.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RlConfig {
    // --- Environment geometry ---
    /// Grid geometry, palette and initial fill.
    pub grid: GridConfig,
    /// Episode horizon (number of time steps T).
    pub episode_horizon: u32,

    // --- Observation ---
    /// Append the previous action as a 7-slot one-hot block.
    pub action_memory: bool,

    // --- Training loop hints ---
    /// Every `eval_interval`-th episode is a deterministic evaluation
    /// episode. Zero disables evaluation episodes.
    pub eval_interval: u32,

    // --- Reward shaping ---
    pub reward: RewardConfig,

    /// Base seed; episode `e` is generated from `seed + e`.
    pub seed: u64,
}

impl RlConfig {
    /// Layout of the observation vector produced under this configuration.
    pub fn observation_layout(&self) -> ObservationLayout {
        ObservationLayout::new(self.grid.colors, self.action_memory)
    }

    /// Observation dimension: `9(K+1) + (K+1) + 9`, plus 7 with action memory.
    pub fn observation_dim(&self) -> usize {
        self.observation_layout().len()
    }

    /// Number of possible actions.
    pub fn action_dim(&self) -> usize {
        Action::COUNT
    }

    /// Returns true if the zero-based `episode` should be run as a
    /// deterministic evaluation episode.
    pub fn is_eval_episode(&self, episode: u64) -> bool {
        self.eval_interval != 0 && (episode + 1) % u64::from(self.eval_interval) == 0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if self.episode_horizon == 0 {
            return Err(ConfigError::InvalidHorizon);
        }
        self.reward.validate()
    }
}

impl Default for RlConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            episode_horizon: 500,
            action_memory: false,
            eval_interval: 10,
            reward: RewardConfig::default(),
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = RlConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.action_dim(), 7);
    }

    #[test]
    fn observation_dim_matches() {
        let mut cfg = RlConfig::default();
        assert_eq!(cfg.observation_dim(), 39);
        cfg.action_memory = true;
        assert_eq!(cfg.observation_dim(), 46);
        cfg.grid.colors = 3;
        assert_eq!(cfg.observation_dim(), 9 * 4 + 4 + 9 + 7);
    }

    #[test]
    fn zero_horizon_rejected() {
        let cfg = RlConfig {
            episode_horizon: 0,
            ..RlConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidHorizon));
    }

    #[test]
    fn eval_episodes_follow_interval() {
        let cfg = RlConfig {
            eval_interval: 5,
            ..RlConfig::default()
        };
        let evals: Vec<u64> = (0..15).filter(|&e| cfg.is_eval_episode(e)).collect();
        assert_eq!(evals, vec![4, 9, 14]);

        let never = RlConfig {
            eval_interval: 0,
            ..RlConfig::default()
        };
        assert!(!(0..100).any(|e| never.is_eval_episode(e)));
    }

    #[test]
    fn decreasing_drop_tiers_rejected() {
        let reward = RewardConfig {
            drop_tier2: 0.2,
            ..RewardConfig::default()
        };
        assert!(matches!(
            reward.validate(),
            Err(ConfigError::RewardShaping(_))
        ));
    }

    #[test]
    fn cluster_break_must_score_below_stray() {
        let reward = RewardConfig {
            cluster_break_pick: 0.5,
            ..RewardConfig::default()
        };
        assert!(reward.validate().is_err());
    }

    #[test]
    fn non_finite_constant_rejected() {
        let reward = RewardConfig {
            global_scale: f64::NAN,
            ..RewardConfig::default()
        };
        assert!(reward.validate().is_err());
    }
}
