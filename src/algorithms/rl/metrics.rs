//! Evaluation metrics for the RL sorting environment.
//!
//! Runs a policy over several episodes and aggregates episode-level
//! statistics.

use std::fmt;

use super::environment::AntSortEnv;
use super::error::EnvError;
use super::policy::Policy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aggregated evaluation metrics over multiple episodes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluationMetrics {
    /// Mean cumulative reward per episode.
    pub mean_cumulative_reward: f64,
    /// Mean clustering score at episode start.
    pub mean_initial_score: f64,
    /// Mean clustering score at episode end.
    pub mean_final_score: f64,
    /// Mean of `final - initial` per episode.
    pub mean_improvement: f64,
    /// Mean number of successful picks per episode.
    pub mean_picks: f64,
    /// Mean number of successful drops per episode.
    pub mean_drops: f64,
    /// Number of episodes evaluated.
    pub n_episodes: usize,
}

/// Tracks per-episode statistics during evaluation.
#[derive(Debug, Default)]
struct EpisodeStats {
    cumulative_reward: f64,
    initial_score: f64,
    final_score: f64,
    picks: u32,
    drops: u32,
}

impl EvaluationMetrics {
    /// Evaluates a policy over multiple episodes and returns aggregated metrics.
    ///
    /// Each episode starts with [`AntSortEnv::reset`] and runs to the horizon.
    /// Any environment error (for instance the policy choosing a masked
    /// action) aborts the evaluation.
    ///
    /// # Arguments
    ///
    /// * `env` - The RL environment to evaluate in
    /// * `policy` - The policy to evaluate
    /// * `n_episodes` - Number of episodes to run
    pub fn evaluate(
        env: &mut AntSortEnv,
        policy: &mut dyn Policy,
        n_episodes: usize,
    ) -> Result<Self, EnvError> {
        let mut all_stats = Vec::with_capacity(n_episodes);

        for _ in 0..n_episodes {
            let mut obs = env.reset()?;
            let mut mask = env.legal_actions();
            let mut stats = EpisodeStats {
                initial_score: env.initial_score(),
                ..EpisodeStats::default()
            };

            loop {
                let action = policy.select_action(&obs, &mask);
                let result = env.step(action)?;
                obs = result.observation;
                mask = result.legal_actions;

                if result.done {
                    break;
                }
            }

            stats.cumulative_reward = env.cumulative_reward();
            stats.final_score = env.current_score();
            (stats.picks, stats.drops) = env.pick_drop_counts();
            all_stats.push(stats);
        }

        let n = all_stats.len().max(1) as f64;
        let mean = |f: fn(&EpisodeStats) -> f64| all_stats.iter().map(f).sum::<f64>() / n;

        Ok(Self {
            mean_cumulative_reward: mean(|s| s.cumulative_reward),
            mean_initial_score: mean(|s| s.initial_score),
            mean_final_score: mean(|s| s.final_score),
            mean_improvement: mean(|s| s.final_score - s.initial_score),
            mean_picks: mean(|s| f64::from(s.picks)),
            mean_drops: mean(|s| f64::from(s.drops)),
            n_episodes,
        })
    }
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Evaluation Metrics ({} episodes) ===",
            self.n_episodes
        )?;
        writeln!(
            f,
            "  Mean cumulative reward:  {:.2}",
            self.mean_cumulative_reward
        )?;
        writeln!(f, "  Mean initial score:      {:.4}", self.mean_initial_score)?;
        writeln!(f, "  Mean final score:        {:.4}", self.mean_final_score)?;
        writeln!(f, "  Mean improvement:        {:+.4}", self.mean_improvement)?;
        write!(
            f,
            "  Mean picks / drops:      {:.1} / {:.1}",
            self.mean_picks, self.mean_drops
        )
    }
}
