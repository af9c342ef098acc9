//! Random policy for testing and baselines.

use rand::seq::IteratorRandom;

use super::trait_::Policy;
use crate::algorithms::rl::types::{Action, ActionMask};
use crate::{seeded_rng, SimRng};

/// Uniformly random choice among the legal actions.
///
/// Used for sanity checks and as a lower-bound baseline. Seeded, so a run
/// with the same seed replays the same choices.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: SimRng,
}

impl RandomPolicy {
    /// Creates a new random policy.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed of the policy's own generator
    pub fn new(seed: u64) -> Self {
        Self {
            rng: seeded_rng(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, _observation: &[f64], mask: &ActionMask) -> usize {
        (0..Action::COUNT)
            .filter(|&i| mask[i])
            .choose(&mut self.rng)
            .unwrap_or(Action::NoOp.index())
    }

    fn name(&self) -> &str {
        "random"
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = seeded_rng(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_policy_only_picks_legal_actions() {
        let mut policy = RandomPolicy::new(3);
        let mut mask = [false; Action::COUNT];
        mask[Action::East.index()] = true;
        mask[Action::NoOp.index()] = true;
        for _ in 0..100 {
            let a = policy.select_action(&[], &mask);
            assert!(mask[a]);
        }
    }

    #[test]
    fn random_policy_covers_legal_set() {
        let mut policy = RandomPolicy::new(4);
        let mask = [true; Action::COUNT];
        let mut seen = [false; Action::COUNT];
        for _ in 0..500 {
            seen[policy.select_action(&[], &mask)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn same_seed_same_choices() {
        let mask = [true; Action::COUNT];
        let mut a = RandomPolicy::new(9);
        let mut b = RandomPolicy::new(9);
        for _ in 0..50 {
            assert_eq!(a.select_action(&[], &mask), b.select_action(&[], &mask));
        }
    }

    #[test]
    fn reseed_replays_fresh_policy() {
        let mask = [true; Action::COUNT];
        let mut reseeded = RandomPolicy::new(1);
        reseeded.reseed(11);
        let mut fresh = RandomPolicy::new(11);
        for _ in 0..50 {
            assert_eq!(
                reseeded.select_action(&[], &mask),
                fresh.select_action(&[], &mask)
            );
        }
    }
}
