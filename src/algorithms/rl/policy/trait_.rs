//! Policy trait for the RL environment.

use crate::algorithms::rl::types::ActionMask;

/// A policy that selects an action for one ant from its observation.
///
/// Actions are indices into the 7-action set (see
/// [`Action`](crate::algorithms::rl::Action)). Implementations must return
/// an index whose mask bit is set; the environment rejects anything else.
pub trait Policy: Send {
    /// Selects one action given the ant's observation.
    ///
    /// # Arguments
    ///
    /// * `observation` - Observation vector (from [`ObservationBuilder`](crate::algorithms::rl::ObservationBuilder))
    /// * `mask` - Legal-action mask for the same state
    ///
    /// # Returns
    ///
    /// An action index in `0..7`.
    fn select_action(&mut self, observation: &[f64], mask: &ActionMask) -> usize;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;

    /// Replaces the seed of the policy's own generator, if it has one.
    fn reseed(&mut self, _seed: u64) {}
}
