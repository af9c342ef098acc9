//! Policy-driven ant behavior for the multi-ant simulation loop.

use super::actions::{apply_action, legal_action_mask};
use super::error::EnvError;
use super::observation::ObservationBuilder;
use super::policy::Policy;
use super::types::Action;
use crate::algorithms::AntBehavior;
use crate::ant::{Ant, Outcome};
use crate::grid::GridWorld;
use crate::simulation::SimulationError;
use crate::SimRng;

/// Drives every ant of a [`Simulation`](crate::simulation::Simulation)
/// through a [`Policy`].
///
/// Each ant is observed and masked exactly as in [`AntSortEnv`](super::AntSortEnv),
/// and its chosen action is applied deterministically. A policy that picks a
/// masked action stops the run with [`EnvError::IllegalAction`].
#[derive(Debug)]
pub struct PolicyBehavior<P: Policy> {
    policy: P,
    action_memory: bool,
}

impl<P: Policy> PolicyBehavior<P> {
    /// # Arguments
    ///
    /// * `policy` - The policy choosing actions for all ants
    /// * `action_memory` - Whether observations carry the previous action
    pub fn new(policy: P, action_memory: bool) -> Self {
        Self {
            policy,
            action_memory,
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn into_policy(self) -> P {
        self.policy
    }
}

impl<P: Policy> AntBehavior for PolicyBehavior<P> {
    fn act(
        &mut self,
        ant: &mut Ant,
        world: &mut GridWorld,
        _rng: &mut SimRng,
    ) -> Result<Outcome, SimulationError> {
        let observation = ObservationBuilder::build(ant, world, self.action_memory);
        let mask = legal_action_mask(ant, world);
        let index = self.policy.select_action(&observation, &mask);
        let action = Action::from_index(index).ok_or(EnvError::UnknownAction(index))?;
        Ok(apply_action(ant, world, action)?)
    }

    fn name(&self) -> &str {
        self.policy.name()
    }

    fn reseed(&mut self, seed: u64) {
        self.policy.reseed(seed);
    }
}
