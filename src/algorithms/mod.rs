pub mod deneubourg;
pub mod rl;

pub use deneubourg::DeneubourgRule;

use crate::ant::{Ant, Outcome};
use crate::grid::GridWorld;
use crate::simulation::SimulationError;
use crate::SimRng;

/// Decision policy driving ants inside a [`Simulation`](crate::simulation::Simulation).
///
/// Implementations read the shared world, decide, and apply at most one
/// state-changing action for the given ant. The simulation calls `act` for
/// each ant in turn, so every call observes the effects of the previous one.
pub trait AntBehavior {
    /// Runs one decision-and-act cycle for `ant`.
    ///
    /// # Arguments
    ///
    /// * `ant` - The acting ant
    /// * `world` - The shared grid, mutated in place
    /// * `rng` - The run's seeded generator; every random draw goes through it
    fn act(
        &mut self,
        ant: &mut Ant,
        world: &mut GridWorld,
        rng: &mut SimRng,
    ) -> Result<Outcome, SimulationError>;

    /// Returns a human-readable name for this behavior.
    fn name(&self) -> &str;

    /// Reseeds any generator the behavior keeps of its own.
    ///
    /// The simulation calls this once, before the first step, with a value
    /// drawn from the run's generator.
    fn reseed(&mut self, _seed: u64) {}
}
