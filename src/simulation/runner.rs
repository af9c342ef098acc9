use std::fmt;

use rand::Rng;
use tracing::{debug, info, warn};

use super::config::SimulationConfig;
use super::error::SimulationError;
use super::history::History;
use crate::algorithms::{AntBehavior, DeneubourgRule};
use crate::ant::{Ant, Outcome};
use crate::grid::GridWorld;
use crate::metrics::ClusteringMetric;
use crate::{seeded_rng, SimRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle of a simulation run.
///
/// `Initialized → Running → Completed`. A zero step budget goes straight to
/// `Completed` with an empty history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// World populated, ants placed, history empty.
    Initialized,
    /// At least one step executed, budget not exhausted.
    Running,
    /// Terminal; the history no longer changes.
    Completed,
}

/// Headline numbers of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunSummary {
    pub initial_score: f64,
    pub final_score: f64,
    pub improvement: f64,
    pub steps: u32,
    pub picks: u64,
    pub drops: u64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Run Summary ({} steps) ===", self.steps)?;
        writeln!(f, "  Initial clustering score: {:.4}", self.initial_score)?;
        writeln!(f, "  Final clustering score:   {:.4}", self.final_score)?;
        writeln!(f, "  Improvement:              {:+.4}", self.improvement)?;
        write!(f, "  Picks / drops:            {} / {}", self.picks, self.drops)
    }
}

/// A population of ants sorting items on one shared grid.
///
/// Within a step, ants act strictly one after another in id order, each
/// completing its read-decide-act cycle before the next one reads the grid.
/// The clustering score is sampled once per step, after every ant has acted.
///
/// # Lifecycle
///
/// 1. Call [`Simulation::new`] (rule-based) or [`Simulation::with_behavior`].
/// 2. Call [`Simulation::step`] repeatedly, or [`Simulation::run`] to exhaust the budget.
/// 3. Read [`Simulation::history`] and [`Simulation::summary`].
///
/// A caller may abandon a run between any two steps.
#[derive(Debug)]
pub struct Simulation<B: AntBehavior = DeneubourgRule> {
    config: SimulationConfig,
    world: GridWorld,
    ants: Vec<Ant>,
    behavior: B,
    rng: SimRng,
    state: SimulationState,
    step: u32,
    history: History,
    initial_score: f64,
    last_score: f64,
    picks: u64,
    drops: u64,
}

impl Simulation<DeneubourgRule> {
    /// Creates a rule-based simulation from `config`.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let rule = DeneubourgRule::from_config(&config)?;
        Self::with_behavior(config, rule)
    }
}

impl<B: AntBehavior> Simulation<B> {
    /// Creates a simulation whose ants are driven by `behavior`.
    ///
    /// Populates the grid and places every ant empty-handed on a random cell,
    /// drawing from a generator seeded with `config.seed`. The behavior is
    /// then reseeded from that same generator, so `config.seed` fixes every
    /// draw of the run.
    pub fn with_behavior(
        config: SimulationConfig,
        mut behavior: B,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);
        let world = GridWorld::populated(&config.grid, &mut rng)?;
        let ants = (0..config.n_ants)
            .map(|id| Ant::spawn(id, &world, &mut rng))
            .collect();
        behavior.reseed(rng.gen());
        let initial_score = ClusteringMetric::score(&world);

        info!(
            height = world.height(),
            width = world.width(),
            colors = world.colors(),
            items = world.items_placed(),
            ants = config.n_ants,
            max_steps = config.max_steps,
            behavior = behavior.name(),
            initial_score,
            "simulation initialized"
        );

        Ok(Self {
            config,
            world,
            ants,
            behavior,
            rng,
            state: SimulationState::Initialized,
            step: 0,
            history: History::new(),
            initial_score,
            last_score: initial_score,
            picks: 0,
            drops: 0,
        })
    }

    /// Executes one step: every ant acts once, then the score is sampled.
    ///
    /// Returns the score after the step, or `None` when the budget was
    /// already exhausted (zero-step runs), in which case the run completes.
    pub fn step(&mut self) -> Result<Option<f64>, SimulationError> {
        if self.state == SimulationState::Completed {
            return Err(SimulationError::AlreadyCompleted);
        }
        if self.step >= self.config.max_steps {
            self.complete();
            return Ok(None);
        }

        self.state = SimulationState::Running;
        self.step += 1;

        for ant in self.ants.iter_mut() {
            match self.behavior.act(ant, &mut self.world, &mut self.rng)? {
                Outcome::Picked(_) => self.picks += 1,
                Outcome::Dropped(_) => self.drops += 1,
                Outcome::Moved { .. } | Outcome::Idle => {}
            }
        }
        self.check_conservation()?;

        let score = ClusteringMetric::score(&self.world);
        self.last_score = score;
        if self.step % self.config.track_interval == 0 || self.step == self.config.max_steps {
            self.history.push(self.step, score);
            debug!(step = self.step, score, "recorded clustering score");
        }

        if self.step == self.config.max_steps {
            self.complete();
        }
        Ok(Some(score))
    }

    /// Runs until the step budget is exhausted and returns the history.
    pub fn run(&mut self) -> Result<&History, SimulationError> {
        while self.state != SimulationState::Completed {
            self.step()?;
        }
        Ok(&self.history)
    }

    fn complete(&mut self) {
        self.state = SimulationState::Completed;
        info!(
            steps = self.step,
            initial_score = self.initial_score,
            final_score = self.last_score,
            picks = self.picks,
            drops = self.drops,
            "simulation completed"
        );
    }

    /// Items are only relocated: those on the grid plus those in transit
    /// must always add up to the number ever placed.
    fn check_conservation(&self) -> Result<(), SimulationError> {
        let carried = self.ants.iter().filter(|a| a.is_carrying()).count();
        let found = self.world.occupied_count() + carried;
        let expected = self.world.items_placed();
        if found != expected {
            warn!(step = self.step, expected, found, "item count not conserved");
            return Err(SimulationError::ConservationViolated {
                step: self.step,
                expected,
                found,
            });
        }
        Ok(())
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    /// Number of steps executed so far.
    pub fn current_step(&self) -> u32 {
        self.step
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_history(self) -> History {
        self.history
    }

    /// Clustering score of the freshly populated grid.
    pub fn initial_score(&self) -> f64 {
        self.initial_score
    }

    /// Clustering score after the latest step.
    pub fn current_score(&self) -> f64 {
        self.last_score
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            initial_score: self.initial_score,
            final_score: self.last_score,
            improvement: self.last_score - self.initial_score,
            steps: self.step,
            picks: self.picks,
            drops: self.drops,
        }
    }
}
