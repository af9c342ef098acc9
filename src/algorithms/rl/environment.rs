//! RL sorting environment.
//!
//! One learned ant acting on a populated grid. Each step runs
//! validate → shape → apply → score → observe.

use tracing::{debug, info};

use super::actions::{apply_action, legal_action_mask};
use super::config::RlConfig;
use super::error::EnvError;
use super::observation::ObservationBuilder;
use super::reward::{RewardBreakdown, RewardComputer};
use super::types::{Action, ActionMask};
use crate::ant::{Ant, Outcome};
use crate::grid::GridWorld;
use crate::metrics::ClusteringMetric;
use crate::{seeded_rng, SimRng};

/// Result of a single environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Observation after the step.
    pub observation: Vec<f64>,
    /// Shaped reward (`breakdown.total`).
    pub reward: f64,
    /// Whether the episode is done (horizon reached).
    pub done: bool,
    /// Legal-action mask for the next step.
    pub legal_actions: ActionMask,
    /// Current time step.
    pub time_step: u32,
    /// What the action did to the world.
    pub outcome: Outcome,
    /// Global and auxiliary reward components.
    pub breakdown: RewardBreakdown,
}

/// The RL-facing ant sorting environment.
///
/// Presents a [`GridWorld`] and a single [`Ant`] through a fixed contract:
/// observation vectors, a 7-action discrete space with a legal-action mask,
/// and a shaped scalar reward. Episodes end after `episode_horizon` steps,
/// never earlier.
///
/// # Lifecycle
///
/// 1. Call [`AntSortEnv::new`] with a configuration.
/// 2. Call [`AntSortEnv::reset`] to start an episode and get its first observation.
/// 3. Repeatedly call [`AntSortEnv::step`] with legal action indices until `done`.
/// 4. Inspect [`StepResult`] for rewards, observations, and episode status.
///
/// Episode `e` (counting resets from zero) is generated from `seed + e`, so
/// successive episodes differ while each stays reproducible.
#[derive(Debug)]
pub struct AntSortEnv {
    config: RlConfig,
    world: GridWorld,
    ant: Ant,
    /// Index of the current episode.
    episode: u64,
    /// Index the next `reset` will generate.
    next_episode: u64,
    /// Current time step.
    t: u32,
    done: bool,
    initial_score: f64,
    score: f64,
    cumulative_reward: f64,
    picks: u32,
    drops: u32,
}

impl AntSortEnv {
    /// Creates an environment holding episode 0, ready to step.
    ///
    /// The first [`reset`](Self::reset) regenerates the same episode.
    pub fn new(config: RlConfig) -> Result<Self, EnvError> {
        config.validate()?;
        let (world, ant) = Self::generate(&config, 0)?;
        let score = ClusteringMetric::score(&world);

        info!(
            height = world.height(),
            width = world.width(),
            colors = world.colors(),
            items = world.items_placed(),
            horizon = config.episode_horizon,
            observation_dim = config.observation_dim(),
            "RL environment created"
        );

        Ok(Self {
            config,
            world,
            ant,
            episode: 0,
            next_episode: 0,
            t: 0,
            done: false,
            initial_score: score,
            score,
            cumulative_reward: 0.0,
            picks: 0,
            drops: 0,
        })
    }

    fn generate(config: &RlConfig, episode: u64) -> Result<(GridWorld, Ant), EnvError> {
        let mut rng: SimRng = seeded_rng(config.seed.wrapping_add(episode));
        let world = GridWorld::populated(&config.grid, &mut rng)?;
        let ant = Ant::spawn(0, &world, &mut rng);
        Ok((world, ant))
    }

    /// Starts the next episode and returns its initial observation.
    pub fn reset(&mut self) -> Result<Vec<f64>, EnvError> {
        let episode = self.next_episode;
        let (world, ant) = Self::generate(&self.config, episode)?;
        self.world = world;
        self.ant = ant;
        self.episode = episode;
        self.next_episode = episode + 1;
        self.t = 0;
        self.done = false;
        self.score = ClusteringMetric::score(&self.world);
        self.initial_score = self.score;
        self.cumulative_reward = 0.0;
        self.picks = 0;
        self.drops = 0;

        debug!(
            episode,
            initial_score = self.initial_score,
            position = %self.ant.position,
            "episode reset"
        );
        Ok(self.observation())
    }

    /// Executes one environment step.
    ///
    /// 1. Decode the index and check it against the legal-action mask
    /// 2. Evaluate the auxiliary reward on the pre-action state
    /// 3. Apply the action (pick/drop are deterministic here)
    /// 4. Recompute the clustering score and the global term
    /// 5. Advance time and build the next observation and mask
    ///
    /// An illegal or unknown action returns an error and leaves the episode
    /// exactly as it was, time step included.
    ///
    /// # Arguments
    ///
    /// * `action` - Action index in `0..7`
    pub fn step(&mut self, action: usize) -> Result<StepResult, EnvError> {
        let action = Action::from_index(action).ok_or(EnvError::UnknownAction(action))?;
        self.step_action(action)
    }

    /// Typed variant of [`step`](Self::step).
    pub fn step_action(&mut self, action: Action) -> Result<StepResult, EnvError> {
        if self.done {
            return Err(EnvError::EpisodeFinished);
        }

        let auxiliary =
            RewardComputer::auxiliary(&self.ant, &self.world, action, &self.config.reward);
        let outcome = apply_action(&mut self.ant, &mut self.world, action)?;
        match outcome {
            Outcome::Picked(_) => self.picks += 1,
            Outcome::Dropped(_) => self.drops += 1,
            Outcome::Moved { .. } | Outcome::Idle => {}
        }

        let score_after = ClusteringMetric::score(&self.world);
        let breakdown =
            RewardComputer::compute(self.score, score_after, auxiliary, &self.config.reward);
        self.score = score_after;
        self.cumulative_reward += breakdown.total;

        self.t += 1;
        self.done = self.t >= self.config.episode_horizon;
        if self.done {
            debug!(
                episode = self.episode,
                cumulative_reward = self.cumulative_reward,
                final_score = self.score,
                "episode finished"
            );
        }

        Ok(StepResult {
            observation: self.observation(),
            reward: breakdown.total,
            done: self.done,
            legal_actions: self.legal_actions(),
            time_step: self.t,
            outcome,
            breakdown,
        })
    }

    /// Observation of the current state.
    pub fn observation(&self) -> Vec<f64> {
        ObservationBuilder::build(&self.ant, &self.world, self.config.action_memory)
    }

    /// Legal-action mask of the current state.
    pub fn legal_actions(&self) -> ActionMask {
        legal_action_mask(&self.ant, &self.world)
    }

    pub fn config(&self) -> &RlConfig {
        &self.config
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn ant(&self) -> &Ant {
        &self.ant
    }

    pub fn episode(&self) -> u64 {
        self.episode
    }

    /// Whether the current episode should be run deterministically.
    pub fn is_eval_episode(&self) -> bool {
        self.config.is_eval_episode(self.episode)
    }

    pub fn time_step(&self) -> u32 {
        self.t
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn initial_score(&self) -> f64 {
        self.initial_score
    }

    pub fn current_score(&self) -> f64 {
        self.score
    }

    pub fn cumulative_reward(&self) -> f64 {
        self.cumulative_reward
    }

    /// Successful picks and drops in the current episode.
    pub fn pick_drop_counts(&self) -> (u32, u32) {
        (self.picks, self.drops)
    }
}
