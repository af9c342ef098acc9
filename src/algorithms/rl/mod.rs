//! RL-facing sorting environment.
//!
//! Exposes the grid and one ant as a fixed contract for a learned policy:
//! observation vectors, a 7-action discrete space gated by a legal-action
//! mask, and a shaped scalar reward. Policy networks and their training stay
//! outside this crate; the baseline policies here exist for evaluation and
//! for driving [`Simulation`](crate::simulation::Simulation) through
//! [`PolicyBehavior`].

pub mod actions;
pub mod behavior;
pub mod config;
pub mod environment;
pub mod error;
pub mod metrics;
pub mod observation;
pub mod policy;
pub mod reward;
pub mod types;

pub use actions::{apply_action, legal_action_mask};
pub use behavior::PolicyBehavior;
pub use config::{RewardConfig, RlConfig};
pub use environment::{AntSortEnv, StepResult};
pub use error::EnvError;
pub use metrics::EvaluationMetrics;
pub use observation::{ObservationBuilder, ObservationLayout};
pub use policy::{HeuristicPolicy, Policy, RandomPolicy};
pub use reward::{RewardBreakdown, RewardComputer};
pub use types::{Action, ActionMask};
