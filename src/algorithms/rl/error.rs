use thiserror::Error;

use super::types::Action;
use crate::config::ConfigError;
use crate::grid::{GridError, Position};

/// Errors surfaced at the RL environment boundary.
///
/// An illegal action is never corrected: the caller gets the error and the
/// environment state is left untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnvError {
    #[error("Action {action} is not legal for the ant at {position}")]
    IllegalAction { action: Action, position: Position },

    #[error("Action index {0} is outside the action space of {count}", count = Action::COUNT)]
    UnknownAction(usize),

    #[error("Episode has finished; call reset() to start a new one")]
    EpisodeFinished,

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_action_display() {
        let e = EnvError::IllegalAction {
            action: Action::Pick,
            position: Position::new(0, 4),
        };
        assert_eq!(e.to_string(), "Action pick is not legal for the ant at (0, 4)");
    }

    #[test]
    fn unknown_action_display() {
        assert_eq!(
            EnvError::UnknownAction(9).to_string(),
            "Action index 9 is outside the action space of 7"
        );
    }
}
