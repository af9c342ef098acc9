use thiserror::Error;

use super::types::{Color, Position};
use crate::config::ConfigError;

/// Errors raised by grid mutation and agent mechanics.
///
/// Apart from `Config` and `InsufficientSpace`, these are contract
/// violations: callers check occupancy and carrying state first, so seeing
/// one of them means a bug, not a condition to retry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("Cannot pick from empty cell {0}")]
    EmptyCell(Position),

    #[error("Cannot drop onto cell {position}: already holds {color}")]
    OccupiedCell { position: Position, color: Color },

    #[error("Coordinate ({row}, {col}) is outside the bounded grid")]
    OutOfBounds { row: isize, col: isize },

    #[error("Cannot place {requested} items: only {available} empty cells")]
    InsufficientSpace { requested: usize, available: usize },

    #[error("{color} is outside the palette of {colors} colors")]
    UnknownColor { color: Color, colors: usize },

    #[error("Agent at {0} is already carrying an item")]
    HandsFull(Position),

    #[error("Agent at {0} is not carrying anything")]
    NothingCarried(Position),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
