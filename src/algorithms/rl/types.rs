//! Core types for the RL sorting environment.
//!
//! Defines the discrete action set and the legal-action mask shared by the
//! environment, the policies and the policy-driven simulation behavior.

use std::fmt;

use crate::grid::Direction;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the 7 discrete actions available to an ant.
///
/// Indices: 0 = North, 1 = South, 2 = East, 3 = West, 4 = Pick, 5 = Drop,
/// 6 = NoOp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    North,
    South,
    East,
    West,
    Pick,
    Drop,
    NoOp,
}

/// `mask[i]` is true when the action with index `i` may be applied.
pub type ActionMask = [bool; Action::COUNT];

impl Action {
    /// Size of the action space.
    pub const COUNT: usize = 7;

    /// All actions in index order.
    pub const ALL: [Action; Action::COUNT] = [
        Action::North,
        Action::South,
        Action::East,
        Action::West,
        Action::Pick,
        Action::Drop,
        Action::NoOp,
    ];

    pub fn index(self) -> usize {
        match self {
            Action::North => 0,
            Action::South => 1,
            Action::East => 2,
            Action::West => 3,
            Action::Pick => 4,
            Action::Drop => 5,
            Action::NoOp => 6,
        }
    }

    /// Decodes an action index, `None` when it is outside `0..7`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Movement direction of the four move actions.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::North => Some(Direction::North),
            Action::South => Some(Direction::South),
            Action::East => Some(Direction::East),
            Action::West => Some(Direction::West),
            Action::Pick | Action::Drop | Action::NoOp => None,
        }
    }

    pub fn is_move(self) -> bool {
        self.direction().is_some()
    }

    /// One-hot encoding of this action as a 7-element vector.
    pub fn one_hot(self) -> [f64; Action::COUNT] {
        let mut v = [0.0; Action::COUNT];
        v[self.index()] = 1.0;
        v
    }

    /// The four move actions in index order.
    pub fn moves() -> [Action; 4] {
        [Action::North, Action::South, Action::East, Action::West]
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::North => Action::North,
            Direction::South => Action::South,
            Direction::East => Action::East,
            Direction::West => Action::West,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::North => write!(f, "north"),
            Action::South => write!(f, "south"),
            Action::East => write!(f, "east"),
            Action::West => write!(f, "west"),
            Action::Pick => write!(f, "pick"),
            Action::Drop => write!(f, "drop"),
            Action::NoOp => write!(f, "no-op"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_stable() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(Action::from_index(i), Some(*action));
        }
        assert_eq!(Action::from_index(7), None);
    }

    #[test]
    fn one_hot_has_single_bit() {
        let v = Action::Drop.one_hot();
        assert_eq!(v.iter().sum::<f64>(), 1.0);
        assert_eq!(v[5], 1.0);
    }

    #[test]
    fn only_moves_have_directions() {
        assert_eq!(Action::East.direction(), Some(Direction::East));
        assert!(Action::Pick.direction().is_none());
        assert!(!Action::NoOp.is_move());
        for d in Direction::all() {
            assert_eq!(Action::from(d).direction(), Some(d));
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Action::NoOp.to_string(), "no-op");
        assert_eq!(Action::West.to_string(), "west");
    }
}
