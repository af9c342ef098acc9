use crate::grid::{Adjacency, Color, GridWorld, Position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Denominator used when turning same-color neighbor counts into a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SimilarityBasis {
    /// `same / occupied neighbors`, 0 when no neighbor is occupied.
    #[default]
    OccupiedNeighbors,
    /// `same / in-bounds neighbors`, empty cells included.
    AllNeighbors,
}

/// Fraction of neighbors of `position` that hold `color`.
///
/// Out-of-bounds neighbors of a bounded world are ignored entirely. The cell
/// at `position` itself is never counted.
pub fn local_similarity(
    world: &GridWorld,
    position: Position,
    color: Color,
    adjacency: Adjacency,
    basis: SimilarityBasis,
) -> f64 {
    let mut same = 0usize;
    let mut occupied = 0usize;
    let mut in_bounds = 0usize;
    for view in world.neighbors(position, adjacency) {
        if !view.is_in_bounds() {
            continue;
        }
        in_bounds += 1;
        if let Some(c) = view.color() {
            occupied += 1;
            if c == color {
                same += 1;
            }
        }
    }

    let denominator = match basis {
        SimilarityBasis::OccupiedNeighbors => occupied,
        SimilarityBasis::AllNeighbors => in_bounds,
    };
    if denominator == 0 {
        0.0
    } else {
        same as f64 / denominator as f64
    }
}

/// Number of neighbors of `position` holding `color`.
pub fn same_color_neighbors(
    world: &GridWorld,
    position: Position,
    color: Color,
    adjacency: Adjacency,
) -> usize {
    world
        .neighbors(position, adjacency)
        .iter()
        .filter(|view| view.color() == Some(color))
        .count()
}
