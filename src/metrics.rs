//! Clustering quality of a grid snapshot.
//!
//! The score counts unordered pairs of 4-adjacent cells holding the same
//! color, independently of the adjacency used for movement or similarity.
//! The count is divided by the number of items and nothing else:
//!
//! ```text
//! score = same_color_pairs / occupied_cells
//! ```
//!
//! Each item owns at most two pairs (its right and lower neighbors), so the
//! score never exceeds 2. Sparse grids stay well below 1, but dense
//! single-colored regions go above it; a full single-colored torus scores
//! exactly 2. An empty grid scores 0. Scores are only comparable between
//! runs that share a fill percentage.

use crate::grid::{AddressingMode, Cell, GridWorld, Position};

/// Computes clustering scores.
pub struct ClusteringMetric;

impl ClusteringMetric {
    /// Number of unordered 4-adjacent pairs sharing a color.
    ///
    /// Toroidal worlds also count the wrap-around pairs, except along a
    /// dimension of length ≤ 2 where the wrapped pair is already an interior one.
    pub fn pair_count(world: &GridWorld) -> usize {
        let (h, w) = (world.height(), world.width());
        let wraps = world.addressing() == AddressingMode::Toroidal;
        let color_at = |row: usize, col: usize| {
            world
                .get(Position::new(row, col))
                .ok()
                .and_then(|cell| cell.color())
        };

        let mut pairs = 0;
        for (position, cell) in world.iter() {
            let Cell::Occupied(color) = cell else {
                continue;
            };
            let (row, col) = (position.row, position.col);

            let right = if col + 1 < w {
                Some(col + 1)
            } else if wraps && w > 2 {
                Some(0)
            } else {
                None
            };
            if right.and_then(|c| color_at(row, c)) == Some(color) {
                pairs += 1;
            }

            let down = if row + 1 < h {
                Some(row + 1)
            } else if wraps && h > 2 {
                Some(0)
            } else {
                None
            };
            if down.and_then(|r| color_at(r, col)) == Some(color) {
                pairs += 1;
            }
        }
        pairs
    }

    /// Upper bound of [`score`](Self::score) for any grid.
    pub const MAX_SCORE: f64 = 2.0;

    /// Same-color pairs per occupied cell. Lies in `[0, 2]`.
    pub fn score(world: &GridWorld) -> f64 {
        match world.occupied_count() {
            0 => 0.0,
            n => Self::pair_count(world) as f64 / n as f64,
        }
    }
}
