//! Observation encoding for the RL environment.
//!
//! Builds the fixed-length vector a policy sees for one ant: its 3×3
//! neighborhood, what it carries, which neighbors match the carried color
//! and, optionally, its previous action.

use std::ops::Range;

use super::types::Action;
use crate::ant::Ant;
use crate::grid::{CellView, GridWorld};

/// Offsets of the blocks inside an observation vector.
///
/// ```text
/// [cells(9 × (K+1))] ++ [carrying(K+1)] ++ [match(9)] ++ [last_action(7)]?
/// ```
///
/// Each cell and the carrying block are one-hot over
/// `{empty, color_0, …, color_{K-1}}`. Cells are ordered row-major from the
/// top-left neighbor to the bottom-right one, the ant's own cell in the
/// middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationLayout {
    colors: usize,
    action_memory: bool,
}

impl ObservationLayout {
    /// Cells in the observed window.
    pub const NEIGHBORHOOD_CELLS: usize = 9;

    /// Index of the ant's own cell in the window.
    pub const CENTER: usize = 4;

    pub fn new(colors: usize, action_memory: bool) -> Self {
        Self {
            colors,
            action_memory,
        }
    }

    pub fn colors(&self) -> usize {
        self.colors
    }

    pub fn has_action_memory(&self) -> bool {
        self.action_memory
    }

    /// Width of one one-hot block (`K + 1`).
    pub fn slot_width(&self) -> usize {
        self.colors + 1
    }

    /// Range of the one-hot block of window cell `cell`.
    pub fn cell(&self, cell: usize) -> Range<usize> {
        let start = cell * self.slot_width();
        start..start + self.slot_width()
    }

    pub fn carrying(&self) -> Range<usize> {
        let start = Self::NEIGHBORHOOD_CELLS * self.slot_width();
        start..start + self.slot_width()
    }

    pub fn matches(&self) -> Range<usize> {
        let start = self.carrying().end;
        start..start + Self::NEIGHBORHOOD_CELLS
    }

    pub fn last_action(&self) -> Option<Range<usize>> {
        self.action_memory.then(|| {
            let start = self.matches().end;
            start..start + Action::COUNT
        })
    }

    /// Total observation length.
    pub fn len(&self) -> usize {
        self.last_action()
            .map_or(self.matches().end, |range| range.end)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds observation vectors for ants.
pub struct ObservationBuilder;

impl ObservationBuilder {
    /// Builds the observation vector of `ant`.
    ///
    /// Out-of-bounds cells of a bounded world are encoded in the "empty"
    /// slot and never match, so every one-hot block sums to exactly 1. An
    /// ant with no action yet reports `NoOp` in the memory block. A carried
    /// color outside the world's palette is encoded as empty-handed.
    ///
    /// # Arguments
    ///
    /// * `ant` - The observing ant
    /// * `world` - The shared grid
    /// * `action_memory` - Append the previous action block
    pub fn build(ant: &Ant, world: &GridWorld, action_memory: bool) -> Vec<f64> {
        let layout = ObservationLayout::new(world.colors(), action_memory);
        let mut obs = vec![0.0; layout.len()];
        let window = world.neighborhood(ant.position, 1);

        for (i, view) in window.iter().enumerate() {
            obs[layout.cell(i).start + Self::slot(*view)] = 1.0;
        }

        let carried = ant.carrying.filter(|c| c.index() < layout.colors());
        let carrying = layout.carrying();
        obs[carrying.start + carried.map_or(0, |c| c.index() + 1)] = 1.0;

        if let Some(carried) = carried {
            let matches = layout.matches();
            for (i, view) in window.iter().enumerate() {
                if view.color() == Some(carried) {
                    obs[matches.start + i] = 1.0;
                }
            }
        }

        if let Some(memory) = layout.last_action() {
            let last = ant.last_action.unwrap_or(Action::NoOp);
            obs[memory.start + last.index()] = 1.0;
        }

        obs
    }

    /// One-hot slot of a cell: 0 for empty or off-grid, `c + 1` for color `c`.
    fn slot(view: CellView) -> usize {
        view.color().map_or(0, |c| c.index() + 1)
    }
}
