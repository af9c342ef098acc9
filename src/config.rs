//! Grid configuration shared by the rule-based simulation and the RL environment.
//!
//! Every parameter bundle in the crate is an immutable value that is checked
//! once with `validate()` before anything is built from it.

use thiserror::Error;

use crate::grid::AddressingMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest palette a [`GridWorld`](crate::grid::GridWorld) can hold.
pub const MAX_COLORS: usize = 256;

/// Errors raised while validating a parameter bundle.
///
/// These are fatal at construction time and never recovered.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Grid dimensions must be positive, got {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },

    #[error("Color count must be in 1..={max}, got {0}", max = MAX_COLORS)]
    InvalidColorCount(usize),

    #[error("Fill percentage must be within [0, 100], got {0}")]
    InvalidFillPercentage(f64),

    #[error("Threshold {name} must be finite and > 0, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("At least one agent is required")]
    NoAgents,

    #[error("Track interval must be at least 1")]
    InvalidTrackInterval,

    #[error("Episode horizon must be at least 1 step")]
    InvalidHorizon,

    #[error("Reward shaping is inconsistent: {0}")]
    RewardShaping(&'static str),

    #[error("Sweep needs at least one value on every axis and one run per point")]
    EmptySweep,
}

/// Geometry and initial population of a grid world.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    /// Number of rows (H).
    pub height: usize,
    /// Number of columns (W).
    pub width: usize,
    /// Palette size (K).
    pub colors: usize,
    /// Percentage of cells populated at start, in `[0, 100]`.
    pub fill_percentage: f64,
    /// Edge behavior, fixed for the lifetime of the world.
    pub addressing: AddressingMode,
}

impl GridConfig {
    /// Checks dimensions, palette size and fill percentage.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::InvalidDimensions {
                height: self.height,
                width: self.width,
            });
        }
        if self.colors == 0 || self.colors > MAX_COLORS {
            return Err(ConfigError::InvalidColorCount(self.colors));
        }
        if !(0.0..=100.0).contains(&self.fill_percentage) {
            return Err(ConfigError::InvalidFillPercentage(self.fill_percentage));
        }
        Ok(())
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }

    /// Number of items placed at start: `floor(H × W × p / 100)`.
    pub fn item_count(&self) -> usize {
        (self.cell_count() as f64 * self.fill_percentage / 100.0).floor() as usize
    }

    /// Splits [`item_count`](Self::item_count) as evenly as possible across
    /// the palette; the first `item_count % K` colors get one extra item.
    pub fn counts_per_color(&self) -> Vec<usize> {
        if self.colors == 0 {
            return Vec::new();
        }
        let total = self.item_count();
        let base = total / self.colors;
        let remainder = total % self.colors;
        (0..self.colors)
            .map(|c| base + usize::from(c < remainder))
            .collect()
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            height: 20,
            width: 20,
            colors: 2,
            fill_percentage: 30.0,
            addressing: AddressingMode::Bounded,
        }
    }
}

pub(crate) fn check_threshold(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}
