//! Parameter sweeps over independent, seeded runs.
//!
//! A sweep takes the cartesian product of its axes, runs `runs_per_point`
//! simulations per point (seeds `base.seed + run`, so every point sees the
//! same initial layouts for a given color/fill pair) and averages the score
//! histories step by step.
//!
//! Runs execute in parallel on the rayon pool. Each run owns its own world
//! and ants; nothing is shared between them.

use rayon::prelude::*;
use tracing::{debug, info};

use super::config::SimulationConfig;
use super::error::SimulationError;
use super::history::History;
use super::runner::Simulation;
use crate::config::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One combination of swept parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepParams {
    pub colors: usize,
    pub fill_percentage: f64,
    pub k2: f64,
    pub k1: f64,
    pub n_ants: usize,
}

/// Averaged outcome of all runs at one sweep point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepPoint {
    pub params: SweepParams,
    pub runs: usize,
    pub mean_history: History,
    pub mean_initial_score: f64,
    pub mean_final_score: f64,
}

/// Grid of simulation configurations derived from a base configuration.
#[derive(Debug, Clone)]
pub struct ParameterSweep {
    base: SimulationConfig,
    color_counts: Vec<usize>,
    fill_percentages: Vec<f64>,
    k2_values: Vec<f64>,
    k1_values: Vec<f64>,
    ant_counts: Vec<usize>,
    runs_per_point: usize,
}

impl ParameterSweep {
    /// Creates a single-point sweep taking every axis from `base`.
    pub fn new(base: SimulationConfig) -> Self {
        Self {
            color_counts: vec![base.grid.colors],
            fill_percentages: vec![base.grid.fill_percentage],
            k2_values: vec![base.k2],
            k1_values: vec![base.k1],
            ant_counts: vec![base.n_ants],
            runs_per_point: 1,
            base,
        }
    }

    pub fn with_color_counts(mut self, values: Vec<usize>) -> Self {
        self.color_counts = values;
        self
    }

    pub fn with_fill_percentages(mut self, values: Vec<f64>) -> Self {
        self.fill_percentages = values;
        self
    }

    pub fn with_k1_values(mut self, values: Vec<f64>) -> Self {
        self.k1_values = values;
        self
    }

    pub fn with_k2_values(mut self, values: Vec<f64>) -> Self {
        self.k2_values = values;
        self
    }

    pub fn with_ant_counts(mut self, values: Vec<usize>) -> Self {
        self.ant_counts = values;
        self
    }

    /// Number of independent runs averaged at each point.
    pub fn with_runs_per_point(mut self, runs: usize) -> Self {
        self.runs_per_point = runs;
        self
    }

    /// All points in cartesian order: colors, fill, k2, k1, then ant count.
    pub fn points(&self) -> Vec<SweepParams> {
        let mut points = Vec::new();
        for &colors in &self.color_counts {
            for &fill_percentage in &self.fill_percentages {
                for &k2 in &self.k2_values {
                    for &k1 in &self.k1_values {
                        for &n_ants in &self.ant_counts {
                            points.push(SweepParams {
                                colors,
                                fill_percentage,
                                k2,
                                k1,
                                n_ants,
                            });
                        }
                    }
                }
            }
        }
        points
    }

    /// Configuration of run number `run` at `params`.
    pub fn config_for(&self, params: &SweepParams, run: usize) -> SimulationConfig {
        let mut config = self.base.clone();
        config.grid.colors = params.colors;
        config.grid.fill_percentage = params.fill_percentage;
        config.k1 = params.k1;
        config.k2 = params.k2;
        config.n_ants = params.n_ants;
        config.seed = self.base.seed.wrapping_add(run as u64);
        config
    }

    /// Runs every point and returns results in [`points`](Self::points) order.
    pub fn run(&self) -> Result<Vec<SweepPoint>, SimulationError> {
        let points = self.points();
        if points.is_empty() || self.runs_per_point == 0 {
            return Err(ConfigError::EmptySweep.into());
        }
        info!(
            points = points.len(),
            runs_per_point = self.runs_per_point,
            steps = self.base.max_steps,
            "starting parameter sweep"
        );

        let jobs: Vec<(usize, usize)> = (0..points.len())
            .flat_map(|p| (0..self.runs_per_point).map(move |r| (p, r)))
            .collect();

        let results: Vec<(f64, History)> = jobs
            .par_iter()
            .map(|&(p, r)| -> Result<(f64, History), SimulationError> {
                let mut sim = Simulation::new(self.config_for(&points[p], r))?;
                sim.run()?;
                Ok((sim.initial_score(), sim.into_history()))
            })
            .collect::<Result<_, SimulationError>>()?;

        let sweep = points
            .into_iter()
            .zip(results.chunks(self.runs_per_point))
            .map(|(params, runs)| {
                let n = runs.len() as f64;
                let histories: Vec<History> = runs.iter().map(|(_, h)| h.clone()).collect();
                let mean_history = History::mean(&histories).unwrap_or_default();
                let mean_initial_score = runs.iter().map(|(s, _)| s).sum::<f64>() / n;
                let mean_final_score = histories
                    .iter()
                    .map(|h| h.last().map_or(0.0, |s| s.score))
                    .sum::<f64>()
                    / n;
                debug!(?params, mean_final_score, "sweep point finished");
                SweepPoint {
                    params,
                    runs: runs.len(),
                    mean_history,
                    mean_initial_score,
                    mean_final_score,
                }
            })
            .collect();
        Ok(sweep)
    }
}
