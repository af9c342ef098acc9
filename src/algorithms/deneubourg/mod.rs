//! Rule-based ant behavior (Deneubourg model).
//!
//! Each cycle an ant performs at most one state-changing action:
//!
//! 1. **Pick gate**: empty-handed on an occupied cell, pick with probability
//!    `(k1 / (k1 + s))²`, `s` being the similarity of the item to its neighbors.
//! 2. **Drop gate**: carrying on an empty cell, drop with probability
//!    `(s / (k2 + s))²`, `s` being the similarity of the carried color to
//!    the cell's neighbors.
//! 3. **Movement**: if no gate fired, step to a uniformly random neighbor.
//!    In a bounded world, directions leading off the grid are excluded from
//!    the draw rather than clamped, so edges introduce no directional bias.
//!
//! # Module Structure
//!
//! - [`similarity`] - local similarity of a color to a cell's neighborhood
//! - [`probability`] - pick/drop response functions

pub mod probability;
pub mod similarity;

use rand::seq::SliceRandom;
use rand::Rng;

use super::AntBehavior;
use crate::ant::{Ant, Outcome};
use crate::config::{check_threshold, ConfigError};
use crate::grid::{Adjacency, Cell, GridWorld};
use crate::simulation::{SimulationConfig, SimulationError};
use crate::SimRng;

pub use probability::{drop_probability, pick_probability};
pub use similarity::{local_similarity, same_color_neighbors, SimilarityBasis};

/// Probabilistic pick/drop rule with random-walk movement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeneubourgRule {
    k1: f64,
    k2: f64,
    adjacency: Adjacency,
    basis: SimilarityBasis,
}

impl DeneubourgRule {
    /// Creates a rule with Moore adjacency and occupied-neighbor similarity.
    ///
    /// # Arguments
    ///
    /// * `k1` - Pick threshold, > 0
    /// * `k2` - Drop threshold, > 0
    pub fn new(k1: f64, k2: f64) -> Result<Self, ConfigError> {
        check_threshold("k1", k1)?;
        check_threshold("k2", k2)?;
        Ok(Self {
            k1,
            k2,
            adjacency: Adjacency::default(),
            basis: SimilarityBasis::default(),
        })
    }

    /// Builds the rule described by a simulation configuration.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.k1, config.k2)?
            .with_adjacency(config.adjacency)
            .with_similarity(config.similarity))
    }

    pub fn with_adjacency(mut self, adjacency: Adjacency) -> Self {
        self.adjacency = adjacency;
        self
    }

    pub fn with_similarity(mut self, basis: SimilarityBasis) -> Self {
        self.basis = basis;
        self
    }

    pub fn k1(&self) -> f64 {
        self.k1
    }

    pub fn k2(&self) -> f64 {
        self.k2
    }

    /// Steps to a uniformly random neighbor that stays on the grid.
    fn wander<R: Rng + ?Sized>(
        &self,
        ant: &mut Ant,
        world: &GridWorld,
        rng: &mut R,
    ) -> Result<Outcome, SimulationError> {
        let moves: Vec<(isize, isize)> = self
            .adjacency
            .offsets()
            .iter()
            .copied()
            .filter(|&(d_row, d_col)| world.can_step(ant.position, d_row, d_col))
            .collect();

        match moves.choose(rng) {
            Some(&(d_row, d_col)) => Ok(ant.move_by(world, d_row, d_col)?),
            None => Ok(Outcome::Idle),
        }
    }
}

impl AntBehavior for DeneubourgRule {
    fn act(
        &mut self,
        ant: &mut Ant,
        world: &mut GridWorld,
        rng: &mut SimRng,
    ) -> Result<Outcome, SimulationError> {
        match (ant.carrying, world.get(ant.position)?) {
            (None, Cell::Occupied(color)) => {
                let s = local_similarity(world, ant.position, color, self.adjacency, self.basis);
                if rng.gen::<f64>() < pick_probability(self.k1, s) {
                    return Ok(Outcome::Picked(ant.pick_up(world)?));
                }
            }
            (Some(color), Cell::Empty) => {
                let s = local_similarity(world, ant.position, color, self.adjacency, self.basis);
                if rng.gen::<f64>() < drop_probability(self.k2, s) {
                    return Ok(Outcome::Dropped(ant.put_down(world)?));
                }
            }
            _ => {}
        }
        self.wander(ant, world, rng)
    }

    fn name(&self) -> &str {
        "deneubourg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{AddressingMode, Color, Position};
    use crate::seeded_rng;

    fn world(h: usize, w: usize) -> GridWorld {
        GridWorld::new(h, w, 2, AddressingMode::Bounded).unwrap()
    }

    #[test]
    fn thresholds_must_be_positive() {
        assert!(DeneubourgRule::new(0.0, 0.1).is_err());
        assert!(DeneubourgRule::new(0.1, -0.1).is_err());
        assert!(DeneubourgRule::new(0.3, 0.15).is_ok());
    }

    #[test]
    fn isolated_item_is_always_picked() {
        let mut rule = DeneubourgRule::new(0.3, 0.15).unwrap();
        let mut rng = seeded_rng(1);
        for _ in 0..20 {
            let mut w = world(5, 5);
            w.place(Position::new(2, 2), Color(0)).unwrap();
            let mut ant = Ant::new(0, Position::new(2, 2));
            let outcome = rule.act(&mut ant, &mut w, &mut rng).unwrap();
            assert_eq!(outcome, Outcome::Picked(Color(0)));
            assert_eq!(ant.position, Position::new(2, 2));
        }
    }

    #[test]
    fn never_drops_without_matching_neighbors() {
        let mut rule = DeneubourgRule::new(0.3, 0.15).unwrap();
        let mut rng = seeded_rng(2);
        let mut w = world(5, 5);
        w.place(Position::new(1, 1), Color(1)).unwrap();
        for _ in 0..50 {
            let mut ant = Ant::new(0, Position::new(2, 2));
            ant.carrying = Some(Color(0));
            let outcome = rule.act(&mut ant, &mut w, &mut rng).unwrap();
            assert!(matches!(outcome, Outcome::Moved { .. }));
            assert_eq!(ant.carrying, Some(Color(0)));
        }
    }

    #[test]
    fn carrying_on_occupied_cell_moves() {
        let mut rule = DeneubourgRule::new(0.3, 0.15).unwrap();
        let mut rng = seeded_rng(3);
        let mut w = world(3, 3);
        w.place(Position::new(1, 1), Color(0)).unwrap();
        let mut ant = Ant::new(0, Position::new(1, 1));
        ant.carrying = Some(Color(0));
        let outcome = rule.act(&mut ant, &mut w, &mut rng).unwrap();
        assert!(matches!(outcome, Outcome::Moved { .. }));
        assert_eq!(w.occupied_count(), 1);
    }

    #[test]
    fn empty_handed_on_empty_cell_moves() {
        let mut rule = DeneubourgRule::new(0.3, 0.15).unwrap();
        let mut rng = seeded_rng(4);
        let mut w = world(3, 3);
        let mut ant = Ant::new(0, Position::new(1, 1));
        let outcome = rule.act(&mut ant, &mut w, &mut rng).unwrap();
        assert!(matches!(outcome, Outcome::Moved { .. }));
    }

    #[test]
    fn corner_moves_never_clamp() {
        let mut rule = DeneubourgRule::new(0.3, 0.15).unwrap();
        let mut rng = seeded_rng(5);
        let mut w = world(4, 4);
        let corner = Position::new(0, 0);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let mut ant = Ant::new(0, corner);
            match rule.act(&mut ant, &mut w, &mut rng).unwrap() {
                Outcome::Moved { from, to } => {
                    assert_eq!(from, corner);
                    assert_ne!(to, corner);
                    assert_eq!(ant.position, to);
                    if !seen.contains(&to) {
                        seen.push(to);
                    }
                }
                other => panic!("empty-handed ant on an empty cell must move, got {:?}", other),
            }
        }
        // only the three in-bounds neighbors are ever chosen
        seen.sort();
        assert_eq!(
            seen,
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1)
            ]
        );
    }

    #[test]
    fn single_cell_grid_is_idle() {
        let mut rule = DeneubourgRule::new(0.3, 0.15).unwrap();
        let mut rng = seeded_rng(6);
        let mut w = world(1, 1);
        let mut ant = Ant::new(0, Position::new(0, 0));
        assert_eq!(rule.act(&mut ant, &mut w, &mut rng).unwrap(), Outcome::Idle);
    }

    #[test]
    fn von_neumann_moves_are_cardinal() {
        let mut rule = DeneubourgRule::new(0.3, 0.15)
            .unwrap()
            .with_adjacency(Adjacency::VonNeumann);
        let mut rng = seeded_rng(7);
        let mut w = world(5, 5);
        for _ in 0..50 {
            let mut ant = Ant::new(0, Position::new(2, 2));
            if let Outcome::Moved { from, to } = rule.act(&mut ant, &mut w, &mut rng).unwrap() {
                let dr = from.row.abs_diff(to.row);
                let dc = from.col.abs_diff(to.col);
                assert_eq!(dr + dc, 1);
            }
        }
    }
}
