//! Ant agents: position, carrying state and the mechanics shared by the
//! rule-based and policy-driven behaviors.

use std::fmt;

use rand::Rng;
use tracing::trace;

use crate::algorithms::rl::types::Action;
use crate::grid::{Color, GridError, GridWorld, Position};

/// What an agent did during one decision-and-act cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved { from: Position, to: Position },
    Picked(Color),
    Dropped(Color),
    /// No state change (no-op, or no legal move on a 1×1 bounded grid).
    Idle,
}

/// A single ant sharing a [`GridWorld`] with the rest of the population.
///
/// Exactly one of "empty-handed" (`carrying == None`) or "carrying a color"
/// holds at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct Ant {
    /// Stable index within the population.
    pub id: usize,
    /// Always a valid cell of the world it lives in.
    pub position: Position,
    pub carrying: Option<Color>,
    /// Last action taken, tracked for action-memory observations.
    pub last_action: Option<Action>,
}

impl Ant {
    /// Creates an empty-handed ant.
    pub fn new(id: usize, position: Position) -> Self {
        Self {
            id,
            position,
            carrying: None,
            last_action: None,
        }
    }

    /// Creates an empty-handed ant on a uniformly random cell.
    pub fn spawn<R: Rng + ?Sized>(id: usize, world: &GridWorld, rng: &mut R) -> Self {
        Self::new(id, world.random_position(rng))
    }

    pub fn is_carrying(&self) -> bool {
        self.carrying.is_some()
    }

    /// Picks up the item under the ant.
    pub fn pick_up(&mut self, world: &mut GridWorld) -> Result<Color, GridError> {
        if self.carrying.is_some() {
            return Err(GridError::HandsFull(self.position));
        }
        let color = world.pick(self.position)?;
        self.carrying = Some(color);
        trace!(ant = self.id, position = %self.position, %color, "picked item");
        Ok(color)
    }

    /// Drops the carried item on the cell under the ant.
    pub fn put_down(&mut self, world: &mut GridWorld) -> Result<Color, GridError> {
        let color = self
            .carrying
            .ok_or(GridError::NothingCarried(self.position))?;
        world.drop(self.position, color)?;
        self.carrying = None;
        trace!(ant = self.id, position = %self.position, %color, "dropped item");
        Ok(color)
    }

    /// Moves by `(d_row, d_col)`, wrapping or rejecting per the world's addressing.
    pub fn move_by(
        &mut self,
        world: &GridWorld,
        d_row: isize,
        d_col: isize,
    ) -> Result<Outcome, GridError> {
        let from = self.position;
        let to = world.step_from(from, d_row, d_col)?;
        self.position = to;
        Ok(Outcome::Moved { from, to })
    }
}

impl fmt::Display for Ant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.carrying {
            Some(color) => write!(f, "ant_{} at {} carrying {}", self.id, self.position, color),
            None => write!(f, "ant_{} at {}", self.id, self.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{AddressingMode, Cell};

    fn world() -> GridWorld {
        let mut world = GridWorld::new(3, 3, 2, AddressingMode::Bounded).unwrap();
        world.place(Position::new(1, 1), Color(1)).unwrap();
        world
    }

    #[test]
    fn pick_then_drop_elsewhere() {
        let mut world = world();
        let mut ant = Ant::new(0, Position::new(1, 1));
        assert_eq!(ant.pick_up(&mut world), Ok(Color(1)));
        assert_eq!(ant.carrying, Some(Color(1)));
        assert_eq!(world.occupied_count(), 0);

        ant.move_by(&world, 1, 1).unwrap();
        assert_eq!(ant.put_down(&mut world), Ok(Color(1)));
        assert!(!ant.is_carrying());
        assert_eq!(world.get(Position::new(2, 2)), Ok(Cell::Occupied(Color(1))));
    }

    #[test]
    fn pick_while_carrying_fails() {
        let mut world = world();
        let mut ant = Ant::new(0, Position::new(1, 1));
        ant.carrying = Some(Color(0));
        assert_eq!(
            ant.pick_up(&mut world),
            Err(GridError::HandsFull(Position::new(1, 1)))
        );
        assert_eq!(world.occupied_count(), 1);
    }

    #[test]
    fn drop_without_item_fails() {
        let mut world = world();
        let mut ant = Ant::new(0, Position::new(0, 0));
        assert_eq!(
            ant.put_down(&mut world),
            Err(GridError::NothingCarried(Position::new(0, 0)))
        );
    }

    #[test]
    fn failed_drop_keeps_item() {
        let mut world = world();
        let mut ant = Ant::new(0, Position::new(1, 1));
        ant.carrying = Some(Color(0));
        assert!(ant.put_down(&mut world).is_err());
        assert_eq!(ant.carrying, Some(Color(0)));
    }

    #[test]
    fn move_out_of_bounded_grid_fails() {
        let world = world();
        let mut ant = Ant::new(0, Position::new(0, 0));
        assert!(ant.move_by(&world, 0, -1).is_err());
        assert_eq!(ant.position, Position::new(0, 0));
    }

    #[test]
    fn spawn_lands_on_grid() {
        use rand::SeedableRng;
        let world = world();
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
        for id in 0..20 {
            let ant = Ant::spawn(id, &world, &mut rng);
            assert!(world.contains(ant.position));
            assert!(!ant.is_carrying());
        }
    }
}
