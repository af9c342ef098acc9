//! Legal-action masking and deterministic action application.

use super::error::EnvError;
use super::types::{Action, ActionMask};
use crate::ant::{Ant, Outcome};
use crate::grid::{Cell, GridWorld};

/// Returns which of the 7 actions `ant` may take on `world`.
///
/// - moves: illegal only when a bounded world forbids leaving the grid
/// - pick: empty-handed and standing on an item
/// - drop: carrying and standing on an empty cell
/// - no-op: always legal
pub fn legal_action_mask(ant: &Ant, world: &GridWorld) -> ActionMask {
    let mut mask = [false; Action::COUNT];
    for action in Action::moves() {
        if let Some(direction) = action.direction() {
            let (d_row, d_col) = direction.delta();
            mask[action.index()] = world.can_step(ant.position, d_row, d_col);
        }
    }

    let cell = world.get(ant.position).ok();
    mask[Action::Pick.index()] = !ant.is_carrying() && matches!(cell, Some(Cell::Occupied(_)));
    mask[Action::Drop.index()] = ant.is_carrying() && matches!(cell, Some(Cell::Empty));
    mask[Action::NoOp.index()] = true;
    mask
}

/// Applies `action` for `ant`, rejecting it if the mask forbids it.
///
/// Pick and drop always execute when legal; there is no probabilistic gate
/// here. On success the action is remembered as the ant's last action. On
/// failure neither the ant nor the world changes.
pub fn apply_action(ant: &mut Ant, world: &mut GridWorld, action: Action) -> Result<Outcome, EnvError> {
    if !legal_action_mask(ant, world)[action.index()] {
        return Err(EnvError::IllegalAction {
            action,
            position: ant.position,
        });
    }

    let outcome = match action {
        Action::North | Action::South | Action::East | Action::West => {
            let (d_row, d_col) = action.direction().map_or((0, 0), |d| d.delta());
            ant.move_by(world, d_row, d_col)?
        }
        Action::Pick => Outcome::Picked(ant.pick_up(world)?),
        Action::Drop => Outcome::Dropped(ant.put_down(world)?),
        Action::NoOp => Outcome::Idle,
    };
    ant.last_action = Some(action);
    Ok(outcome)
}
