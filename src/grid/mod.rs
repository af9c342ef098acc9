//! The shared 2D world: cell storage, addressing and item mutation.

pub mod error;
pub mod types;

mod world;
pub use world::GridWorld;

pub use error::GridError;
pub use types::{
    AddressingMode, Adjacency, Cell, CellView, Color, Direction, Position, MOORE_OFFSETS,
    VON_NEUMANN_OFFSETS,
};
