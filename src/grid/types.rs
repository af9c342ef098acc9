//! Core value types for the grid world.
//!
//! Positions, item colors, cell states, edge addressing and the movement
//! vocabularies (compass neighborhoods and cardinal directions).

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An item color, as a zero-based index into the palette of size K.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color(pub u8);

impl Color {
    /// Returns the palette index of this color.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Builds a color from a palette index.
    ///
    /// Returns `None` when the index does not fit the 256-entry palette.
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().map(Color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "color_{}", self.0)
    }
}

/// Stored state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(color) => Some(*color),
        }
    }
}

/// A cell as seen through a neighborhood query.
///
/// Unlike [`Cell`], this can report that the requested coordinate lies
/// outside a bounded grid. Out-of-bounds is never conflated with empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellView {
    OutOfBounds,
    Empty,
    Occupied(Color),
}

impl CellView {
    pub fn color(&self) -> Option<Color> {
        match self {
            CellView::Occupied(color) => Some(*color),
            _ => None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, CellView::Occupied(_))
    }

    pub fn is_in_bounds(&self) -> bool {
        !matches!(self, CellView::OutOfBounds)
    }
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => CellView::Empty,
            Cell::Occupied(color) => CellView::Occupied(color),
        }
    }
}

/// A `(row, col)` coordinate inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// How coordinates outside `[0, H) × [0, W)` are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AddressingMode {
    /// Edges wrap around (modulo addressing).
    Toroidal,
    /// Hard edges; out-of-range access is forbidden.
    #[default]
    Bounded,
}

/// Offsets of the 8 compass neighbors, row-major.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Offsets of the 4 edge-sharing neighbors, row-major.
pub const VON_NEUMANN_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Which neighbors count as adjacent for similarity and rule-based movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Adjacency {
    /// 8 neighbors, diagonals included.
    #[default]
    Moore,
    /// 4 neighbors sharing an edge.
    VonNeumann,
}

impl Adjacency {
    /// Returns the `(d_row, d_col)` offsets of this neighborhood.
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Adjacency::Moore => &MOORE_OFFSETS,
            Adjacency::VonNeumann => &VON_NEUMANN_OFFSETS,
        }
    }
}

/// Cardinal movement direction. North decreases the row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Returns the `(d_row, d_col)` delta of this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}
