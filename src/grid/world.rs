use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::error::GridError;
use super::types::{AddressingMode, Adjacency, Cell, CellView, Color, Position};
use crate::config::{ConfigError, GridConfig, MAX_COLORS};

/// A 2D grid of cells, each empty or holding one colored item.
///
/// The world is the single shared state of a run: agents never keep a copy
/// of it, they read and mutate it through the operations below.
///
/// # Invariants
///
/// - Dimensions and addressing mode never change after construction.
/// - Items are never destroyed: [`pick`](Self::pick) and [`drop`](Self::drop)
///   only relocate them. `items_placed` counts every item ever introduced
///   through [`place`](Self::place), so `occupied + carried == items_placed`
///   holds between agent actions.
#[derive(Debug, Clone, PartialEq)]
pub struct GridWorld {
    height: usize,
    width: usize,
    colors: usize,
    addressing: AddressingMode,
    /// Row-major cell storage.
    cells: Vec<Cell>,
    occupied: usize,
    items_placed: usize,
}

impl GridWorld {
    /// Creates an empty world.
    pub fn new(
        height: usize,
        width: usize,
        colors: usize,
        addressing: AddressingMode,
    ) -> Result<Self, ConfigError> {
        if height == 0 || width == 0 {
            return Err(ConfigError::InvalidDimensions { height, width });
        }
        if colors == 0 || colors > MAX_COLORS {
            return Err(ConfigError::InvalidColorCount(colors));
        }
        Ok(Self {
            height,
            width,
            colors,
            addressing,
            cells: vec![Cell::Empty; height * width],
            occupied: 0,
            items_placed: 0,
        })
    }

    /// Creates a world from `config` and scatters its items at random.
    ///
    /// Per-color counts come from [`GridConfig::counts_per_color`].
    pub fn populated<R: Rng + ?Sized>(config: &GridConfig, rng: &mut R) -> Result<Self, GridError> {
        config.validate()?;
        let mut world = Self::new(
            config.height,
            config.width,
            config.colors,
            config.addressing,
        )?;
        world.random_fill(&config.counts_per_color(), rng)?;
        Ok(world)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Palette size K.
    pub fn colors(&self) -> usize {
        self.colors
    }

    pub fn addressing(&self) -> AddressingMode {
        self.addressing
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.occupied
    }

    /// Number of items introduced into this world so far.
    pub fn items_placed(&self) -> usize {
        self.items_placed
    }

    /// Resolves a signed coordinate according to the addressing mode.
    ///
    /// Toroidal worlds always resolve; bounded worlds return `None` when the
    /// coordinate lies outside the grid.
    pub fn resolve(&self, row: isize, col: isize) -> Option<Position> {
        match self.addressing {
            AddressingMode::Toroidal => Some(Position::new(
                row.rem_euclid(self.height as isize) as usize,
                col.rem_euclid(self.width as isize) as usize,
            )),
            AddressingMode::Bounded => {
                let in_rows = row >= 0 && (row as usize) < self.height;
                let in_cols = col >= 0 && (col as usize) < self.width;
                (in_rows && in_cols).then(|| Position::new(row as usize, col as usize))
            }
        }
    }

    /// Resolves `position + (d_row, d_col)`.
    pub fn offset(&self, position: Position, d_row: isize, d_col: isize) -> Option<Position> {
        self.resolve(position.row as isize + d_row, position.col as isize + d_col)
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.height && position.col < self.width
    }

    /// Returns the stored state of a cell.
    pub fn get(&self, position: Position) -> Result<Cell, GridError> {
        self.index(position).map(|i| self.cells[i])
    }

    /// Looks up a signed coordinate, reporting out-of-range cells in bounded mode.
    pub fn view(&self, row: isize, col: isize) -> CellView {
        match self.resolve(row, col) {
            Some(p) => self.cells[p.row * self.width + p.col].into(),
            None => CellView::OutOfBounds,
        }
    }

    /// Returns the square window of side `2·radius + 1` centered on
    /// `position`, row-major, centre included.
    pub fn neighborhood(&self, position: Position, radius: usize) -> Vec<CellView> {
        let r = radius as isize;
        let (row, col) = (position.row as isize, position.col as isize);
        let side = 2 * radius + 1;
        let mut window = Vec::with_capacity(side * side);
        for d_row in -r..=r {
            for d_col in -r..=r {
                window.push(self.view(row + d_row, col + d_col));
            }
        }
        window
    }

    /// Returns the distinct adjacent cells of `position` under `adjacency`,
    /// centre excluded.
    ///
    /// On a torus with a side of 1 or 2, several offsets resolve to the same
    /// cell or back onto `position`; each such cell is reported once and the
    /// centre never.
    pub fn neighbors(&self, position: Position, adjacency: Adjacency) -> Vec<CellView> {
        let offsets = adjacency.offsets();
        let mut seen: Vec<Position> = Vec::with_capacity(offsets.len());
        let mut views = Vec::with_capacity(offsets.len());
        for &(d_row, d_col) in offsets {
            match self.offset(position, d_row, d_col) {
                Some(p) if p == position || seen.contains(&p) => {}
                Some(p) => {
                    seen.push(p);
                    views.push(self.cells[p.row * self.width + p.col].into());
                }
                None => views.push(CellView::OutOfBounds),
            }
        }
        views
    }

    /// Removes the item at `position` and returns its color.
    pub fn pick(&mut self, position: Position) -> Result<Color, GridError> {
        let i = self.index(position)?;
        match self.cells[i] {
            Cell::Empty => Err(GridError::EmptyCell(position)),
            Cell::Occupied(color) => {
                self.cells[i] = Cell::Empty;
                self.occupied -= 1;
                Ok(color)
            }
        }
    }

    /// Puts an item that was previously picked back onto an empty cell.
    pub fn drop(&mut self, position: Position, color: Color) -> Result<(), GridError> {
        self.check_color(color)?;
        let i = self.index(position)?;
        if let Cell::Occupied(existing) = self.cells[i] {
            return Err(GridError::OccupiedCell {
                position,
                color: existing,
            });
        }
        self.cells[i] = Cell::Occupied(color);
        self.occupied += 1;
        Ok(())
    }

    /// Introduces a new item on an empty cell.
    ///
    /// Unlike [`drop`](Self::drop) this grows the conserved item count.
    pub fn place(&mut self, position: Position, color: Color) -> Result<(), GridError> {
        self.drop(position, color)?;
        self.items_placed += 1;
        Ok(())
    }

    /// Places `counts_per_color[c]` items of each color `c` on distinct,
    /// uniformly chosen empty cells. Already-occupied cells are skipped.
    ///
    /// Deterministic for a given generator state.
    pub fn random_fill<R: Rng + ?Sized>(
        &mut self,
        counts_per_color: &[usize],
        rng: &mut R,
    ) -> Result<(), GridError> {
        if counts_per_color.len() > self.colors {
            return Err(GridError::UnknownColor {
                color: Color::from_index(self.colors).unwrap_or(Color(u8::MAX)),
                colors: self.colors,
            });
        }

        let requested: usize = counts_per_color.iter().sum();
        let mut empty: Vec<usize> = (0..self.cells.len())
            .filter(|&i| self.cells[i].is_empty())
            .collect();
        if requested > empty.len() {
            return Err(GridError::InsufficientSpace {
                requested,
                available: empty.len(),
            });
        }

        let (chosen, _) = empty.partial_shuffle(rng, requested);
        let mut targets = chosen.iter();
        for (c, &count) in counts_per_color.iter().enumerate() {
            let color = Color(c as u8);
            for &i in targets.by_ref().take(count) {
                self.cells[i] = Cell::Occupied(color);
            }
        }
        self.occupied += requested;
        self.items_placed += requested;
        Ok(())
    }

    /// Resolves a move of `(d_row, d_col)` from `position`.
    ///
    /// Toroidal worlds always wrap. Bounded worlds reject moves that leave
    /// the grid with [`GridError::OutOfBounds`]; they never clamp.
    pub fn step_from(
        &self,
        position: Position,
        d_row: isize,
        d_col: isize,
    ) -> Result<Position, GridError> {
        let row = position.row as isize + d_row;
        let col = position.col as isize + d_col;
        self.resolve(row, col)
            .ok_or(GridError::OutOfBounds { row, col })
    }

    /// Returns true if a move of `(d_row, d_col)` from `position` stays on the grid.
    pub fn can_step(&self, position: Position, d_row: isize, d_col: isize) -> bool {
        self.offset(position, d_row, d_col).is_some()
    }

    /// Draws a uniformly random position.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(rng.gen_range(0..self.height), rng.gen_range(0..self.width))
    }

    /// Iterates over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Position::new(i / self.width, i % self.width), *cell))
    }

    /// Number of items of each color currently on the grid.
    pub fn color_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.colors];
        for cell in &self.cells {
            if let Cell::Occupied(color) = cell {
                counts[color.index()] += 1;
            }
        }
        counts
    }

    fn index(&self, position: Position) -> Result<usize, GridError> {
        if self.contains(position) {
            Ok(position.row * self.width + position.col)
        } else {
            Err(GridError::OutOfBounds {
                row: position.row as isize,
                col: position.col as isize,
            })
        }
    }

    fn check_color(&self, color: Color) -> Result<(), GridError> {
        if color.index() < self.colors {
            Ok(())
        } else {
            Err(GridError::UnknownColor {
                color,
                colors: self.colors,
            })
        }
    }
}

const COLOR_GLYPHS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

impl fmt::Display for GridWorld {
    /// One line per row: `.` for empty, `0-9a-z` for colors, `#` beyond that.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                let glyph = match cell {
                    Cell::Empty => '.',
                    Cell::Occupied(color) => COLOR_GLYPHS
                        .get(color.index())
                        .map(|&b| b as char)
                        .unwrap_or('#'),
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bounded(h: usize, w: usize) -> GridWorld {
        GridWorld::new(h, w, 2, AddressingMode::Bounded).unwrap()
    }

    fn toroidal(h: usize, w: usize) -> GridWorld {
        GridWorld::new(h, w, 2, AddressingMode::Toroidal).unwrap()
    }

    #[test]
    fn new_rejects_bad_shape() {
        assert!(GridWorld::new(0, 3, 1, AddressingMode::Bounded).is_err());
        assert!(GridWorld::new(3, 3, 0, AddressingMode::Bounded).is_err());
    }

    #[test]
    fn pick_and_drop_relocate_items() {
        let mut world = bounded(3, 3);
        world.place(Position::new(1, 1), Color(0)).unwrap();
        assert_eq!(world.occupied_count(), 1);

        let color = world.pick(Position::new(1, 1)).unwrap();
        assert_eq!(color, Color(0));
        assert_eq!(world.occupied_count(), 0);

        world.drop(Position::new(0, 0), color).unwrap();
        assert_eq!(world.get(Position::new(0, 0)), Ok(Cell::Occupied(Color(0))));
        assert_eq!(world.occupied_count(), 1);
        assert_eq!(world.items_placed(), 1);
    }

    #[test]
    fn pick_from_empty_cell_fails() {
        let mut world = bounded(2, 2);
        assert_eq!(
            world.pick(Position::new(0, 0)),
            Err(GridError::EmptyCell(Position::new(0, 0)))
        );
    }

    #[test]
    fn drop_onto_occupied_cell_fails() {
        let mut world = bounded(2, 2);
        world.place(Position::new(0, 0), Color(1)).unwrap();
        assert_eq!(
            world.drop(Position::new(0, 0), Color(0)),
            Err(GridError::OccupiedCell {
                position: Position::new(0, 0),
                color: Color(1)
            })
        );
        assert_eq!(world.occupied_count(), 1);
    }

    #[test]
    fn drop_rejects_color_outside_palette() {
        let mut world = bounded(2, 2);
        assert!(matches!(
            world.drop(Position::new(0, 0), Color(5)),
            Err(GridError::UnknownColor { .. })
        ));
    }

    #[test]
    fn bounded_neighborhood_reports_out_of_bounds() {
        let mut world = bounded(3, 3);
        world.place(Position::new(0, 1), Color(1)).unwrap();
        let window = world.neighborhood(Position::new(0, 0), 1);
        assert_eq!(window.len(), 9);
        // top row and left column are off the grid
        assert_eq!(window[0], CellView::OutOfBounds);
        assert_eq!(window[1], CellView::OutOfBounds);
        assert_eq!(window[3], CellView::OutOfBounds);
        assert_eq!(window[4], CellView::Empty);
        assert_eq!(window[5], CellView::Occupied(Color(1)));
    }

    #[test]
    fn toroidal_neighborhood_wraps() {
        let mut world = toroidal(3, 3);
        world.place(Position::new(2, 2), Color(1)).unwrap();
        let window = world.neighborhood(Position::new(0, 0), 1);
        assert!(window.iter().all(CellView::is_in_bounds));
        assert_eq!(window[0], CellView::Occupied(Color(1)));
    }

    #[test]
    fn neighbors_on_narrow_torus_skip_centre_and_duplicates() {
        let world = toroidal(1, 5);
        // only (0, 1) and (0, 3) are distinct from the centre
        assert_eq!(world.neighbors(Position::new(0, 2), Adjacency::Moore).len(), 2);
        assert_eq!(world.neighbors(Position::new(0, 2), Adjacency::VonNeumann).len(), 2);

        let world = toroidal(2, 4);
        // columns 0 to 2 of the other row, columns 0 and 2 of its own
        assert_eq!(world.neighbors(Position::new(0, 1), Adjacency::Moore).len(), 5);
        assert_eq!(world.neighbors(Position::new(0, 1), Adjacency::VonNeumann).len(), 3);

        let world = toroidal(1, 1);
        assert!(world.neighbors(Position::new(0, 0), Adjacency::Moore).is_empty());
    }

    #[test]
    fn neighbors_keep_full_count_on_wide_grids() {
        assert_eq!(toroidal(3, 3).neighbors(Position::new(0, 0), Adjacency::Moore).len(), 8);
        let corner = bounded(3, 3).neighbors(Position::new(0, 0), Adjacency::Moore);
        assert_eq!(corner.len(), 8);
        assert_eq!(corner.iter().filter(|v| v.is_in_bounds()).count(), 3);
    }

    #[test]
    fn radius_two_window_size() {
        let world = toroidal(4, 4);
        assert_eq!(world.neighborhood(Position::new(1, 1), 2).len(), 25);
    }

    #[test]
    fn bounded_step_rejects_exit() {
        let world = bounded(3, 3);
        assert_eq!(
            world.step_from(Position::new(0, 0), -1, 0),
            Err(GridError::OutOfBounds { row: -1, col: 0 })
        );
        assert_eq!(
            world.step_from(Position::new(0, 0), 1, 1),
            Ok(Position::new(1, 1))
        );
        assert!(!world.can_step(Position::new(2, 2), 0, 1));
    }

    #[test]
    fn toroidal_step_wraps() {
        let world = toroidal(3, 4);
        assert_eq!(
            world.step_from(Position::new(0, 0), -1, -1),
            Ok(Position::new(2, 3))
        );
    }

    #[test]
    fn random_fill_places_requested_counts() {
        let mut world = bounded(5, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        world.random_fill(&[4, 3], &mut rng).unwrap();
        assert_eq!(world.occupied_count(), 7);
        assert_eq!(world.color_counts(), vec![4, 3]);
        assert_eq!(world.items_placed(), 7);
    }

    #[test]
    fn random_fill_skips_occupied_cells() {
        let mut world = bounded(2, 2);
        world.place(Position::new(0, 0), Color(0)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        world.random_fill(&[0, 3], &mut rng).unwrap();
        assert_eq!(world.get(Position::new(0, 0)), Ok(Cell::Occupied(Color(0))));
        assert_eq!(world.occupied_count(), 4);
    }

    #[test]
    fn random_fill_rejects_overflow() {
        let mut world = bounded(2, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            world.random_fill(&[3, 2], &mut rng),
            Err(GridError::InsufficientSpace {
                requested: 5,
                available: 4
            })
        );
        assert_eq!(world.occupied_count(), 0);
    }

    #[test]
    fn random_fill_is_deterministic() {
        let config = GridConfig::default();
        let a = GridWorld::populated(&config, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        let b = GridWorld::populated(&config, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn display_renders_glyphs() {
        let mut world = bounded(2, 3);
        world.place(Position::new(0, 1), Color(0)).unwrap();
        world.place(Position::new(1, 2), Color(1)).unwrap();
        assert_eq!(world.to_string(), ".0.\n..1\n");
    }
}
