use crate::error::MazeError;

use super::cell::{Cell, Direction};

/// Read-only wall state of one cell, as handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallState {
    pub x: u16,
    pub y: u16,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl From<&Cell> for WallState {
    fn from(cell: &Cell) -> Self {
        WallState {
            x: cell.x(),
            y: cell.y(),
            top: cell.has_wall(Direction::Top),
            right: cell.has_wall(Direction::Right),
            bottom: cell.has_wall(Direction::Bottom),
            left: cell.has_wall(Direction::Left),
        }
    }
}

/// Rectangular array of cells stored row-major, `index = x + y * cols`.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Box<[Cell]>,
    cols: u16,
    rows: u16,
}

impl Grid {
    /// Creates a `cols x rows` grid with every wall present and no cell visited.
    pub fn new(cols: u16, rows: u16) -> Result<Self, MazeError> {
        if cols < 1 || rows < 1 {
            return Err(MazeError::InvalidDimension { cols, rows });
        }
        let cells = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| Cell::new(x, y)))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Ok(Grid { cells, cols, rows })
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, a grid holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_in_bounds(&self, (x, y): (u16, u16)) -> bool {
        x < self.cols && y < self.rows
    }

    /// Row-major index of a coordinate, `None` when out of bounds.
    pub fn index_of(&self, coord: (u16, u16)) -> Option<usize> {
        // Overflow-safe since cols and rows are u16 (assuming usize is at least 32 bits)
        self.is_in_bounds(coord)
            .then(|| coord.0 as usize + coord.1 as usize * self.cols as usize)
    }

    /// The cell at `(x, y)`, or `None` when out of bounds.
    pub fn at(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of((x, y)).map(|idx| &self.cells[idx])
    }

    pub(crate) fn at_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index_of((x, y)).map(move |idx| &mut self.cells[idx])
    }

    /// All cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Designated entrance, always the top-left cell.
    pub fn entrance(&self) -> (u16, u16) {
        (0, 0)
    }

    /// Designated exit, always the bottom-right cell.
    pub fn exit(&self) -> (u16, u16) {
        (self.cols - 1, self.rows - 1)
    }

    /// Wall state of every cell in index order. Never mutates the grid.
    pub fn snapshot(&self) -> Vec<WallState> {
        self.cells.iter().map(WallState::from).collect()
    }

    /// Number of cells currently flagged as visited.
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_visited()).count()
    }
}
