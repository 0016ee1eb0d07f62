/// The four sides of a cell, in the order walls are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// All directions in storage order: top, right, bottom, left.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// The side of the adjacent cell that faces this one.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// Index into a cell's wall array.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Step one cell in this direction.
    /// Returns `None` on underflow; overflow past the grid is left to the bounds check.
    pub fn step(self, (x, y): (u16, u16)) -> Option<(u16, u16)> {
        match self {
            Direction::Top => y.checked_sub(1).map(|y| (x, y)),
            Direction::Right => x.checked_add(1).map(|x| (x, y)),
            Direction::Bottom => y.checked_add(1).map(|y| (x, y)),
            Direction::Left => x.checked_sub(1).map(|x| (x, y)),
        }
    }

    /// Direction leading from `from` to `to` when they are 4-adjacent.
    pub fn between(from: (u16, u16), to: (u16, u16)) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|dir| dir.step(from) == Some(to))
    }
}

/// One grid position with its four walls and a generation-time visited flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    x: u16,
    y: u16,
    /// Wall flags in [`Direction::ALL`] order, `true` meaning the wall is present.
    walls: [bool; 4],
    visited: bool,
}

impl Cell {
    /// A fully walled, unvisited cell.
    pub fn new(x: u16, y: u16) -> Self {
        Cell {
            x,
            y,
            walls: [true; 4],
            visited: false,
        }
    }

    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn y(&self) -> u16 {
        self.y
    }

    pub fn coord(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir.index()]
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn set_wall(&mut self, dir: Direction, present: bool) {
        self.walls[dir.index()] = present;
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }
}
