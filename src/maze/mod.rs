pub mod cell;
pub mod grid;

use std::collections::VecDeque;

pub use cell::{Cell, Direction};
pub use grid::{Grid, WallState};

use crate::error::MazeError;

/// Orientation of a dividing wall line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The line runs left to right and splits the rows.
    Horizontal,
    /// The line runs top to bottom and splits the columns.
    Vertical,
}

/// Get neighbors of a cell.
/// A neighbor is one step away in the cardinal directions, yielded in the fixed order
/// top, right, bottom, left. Out-of-bounds coordinates have no neighbors.
pub fn get_neighbors(coord: (u16, u16), grid: &Grid) -> impl Iterator<Item = (u16, u16)> + '_ {
    let in_bounds = grid.is_in_bounds(coord);
    Direction::ALL
        .into_iter()
        .filter(move |_| in_bounds)
        .filter_map(move |dir| dir.step(coord))
        .filter(move |&c| grid.is_in_bounds(c))
}

impl Grid {
    /// Clears the wall shared by two 4-adjacent cells, on both sides. Idempotent.
    ///
    /// # Errors
    /// `InvariantViolation` if the cells are out of bounds or not adjacent.
    pub fn remove_wall_between(&mut self, a: (u16, u16), b: (u16, u16)) -> Result<(), MazeError> {
        self.set_wall_between(a, b, false)
    }

    /// Puts back the wall shared by two 4-adjacent cells, on both sides. Idempotent.
    ///
    /// # Errors
    /// `InvariantViolation` if the cells are out of bounds or not adjacent.
    pub fn insert_wall_between(&mut self, a: (u16, u16), b: (u16, u16)) -> Result<(), MazeError> {
        self.set_wall_between(a, b, true)
    }

    fn set_wall_between(
        &mut self,
        a: (u16, u16),
        b: (u16, u16),
        present: bool,
    ) -> Result<(), MazeError> {
        let dir = Direction::between(a, b).ok_or_else(|| {
            MazeError::InvariantViolation(format!("cells {:?} and {:?} are not adjacent", a, b))
        })?;
        if !self.is_in_bounds(a) || !self.is_in_bounds(b) {
            return Err(MazeError::InvariantViolation(format!(
                "wall between {:?} and {:?} lies outside the {}x{} grid",
                a,
                b,
                self.cols(),
                self.rows()
            )));
        }
        if let Some(cell) = self.at_mut(a.0, a.1) {
            cell.set_wall(dir, present);
        }
        if let Some(cell) = self.at_mut(b.0, b.1) {
            cell.set_wall(dir.opposite(), present);
        }
        Ok(())
    }

    /// Whether the wall between two adjacent cells is open. Non-adjacent pairs are never open.
    pub fn is_open_between(&self, a: (u16, u16), b: (u16, u16)) -> bool {
        match (Direction::between(a, b), self.at(a.0, a.1)) {
            (Some(dir), Some(cell)) if self.is_in_bounds(b) => !cell.has_wall(dir),
            _ => false,
        }
    }

    pub fn is_visited(&self, coord: (u16, u16)) -> bool {
        self.at(coord.0, coord.1).is_some_and(Cell::is_visited)
    }

    /// Flags a cell as visited. Out-of-bounds coordinates are ignored.
    pub fn mark_visited(&mut self, coord: (u16, u16)) {
        if let Some(cell) = self.at_mut(coord.0, coord.1) {
            cell.set_visited(true);
        }
    }

    pub(crate) fn mark_all_visited(&mut self) {
        (0..self.rows()).for_each(|y| {
            (0..self.cols()).for_each(|x| self.mark_visited((x, y)));
        });
    }

    /// Number of interior walls that have been removed.
    /// Only right and bottom walls are counted so each passage is seen once.
    pub fn open_passages(&self) -> usize {
        self.cells()
            .map(|cell| {
                let (x, y) = cell.coord();
                let right = x + 1 < self.cols() && !cell.has_wall(Direction::Right);
                let down = y + 1 < self.rows() && !cell.has_wall(Direction::Bottom);
                right as usize + down as usize
            })
            .sum()
    }

    /// Flood fill over open passages. Entry `i` tells whether cell index `i` is reachable.
    pub fn reachable_from(&self, start: (u16, u16)) -> Vec<bool> {
        let mut reached = vec![false; self.len()];
        let Some(start_idx) = self.index_of(start) else {
            return reached;
        };
        reached[start_idx] = true;

        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for next in get_neighbors(current, self) {
                if !self.is_open_between(current, next) {
                    continue;
                }
                if let Some(idx) = self.index_of(next)
                    && !reached[idx]
                {
                    reached[idx] = true;
                    queue.push_back(next);
                }
            }
        }
        reached
    }

    /// Whether an open route joins the entrance to the exit.
    pub fn entrance_reaches_exit(&self) -> bool {
        let reached = self.reachable_from(self.entrance());
        self.index_of(self.exit()).is_some_and(|idx| reached[idx])
    }

    /// Whether every cell can be reached from the entrance.
    pub fn is_fully_connected(&self) -> bool {
        self.reachable_from(self.entrance()).into_iter().all(|r| r)
    }

    /// Whether every shared wall agrees on both sides and the outer boundary is intact.
    pub fn walls_consistent(&self) -> bool {
        self.cells().all(|cell| {
            Direction::ALL.into_iter().all(|dir| {
                match dir.step(cell.coord()).and_then(|(x, y)| self.at(x, y)) {
                    Some(other) => cell.has_wall(dir) == other.has_wall(dir.opposite()),
                    None => cell.has_wall(dir),
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_neighbors_order() {
        let grid = Grid::new(5, 5).unwrap();
        let neighbors = get_neighbors((2, 2), &grid).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![(2, 1), (3, 2), (2, 3), (1, 2)]);
    }

    #[test]
    fn test_get_neighbors_at_edges() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(
            get_neighbors((0, 0), &grid).collect::<Vec<_>>(),
            vec![(1, 0), (0, 1)]
        );
        assert_eq!(
            get_neighbors((2, 1), &grid).collect::<Vec<_>>(),
            vec![(2, 0), (1, 1)]
        );
        assert_eq!(get_neighbors((3, 0), &grid).count(), 0);

        let single = Grid::new(1, 1).unwrap();
        assert_eq!(get_neighbors((0, 0), &single).count(), 0);
    }

    #[test]
    fn test_remove_wall_updates_both_sides() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.remove_wall_between((1, 1), (2, 1)).unwrap();
        assert!(!grid.at(1, 1).unwrap().has_wall(Direction::Right));
        assert!(!grid.at(2, 1).unwrap().has_wall(Direction::Left));

        grid.remove_wall_between((1, 1), (1, 0)).unwrap();
        assert!(!grid.at(1, 1).unwrap().has_wall(Direction::Top));
        assert!(!grid.at(1, 0).unwrap().has_wall(Direction::Bottom));

        assert!(grid.is_open_between((2, 1), (1, 1)));
        assert_eq!(grid.open_passages(), 2);
        assert!(grid.walls_consistent());
    }

    #[test]
    fn test_remove_wall_is_idempotent() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.remove_wall_between((0, 0), (0, 1)).unwrap();
        let once = grid.snapshot();
        grid.remove_wall_between((0, 0), (0, 1)).unwrap();
        assert_eq!(grid.snapshot(), once);
        assert_eq!(grid.open_passages(), 1);
    }

    #[test]
    fn test_insert_wall_restores_state() {
        let mut grid = Grid::new(2, 2).unwrap();
        let fresh = grid.snapshot();
        grid.remove_wall_between((0, 0), (1, 0)).unwrap();
        grid.insert_wall_between((1, 0), (0, 0)).unwrap();
        assert_eq!(grid.snapshot(), fresh);
    }

    #[test]
    fn test_non_adjacent_is_invariant_violation() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(matches!(
            grid.remove_wall_between((0, 0), (1, 1)),
            Err(MazeError::InvariantViolation(_))
        ));
        assert!(matches!(
            grid.remove_wall_between((0, 0), (0, 0)),
            Err(MazeError::InvariantViolation(_))
        ));
        assert!(matches!(
            grid.insert_wall_between((2, 0), (3, 0)),
            Err(MazeError::InvariantViolation(_))
        ));
        // Nothing changed
        assert_eq!(grid.open_passages(), 0);
    }

    #[test]
    fn test_reachability() {
        let mut grid = Grid::new(3, 1).unwrap();
        assert!(!grid.entrance_reaches_exit());
        grid.remove_wall_between((0, 0), (1, 0)).unwrap();
        assert_eq!(grid.reachable_from((0, 0)), vec![true, true, false]);
        grid.remove_wall_between((1, 0), (2, 0)).unwrap();
        assert!(grid.entrance_reaches_exit());
        assert!(grid.is_fully_connected());
        assert!(grid.reachable_from((9, 9)).iter().all(|r| !r));
    }

    #[test]
    fn test_visited_flags() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.mark_visited((1, 0));
        grid.mark_visited((5, 5));
        assert!(grid.is_visited((1, 0)));
        assert!(!grid.is_visited((0, 0)));
        assert_eq!(grid.visited_count(), 1);
        grid.mark_all_visited();
        assert_eq!(grid.visited_count(), 4);
    }
}
