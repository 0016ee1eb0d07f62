use rand::Rng;

use crate::error::MazeError;
use crate::generators::Progress;
use crate::maze::{Grid, get_neighbors};

/// Randomized Prim's algorithm over cells.
///
/// The frontier holds unvisited cells bordering the visited region. Membership is tracked per
/// cell index so a cell is never queued twice.
#[derive(Debug)]
pub struct RandomizedPrim {
    frontier: Vec<(u16, u16)>,
    in_frontier: Vec<bool>,
    done: bool,
}

impl RandomizedPrim {
    /// Marks the entrance visited and queues its neighbors.
    pub fn new(grid: &mut Grid) -> Self {
        let start = grid.entrance();
        grid.mark_visited(start);
        let mut prim = RandomizedPrim {
            frontier: Vec::new(),
            in_frontier: vec![false; grid.len()],
            done: false,
        };
        prim.add_frontier(start, grid);
        prim
    }

    /// Cells currently waiting in the frontier, in no meaningful order.
    pub fn frontier(&self) -> &[(u16, u16)] {
        &self.frontier
    }

    /// Queues the unvisited neighbors of `coord` that are not queued yet.
    fn add_frontier(&mut self, coord: (u16, u16), grid: &Grid) {
        for neighbor in get_neighbors(coord, grid) {
            if grid.is_visited(neighbor) {
                continue;
            }
            if let Some(idx) = grid.index_of(neighbor)
                && !self.in_frontier[idx]
            {
                self.in_frontier[idx] = true;
                self.frontier.push(neighbor);
            }
        }
    }

    /// Pulls one random frontier cell and joins it to a random visited neighbor.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<Progress, MazeError> {
        if self.done || self.frontier.is_empty() {
            self.done = true;
            return Ok(Progress::Done);
        }

        let cell = self
            .frontier
            .swap_remove(rng.random_range(0..self.frontier.len()));
        if let Some(idx) = grid.index_of(cell) {
            self.in_frontier[idx] = false;
        }

        let visited_neighbors = get_neighbors(cell, grid)
            .filter(|&c| grid.is_visited(c))
            .collect::<Vec<_>>();

        if !visited_neighbors.is_empty() {
            let joined = visited_neighbors[rng.random_range(0..visited_neighbors.len())];
            grid.remove_wall_between(cell, joined)?;
            grid.mark_visited(cell);
            self.add_frontier(cell, grid);
        }

        if self.frontier.is_empty() {
            self.done = true;
            return Ok(Progress::Done);
        }
        Ok(Progress::Continuing)
    }
}
