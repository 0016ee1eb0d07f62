use rand::Rng;

use crate::error::MazeError;
use crate::generators::Progress;
use crate::maze::{Grid, get_neighbors};

/// Phase of the backtracker after its latest step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsState {
    /// The last step carved into a new cell.
    Active,
    /// The last step popped the stack.
    Backtracking,
    Done,
}

/// Randomized depth-first backtracker with an explicit stack.
#[derive(Debug)]
pub struct RandomizedDfs {
    current: (u16, u16),
    stack: Vec<(u16, u16)>,
    state: DfsState,
}

impl RandomizedDfs {
    /// Starts at the entrance: marks it visited and seeds the stack with it.
    pub fn new(grid: &mut Grid) -> Self {
        let start = grid.entrance();
        grid.mark_visited(start);
        RandomizedDfs {
            current: start,
            stack: vec![start],
            state: DfsState::Active,
        }
    }

    pub fn state(&self) -> DfsState {
        self.state
    }

    pub fn current(&self) -> (u16, u16) {
        self.current
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    /// Either carves from the current cell into a random unvisited neighbor, or backtracks one
    /// cell when there is none.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<Progress, MazeError> {
        if self.state == DfsState::Done {
            return Ok(Progress::Done);
        }

        let candidates = get_neighbors(self.current, grid)
            .filter(|&c| !grid.is_visited(c))
            .collect::<Vec<_>>();

        if !candidates.is_empty() {
            let next = candidates[rng.random_range(0..candidates.len())];
            grid.mark_visited(next);
            // Keep the current cell so its other neighbors get a look on the way back
            self.stack.push(self.current);
            grid.remove_wall_between(self.current, next)?;
            self.current = next;
            self.state = DfsState::Active;
            return Ok(Progress::Continuing);
        }

        match self.stack.pop() {
            Some(previous) => {
                self.current = previous;
                self.state = DfsState::Backtracking;
            }
            None => self.state = DfsState::Done,
        }
        if self.stack.is_empty() {
            self.state = DfsState::Done;
            return Ok(Progress::Done);
        }
        Ok(Progress::Continuing)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn run(grid: &mut Grid, seed: u64) -> usize {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut dfs = RandomizedDfs::new(grid);
        let mut steps = 0;
        loop {
            steps += 1;
            let progress = dfs.step(grid, &mut rng).unwrap();
            assert!(grid.walls_consistent());
            if progress == Progress::Done {
                assert_eq!(dfs.state(), DfsState::Done);
                assert_eq!(dfs.stack_len(), 0);
                return steps;
            }
        }
    }

    #[test]
    fn test_single_cell_is_done_immediately() {
        let mut grid = Grid::new(1, 1).unwrap();
        assert_eq!(run(&mut grid, 0), 1);
        assert_eq!(grid.open_passages(), 0);
    }

    #[test]
    fn test_two_by_two_connects_all_cells() {
        let mut grid = Grid::new(2, 2).unwrap();
        run(&mut grid, 3);
        assert_eq!(grid.open_passages(), 3);
        assert!(grid.is_fully_connected());
        assert_eq!(grid.visited_count(), 4);
    }

    #[test]
    fn test_produces_spanning_tree() {
        for (cols, rows, seed) in [(5, 5, 1), (8, 3, 2), (1, 9, 3), (12, 1, 4), (16, 11, 5)] {
            let mut grid = Grid::new(cols, rows).unwrap();
            let n = grid.len();
            let steps = run(&mut grid, seed);
            assert_eq!(grid.open_passages(), n - 1);
            assert!(grid.is_fully_connected());
            assert_eq!(grid.visited_count(), n);
            // One forward step per new cell plus one pop per stack entry
            assert_eq!(steps, 2 * n - 1);
        }
    }

    #[test]
    fn test_state_transitions() {
        let mut grid = Grid::new(3, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut dfs = RandomizedDfs::new(&mut grid);
        assert_eq!(dfs.state(), DfsState::Active);
        assert_eq!(dfs.current(), (0, 0));

        // A 3x1 corridor has only one way forward
        dfs.step(&mut grid, &mut rng).unwrap();
        assert_eq!(dfs.current(), (1, 0));
        dfs.step(&mut grid, &mut rng).unwrap();
        assert_eq!(dfs.current(), (2, 0));
        assert_eq!(dfs.state(), DfsState::Active);

        assert_eq!(dfs.step(&mut grid, &mut rng).unwrap(), Progress::Continuing);
        assert_eq!(dfs.state(), DfsState::Backtracking);
        assert_eq!(dfs.current(), (1, 0));

        // Stepping after completion is a no-op
        while dfs.step(&mut grid, &mut rng).unwrap() == Progress::Continuing {}
        let done = grid.snapshot();
        assert_eq!(dfs.step(&mut grid, &mut rng).unwrap(), Progress::Done);
        assert_eq!(grid.snapshot(), done);
    }

    #[test]
    fn test_same_seed_same_maze() {
        let mut a = Grid::new(9, 7).unwrap();
        let mut b = Grid::new(9, 7).unwrap();
        run(&mut a, 42);
        run(&mut b, 42);
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
