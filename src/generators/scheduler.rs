use rand::Rng;

use crate::error::MazeError;
use crate::generators::{Algorithm, Generator, Progress};
use crate::maze::Grid;

/// Drives one generator over one grid, a single step at a time.
///
/// The caller decides when to step, typically once per render tick. Between steps the grid
/// always holds a consistent wall configuration and can be read through [`Scheduler::grid`].
#[derive(Debug)]
pub struct Scheduler<R: Rng> {
    grid: Grid,
    algorithm: Algorithm,
    /// Dropped as soon as the algorithm reports completion.
    generator: Option<Generator>,
    rng: R,
    steps: usize,
}

/// Bind a fresh generator for `algorithm` to `grid`.
pub fn start_generation<R: Rng>(grid: Grid, algorithm: Algorithm, rng: R) -> Scheduler<R> {
    Scheduler::new(grid, algorithm, rng)
}

impl<R: Rng> Scheduler<R> {
    pub fn new(mut grid: Grid, algorithm: Algorithm, rng: R) -> Self {
        let generator = Generator::new(&mut grid, algorithm);
        tracing::debug!(
            "[scheduler] starting {} on a {}x{} grid",
            algorithm,
            grid.cols(),
            grid.rows()
        );
        Scheduler {
            grid,
            algorithm,
            generator: Some(generator),
            rng,
            steps: 0,
        }
    }

    /// Advance the generator by one unit of work.
    /// Once done, further calls return [`Progress::Done`] and leave the grid untouched.
    pub fn step(&mut self) -> Result<Progress, MazeError> {
        let Some(generator) = self.generator.as_mut() else {
            return Ok(Progress::Done);
        };

        let progress = generator.step(&mut self.grid, &mut self.rng)?;
        self.steps += 1;

        if progress == Progress::Done {
            self.generator = None;
            tracing::debug!(
                "[scheduler] {} finished after {} steps, {} passages open, entrance reaches exit: {}",
                self.algorithm,
                self.steps,
                self.grid.open_passages(),
                self.grid.entrance_reaches_exit()
            );
        }
        Ok(progress)
    }

    /// Step until done. Returns the total number of steps taken.
    pub fn run_to_completion(&mut self) -> Result<usize, MazeError> {
        while self.step()? == Progress::Continuing {}
        Ok(self.steps)
    }

    pub fn is_done(&self) -> bool {
        self.generator.is_none()
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Give the grid back, dropping any generator state.
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_every_algorithm_yields_perfect_maze() {
        for algorithm in Algorithm::ALL {
            for (cols, rows) in [(1, 1), (2, 2), (3, 3), (6, 4), (1, 7), (20, 15)] {
                let grid = Grid::new(cols, rows).unwrap();
                let mut scheduler = start_generation(grid, algorithm, StdRng::seed_from_u64(1));
                scheduler.run_to_completion().unwrap();
                assert!(scheduler.is_done());

                let grid = scheduler.into_grid();
                assert_eq!(grid.open_passages(), grid.len() - 1, "{}", algorithm);
                assert!(grid.is_fully_connected(), "{}", algorithm);
                assert!(grid.walls_consistent(), "{}", algorithm);
            }
        }
    }

    #[test]
    fn test_single_cell_done_on_first_step() {
        for algorithm in Algorithm::ALL {
            let grid = Grid::new(1, 1).unwrap();
            let mut scheduler = start_generation(grid, algorithm, StdRng::seed_from_u64(0));
            assert!(!scheduler.is_done());
            assert_eq!(scheduler.step().unwrap(), Progress::Done);
            assert_eq!(scheduler.steps(), 1);
            assert_eq!(scheduler.grid().open_passages(), 0);
        }
    }

    #[test]
    fn test_step_after_done_is_noop() {
        let grid = Grid::new(5, 5).unwrap();
        let mut scheduler = start_generation(grid, Algorithm::Prim, StdRng::seed_from_u64(3));
        let steps = scheduler.run_to_completion().unwrap();
        let snapshot = scheduler.grid().snapshot();

        assert_eq!(scheduler.step().unwrap(), Progress::Done);
        assert_eq!(scheduler.steps(), steps);
        assert_eq!(scheduler.grid().snapshot(), snapshot);
    }

    #[test]
    fn test_grid_is_consistent_between_steps() {
        for algorithm in Algorithm::ALL {
            let grid = Grid::new(6, 5).unwrap();
            let mut scheduler = start_generation(grid, algorithm, StdRng::seed_from_u64(8));
            let mut previous_open = 0;
            while scheduler.step().unwrap() == Progress::Continuing {
                let grid = scheduler.grid();
                assert!(grid.walls_consistent());
                if algorithm != Algorithm::RecurDiv {
                    // Growth algorithms never close a passage
                    assert!(grid.open_passages() >= previous_open);
                    previous_open = grid.open_passages();
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        for algorithm in Algorithm::ALL {
            let run = |seed| {
                let grid = Grid::new(10, 8).unwrap();
                let mut scheduler = start_generation(grid, algorithm, StdRng::seed_from_u64(seed));
                scheduler.run_to_completion().unwrap();
                scheduler.into_grid().snapshot()
            };
            assert_eq!(run(99), run(99));
        }
    }

    #[test]
    fn test_dfs_two_by_two_scenario() {
        let grid = Grid::new(2, 2).unwrap();
        let mut scheduler = start_generation(grid, Algorithm::Dfs, StdRng::seed_from_u64(4));
        assert_eq!(scheduler.run_to_completion().unwrap(), 7);
        let grid = scheduler.grid();
        assert_eq!(grid.open_passages(), 3);
        assert!(grid.is_fully_connected());
    }
}
