use rand::{SeedableRng, rngs::StdRng};

mod dfs;
mod prim;
mod recur_div;
mod scheduler;

pub use dfs::{DfsState, RandomizedDfs};
pub use prim::RandomizedPrim;
pub use recur_div::{Chamber, RecursiveDivision, choose_orientation, divide};
pub use scheduler::{Scheduler, start_generation};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Available maze generation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Dfs,
    Prim,
    RecurDiv,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dfs, Algorithm::Prim, Algorithm::RecurDiv];
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Dfs => write!(f, "Randomized Depth-First Search (DFS)"),
            Algorithm::Prim => write!(f, "Prim's Algorithm"),
            Algorithm::RecurDiv => write!(f, "Recursive Division"),
        }
    }
}

impl std::str::FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" | "backtrack" => Ok(Algorithm::Dfs),
            "prim" | "prims" => Ok(Algorithm::Prim),
            "division" | "recursive" | "recur-div" => Ok(Algorithm::RecurDiv),
            other => Err(format!(
                "unknown algorithm '{}', expected one of: dfs, prim, division",
                other
            )),
        }
    }
}

/// Outcome of a single generation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Continuing,
    Done,
}

/// Per-algorithm generator state, bound to the grid its scheduler owns.
#[derive(Debug)]
pub(crate) enum Generator {
    Dfs(RandomizedDfs),
    Prim(RandomizedPrim),
    RecurDiv(RecursiveDivision),
}

impl Generator {
    pub(crate) fn new(grid: &mut crate::maze::Grid, algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Dfs => Generator::Dfs(RandomizedDfs::new(grid)),
            Algorithm::Prim => Generator::Prim(RandomizedPrim::new(grid)),
            Algorithm::RecurDiv => Generator::RecurDiv(RecursiveDivision::new(grid)),
        }
    }

    pub(crate) fn step<R: rand::Rng + ?Sized>(
        &mut self,
        grid: &mut crate::maze::Grid,
        rng: &mut R,
    ) -> Result<Progress, crate::error::MazeError> {
        match self {
            Generator::Dfs(dfs) => dfs.step(grid, rng),
            Generator::Prim(prim) => prim.step(grid, rng),
            Generator::RecurDiv(division) => division.step(grid, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("dfs".parse::<Algorithm>(), Ok(Algorithm::Dfs));
        assert_eq!(" Prim ".parse::<Algorithm>(), Ok(Algorithm::Prim));
        assert_eq!("division".parse::<Algorithm>(), Ok(Algorithm::RecurDiv));
        assert!("kruskal".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng;
        let a = get_rng(Some(7)).random::<u64>();
        let b = get_rng(Some(7)).random::<u64>();
        assert_eq!(a, b);
    }
}
