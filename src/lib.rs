pub mod app;
pub mod error;
pub mod generators;
pub mod logging;
pub mod maze;

pub use error::MazeError;
pub use generators::{Algorithm, Progress, Scheduler, get_rng, start_generation};
pub use maze::{Cell, Direction, Grid, WallState};
