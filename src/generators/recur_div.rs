use rand::Rng;

use crate::error::MazeError;
use crate::generators::Progress;
use crate::maze::{Grid, Orientation};

/// A rectangular region of the grid awaiting division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chamber {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Chamber {
    /// Chambers narrower than two cells in both directions cannot be split.
    pub fn is_divisible(&self) -> bool {
        !(self.width < 2 && self.height < 2)
    }

    pub fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }
}

/// Pick the wall orientation for a chamber: split across the longer side, coin flip on squares.
pub fn choose_orientation<R: Rng + ?Sized>(width: u16, height: u16, rng: &mut R) -> Orientation {
    match width.cmp(&height) {
        std::cmp::Ordering::Less => Orientation::Horizontal,
        std::cmp::Ordering::Greater => Orientation::Vertical,
        std::cmp::Ordering::Equal => {
            if rng.random_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            }
        }
    }
}

/// Split one chamber with a wall line holding a single passage.
///
/// Returns the two sub-chambers, or `None` when the chamber is too small to split.
pub fn divide<R: Rng + ?Sized>(
    grid: &mut Grid,
    chamber: Chamber,
    rng: &mut R,
) -> Result<Option<(Chamber, Chamber)>, MazeError> {
    if !chamber.is_divisible() {
        return Ok(None);
    }
    let Chamber {
        x,
        y,
        width,
        height,
    } = chamber;

    match choose_orientation(width, height, rng) {
        Orientation::Horizontal => {
            // Wall goes between row y_wall and the row below it
            let diff = rng.random_range(0..height - 1);
            let y_wall = y + diff;
            let x_hole = x + rng.random_range(0..width);

            for cx in x..x + width {
                grid.insert_wall_between((cx, y_wall), (cx, y_wall + 1))?;
            }
            grid.remove_wall_between((x_hole, y_wall), (x_hole, y_wall + 1))?;

            let upper = Chamber {
                x,
                y,
                width,
                height: diff + 1,
            };
            let lower = Chamber {
                x,
                y: y_wall + 1,
                width,
                height: height - upper.height,
            };
            Ok(Some((upper, lower)))
        }
        Orientation::Vertical => {
            // Wall goes between column x_wall and the column to its right
            let diff = rng.random_range(0..width - 1);
            let x_wall = x + diff;
            let y_hole = y + rng.random_range(0..height);

            for cy in y..y + height {
                grid.insert_wall_between((x_wall, cy), (x_wall + 1, cy))?;
            }
            grid.remove_wall_between((x_wall, y_hole), (x_wall + 1, y_hole))?;

            let left = Chamber {
                x,
                y,
                width: diff + 1,
                height,
            };
            let right = Chamber {
                x: x_wall + 1,
                y,
                width: width - left.width,
                height,
            };
            Ok(Some((left, right)))
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    /// Walking the guaranteed path; holds the walker position.
    Carving((u16, u16)),
    /// Splitting pending chambers.
    Dividing,
    Done,
}

/// Recursive division preceded by a right/down corridor from entrance to exit.
///
/// Each step either moves the corridor walker by one cell or splits one chamber.
#[derive(Debug)]
pub struct RecursiveDivision {
    phase: Phase,
    carved_path: Vec<(u16, u16)>,
    chambers: Vec<Chamber>,
}

impl RecursiveDivision {
    /// Every cell starts walled. Visited flags carry no meaning here, so all are set.
    pub fn new(grid: &mut Grid) -> Self {
        grid.mark_all_visited();
        let start = grid.entrance();
        let mut division = RecursiveDivision {
            phase: Phase::Carving(start),
            carved_path: vec![start],
            chambers: Vec::new(),
        };
        if start == grid.exit() {
            division.start_dividing(grid);
        }
        division
    }

    /// Cells walked by the corridor carve so far, entrance first.
    pub fn carved_path(&self) -> &[(u16, u16)] {
        &self.carved_path
    }

    /// Chambers still waiting to be split.
    pub fn pending_chambers(&self) -> &[Chamber] {
        &self.chambers
    }

    pub fn is_carving(&self) -> bool {
        matches!(self.phase, Phase::Carving(_))
    }

    fn start_dividing(&mut self, grid: &Grid) {
        let whole = Chamber {
            x: 0,
            y: 0,
            width: grid.cols(),
            height: grid.rows(),
        };
        if whole.is_divisible() {
            self.chambers.push(whole);
        }
        self.phase = Phase::Dividing;
    }

    pub fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<Progress, MazeError> {
        match self.phase {
            Phase::Carving(coord) => {
                self.carve_once(coord, grid, rng)?;
                Ok(Progress::Continuing)
            }
            Phase::Dividing => {
                if let Some(chamber) = self.chambers.pop()
                    && let Some((first, second)) = divide(grid, chamber, rng)?
                {
                    // Push the second half first so the first half is split next
                    self.chambers
                        .extend([second, first].into_iter().filter(Chamber::is_divisible));
                }
                if self.chambers.is_empty() {
                    self.phase = Phase::Done;
                    return Ok(Progress::Done);
                }
                Ok(Progress::Continuing)
            }
            Phase::Done => Ok(Progress::Done),
        }
    }

    /// One move of the corridor walker: right when forced or on a winning coin flip, else down.
    fn carve_once<R: Rng + ?Sized>(
        &mut self,
        (x, y): (u16, u16),
        grid: &mut Grid,
        rng: &mut R,
    ) -> Result<(), MazeError> {
        let (last_col, last_row) = grid.exit();
        let next = if x < last_col && (y == last_row || rng.random_bool(0.5)) {
            (x + 1, y)
        } else {
            (x, y + 1)
        };
        grid.remove_wall_between((x, y), next)?;
        self.carved_path.push(next);

        if next == grid.exit() {
            self.start_dividing(grid);
        } else {
            self.phase = Phase::Carving(next);
        }
        Ok(())
    }
}
