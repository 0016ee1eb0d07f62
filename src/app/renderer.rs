use std::io::Write;

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::maze::{Direction, Grid};

/// One terminal tile of the rendered maze.
///
/// A `cols x rows` grid is drawn as `(2 * cols + 1) x (2 * rows + 1)` tiles: odd/odd positions are
/// cells, positions between two cells are the wall (or passage) separating them, even/even
/// positions are corner posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
    Unvisited,
    Entrance,
    Exit,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const WIDTH: u16 = 2;
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "⬜".with(Color::White),
            Tile::Open => "  ".with(Color::Reset),
            Tile::Unvisited => "░░".with(Color::DarkGrey),
            Tile::Entrance => "🟩".with(Color::Green),
            Tile::Exit => "🟥".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Tile grid extent `(width, height)` for a maze of the given size.
///
/// Computed in `usize`: the widest valid grid needs more tiles than a `u16` holds.
pub fn tile_dims(cols: u16, rows: u16) -> (usize, usize) {
    (2 * cols as usize + 1, 2 * rows as usize + 1)
}

/// Terminal coordinate for a tile offset, pinned to the last addressable column or row.
fn term_coord(offset: usize) -> u16 {
    u16::try_from(offset).unwrap_or(u16::MAX)
}

/// Lay out the grid's wall state as tiles, row by row.
pub fn tiles(grid: &Grid) -> Vec<Tile> {
    let (cols, rows) = (grid.cols(), grid.rows());
    let (width, height) = tile_dims(cols, rows);
    let wall_tile = |present: bool| if present { Tile::Wall } else { Tile::Open };
    let has_wall = |x: u16, y: u16, dir: Direction| grid.at(x, y).is_none_or(|c| c.has_wall(dir));
    // Cell index of an odd tile offset; always below the matching grid dimension
    let cell = |t: usize| ((t - 1) / 2) as u16;

    (0..height)
        .flat_map(|ty| (0..width).map(move |tx| (tx, ty)))
        .map(|(tx, ty)| match (tx % 2, ty % 2) {
            (1, 1) => {
                let coord = (cell(tx), cell(ty));
                if coord == grid.entrance() {
                    Tile::Entrance
                } else if coord == grid.exit() {
                    Tile::Exit
                } else if grid.is_visited(coord) {
                    Tile::Open
                } else {
                    Tile::Unvisited
                }
            }
            // Between two columns: left wall of the cell to the right, or the outer right wall
            (0, 1) => {
                let y = cell(ty);
                match tx / 2 {
                    x if x < cols as usize => wall_tile(has_wall(x as u16, y, Direction::Left)),
                    _ => wall_tile(has_wall(cols - 1, y, Direction::Right)),
                }
            }
            // Between two rows: top wall of the cell below, or the outer bottom wall
            (1, 0) => {
                let x = cell(tx);
                match ty / 2 {
                    y if y < rows as usize => wall_tile(has_wall(x, y as u16, Direction::Top)),
                    _ => wall_tile(has_wall(x, rows - 1, Direction::Bottom)),
                }
            }
            _ => Tile::Wall,
        })
        .collect()
}

/// Draws successive grid states, only touching tiles that changed since the previous frame.
pub struct Renderer<W: Write> {
    out: W,
    /// Tile grid dimensions (width, height)
    tile_dims: (usize, usize),
    previous: Option<Vec<Tile>>,
}

impl<W: Write> Renderer<W> {
    /// Number of terminal rows reserved below the maze for the status line.
    pub const NUM_STATUS_ROWS: u16 = 2;

    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            tile_dims: tile_dims(cols, rows),
            previous: None,
        }
    }

    /// Check whether a terminal of the given size can show the whole maze plus status line.
    pub fn fits(&self, term_width: u16, term_height: u16) -> bool {
        let (width, height) = self.tile_dims;
        width * Tile::WIDTH as usize <= term_width as usize
            && height + Self::NUM_STATUS_ROWS as usize <= term_height as usize
    }

    /// First terminal row below the maze and its status line.
    pub fn rows_used(&self) -> u16 {
        term_coord(self.tile_dims.1 + Self::NUM_STATUS_ROWS as usize)
    }

    /// Clear the screen and forget the previous frame, so the next draw repaints everything.
    pub fn reset(&mut self) -> std::io::Result<()> {
        queue!(self.out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        self.out.flush()?;
        self.previous = None;
        Ok(())
    }

    /// Draw the grid. Returns how many tiles were written.
    pub fn draw(&mut self, grid: &Grid) -> std::io::Result<usize> {
        let current = tiles(grid);
        let width = self.tile_dims.0;
        let mut written = 0;

        for (idx, tile) in current.iter().enumerate() {
            let changed = self
                .previous
                .as_ref()
                .is_none_or(|previous| previous.get(idx) != Some(tile));
            if !changed {
                continue;
            }
            let (tx, ty) = (idx % width, idx / width);
            queue!(
                self.out,
                cursor::MoveTo(term_coord(tx * Tile::WIDTH as usize), term_coord(ty)),
                style::Print(tile)
            )?;
            written += 1;
        }
        self.out.flush()?;
        self.previous = Some(current);
        Ok(written)
    }

    /// Print a status message under the maze, cut to fit the terminal width.
    pub fn draw_status(&mut self, msg: &str, color: Color, term_width: u16) -> std::io::Result<()> {
        let (fitted, _) = msg.unicode_truncate(term_width as usize);
        queue!(
            self.out,
            cursor::MoveTo(0, term_coord(self.tile_dims.1 + 1)),
            terminal::Clear(ClearType::CurrentLine),
        )?;
        self.out.queue(style::PrintStyledContent(fitted.with(color)))?;
        self.out.flush()
    }
}
