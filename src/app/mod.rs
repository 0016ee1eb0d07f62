pub mod config;
pub mod input;
pub mod renderer;
pub mod terminal;

use std::{
    io::{Stdout, Write},
    time::Instant,
};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self as term, ClearType},
};

use crate::{
    app::{
        config::AppConfig,
        input::{Answer, Choice, DimensionInput, next_key_press},
        renderer::Renderer,
    },
    generators::{Algorithm, Progress, get_rng, start_generation},
    maze::Grid,
};

/// How an animated generation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The generator reported completion after this many steps
    Completed(usize),
    /// The user pressed Esc mid-generation
    Cancelled,
    /// The terminal cannot show a maze this large
    TooSmall,
}

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Main application loop: ask for a maze, animate it, offer another one.
    /// Every round builds a brand-new grid.
    pub fn run(&self, stdout: &mut Stdout) -> std::io::Result<()> {
        tracing::info!("[app] started with {:?}", self.config);
        loop {
            queue!(
                stdout,
                term::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::SetAttribute(Attribute::Reverse),
                style::PrintStyledContent("Maze Generation\r\n".with(Color::Yellow)),
                style::SetAttribute(Attribute::NoReverse),
            )?;
            stdout.flush()?;

            let (cols, rows) = match App::ask_maze_dimensions(stdout)? {
                Some(dims) => dims,
                None => break,
            };

            let algorithm = match App::choose(
                stdout,
                "Select maze generation algorithm (use arrow keys and Enter, or Esc to exit):",
                &Algorithm::ALL,
            )? {
                Some(algorithm) => algorithm,
                None => break,
            };

            let status = self.animate(stdout, cols, rows, algorithm)?;
            tracing::info!(
                "[app] {} on {}x{} ended with {:?}",
                algorithm,
                cols,
                rows,
                status
            );

            let again = match status {
                RunStatus::Completed(_) => {
                    App::choose(stdout, "Generate another maze?", &["Yes", "No"])? == Some("Yes")
                }
                RunStatus::Cancelled => false,
                RunStatus::TooSmall => {
                    stdout.execute(style::PrintStyledContent(
                        "Terminal is too small for this maze. Press Esc to go back...\r\n"
                            .with(Color::Yellow)
                            .attribute(Attribute::Bold),
                    ))?;
                    while next_key_press()? != KeyCode::Esc {}
                    true
                }
            };
            if !again {
                break;
            }
        }
        tracing::info!("[app] exiting");
        Ok(())
    }

    /// Generate a maze one step per tick, redrawing after every step.
    ///
    /// Input is polled with the tick as timeout, which both paces the animation and lets Esc
    /// cancel within one tick. Cancelling just stops stepping; the grid is dropped on return.
    pub fn animate(
        &self,
        stdout: &mut Stdout,
        cols: u16,
        rows: u16,
        algorithm: Algorithm,
    ) -> std::io::Result<RunStatus> {
        let grid = Grid::new(cols, rows)?;
        let mut scheduler = start_generation(grid, algorithm, get_rng(self.config.seed));

        let mut renderer = Renderer::new(std::io::stdout(), cols, rows);
        let (term_width, term_height) = term::size()?;
        if !renderer.fits(term_width, term_height) {
            return Ok(RunStatus::TooSmall);
        }

        stdout.execute(cursor::Hide)?;
        renderer.reset()?;
        renderer.draw(scheduler.grid())?;
        renderer.draw_status(
            &format!("{} | Esc: cancel", algorithm),
            Color::Cyan,
            term_width,
        )?;

        let started = Instant::now();
        let status = loop {
            if event::poll(self.config.tick)?
                && let event::Event::Key(event::KeyEvent {
                    code: KeyCode::Esc,
                    kind: event::KeyEventKind::Press,
                    ..
                }) = event::read()?
            {
                tracing::debug!("[app] Esc key pressed, cancelling generation");
                break RunStatus::Cancelled;
            }

            let progress = scheduler.step()?;
            renderer.draw(scheduler.grid())?;
            if progress == Progress::Done {
                break RunStatus::Completed(scheduler.steps());
            }
        };

        let msg = match status {
            RunStatus::Completed(steps) => format!(
                "{} finished in {} steps ({:.2?}). Entrance {:?}, exit {:?}.",
                algorithm,
                steps,
                started.elapsed(),
                scheduler.grid().entrance(),
                scheduler.grid().exit()
            ),
            _ => format!("{} cancelled after {} steps.", algorithm, scheduler.steps()),
        };
        renderer.draw_status(&msg, Color::Green, term_width)?;

        // Leave room for follow-up prompts under the maze
        queue!(stdout, cursor::MoveTo(0, renderer.rows_used()), cursor::Show)?;
        stdout.flush()?;
        Ok(status)
    }

    /// Headless mode: run full generations without rendering and report step counts and timings.
    pub fn profile(
        &self,
        cols: u16,
        rows: u16,
        algorithms: &[Algorithm],
        iterations: usize,
    ) -> std::io::Result<Vec<ProfileReport>> {
        let mut rng = get_rng(self.config.seed);
        let mut reports = Vec::with_capacity(algorithms.len());

        for &algorithm in algorithms {
            let mut total_steps = 0;
            let started = Instant::now();
            for iteration in 0..iterations {
                let grid = Grid::new(cols, rows)?;
                let mut scheduler = start_generation(grid, algorithm, &mut rng);
                let steps = scheduler.run_to_completion()?;
                total_steps += steps;
                tracing::debug!(
                    "[profile] {} iteration {} took {} steps",
                    algorithm,
                    iteration,
                    steps
                );
            }
            let report = ProfileReport {
                algorithm,
                iterations,
                total_steps,
                elapsed: started.elapsed(),
            };
            tracing::info!("[profile] {}", report);
            reports.push(report);
        }
        Ok(reports)
    }

    /// Largest dimension that still fits, given terminal extent in tiles.
    /// A maze of n cells takes 2n + 1 tiles.
    fn max_cells_for(tiles: u16) -> u16 {
        (tiles.saturating_sub(1) / 2).max(1)
    }

    /// Ask user for maze dimensions, bounded by what the terminal can show
    /// Returns None if user cancels input with Esc
    fn ask_maze_dimensions(stdout: &mut Stdout) -> std::io::Result<Option<(u16, u16)>> {
        let (max_cols, max_rows) = match term::size() {
            Ok((term_width, term_height)) => (
                App::max_cells_for(term_width / renderer::Tile::WIDTH),
                App::max_cells_for(
                    term_height.saturating_sub(Renderer::<Stdout>::NUM_STATUS_ROWS),
                ),
            ),
            // Fallback when terminal size cannot be determined
            Err(_) => (32, 16),
        };

        stdout.execute(style::PrintStyledContent(
            format!(
                "Enter maze dimensions, or press Esc to exit. Empty input takes the maximum \
({}x{}) for the current terminal size.\r\n",
                max_cols, max_rows
            )
            .with(Color::Blue),
        ))?;

        let Some(cols) = App::prompt_dimension(stdout, "Width", max_cols)? else {
            return Ok(None);
        };
        let Some(rows) = App::prompt_dimension(stdout, "Height", max_rows)? else {
            return Ok(None);
        };
        Ok(Some((cols, rows)))
    }

    /// Read one dimension, redrawing the typed digits and any validation message on every key.
    /// The accepted value stays on screen as a confirmation line.
    fn prompt_dimension(
        stdout: &mut Stdout,
        label: &str,
        max: u16,
    ) -> std::io::Result<Option<u16>> {
        let mut input = DimensionInput::new(max);
        queue!(stdout, cursor::SavePosition)?;
        let answer = loop {
            queue!(
                stdout,
                cursor::RestorePosition,
                term::Clear(ClearType::FromCursorDown),
                style::PrintStyledContent(format!("{}: ", label).with(Color::Yellow)),
                style::Print(input.digits()),
            )?;
            if let Err(msg) = input.value() {
                stdout.queue(style::PrintStyledContent(
                    format!("\r\n{}", msg).with(Color::Red),
                ))?;
            }
            stdout.flush()?;

            match input.press(next_key_press()?) {
                Answer::Pending => continue,
                Answer::Accepted(n) => break Some(n),
                Answer::Cancelled => break None,
            }
        };

        queue!(
            stdout,
            cursor::RestorePosition,
            term::Clear(ClearType::FromCursorDown)
        )?;
        if let Some(n) = answer {
            stdout.queue(style::PrintStyledContent(
                format!("{} set to {}\r\n", label, n)
                    .with(Color::Green)
                    .attribute(Attribute::Bold),
            ))?;
        }
        stdout.flush()?;
        Ok(answer)
    }

    /// Arrow-key list under a prompt; the highlighted entry is marked and shown reversed.
    /// The list is erased once an entry is picked or Esc is pressed.
    fn choose<T: std::fmt::Display + Copy>(
        stdout: &mut Stdout,
        prompt: &str,
        options: &[T],
    ) -> std::io::Result<Option<T>> {
        let Some(mut choice) = Choice::new(options) else {
            return Ok(None);
        };
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;
        let picked = loop {
            queue!(
                stdout,
                cursor::RestorePosition,
                term::Clear(ClearType::FromCursorDown),
                style::PrintStyledContent(prompt.with(Color::Yellow)),
            )?;
            for (i, option) in choice.options().iter().enumerate() {
                let line = format!("\r\n{}", option);
                if i == choice.selected() {
                    stdout.queue(style::PrintStyledContent(line.reverse()))?;
                } else {
                    stdout.queue(style::Print(line))?;
                }
            }
            stdout.queue(style::Print("\r\n"))?;
            stdout.flush()?;

            match choice.press(next_key_press()?) {
                Answer::Pending => continue,
                Answer::Accepted(option) => break Some(option),
                Answer::Cancelled => break None,
            }
        };

        queue!(
            stdout,
            cursor::RestorePosition,
            term::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;
        Ok(picked)
    }
}

impl Default for App {
    fn default() -> Self {
        App::new(AppConfig::default())
    }
}

/// Aggregate numbers of one profiled algorithm.
#[derive(Debug, Clone, Copy)]
pub struct ProfileReport {
    pub algorithm: Algorithm,
    pub iterations: usize,
    pub total_steps: usize,
    pub elapsed: std::time::Duration,
}

impl std::fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let runs = self.iterations.max(1);
        write!(
            f,
            "{}: {} runs, {} steps per run, {:.2?} per run",
            self.algorithm,
            self.iterations,
            self.total_steps / runs,
            self.elapsed.div_f64(runs as f64)
        )
    }
}
