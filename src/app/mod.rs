//! Terminal animation of a maze run: generation, then distance shells, then a path.

mod renderer;

use std::io::{Stdout, Write};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    style::Color,
    terminal::{self, ClearType},
};
use thiserror::Error;

use crate::{
    config::Config,
    error::MazeError,
    generators::{Generator, get_rng, spawn_generation},
    maze::{Coord, Grid},
    render::{CELL_WIDTH, to_text, to_text_with_path},
    report::ReportStream,
    solvers::{find_path, shell_distance, spawn_distances},
};

pub use renderer::Renderer;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error("terminal is {actual:?} but a {rows}x{columns} maze needs {needed:?} (columns, rows)")]
    TerminalTooSmall {
        rows: usize,
        columns: usize,
        needed: (u16, u16),
        actual: (u16, u16),
    },
}

/// How an animated run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every stage ran; holds the path from the top-left to the bottom-right corner.
    Solved(Vec<Coord>),
    /// The user pressed Esc before the last stage finished.
    Cancelled,
}

pub struct App {
    config: Config,
    renderer: Renderer,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            renderer: Renderer::new(),
        }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    /// even if the panic occurs in a different thread
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Terminal size (columns, rows) needed to show a maze and its status line.
    /// Returns `None` if no terminal could be that large.
    pub fn required_size(rows: usize, columns: usize) -> Option<(u16, u16)> {
        let width = columns.checked_mul(CELL_WIDTH + 1)?.checked_add(1)?;
        let height = rows
            .checked_mul(2)?
            .checked_add(1 + Renderer::NUM_STATUS_ROWS as usize)?;
        Some((u16::try_from(width).ok()?, u16::try_from(height).ok()?))
    }

    /// Main application loop
    pub fn run(
        &mut self,
        stdout: &mut Stdout,
        rows: usize,
        columns: usize,
        generator: Generator,
    ) -> Result<Outcome, AppError> {
        let actual = terminal::size()?;
        let too_small = |needed| AppError::TerminalTooSmall {
            rows,
            columns,
            needed,
            actual,
        };
        let needed = App::required_size(rows, columns)
            .ok_or_else(|| too_small((u16::MAX, u16::MAX)))?;
        if actual.0 < needed.0 || actual.1 < needed.1 {
            return Err(too_small(needed));
        }

        let grid = Grid::new(rows, columns)?;
        let capacity = self.config.channel_capacity;
        tracing::info!(
            "[app] animating {} on a {}x{} grid (capacity {}, seed {:?})",
            generator.name(),
            rows,
            columns,
            capacity,
            self.config.seed
        );

        let label = generator.to_string();
        let stream = spawn_generation(grid, generator, get_rng(self.config.seed), capacity);
        let Some(maze) = self.animate(stdout, stream, |_, step| {
            format!("{}: step {} (Esc to cancel)", label, step)
        })?
        else {
            return Ok(Outcome::Cancelled);
        };

        // Distance labels redraw most lines, so start the next stage from a clean screen
        self.renderer.invalidate();
        let source = (0, 0);
        let stream = spawn_distances(maze, source, capacity)?;
        let status = |snapshot: &Grid, _: usize| match shell_distance(snapshot) {
            Some(max) => format!("Distances from the top-left corner: max {} (Esc to cancel)", max),
            None => "Distances from the top-left corner (Esc to cancel)".to_string(),
        };
        let Some(distances) = self.animate(stdout, stream, status)? else {
            return Ok(Outcome::Cancelled);
        };

        let goal = (rows - 1, columns - 1);
        let path = find_path(&distances, source, goal)?;
        self.renderer
            .draw_frame(stdout, &to_text_with_path(distances.grid(), &path))?;
        self.renderer.draw_status(
            stdout,
            &format!(
                "{}: path of {} cells, farthest cell {:?} at {}. Press Esc to exit...",
                label,
                path.len(),
                distances.max().0,
                distances.max().1
            ),
            Color::Green,
        )?;
        App::wait_for_esc()?;
        self.renderer.park_cursor(stdout)?;
        Ok(Outcome::Solved(path))
    }

    /// Draw every snapshot of `stream`, pacing frames by the configured delay.
    /// `status` describes a snapshot given its index in the stream.
    /// Returns `None` if the user pressed Esc before the stream closed.
    fn animate<T, F>(
        &mut self,
        stdout: &mut Stdout,
        mut stream: ReportStream<T>,
        status: F,
    ) -> Result<Option<T>, AppError>
    where
        F: Fn(&Grid, usize) -> String,
    {
        let mut step = 0;
        while let Some(event) = stream.next() {
            self.renderer.draw_frame(stdout, &to_text(event.grid()))?;
            self.renderer
                .draw_status(stdout, &status(event.grid(), step), Color::Cyan)?;
            step += 1;

            if App::esc_pressed(self.config.frame_delay)? {
                tracing::info!("[app] Esc pressed at step {}, cancelling", step);
                return match stream.cancel() {
                    Ok(_) | Err(MazeError::Cancelled) => Ok(None),
                    Err(e) => Err(e.into()),
                };
            }
        }
        tracing::debug!("[app] stream closed after {} frames", step);
        Ok(Some(stream.finish()?))
    }

    /// Wait up to `timeout` for input. Returns true on an Esc key press.
    fn esc_pressed(timeout: std::time::Duration) -> std::io::Result<bool> {
        if !event::poll(timeout)? {
            return Ok(false);
        }
        Ok(matches!(
            event::read()?,
            event::Event::Key(event::KeyEvent {
                code: KeyCode::Esc,
                kind: event::KeyEventKind::Press,
                ..
            })
        ))
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }
}
