use std::io::Write;

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

/// Draws text frames at the top of the terminal, rewriting only the lines that changed
/// since the previous frame.
pub struct Renderer {
    /// Lines of the frame currently on screen
    previous: Vec<String>,
    /// Whether the next frame must repaint the whole screen
    dirty: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            previous: Vec::new(),
            dirty: true,
        }
    }
}

impl Renderer {
    /// Number of terminal rows below the maze kept for the status line
    pub const NUM_STATUS_ROWS: u16 = 2;

    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what is on screen, so the next frame is drawn in full.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn draw_frame<W: Write>(&mut self, out: &mut W, frame: &str) -> std::io::Result<()> {
        let lines = frame.lines().map(str::to_string).collect::<Vec<_>>();
        if self.dirty || lines.len() != self.previous.len() {
            out.queue(terminal::Clear(ClearType::All))?;
            self.previous.clear();
            self.dirty = false;
        }

        let mut redrawn = 0;
        for (row, line) in lines.iter().enumerate() {
            if self.previous.get(row) == Some(line) {
                continue;
            }
            queue!(out, cursor::MoveTo(0, row as u16), style::Print(line))?;
            redrawn += 1;
        }
        tracing::trace!("[renderer] redrew {} of {} lines", redrawn, lines.len());
        self.previous = lines;
        out.flush()
    }

    /// Print `status` on the line below the current frame, cut to the terminal width.
    pub fn draw_status<W: Write>(&self, out: &mut W, status: &str, color: Color) -> std::io::Result<()> {
        let width = terminal::size().map_or(80, |(w, _)| w) as usize;
        let (shown, _) = status.unicode_truncate(width);
        queue!(
            out,
            cursor::MoveTo(0, self.previous.len() as u16),
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(shown.with(color).attribute(Attribute::Bold)),
        )?;
        out.flush()
    }

    /// Move the cursor below the frame and status line.
    pub fn park_cursor<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(0, self.previous.len() as u16 + Self::NUM_STATUS_ROWS))?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_lines_are_skipped() {
        let mut renderer = Renderer::new();
        let mut first = Vec::new();
        renderer.draw_frame(&mut first, "aaa\nbbb\nccc\n").unwrap();

        let mut second = Vec::new();
        renderer.draw_frame(&mut second, "aaa\nbxb\nccc\n").unwrap();
        let written = String::from_utf8_lossy(&second);
        assert!(written.contains("bxb"));
        assert!(!written.contains("aaa"));
        assert!(!written.contains("ccc"));
    }

    #[test]
    fn test_invalidate_repaints_everything() {
        let mut renderer = Renderer::new();
        renderer.draw_frame(&mut Vec::new(), "aaa\nbbb\n").unwrap();
        renderer.invalidate();

        let mut out = Vec::new();
        renderer.draw_frame(&mut out, "aaa\nbbb\n").unwrap();
        let written = String::from_utf8_lossy(&out);
        assert!(written.contains("aaa"));
        assert!(written.contains("bbb"));
    }
}
