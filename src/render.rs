//! Plain-text pictures of a grid.
//!
//! Walls are drawn with `+`, `-` and `|`. A cell's annotation, if any, is printed in
//! base 36 inside the cell; cells on a marked path show `*` instead.

use std::collections::HashSet;

use unicode_width::UnicodeWidthStr;

use crate::maze::{Coord, Direction, Grid};

/// Width of a cell body in terminal columns, excluding walls.
pub const CELL_WIDTH: usize = 3;

const PATH_MARK: &str = "*";

pub fn to_text(grid: &Grid) -> String {
    render(grid, &HashSet::new())
}

/// Like [`to_text`], with every cell of `path` marked.
pub fn to_text_with_path(grid: &Grid, path: &[Coord]) -> String {
    render(grid, &path.iter().copied().collect())
}

fn render(grid: &Grid, marked: &HashSet<Coord>) -> String {
    let wall = "-".repeat(CELL_WIDTH);
    let open = " ".repeat(CELL_WIDTH);

    let mut out = String::from("+");
    for _ in 0..grid.columns() {
        out.push_str(&wall);
        out.push('+');
    }
    out.push('\n');

    for row in 0..grid.rows() {
        let mut body = String::from("|");
        let mut bottom = String::from("+");
        for column in 0..grid.columns() {
            let coord = (row, column);
            let cell = &grid[coord];
            let label = if marked.contains(&coord) {
                PATH_MARK.to_string()
            } else {
                cell.annotation().map(base36).unwrap_or_default()
            };
            body.push_str(&center(&label, CELL_WIDTH));
            body.push(if cell.is_linked_toward(Direction::East) {
                ' '
            } else {
                '|'
            });
            bottom.push_str(if cell.is_linked_toward(Direction::South) {
                &open
            } else {
                &wall
            });
            bottom.push('+');
        }
        out.push_str(&body);
        out.push('\n');
        out.push_str(&bottom);
        out.push('\n');
    }
    out
}

/// Pads `text` on both sides to `width` display columns. Wider text is kept whole.
fn center(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    let left = padding / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(padding - left))
}

fn base36(mut value: usize) -> String {
    let mut digits = Vec::new();
    loop {
        digits.push(std::char::from_digit((value % 36) as u32, 36).unwrap_or('?'));
        value /= 36;
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}
