//! BoardView: maps a `core::Board` into a frame.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Board;
use crate::frame::{Frame, Line, Rgb, Style};
use crate::types::Cell;

const BACKGROUND: Rgb = Rgb::new(30, 30, 40);
const BORDER: Style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: usize::from(cell_w.max(1)),
        }
    }

    /// Draw the board inside a box frame with `status` on the line below.
    pub fn render(&self, board: &Board, status: &str) -> Frame {
        let inner = usize::from(board.width()) * self.cell_w;
        let mut frame = Frame::new();
        frame.push_line(edge('┌', inner, '┐'));

        for row in board.rows() {
            let mut line = Line::new();
            line.push_repeated('│', 1, BORDER);
            for &cell in row {
                let (ch, style) = glyph_for(cell);
                line.push_repeated(ch, self.cell_w, style);
            }
            line.push_repeated('│', 1, BORDER);
            frame.push_line(line);
        }

        frame.push_line(edge('└', inner, '┘'));

        let mut status_line = Line::new();
        status_line.push_str(status, Style::default());
        frame.push_line(status_line);
        frame
    }
}

fn edge(left: char, inner: usize, right: char) -> Line {
    let mut line = Line::new();
    line.push_repeated(left, 1, BORDER);
    line.push_repeated('─', inner, BORDER);
    line.push_repeated(right, 1, BORDER);
    line
}

fn glyph_for(cell: Cell) -> (char, Style) {
    match cell {
        Cell::Empty => ('·', Style::new(Rgb::new(90, 90, 100), BACKGROUND)),
        Cell::Active => ('█', Style::new(Rgb::new(80, 220, 220), BACKGROUND).bold()),
        Cell::Ground => ('█', Style::new(Rgb::new(150, 150, 160), BACKGROUND)),
        Cell::Wall => ('▓', Style::new(Rgb::new(110, 90, 70), BACKGROUND)),
        Cell::Cleared => ('*', Style::new(Rgb::new(255, 255, 255), BACKGROUND).bold()),
    }
}
