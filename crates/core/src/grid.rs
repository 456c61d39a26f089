//! Grid module - the cell matrix
//!
//! Flat row-major storage (`row * width + col`), fixed at construction.
//! Positions are (column, row) with row 0 at the top. Anything outside the
//! grid counts as a collision, so an open board needs no stored border.

use arrayvec::ArrayVec;

use crate::config::{Border, BoardConfig};
use crate::error::EngineError;
use crate::types::{Cell, CELLS_PER_PIECE};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u16,
    height: u16,
    border: Border,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(config: BoardConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut grid = Self {
            width: config.width,
            height: config.height,
            border: config.border,
            cells: vec![Cell::Empty; config.width as usize * config.height as usize],
        };
        for row in 0..grid.height as usize {
            grid.blank_row(row);
        }
        Ok(grid)
    }

    /// Build from explicit rows, e.g. a parsed board dump.
    pub(crate) fn from_rows(rows: Vec<Vec<Cell>>, border: Border) -> Result<Self, EngineError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            return Err(EngineError::Config("board rows differ in length".to_string()));
        }
        let config = BoardConfig::new(
            u16::try_from(width).unwrap_or(u16::MAX),
            u16::try_from(height).unwrap_or(u16::MAX),
            border,
        );
        config.validate()?;
        Ok(Self {
            width: config.width,
            height: config.height,
            border,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn border(&self) -> Border {
        self.border
    }

    #[inline(always)]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || col >= self.width as i32 || row < 0 || row >= self.height as i32 {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    /// Cell at (column, row); `None` outside the grid.
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row).map(|i| self.cells[i])
    }

    /// Cell at a linear row-major index.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        let width = self.width as usize;
        self.cells.get(row * width..(row + 1) * width)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    pub(crate) fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = cell;
        }
    }

    pub(crate) fn paint(&mut self, positions: &[(i32, i32)], cell: Cell) {
        for &(col, row) in positions {
            self.set(col, row, cell);
        }
    }

    /// Every position is inside the grid and free of collision tokens.
    pub fn fits(&self, positions: &[(i32, i32)]) -> bool {
        positions
            .iter()
            .all(|&(col, row)| matches!(self.get(col, row), Some(cell) if !cell.is_collision()))
    }

    /// Linear indices of positions known to be inside the grid.
    pub(crate) fn indices(&self, positions: &[(i32, i32)]) -> ArrayVec<usize, CELLS_PER_PIECE> {
        positions
            .iter()
            .filter_map(|&(col, row)| self.index(col, row))
            .collect()
    }

    /// What a freshly created row holds at this position.
    fn blank_cell(&self, col: usize, row: usize) -> Cell {
        match self.border {
            Border::Open => Cell::Empty,
            Border::Walled => {
                let edge = col == 0 || col + 1 == self.width as usize;
                let floor = row + 1 == self.height as usize;
                if edge || floor {
                    Cell::Wall
                } else {
                    Cell::Empty
                }
            }
        }
    }

    fn blank_row(&mut self, row: usize) {
        let width = self.width as usize;
        for col in 0..width {
            self.cells[row * width + col] = self.blank_cell(col, row);
        }
    }

    /// A row made only of collision tokens with at least one ground cell.
    /// The wall floor of a walled grid never qualifies.
    pub fn is_row_filled(&self, row: usize) -> bool {
        self.row(row).is_some_and(|cells| {
            cells.iter().all(Cell::is_collision) && cells.contains(&Cell::Ground)
        })
    }

    pub fn is_row_cleared(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|c| *c == Cell::Cleared))
    }

    /// Some row is marked and waiting for a collapse.
    pub fn has_cleared_rows(&self) -> bool {
        (0..self.height as usize).any(|row| self.is_row_cleared(row))
    }

    pub(crate) fn mark_row(&mut self, row: usize) {
        let width = self.width as usize;
        self.cells[row * width..(row + 1) * width].fill(Cell::Cleared);
    }

    /// Remove cleared rows, shifting the rows above down and refilling the top
    /// with blank rows. Returns the number of rows removed.
    pub(crate) fn collapse_cleared_rows(&mut self) -> usize {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut write_row = height;

        for read_row in (0..height).rev() {
            if self.is_row_cleared(read_row) {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * width;
                self.cells.copy_within(src..src + width, write_row * width);
            }
        }

        for row in 0..write_row {
            self.blank_row(row);
        }
        write_row
    }
}
