//! Line clearing - mark filled rows, then collapse them
//!
//! Clearing is two-phase so a caller can show the marked rows before they
//! disappear. [`Board::clear_filled_rows`] runs both phases at once.
//!
//! Both phases run only between pieces: `Cleared` cells do not collide, so a
//! falling piece would erase or overwrite a marked row. A board holding marked
//! rows refuses new pieces until it is collapsed.

use crate::board::{Board, BoardEvent};
use crate::error::EngineError;

impl Board {
    /// Turn every filled row (collision tokens only, at least one ground cell)
    /// into `Cleared`. Rows holding any empty or active cell are untouched.
    /// Returns the marked row indices, top to bottom.
    pub fn mark_filled_rows_for_deletion(&mut self) -> Result<Vec<usize>, EngineError> {
        if self.has_live_piece() {
            return Err(EngineError::ActivePieceInPlay);
        }
        let grid = self.grid_mut();
        let rows: Vec<usize> = (0..grid.height() as usize)
            .filter(|&row| grid.is_row_filled(row))
            .collect();
        for &row in &rows {
            grid.mark_row(row);
        }
        if !rows.is_empty() {
            self.record(BoardEvent::RowsMarked { rows: rows.clone() });
        }
        Ok(rows)
    }

    /// Remove every cleared row, shift the rows above down, and refill the
    /// top with blank rows. Returns the number of rows removed.
    ///
    /// Refuses while a live piece is in play.
    pub fn collapse(&mut self) -> Result<usize, EngineError> {
        if self.has_live_piece() {
            return Err(EngineError::ActivePieceInPlay);
        }
        let count = self.grid_mut().collapse_cleared_rows();
        if count > 0 {
            self.record(BoardEvent::RowsCollapsed { count });
        }
        Ok(count)
    }

    /// Mark and collapse in one step. Returns the cleared row indices as they
    /// were before collapsing.
    pub fn clear_filled_rows(&mut self) -> Result<Vec<usize>, EngineError> {
        let rows = self.mark_filled_rows_for_deletion()?;
        self.collapse()?;
        Ok(rows)
    }
}
