//! Board module - grid plus the active piece, and the move commit protocol
//!
//! Every move is applied speculatively: the piece's cells are erased, the
//! piece mutates, and its new cells are tested against the grid. On success
//! the new cells are written as `Active`. On a collision the piece reverts
//! and its old cells are restored; a rejected drop additionally freezes the
//! piece and rewrites its cells as `Ground`.
//!
//! Only lateral moves and rotations revert through [`Piece::undo`]; a drop is
//! taken back by the board itself, and only on the way to freezing.

use std::fmt;

use arrayvec::ArrayVec;

use crate::config::{Border, BoardConfig};
use crate::error::EngineError;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::{Cell, Move, MoveOutcome, CELLS_PER_PIECE};

/// Most recent notable change on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A piece froze; these linear indices are now ground.
    Landed {
        cells: ArrayVec<usize, CELLS_PER_PIECE>,
    },
    /// These rows were filled and are now marked cleared.
    RowsMarked { rows: Vec<usize> },
    /// This many cleared rows were removed.
    RowsCollapsed { count: usize },
}

#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    current: Option<Piece>,
    last_event: Option<BoardEvent>,
}

impl Board {
    /// An open board of the given size.
    pub fn new(width: u16, height: u16) -> Result<Self, EngineError> {
        Self::with_config(BoardConfig::new(width, height, Border::Open))
    }

    pub fn with_config(config: BoardConfig) -> Result<Self, EngineError> {
        Ok(Self {
            grid: Grid::new(config)?,
            current: None,
            last_event: None,
        })
    }

    /// Build a board from a textual dump holding terrain only
    /// (`-`, `W`, `G`, `*`; one row per line).
    pub fn from_terrain(text: &str, border: Border) -> Result<Self, EngineError> {
        let rows = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.trim()
                    .chars()
                    .map(|ch| match Cell::from_symbol(ch) {
                        Some(Cell::Active) => Err(EngineError::Config(
                            "terrain cannot hold an active piece".to_string(),
                        )),
                        Some(cell) => Ok(cell),
                        None => Err(EngineError::Config(format!("unknown cell symbol: {}", ch))),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            grid: Grid::from_rows(rows, border)?,
            current: None,
            last_event: None,
        })
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    pub fn border(&self) -> Border {
        self.grid.border()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell at (column, row); `None` outside the board.
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.grid.get(col, row)
    }

    /// Cell at a linear row-major index.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.grid.cell(index)
    }

    pub fn cells(&self) -> &[Cell] {
        self.grid.cells()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.rows()
    }

    /// The most recently introduced piece, frozen or not.
    pub fn active(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// A piece is in play and still responds to moves.
    pub fn has_live_piece(&self) -> bool {
        self.current.as_ref().is_some_and(|p| !p.is_frozen())
    }

    /// Whether `piece` would overlap terrain or leave the board at its offset.
    pub fn is_spawn_blocked(&self, piece: &Piece) -> bool {
        !self.grid.fits(&piece.positions())
    }

    /// Register `piece` as the active piece and write its cells.
    ///
    /// Fails if a live piece is still in play, if marked rows are waiting
    /// to be collapsed, or if the piece does not fit where it stands; the
    /// board is unchanged in each case.
    pub fn introduce_piece(&mut self, piece: Piece) -> Result<(), EngineError> {
        if self.has_live_piece() {
            return Err(EngineError::ActivePieceInPlay);
        }
        if self.grid.has_cleared_rows() {
            return Err(EngineError::ClearPending);
        }
        if self.is_spawn_blocked(&piece) {
            return Err(EngineError::SpawnBlocked);
        }
        self.grid.paint(&piece.positions(), Cell::Active);
        self.current = Some(piece);
        Ok(())
    }

    /// Try one move on the active piece and commit or revert it.
    pub fn attempt_move(&mut self, kind: Move) -> Result<MoveOutcome, EngineError> {
        let grid = &mut self.grid;
        let piece = self.current.as_mut().ok_or(EngineError::NoActivePiece)?;
        if piece.is_frozen() {
            return Ok(MoveOutcome::Frozen);
        }

        let before = piece.positions();
        grid.paint(&before, Cell::Empty);

        match kind {
            Move::Left => piece.move_left(),
            Move::Right => piece.move_right(),
            Move::Down => piece.move_down(),
            Move::RotateCw => piece.rotate_clockwise(),
            Move::RotateCcw => piece.rotate_counterclockwise(),
        }

        let after = piece.positions();
        if grid.fits(&after) {
            grid.paint(&after, Cell::Active);
            return Ok(MoveOutcome::Moved);
        }

        if kind == Move::Down {
            piece.cancel_drop();
            piece.freeze();
            grid.paint(&before, Cell::Ground);
            self.last_event = Some(BoardEvent::Landed {
                cells: grid.indices(&before),
            });
            return Ok(MoveOutcome::Landed);
        }

        grid.paint(&before, Cell::Active);
        piece.undo()?;
        Ok(MoveOutcome::Blocked)
    }

    pub fn move_left(&mut self) -> Result<MoveOutcome, EngineError> {
        self.attempt_move(Move::Left)
    }

    pub fn move_right(&mut self) -> Result<MoveOutcome, EngineError> {
        self.attempt_move(Move::Right)
    }

    pub fn move_down(&mut self) -> Result<MoveOutcome, EngineError> {
        self.attempt_move(Move::Down)
    }

    pub fn rotate_clockwise(&mut self) -> Result<MoveOutcome, EngineError> {
        self.attempt_move(Move::RotateCw)
    }

    pub fn rotate_counterclockwise(&mut self) -> Result<MoveOutcome, EngineError> {
        self.attempt_move(Move::RotateCcw)
    }

    /// Drop the active piece until it lands. Returns the rows fallen.
    pub fn drop_piece(&mut self) -> Result<u16, EngineError> {
        let mut fallen = 0;
        while self.attempt_move(Move::Down)? == MoveOutcome::Moved {
            fallen += 1;
        }
        Ok(fallen)
    }

    /// Take and clear the last board event.
    pub fn take_last_event(&mut self) -> Option<BoardEvent> {
        self.last_event.take()
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub(crate) fn record(&mut self, event: BoardEvent) {
        self.last_event = Some(event);
    }
}

/// Boards compare by grid contents and active piece; the event slot is not
/// part of a board's state.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid && self.current == other.current
    }
}

impl Eq for Board {}

/// Row-major dump, one glyph per cell, every row terminated by a newline.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PieceCatalog;
    use crate::types::LastMove;

    fn board_with(name: &str, dx: i32, dy: i32) -> Board {
        let mut board = Board::new(6, 8).unwrap();
        let piece = PieceCatalog::standard()
            .spawn(name)
            .unwrap()
            .translated(dx, dy);
        board.introduce_piece(piece).unwrap();
        board
    }

    #[test]
    fn move_without_piece_is_an_error() {
        let mut board = Board::new(6, 8).unwrap();
        assert_eq!(board.move_left(), Err(EngineError::NoActivePiece));
    }

    #[test]
    fn introduce_writes_active_cells() {
        // O at (3, 0) -> frame cells 5, 6, 9, 10
        let board = board_with("O", -3, 0);
        assert_eq!(board.get(1, 1), Some(Cell::Active));
        assert_eq!(board.get(2, 1), Some(Cell::Active));
        assert_eq!(board.get(1, 2), Some(Cell::Active));
        assert_eq!(board.get(2, 2), Some(Cell::Active));
        assert_eq!(board.cells().iter().filter(|c| **c == Cell::Active).count(), 4);
    }

    #[test]
    fn second_live_piece_is_rejected() {
        let mut board = board_with("O", -3, 0);
        let before = board.clone();
        let other = PieceCatalog::standard().spawn("I").unwrap();
        assert_eq!(
            board.introduce_piece(other),
            Err(EngineError::ActivePieceInPlay)
        );
        assert_eq!(board, before);
    }

    #[test]
    fn blocked_move_leaves_no_trace() {
        let mut board = board_with("O", -4, 0);
        // O frame column 1 sits at board column 0.
        let before = board.clone();
        assert_eq!(board.move_left(), Ok(MoveOutcome::Blocked));
        assert_eq!(board, before);
        assert_eq!(board.active().unwrap().last_move(), LastMove::None);
    }

    #[test]
    fn rejected_drop_freezes_into_ground() {
        let mut board = board_with("O", -3, 5);
        // O rows 6 and 7 are the bottom two rows of an 8-row board.
        assert_eq!(board.move_down(), Ok(MoveOutcome::Landed));
        assert!(board.active().unwrap().is_frozen());
        assert_eq!(board.get(1, 6), Some(Cell::Ground));
        assert_eq!(board.get(2, 7), Some(Cell::Ground));
        assert_eq!(
            board.take_last_event(),
            Some(BoardEvent::Landed {
                cells: [37, 38, 43, 44].into_iter().collect()
            })
        );
        assert_eq!(board.take_last_event(), None);

        let frozen = board.clone();
        assert_eq!(board.move_down(), Ok(MoveOutcome::Frozen));
        assert_eq!(board.rotate_clockwise(), Ok(MoveOutcome::Frozen));
        assert_eq!(board, frozen);
    }

    #[test]
    fn drop_piece_reports_rows_fallen() {
        let mut board = board_with("O", -3, 0);
        assert_eq!(board.drop_piece(), Ok(5));
        assert!(!board.has_live_piece());
    }

    #[test]
    fn spawn_onto_ground_is_blocked() {
        let mut board = board_with("O", -3, 5);
        board.drop_piece().unwrap();
        let piece = PieceCatalog::standard()
            .spawn("O")
            .unwrap()
            .translated(-3, 5);
        assert!(board.is_spawn_blocked(&piece));
        assert_eq!(board.introduce_piece(piece), Err(EngineError::SpawnBlocked));
    }

    #[test]
    fn from_terrain_rejects_active_cells() {
        assert!(Board::from_terrain("----\n----\n--O-\n----\n", Border::Open).is_err());
        let board = Board::from_terrain("----\n----\n--G-\nGGGG\n", Border::Open).unwrap();
        assert_eq!(board.get(2, 2), Some(Cell::Ground));
        assert_eq!(board.to_string(), "----\n----\n--G-\nGGGG\n");
    }
}
