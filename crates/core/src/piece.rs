//! Piece module - the active tetromino
//!
//! A piece is a rotation buffer plus a board-relative offset. It knows how to
//! move itself and how to take back its last lateral move or rotation, but
//! nothing about the grid; the board decides whether a move stands.
//!
//! Once frozen, every mutating call is a no-op.

use std::hash::{Hash, Hasher};

use arrayvec::ArrayVec;

use crate::error::EngineError;
use crate::rotation::{RotationBuffer, RotationState};
use crate::types::{Direction, LastMove, CELLS_PER_PIECE, FRAME_DIMENSION};

#[derive(Debug, Clone)]
pub struct Piece {
    name: String,
    rotations: RotationBuffer<RotationState>,
    x: i32,
    y: i32,
    frozen: bool,
    last_move: LastMove,
}

impl Piece {
    pub fn new(
        name: impl Into<String>,
        rotations: RotationBuffer<RotationState>,
        x: i32,
        y: i32,
    ) -> Self {
        Self {
            name: name.into(),
            rotations,
            x,
            y,
            frozen: false,
            last_move: LastMove::None,
        }
    }

    /// Shift the offset, returning the moved piece. Used to position a piece
    /// before it is introduced; not recorded as a move. Saturates at the
    /// `i32` range.
    pub fn translated(mut self, dx: i32, dy: i32) -> Self {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn last_move(&self) -> LastMove {
        self.last_move
    }

    pub fn rotations(&self) -> &RotationBuffer<RotationState> {
        &self.rotations
    }

    pub fn current_rotation(&self) -> RotationState {
        self.rotations.current()
    }

    pub fn move_left(&mut self) {
        if self.frozen {
            return;
        }
        self.x = self.x.saturating_sub(1);
        self.last_move = LastMove::Left;
    }

    pub fn move_right(&mut self) {
        if self.frozen {
            return;
        }
        self.x = self.x.saturating_add(1);
        self.last_move = LastMove::Right;
    }

    /// Drop one row. A drop is not undoable, so it also forgets the last move.
    pub fn move_down(&mut self) {
        if self.frozen {
            return;
        }
        self.y = self.y.saturating_add(1);
        self.last_move = LastMove::None;
    }

    pub fn rotate_clockwise(&mut self) {
        if self.frozen {
            return;
        }
        self.rotations.advance(Direction::Backward);
        self.last_move = LastMove::RotateCw;
    }

    pub fn rotate_counterclockwise(&mut self) {
        if self.frozen {
            return;
        }
        self.rotations.advance(Direction::Forward);
        self.last_move = LastMove::RotateCcw;
    }

    /// Apply the inverse of the last recorded move and forget it.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        if self.frozen {
            return Ok(());
        }
        match self.last_move.inverse() {
            LastMove::None => return Err(EngineError::NothingToUndo),
            LastMove::Left => self.move_left(),
            LastMove::Right => self.move_right(),
            LastMove::RotateCw => self.rotate_clockwise(),
            LastMove::RotateCcw => self.rotate_counterclockwise(),
        }
        self.last_move = LastMove::None;
        Ok(())
    }

    /// Take back a rejected drop. Only the board does this, right before
    /// freezing the piece.
    pub(crate) fn cancel_drop(&mut self) {
        if self.frozen {
            return;
        }
        self.y = self.y.saturating_sub(1);
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// (column, row) board positions of the four cells. Coordinates past the
    /// `i32` range saturate, which still lies outside any board.
    pub fn positions(&self) -> ArrayVec<(i32, i32), CELLS_PER_PIECE> {
        self.current_rotation()
            .frame_positions()
            .iter()
            .map(|&(col, row)| (self.x.saturating_add(col), self.y.saturating_add(row)))
            .collect()
    }

    /// Linear board indices of the four cells:
    /// `x + width * y + width * (o / 4) + o % 4` for each frame offset `o`.
    pub fn current_cells(&self, board_width: u16) -> ArrayVec<i64, CELLS_PER_PIECE> {
        let width = board_width as i64;
        let base = self.x as i64 + width * self.y as i64;
        let dim = FRAME_DIMENSION as i64;
        self.current_rotation()
            .offsets()
            .iter()
            .map(|&o| {
                let o = o as i64;
                base + width * (o / dim) + o % dim
            })
            .collect()
    }
}

/// Pieces compare by name, rotation state, offset, and frozen flag. The
/// last-move record is undo bookkeeping and does not take part.
impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.rotations == other.rotations
            && self.x == other.x
            && self.y == other.y
            && self.frozen == other.frozen
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.rotations.hash(state);
        self.x.hash(state);
        self.y.hash(state);
        self.frozen.hash(state);
    }
}
