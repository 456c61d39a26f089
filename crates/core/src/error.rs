//! Engine errors.
//!
//! Only invariant violations are errors. A move rejected by a collision is a
//! normal [`MoveOutcome`](crate::types::MoveOutcome), not an `EngineError`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `undo` was called with no recorded reversible move.
    NothingToUndo,
    /// A move or line operation needs a piece but none was ever introduced.
    NoActivePiece,
    /// A piece was introduced (or rows collapsed) while a live piece is in play.
    ActivePieceInPlay,
    /// The introduced piece overlaps terrain or leaves the grid.
    SpawnBlocked,
    /// Marked rows must be collapsed before the next piece comes in.
    ClearPending,
    /// A rotation state is not four distinct offsets inside the 4x4 frame.
    InvalidRotationState,
    /// A rotation cycle must hold between one and four states.
    InvalidRotationCount(usize),
    UnknownPiece(String),
    InvalidBoardSize { width: u16, height: u16 },
    Config(String),
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::NothingToUndo => "nothing_to_undo",
            EngineError::NoActivePiece => "no_active_piece",
            EngineError::ActivePieceInPlay => "active_piece_in_play",
            EngineError::SpawnBlocked => "spawn_blocked",
            EngineError::ClearPending => "clear_pending",
            EngineError::InvalidRotationState | EngineError::InvalidRotationCount(_) => {
                "invalid_rotation"
            }
            EngineError::UnknownPiece(_) => "unknown_piece",
            EngineError::InvalidBoardSize { .. } | EngineError::Config(_) => "invalid_config",
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NothingToUndo => write!(f, "no reversible move recorded"),
            EngineError::NoActivePiece => write!(f, "no piece has been introduced"),
            EngineError::ActivePieceInPlay => write!(f, "a live piece is still in play"),
            EngineError::SpawnBlocked => write!(f, "piece cannot be placed at its spawn offset"),
            EngineError::ClearPending => write!(f, "marked rows are waiting to be collapsed"),
            EngineError::InvalidRotationState => {
                write!(f, "rotation state must be four distinct offsets below 16")
            }
            EngineError::InvalidRotationCount(n) => {
                write!(f, "rotation cycle must hold 1 to 4 states, got {}", n)
            }
            EngineError::UnknownPiece(name) => write!(f, "unknown piece: {}", name),
            EngineError::InvalidBoardSize { width, height } => {
                write!(f, "invalid board size {}x{}", width, height)
            }
            EngineError::Config(msg) => write!(f, "config: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
