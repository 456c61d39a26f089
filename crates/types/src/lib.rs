//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no dependencies, so it can be shared by
//! the engine, the terminal view and the command driver alike.
//!
//! # Frame
//!
//! Every tetromino rotation state is described inside a fixed 4x4 frame of
//! 16 cells, numbered row-major:
//!
//! ```text
//!  0  1  2  3
//!  4  5  6  7
//!  8  9 10 11
//! 12 13 14 15
//! ```
//!
//! A frame offset `o` sits at row `o / 4`, column `o % 4`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, Move, LastMove};
//!
//! assert!(Cell::Ground.is_collision());
//! assert!(!Cell::Active.is_collision());
//! assert_eq!(Cell::from_symbol('W'), Some(Cell::Wall));
//!
//! assert_eq!(Move::from_str("cw"), Some(Move::RotateCw));
//! assert_eq!(LastMove::Left.inverse(), LastMove::Right);
//! ```

/// Side length of the square frame that holds every rotation state.
pub const FRAME_DIMENSION: u8 = 4;

/// Number of cells in the frame (4x4).
pub const FRAME_CELLS: u8 = FRAME_DIMENSION * FRAME_DIMENSION;

/// Every tetromino occupies exactly four cells.
pub const CELLS_PER_PIECE: usize = 4;

/// Upper bound on the length of a rotation cycle.
pub const MAX_ROTATIONS: usize = 4;

/// Default board width in cells.
pub const DEFAULT_BOARD_WIDTH: u16 = 10;

/// Default board height in cells.
pub const DEFAULT_BOARD_HEIGHT: u16 = 20;

/// Largest accepted board side, in cells.
pub const MAX_BOARD_DIMENSION: u16 = 256;

/// Spawn offset used by the standard piece catalog: (x, y).
pub const SPAWN_OFFSET: (i32, i32) = (3, 0);

/// State of a single grid position.
///
/// `Wall` and `Ground` are collision tokens. `Active` marks the cells of the
/// falling piece, `Cleared` marks a row waiting to be collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Active,
    Wall,
    Ground,
    Cleared,
}

impl Cell {
    /// Glyph used by the textual board dump.
    ///
    /// ```
    /// use blockfall_types::Cell;
    ///
    /// assert_eq!(Cell::Empty.symbol(), '-');
    /// assert_eq!(Cell::Active.symbol(), 'O');
    /// assert_eq!(Cell::Cleared.symbol(), '*');
    /// ```
    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Active => 'O',
            Cell::Wall => 'W',
            Cell::Ground => 'G',
            Cell::Cleared => '*',
        }
    }

    /// Inverse of [`Cell::symbol`].
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '-' => Some(Cell::Empty),
            'O' => Some(Cell::Active),
            'W' => Some(Cell::Wall),
            'G' => Some(Cell::Ground),
            '*' => Some(Cell::Cleared),
            _ => None,
        }
    }

    /// Whether this cell blocks movement and rotation.
    pub fn is_collision(&self) -> bool {
        matches!(self, Cell::Wall | Cell::Ground)
    }
}

/// A single command issued against the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Down,
    RotateCw,
    RotateCcw,
}

impl Move {
    /// Parse a move from its command name (case-insensitive).
    ///
    /// ```
    /// use blockfall_types::Move;
    ///
    /// assert_eq!(Move::from_str("LEFT"), Some(Move::Left));
    /// assert_eq!(Move::from_str("rotateCcw"), Some(Move::RotateCcw));
    /// assert_eq!(Move::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Some(Move::Left),
            "right" | "r" => Some(Move::Right),
            "down" | "d" => Some(Move::Down),
            "cw" | "rotatecw" => Some(Move::RotateCw),
            "ccw" | "rotateccw" => Some(Move::RotateCcw),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Left => "left",
            Move::Right => "right",
            Move::Down => "down",
            Move::RotateCw => "cw",
            Move::RotateCcw => "ccw",
        }
    }
}

/// Last reversible move a piece performed.
///
/// A drop is never recorded here; only the engine can take a drop back, and
/// only while freezing the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LastMove {
    #[default]
    None,
    Left,
    Right,
    RotateCw,
    RotateCcw,
}

impl LastMove {
    /// The move that cancels this one. `None` has no inverse and maps to itself.
    pub fn inverse(&self) -> Self {
        match self {
            LastMove::None => LastMove::None,
            LastMove::Left => LastMove::Right,
            LastMove::Right => LastMove::Left,
            LastMove::RotateCw => LastMove::RotateCcw,
            LastMove::RotateCcw => LastMove::RotateCw,
        }
    }
}

/// Direction in which a rotation buffer's pointer advances.
///
/// Successive rotation states are counterclockwise steps, so `Forward`
/// rotates counterclockwise and `Backward` rotates clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

/// Result of a move that the engine accepted for evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The piece moved; its new cells are committed.
    Moved,
    /// A collision rejected the move; nothing changed.
    Blocked,
    /// A drop was rejected; the piece froze into ground.
    Landed,
    /// The current piece is already frozen; nothing changed.
    Frozen,
}

impl MoveOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveOutcome::Moved => "moved",
            MoveOutcome::Blocked => "blocked",
            MoveOutcome::Landed => "landed",
            MoveOutcome::Frozen => "frozen",
        }
    }
}
