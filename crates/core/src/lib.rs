//! Falling-block engine - pure, deterministic, and testable
//!
//! This crate holds the piece and board simulation. It performs no I/O and
//! knows nothing about rendering or input; drivers issue one command at a
//! time and read the board back.
//!
//! # Module Structure
//!
//! - [`rotation`]: frame stencils and the cyclic rotation buffer
//! - [`piece`]: the active tetromino (offset, rotation, frozen flag, undo)
//! - [`grid`]: the fixed-size cell matrix
//! - [`board`]: grid + active piece, speculative move commit and freezing
//! - [`lines`]: filled-row marking and collapsing
//! - [`catalog`]: named piece stencils and spawn offsets
//! - [`config`]: board dimensions, border style, JSON loading
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Board, PieceCatalog};
//! use blockfall_core::types::{Cell, MoveOutcome};
//!
//! let catalog = PieceCatalog::standard();
//! let mut board = Board::new(10, 20).unwrap();
//!
//! board.introduce_piece(catalog.spawn("O").unwrap()).unwrap();
//! assert_eq!(board.move_left().unwrap(), MoveOutcome::Moved);
//!
//! // Fall until the floor stops the piece; it freezes into ground.
//! while board.move_down().unwrap() == MoveOutcome::Moved {}
//! assert!(!board.has_live_piece());
//! assert_eq!(board.get(3, 19), Some(Cell::Ground));
//! ```

pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod grid;
pub mod lines;
pub mod piece;
pub mod rotation;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardEvent};
pub use catalog::{PieceCatalog, PieceShape};
pub use config::{Border, BoardConfig, GameConfig};
pub use error::EngineError;
pub use grid::Grid;
pub use piece::Piece;
pub use rotation::{RotationBuffer, RotationState};
