//! Terminal presentation for the falling-block engine.
//!
//! `BoardView` turns a board into a [`Frame`] of styled lines (pure, no I/O);
//! `TerminalRenderer` flushes frames to the terminal through crossterm. The
//! engine never depends on this crate.

pub mod board_view;
pub mod frame;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use board_view::BoardView;
pub use frame::{Frame, Line, Rgb, Span, Style};
pub use renderer::{encode_into, TerminalRenderer};
