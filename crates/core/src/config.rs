//! Configuration - board dimensions, border style, and the piece catalog.
//!
//! Everything here is built once at start-up and then passed by reference.
//! A JSON document may override any part; missing fields take the defaults.
//!
//! ```
//! use blockfall_core::config::{Border, GameConfig};
//!
//! let config = GameConfig::from_json(r#"{ "board": { "width": 12, "border": "walled" } }"#).unwrap();
//! assert_eq!(config.board.width, 12);
//! assert_eq!(config.board.height, 20);
//! assert_eq!(config.board.border, Border::Walled);
//! assert_eq!(config.pieces.len(), 7);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::PieceCatalog;
use crate::error::EngineError;
use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, FRAME_DIMENSION, MAX_BOARD_DIMENSION};

/// How the grid edges are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Border {
    /// Edges and floor are implied: anything outside the grid collides.
    #[default]
    Open,
    /// The outer left/right columns and the bottom row hold `Wall` tokens.
    Walled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u16,
    pub height: u16,
    pub border: Border,
}

impl BoardConfig {
    pub fn new(width: u16, height: u16, border: Border) -> Self {
        Self {
            width,
            height,
            border,
        }
    }

    /// The playable area must fit at least one frame, and neither side may
    /// exceed `MAX_BOARD_DIMENSION`.
    pub fn validate(&self) -> Result<(), EngineError> {
        let frame = FRAME_DIMENSION as u16;
        let (min_w, min_h) = match self.border {
            Border::Open => (frame, frame),
            Border::Walled => (frame + 2, frame + 1),
        };
        let max = MAX_BOARD_DIMENSION;
        if self.width < min_w || self.height < min_h || self.width > max || self.height > max {
            return Err(EngineError::InvalidBoardSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT, Border::Open)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub pieces: PieceCatalog,
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| EngineError::Config(e.to_string()))?;
        config.board.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_is_ten_by_twenty_open() {
        let config = BoardConfig::default();
        assert_eq!((config.width, config.height), (10, 20));
        assert_eq!(config.border, Border::Open);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn walled_board_needs_room_for_walls() {
        assert!(BoardConfig::new(6, 5, Border::Walled).validate().is_ok());
        assert!(BoardConfig::new(5, 5, Border::Walled).validate().is_err());
        assert!(BoardConfig::new(4, 4, Border::Open).validate().is_ok());
        assert!(BoardConfig::new(4, 3, Border::Open).validate().is_err());
    }

    #[test]
    fn oversized_board_is_rejected() {
        assert!(BoardConfig::new(256, 256, Border::Open).validate().is_ok());
        assert_eq!(
            BoardConfig::new(257, 20, Border::Open).validate(),
            Err(EngineError::InvalidBoardSize {
                width: 257,
                height: 20
            })
        );
        assert!(BoardConfig::new(10, 65535, Border::Walled).validate().is_err());
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = GameConfig::from_json("{ board: }").unwrap_err();
        assert_eq!(err.code(), "invalid_config");
    }

    #[test]
    fn undersized_board_in_json_is_rejected() {
        let err = GameConfig::from_json(r#"{ "board": { "width": 2 } }"#).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidBoardSize {
                width: 2,
                height: 20
            }
        );
    }
}
