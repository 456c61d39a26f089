//! Config tests - JSON game configuration and custom catalogs

use blockfall::core::{Board, Border, EngineError, GameConfig, PieceCatalog};
use blockfall::types::{Cell, SPAWN_OFFSET};

const WALLED_GAME: &str = include_str!("fixtures/walled_game.json");
const WALLED_8X10: &str = include_str!("fixtures/walled_8x10.txt");

#[test]
fn test_walled_game_from_json() {
    let config = GameConfig::from_json(WALLED_GAME).unwrap();
    assert_eq!(config.board.width, 8);
    assert_eq!(config.board.height, 10);
    assert_eq!(config.board.border, Border::Walled);
    assert_eq!(config.pieces.names().collect::<Vec<_>>(), vec!["bar", "box"]);

    let board = Board::with_config(config.board).unwrap();
    assert_eq!(board.to_string(), WALLED_8X10);
}

#[test]
fn test_custom_piece_lands_on_wall_floor() {
    let config = GameConfig::from_json(WALLED_GAME).unwrap();
    let mut board = Board::with_config(config.board).unwrap();
    let bar = config.pieces.spawn("bar").unwrap();
    assert_eq!((bar.x(), bar.y()), (2, 0));

    board.introduce_piece(bar).unwrap();
    assert_eq!(board.drop_piece(), Ok(5));
    for row in 5..9 {
        assert_eq!(board.get(3, row), Some(Cell::Ground));
    }
    assert_eq!(board.get(3, 9), Some(Cell::Wall));
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = GameConfig::from_json("{}").unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.board.width, 10);
    assert_eq!(config.board.height, 20);
    assert_eq!(config.pieces, PieceCatalog::standard());
}

#[test]
fn test_invalid_board_is_rejected() {
    let err = GameConfig::from_json(r#"{ "board": { "width": 5, "border": "walled" } }"#)
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidBoardSize {
            width: 5,
            height: 20
        }
    );
}

#[test]
fn test_bad_piece_table_is_a_config_error() {
    let err = GameConfig::from_json(r#"{ "pieces": [{ "name": "x", "rotations": [[0, 0, 1, 2]] }] }"#)
        .unwrap_err();
    assert_eq!(err.code(), "invalid_config");
}

#[test]
fn test_catalog_round_trips_through_json() {
    let catalog = PieceCatalog::standard();
    let text = serde_json::to_string_pretty(&catalog).unwrap();
    let parsed = PieceCatalog::from_json(&text).unwrap();
    assert_eq!(parsed, catalog);
    assert_eq!(parsed.get("z").unwrap().spawn_offset(), SPAWN_OFFSET);
}

#[test]
fn test_huge_board_is_rejected() {
    let err = GameConfig::from_json(r#"{ "board": { "width": 65535, "height": 65535 } }"#)
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidBoardSize {
            width: 65535,
            height: 65535
        }
    );
    assert!(Board::new(256, 256).is_ok());
    assert!(Board::new(10, 257).is_err());
}
