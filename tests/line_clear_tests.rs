//! Line clear tests - marking filled rows and collapsing them

use blockfall::core::{Board, BoardEvent, Border, EngineError, PieceCatalog};
use blockfall::types::{Cell, MoveOutcome};

fn land(board: &mut Board, name: &str, dx: i32, rotate: bool) {
    let piece = PieceCatalog::standard()
        .spawn(name)
        .unwrap()
        .translated(dx, 0);
    board.introduce_piece(piece).unwrap();
    if rotate {
        assert_eq!(board.rotate_clockwise(), Ok(MoveOutcome::Moved));
    }
    board.drop_piece().unwrap();
}

/// Two horizontal I pieces fill the bottom row of an 8-wide board, and an O
/// rests on top of them.
fn stacked_board() -> Board {
    let mut board = Board::new(8, 6).unwrap();
    land(&mut board, "I", -3, true);
    land(&mut board, "I", 1, true);
    land(&mut board, "O", -3, false);
    board
}

#[test]
fn test_two_pieces_fill_a_row() {
    let board = stacked_board();
    assert_eq!(
        board.to_string(),
        "--------\n--------\n--------\n-GG-----\n-GG-----\nGGGGGGGG\n"
    );
    assert!(board.grid().is_row_filled(5));
    assert!(!board.grid().is_row_filled(4));
}

#[test]
fn test_mark_only_touches_filled_rows() {
    let mut board = stacked_board();
    board.take_last_event();

    assert_eq!(board.mark_filled_rows_for_deletion(), Ok(vec![5]));
    assert_eq!(
        board.to_string(),
        "--------\n--------\n--------\n-GG-----\n-GG-----\n********\n"
    );
    assert_eq!(
        board.take_last_event(),
        Some(BoardEvent::RowsMarked { rows: vec![5] })
    );
}

#[test]
fn test_collapse_shifts_rows_down() {
    let mut board = stacked_board();
    board.mark_filled_rows_for_deletion().unwrap();

    assert_eq!(board.collapse(), Ok(1));
    assert_eq!(
        board.to_string(),
        "--------\n--------\n--------\n--------\n-GG-----\n-GG-----\n"
    );
    assert_eq!(
        board.take_last_event(),
        Some(BoardEvent::RowsCollapsed { count: 1 })
    );
    assert!(!board.cells().contains(&Cell::Cleared));
}

#[test]
fn test_clear_in_one_step_matches_two_phases() {
    let mut two_phase = stacked_board();
    two_phase.mark_filled_rows_for_deletion().unwrap();
    two_phase.collapse().unwrap();

    let mut one_step = stacked_board();
    assert_eq!(one_step.clear_filled_rows(), Ok(vec![5]));
    assert_eq!(one_step.to_string(), two_phase.to_string());
}

#[test]
fn test_nothing_to_clear() {
    let mut board = Board::new(8, 6).unwrap();
    land(&mut board, "O", -3, false);
    let before = board.to_string();

    assert_eq!(board.mark_filled_rows_for_deletion(), Ok(vec![]));
    assert_eq!(board.collapse(), Ok(0));
    assert_eq!(board.to_string(), before);
}

#[test]
fn test_clear_refused_while_piece_falls() {
    let mut board = stacked_board();
    let piece = PieceCatalog::standard().spawn("T").unwrap();
    board.introduce_piece(piece).unwrap();

    assert_eq!(board.clear_filled_rows(), Err(EngineError::ActivePieceInPlay));
    assert_eq!(
        board.mark_filled_rows_for_deletion(),
        Err(EngineError::ActivePieceInPlay)
    );
    assert!(board.grid().is_row_filled(5));
    assert!(!board.cells().contains(&Cell::Cleared));
}

#[test]
fn test_marked_row_survives_until_collapse() {
    let mut board = stacked_board();
    assert_eq!(board.mark_filled_rows_for_deletion(), Ok(vec![5]));

    // No piece may fall through the marked row before it is collapsed.
    let piece = PieceCatalog::standard()
        .spawn("I")
        .unwrap()
        .translated(3, 0);
    assert_eq!(
        board.introduce_piece(piece.clone()),
        Err(EngineError::ClearPending)
    );
    assert!(board.grid().is_row_cleared(5));

    assert_eq!(board.collapse(), Ok(1));
    assert_eq!(board.mark_filled_rows_for_deletion(), Ok(vec![]));
    assert!(!board.cells().contains(&Cell::Cleared));

    board.introduce_piece(piece).unwrap();
    assert_eq!(board.drop_piece(), Ok(2));
    assert_eq!(
        board.to_string(),
        "--------\n--------\n-------G\n-------G\n-GG----G\n-GG----G\n"
    );
}

#[test]
fn test_walled_floor_is_never_cleared() {
    let mut board = Board::from_terrain(
        "W----W\nW----W\nW----W\nW----W\nWWWWWW\n",
        Border::Walled,
    )
    .unwrap();
    assert_eq!(board.mark_filled_rows_for_deletion(), Ok(vec![]));
    assert_eq!(board.collapse(), Ok(0));
}
