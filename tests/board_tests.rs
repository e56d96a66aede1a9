//! Board tests - public grid operations

use srs_tetris::core::{Board, LockOut};
use srs_tetris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Fill row `y` except the listed columns
fn fill_row(board: &mut Board, y: i8, holes: &[i8], kind: PieceKind) {
    let cells: Vec<(i8, i8)> = (0..board.width() as i8)
        .filter(|x| !holes.contains(x))
        .map(|x| (x, y))
        .collect();
    board.lock(&cells, kind).unwrap();
}

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(&[(x, y)]), "Cell ({x}, {y}) should be valid");
            assert_eq!(board.get(x, y), Some(None));
        }
    }
    assert!(board.full_rows().is_empty());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(6, 8);

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(6, 0), None);
    assert_eq!(board.get(0, 8), None);
}

#[test]
fn test_board_is_valid_bounds() {
    let board = Board::default();

    // Spawn buffer above the top is free
    assert!(board.is_valid(&[(0, -1), (9, -2)]));
    // Walls and floor are not
    assert!(!board.is_valid(&[(-1, 5)]));
    assert!(!board.is_valid(&[(10, 5)]));
    assert!(!board.is_valid(&[(4, 20)]));
    // One bad cell spoils the set
    assert!(!board.is_valid(&[(4, 4), (4, 20)]));
}

#[test]
fn test_board_is_occupied_treats_outside_as_filled() {
    let mut board = Board::default();
    board.lock(&[(5, 10)], PieceKind::T).unwrap();

    assert!(board.is_occupied(5, 10));
    assert!(!board.is_occupied(5, 9));
    assert!(board.is_occupied(-1, 0));
    assert!(board.is_occupied(10, 0));
    assert!(board.is_occupied(0, 20));
    assert!(board.is_occupied(0, -1));
}

#[test]
fn test_board_lock_piece_success() {
    let mut board = Board::default();
    let cells = [(4, 18), (3, 19), (4, 19), (5, 19)];

    assert_eq!(board.lock(&cells, PieceKind::T), Ok(()));
    for &(x, y) in &cells {
        assert_eq!(board.get(x, y), Some(Some(PieceKind::T)));
    }
    assert!(!board.is_valid(&cells));
}

#[test]
fn test_board_lock_above_top_is_lock_out() {
    let mut board = Board::default();
    let cells = [(4, -1), (3, 0), (4, 0), (5, 0)];

    assert_eq!(board.lock(&cells, PieceKind::T), Err(LockOut));
    // The visible part is still written.
    assert_eq!(board.get(3, 0), Some(Some(PieceKind::T)));
    assert_eq!(board.get(4, 0), Some(Some(PieceKind::T)));
}

#[test]
fn test_board_full_rows_ascending() {
    let mut board = Board::default();
    fill_row(&mut board, 19, &[], PieceKind::I);
    fill_row(&mut board, 18, &[3], PieceKind::J);
    fill_row(&mut board, 17, &[], PieceKind::L);

    assert!(board.is_row_full(19));
    assert!(!board.is_row_full(18));
    assert!(!board.is_row_full(20));
    assert_eq!(board.full_rows().as_slice(), &[17, 19]);
}

#[test]
fn test_board_remove_rows_shifts_down() {
    // 4 wide, 8 tall; rows 2 and 5 are removed.
    let mut board = Board::new(4, 8);
    board.lock(&[(0, 0)], PieceKind::I).unwrap();
    board.lock(&[(1, 1)], PieceKind::O).unwrap();
    fill_row(&mut board, 2, &[], PieceKind::T);
    board.lock(&[(2, 3)], PieceKind::S).unwrap();
    fill_row(&mut board, 5, &[], PieceKind::Z);
    board.lock(&[(3, 7)], PieceKind::L).unwrap();

    board.remove_rows(&[2, 5]);

    // Two empty rows on top
    for y in 0..2 {
        for x in 0..4 {
            assert_eq!(board.get(x, y), Some(None));
        }
    }
    // Rows 0/1 moved to 2/3; row 3 sat between the removed rows and moves by one.
    assert_eq!(board.get(0, 2), Some(Some(PieceKind::I)));
    assert_eq!(board.get(1, 3), Some(Some(PieceKind::O)));
    assert_eq!(board.get(2, 4), Some(Some(PieceKind::S)));
    // Below the lowest removed row nothing moves.
    assert_eq!(board.get(3, 7), Some(Some(PieceKind::L)));
    assert!(board.full_rows().is_empty());
}

#[test]
fn test_board_clear() {
    let mut board = Board::default();
    fill_row(&mut board, 19, &[0], PieceKind::I);
    board.clear();
    assert!(board.cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_board_cells_row_major() {
    let mut board = Board::new(5, 4);
    board.lock(&[(2, 3)], PieceKind::J).unwrap();
    assert_eq!(board.cells().len(), 20);
    assert_eq!(board.cells()[3 * 5 + 2], Some(PieceKind::J));
}
