//! Board tests - transactional semantics and statistics consistency

use tetris_board::core::{Board, Piece};
use tetris_board::types::{BoardError, PieceKind, PlaceResult};

/// Recompute every statistic from `get()` and compare with the cached
/// accessors.
fn assert_stats_consistent(board: &Board) {
    let mut max_height = 0;
    for x in 0..board.width() {
        let mut col_height = 0;
        for y in 0..board.height() {
            if board.get(x as i32, y as i32) {
                col_height = y + 1;
            }
        }
        assert_eq!(
            board.column_height(x),
            Ok(col_height),
            "column {} height out of sync",
            x
        );
        max_height = max_height.max(col_height);
    }
    assert_eq!(board.max_height(), max_height, "max height out of sync");

    for y in 0..board.height() {
        let row_width = (0..board.width())
            .filter(|&x| board.get(x as i32, y as i32))
            .count();
        assert_eq!(
            board.row_width(y),
            Ok(row_width),
            "row {} width out of sync",
            y
        );
    }
}

fn unit() -> Piece {
    Piece::from_body(&[(0, 0)])
}

#[test]
fn stats_track_a_sequence_of_placements() {
    let mut board = Board::new(10, 20);
    for (kind, x) in [
        (PieceKind::L, 0),
        (PieceKind::S, 3),
        (PieceKind::I, 6),
        (PieceKind::T, 2),
        (PieceKind::O, 7),
    ] {
        let piece = Piece::new(kind);
        let y = board.drop_height(&piece, x).unwrap();
        assert!(board.place(&piece, x, y).unwrap().is_success());
        board.commit();
        assert_stats_consistent(&board);
    }
}

#[test]
fn query_index_errors() {
    let board = Board::new(10, 20);
    assert_eq!(
        board.column_height(10),
        Err(BoardError::ColumnOutOfRange { x: 10, width: 10 })
    );
    assert_eq!(
        board.row_width(20),
        Err(BoardError::RowOutOfRange { y: 20, height: 20 })
    );
    assert_eq!(
        board.drop_height(&Piece::new(PieceKind::I), 7),
        Err(BoardError::DropOutOfRange {
            x: 7,
            piece_width: 4,
            width: 10
        })
    );
    assert_eq!(
        board.drop_height(&Piece::new(PieceKind::I), -1),
        Err(BoardError::DropOutOfRange {
            x: -1,
            piece_width: 4,
            width: 10
        })
    );
}

#[test]
fn drop_height_result_never_collides() {
    let mut board = Board::new(10, 20);
    // Rough terrain first.
    for (x, count) in [(0, 3), (1, 1), (4, 5), (5, 2), (9, 7)] {
        for _ in 0..count {
            let y = board.drop_height(&unit(), x).unwrap();
            assert!(board.place(&unit(), x, y).unwrap().is_success());
            board.commit();
        }
    }

    for kind in PieceKind::ALL {
        let mut piece = Piece::new(kind);
        for _ in 0..4 {
            for x in 0..=(board.width() - piece.width()) as i32 {
                let y = board.drop_height(&piece, x).unwrap();
                let result = board.place(&piece, x, y).unwrap();
                assert_ne!(
                    result,
                    PlaceResult::Bad,
                    "{:?} at x={} collided at its drop height",
                    kind,
                    x
                );
                board.undo();
            }
            piece = piece.rotated();
        }
    }
}

#[test]
fn undo_restores_place_bit_for_bit() {
    let mut board = Board::new(6, 10);
    let y = board.drop_height(&Piece::new(PieceKind::Z), 1).unwrap();
    board.place(&Piece::new(PieceKind::Z), 1, y).unwrap();
    board.commit();
    let before = board.to_string();

    board.place(&Piece::new(PieceKind::T), 2, 3).unwrap();
    board.undo();

    assert!(board.committed());
    assert_eq!(board.to_string(), before);
    assert_stats_consistent(&board);
}

#[test]
fn undo_is_idempotent() {
    let mut board = Board::new(6, 10);
    board.place(&unit(), 2, 0).unwrap();
    board.commit();
    let committed = board.to_string();

    board.place(&unit(), 3, 0).unwrap();
    board.undo();
    assert_eq!(board.to_string(), committed);

    // Second undo with no intervening mutation restores the same snapshot.
    board.undo();
    assert!(board.committed());
    assert_eq!(board.to_string(), committed);
    assert_stats_consistent(&board);
}

#[test]
fn place_requires_a_committed_board() {
    let mut board = Board::new(6, 10);
    board.place(&unit(), 0, 0).unwrap();
    assert_eq!(board.place(&unit(), 1, 0), Err(BoardError::NotCommitted));
    // The failed call did not disturb the open transaction.
    board.undo();
    assert_eq!(board.max_height(), 0);
}

#[test]
fn out_of_bounds_place_recovers_via_undo() {
    let mut board = Board::new(10, 20);
    let before = board.to_string();

    // I piece at x=8 hangs over the right edge.
    let result = board.place(&Piece::new(PieceKind::I), 8, 0).unwrap();
    assert_eq!(result, PlaceResult::OutOfBounds);

    // The bounds-permissive query still reports empty past the edges.
    assert!(!board.get(10, 0));
    assert!(!board.get(-1, 5));
    assert!(!board.get(3, 20));

    board.undo();
    assert_eq!(board.to_string(), before);
    assert_stats_consistent(&board);
}

#[test]
fn collision_place_reports_bad() {
    let mut board = Board::new(10, 20);
    board.place(&Piece::new(PieceKind::O), 4, 0).unwrap();
    board.commit();

    assert_eq!(
        board.place(&Piece::new(PieceKind::O), 4, 1).unwrap(),
        PlaceResult::Bad
    );
    board.undo();
    assert_eq!(board.max_height(), 2);
    assert_stats_consistent(&board);
}

#[test]
fn filling_a_row_reports_row_filled() {
    let mut board = Board::new(4, 8);
    for x in 0..3 {
        assert_eq!(board.place(&unit(), x, 0), Ok(PlaceResult::Ok));
        board.commit();
    }
    assert_eq!(board.place(&unit(), 3, 0), Ok(PlaceResult::RowFilled));
    board.commit();
    assert_eq!(board.row_width(0), Ok(4));
}

#[test]
fn clear_rows_with_no_full_rows_returns_zero() {
    let mut board = Board::new(6, 10);
    board.place(&Piece::new(PieceKind::J), 0, 0).unwrap();
    board.commit();
    let before = board.to_string();

    assert_eq!(board.clear_rows(), 0);
    assert!(!board.committed(), "clear_rows opens a transaction even when idle");
    assert_eq!(board.to_string(), before);
    assert_stats_consistent(&board);
    board.commit();
}

#[test]
fn fill_column_then_bottom_row_scenario() {
    let mut board = Board::new(10, 20);

    // Column 5 filled bottom to top across separate transactions.
    for y in 0..20 {
        assert!(board.place(&unit(), 5, y).unwrap().is_success());
        board.commit();
    }
    assert_eq!(board.column_height(5), Ok(20));
    assert_eq!(board.max_height(), 20);

    // Bottom row filled across the remaining columns.
    let mut fresh = Board::new(10, 20);
    for x in 0..10 {
        assert!(fresh.place(&unit(), x, 0).unwrap().is_success());
        fresh.commit();
    }
    assert_eq!(fresh.row_width(0), Ok(10));
    assert_eq!(fresh.clear_rows(), 1);
    assert!(fresh.max_height() <= 1);
    assert_stats_consistent(&fresh);
    fresh.commit();
}

#[test]
fn clearing_two_rows_shifts_everything_down() {
    let mut board = Board::new(4, 8);
    // Bottom two rows full, plus a tower of three on column 1 above them.
    for y in 0..2 {
        for x in 0..4 {
            assert!(board.place(&unit(), x, y).unwrap().is_success());
            board.commit();
        }
    }
    for y in 2..5 {
        assert!(board.place(&unit(), 1, y).unwrap().is_success());
        board.commit();
    }
    assert_eq!(board.max_height(), 5);

    assert_eq!(board.clear_rows(), 2);
    board.commit();

    assert_eq!(board.max_height(), 3);
    assert_eq!(board.column_height(1), Ok(3));
    assert_eq!(board.column_height(0), Ok(0));
    for y in 0..3 {
        assert!(board.get(1, y));
    }
    assert_stats_consistent(&board);
}

#[test]
fn place_and_clear_compose_into_one_undo_unit() {
    let mut board = Board::new(4, 8);
    for x in 0..3 {
        board.place(&unit(), x, 0).unwrap();
        board.commit();
    }
    let before = board.to_string();

    // One transaction: the filling placement plus the row clear.
    assert_eq!(board.place(&unit(), 3, 0), Ok(PlaceResult::RowFilled));
    assert_eq!(board.clear_rows(), 1);
    assert_eq!(board.max_height(), 0);

    board.undo();
    assert_eq!(board.to_string(), before, "undo must revert place and clear together");
    assert_eq!(board.row_width(0), Ok(3));
    assert_stats_consistent(&board);
}

#[test]
fn display_dump_matches_grid_queries() {
    let mut board = Board::new(3, 3);
    board.place(&unit(), 0, 0).unwrap();
    board.commit();
    board.place(&unit(), 2, 1).unwrap();
    board.commit();

    let dump = board.to_string();
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "|   |");
    assert_eq!(lines[1], "|  +|");
    assert_eq!(lines[2], "|+  |");
    assert_eq!(lines[3], "-----");
}
