//! Board tests - grid access, collision correction, freezing and row clears

use blockfall::core::{Board, PieceInstance};
use blockfall::types::{Color, PieceKind, Vector2, BOARD_HEIGHT, BOARD_WIDTH};

const GRAY: Color = Color::rgba(90, 90, 90, 255);

fn piece_at(kind: PieceKind, x: i32, y: i32) -> PieceInstance {
    let mut piece = PieceInstance::new(kind, 0);
    piece.set_position(Vector2::new(x, y));
    piece
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.cells().len(), (BOARD_WIDTH * BOARD_HEIGHT) as usize);

    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            assert_eq!(board.get(x, y), Some(None), "cell ({x}, {y}) should be empty");
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();
    assert!(board.set(5, 10, Some(GRAY)));
    assert_eq!(board.get(5, 10), Some(Some(GRAY)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert!(!board.is_occupied(5, 10));

    assert!(!board.set(-1, 0, Some(GRAY)));
    assert!(!board.set(0, BOARD_HEIGHT, Some(GRAY)));
}

#[test]
fn test_no_collision_in_open_space() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        for x in 2..BOARD_WIDTH - 2 {
            for y in 2..BOARD_HEIGHT - 2 {
                let piece = piece_at(kind, x, y);
                assert_eq!(board.check_collision(&piece), None, "{kind:?} at ({x}, {y})");
            }
        }
    }
}

#[test]
fn test_left_wall_shifts_right_only() {
    let board = Board::new();
    // Pointy spans x-1..=x+1, so x=0 puts the leftmost tile at -1.
    let piece = piece_at(PieceKind::Pointy, 0, 10);
    assert_eq!(board.check_collision(&piece), Some(Vector2::new(1, 10)));
}

#[test]
fn test_right_wall_shifts_left() {
    let board = Board::new();
    let piece = piece_at(PieceKind::Block, BOARD_WIDTH - 1, 10);
    assert_eq!(
        board.check_collision(&piece),
        Some(Vector2::new(BOARD_WIDTH - 2, 10))
    );
}

#[test]
fn test_floor_pushes_up() {
    let board = Board::new();
    // Line bottom tile is at y+2.
    let piece = piece_at(PieceKind::Line, 4, BOARD_HEIGHT - 2);
    assert_eq!(
        board.check_collision(&piece),
        Some(Vector2::new(4, BOARD_HEIGHT - 3))
    );
}

#[test]
fn test_frozen_tile_pushes_up() {
    let mut board = Board::new();
    board.set(4, 12, Some(GRAY));
    let piece = piece_at(PieceKind::Block, 4, 11);
    assert_eq!(board.check_collision(&piece), Some(Vector2::new(4, 10)));
}

#[test]
fn test_tiles_above_board_do_not_collide() {
    let board = Board::new();
    let piece = piece_at(PieceKind::Line, 4, -3);
    assert_eq!(board.check_collision(&piece), None);
}

#[test]
fn test_add_piece_writes_color() {
    let mut board = Board::new();
    let piece = piece_at(PieceKind::Pointy, 4, 18);
    let outcome = board.add_piece(&piece);
    assert!(!outcome.overflowed());
    assert_eq!(outcome.lines_cleared(), 0);

    let color = piece.shape().color();
    for tile in piece.absolute_tiles() {
        assert_eq!(board.get(tile.x, tile.y), Some(Some(color)));
    }
    assert_eq!(board.occupied_count(), 4);
}

#[test]
fn test_overflow_still_writes_visible_tiles() {
    let mut board = Board::new();
    // LeftEl offsets span y-1..=y+1; at y=0 one tile sits above the board.
    let piece = piece_at(PieceKind::LeftEl, 3, 0);
    let outcome = board.add_piece(&piece);

    assert!(outcome.overflowed());
    assert_eq!(outcome.overflowed_tiles, 1);
    for tile in piece.absolute_tiles().filter(|t| t.y >= 0) {
        assert!(board.is_occupied(tile.x, tile.y), "tile {tile} missing");
    }
    assert_eq!(board.occupied_count(), 3);
}

#[test]
fn test_row_clear_preserves_order() {
    let mut board = Board::new();
    let a = Color::rgba(1, 0, 0, 255);
    let b = Color::rgba(2, 0, 0, 255);
    let c = Color::rgba(3, 0, 0, 255);

    // Partial rows above and below, row 18 full except x=9.
    board.set(0, 16, Some(a));
    board.set(1, 17, Some(b));
    for x in 0..BOARD_WIDTH - 1 {
        board.set(x, 18, Some(GRAY));
    }
    board.set(2, 19, Some(c));

    // Line at x=9 covers rows 15..=18 and only completes row 18.
    let line = piece_at(PieceKind::Line, 9, 16);
    let outcome = board.add_piece(&line);
    assert_eq!(outcome.cleared_rows.as_slice(), &[18]);

    // Rows above 18 shift down by one, row 19 is untouched.
    assert_eq!(board.get(0, 17), Some(Some(a)));
    assert_eq!(board.get(1, 18), Some(Some(b)));
    assert_eq!(board.get(2, 19), Some(Some(c)));
    assert!(board.row(0).unwrap().iter().all(|cell| cell.is_none()));

    let line_color = line.shape().color();
    for y in 16..=18 {
        assert_eq!(board.get(9, y), Some(Some(line_color)));
    }
    assert_eq!(board.get(9, 15), Some(None));
}

#[test]
fn test_multiple_rows_clear_in_one_freeze() {
    let mut board = Board::new();
    for y in 16..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH - 1 {
            board.set(x, y, Some(GRAY));
        }
    }
    let line = piece_at(PieceKind::Line, BOARD_WIDTH - 1, 17);
    let outcome = board.add_piece(&line);
    assert_eq!(outcome.lines_cleared(), 4);
    assert_eq!(board.occupied_count(), 0);
}
