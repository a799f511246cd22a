//! Property tests for collision correction and rotation laws.

use proptest::prelude::*;

use blockfall::core::{shape_for, Board, PieceInstance};
use blockfall::types::{
    Color, PieceKind, RotateDirection, Rotation, Vector2, BOARD_HEIGHT, BOARD_WIDTH,
    COLLISION_SAFETY_FACTOR,
};

const GRAY: Color = Color::rgba(90, 90, 90, 255);

fn any_kind() -> impl Strategy<Value = PieceKind> {
    (0usize..7).prop_map(|i| PieceKind::ALL[i])
}

fn any_rotation() -> impl Strategy<Value = Rotation> {
    (0u8..4).prop_map(Rotation::from_quadrant)
}

fn piece(kind: PieceKind, rotation: Rotation, x: i32, y: i32) -> PieceInstance {
    let mut p = PieceInstance::new(kind, 0);
    for _ in 0..rotation.quadrant() {
        p.rotate(RotateDirection::Clockwise);
    }
    p.set_position(Vector2::new(x, y));
    p
}

proptest! {
    #[test]
    fn interior_positions_on_empty_board_never_collide(
        kind in any_kind(),
        rotation in any_rotation(),
        x in 2..BOARD_WIDTH - 2,
        y in 2..BOARD_HEIGHT - 2,
    ) {
        let board = Board::new();
        prop_assert_eq!(board.check_collision(&piece(kind, rotation, x, y)), None);
    }

    #[test]
    fn correction_lands_inside_walls(
        kind in any_kind(),
        rotation in any_rotation(),
        x in -2..BOARD_WIDTH + 2,
        y in 0..BOARD_HEIGHT + 2,
    ) {
        let board = Board::new();
        let p = piece(kind, rotation, x, y);
        let r = board.resolve(p.position(), p.tiles());

        prop_assert!(!r.exhausted);
        for t in p.tiles() {
            let cell = r.position + *t;
            prop_assert!((0..BOARD_WIDTH).contains(&cell.x));
            prop_assert!(cell.y < BOARD_HEIGHT);
        }
        // Only ever pushed up, never down.
        prop_assert!(r.position.y <= y);
    }

    #[test]
    fn resolved_position_is_free(
        kind in any_kind(),
        rotation in any_rotation(),
        x in 0..BOARD_WIDTH,
        y in 0..BOARD_HEIGHT,
        filled in proptest::collection::vec((0..BOARD_WIDTH, 8..BOARD_HEIGHT), 0..30),
    ) {
        let mut board = Board::new();
        for (fx, fy) in filled {
            board.set(fx, fy, Some(GRAY));
        }
        let p = piece(kind, rotation, x, y);
        let r = board.resolve(p.position(), p.tiles());

        prop_assert!(r.corrections <= p.tiles().len() * COLLISION_SAFETY_FACTOR);
        if !r.exhausted {
            for t in p.tiles() {
                let cell = r.position + *t;
                prop_assert!(!board.is_occupied(cell.x, cell.y));
                prop_assert!((0..BOARD_WIDTH).contains(&cell.x));
                prop_assert!(cell.y < BOARD_HEIGHT);
            }
        }
    }

    #[test]
    fn quarter_turns_compose(kind in any_kind(), a in 0u8..4, b in 0u8..4) {
        let shape = shape_for(kind);
        let mut p = PieceInstance::new(kind, 0);
        for _ in 0..a + b {
            p.rotate(RotateDirection::Clockwise);
        }
        let expected = shape.rotated(Rotation::from_quadrant(a + b));
        prop_assert_eq!(p.tiles(), expected.as_slice());
    }

    #[test]
    fn add_piece_never_grows_past_tile_count(
        kind in any_kind(),
        rotation in any_rotation(),
        x in 2..BOARD_WIDTH - 2,
        y in -2..BOARD_HEIGHT - 2,
    ) {
        let mut board = Board::new();
        let p = piece(kind, rotation, x, y);
        let outcome = board.add_piece(&p);
        let visible = p.absolute_tiles().filter(|t| t.y >= 0).count();

        prop_assert_eq!(outcome.overflowed_tiles, p.tiles().len() - visible);
        prop_assert_eq!(board.occupied_count(), visible);
    }
}
