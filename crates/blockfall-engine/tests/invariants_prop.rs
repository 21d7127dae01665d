//! Properties that must hold for any board and any action stream.

use blockfall_engine::{
    Action, BOARD_HEIGHT, BOARD_WIDTH, Board, Cell, Color, FallingBlock, GameState,
    POINTS_PER_ROW, PieceSeed, Tetromino, TetrominoKind,
};
use proptest::prelude::*;

fn action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

fn kind() -> impl Strategy<Value = TetrominoKind> {
    prop::sample::select(TetrominoKind::ALL.to_vec())
}

/// Boards mixing full rows with random partial rows.
fn board() -> impl Strategy<Value = Board> {
    prop::collection::vec(
        (any::<bool>(), prop::collection::vec(any::<bool>(), BOARD_WIDTH)),
        BOARD_HEIGHT,
    )
    .prop_map(|rows| {
        let mut board = Board::new();
        for (y, (full, cells)) in rows.into_iter().enumerate() {
            for (x, filled) in cells.into_iter().enumerate() {
                if full || filled {
                    board.set_cell(x, y, Cell::Filled(Color::Green));
                }
            }
        }
        board
    })
}

fn in_bounds(x: i32, y: i32) -> bool {
    usize::try_from(x).is_ok_and(|x| x < BOARD_WIDTH)
        && usize::try_from(y).is_ok_and(|y| y < BOARD_HEIGHT)
}

#[test]
fn placement_outside_the_board_is_rejected() {
    let width = i32::try_from(BOARD_WIDTH).unwrap();
    let height = i32::try_from(BOARD_HEIGHT).unwrap();
    for kind in TetrominoKind::ALL {
        let mut tetromino = Tetromino::new(kind);
        for _ in 0..4 {
            for y in -4..=height + 4 {
                for x in -4..=width + 4 {
                    let block = FallingBlock::new(tetromino.clone(), x, y);
                    let inside = block.occupied_positions().all(|(x, y)| in_bounds(x, y));
                    assert_eq!(Board::new().can_place(&tetromino, x, y), inside);
                }
            }
            tetromino = tetromino.rotated();
        }
    }
}

#[test]
fn four_rotations_restore_every_shape() {
    for kind in TetrominoKind::ALL {
        let shape = kind.shape();
        let turned = shape.rotated().rotated().rotated().rotated();
        assert_eq!(turned, shape, "{kind:?}");
        assert_eq!(shape.occupied_cells().count(), 4);
    }
}

proptest! {
    #[test]
    fn rollout_keeps_state_consistent(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..300),
    ) {
        let mut state = GameState::with_seed(PieceSeed::from(u128::from(seed)));
        for action in actions {
            let next = state.update(action);

            prop_assert!(next.score() >= state.score());
            prop_assert_eq!(next.score() % POINTS_PER_ROW, 0);
            prop_assert_eq!(next.score(), next.cleared_rows() * POINTS_PER_ROW);
            prop_assert!(next.locked_pieces() >= state.locked_pieces());
            prop_assert_eq!(next.board().rows().len(), BOARD_HEIGHT);
            if next.is_game_over() {
                prop_assert_eq!(&next.update(action), &next);
            } else {
                prop_assert!(next.current().fits(next.board()));
            }
            state = next;
        }
    }

    #[test]
    fn merge_leaves_input_board_untouched(
        board in board(),
        kind in kind(),
        x in -3_i32..12,
        y in -3_i32..22,
    ) {
        let before = board.clone();
        let block = FallingBlock::new(Tetromino::new(kind), x, y);
        let merged = board.merged(&block);

        prop_assert_eq!(&board, &before);
        let covered: Vec<_> = block.occupied_positions().collect();
        for (row, cells) in merged.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let pos = (i32::try_from(col).unwrap(), i32::try_from(row).unwrap());
                if covered.contains(&pos) {
                    prop_assert_eq!(*cell, Cell::Filled(kind.color()));
                } else {
                    prop_assert_eq!(Some(*cell), board.cell(col, row));
                }
            }
        }
    }

    #[test]
    fn clearing_rows_keeps_height_and_order(board in board()) {
        let clear = board.cleared_rows();
        let full = board.rows().filter(|row| row.iter().all(|c| c.is_filled())).count();
        let kept: Vec<_> = board
            .rows()
            .filter(|row| !row.iter().all(|c| c.is_filled()))
            .cloned()
            .collect();

        prop_assert_eq!(clear.cleared, full);
        prop_assert_eq!(clear.board.rows().len(), BOARD_HEIGHT);
        let rows: Vec<_> = clear.board.rows().cloned().collect();
        prop_assert!(rows[..full].iter().all(|row| row.iter().all(|c| c.is_empty())));
        prop_assert_eq!(&rows[full..], &kept[..]);
    }

    #[test]
    fn rejected_moves_are_idempotent(
        seed in any::<u64>(),
        warmup in prop::collection::vec(action(), 0..40),
        action in prop::sample::select(vec![Action::Left, Action::Right, Action::Rotate]),
    ) {
        let mut state = GameState::with_seed(PieceSeed::from(u128::from(seed)));
        for a in warmup {
            state = state.update(a);
        }
        let once = state.update(action);
        if once.current() == state.current() {
            prop_assert_eq!(&once, &state);
            prop_assert_eq!(&once.update(action), &once);
        }
    }
}
