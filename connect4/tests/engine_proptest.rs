/// Property-based tests for the engine's move and registration rules.
///
/// Random move sequences are played by either the active player or their
/// opponent, into legal and illegal columns alike.
use connect4::{
    COLS, GameEngine, GameError, ROWS,
    entities::{Mark, Outcome, PlayerId},
};
use proptest::prelude::*;

fn playing_engine() -> (GameEngine, PlayerId, PlayerId) {
    let mut engine = GameEngine::new();
    let alice = PlayerId::new("alice");
    let bob = PlayerId::new("bob");
    engine.register(alice.clone()).unwrap();
    engine.register(bob.clone()).unwrap();
    (engine, alice, bob)
}

// (played by the active player?, column) with some columns out of range
fn move_strategy() -> impl Strategy<Value = (bool, i64)> {
    (prop::bool::weighted(0.8), -2i64..(COLS as i64 + 2))
}

fn moves_strategy() -> impl Strategy<Value = Vec<(bool, i64)>> {
    prop::collection::vec(move_strategy(), 0..120)
}

proptest! {
    #[test]
    fn test_turn_number_only_counts_accepted_moves(moves in moves_strategy()) {
        let (mut engine, alice, bob) = playing_engine();

        for (by_active, column) in moves {
            let before = engine.status();
            let board_before = engine.board();
            let active = before.active_player.clone().unwrap();
            let mover = match (by_active, active == alice) {
                (true, _) => active.clone(),
                (false, true) => bob.clone(),
                (false, false) => alice.clone(),
            };

            match engine.take_turn(&mover, column) {
                Ok(turn) => {
                    let after = engine.status();
                    prop_assert_eq!(after.turn_number, before.turn_number + 1);
                    prop_assert_eq!(turn.turn_number, after.turn_number);
                    prop_assert_eq!(Some(turn.mark), engine.mark_of(&mover));
                    prop_assert!(after.winner.is_none() || after.winner == Some(turn.mark));

                    if turn.outcome.is_none() {
                        prop_assert_ne!(after.active_player.as_ref(), Some(&mover));
                    }
                }
                Err(_) => {
                    prop_assert_eq!(engine.status(), before);
                    prop_assert_eq!(engine.board(), board_before);
                }
            }
        }
    }

    #[test]
    fn test_rejected_moves_leave_board_untouched(column in prop_oneof![-100i64..0, (COLS as i64)..100]) {
        let (mut engine, alice, _) = playing_engine();
        let board = engine.board();

        prop_assert_eq!(
            engine.take_turn(&alice, column),
            Err(GameError::InvalidColumn { column })
        );
        prop_assert_eq!(engine.board(), board);
        prop_assert_eq!(engine.status().turn_number, 0);
    }

    #[test]
    fn test_column_accepts_exactly_rows_moves(column in 0..COLS) {
        let (mut engine, alice, bob) = playing_engine();
        let players = [alice, bob];

        // Alternating marks in one column never connect four.
        for i in 0..ROWS {
            let turn = engine.take_turn(&players[i % 2], column as i64).unwrap();
            prop_assert_eq!(turn.row, ROWS - 1 - i);
        }

        let next = &players[ROWS % 2];
        prop_assert_eq!(
            engine.take_turn(next, column as i64),
            Err(GameError::ColumnFull { column })
        );
    }

    #[test]
    fn test_third_registration_always_fails(moves in moves_strategy(), name in "[a-z]{1,12}") {
        let (mut engine, alice, bob) = playing_engine();

        for (by_active, column) in moves {
            let active = engine.status().active_player.unwrap();
            let mover = if by_active || active == bob { active } else { bob.clone() };
            let _ = engine.take_turn(&mover, column);
        }

        let result = engine.register(PlayerId::new(&name));
        prop_assert!(result.unwrap_err().is_registration_conflict());
        prop_assert_eq!(engine.mark_of(&alice), Some(Mark::X));
        prop_assert_eq!(engine.player_count(), 2);
    }

    #[test]
    fn test_finished_game_rejects_every_move(columns in prop::collection::vec(0..COLS as i64, 1..200)) {
        let (mut engine, _, _) = playing_engine();

        for column in columns {
            let active = engine.status().active_player.unwrap();
            let _ = engine.take_turn(&active, column);
            if engine.is_over() {
                break;
            }
        }

        if let Some(outcome) = engine.outcome() {
            let active = engine.status().active_player.unwrap();
            prop_assert_eq!(engine.take_turn(&active, 0), Err(GameError::GameOver));
            if outcome == Outcome::Draw {
                prop_assert!(engine.status().draw);
            }
        }
    }
}
