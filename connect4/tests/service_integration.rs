/// Integration tests for serialized access through the game service.
///
/// These drive one actor from many tasks at once and check that moves never
/// interleave and readers only ever see whole snapshots.
use connect4::{
    COLS, GameActor, GameConfig, GameError, ROWS, ServiceError,
    entities::{Cell, Mark, PlayerId},
    player::{Coordinator, LocalPlayer, ScriptedColumns},
};
use std::time::Duration;

async fn started_game() -> (connect4::GameHandle, PlayerId, PlayerId) {
    let handle = GameActor::spawn(&GameConfig::default());
    let alice = PlayerId::new("alice");
    let bob = PlayerId::new("bob");
    handle.register(alice.clone()).await.unwrap();
    handle.register(bob.clone()).await.unwrap();
    (handle, alice, bob)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_moves_in_same_column() {
    for _ in 0..50 {
        let (handle, alice, _) = started_game().await;

        let first = {
            let handle = handle.clone();
            let alice = alice.clone();
            tokio::spawn(async move { handle.take_turn(&alice, 4).await })
        };
        let second = {
            let handle = handle.clone();
            let alice = alice.clone();
            tokio::spawn(async move { handle.take_turn(&alice, 4).await })
        };

        let results = [first.await.unwrap(), second.await.unwrap()];
        let accepted = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(accepted, 1);
        assert!(results.iter().any(|r| matches!(
            r,
            Err(ServiceError::Game(GameError::NotYourTurn | GameError::ColumnFull { .. }))
        )));

        let board = handle.board();
        assert_eq!(board.get(ROWS - 1, 4), Some(Cell::Taken(Mark::X)));
        assert_eq!(board.get(ROWS - 2, 4), Some(Cell::Empty));
        assert_eq!(handle.status().turn_number, 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_admit_two() {
    let handle = GameActor::spawn(&GameConfig::default());

    let tasks: Vec<_> = (0..10)
        .map(|i| {
            let handle = handle.clone();
            tokio::spawn(async move { handle.register(PlayerId::new(&format!("p{i}"))).await })
        })
        .collect();

    let mut marks = Vec::new();
    for task in tasks {
        match task.await.unwrap() {
            Ok(mark) => marks.push(mark),
            Err(ServiceError::Game(error)) => assert!(error.is_registration_conflict()),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    marks.sort_by_key(|m| *m == Mark::O);
    assert_eq!(marks, vec![Mark::X, Mark::O]);
    assert!(handle.status().is_ready());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_see_whole_snapshots() {
    let (handle, alice, bob) = started_game().await;

    let reader = {
        let handle = handle.clone();
        tokio::spawn(async move {
            for _ in 0..2_000 {
                let snapshot = handle.snapshot();
                let placed = snapshot
                    .board
                    .cells()
                    .iter()
                    .filter(|c| !c.is_empty())
                    .count();
                assert_eq!(placed, snapshot.status.turn_number as usize);
                tokio::task::yield_now().await;
            }
        })
    };

    let players = [alice, bob];
    for i in 0..ROWS * COLS {
        let status = handle.status();
        if status.is_over() {
            break;
        }
        let mover = &players[status.turn_number as usize % 2];
        let _ = handle.take_turn(mover, (i % COLS) as i64).await;
    }

    reader.await.unwrap();
}

#[tokio::test]
async fn test_two_coordinators_play_to_completion() {
    let handle = GameActor::spawn(&GameConfig::default());
    let coordinator = Coordinator::new(Duration::from_millis(5));

    let mut alice = LocalPlayer::new(
        PlayerId::new("alice"),
        handle.clone(),
        ScriptedColumns::new([3, 3, 3, 3]),
    );
    let mut bob = LocalPlayer::new(
        PlayerId::new("bob"),
        handle.clone(),
        ScriptedColumns::new([0, 0, 0]),
    );

    let alice_task = tokio::spawn(async move { coordinator.run(&mut alice).await });

    // Alice has to hold X before Bob joins.
    while handle.status().registered_players < 1 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    let bob_task = tokio::spawn(async move { coordinator.run(&mut bob).await });

    let alice_status = alice_task.await.unwrap().unwrap();
    let bob_status = bob_task.await.unwrap().unwrap();

    assert_eq!(alice_status.winner, Some(Mark::X));
    assert_eq!(bob_status.winner, Some(Mark::X));
    assert_eq!(alice_status.turn_number, 7);

    let board = handle.board();
    for row in 3..ROWS {
        assert_eq!(board.get(row, 3), Some(Cell::Taken(Mark::X)));
    }
}
