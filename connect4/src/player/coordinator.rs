//! The polling loop that turns a [`Player`] into a participant.

use anyhow::{Context, Result, bail};
use std::time::Duration;

use super::Player;
use crate::game::entities::{GameStatus, Outcome};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Consecutive failed status polls tolerated before giving up.
pub const DEFAULT_MAX_POLL_FAILURES: u32 = 3;

#[derive(Clone, Copy, Debug)]
pub struct Coordinator {
    pub poll_interval: Duration,
    pub max_poll_failures: u32,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_poll_failures: DEFAULT_MAX_POLL_FAILURES,
        }
    }
}

impl Coordinator {
    #[must_use]
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            ..Default::default()
        }
    }

    /// Register `player` and play until the game ends. Returns the final
    /// status.
    pub async fn run(&self, player: &mut dyn Player) -> Result<GameStatus> {
        let mark = player
            .register()
            .await
            .with_context(|| format!("registering {}", player.id()))?;
        log::info!("Registered {} as {}", player.id(), mark);

        let mut failures = 0;
        loop {
            let status = match player.status().await {
                Ok(status) => {
                    failures = 0;
                    status
                }
                Err(error) => {
                    failures += 1;
                    if failures > self.max_poll_failures {
                        return Err(error.context(format!(
                            "status unavailable after {failures} attempts"
                        )));
                    }
                    log::warn!("Status poll failed ({failures}): {error:#}");
                    tokio::time::sleep(self.poll_interval).await;
                    continue;
                }
            };

            if let Some(outcome) = status.outcome() {
                player.visualize().await?;
                match outcome {
                    Outcome::Winner(winner) if Some(winner) == player.mark() => {
                        player.celebrate().await;
                    }
                    Outcome::Winner(winner) => println!("Player {winner} won. Better luck next time."),
                    Outcome::Draw => println!("The board is full. It's a draw."),
                }
                return Ok(status);
            }

            if status.is_ready() && status.is_turn_of(player.id()) {
                player.visualize().await?;
                let column = player.submit_move().await?;
                log::debug!("{} played column {}", player.id(), column);
            } else {
                tokio::time::sleep(self.poll_interval).await;
            }
        }
    }

    /// Two players sharing one process and one screen. Registers `first`
    /// then `second` and alternates between them until the game ends.
    pub async fn run_hot_seat<'a>(
        &self,
        first: &'a mut dyn Player,
        second: &'a mut dyn Player,
    ) -> Result<GameStatus> {
        for player in [&mut *first, &mut *second] {
            let mark = player
                .register()
                .await
                .with_context(|| format!("registering {}", player.id()))?;
            log::info!("Registered {} as {}", player.id(), mark);
        }

        loop {
            let status = first.status().await?;

            if let Some(outcome) = status.outcome() {
                first.visualize().await?;
                match outcome {
                    Outcome::Winner(winner) if Some(winner) == first.mark() => {
                        first.celebrate().await;
                    }
                    Outcome::Winner(_) => second.celebrate().await,
                    Outcome::Draw => println!("The board is full. It's a draw."),
                }
                return Ok(status);
            }

            let active = if status.is_turn_of(first.id()) {
                &mut *first
            } else if status.is_turn_of(second.id()) {
                &mut *second
            } else {
                bail!("Neither {} nor {} is active", first.id(), second.id());
            };

            active.visualize().await?;
            active.submit_move().await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        GameActor, GameConfig,
        game::entities::{Mark, PlayerId},
        player::{LocalPlayer, ScriptedColumns},
    };
    use async_trait::async_trait;

    #[tokio::test]
    async fn test_hot_seat_vertical_win() {
        let handle = GameActor::spawn(&GameConfig::default());
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

        let status = Coordinator::new(Duration::from_millis(1))
            .run_hot_seat(&mut alice, &mut bob)
            .await
            .unwrap();

        assert_eq!(status.winner, Some(Mark::X));
        assert_eq!(status.turn_number, 7);
        assert_eq!(alice.columns().remaining(), 0);
    }

    #[tokio::test]
    async fn test_hot_seat_second_player_wins() {
        let handle = GameActor::spawn(&GameConfig::default());
        let mut alice = LocalPlayer::new(
            PlayerId::new("alice"),
            handle.clone(),
            ScriptedColumns::new([0, 1, 0, 1]),
        );
        let mut bob = LocalPlayer::new(
            PlayerId::new("bob"),
            handle.clone(),
            ScriptedColumns::new([3, 3, 3, 3]),
        );

        let status = Coordinator::new(Duration::from_millis(1))
            .run_hot_seat(&mut alice, &mut bob)
            .await
            .unwrap();

        assert_eq!(status.winner, Some(Mark::O));
        assert_eq!(status.turn_number, 8);
        assert_eq!(bob.columns().remaining(), 0);
    }

    /// Fails every status poll.
    struct Unreachable {
        id: PlayerId,
        moves: u32,
    }

    #[async_trait]
    impl Player for Unreachable {
        fn id(&self) -> &PlayerId {
            &self.id
        }

        fn mark(&self) -> Option<Mark> {
            Some(Mark::X)
        }

        async fn register(&mut self) -> Result<Mark> {
            Ok(Mark::X)
        }

        async fn status(&self) -> Result<GameStatus> {
            bail!("connection refused")
        }

        async fn visualize(&self) -> Result<()> {
            Ok(())
        }

        async fn submit_move(&mut self) -> Result<usize> {
            self.moves += 1;
            Ok(0)
        }

        async fn celebrate(&self) {}
    }

    #[tokio::test]
    async fn test_run_gives_up_after_repeated_poll_failures() {
        let mut player = Unreachable {
            id: PlayerId::new("ghost"),
            moves: 0,
        };
        let coordinator = Coordinator {
            poll_interval: Duration::from_millis(1),
            max_poll_failures: 2,
        };

        let error = coordinator.run(&mut player).await.unwrap_err();
        assert!(error.to_string().contains("after 3 attempts"));
        assert_eq!(player.moves, 0);
    }
}
