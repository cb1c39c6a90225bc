//! A player living in the same process as the game service.

use anyhow::{Result, bail};
use async_trait::async_trait;

use super::{Player, columns::ColumnSource};
use crate::{
    game::{
        GameError,
        entities::{GameStatus, Mark, PlayerId},
    },
    service::{GameHandle, ServiceError},
};

/// Plays through a [`GameHandle`] directly, taking columns from a
/// [`ColumnSource`].
pub struct LocalPlayer<C> {
    id: PlayerId,
    mark: Option<Mark>,
    handle: GameHandle,
    columns: C,
}

impl<C: ColumnSource> LocalPlayer<C> {
    pub fn new(id: PlayerId, handle: GameHandle, columns: C) -> Self {
        Self {
            id,
            mark: None,
            handle,
            columns,
        }
    }

    pub fn columns(&self) -> &C {
        &self.columns
    }
}

#[async_trait]
impl<C: ColumnSource> Player for LocalPlayer<C> {
    fn id(&self) -> &PlayerId {
        &self.id
    }

    fn mark(&self) -> Option<Mark> {
        self.mark
    }

    async fn register(&mut self) -> Result<Mark> {
        let mark = self.handle.register(self.id.clone()).await?;
        self.mark = Some(mark);
        Ok(mark)
    }

    async fn status(&self) -> Result<GameStatus> {
        Ok(self.handle.status())
    }

    async fn visualize(&self) -> Result<()> {
        println!("{}\n", self.handle.board());
        Ok(())
    }

    async fn submit_move(&mut self) -> Result<usize> {
        let Some(mark) = self.mark else {
            bail!("{} has not registered yet", self.id);
        };

        loop {
            let column = self.columns.next_column(mark).await?;
            match self.handle.take_turn(&self.id, column).await {
                Ok(turn) => return Ok(turn.column),
                Err(ServiceError::Game(
                    error @ (GameError::InvalidColumn { .. } | GameError::ColumnFull { .. }),
                )) => {
                    log::debug!("{} picked an unplayable column {}: {}", self.id, column, error);
                    self.columns.rejected(column, &error.to_string());
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    async fn celebrate(&self) {
        if let Some(mark) = self.mark {
            println!("Player {} ({}) wins!", self.id, mark);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        GameActor, GameConfig,
        player::columns::ScriptedColumns,
    };

    async fn two_players(
        alice_columns: Vec<i64>,
    ) -> (LocalPlayer<ScriptedColumns>, LocalPlayer<ScriptedColumns>) {
        let handle = GameActor::spawn(&GameConfig::default());
        let mut alice = LocalPlayer::new(
            PlayerId::new("alice"),
            handle.clone(),
            ScriptedColumns::new(alice_columns),
        );
        let mut bob = LocalPlayer::new(PlayerId::new("bob"), handle, ScriptedColumns::new([]));
        alice.register().await.unwrap();
        bob.register().await.unwrap();
        (alice, bob)
    }

    #[tokio::test]
    async fn test_register_remembers_mark() {
        let (alice, bob) = two_players(vec![]).await;
        assert_eq!(alice.mark(), Some(Mark::X));
        assert_eq!(bob.mark(), Some(Mark::O));
    }

    #[tokio::test]
    async fn test_submit_move_retries_unplayable_columns() {
        let (mut alice, _bob) = two_players(vec![-1, 8, 2]).await;

        assert_eq!(alice.submit_move().await.unwrap(), 2);
        assert_eq!(alice.columns().rejections().len(), 2);
        assert_eq!(alice.columns().remaining(), 0);
        assert_eq!(alice.status().await.unwrap().turn_number, 1);
    }

    #[tokio::test]
    async fn test_submit_move_stops_on_wrong_turn() {
        let (_alice, mut bob) = two_players(vec![]).await;
        bob.columns = ScriptedColumns::new([0]);

        let error = bob.submit_move().await.unwrap_err();
        let error = error.downcast::<ServiceError>().unwrap();
        assert_eq!(error, ServiceError::Game(GameError::NotYourTurn));
    }

    #[tokio::test]
    async fn test_submit_move_requires_registration() {
        let handle = GameActor::spawn(&GameConfig::default());
        let mut carol = LocalPlayer::new(PlayerId::new("carol"), handle, ScriptedColumns::new([0]));
        assert!(carol.submit_move().await.is_err());
    }
}
