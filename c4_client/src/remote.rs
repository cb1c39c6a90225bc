//! A player taking part over HTTP.

use anyhow::{Result, bail};
use async_trait::async_trait;
use connect4::{
    Player,
    entities::{GameStatus, Mark, PlayerId},
    player::ColumnSource,
};

use crate::api_client::{ApiClient, RequestRejected};

/// Plays against a remote server through an [`ApiClient`].
pub struct RemotePlayer<C> {
    id: PlayerId,
    mark: Option<Mark>,
    api: ApiClient,
    columns: C,
}

impl<C: ColumnSource> RemotePlayer<C> {
    pub fn new(id: PlayerId, api: ApiClient, columns: C) -> Self {
        Self {
            id,
            mark: None,
            api,
            columns,
        }
    }

    pub fn columns(&self) -> &C {
        &self.columns
    }
}

#[async_trait]
impl<C: ColumnSource> Player for RemotePlayer<C> {
    fn id(&self) -> &PlayerId {
        &self.id
    }

    fn mark(&self) -> Option<Mark> {
        self.mark
    }

    async fn register(&mut self) -> Result<Mark> {
        let mark = self.api.register(&self.id).await?;
        self.mark = Some(mark);
        Ok(mark)
    }

    async fn status(&self) -> Result<GameStatus> {
        self.api.status().await
    }

    async fn visualize(&self) -> Result<()> {
        let board = self.api.board().await?;
        println!("{board}\n");
        Ok(())
    }

    async fn submit_move(&mut self) -> Result<usize> {
        let Some(mark) = self.mark else {
            bail!("{} has not registered yet", self.id);
        };

        loop {
            let column = self.columns.next_column(mark).await?;
            match self.api.check_move(&self.id, column).await {
                Ok(()) => return Ok(usize::try_from(column)?),
                Err(e) => {
                    let reason = e
                        .downcast_ref::<RequestRejected>()
                        .filter(|rejected| rejected.is_unplayable_column())
                        .map(|rejected| rejected.error.clone());
                    let Some(reason) = reason else {
                        return Err(e);
                    };
                    log::debug!("Column {} rejected: {}", column, reason);
                    self.columns.rejected(column, &reason);
                }
            }
        }
    }

    async fn celebrate(&self) {
        if let Some(mark) = self.mark {
            println!("You ({mark}) won! Congratulations!");
        }
    }
}
