//! Game actor implementation with async message handling.

use super::{
    config::GameConfig,
    errors::{Result, ServiceError},
    messages::{GameMessage, GameSnapshot},
};
use crate::game::{
    GameEngine,
    entities::{BoardView, GameStatus, Mark, PlayerId, TurnOutcome},
};
use tokio::sync::{mpsc, oneshot, watch};

/// Game actor handle for submitting mutations and reading snapshots
#[derive(Clone)]
pub struct GameHandle {
    sender: mpsc::Sender<GameMessage>,
    snapshot: watch::Receiver<GameSnapshot>,
}

impl GameHandle {
    /// Send a message to the actor
    pub async fn send(&self, message: GameMessage) -> Result<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| ServiceError::Closed)
    }

    /// Register a player. Queued behind any mutation already in flight.
    pub async fn register(&self, player_id: PlayerId) -> Result<Mark> {
        let (response, rx) = oneshot::channel();
        self.send(GameMessage::Register {
            player_id,
            response,
        })
        .await?;
        Ok(rx.await.map_err(|_| ServiceError::Closed)??)
    }

    /// Drop the player's mark into `column`.
    pub async fn take_turn(&self, player_id: &PlayerId, column: i64) -> Result<TurnOutcome> {
        let (response, rx) = oneshot::channel();
        self.send(GameMessage::TakeTurn {
            player_id: player_id.clone(),
            column,
            response,
        })
        .await?;
        Ok(rx.await.map_err(|_| ServiceError::Closed)??)
    }

    /// Stop the actor. Later requests fail with [`ServiceError::Closed`];
    /// snapshots stay readable.
    pub async fn close(&self) -> Result<()> {
        let (response, rx) = oneshot::channel();
        self.send(GameMessage::Close { response }).await?;
        rx.await.map_err(|_| ServiceError::Closed)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn status(&self) -> GameStatus {
        self.snapshot.borrow().status.clone()
    }

    pub fn board(&self) -> BoardView {
        self.snapshot.borrow().board.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Game actor owning the only engine instance
pub struct GameActor {
    engine: GameEngine,

    /// Message inbox
    inbox: mpsc::Receiver<GameMessage>,

    /// Published after every accepted mutation
    snapshot: watch::Sender<GameSnapshot>,

    is_closed: bool,
}

impl GameActor {
    /// Create a new game actor
    ///
    /// # Returns
    ///
    /// * `(GameActor, GameHandle)` - Actor and handle for sending messages
    pub fn new(config: &GameConfig) -> (Self, GameHandle) {
        let (sender, inbox) = mpsc::channel(config.inbox_capacity.max(1));

        let engine = GameEngine::new();
        let (snapshot, snapshot_rx) = watch::channel(GameSnapshot {
            status: engine.status(),
            board: engine.board(),
        });

        let actor = Self {
            engine,
            inbox,
            snapshot,
            is_closed: false,
        };

        let handle = GameHandle {
            sender,
            snapshot: snapshot_rx,
        };

        (actor, handle)
    }

    /// Create an actor and run it on the current Tokio runtime.
    pub fn spawn(config: &GameConfig) -> GameHandle {
        let (actor, handle) = Self::new(config);
        tokio::spawn(actor.run());
        handle
    }

    /// Run the actor event loop until closed or every handle is dropped
    pub async fn run(mut self) {
        log::info!("Game actor starting");

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);

            if self.is_closed {
                break;
            }
        }

        log::info!("Game actor stopped");
    }

    fn handle_message(&mut self, message: GameMessage) {
        match message {
            GameMessage::Register {
                player_id,
                response,
            } => {
                let result = self.handle_register(player_id);
                let _ = response.send(result);
            }

            GameMessage::TakeTurn {
                player_id,
                column,
                response,
            } => {
                let result = self.handle_take_turn(&player_id, column);
                let _ = response.send(result);
            }

            GameMessage::Close { response } => {
                self.is_closed = true;
                self.inbox.close();
                let _ = response.send(());
            }
        }
    }

    fn handle_register(&mut self, player_id: PlayerId) -> std::result::Result<Mark, crate::GameError> {
        match self.engine.register(player_id.clone()) {
            Ok(mark) => {
                log::info!("Player {} registered as {}", player_id, mark);
                self.publish();
                Ok(mark)
            }
            Err(e) => {
                log::debug!("Registration of {} rejected: {}", player_id, e);
                Err(e)
            }
        }
    }

    fn handle_take_turn(
        &mut self,
        player_id: &PlayerId,
        column: i64,
    ) -> std::result::Result<TurnOutcome, crate::GameError> {
        match self.engine.take_turn(player_id, column) {
            Ok(turn) => {
                log::info!(
                    "Turn {}: {} dropped {} into column {} (row {})",
                    turn.turn_number,
                    player_id,
                    turn.mark,
                    turn.column,
                    turn.row
                );
                if let Some(outcome) = turn.outcome {
                    log::info!("Game over: {}", outcome);
                }
                self.publish();
                Ok(turn)
            }
            Err(e) => {
                log::debug!("Move by {} in column {} rejected: {}", player_id, column, e);
                Err(e)
            }
        }
    }

    /// Publish before answering so a caller that saw its request succeed
    /// reads its own write.
    fn publish(&self) {
        self.snapshot.send_replace(GameSnapshot {
            status: self.engine.status(),
            board: self.engine.board(),
        });
    }
}
