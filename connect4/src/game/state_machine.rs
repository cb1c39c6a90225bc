//! Connect4 game state machine.
//!
//! The game moves through three phases: [`Lobby`] until two players have
//! registered, [`TakeTurn`] while marks are being dropped, and [`GameOver`]
//! once someone connects four or the board fills up. Transitions consume
//! the current phase and hand back the next one, so a phase can only be
//! reached through a legal registration or move.

use enum_dispatch::enum_dispatch;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    board::Board,
    constants::{COLS, MAX_PLAYERS},
    entities::{BoardView, GameStatus, Mark, Outcome, PlayerId, TurnOutcome},
    states::{GameOver, Lobby, TakeTurn},
};

/// Errors returned by registration and moves. None of them change the game.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("player already registered")]
    PlayerAlreadyRegistered,
    #[error("game already has two players")]
    GameFull,
    #[error("player id must be 1 to 64 bytes without surrounding whitespace")]
    InvalidPlayerId,
    #[error("not your turn")]
    NotYourTurn,
    #[error("column {column} is out of range")]
    InvalidColumn { column: i64 },
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    #[error("game is already over")]
    GameOver,
    #[error("waiting for an opponent to register")]
    WaitingForOpponent,
}

impl GameError {
    /// Stable, client-visible error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PlayerAlreadyRegistered => "player_already_registered",
            Self::GameFull => "game_full",
            Self::InvalidPlayerId => "invalid_player_id",
            Self::NotYourTurn => "not_your_turn",
            Self::InvalidColumn { .. } => "invalid_column",
            Self::ColumnFull { .. } => "column_full",
            Self::GameOver => "game_over",
            Self::WaitingForOpponent => "waiting_for_opponent",
        }
    }

    /// Duplicate ids and a full game are both registration conflicts.
    pub fn is_registration_conflict(&self) -> bool {
        matches!(self, Self::PlayerAlreadyRegistered | Self::GameFull)
    }
}

/// Registered players in registration order.
#[derive(Clone, Debug, Default)]
pub struct PlayerRegistry {
    players: Vec<(PlayerId, Mark)>,
}

impl PlayerRegistry {
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.players.iter().any(|(id, _)| id == player_id)
    }

    pub fn mark_of(&self, player_id: &PlayerId) -> Option<Mark> {
        self.players
            .iter()
            .find(|(id, _)| id == player_id)
            .map(|&(_, mark)| mark)
    }

    /// The other registered player, if there is one.
    pub fn opponent_of(&self, player_id: &PlayerId) -> Option<&PlayerId> {
        self.players
            .iter()
            .map(|(id, _)| id)
            .find(|&id| id != player_id)
    }

    fn insert(&mut self, player_id: PlayerId) -> Result<Mark, GameError> {
        if !player_id.is_valid() {
            return Err(GameError::InvalidPlayerId);
        }
        if self.contains(&player_id) {
            return Err(GameError::PlayerAlreadyRegistered);
        }
        let mark = *Mark::ORDER
            .get(self.players.len())
            .ok_or(GameError::GameFull)?;
        self.players.push((player_id, mark));
        Ok(mark)
    }
}

/// Mutable game data shared across all phases.
#[derive(Debug, Default)]
pub struct GameData {
    pub board: Board,
    pub registry: PlayerRegistry,
    /// Only this player may move. Frozen once the game is over.
    pub active_player: Option<PlayerId>,
    /// Accepted moves so far.
    pub turn_number: u32,
}

/// A Connect4 game with data shared by every phase and the phase itself.
#[derive(Debug)]
pub struct Game<T> {
    pub data: GameData,
    pub state: T,
}

/// Per-phase answer to "has this game ended, and how".
pub trait PhaseOutcome {
    fn outcome(&self) -> Option<Outcome>;
}

impl PhaseOutcome for Lobby {
    fn outcome(&self) -> Option<Outcome> {
        None
    }
}

impl PhaseOutcome for TakeTurn {
    fn outcome(&self) -> Option<Outcome> {
        None
    }
}

impl PhaseOutcome for GameOver {
    fn outcome(&self) -> Option<Outcome> {
        Some(self.outcome)
    }
}

/// Read-only queries available in every phase.
#[enum_dispatch]
pub trait GameStateManagement {
    #[must_use]
    fn status(&self) -> GameStatus;

    #[must_use]
    fn board_view(&self) -> BoardView;

    fn mark_of(&self, player_id: &PlayerId) -> Option<Mark>;

    fn player_count(&self) -> usize;

    fn outcome(&self) -> Option<Outcome>;
}

impl<T: PhaseOutcome> GameStateManagement for Game<T> {
    fn status(&self) -> GameStatus {
        let active_icon = self
            .data
            .active_player
            .as_ref()
            .and_then(|id| self.data.registry.mark_of(id));
        let outcome = self.state.outcome();
        GameStatus {
            active_player: self.data.active_player.clone(),
            active_icon,
            winner: match outcome {
                Some(Outcome::Winner(mark)) => Some(mark),
                _ => None,
            },
            draw: outcome == Some(Outcome::Draw),
            turn_number: self.data.turn_number,
            registered_players: self.data.registry.len(),
        }
    }

    fn board_view(&self) -> BoardView {
        self.data.board.view()
    }

    fn mark_of(&self, player_id: &PlayerId) -> Option<Mark> {
        self.data.registry.mark_of(player_id)
    }

    fn player_count(&self) -> usize {
        self.data.registry.len()
    }

    fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }
}

impl<T> Game<T> {
    /// Move checks shared by the playable phases, in order: turn ownership,
    /// column range, column capacity. Returns the column as an index.
    fn check_move(&self, player_id: &PlayerId, column: i64) -> Result<usize, GameError> {
        if self.data.active_player.as_ref() != Some(player_id) {
            return Err(GameError::NotYourTurn);
        }
        let col = usize::try_from(column)
            .ok()
            .filter(|&c| c < COLS)
            .ok_or(GameError::InvalidColumn { column })?;
        if self.data.board.is_column_full(col) {
            return Err(GameError::ColumnFull { column: col });
        }
        Ok(col)
    }
}

impl Default for Game<Lobby> {
    fn default() -> Self {
        Self {
            data: GameData::default(),
            state: Lobby::new(),
        }
    }
}

impl Game<Lobby> {
    fn register(mut self, player_id: PlayerId) -> (Connect4State, Result<Mark, GameError>) {
        let mark = match self.data.registry.insert(player_id.clone()) {
            Ok(mark) => mark,
            Err(error) => return (self.into(), Err(error)),
        };
        debug!("registered {player_id} as {mark}");

        if self.data.active_player.is_none() {
            self.data.active_player = Some(player_id);
            self.data.turn_number = 0;
        }

        if self.data.registry.is_full() {
            let game = Game {
                data: self.data,
                state: TakeTurn {},
            };
            (game.into(), Ok(mark))
        } else {
            (self.into(), Ok(mark))
        }
    }

    fn take_turn(
        self,
        player_id: &PlayerId,
        column: i64,
    ) -> (Connect4State, Result<TurnOutcome, GameError>) {
        let result = self
            .check_move(player_id, column)
            .and(Err(GameError::WaitingForOpponent));
        (self.into(), result)
    }
}

impl Game<TakeTurn> {
    fn take_turn(
        mut self,
        player_id: &PlayerId,
        column: i64,
    ) -> (Connect4State, Result<TurnOutcome, GameError>) {
        let col = match self.check_move(player_id, column) {
            Ok(col) => col,
            Err(error) => return (self.into(), Err(error)),
        };
        let Some(mark) = self.data.registry.mark_of(player_id) else {
            return (self.into(), Err(GameError::NotYourTurn));
        };
        let Some(row) = self.data.board.drop_mark(col, mark) else {
            return (self.into(), Err(GameError::ColumnFull { column: col }));
        };
        self.data.turn_number += 1;

        let outcome = match self.data.board.winner() {
            Some(winner) => Some(Outcome::Winner(winner)),
            None if self.data.board.is_full() => Some(Outcome::Draw),
            None => None,
        };
        let turn = TurnOutcome {
            row,
            column: col,
            mark,
            turn_number: self.data.turn_number,
            outcome,
        };

        match outcome {
            Some(outcome) => {
                debug!("game over after turn {}: {outcome}", turn.turn_number);
                let game = Game {
                    data: self.data,
                    state: GameOver { outcome },
                };
                (game.into(), Ok(turn))
            }
            None => {
                self.data.active_player = self.data.registry.opponent_of(player_id).cloned();
                (self.into(), Ok(turn))
            }
        }
    }
}

/// The game in whichever phase it is currently in.
#[enum_dispatch(GameStateManagement)]
#[derive(Debug)]
pub enum Connect4State {
    Lobby(Game<Lobby>),
    TakeTurn(Game<TakeTurn>),
    GameOver(Game<GameOver>),
}

impl Default for Connect4State {
    fn default() -> Self {
        Self::new()
    }
}

impl Connect4State {
    #[must_use]
    pub fn new() -> Self {
        Self::Lobby(Game::default())
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Self::GameOver(_))
    }

    /// Registers a player and hands back the next phase along with the
    /// assigned mark.
    pub fn register(self, player_id: PlayerId) -> (Self, Result<Mark, GameError>) {
        match self {
            Self::Lobby(game) => game.register(player_id),
            other => (other, Err(GameError::GameFull)),
        }
    }

    /// Drops the player's mark into `column` and hands back the next phase.
    ///
    /// `column` is signed so that negative input from the wire is reported
    /// as [`GameError::InvalidColumn`] in the usual check order.
    pub fn take_turn(
        self,
        player_id: &PlayerId,
        column: i64,
    ) -> (Self, Result<TurnOutcome, GameError>) {
        match self {
            Self::Lobby(game) => game.take_turn(player_id, column),
            Self::TakeTurn(game) => game.take_turn(player_id, column),
            over @ Self::GameOver(_) => (over, Err(GameError::GameOver)),
        }
    }
}

/// Owns the game state and exposes the engine operations on `&mut self`.
#[derive(Debug, Default)]
pub struct GameEngine {
    state: Connect4State,
}

impl GameEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, player_id: PlayerId) -> Result<Mark, GameError> {
        let state = std::mem::take(&mut self.state);
        let (state, result) = state.register(player_id);
        self.state = state;
        result
    }

    pub fn take_turn(&mut self, player_id: &PlayerId, column: i64) -> Result<TurnOutcome, GameError> {
        let state = std::mem::take(&mut self.state);
        let (state, result) = state.take_turn(player_id, column);
        self.state = state;
        result
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn board(&self) -> BoardView {
        self.state.board_view()
    }

    pub fn mark_of(&self, player_id: &PlayerId) -> Option<Mark> {
        self.state.mark_of(player_id)
    }

    pub fn player_count(&self) -> usize {
        self.state.player_count()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn state(&self) -> &Connect4State {
        &self.state
    }
}
