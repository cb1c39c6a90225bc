//! Connect4 game engine - board rules and the turn FSM.
//!
//! This module provides:
//! - A fixed 7x8 board with gravity drops and four-in-a-row detection
//! - Player registration (two players, marks assigned in order)
//! - A type-safe state machine for turns, wins and draws

pub mod board;
pub mod constants;
pub mod entities;
pub mod state_machine;
pub mod states;

pub use state_machine::{
    Connect4State, Game, GameData, GameEngine, GameError, GameStateManagement, PlayerRegistry,
};
