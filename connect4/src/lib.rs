//! # Connect4
//!
//! An authoritative Connect4 engine plus the plumbing needed to play it from
//! several front ends at once.
//!
//! The engine is a finite state machine with three phases, dispatched with
//! `enum_dispatch`:
//!
//! - **Lobby**: waiting for two players to register
//! - **TakeTurn**: the active player drops a mark
//! - **GameOver**: someone connected four, or the board filled up
//!
//! ## Core Modules
//!
//! - [`game`]: Board, entities and the game state machine
//! - [`service`]: Actor that serializes every mutation against one engine
//! - [`player`]: Front-end capability trait, local player and the polling coordinator
//! - [`wire`]: JSON payloads of the REST surface
//!
//! ## Example
//!
//! ```
//! use connect4::{GameEngine, entities::{Mark, PlayerId}};
//!
//! let mut engine = GameEngine::new();
//! let alice = PlayerId::new("alice");
//! assert_eq!(engine.register(alice.clone()), Ok(Mark::X));
//! assert_eq!(engine.register(PlayerId::new("bob")), Ok(Mark::O));
//! engine.take_turn(&alice, 3).unwrap();
//! assert_eq!(engine.status().turn_number, 1);
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    Connect4State, GameEngine, GameError, GameStateManagement,
    constants::{self, COLS, ROWS},
    entities,
};

/// Serialized access to a single engine instance.
pub mod service;
pub use service::{GameActor, GameConfig, GameHandle, GameSnapshot, ServiceError};

/// Player front ends and the coordinator loop that drives them.
pub mod player;
pub use player::{Coordinator, Player};

/// JSON payloads of the REST surface.
pub mod wire;
