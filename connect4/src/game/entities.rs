use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;

use super::{
    constants::{COLS, MAX_PLAYER_ID_LENGTH, MAX_PLAYERS, ROWS},
    state_machine::GameError,
};

/// Opaque identifier a player registers with. Unique per player for the
/// lifetime of one game. Ids are compared exactly as sent; the engine
/// refuses to register one that is not [`PlayerId::is_valid`].
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }

    /// Build an id, refusing the ones the engine would not register.
    pub fn parse(s: &str) -> Result<Self, GameError> {
        let id = Self::new(s);
        if id.is_valid() {
            Ok(id)
        } else {
            Err(GameError::InvalidPlayerId)
        }
    }

    /// Non-empty, at most [`MAX_PLAYER_ID_LENGTH`] bytes, and without
    /// leading or trailing whitespace.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.len() <= MAX_PLAYER_ID_LENGTH && self.0.trim() == self.0
    }

    /// A fresh random identifier, the way front ends name themselves.
    #[must_use]
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The symbol a registered player drops into the board. The first
/// registrant plays `X`, the second `O`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Marks in registration order.
    pub const ORDER: [Mark; 2] = [Mark::X, Mark::O];

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::X => 'X',
            Self::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single board cell. Serialized as a one-character string: `" "` for an
/// empty cell, otherwise the mark.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Mark),
}

impl Cell {
    pub fn mark(self) -> Option<Mark> {
        match self {
            Self::Empty => None,
            Self::Taken(mark) => Some(mark),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Taken(mark) => mark.as_char(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buf = [0u8; 4];
        serializer.serialize_str(self.as_char().encode_utf8(&mut buf))
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            " " | "" => Ok(Self::Empty),
            "X" => Ok(Self::Taken(Mark::X)),
            "O" => Ok(Self::Taken(Mark::O)),
            other => Err(de::Error::custom(format!("unknown cell value {other:?}"))),
        }
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Outcome {
    Winner(Mark),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner(mark) => write!(f, "{mark} wins"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// Read-only summary of whose turn it is and whether the game is over.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameStatus {
    pub active_player: Option<PlayerId>,
    pub active_icon: Option<Mark>,
    pub winner: Option<Mark>,
    #[serde(default)]
    pub draw: bool,
    pub turn_number: u32,
    #[serde(default)]
    pub registered_players: usize,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.draw
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match (self.winner, self.draw) {
            (Some(mark), _) => Some(Outcome::Winner(mark)),
            (None, true) => Some(Outcome::Draw),
            (None, false) => None,
        }
    }

    pub fn is_turn_of(&self, player_id: &PlayerId) -> bool {
        self.active_player.as_ref() == Some(player_id)
    }

    /// Both players have registered, so the active player can move.
    pub fn is_ready(&self) -> bool {
        self.registered_players >= MAX_PLAYERS
    }
}

/// Row-major snapshot of the board, `ROWS * COLS` cells long.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BoardView {
    cells: Vec<Cell>,
}

impl BoardView {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if col >= COLS {
            return None;
        }
        self.cells.get(row * COLS + col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(COLS)
    }
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new(vec![Cell::Empty; ROWS * COLS])
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", line.join(" | "))?;
        }
        let footer: Vec<String> = (1..=COLS).map(|c| c.to_string()).collect();
        write!(f, "{}", footer.join("   "))
    }
}

/// Where an accepted move landed and what it did to the game.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TurnOutcome {
    pub row: usize,
    pub column: usize,
    pub mark: Mark,
    pub turn_number: u32,
    pub outcome: Option<Outcome>,
}
