/// Number of rows on the board. Row 0 is the top row.
pub const ROWS: usize = 7;

/// Number of columns on the board.
pub const COLS: usize = 8;

/// Marks in a row needed to win.
pub const CONNECT: usize = 4;

/// A game never has more than two registered players.
pub const MAX_PLAYERS: usize = 2;

/// Upper bound on player id length in bytes; longer ids are refused.
pub const MAX_PLAYER_ID_LENGTH: usize = 64;
