//! Console input: turning what a human types into a column.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use connect4::{COLS, entities::Mark, player::ColumnSource};
use std::{
    fmt,
    io::{self, BufRead, Write},
};

/// Errors that can occur while parsing a column choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was typed.
    Empty,
    /// Input is not a whole number.
    NotANumber(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Please enter a column number (1-{COLS})"),
            Self::NotANumber(value) => write!(
                f,
                "Invalid column '{}'. Must be a whole number between 1 and {}",
                value, COLS
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a 1-based column as typed on the console into the 0-based column
/// the server expects.
///
/// The range is not checked here; the game rejects columns it cannot play.
///
/// # Examples
///
/// ```
/// use c4_client::commands::{ParseError, parse_column};
///
/// assert_eq!(parse_column("1"), Ok(0));
/// assert_eq!(parse_column(" 8 "), Ok(7));
/// assert!(matches!(parse_column("left"), Err(ParseError::NotANumber(_))));
/// ```
pub fn parse_column(input: &str) -> Result<i64, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    trimmed
        .parse::<i64>()
        .map(|column| column.saturating_sub(1))
        .map_err(|_| ParseError::NotANumber(trimmed.to_string()))
}

/// Prompts on stdout and reads columns from stdin, asking again until the
/// input parses.
#[derive(Debug, Default)]
pub struct ConsoleColumns;

impl ConsoleColumns {
    fn prompt(mark: Mark) -> Result<i64> {
        let stdin = io::stdin();
        loop {
            print!("Player {mark}, choose a column (1-{COLS}): ");
            io::stdout().flush()?;

            let mut input = String::new();
            if stdin.lock().read_line(&mut input)? == 0 {
                bail!("Input closed");
            }

            match parse_column(&input) {
                Ok(column) => return Ok(column),
                Err(e) => println!("{e}"),
            }
        }
    }
}

#[async_trait]
impl ColumnSource for ConsoleColumns {
    async fn next_column(&mut self, mark: Mark) -> Result<i64> {
        tokio::task::spawn_blocking(move || Self::prompt(mark))
            .await
            .context("Console input task failed")?
    }

    fn rejected(&mut self, column: i64, reason: &str) {
        println!("Column {} can't be played: {}", column.saturating_add(1), reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_and_last_column() {
        assert_eq!(parse_column("1"), Ok(0));
        assert_eq!(parse_column(&COLS.to_string()), Ok(COLS as i64 - 1));
    }

    #[test]
    fn test_parse_with_surrounding_whitespace() {
        assert_eq!(parse_column("  4 \n"), Ok(3));
    }

    #[test]
    fn test_out_of_range_numbers_pass_through() {
        assert_eq!(parse_column("0"), Ok(-1));
        assert_eq!(parse_column("9"), Ok(8));
        assert_eq!(parse_column("-3"), Ok(-4));
    }

    #[test]
    fn test_parse_empty_string() {
        assert_eq!(parse_column(""), Err(ParseError::Empty));
        assert_eq!(parse_column("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_not_a_number() {
        assert!(matches!(parse_column("abc"), Err(ParseError::NotANumber(_))));
        assert!(matches!(parse_column("2.5"), Err(ParseError::NotANumber(_))));
    }

    #[test]
    fn test_error_message_not_a_number() {
        let msg = ParseError::NotANumber("xyz".to_string()).to_string();
        assert!(msg.contains("xyz"));
        assert!(msg.contains("between 1 and"));
    }
}
