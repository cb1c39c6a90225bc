//! Sources of column choices for players that need a human (or a script)
//! to decide where to drop.

use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::VecDeque;

use crate::game::entities::Mark;

/// Supplies 0-based column choices. Values are not range-checked here; the
/// engine decides what is legal.
#[async_trait]
pub trait ColumnSource: Send + Sync {
    async fn next_column(&mut self, mark: Mark) -> Result<i64>;

    /// Called when the engine refused the last column.
    fn rejected(&mut self, _column: i64, _reason: &str) {}
}

/// Replays a fixed list of columns, then fails.
#[derive(Debug, Clone, Default)]
pub struct ScriptedColumns {
    columns: VecDeque<i64>,
    rejections: Vec<(i64, String)>,
}

impl ScriptedColumns {
    pub fn new<I: IntoIterator<Item = i64>>(columns: I) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            rejections: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.columns.len()
    }

    /// Columns the engine refused, with the reason.
    pub fn rejections(&self) -> &[(i64, String)] {
        &self.rejections
    }
}

#[async_trait]
impl ColumnSource for ScriptedColumns {
    async fn next_column(&mut self, mark: Mark) -> Result<i64> {
        match self.columns.pop_front() {
            Some(column) => Ok(column),
            None => bail!("No scripted columns left for {}", mark),
        }
    }

    fn rejected(&mut self, column: i64, reason: &str) {
        self.rejections.push((column, reason.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_columns_replay_in_order() {
        let mut columns = ScriptedColumns::new([3, 1]);
        assert_eq!(columns.next_column(Mark::X).await.unwrap(), 3);
        assert_eq!(columns.next_column(Mark::X).await.unwrap(), 1);
        assert!(columns.next_column(Mark::X).await.is_err());
    }

    #[test]
    fn test_rejections_are_recorded() {
        let mut columns = ScriptedColumns::new([]);
        columns.rejected(9, "column 9 is out of range");
        assert_eq!(columns.rejections().len(), 1);
        assert_eq!(columns.rejections()[0].0, 9);
    }
}
