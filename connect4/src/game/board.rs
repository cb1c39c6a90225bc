//! The fixed-size grid and its rules: gravity drops and four-in-a-row.

use super::{
    constants::{COLS, CONNECT, ROWS},
    entities::{BoardView, Cell, Mark},
};

/// Direction vectors checked from every occupied cell:
/// horizontal, vertical, diagonal and anti-diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Row 0 is the top of the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// A column is full once its top cell is taken. Out-of-range columns
    /// count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.get(0, col).is_none_or(|cell| !cell.is_empty())
    }

    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Lowest empty row in `col`, scanning from the bottom row upward.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// Drops `mark` into `col` and returns the row it landed in, or `None`
    /// if the column is full or out of range. The board is untouched on
    /// `None`.
    pub fn drop_mark(&mut self, col: usize, mark: Mark) -> Option<usize> {
        let row = self.landing_row(col)?;
        self.cells[row][col] = Cell::Taken(mark);
        Some(row)
    }

    /// Scans every occupied cell for four matching marks in one of the
    /// four directions and returns the first winning mark found.
    pub fn winner(&self) -> Option<Mark> {
        for row in 0..ROWS {
            for col in 0..COLS {
                let Some(mark) = self.cells[row][col].mark() else {
                    continue;
                };
                if DIRECTIONS
                    .iter()
                    .any(|&(dr, dc)| self.connects(row, col, dr, dc, mark))
                {
                    return Some(mark);
                }
            }
        }
        None
    }

    fn connects(&self, row: usize, col: usize, dr: isize, dc: isize, mark: Mark) -> bool {
        (0..CONNECT as isize).all(|step| {
            let r = row as isize + step * dr;
            let c = col as isize + step * dc;
            r >= 0
                && c >= 0
                && self.get(r as usize, c as usize) == Some(Cell::Taken(mark))
        })
    }

    /// Row-major flattened snapshot.
    pub fn view(&self) -> BoardView {
        BoardView::new(self.cells.iter().flatten().copied().collect())
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Taken(mark))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(marks: &[(usize, usize, Mark)]) -> Board {
        let mut board = Board::new();
        for &(row, col, mark) in marks {
            board.cells[row][col] = Cell::Taken(mark);
        }
        board
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.view().cells().iter().all(|c| c.is_empty()));
        assert_eq!(board.view().cells().len(), ROWS * COLS);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_drop_mark_lands_on_bottom_row() {
        let mut board = Board::new();
        assert_eq!(board.drop_mark(3, Mark::X), Some(ROWS - 1));
        assert_eq!(board.drop_mark(3, Mark::O), Some(ROWS - 2));
        assert_eq!(board.get(ROWS - 1, 3), Some(Cell::Taken(Mark::X)));
        assert_eq!(board.get(ROWS - 2, 3), Some(Cell::Taken(Mark::O)));
    }

    #[test]
    fn test_column_fills_after_rows_drops() {
        let mut board = Board::new();
        for i in 0..ROWS {
            assert!(!board.is_column_full(0));
            assert_eq!(board.drop_mark(0, Mark::X), Some(ROWS - 1 - i));
        }
        assert!(board.is_column_full(0));
        assert_eq!(board.drop_mark(0, Mark::O), None);
        assert_eq!(board.count(Mark::O), 0);
    }

    #[test]
    fn test_out_of_range_column() {
        let mut board = Board::new();
        assert!(board.is_column_full(COLS));
        assert_eq!(board.drop_mark(COLS, Mark::X), None);
    }

    #[test]
    fn test_horizontal_win() {
        let board = board_with(&[
            (6, 2, Mark::O),
            (6, 3, Mark::O),
            (6, 4, Mark::O),
            (6, 5, Mark::O),
        ]);
        assert_eq!(board.winner(), Some(Mark::O));
    }

    #[test]
    fn test_horizontal_win_at_right_edge() {
        let board = board_with(&[
            (0, 4, Mark::X),
            (0, 5, Mark::X),
            (0, 6, Mark::X),
            (0, 7, Mark::X),
        ]);
        assert_eq!(board.winner(), Some(Mark::X));
    }

    #[test]
    fn test_vertical_win() {
        let board = board_with(&[
            (6, 3, Mark::X),
            (5, 3, Mark::X),
            (4, 3, Mark::X),
            (3, 3, Mark::X),
        ]);
        assert_eq!(board.winner(), Some(Mark::X));
    }

    #[test]
    fn test_diagonal_win() {
        let board = board_with(&[
            (3, 0, Mark::X),
            (4, 1, Mark::X),
            (5, 2, Mark::X),
            (6, 3, Mark::X),
        ]);
        assert_eq!(board.winner(), Some(Mark::X));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let board = board_with(&[
            (3, 7, Mark::O),
            (4, 6, Mark::O),
            (5, 5, Mark::O),
            (6, 4, Mark::O),
        ]);
        assert_eq!(board.winner(), Some(Mark::O));
    }

    #[test]
    fn test_three_in_a_row_is_not_a_win() {
        let board = board_with(&[(6, 0, Mark::X), (6, 1, Mark::X), (6, 2, Mark::X)]);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_broken_line_is_not_a_win() {
        let board = board_with(&[
            (6, 0, Mark::X),
            (6, 1, Mark::X),
            (6, 2, Mark::O),
            (6, 3, Mark::X),
            (6, 4, Mark::X),
        ]);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_line_does_not_wrap_across_rows() {
        let board = board_with(&[
            (5, 6, Mark::X),
            (5, 7, Mark::X),
            (6, 0, Mark::X),
            (6, 1, Mark::X),
        ]);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::new();
        let mut mark = Mark::X;
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_mark(col, mark);
                mark = mark.other();
            }
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_view_is_row_major() {
        let board = board_with(&[(6, 7, Mark::O), (0, 1, Mark::X)]);
        let view = board.view();
        assert_eq!(view.cells()[1], Cell::Taken(Mark::X));
        assert_eq!(view.cells()[ROWS * COLS - 1], Cell::Taken(Mark::O));
    }
}
