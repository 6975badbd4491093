use std::fmt;
use std::str::FromStr;

use crate::error::{GameError, ParseBoardError};
use super::types::{BOARD_SIZE, CELL_COUNT, Cell, GameOutcome, Mark, Position};
use super::win_detector;

/// A 3x3 board value. Moves produce a new board; an existing value never changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

pub fn empty_board() -> Board {
    Board::empty()
}

pub fn legal_moves(board: &Board) -> Vec<Position> {
    board.legal_moves()
}

pub fn apply_move(board: &Board, row: usize, col: usize, mark: Mark) -> Result<Board, GameError> {
    board.apply_move(row, col, mark)
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        if !pos.is_on_board() {
            return None;
        }
        Some(self.cells[pos.to_index()])
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.get(Position::new(row, col))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(BOARD_SIZE)
    }

    /// Empty cells in row-major order.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .filter_map(|(index, _)| Position::from_index(index))
            .collect()
    }

    pub fn apply_move(&self, row: usize, col: usize, mark: Mark) -> Result<Board, GameError> {
        self.apply_at(Position::new(row, col), mark)
    }

    pub fn apply_at(&self, pos: Position, mark: Mark) -> Result<Board, GameError> {
        if !pos.is_on_board() {
            return Err(GameError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            });
        }

        let index = pos.to_index();
        if !self.cells[index].is_empty() {
            return Err(GameError::IllegalMove { position: pos });
        }

        let mut cells = self.cells;
        cells[index] = Cell::Marked(mark);
        Ok(Board { cells })
    }

    pub fn mark_counts(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(x, o), cell| match cell.mark() {
                Some(Mark::X) => (x + 1, o),
                Some(Mark::O) => (x, o + 1),
                None => (x, o),
            })
    }

    pub fn move_count(&self) -> usize {
        let (x, o) = self.mark_counts();
        x + o
    }

    /// X moves when the counts are equal, O when X is one ahead.
    pub fn side_to_move(&self) -> Mark {
        let (x, o) = self.mark_counts();
        if x > o { Mark::O } else { Mark::X }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    pub fn is_full(&self) -> bool {
        win_detector::is_full(self)
    }

    pub fn winner(&self) -> Option<Mark> {
        win_detector::winner(self)
    }

    pub fn outcome(&self) -> GameOutcome {
        win_detector::outcome(self)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.trim().split('/').collect();
        if rows.len() != BOARD_SIZE {
            return Err(ParseBoardError::RowCount { got: rows.len() });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (row, text) in rows.iter().enumerate() {
            let chars: Vec<char> = text.chars().collect();
            if chars.len() != BOARD_SIZE {
                return Err(ParseBoardError::RowLength {
                    row,
                    got: chars.len(),
                });
            }
            for (col, &character) in chars.iter().enumerate() {
                cells[row * BOARD_SIZE + col] = Cell::from_char(character)
                    .ok_or(ParseBoardError::InvalidCell { character, row })?;
            }
        }

        Ok(Board { cells })
    }
}
