//! Error types for the engine.

use thiserror::Error;

use crate::games::tictactoe::{Mark, Position};

/// Errors raised while applying moves to a board or a match.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move: cell {position} is already occupied")]
    IllegalMove { position: Position },

    #[error("position ({row}, {col}) is outside the 3x3 board")]
    OutOfBounds { row: usize, col: usize },

    #[error("game is already over")]
    GameOver,

    #[error("not your turn: {expected} is to move")]
    NotYourTurn { expected: Mark },
}

/// Errors from parsing the `XOX/.O./...` board notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("expected 3 rows separated by '/', got {got}")]
    RowCount { got: usize },

    #[error("row {row} has {got} cells, expected 3")]
    RowLength { row: usize, got: usize },

    #[error("invalid character '{character}' in row {row}")]
    InvalidCell { character: char, row: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("failed to deserialize config: {0}")]
    Deserialize(#[source] serde_yaml_ng::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
