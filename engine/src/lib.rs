pub mod config;
pub mod error;
pub mod games;
pub mod logger;

pub use error::{ConfigError, GameError, ParseBoardError};
pub use games::session_rng::SessionRng;
pub use games::tictactoe::{
    Board, BotRequest, Cell, Difficulty, GameOutcome, HumanResult, Mark, MarkChoice, Match,
    MatchMode, MatchSession, MatchSettings, ModeSetting, Position, WinningLine, choose_move,
};
