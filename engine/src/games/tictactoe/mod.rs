mod board;
mod bot_controller;
mod game_state;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::{Board, apply_move, empty_board, legal_moves};
pub use bot_controller::{Difficulty, choose_move};
pub use game_state::{BotRequest, HumanResult, Match, MatchMode};
pub use session::MatchSession;
pub use settings::{MarkChoice, MatchSettings, ModeSetting};
pub use types::{Cell, GameOutcome, Mark, Position, WinningLine};
pub use win_detector::{is_full, outcome, winner, winning_line};
