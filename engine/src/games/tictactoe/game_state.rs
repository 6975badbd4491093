use crate::error::GameError;
use crate::games::SessionRng;
use crate::log;
use super::board::Board;
use super::bot_controller::{Difficulty, choose_move};
use super::settings::MatchSettings;
use super::types::{GameOutcome, Mark, Position, WinningLine};
use super::win_detector::winning_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    TwoPlayer,
    VsBot { difficulty: Difficulty, human_mark: Mark },
}

impl MatchMode {
    pub fn bot_mark(&self) -> Option<Mark> {
        match self {
            MatchMode::TwoPlayer => None,
            MatchMode::VsBot { human_mark, .. } => Some(human_mark.opponent()),
        }
    }
}

/// Result of a finished single-player match, seen from the human's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanResult {
    Win,
    Draw,
    Loss,
}

/// Everything the bot needs to pick a move, detached from the live match.
#[derive(Debug, Clone, Copy)]
pub struct BotRequest {
    pub generation: u64,
    pub board: Board,
    pub difficulty: Difficulty,
    pub bot_mark: Mark,
    pub human_mark: Mark,
}

impl BotRequest {
    pub fn compute(&self) -> Option<Position> {
        choose_move(&self.board, self.difficulty, self.bot_mark, self.human_mark)
    }
}

#[derive(Debug, Clone)]
pub struct Match {
    mode: MatchMode,
    board: Board,
    last_move: Option<Position>,
    generation: u64,
}

impl Match {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            board: Board::empty(),
            last_move: None,
            generation: 0,
        }
    }

    pub fn two_player() -> Self {
        Self::new(MatchMode::TwoPlayer)
    }

    pub fn vs_bot(difficulty: Difficulty, human_mark: Mark) -> Self {
        Self::new(MatchMode::VsBot {
            difficulty,
            human_mark,
        })
    }

    pub fn from_settings(settings: &MatchSettings, rng: &mut SessionRng) -> Self {
        Self::new(settings.resolve_mode(rng))
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn move_count(&self) -> usize {
        self.board.move_count()
    }

    pub fn current_mark(&self) -> Mark {
        self.board.side_to_move()
    }

    pub fn outcome(&self) -> GameOutcome {
        self.board.outcome()
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        winning_line(&self.board)
    }

    pub fn is_bot_turn(&self) -> bool {
        !self.outcome().is_terminal() && self.mode.bot_mark() == Some(self.current_mark())
    }

    pub fn result_for_human(&self) -> Option<HumanResult> {
        let MatchMode::VsBot { human_mark, .. } = self.mode else {
            return None;
        };
        match self.outcome() {
            GameOutcome::InProgress => None,
            GameOutcome::Draw => Some(HumanResult::Draw),
            GameOutcome::Won(mark) if mark == human_mark => Some(HumanResult::Win),
            GameOutcome::Won(_) => Some(HumanResult::Loss),
        }
    }

    /// A human move. In single-player mode it is rejected while the bot is to move.
    pub fn place_mark(&mut self, row: usize, col: usize) -> Result<GameOutcome, GameError> {
        if self.outcome().is_terminal() {
            return Err(GameError::GameOver);
        }
        if self.is_bot_turn() {
            return Err(GameError::NotYourTurn {
                expected: self.current_mark(),
            });
        }
        self.play(Position::new(row, col))
    }

    pub fn bot_request(&self) -> Option<BotRequest> {
        if !self.is_bot_turn() {
            return None;
        }
        let MatchMode::VsBot {
            difficulty,
            human_mark,
        } = self.mode
        else {
            return None;
        };

        Some(BotRequest {
            generation: self.generation,
            board: self.board,
            difficulty,
            bot_mark: human_mark.opponent(),
            human_mark,
        })
    }

    /// Applies a bot move computed from `bot_request`. Returns `Ok(false)` and
    /// leaves the match untouched when the match was reset in the meantime.
    pub fn apply_bot_move(&mut self, generation: u64, pos: Position) -> Result<bool, GameError> {
        if generation != self.generation {
            log!(
                "Discarding bot move {} from generation {} (current {})",
                pos, generation, self.generation
            );
            return Ok(false);
        }
        if self.outcome().is_terminal() {
            return Err(GameError::GameOver);
        }
        if !self.is_bot_turn() {
            return Err(GameError::NotYourTurn {
                expected: self.current_mark(),
            });
        }
        self.play(pos)?;
        Ok(true)
    }

    /// Computes and applies the bot's move on the calling thread.
    pub fn play_bot_turn(&mut self) -> Result<Option<Position>, GameError> {
        let Some(request) = self.bot_request() else {
            return Ok(None);
        };
        let Some(pos) = request.compute() else {
            return Ok(None);
        };
        self.apply_bot_move(request.generation, pos)?;
        Ok(Some(pos))
    }

    pub fn reset(&mut self) {
        self.board = Board::empty();
        self.last_move = None;
        self.generation += 1;
    }

    fn play(&mut self, pos: Position) -> Result<GameOutcome, GameError> {
        let mark = self.current_mark();
        match self.board.apply_at(pos, mark) {
            Ok(next) => {
                self.board = next;
                self.last_move = Some(pos);
                let outcome = self.outcome();
                if outcome.is_terminal() {
                    log!("Match finished after {} moves: {:?}", self.move_count(), outcome);
                }
                Ok(outcome)
            }
            Err(e) => {
                log!("Failed to place {} at {}: {}", mark, pos, e);
                Err(e)
            }
        }
    }
}
