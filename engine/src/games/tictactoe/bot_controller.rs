use serde::{Deserialize, Serialize};

use crate::log;
use super::board::Board;
use super::types::{Mark, Position};
use super::win_detector::winner;

const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy)]
pub struct BotInput {
    pub board: Board,
    pub bot_mark: Mark,
    pub human_mark: Mark,
}

/// Picks the bot's next cell. `None` only when the board has no empty cell.
pub fn choose_move(
    board: &Board,
    difficulty: Difficulty,
    bot_mark: Mark,
    human_mark: Mark,
) -> Option<Position> {
    let input = BotInput {
        board: *board,
        bot_mark,
        human_mark,
    };
    let chosen = calculate_move(difficulty, &input);
    if let Some(pos) = chosen {
        log!("{:?} bot ({}) chose {} on {}", difficulty, bot_mark, pos, board);
    }
    chosen
}

pub fn calculate_move(difficulty: Difficulty, input: &BotInput) -> Option<Position> {
    let available_moves = input.board.legal_moves();
    if available_moves.is_empty() {
        return None;
    }

    match difficulty {
        Difficulty::Easy => calculate_first_free_move(&available_moves),
        Difficulty::Medium => calculate_heuristic_move(input, &available_moves),
        Difficulty::Hard => calculate_minimax_move(input, &available_moves),
    }
}

fn calculate_first_free_move(moves: &[Position]) -> Option<Position> {
    moves.first().copied()
}

fn calculate_heuristic_move(input: &BotInput, moves: &[Position]) -> Option<Position> {
    let board = &input.board;

    find_winning_move(board, input.bot_mark, moves)
        .or_else(|| find_winning_move(board, input.human_mark, moves))
        .or_else(|| first_empty(board, &[Position::CENTER]))
        .or_else(|| first_empty(board, &Position::CORNERS))
        .or_else(|| first_empty(board, &Position::EDGES))
        .or_else(|| moves.first().copied())
}

fn find_winning_move(board: &Board, mark: Mark, moves: &[Position]) -> Option<Position> {
    moves.iter().copied().find(|&pos| {
        board
            .apply_at(pos, mark)
            .is_ok_and(|next| winner(&next) == Some(mark))
    })
}

fn first_empty(board: &Board, candidates: &[Position]) -> Option<Position> {
    candidates
        .iter()
        .copied()
        .find(|&pos| board.get(pos).is_some_and(|cell| cell.is_empty()))
}

fn calculate_minimax_move(input: &BotInput, moves: &[Position]) -> Option<Position> {
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for &pos in moves {
        let Ok(next) = input.board.apply_at(pos, input.bot_mark) else {
            continue;
        };

        let score = minimax(&next, 0, false, input.bot_mark, input.human_mark);

        // Strictly greater keeps the earliest move among equals.
        if score > best_score {
            best_score = score;
            best_move = Some(pos);
        }
    }

    best_move
}

fn minimax(board: &Board, depth: i32, is_bot_turn: bool, bot_mark: Mark, human_mark: Mark) -> i32 {
    match winner(board) {
        Some(mark) if mark == bot_mark => return WIN_SCORE - depth,
        Some(_) => return -WIN_SCORE + depth,
        None => {}
    }

    let moves = board.legal_moves();
    if moves.is_empty() {
        return 0;
    }

    let mover = if is_bot_turn { bot_mark } else { human_mark };
    let scores = moves.into_iter().filter_map(|pos| {
        board
            .apply_at(pos, mover)
            .ok()
            .map(|next| minimax(&next, depth + 1, !is_bot_turn, bot_mark, human_mark))
    });

    let best = if is_bot_turn { scores.max() } else { scores.min() };
    best.unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::types::GameOutcome;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_full_board_yields_no_move_for_any_difficulty() {
        let full = board("XOX/XOO/OXX");

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(choose_move(&full, difficulty, Mark::O, Mark::X), None);
        }
    }

    #[test]
    fn test_easy_plays_first_free_cell() {
        let empty = Board::empty();
        assert_eq!(
            choose_move(&empty, Difficulty::Easy, Mark::O, Mark::X),
            Some(Position::new(0, 0))
        );

        let b = board("XO./.../...");
        assert_eq!(
            choose_move(&b, Difficulty::Easy, Mark::X, Mark::O),
            Some(Position::new(0, 2))
        );
    }

    #[test]
    fn test_easy_is_deterministic() {
        let empty = Board::empty();
        let first = choose_move(&empty, Difficulty::Easy, Mark::X, Mark::O);

        for _ in 0..5 {
            assert_eq!(choose_move(&empty, Difficulty::Easy, Mark::X, Mark::O), first);
        }
    }

    #[test]
    fn test_medium_blocks_human_row() {
        let b = board("XX./.O./...");

        assert_eq!(
            choose_move(&b, Difficulty::Medium, Mark::O, Mark::X),
            Some(Position::new(0, 2))
        );
    }

    #[test]
    fn test_medium_prefers_own_win_over_block() {
        // X threatens (0,2); O completes row 1 at (1,2) instead.
        let b = board("XX./OO./..X");

        assert_eq!(
            choose_move(&b, Difficulty::Medium, Mark::O, Mark::X),
            Some(Position::new(1, 2))
        );
    }

    #[test]
    fn test_medium_takes_center_then_corners() {
        assert_eq!(
            choose_move(&Board::empty(), Difficulty::Medium, Mark::O, Mark::X),
            Some(Position::CENTER)
        );

        let center_taken = board(".../.X./...");
        assert_eq!(
            choose_move(&center_taken, Difficulty::Medium, Mark::O, Mark::X),
            Some(Position::new(0, 0))
        );

        let first_corner_taken = board("O../.X./..X");
        assert_eq!(
            choose_move(&first_corner_taken, Difficulty::Medium, Mark::O, Mark::X),
            Some(Position::new(0, 2))
        );
    }

    #[test]
    fn test_edges_are_scanned_in_fixed_order() {
        let b = board("XOX/.X./OXO");

        assert_eq!(first_empty(&b, &Position::CORNERS), None);
        assert_eq!(first_empty(&b, &Position::EDGES), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_medium_does_not_touch_callers_board() {
        let b = board("XX./.O./...");
        let before = b;

        let _ = choose_move(&b, Difficulty::Medium, Mark::O, Mark::X);

        assert_eq!(b, before);
    }

    #[test]
    fn test_hard_opening_is_first_cell_and_stable() {
        let empty = Board::empty();

        for _ in 0..3 {
            assert_eq!(
                choose_move(&empty, Difficulty::Hard, Mark::X, Mark::O),
                Some(Position::new(0, 0))
            );
        }
    }

    #[test]
    fn test_hard_takes_immediate_win() {
        // O to move: (0,2) wins at once, (1,2) only blocks.
        let b = board("OO./XX./X..");

        assert_eq!(
            choose_move(&b, Difficulty::Hard, Mark::O, Mark::X),
            Some(Position::new(0, 2))
        );
    }

    #[test]
    fn test_hard_blocks_when_it_cannot_win() {
        let b = board("XX./.O./...");

        assert_eq!(
            choose_move(&b, Difficulty::Hard, Mark::O, Mark::X),
            Some(Position::new(0, 2))
        );
    }

    #[test]
    fn test_hard_answers_corner_opening_with_center() {
        let b = board("X../.../...");

        assert_eq!(
            choose_move(&b, Difficulty::Hard, Mark::O, Mark::X),
            Some(Position::CENTER)
        );
    }

    #[test]
    fn test_minimax_prefers_faster_win() {
        // X to move can win immediately at (0,2).
        let b = board("XX./OO./...");

        let immediate = b.apply_move(0, 2, Mark::X).unwrap();
        assert_eq!(minimax(&immediate, 0, false, Mark::X, Mark::O), WIN_SCORE);
        assert_eq!(
            choose_move(&b, Difficulty::Hard, Mark::X, Mark::O),
            Some(Position::new(0, 2))
        );
    }

    fn assert_hard_never_loses(board: Board, bot_mark: Mark) {
        match board.outcome() {
            GameOutcome::Won(mark) => {
                assert_eq!(mark, bot_mark, "hard bot lost on {}", board);
                return;
            }
            GameOutcome::Draw => return,
            GameOutcome::InProgress => {}
        }

        let mover = board.side_to_move();
        if mover == bot_mark {
            let pos = choose_move(&board, Difficulty::Hard, bot_mark, bot_mark.opponent())
                .expect("in-progress board has a move");
            let next = board.apply_at(pos, bot_mark).unwrap();
            assert_hard_never_loses(next, bot_mark);
        } else {
            for pos in board.legal_moves() {
                let next = board.apply_at(pos, mover).unwrap();
                assert_hard_never_loses(next, bot_mark);
            }
        }
    }

    #[test]
    fn test_hard_never_loses_as_o_against_any_sequence() {
        assert_hard_never_loses(Board::empty(), Mark::O);
    }

    #[test]
    fn test_hard_never_loses_as_x_against_any_sequence() {
        assert_hard_never_loses(Board::empty(), Mark::X);
    }

    #[test]
    fn test_hard_against_hard_is_a_draw() {
        let mut b = Board::empty();
        while !b.outcome().is_terminal() {
            let mark = b.side_to_move();
            let pos = choose_move(&b, Difficulty::Hard, mark, mark.opponent()).unwrap();
            b = b.apply_at(pos, mark).unwrap();
        }

        assert_eq!(b.outcome(), GameOutcome::Draw);
    }
}
