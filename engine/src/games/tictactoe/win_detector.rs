use super::board::Board;
use super::types::{GameOutcome, Mark, Position, WinningLine};

/// Rows, columns, main diagonal, anti-diagonal. The first match wins, which
/// only matters for boards built outside of legal play.
const LINES: [[Position; 3]; 8] = [
    [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)],
    [Position::new(1, 0), Position::new(1, 1), Position::new(1, 2)],
    [Position::new(2, 0), Position::new(2, 1), Position::new(2, 2)],
    [Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)],
    [Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)],
    [Position::new(0, 2), Position::new(1, 2), Position::new(2, 2)],
    [Position::new(0, 0), Position::new(1, 1), Position::new(2, 2)],
    [Position::new(0, 2), Position::new(1, 1), Position::new(2, 0)],
];

pub fn winning_line(board: &Board) -> Option<WinningLine> {
    let cells = board.cells();
    LINES.iter().find_map(|line| {
        let first = cells[line[0].to_index()].mark()?;
        let complete = line[1..]
            .iter()
            .all(|pos| cells[pos.to_index()].mark() == Some(first));
        complete.then(|| WinningLine::new(first, *line))
    })
}

pub fn winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|line| line.mark)
}

pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| !cell.is_empty())
}

pub fn outcome(board: &Board) -> GameOutcome {
    if let Some(mark) = winner(board) {
        return GameOutcome::Won(mark);
    }
    if is_full(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}
