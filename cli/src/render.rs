use std::fmt::Write;

use minado_core::{Board, Cell, GameState, Session};

fn count_glyph(count: u8) -> char {
    match count {
        0 => '.',
        1 => '1',
        2 => '2',
        3 => '3',
        4 => '4',
        5 => '5',
        6 => '6',
        7 => '7',
        8 => '8',
        _ => '?',
    }
}

pub fn cell_glyph(cell: Cell) -> char {
    match (cell.is_flagged(), cell.is_revealed(), cell.is_mine()) {
        (true, _, _) => 'F',
        (false, false, _) => '#',
        (false, true, true) => '*',
        (false, true, false) => count_glyph(cell.neighbor_mine_count()),
    }
}

/// Board as a text grid with row and column numbers.
pub fn board<G>(board: &Board<G>) -> String {
    let (_, cols) = board.size();
    let mut out = String::from("   ");
    for col in 0..cols {
        let _ = write!(out, "{col:>3}");
    }

    let mut cur_row = None;
    for ((row, _), cell) in board.iter_cells() {
        if cur_row != Some(row) {
            cur_row = Some(row);
            let _ = write!(out, "\n{row:>3}");
        }
        let _ = write!(out, "{:>3}", cell_glyph(cell));
    }
    out.push('\n');
    out
}

pub fn status<G>(session: &Session<G>) -> String {
    let board = session.board();
    let state = match session.state() {
        GameState::NotStarted => "reveal a cell to start",
        GameState::InProgress => "in progress",
        GameState::Won => "won",
        GameState::Lost => "lost",
    };
    format!(
        "{} | mines left: {} | time: {}s | {}",
        session.difficulty(),
        board.mines_left(),
        session.elapsed_secs(),
        state
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use minado_core::{BoardConfig, FixedMinefieldGenerator};

    #[test]
    fn counts_past_eight_fall_back() {
        assert_eq!(count_glyph(0), '.');
        assert_eq!(count_glyph(8), '8');
        assert_eq!(count_glyph(9), '?');
    }

    #[test]
    fn renders_progress() {
        let config = BoardConfig::new(2, 3, 1).unwrap();
        let mut board = Board::with_generator(config, FixedMinefieldGenerator::new(&[(0, 2)]));
        board.reveal((1, 0)).unwrap();
        board.toggle_flag((0, 2)).unwrap();

        assert_eq!(
            super::board(&board),
            "     0  1  2\n  0  .  1  F\n  1  .  1  #\n"
        );
    }

    #[test]
    fn renders_loss() {
        let config = BoardConfig::new(1, 3, 1).unwrap();
        let mut board = Board::with_generator(config, FixedMinefieldGenerator::new(&[(0, 1)]));
        board.reveal((0, 0)).unwrap();
        board.reveal((0, 1)).unwrap();

        assert_eq!(super::board(&board), "     0  1  2\n  0  1  *  1\n");
    }
}
