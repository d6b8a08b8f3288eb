//! ASCII board rendering.
//!
//! Player one's birds print as upper-case symbols, player two's as lower
//! case, empty squares as `.`. The grid covers the occupied footprint plus
//! one square on every side, so the squares a bird could move or be
//! placed to are visible.
//!
//! ```text
//!        0  1  2
//!    0   .  .  .
//!    1   .  k  .
//!    2   .  K  .
//!    3   .  r  .
//!    4   .  .  .
//! ```

use std::fmt::Write;

use kakaw_core::{Board, GameState, Piece, PieceType, Player, Pos};

fn glyph(piece: Piece) -> char {
    let symbol = piece.kind.symbol();
    match piece.owner {
        Player::One => symbol.to_ascii_uppercase(),
        Player::Two => symbol.to_ascii_lowercase(),
    }
}

/// Grid of `board` with row and column labels.
pub fn render_board(board: &Board) -> String {
    let area = board.bounds().expand(1);
    let mut out = String::new();

    let _ = write!(out, "     ");
    for col in area.min_col..=area.max_col {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');

    for row in area.min_row..=area.max_row {
        let _ = write!(out, "{:>4} ", row);
        for col in area.min_col..=area.max_col {
            let cell = board.get(Pos::new(row, col)).map_or('.', glyph);
            let _ = write!(out, "{:>3}", cell);
        }
        out.push('\n');
    }
    out
}

/// One line per player: remaining reserve counts by symbol.
pub fn render_reserves(state: &GameState) -> String {
    let mut out = String::new();
    for player in Player::all() {
        let reserve = state.reserve(player);
        let _ = write!(out, "{:<11}", player.to_string());
        for kind in PieceType::RESERVE_TYPES {
            let _ = write!(out, " {}x{}", kind.symbol(), reserve.count(kind));
        }
        out.push('\n');
    }
    out
}

/// Winner, or the player to move.
pub fn render_status(state: &GameState) -> String {
    match state.winner() {
        Some(winner) => format!("{} wins", winner),
        None => format!("{} to move", state.current_player()),
    }
}
