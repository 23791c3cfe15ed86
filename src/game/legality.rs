//! Legality filtering.
//!
//! Each candidate is played on a copy of the board and kept only if the mover's
//! king is not attacked afterwards. Working on a copy means nothing has to be
//! restored once the check is done.

use super::{
    action::Move,
    attacks::{in_check, is_attacked},
    board::Board,
    colour::Colour,
    movegen::MoveList,
    square::Square,
};

/// Checks if a pseudo-legal move of `colour` keeps its own king safe.
///
/// Castles must additionally not cross an attacked square.
///
/// # Panics
/// Panics if `colour` has no king on the board.
pub fn is_legal(board: &Board, colour: Colour, en_passant: Option<Square>, mv: Move) -> bool {
    let mut after = *board;
    let Some(played) = after.play(mv, en_passant) else {
        return false;
    };

    if let Some(side) = played.castle {
        let crossed = Square::new(side.king_transit_file(), mv.from.rank());
        if crossed.is_some_and(|sq| is_attacked(board, sq, colour.inverse())) {
            return false;
        }
    }

    !in_check(&after, colour)
}

/// Retains the moves of `moves` that do not leave the king of `colour` attacked.
///
/// # Panics
/// Panics if `moves` is not empty and `colour` has no king on the board.
pub fn filter_legal(
    board: &Board,
    colour: Colour,
    en_passant: Option<Square>,
    moves: &MoveList,
) -> MoveList {
    moves
        .iter()
        .copied()
        .filter(|&mv| is_legal(board, colour, en_passant, mv))
        .collect()
}
