//! Attack detection.
//!
//! Everything is computed from the attacked square outward: we look for attackers
//! where they would have to stand rather than generating their moves. Pins and
//! self-check are ignored, so this never recurses into legality filtering.

use super::{
    board::Board,
    colour::Colour,
    piece::PieceKind,
    square::{Delta, Square},
};

/// Checks if `square` is attacked by any piece of colour `by`.
pub fn is_attacked(board: &Board, square: Square, by: Colour) -> bool {
    attacked_by_pawn(board, square, by)
        || attacked_by_leaper(board, square, by, PieceKind::Knight, &Delta::KNIGHT_DELTAS)
        || attacked_by_leaper(board, square, by, PieceKind::King, &Delta::QUEEN_DELTAS)
        || attacked_by_slider(
            board,
            square,
            by,
            &Delta::ORTHOGONAL_DELTAS,
            PieceKind::is_orthogonal_slider,
        )
        || attacked_by_slider(
            board,
            square,
            by,
            &Delta::DIAGONAL_DELTAS,
            PieceKind::is_diagonal_slider,
        )
}

/// Returns `true` if the king of `colour` is attacked.
///
/// # Panics
/// Panics if `colour` has no king on the board.
pub fn in_check(board: &Board, colour: Colour) -> bool {
    let Some(king) = board.king_square(colour) else {
        panic!("no {colour} king on the board, cannot tell whether it is in check")
    };
    is_attacked(board, king, colour.inverse())
}

fn attacked_by_pawn(board: &Board, square: Square, by: Colour) -> bool {
    // A pawn attacks diagonally forward, so it stands one rank behind the square
    // from its own point of view.
    let behind = -by.pawn_direction();
    [Delta::new(-1, behind), Delta::new(1, behind)]
        .into_iter()
        .filter_map(|delta| square.translate(delta))
        .any(|origin| board.holds(origin, PieceKind::Pawn, by))
}

fn attacked_by_leaper(
    board: &Board,
    square: Square,
    by: Colour,
    kind: PieceKind,
    deltas: &[Delta],
) -> bool {
    deltas
        .iter()
        .filter_map(|&delta| square.translate(delta))
        .any(|origin| board.holds(origin, kind, by))
}

fn attacked_by_slider(
    board: &Board,
    square: Square,
    by: Colour,
    deltas: &[Delta],
    slides: fn(PieceKind) -> bool,
) -> bool {
    deltas.iter().any(|&delta| {
        // The first occupied square on the ray either attacks or blocks.
        square
            .ray(delta)
            .find_map(|sq| board.piece_on(sq))
            .is_some_and(|(kind, colour)| colour == by && slides(kind))
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::fen::Fen;

    fn board(fen: &str) -> Board {
        Fen::parse(fen).unwrap().board
    }

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn pawn_attacks_depend_on_colour() {
        let b = board("4k3/8/8/3p4/4P3/8/8/4K3 w - -");
        // White pawn on e4 attacks d5 and f5, not d3.
        assert!(is_attacked(&b, sq("d5"), Colour::White));
        assert!(is_attacked(&b, sq("f5"), Colour::White));
        assert!(!is_attacked(&b, sq("d3"), Colour::White));
        assert!(!is_attacked(&b, sq("e5"), Colour::White));
        // Black pawn on d5 attacks c4 and e4.
        assert!(is_attacked(&b, sq("e4"), Colour::Black));
        assert!(is_attacked(&b, sq("c4"), Colour::Black));
        assert!(!is_attacked(&b, sq("c6"), Colour::Black));
    }

    #[test]
    fn knight_and_king_attacks() {
        let b = board("4k3/8/8/8/3N4/8/8/4K3 w - -");
        for target in ["c6", "e6", "b5", "f5", "b3", "f3", "c2", "e2"] {
            assert!(is_attacked(&b, sq(target), Colour::White), "{target}");
        }
        assert!(!is_attacked(&b, sq("d5"), Colour::White));
        assert!(is_attacked(&b, sq("d7"), Colour::Black));
        assert!(!is_attacked(&b, sq("d6"), Colour::Black));
    }

    #[test]
    fn sliders_are_blocked() {
        let b = board("4k3/8/8/8/R2n3r/8/8/B3K3 w - -");
        // The rook on a4 sees b4, c4, d4 but not past the knight.
        assert!(is_attacked(&b, sq("c4"), Colour::White));
        assert!(is_attacked(&b, sq("d4"), Colour::White));
        assert!(!is_attacked(&b, sq("e4"), Colour::White));
        assert!(is_attacked(&b, sq("e4"), Colour::Black));
        // The bishop on a1 sees the long diagonal up to d4.
        assert!(is_attacked(&b, sq("c3"), Colour::White));
        assert!(!is_attacked(&b, sq("e5"), Colour::White));
        // A rook does not attack diagonally.
        assert!(!is_attacked(&b, sq("b5"), Colour::White));
    }

    #[test]
    fn queens_combine_both_directions() {
        let b = board("4k3/8/8/8/3q4/8/8/K7 w - -");
        assert!(is_attacked(&b, sq("d1"), Colour::Black));
        assert!(is_attacked(&b, sq("a1"), Colour::Black));
        assert!(is_attacked(&b, sq("h8"), Colour::Black));
        assert!(!is_attacked(&b, sq("e2"), Colour::Black));
        assert!(in_check(&b, Colour::White));
        assert!(!in_check(&b, Colour::Black));
    }

    #[test]
    #[should_panic(expected = "no White king")]
    fn check_without_king_fails_loudly() {
        in_check(&board("4k3/8/8/8/8/8/8/8 w - -"), Colour::White);
    }
}
