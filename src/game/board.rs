//! The 8x8 grid of squares.
//!
//! Pieces are stored purely as `board[file][rank]` values; there are no per-kind
//! piece lists to keep in sync.

use super::{
    action::Move,
    castling_rights::CastleSide,
    colour::Colour,
    piece::{Piece, PieceKind},
    square::Square,
};

/// Content of every square of the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

/// What playing a move did to the board, as observed while playing it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Played {
    /// The piece that moved.
    pub piece: Piece,
    /// The captured piece and the square it was removed from (which differs from the
    /// move target for en passant captures).
    pub captured: Option<(Piece, Square)>,
    /// Set when the move was a castle; the rook has already been relocated.
    pub castle: Option<CastleSide>,
    /// Set when the move was a pawn double push, holding the skipped square.
    pub skipped: Option<Square>,
    /// Set when a pawn reached its promotion rank and still is a pawn.
    pub promotes: bool,
}

impl Board {
    /// A board with no pieces.
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Returns the piece sitting on a given square, if any.
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.squares[square.file() as usize][square.rank() as usize]
    }

    /// Replaces the content of a square, returning what was there.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.squares[square.file() as usize][square.rank() as usize],
            piece,
        )
    }

    /// Checks if a square holds a piece of the given kind and colour.
    #[inline]
    pub fn holds(&self, square: Square, kind: PieceKind, colour: Colour) -> bool {
        self.piece_on(square) == Some((kind, colour))
    }

    /// Iterator over all occupied squares and their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::squares_iter().filter_map(|sq| self.piece_on(sq).map(|piece| (sq, piece)))
    }

    /// Returns the square of the king of the given colour, if there is one.
    ///
    /// If several kings of that colour are on the board, the first one in
    /// description order is returned.
    pub fn king_square(&self, colour: Colour) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece)| piece == (PieceKind::King, colour))
            .map(|(sq, _)| sq)
    }

    /// Plays a move on the board alone, without any legality check.
    ///
    /// `en_passant` is the en passant target square valid for this move. Captures,
    /// en passant captures and the rook half of a castle are all carried out.
    /// A castle is recognised as a king travelling two files or more along its rank;
    /// the king always lands on the g- or c-file whatever target the move names.
    ///
    /// Returns `None`, leaving the board untouched, if the origin square is empty.
    pub fn play(&mut self, mv: Move, en_passant: Option<Square>) -> Option<Played> {
        let piece @ (kind, colour) = self.piece_on(mv.from)?;
        let mut played = Played {
            piece,
            captured: None,
            castle: None,
            skipped: None,
            promotes: false,
        };

        let mut target = mv.to;
        match kind {
            PieceKind::King if mv.from.rank() == mv.to.rank() => {
                if let Some(side) = CastleSide::from_king_move(mv.from.file(), mv.to.file()) {
                    played.castle = Some(side);
                    // Landing and rook squares are on the same rank as the origin.
                    let rank = mv.from.rank();
                    let king_target = Square::new(side.king_target_file(), rank)?;
                    let rook_origin = Square::new(side.rook_origin_file(), rank)?;
                    let rook_target = Square::new(side.rook_target_file(), rank)?;
                    let rook = self.set(rook_origin, None);
                    self.set(rook_target, rook);
                    target = king_target;
                }
            }
            PieceKind::Pawn => {
                if mv.from.file() != mv.to.file()
                    && Some(mv.to) == en_passant
                    && self.piece_on(mv.to).is_none()
                {
                    let behind = Square::new(mv.to.file(), mv.from.rank())?;
                    played.captured = self.set(behind, None).map(|captured| (captured, behind));
                }
                if mv.from.rank().abs_diff(mv.to.rank()) == 2 {
                    played.skipped = Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2);
                }
                played.promotes = mv.to.rank() == colour.promotion_rank();
            }
            _ => (),
        }

        let moving = self.set(mv.from, None);
        if let Some(captured) = self.set(target, moving) {
            played.captured = Some((captured, target));
        }
        Some(played)
    }
}
impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in 0..8u8 {
            for file in 0..8u8 {
                let c = Square::new(file, rank)
                    .and_then(|sq| self.piece_on(sq))
                    .map(|(kind, colour)| kind.fen_char(colour))
                    .unwrap_or('.');
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::fen::Fen;

    fn board(fen: &str) -> Board {
        Fen::parse(fen).unwrap().board
    }

    fn mv(s: &str) -> Move {
        Move::parse(s).unwrap()
    }

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn quiet_move_and_capture() {
        let mut b = board("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
        let played = b.play(mv("e4d5"), None).unwrap();
        assert_eq!(played.piece, (PieceKind::Pawn, Colour::White));
        assert_eq!(
            played.captured,
            Some(((PieceKind::Pawn, Colour::Black), sq("d5")))
        );
        assert_eq!(b.piece_on(sq("e4")), None);
        assert_eq!(b.piece_on(sq("d5")), Some((PieceKind::Pawn, Colour::White)));
    }

    #[test]
    fn en_passant_removes_pawn_behind_target() {
        let mut b = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let played = b.play(mv("e5d6"), Some(sq("d6"))).unwrap();
        assert_eq!(
            played.captured,
            Some(((PieceKind::Pawn, Colour::Black), sq("d5")))
        );
        assert_eq!(b.piece_on(sq("d5")), None);
        assert_eq!(b.piece_on(sq("d6")), Some((PieceKind::Pawn, Colour::White)));
    }

    #[test]
    fn castles_move_the_rook() {
        for (notation, king, rook) in [("e1g1", "g1", "f1"), ("e1h1", "g1", "f1")] {
            let mut b = board("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
            let played = b.play(mv(notation), None).unwrap();
            assert_eq!(played.castle, Some(CastleSide::King));
            assert!(b.holds(sq(king), PieceKind::King, Colour::White));
            assert!(b.holds(sq(rook), PieceKind::Rook, Colour::White));
            assert_eq!(b.piece_on(sq("h1")), None);
            assert_eq!(b.piece_on(sq("e1")), None);
        }
        for notation in ["e8c8", "e8b8"] {
            let mut b = board("r3k3/8/8/8/8/8/8/4K3 b q - 0 1");
            let played = b.play(mv(notation), None).unwrap();
            assert_eq!(played.castle, Some(CastleSide::Queen));
            assert!(b.holds(sq("c8"), PieceKind::King, Colour::Black));
            assert!(b.holds(sq("d8"), PieceKind::Rook, Colour::Black));
            assert_eq!(b.piece_on(sq("a8")), None);
            assert_eq!(b.piece_on(sq("b8")), None);
        }
    }

    #[test]
    fn double_push_and_promotion_flags() {
        let mut b = board("4k3/P7/8/8/8/8/4P3/4K3 w - - 0 1");
        let played = b.play(mv("e2e4"), None).unwrap();
        assert_eq!(played.skipped, Some(sq("e3")));
        assert!(!played.promotes);
        let played = b.play(mv("a7a8"), None).unwrap();
        assert!(played.promotes);
        assert_eq!(played.skipped, None);
    }

    #[test]
    fn empty_origin_leaves_board_alone() {
        let mut b = board("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        let before = b;
        assert_eq!(b.play(mv("a1a2"), None), None);
        assert_eq!(b, before);
    }

    #[test]
    fn king_lookup() {
        let b = board("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(b.king_square(Colour::White), Some(sq("e1")));
        assert_eq!(b.king_square(Colour::Black), Some(sq("e8")));
        assert_eq!(Board::empty().king_square(Colour::White), None);
    }
}
