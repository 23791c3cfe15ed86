//! Main API to represent and interact with a chess position.
//!
//! A [`Position`] owns the board and every piece of game state. It only changes
//! through [`Position::apply_move`] and [`Position::resolve_promotion`], after
//! which the legal moves of the new side to move are regenerated.

use super::{
    action::{Move, MoveOutcome},
    attacks::in_check,
    board::Board,
    castling_rights::CastlingRights,
    colour::Colour,
    fen::{Fen, FenError, ParseWarning},
    legality::filter_legal,
    movegen::{MoveGenerator, MoveList},
    piece::{Piece, PieceKind},
    square::Square,
};

/// A pawn standing on its last rank, waiting to be replaced.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct PendingPromotion {
    pub square: Square,
    pub colour: Colour,
}

/// Summary of the game state for the side to move.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Status {
    pub active_colour: Colour,
    pub in_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
}

/// Represents a chess position and defines an API to interact with it.
///
/// Every position handed out by this type has a king for each side; positions
/// loaded without one panic as soon as legality is evaluated.
#[derive(PartialEq, Eq, Clone)]
pub struct Position {
    board: Board,

    // Metadata
    side_to_move: Colour,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    halfmove_count: u32,
    reversible_moves: u16,
    fullmove_number: u16,

    // Derived after each turn
    in_check: bool,
    legal_moves: MoveList,
    pending_promotion: Option<PendingPromotion>,
}
impl Position {
    /// The initial position of chess.
    pub fn initial() -> Self {
        Self::from_fen(Fen::INITIAL).expect("the initial position is a valid description")
    }

    /// Creates a position from a FEN string.
    /// # Errors
    /// Returns every problem found if the description is malformed in any way.
    /// # Panics
    /// Panics if the side to move has no king.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from(Fen::parse(fen)?))
    }

    /// Creates a position from a FEN string, keeping whatever could be read.
    ///
    /// Problems are logged and returned along with the position.
    /// # Panics
    /// Panics if the side to move has no king.
    pub fn load(fen: &str) -> (Self, Vec<ParseWarning>) {
        let (fen, warnings) = Fen::parse_lenient(fen);
        for warning in &warnings {
            log::warn!("{warning}")
        }
        (Self::from(fen), warnings)
    }

    /// Returns a FEN string describing the position.
    pub fn fen(&self) -> String {
        Fen {
            board: self.board,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            halfmove_clock: self.reversible_moves,
            fullmove_counter: self.fullmove_number,
        }
        .to_string()
    }

    /// Returns the piece kind and color sitting on a given square if any.
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.board.piece_on(square)
    }

    /// The board itself.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current side to move.
    pub fn side_to_move(&self) -> Colour {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Square a pawn skipped on the previous ply, capturable en passant right now.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Number of plies played since the position was loaded.
    pub fn halfmove_count(&self) -> u32 {
        self.halfmove_count
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    /// Returns the game status of the side to move.
    ///
    /// While a promotion is pending, no side is mated or stalemated.
    pub fn status(&self) -> Status {
        let over = self.pending_promotion.is_none() && self.legal_moves.is_empty();
        Status {
            active_colour: self.side_to_move,
            in_check: self.in_check,
            is_checkmate: over && self.in_check,
            is_stalemate: over && !self.in_check,
        }
    }

    /// Legal moves of the side to move. Empty while a promotion is pending.
    pub fn moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// Legal moves of any side.
    ///
    /// For the side not to move, moves are generated on demand as if it were its
    /// turn, without en passant captures.
    pub fn legal_moves(&self, colour: Colour) -> MoveList {
        if self.pending_promotion.is_some() {
            MoveList::new()
        } else if colour == self.side_to_move {
            self.legal_moves.clone()
        } else {
            let pseudo =
                MoveGenerator::new(&self.board, colour, self.castling_rights, None).generate();
            filter_legal(&self.board, colour, None, &pseudo)
        }
    }

    /// Moves of the side to move that obey piece movement rules, including those
    /// that would leave its own king attacked.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        MoveGenerator::new(
            &self.board,
            self.side_to_move,
            self.castling_rights,
            self.en_passant,
        )
        .generate()
    }

    /// Checks if a move is currently legal.
    pub fn is_legal_move(&self, mv: Move) -> bool {
        self.legal_moves.contains(&mv)
    }

    /// Plays a move from the legal set.
    ///
    /// Moves outside of the legal set are rejected without changing anything. A pawn
    /// reaching its last rank leaves the turn unfinished until
    /// [`resolve_promotion`](Self::resolve_promotion) is called.
    pub fn apply_move(&mut self, mv: Move) -> MoveOutcome {
        if !self.is_legal_move(mv) {
            log::debug!("rejected {mv}: not a legal move for {}", self.side_to_move);
            return MoveOutcome::Rejected;
        }

        let Some(played) = self.board.play(mv, self.en_passant) else {
            // Legal moves always start from an occupied square.
            return MoveOutcome::Rejected;
        };
        log::trace!("{} played {mv}", self.side_to_move);

        self.castling_rights.touch(mv.from);
        self.castling_rights.touch(mv.to);
        if let Some((_, captured_on)) = played.captured {
            self.castling_rights.touch(captured_on)
        }
        if played.castle.is_some() {
            self.castling_rights.disallow(self.side_to_move)
        }

        self.en_passant = played.skipped;

        if played.piece.0 == PieceKind::Pawn || played.captured.is_some() {
            self.reversible_moves = 0
        } else {
            self.reversible_moves = self.reversible_moves.saturating_add(1)
        }

        if played.promotes {
            let pending = PendingPromotion {
                square: mv.to,
                colour: self.side_to_move,
            };
            self.pending_promotion = Some(pending);
            self.legal_moves.clear();
            return MoveOutcome::AppliedPendingPromotion {
                square: pending.square,
                colour: pending.colour,
            };
        }

        self.advance_turn();
        MoveOutcome::Applied
    }

    /// Replaces the pawn waiting on its last rank by a piece of the chosen kind, then
    /// passes the turn.
    ///
    /// Choosing a king or a pawn is rejected and the promotion stays pending.
    /// # Panics
    /// Panics if no promotion is pending.
    pub fn resolve_promotion(&mut self, kind: PieceKind) -> MoveOutcome {
        let Some(PendingPromotion { square, colour }) = self.pending_promotion else {
            panic!("resolve_promotion called while no promotion is pending")
        };
        if !kind.is_promotion_choice() {
            log::debug!("rejected promotion of {colour} pawn on {square} to {kind:?}");
            return MoveOutcome::Rejected;
        }

        self.board.set(square, Some((kind, colour)));
        self.pending_promotion = None;
        self.advance_turn();
        MoveOutcome::Applied
    }

    fn advance_turn(&mut self) {
        if self.side_to_move.is_black() {
            self.fullmove_number = self.fullmove_number.saturating_add(1)
        }
        self.side_to_move.invert();
        self.halfmove_count += 1;
        self.refresh();
        log::trace!("{} to move, ply {}", self.side_to_move, self.halfmove_count);

        let status = self.status();
        if status.is_checkmate {
            log::info!("{} is checkmated", self.side_to_move)
        } else if status.is_stalemate {
            log::info!("{} is stalemated", self.side_to_move)
        }
    }

    /// Recomputes check and the legal moves of the side to move.
    fn refresh(&mut self) {
        self.in_check = in_check(&self.board, self.side_to_move);
        let pseudo = self.pseudo_legal_moves();
        self.legal_moves = filter_legal(&self.board, self.side_to_move, self.en_passant, &pseudo);
    }
}
impl From<Fen> for Position {
    /// # Panics
    /// Panics if the side to move has no king.
    fn from(fen: Fen) -> Self {
        let mut position = Self {
            board: fen.board,
            side_to_move: fen.side_to_move,
            castling_rights: fen.castling_rights,
            en_passant: fen.en_passant,
            halfmove_count: 0,
            reversible_moves: fen.halfmove_clock,
            fullmove_number: fen.fullmove_counter,
            in_check: false,
            legal_moves: MoveList::new(),
            pending_promotion: None,
        };
        position.refresh();
        position
    }
}
impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, square) in Square::squares_iter().enumerate() {
            if i % 8 == 0 && i != 0 {
                match i / 8 {
                    3 => writeln!(f, "side to move: {}", self.side_to_move),
                    4 => writeln!(f, "ply: {}", self.halfmove_count),
                    5 => writeln!(
                        f,
                        "en passant: {}",
                        if let Some(square) = self.en_passant {
                            square.to_string()
                        } else {
                            "-".to_string()
                        }
                    ),
                    6 => writeln!(f, "castling rights: {}", self.castling_rights),
                    7 => writeln!(f, "in check: {}", self.in_check),
                    _ => writeln!(f),
                }?
            }
            write!(
                f,
                "{} ",
                match self.piece_on(square) {
                    None => '.',
                    Some((kind, colour)) => kind.fen_char(colour),
                }
            )?
        }

        writeln!(f, "\nfen: {}", self.fen())
    }
}
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn mv(s: &str) -> Move {
        Move::parse(s).unwrap()
    }

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn play(position: &mut Position, moves: &[&str]) {
        for m in moves {
            assert_eq!(position.apply_move(mv(m)), MoveOutcome::Applied, "{m}");
        }
    }

    #[test]
    fn fen_round_trip() {
        let mut position = Position::initial();
        assert_eq!(position.fen(), Fen::INITIAL);
        play(&mut position, &["e2e4", "c7c5", "g1f3"]);
        assert_eq!(
            position.fen(),
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
        assert_eq!(position.halfmove_count(), 3);
    }

    #[test]
    fn rejected_moves_change_nothing() {
        let mut position = Position::initial();
        let before = position.clone();
        assert_eq!(position.apply_move(mv("e2e5")), MoveOutcome::Rejected);
        assert_eq!(position.apply_move(mv("e7e5")), MoveOutcome::Rejected);
        assert_eq!(position.apply_move(mv("a3a4")), MoveOutcome::Rejected);
        assert!(position == before);
    }

    #[test]
    fn en_passant_target_lifecycle() {
        let mut position = Position::initial();
        play(&mut position, &["e2e4"]);
        assert_eq!(position.en_passant(), Some(sq("e3")));
        play(&mut position, &["g8f6"]);
        assert_eq!(position.en_passant(), None);
    }

    #[test]
    fn en_passant_capture_removes_the_pawn() {
        let mut position = Position::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
        play(&mut position, &["d7d5", "e5d6"]);
        assert_eq!(position.piece_on(sq("d5")), None);
        assert_eq!(
            position.piece_on(sq("d6")),
            Some((PieceKind::Pawn, Colour::White))
        );
    }

    #[test]
    fn castling_moves_both_pieces_and_clears_rights() {
        let mut position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        play(&mut position, &["e1h1"]);
        assert_eq!(
            position.piece_on(sq("g1")),
            Some((PieceKind::King, Colour::White))
        );
        assert_eq!(
            position.piece_on(sq("f1")),
            Some((PieceKind::Rook, Colour::White))
        );
        assert_eq!(position.castling_rights().to_string(), "kq");

        play(&mut position, &["e8c8"]);
        assert_eq!(
            position.piece_on(sq("d8")),
            Some((PieceKind::Rook, Colour::Black))
        );
        assert!(position.castling_rights().is_none());
    }

    #[test]
    fn capturing_a_rook_at_home_removes_the_right() {
        let mut position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        play(&mut position, &["a1a8"]);
        assert_eq!(position.castling_rights().to_string(), "Kk");
    }

    #[test]
    fn promotion_waits_for_a_choice() {
        let mut position = Position::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        assert_eq!(
            position.apply_move(mv("a7a8")),
            MoveOutcome::AppliedPendingPromotion {
                square: sq("a8"),
                colour: Colour::White
            }
        );
        assert_eq!(position.side_to_move(), Colour::White);
        assert!(position.moves().is_empty());
        assert!(position.legal_moves(Colour::Black).is_empty());
        assert!(!position.status().is_stalemate);
        assert_eq!(position.apply_move(mv("h8h7")), MoveOutcome::Rejected);

        assert_eq!(
            position.resolve_promotion(PieceKind::King),
            MoveOutcome::Rejected
        );
        assert_eq!(
            position.resolve_promotion(PieceKind::Rook),
            MoveOutcome::Applied
        );
        assert_eq!(
            position.piece_on(sq("a8")),
            Some((PieceKind::Rook, Colour::White))
        );
        assert_eq!(position.side_to_move(), Colour::Black);
        assert!(position.status().in_check);
        assert!(position.is_legal_move(mv("h8h7")));
    }

    #[test]
    #[should_panic(expected = "no promotion is pending")]
    fn resolving_without_pending_promotion_fails_loudly() {
        Position::initial().resolve_promotion(PieceKind::Queen);
    }

    #[test]
    fn lenient_load_keeps_what_it_can() {
        let (position, warnings) = Position::load("4k3/8/8/8/8/8/8/4K2R x KZ");
        assert_eq!(warnings.len(), 2);
        assert_eq!(position.side_to_move(), Colour::White);
        assert!(position.castling_rights().kingside_castle_allowed(Colour::White));
        assert!(position.is_legal_move(mv("e1g1")));

        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4K2R x KZ").is_err());
    }

    #[test]
    fn moves_of_the_side_not_to_move() {
        let position = Position::initial();
        assert_eq!(position.legal_moves(Colour::Black).len(), 20);
        assert!(position
            .legal_moves(Colour::Black)
            .contains(&mv("b8c6")));
    }
}
