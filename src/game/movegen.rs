//! Pseudo-legal move generation.
//!
//! Moves produced here follow each piece's movement rules and board occupancy,
//! but may leave the mover's own king in check. See [`legality`](super::legality)
//! for the filtering step.

use super::{
    action::Move,
    attacks::is_attacked,
    board::Board,
    castling_rights::{CastleSide, CastlingRights, KING_HOME_FILE},
    colour::Colour,
    piece::PieceKind,
    square::{Delta, Square},
};

/// List of moves. Large enough for any position reachable in a game.
pub type MoveList = heapless::Vec<Move, 256>;

/// Context needed to generate moves for one side.
#[derive(Clone, Copy, Debug)]
pub struct MoveGenerator<'a> {
    board: &'a Board,
    colour: Colour,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
}
impl<'a> MoveGenerator<'a> {
    pub fn new(
        board: &'a Board,
        colour: Colour,
        castling_rights: CastlingRights,
        en_passant: Option<Square>,
    ) -> Self {
        Self {
            board,
            colour,
            castling_rights,
            en_passant,
        }
    }

    /// Generates every pseudo-legal move of the side.
    pub fn generate(&self) -> MoveList {
        let mut moves = MoveList::new();
        for (origin, (kind, colour)) in self.board.pieces() {
            if colour != self.colour {
                continue;
            }
            match kind {
                PieceKind::Pawn => self.generate_pawn_moves(&mut moves, origin),
                PieceKind::Knight => {
                    self.generate_leaper_moves(&mut moves, origin, &Delta::KNIGHT_DELTAS)
                }
                PieceKind::Bishop => {
                    self.generate_slider_moves(&mut moves, origin, &Delta::DIAGONAL_DELTAS)
                }
                PieceKind::Rook => {
                    self.generate_slider_moves(&mut moves, origin, &Delta::ORTHOGONAL_DELTAS)
                }
                PieceKind::Queen => {
                    self.generate_slider_moves(&mut moves, origin, &Delta::QUEEN_DELTAS)
                }
                PieceKind::King => {
                    self.generate_leaper_moves(&mut moves, origin, &Delta::QUEEN_DELTAS);
                    self.generate_castles(&mut moves, origin);
                }
            }
        }
        moves
    }

    /// Empty squares and squares held by the opponent can be moved to.
    #[inline]
    fn can_land_on(&self, square: Square) -> bool {
        self.board
            .piece_on(square)
            .map_or(true, |(_, colour)| colour != self.colour)
    }

    fn generate_pawn_moves(&self, moves: &mut MoveList, origin: Square) {
        let direction = self.colour.pawn_direction();

        if let Some(single) = origin.translate(Delta::new(0, direction)) {
            if self.board.piece_on(single).is_none() {
                push(moves, Move::new(origin, single));

                if origin.rank() == self.colour.pawn_start_rank() {
                    if let Some(double) = single.translate(Delta::new(0, direction)) {
                        if self.board.piece_on(double).is_none() {
                            push(moves, Move::new(origin, double));
                        }
                    }
                }
            }
        }

        for side in [-1, 1] {
            let Some(target) = origin.translate(Delta::new(side, direction)) else {
                continue;
            };
            match self.board.piece_on(target) {
                Some((_, colour)) if colour != self.colour => {
                    push(moves, Move::new(origin, target))
                }
                None if Some(target) == self.en_passant
                    && self.en_passant_capturable(origin, target) =>
                {
                    push(moves, Move::new(origin, target))
                }
                _ => (),
            }
        }
    }

    /// An en passant capture needs an enemy pawn sitting behind the target square,
    /// level with the capturing pawn.
    fn en_passant_capturable(&self, origin: Square, target: Square) -> bool {
        Square::new(target.file(), origin.rank()).is_some_and(|behind| {
            self.board
                .holds(behind, PieceKind::Pawn, self.colour.inverse())
        })
    }

    fn generate_leaper_moves(&self, moves: &mut MoveList, origin: Square, deltas: &[Delta]) {
        for target in deltas.iter().filter_map(|&delta| origin.translate(delta)) {
            if self.can_land_on(target) {
                push(moves, Move::new(origin, target))
            }
        }
    }

    fn generate_slider_moves(&self, moves: &mut MoveList, origin: Square, deltas: &[Delta]) {
        for &delta in deltas {
            for target in origin.ray(delta) {
                match self.board.piece_on(target) {
                    None => push(moves, Move::new(origin, target)),
                    Some((_, colour)) => {
                        if colour != self.colour {
                            push(moves, Move::new(origin, target))
                        }
                        break;
                    }
                }
            }
        }
    }

    /// Castles are offered twice: with the king landing two files away, and with
    /// the king moving three files in the same direction. Both play the same castle.
    /// Safety of the transit and landing squares is left to the legality filter.
    fn generate_castles(&self, moves: &mut MoveList, origin: Square) {
        let home_rank = self.colour.home_rank();
        if origin.rank() != home_rank || origin.file() != KING_HOME_FILE {
            return;
        }
        let sides = [CastleSide::King, CastleSide::Queen];
        if !sides
            .iter()
            .any(|&side| self.castling_rights.allowed(side, self.colour))
        {
            return;
        }
        if is_attacked(self.board, origin, self.colour.inverse()) {
            return;
        }

        for side in sides {
            if !self.castling_rights.allowed(side, self.colour) {
                continue;
            }
            let rook_file = side.rook_origin_file();
            let rook_in_place = side
                .rook_origin(self.colour)
                .is_some_and(|sq| self.board.holds(sq, PieceKind::Rook, self.colour));
            let path_clear = (rook_file.min(KING_HOME_FILE) + 1..rook_file.max(KING_HOME_FILE))
                .filter_map(|file| Square::new(file, home_rank))
                .all(|sq| self.board.piece_on(sq).is_none());
            if !rook_in_place || !path_clear {
                continue;
            }

            let (two, three) = match side {
                CastleSide::King => (KING_HOME_FILE + 2, KING_HOME_FILE + 3),
                CastleSide::Queen => (KING_HOME_FILE - 2, KING_HOME_FILE - 3),
            };
            for file in [two, three] {
                if let Some(target) = Square::new(file, home_rank) {
                    push(moves, Move::new(origin, target))
                }
            }
        }
    }
}

#[inline]
fn push(moves: &mut MoveList, mv: Move) {
    if moves.push(mv).is_err() {
        log::error!("move list is full, dropping {mv}")
    }
}
