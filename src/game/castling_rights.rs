//! # Representation of castling rights

use super::{colour::Colour, square::Square};

/// The wing a king castles towards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CastleSide {
    King,
    Queen,
}
impl CastleSide {
    /// File the rook starts on.
    pub const fn rook_origin_file(self) -> u8 {
        match self {
            Self::King => 7,
            Self::Queen => 0,
        }
    }

    /// File the rook lands on.
    pub const fn rook_target_file(self) -> u8 {
        match self {
            Self::King => 5,
            Self::Queen => 3,
        }
    }

    /// File the king lands on.
    pub const fn king_target_file(self) -> u8 {
        match self {
            Self::King => 6,
            Self::Queen => 2,
        }
    }

    /// File the king passes over; it must not be attacked.
    pub const fn king_transit_file(self) -> u8 {
        self.rook_target_file()
    }

    /// Which side a king move from `from_file` to `to_file` castles towards, if the
    /// move is a castle at all (the king travels two files or more).
    pub const fn from_king_move(from_file: u8, to_file: u8) -> Option<Self> {
        if to_file >= from_file + 2 {
            Some(Self::King)
        } else if from_file >= to_file + 2 {
            Some(Self::Queen)
        } else {
            None
        }
    }

    /// Square the rook of `colour` starts on for this wing.
    pub fn rook_origin(self, colour: Colour) -> Option<Square> {
        Square::new(self.rook_origin_file(), colour.home_rank())
    }
}

/// File both kings start on.
pub const KING_HOME_FILE: u8 = 4;

/// Four independent castling permissions, packed in a byte.
///
/// Rights are only ever removed while a game is played.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CastlingRights(u8);
impl CastlingRights {
    const KINGSIDE_BLACK: u8 = 0b0001;
    const QUEENSIDE_BLACK: u8 = 0b0010;
    const KINGSIDE_WHITE: u8 = 0b0100;
    const QUEENSIDE_WHITE: u8 = 0b1000;
    const FULL: u8 =
        Self::KINGSIDE_BLACK | Self::KINGSIDE_WHITE | Self::QUEENSIDE_BLACK | Self::QUEENSIDE_WHITE;
    const EMPTY: u8 = 0;

    /// Full castling rights for both sides.
    pub const fn full() -> Self {
        Self(Self::FULL)
    }

    /// No castling rights for any sides.
    pub const fn none() -> Self {
        Self(Self::EMPTY)
    }

    /// Returns `true` if none of the sides can castle.
    pub const fn is_none(self) -> bool {
        self.0 == Self::EMPTY
    }

    const fn mask(side: CastleSide, colour: Colour) -> u8 {
        match (side, colour) {
            (CastleSide::King, Colour::White) => Self::KINGSIDE_WHITE,
            (CastleSide::Queen, Colour::White) => Self::QUEENSIDE_WHITE,
            (CastleSide::King, Colour::Black) => Self::KINGSIDE_BLACK,
            (CastleSide::Queen, Colour::Black) => Self::QUEENSIDE_BLACK,
        }
    }

    /// Checks if castling towards `side` is still allowed for `colour`.
    #[inline(always)]
    pub const fn allowed(self, side: CastleSide, colour: Colour) -> bool {
        self.0 & Self::mask(side, colour) != 0
    }

    /// Checks if kingside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn kingside_castle_allowed(self, colour: Colour) -> bool {
        self.allowed(CastleSide::King, colour)
    }

    /// Checks if queenside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn queenside_castle_allowed(self, colour: Colour) -> bool {
        self.allowed(CastleSide::Queen, colour)
    }

    /// Grants castling towards `side` for `colour`. Only used while loading a position.
    pub(crate) fn allow(&mut self, side: CastleSide, colour: Colour) {
        self.0 |= Self::mask(side, colour)
    }

    /// Removes castling towards `side` for `colour`.
    #[inline(always)]
    pub fn disallow_side(&mut self, side: CastleSide, colour: Colour) {
        self.0 &= !Self::mask(side, colour)
    }

    /// Disallows both castling moves for a given side.
    pub fn disallow(&mut self, colour: Colour) {
        self.disallow_side(CastleSide::King, colour);
        self.disallow_side(CastleSide::Queen, colour);
    }

    /// Removes the rights tied to a king or rook home square, if `square` is one.
    ///
    /// Called for both the origin and target of every move so that moving a king or
    /// rook, or capturing a rook on its home square, forfeits the matching right.
    pub fn touch(&mut self, square: Square) {
        for colour in [Colour::White, Colour::Black] {
            if square.rank() != colour.home_rank() {
                continue;
            }
            match square.file() {
                KING_HOME_FILE => self.disallow(colour),
                f if f == CastleSide::King.rook_origin_file() => {
                    self.disallow_side(CastleSide::King, colour)
                }
                f if f == CastleSide::Queen.rook_origin_file() => {
                    self.disallow_side(CastleSide::Queen, colour)
                }
                _ => (),
            }
        }
    }

    /// Checks that every right set in `self` is also set in `other`.
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }
}
impl std::fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return write!(f, "-");
        }

        if self.kingside_castle_allowed(Colour::White) {
            write!(f, "K")?
        }
        if self.queenside_castle_allowed(Colour::White) {
            write!(f, "Q")?
        }
        if self.kingside_castle_allowed(Colour::Black) {
            write!(f, "k")?
        }
        if self.queenside_castle_allowed(Colour::Black) {
            write!(f, "q")?
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn square(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn display_lists_rights_in_order() {
        assert_eq!(CastlingRights::full().to_string(), "KQkq");
        assert_eq!(CastlingRights::none().to_string(), "-");

        let mut rights = CastlingRights::full();
        rights.disallow(Colour::White);
        rights.disallow_side(CastleSide::King, Colour::Black);
        assert_eq!(rights.to_string(), "q");
    }

    #[test]
    fn touching_home_squares_removes_rights() {
        let mut rights = CastlingRights::full();
        rights.touch(square("h1"));
        assert_eq!(rights.to_string(), "Qkq");
        rights.touch(square("e4"));
        assert_eq!(rights.to_string(), "Qkq");
        rights.touch(square("e8"));
        assert_eq!(rights.to_string(), "Q");
        rights.touch(square("a1"));
        assert!(rights.is_none());
    }

    #[test]
    fn subset_relation() {
        let mut rights = CastlingRights::full();
        rights.disallow(Colour::Black);
        assert!(rights.is_subset_of(CastlingRights::full()));
        assert!(!CastlingRights::full().is_subset_of(rights));
        assert!(CastlingRights::none().is_subset_of(rights));
    }

    #[test]
    fn castle_geometry() {
        assert_eq!(CastleSide::from_king_move(4, 6), Some(CastleSide::King));
        assert_eq!(CastleSide::from_king_move(4, 7), Some(CastleSide::King));
        assert_eq!(CastleSide::from_king_move(4, 2), Some(CastleSide::Queen));
        assert_eq!(CastleSide::from_king_move(4, 1), Some(CastleSide::Queen));
        assert_eq!(CastleSide::from_king_move(4, 5), None);
        assert_eq!(
            CastleSide::Queen.rook_origin(Colour::Black),
            Some(square("a8"))
        );
    }
}
