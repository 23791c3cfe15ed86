//! Colours for each players and their pieces.
//!
//! Ranks are indexed the way a position description lists them: rank 0 is the
//! eighth rank (Black's back rank) and rank 7 is the first rank (White's back rank).
//! White pawns therefore advance towards lower rank indices.

/// Colour enumeration.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum Colour {
    White = 0,
    Black = 1,
}
impl Colour {
    /// Inverts the colour in place.
    /// # Example
    /// ```
    /// # use chess_core::game::colour::Colour;
    /// let mut side_to_move = Colour::White;
    /// side_to_move.invert();
    /// assert_eq!(side_to_move, Colour::Black);
    /// ```
    #[inline]
    pub fn invert(&mut self) {
        *self = self.inverse()
    }

    /// Returns the inverse of this colour.
    /// # Example
    /// ```
    /// # use chess_core::game::colour::Colour;
    /// assert_eq!(Colour::White.inverse(), Colour::Black);
    /// ```
    #[inline]
    pub const fn inverse(&self) -> Self {
        if self.is_black() {
            Colour::White
        } else {
            Colour::Black
        }
    }

    /// Checks if the colour variant is white.
    #[inline]
    pub const fn is_white(&self) -> bool {
        matches!(self, Colour::White)
    }

    /// Checks if the colour variant is black.
    #[inline]
    pub const fn is_black(&self) -> bool {
        matches!(self, Colour::Black)
    }

    /// Rank offset of a single pawn push for this colour.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        if self.is_black() {
            1
        } else {
            -1
        }
    }

    /// Rank on which the pieces of this colour start (king, rooks, ...).
    #[inline]
    pub const fn home_rank(self) -> u8 {
        if self.is_black() {
            0
        } else {
            7
        }
    }

    /// Rank from which pawns of this colour may double push.
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        if self.is_black() {
            1
        } else {
            6
        }
    }

    /// Rank on which pawns of this colour promote.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        self.inverse().home_rank()
    }

    /// Lowercase letter used for this colour in position descriptions.
    pub const fn fen_char(self) -> char {
        if self.is_black() {
            'b'
        } else {
            'w'
        }
    }
}
impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.is_black() { "Black" } else { "White" })
    }
}
impl From<bool> for Colour {
    fn from(value: bool) -> Self {
        if value {
            Self::Black
        } else {
            Self::White
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pawns_walk_towards_promotion() {
        for colour in [Colour::White, Colour::Black] {
            let start = colour.pawn_start_rank() as i8;
            let home = colour.home_rank() as i8;
            assert_eq!(start - home, colour.pawn_direction());
            assert_eq!(
                start + 5 * colour.pawn_direction(),
                colour.promotion_rank() as i8
            );
        }
    }
}
