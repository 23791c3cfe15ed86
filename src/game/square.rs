//! Board coordinates and the directions pieces travel in.
//!
//! A [`Square`] is a `(file, rank)` pair. Files go from 0 (a) to 7 (h). Ranks are
//! indexed top-down in the order a position description lists them, so rank 0 is
//! the eighth rank and rank 7 the first.

use thiserror::Error;

/// A square of the 8x8 board.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}
impl Square {
    /// Instantiates a new square based on file and rank.
    ///
    /// Returns `None` if either coordinate is more than 7.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Returns the file of the square (0 is the a-file).
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the rank of the square (0 is the eighth rank).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Translates this square by a given delta.
    ///
    /// Returns `None` if the translation would go out of the board.
    #[inline]
    pub const fn translate(self, delta: Delta) -> Option<Self> {
        let file = self.file as i8 + delta.file;
        let rank = self.rank as i8 + delta.rank;
        if file < 0 || rank < 0 {
            None
        } else {
            Self::new(file as u8, rank as u8)
        }
    }

    /// Iterator over the squares reached by repeatedly applying `delta`, stopping
    /// at the board edge. The square itself is not included.
    pub fn ray(self, delta: Delta) -> impl Iterator<Item = Square> {
        std::iter::successors(self.translate(delta), move |sq| sq.translate(delta))
    }

    /// An iterator over all squares, ordered rank by rank from the eighth rank
    /// down, files a to h within a rank.
    pub fn squares_iter() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Self { file, rank }))
    }
}
impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, 8 - self.rank)
    }
}

/// Errors that may arise when parsing a square in algebraic form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum SquareParseError {
    #[error("Squares are exactly 2 characters, got {0:?}")]
    BadLength(String),
    #[error("Invalid file {0:?}, expected a-h")]
    InvalidFile(char),
    #[error("Invalid rank {0:?}, expected 1-8")]
    InvalidRank(char),
}

impl std::str::FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareParseError::BadLength(s.to_string()));
        };
        let file_index = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(SquareParseError::InvalidFile(file)),
        };
        let rank_index = match rank {
            '1'..='8' => b'8' - rank as u8,
            _ => return Err(SquareParseError::InvalidRank(rank)),
        };
        Ok(Self {
            file: file_index,
            rank: rank_index,
        })
    }
}

/// Deltas represent directions in which pieces can move.
///
/// "North" points towards the eighth rank, i.e. decreasing rank indices.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Delta {
    pub file: i8,
    pub rank: i8,
}
impl Delta {
    pub const NORTH: Self = Self::new(0, -1);
    pub const SOUTH: Self = Self::new(0, 1);
    pub const EAST: Self = Self::new(1, 0);
    pub const WEST: Self = Self::new(-1, 0);
    pub const NORTH_EAST: Self = Self::new(1, -1);
    pub const NORTH_WEST: Self = Self::new(-1, -1);
    pub const SOUTH_EAST: Self = Self::new(1, 1);
    pub const SOUTH_WEST: Self = Self::new(-1, 1);

    pub const ORTHOGONAL_DELTAS: [Self; 4] = [Self::NORTH, Self::SOUTH, Self::EAST, Self::WEST];
    pub const DIAGONAL_DELTAS: [Self; 4] = [
        Self::NORTH_EAST,
        Self::NORTH_WEST,
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
    ];
    pub const QUEEN_DELTAS: [Self; 8] = [
        Self::NORTH,
        Self::SOUTH,
        Self::EAST,
        Self::WEST,
        Self::NORTH_EAST,
        Self::NORTH_WEST,
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
    ];
    pub const KNIGHT_DELTAS: [Self; 8] = [
        Self::new(1, -2),
        Self::new(-1, -2),
        Self::new(1, 2),
        Self::new(-1, 2),
        Self::new(2, -1),
        Self::new(-2, -1),
        Self::new(2, 1),
        Self::new(-2, 1),
    ];

    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn algebraic_names() {
        let e4: Square = "e4".parse().unwrap();
        assert_eq!((e4.file(), e4.rank()), (4, 4));
        assert_eq!(e4.to_string(), "e4");
        let a8: Square = "a8".parse().unwrap();
        assert_eq!((a8.file(), a8.rank()), (0, 0));
        assert_eq!(Square::new(7, 7).unwrap().to_string(), "h1");

        assert_eq!(
            "i1".parse::<Square>(),
            Err(SquareParseError::InvalidFile('i'))
        );
        assert_eq!(
            "a9".parse::<Square>(),
            Err(SquareParseError::InvalidRank('9'))
        );
        assert!("e".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
    }

    #[test]
    fn translation_stops_at_edges() {
        let h1 = Square::new(7, 7).unwrap();
        assert_eq!(h1.translate(Delta::EAST), None);
        assert_eq!(h1.translate(Delta::SOUTH), None);
        assert_eq!(h1.translate(Delta::NORTH), Square::new(7, 6));
        assert_eq!(h1.ray(Delta::NORTH_WEST).count(), 7);
        assert_eq!(h1.ray(Delta::SOUTH_EAST).count(), 0);
    }

    #[test]
    fn squares_are_listed_in_description_order() {
        let squares: Vec<_> = Square::squares_iter().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0].to_string(), "a8");
        assert_eq!(squares[63].to_string(), "h1");
    }
}
