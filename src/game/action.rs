//! # Actions (or moves)

use thiserror::Error;

use super::{
    colour::Colour,
    piece::PieceKind,
    square::{Square, SquareParseError},
};

/// Describes a move using a from-to approach.
///
/// Whether a move is a castle, an en passant capture or a promotion is not stored:
/// it is derived from the board when the move is played.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}
impl Move {
    /// Creates a new move.
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Creates a move from raw coordinates (file, rank of the start square, then
    /// file, rank of the target square).
    ///
    /// Returns `None` if any coordinate is off the board.
    pub const fn from_coords(
        start_file: u8,
        start_rank: u8,
        target_file: u8,
        target_rank: u8,
    ) -> Option<Self> {
        match (
            Square::new(start_file, start_rank),
            Square::new(target_file, target_rank),
        ) {
            (Some(from), Some(to)) => Some(Self { from, to }),
            _ => None,
        }
    }

    /// Parses a move in coordinate notation such as `e2e4`.
    pub fn parse(s: &str) -> Result<Self, MoveParseError> {
        s.parse()
    }
}
impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Errors that may arise when parsing coordinate notation moves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum MoveParseError {
    #[error("Invalid origin square: {0}")]
    InvalidOriginSquare(SquareParseError),
    #[error("Invalid target square: {0}")]
    InvalidTargetSquare(SquareParseError),
    #[error("Cannot promote to {0:?}")]
    InvalidPromotion(char),
    #[error("Moves are 4 or 5 characters, got {0}")]
    BadLength(usize),
}

impl std::str::FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<PcnMove>()? {
            PcnMove {
                mv,
                promoting_to: None,
            } => Ok(mv),
            _ => Err(MoveParseError::BadLength(s.len())),
        }
    }
}

/// Pure coordinate notation move with an optional promotion choice, as typed by a
/// user: `e2e4`, `a7a8q`.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub struct PcnMove {
    pub mv: Move,
    pub promoting_to: Option<PieceKind>,
}
impl std::fmt::Display for PcnMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mv)?;
        if let Some(kind) = self.promoting_to {
            write!(f, "{kind}")?
        }
        Ok(())
    }
}
impl std::str::FromStr for PcnMove {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(MoveParseError::BadLength(s.chars().count()));
        }
        let from = s[0..2]
            .parse()
            .map_err(MoveParseError::InvalidOriginSquare)?;
        let to = s[2..4]
            .parse()
            .map_err(MoveParseError::InvalidTargetSquare)?;
        let promoting_to = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_fen_char(c) {
                Some((kind, _)) if kind.is_promotion_choice() => Some(kind),
                _ => return Err(MoveParseError::InvalidPromotion(c)),
            },
        };

        Ok(Self {
            mv: Move::new(from, to),
            promoting_to,
        })
    }
}

/// Result of submitting a move or a promotion choice to a [`Position`](super::position::Position).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub enum MoveOutcome {
    /// The move was played and the turn passed to the other side.
    Applied,
    /// A pawn reached its last rank on `square`; a promotion choice must be supplied
    /// before the turn passes.
    AppliedPendingPromotion { square: Square, colour: Colour },
    /// The move (or promotion choice) was not legal. Nothing changed.
    Rejected,
}
impl MoveOutcome {
    /// Returns `true` unless the move was rejected.
    pub fn is_applied(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coordinate_notation() {
        let mv = Move::parse("e2e4").unwrap();
        assert_eq!(mv, Move::from_coords(4, 6, 4, 4).unwrap());
        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(Move::from_coords(8, 0, 0, 0), None);

        assert!(matches!(
            Move::parse("z2e4"),
            Err(MoveParseError::InvalidOriginSquare(_))
        ));
        assert!(matches!(
            Move::parse("e2e9"),
            Err(MoveParseError::InvalidTargetSquare(_))
        ));
        assert_eq!(Move::parse("e2"), Err(MoveParseError::BadLength(2)));
    }

    #[test]
    fn promotion_suffix() {
        let pcn: PcnMove = "a7a8n".parse().unwrap();
        assert_eq!(pcn.promoting_to, Some(PieceKind::Knight));
        assert_eq!(pcn.to_string(), "a7a8n");
        assert_eq!(
            "a7a8k".parse::<PcnMove>(),
            Err(MoveParseError::InvalidPromotion('k'))
        );
        assert!(Move::parse("a7a8q").is_err());
    }
}
