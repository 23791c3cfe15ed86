//! # FEN string utilities
//!
//! Position descriptions are read on a best-effort basis: every problem found is
//! recorded as a [`ParseWarning`] and parsing carries on with the rest of the
//! string. [`Fen::parse_lenient`] hands back whatever could be read along with the
//! warnings, while [`Fen::parse`] refuses descriptions that raised any.
//!
//! No legality checking is done on the result: a description without kings, or
//! with the side not to move in check, loads just fine.

use thiserror::Error;

use super::{
    board::Board,
    castling_rights::{CastleSide, CastlingRights},
    colour::Colour,
    piece::PieceKind,
    square::Square,
};

/// Problems found while reading a position description. None of them stop parsing.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Error)]
pub enum ParseWarning {
    #[error("Skipping {skip} squares runs past the h-file in row {row}")]
    DigitOverflow { row: u8, skip: u8 },
    #[error("Empty square run `0` in row {row}")]
    EmptyRun { row: u8 },
    #[error("Unknown piece symbol {symbol:?} at file {file} of row {row}")]
    UnknownPiece { row: u8, file: u8, symbol: char },
    #[error("Piece {symbol:?} placed past the h-file in row {row}")]
    FileOverflow { row: u8, symbol: char },
    #[error("The piece section defines more than 8 rows")]
    TooManyRanks,
    #[error("Missing piece placement section")]
    MissingPlacement,
    #[error("Invalid side to move {0:?}, expected `w` or `b`")]
    InvalidActiveColour(String),
    #[error("Missing side to move section")]
    MissingActiveColour,
    #[error("Invalid castling right {0:?}")]
    InvalidCastling(char),
    #[error("Invalid en passant square {0:?}")]
    InvalidEnPassant(String),
    #[error("Invalid move counter {0:?}")]
    InvalidCounter(String),
}

/// FEN parsing errors.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Error)]
pub enum FenError {
    #[error("Invalid position description: {}", list_warnings(.0))]
    Warnings(Vec<ParseWarning>),
}

fn list_warnings(warnings: &[ParseWarning]) -> String {
    warnings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Every field of a position description, as read.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Fen {
    pub board: Board,
    pub side_to_move: Colour,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_counter: u16,
}
impl Default for Fen {
    /// An empty board, white to move, no castling rights.
    fn default() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Colour::White,
            castling_rights: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_counter: 1,
        }
    }
}
impl Fen {
    /// Description of the initial position of chess.
    pub const INITIAL: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string, failing if anything in it is malformed.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        fen.parse()
    }

    /// Parses a FEN string, returning the best-effort result and the list of
    /// problems encountered.
    pub fn parse_lenient(fen: &str) -> (Self, Vec<ParseWarning>) {
        let mut parsed = Self::default();
        let mut warnings = vec![];
        let mut sections = fen.split_ascii_whitespace();

        match sections.next() {
            Some(placement) => parsed.board = parse_placement(placement, &mut warnings),
            None => warnings.push(ParseWarning::MissingPlacement),
        }

        match sections.next() {
            Some("w") => parsed.side_to_move = Colour::White,
            Some("b") => parsed.side_to_move = Colour::Black,
            Some(other) => warnings.push(ParseWarning::InvalidActiveColour(other.to_string())),
            None => warnings.push(ParseWarning::MissingActiveColour),
        }

        if let Some(castling) = sections.next() {
            for c in castling.chars() {
                match c {
                    'K' => parsed.castling_rights.allow(CastleSide::King, Colour::White),
                    'Q' => parsed.castling_rights.allow(CastleSide::Queen, Colour::White),
                    'k' => parsed.castling_rights.allow(CastleSide::King, Colour::Black),
                    'q' => parsed.castling_rights.allow(CastleSide::Queen, Colour::Black),
                    '-' => (),
                    c => warnings.push(ParseWarning::InvalidCastling(c)),
                }
            }
        }

        match sections.next() {
            None | Some("-") => (),
            Some(s) => match s.parse::<Square>() {
                Ok(square) => parsed.en_passant = Some(square),
                Err(_) => warnings.push(ParseWarning::InvalidEnPassant(s.to_string())),
            },
        }

        if let Some(s) = sections.next() {
            match s.parse() {
                Ok(clock) => parsed.halfmove_clock = clock,
                Err(_) => warnings.push(ParseWarning::InvalidCounter(s.to_string())),
            }
        }
        if let Some(s) = sections.next() {
            match s.parse() {
                Ok(counter) => parsed.fullmove_counter = counter,
                Err(_) => warnings.push(ParseWarning::InvalidCounter(s.to_string())),
            }
        }

        (parsed, warnings)
    }
}

/// Walks the piece placement section left to right, top row first.
fn parse_placement(placement: &str, warnings: &mut Vec<ParseWarning>) -> Board {
    let mut board = Board::empty();
    let mut file = 0u8;
    let mut row = 0u8;

    for c in placement.chars() {
        match c {
            '/' => {
                file = 0;
                row = row.saturating_add(1);
                if row == 8 {
                    warnings.push(ParseWarning::TooManyRanks)
                }
            }
            digit if digit.is_ascii_digit() => {
                let skip = digit as u8 - b'0';
                if skip == 0 {
                    warnings.push(ParseWarning::EmptyRun { row })
                } else if file.saturating_add(skip) > 8 {
                    warnings.push(ParseWarning::DigitOverflow { row, skip });
                    file = 8
                } else {
                    file += skip
                }
            }
            symbol => {
                match PieceKind::from_fen_char(symbol) {
                    Some(piece) => match Square::new(file, row) {
                        Some(square) => {
                            board.set(square, Some(piece));
                        }
                        // Rows past the eighth were already reported.
                        None if row >= 8 => (),
                        None => warnings.push(ParseWarning::FileOverflow { row, symbol }),
                    },
                    None => warnings.push(ParseWarning::UnknownPiece { row, file, symbol }),
                }
                file = file.saturating_add(1)
            }
        }
    }

    board
}

impl std::str::FromStr for Fen {
    type Err = FenError;

    fn from_str(fen_str: &str) -> Result<Self, Self::Err> {
        match Self::parse_lenient(fen_str) {
            (fen, warnings) if warnings.is_empty() => Ok(fen),
            (_, warnings) => Err(FenError::Warnings(warnings)),
        }
    }
}
impl std::fmt::Display for Fen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
impl std::fmt::Debug for Fen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Pieces
        for row in 0..8u8 {
            let mut skip = 0;
            for file in 0..8u8 {
                match Square::new(file, row).and_then(|sq| self.board.piece_on(sq)) {
                    Some((kind, colour)) => {
                        if skip != 0 {
                            write!(f, "{skip}")?;
                            skip = 0
                        }
                        write!(f, "{}", kind.fen_char(colour))?
                    }
                    None => skip += 1,
                }
            }
            if skip != 0 {
                write!(f, "{skip}")?
            }
            if row != 7 {
                write!(f, "/")?
            }
        }

        write!(
            f,
            " {} {} {} {} {}",
            self.side_to_move.fen_char(),
            self.castling_rights,
            if let Some(ep) = self.en_passant {
                ep.to_string()
            } else {
                String::from("-")
            },
            self.halfmove_clock,
            self.fullmove_counter
        )
    }
}
