//! # Chess core
//! A chess position and legal-move engine.
//!
//! It loads positions from FEN strings, generates the legal moves of either side,
//! plays moves (castling, en passant and promotion included) and reports check,
//! checkmate and stalemate. Rendering, input handling and engine play are left to
//! the caller.
//!
//! ```
//! # use chess_core::game::{action::{Move, MoveOutcome}, position::Position};
//! let mut position = Position::initial();
//! assert_eq!(position.moves().len(), 20);
//! let e4 = Move::parse("e2e4").unwrap();
//! assert_eq!(position.apply_move(e4), MoveOutcome::Applied);
//! ```

pub mod game;
