//! # Chess API
//! This module contains everything Chess related: the board state, position
//! loading, move generation, legality and turn control.

pub mod action;
pub mod attacks;
pub mod board;
pub mod castling_rights;
pub mod colour;
pub mod fen;
pub mod legality;
pub mod movegen;
#[cfg(feature = "perft")]
pub mod perft;
pub mod piece;
pub mod position;
pub mod square;
