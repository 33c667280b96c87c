// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! blitz is a chess rules engine. It produces the legal moves of a position,
//! resolves moves written in standard algebraic notation against them and
//! keeps the surrounding game state (turn, castling rights, en-passant
//! target, check and mate) up to date.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate pest_derive;

pub mod attacks;
mod bitboard;
pub mod fen;
mod game;
pub mod legality;
pub mod movegen;
mod moves;
pub mod notation;
mod perft;
pub mod pgn;
mod position;
mod result;
mod types;

pub use bitboard::{Bitboard, BitboardIterator};
pub use fen::{FenParseError, FenRecord, START_POSITION_FEN};
pub use game::{Game, CHECKMATE_WARNING, STALEMATE_WARNING};
pub use movegen::MoveVec;
pub use moves::{CastleGeometry, Move};
pub use notation::{MoveIntent, MoveTags, NotationParseError};
pub use perft::perft;
pub use pgn::{PgnError, PgnGame};
pub use position::{BoardError, Position};
pub use result::MoveResult;
pub use types::{CastleStatus, Color, Direction, File, Piece, PieceKind, Rank, Square};
