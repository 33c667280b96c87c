// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The board store. A `Position` knows which piece sits on which square and,
//! in reverse, which squares every piece identity occupies. It knows nothing
//! about the rules of chess; see `movegen` and `legality` for those.
use std::fmt;
use thiserror::Error;

use crate::bitboard::Bitboard;
use crate::types::{Color, Piece, PieceKind, Square, TableIndex, FILES, RANKS};

/// Misuse of the board store's mutators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    Occupied(Square),
    #[error("square {0} is empty")]
    Vacant(Square),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    squares: [Option<Piece>; 64],
    boards_by_piece: [Bitboard; 12],
}

//
// Board state getters
//

impl Position {
    /// Constructs an empty board.
    pub const fn new() -> Position {
        Position {
            squares: [None; 64],
            boards_by_piece: [Bitboard::none(); 12],
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()]
    }

    /// The set of squares occupied by the given piece identity. Every identity
    /// has an entry, which is empty when no such piece is on the board.
    pub fn locations(&self, piece: Piece) -> Bitboard {
        self.boards_by_piece[piece.as_index()]
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.locations(Piece::new(kind, color))
    }

    pub fn pieces(&self, color: Color) -> Bitboard {
        let offset = Piece::new(PieceKind::Pawn, color).as_index();
        self.boards_by_piece[offset..offset + 6]
            .iter()
            .fold(Bitboard::none(), |acc, &board| acc | board)
    }

    pub fn kings(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::King)
    }

    /// Whether the occupancy view and the reverse index agree on every square.
    pub fn is_consistent(&self) -> bool {
        for sq in Square::all() {
            for piece in Piece::all() {
                let indexed = self.locations(piece).test(sq);
                let occupied = self.piece_at(sq) == Some(piece);
                if indexed != occupied {
                    return false;
                }
            }
        }

        true
    }
}

//
// Board manipulation
//

impl Position {
    /// Puts a piece on an empty square.
    pub fn place(&mut self, square: Square, piece: Piece) -> Result<(), BoardError> {
        if self.piece_at(square).is_some() {
            return Err(BoardError::Occupied(square));
        }

        self.squares[square.as_index()] = Some(piece);
        self.boards_by_piece[piece.as_index()].set(square);
        Ok(())
    }

    /// Takes the piece off the given square, returning it.
    pub fn remove(&mut self, square: Square) -> Result<Piece, BoardError> {
        let piece = self
            .piece_at(square)
            .ok_or(BoardError::Vacant(square))?;
        self.squares[square.as_index()] = None;
        self.boards_by_piece[piece.as_index()].unset(square);
        Ok(piece)
    }

    /// Moves the piece on `source` to the empty square `destination`.
    pub fn move_piece(&mut self, source: Square, destination: Square) -> Result<Piece, BoardError> {
        if self.piece_at(destination).is_some() {
            return Err(BoardError::Occupied(destination));
        }

        let piece = self.remove(source)?;
        self.place(destination, piece)?;
        Ok(piece)
    }

    /// Overwrites this board with the contents of another, reusing this
    /// board's storage.
    pub fn replace_with(&mut self, other: &Position) {
        self.squares = other.squares;
        self.boards_by_piece = other.boards_by_piece;
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                let sq = Square::of(rank, file);
                if let Some(piece) = self.piece_at(sq) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}
