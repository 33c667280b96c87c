// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fully resolved moves. Every `Move` carries enough information to apply
//! itself to a `Position` without consulting any other game state, and to
//! decide whether it is the move a piece of algebraic notation describes.
use std::fmt;

use crate::notation::{MoveIntent, MoveTags};
use crate::position::{BoardError, Position};
use crate::types::{Color, File, Piece, PieceKind, Rank, Square, TableIndex};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// A piece moves from one square to another, possibly capturing the
    /// piece on its destination.
    Normal {
        piece: Piece,
        source: Square,
        destination: Square,
        captured: Option<Piece>,
    },
    /// A pawn captures an enemy pawn that just advanced two squares past it.
    /// The captured pawn is not on the destination square.
    EnPassant {
        pawn: Piece,
        source: Square,
        destination: Square,
        captured_square: Square,
    },
    /// A pawn reaches the far rank and is replaced by another piece.
    Promotion {
        pawn: Piece,
        source: Square,
        destination: Square,
        promoted: PieceKind,
        captured: Option<Piece>,
    },
    KingsideCastle {
        color: Color,
    },
    QueensideCastle {
        color: Color,
    },
}

impl Move {
    pub fn source(&self) -> Square {
        match *self {
            Move::Normal { source, .. }
            | Move::EnPassant { source, .. }
            | Move::Promotion { source, .. } => source,
            Move::KingsideCastle { color } => kingside_castle(color).king_source,
            Move::QueensideCastle { color } => queenside_castle(color).king_source,
        }
    }

    pub fn destination(&self) -> Square {
        match *self {
            Move::Normal { destination, .. }
            | Move::EnPassant { destination, .. }
            | Move::Promotion { destination, .. } => destination,
            Move::KingsideCastle { color } => kingside_castle(color).king_destination,
            Move::QueensideCastle { color } => queenside_castle(color).king_destination,
        }
    }

    /// The piece that leaves the source square. For castles this is the king.
    pub fn moving_piece(&self) -> Piece {
        match *self {
            Move::Normal { piece, .. } => piece,
            Move::EnPassant { pawn, .. } | Move::Promotion { pawn, .. } => pawn,
            Move::KingsideCastle { color } | Move::QueensideCastle { color } => {
                Piece::new(PieceKind::King, color)
            }
        }
    }

    pub fn color(&self) -> Color {
        self.moving_piece().color
    }

    pub fn captured_piece(&self) -> Option<Piece> {
        match *self {
            Move::Normal { captured, .. } | Move::Promotion { captured, .. } => captured,
            Move::EnPassant { pawn, .. } => Some(Piece::new(PieceKind::Pawn, pawn.color.toggle())),
            Move::KingsideCastle { .. } | Move::QueensideCastle { .. } => None,
        }
    }

    /// The square the captured piece is removed from, which differs from the
    /// destination for en-passant captures.
    pub fn captured_square(&self) -> Option<Square> {
        match *self {
            Move::EnPassant {
                captured_square, ..
            } => Some(captured_square),
            _ if self.is_capture() => Some(self.destination()),
            _ => None,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured_piece().is_some()
    }

    pub fn is_castle(&self) -> bool {
        match self {
            Move::KingsideCastle { .. } | Move::QueensideCastle { .. } => true,
            _ => false,
        }
    }

    pub fn promotion_piece(&self) -> Option<PieceKind> {
        match *self {
            Move::Promotion { promoted, .. } => Some(promoted),
            _ => None,
        }
    }

    /// If this move advances a pawn two squares, returns the square it
    /// skipped over.
    pub fn double_push_target(&self) -> Option<Square> {
        match *self {
            Move::Normal {
                piece,
                source,
                destination,
                captured: None,
            } if piece.kind == PieceKind::Pawn => {
                let from = source.rank().as_index();
                let to = destination.rank().as_index();
                if from.max(to) - from.min(to) == 2 {
                    Some(Square::of(Rank::from_index((from + to) / 2), source.file()))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Plays this move on the given board.
    pub fn apply(&self, pos: &mut Position) -> Result<(), BoardError> {
        match *self {
            Move::Normal {
                source,
                destination,
                captured,
                ..
            } => {
                if captured.is_some() {
                    pos.remove(destination)?;
                }

                pos.move_piece(source, destination)?;
            }
            Move::EnPassant {
                source,
                destination,
                captured_square,
                ..
            } => {
                pos.remove(captured_square)?;
                pos.move_piece(source, destination)?;
            }
            Move::Promotion {
                pawn,
                source,
                destination,
                promoted,
                captured,
            } => {
                if captured.is_some() {
                    pos.remove(destination)?;
                }

                pos.remove(source)?;
                pos.place(destination, Piece::new(promoted, pawn.color))?;
            }
            Move::KingsideCastle { color } => kingside_castle(color).apply(pos)?,
            Move::QueensideCastle { color } => queenside_castle(color).apply(pos)?,
        }

        Ok(())
    }

    /// Whether this move is one that the given notation could describe.
    /// Fields left unspecified in the notation match anything.
    pub fn matches(&self, intent: &MoveIntent) -> bool {
        match *self {
            Move::Normal {
                piece,
                source,
                destination,
                captured,
            } => {
                intent.tags.contains(MoveTags::NORMAL)
                    && intent.kind == piece.kind
                    && intent.destination == Some(destination)
                    && source_matches(intent, source)
                    && (!intent.tags.contains(MoveTags::CAPTURE) || captured.is_some())
            }
            Move::EnPassant {
                source,
                destination,
                ..
            } => {
                intent.tags.contains(MoveTags::CAPTURE)
                    && intent.kind == PieceKind::Pawn
                    && intent.source_file == Some(source.file())
                    && intent.destination == Some(destination)
            }
            Move::Promotion {
                source,
                destination,
                promoted,
                captured,
                ..
            } => {
                intent.tags.contains(MoveTags::PROMOTION)
                    && intent.promotion == Some(promoted)
                    && intent.kind == PieceKind::Pawn
                    && intent.destination == Some(destination)
                    && source_matches(intent, source)
                    && (!intent.tags.contains(MoveTags::CAPTURE) || captured.is_some())
            }
            Move::KingsideCastle { .. } => intent.tags.contains(MoveTags::KINGSIDE_CASTLE),
            Move::QueensideCastle { .. } => intent.tags.contains(MoveTags::QUEENSIDE_CASTLE),
        }
    }
}

fn source_matches(intent: &MoveIntent, source: Square) -> bool {
    intent.source_file.map_or(true, |file| file == source.file())
        && intent.source_rank.map_or(true, |rank| rank == source.rank())
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source(), self.destination())?;
        if let Some(kind) = self.promotion_piece() {
            write!(f, "{}", kind)?;
        }

        Ok(())
    }
}

/// The fixed squares involved in one castle.
#[derive(Clone, Debug)]
pub struct CastleGeometry {
    pub king_source: Square,
    pub king_destination: Square,
    pub rook_source: Square,
    pub rook_destination: Square,
    /// Squares strictly between the king and the rook.
    pub must_be_empty: Vec<Square>,
    /// The king's square and every square it crosses.
    pub must_be_safe: Vec<Square>,
}

impl CastleGeometry {
    fn new(color: Color, king_to: File, rook_from: File, rook_to: File) -> CastleGeometry {
        let rank = color.back_rank();
        let on_rank = |file: File| Square::of(rank, file);
        let span = |a: File, b: File| -> Vec<Square> {
            let (lo, hi) = (a.as_index().min(b.as_index()), a.as_index().max(b.as_index()));
            (lo..=hi).map(|f| on_rank(File::from_index(f))).collect()
        };

        let rook_side_neighbor = if rook_from == File::H {
            File::G
        } else {
            File::B
        };

        let king_step = if rook_from == File::H {
            File::F
        } else {
            File::D
        };

        CastleGeometry {
            king_source: on_rank(File::E),
            king_destination: on_rank(king_to),
            rook_source: on_rank(rook_from),
            rook_destination: on_rank(rook_to),
            must_be_empty: span(king_step, rook_side_neighbor),
            must_be_safe: span(File::E, king_to),
        }
    }

    fn apply(&self, pos: &mut Position) -> Result<(), BoardError> {
        pos.move_piece(self.king_source, self.king_destination)?;
        pos.move_piece(self.rook_source, self.rook_destination)?;
        Ok(())
    }
}

lazy_static! {
    static ref CASTLES: [[CastleGeometry; 2]; 2] = {
        let for_color = |color| {
            [
                CastleGeometry::new(color, File::G, File::H, File::F),
                CastleGeometry::new(color, File::C, File::A, File::D),
            ]
        };

        [for_color(Color::White), for_color(Color::Black)]
    };
}

pub fn kingside_castle(color: Color) -> &'static CastleGeometry {
    &CASTLES[color.as_index()][0]
}

pub fn queenside_castle(color: Color) -> &'static CastleGeometry {
    &CASTLES[color.as_index()][1]
}
