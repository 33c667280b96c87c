// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal move generation. The moves produced here obey the movement
//! rules of each piece but may leave the mover's own king in check; the
//! `legality` module filters those out.
//!
//! Every routine is a pure function of its arguments, so it is safe to run
//! against scratch or hypothetical boards.
use crate::attacks;
use crate::moves::{self, CastleGeometry, Move};
use crate::position::Position;
use crate::types::{CastleStatus, Color, Direction, Piece, PieceKind, Square};
use crate::types::{
    ALL_DIRECTIONS, CARDINAL_DIRECTIONS, INTERCARDINAL_DIRECTIONS, KNIGHT_DIRECTIONS,
    PROMOTION_KINDS,
};

pub type MoveVec = Vec<Move>;

/// Generates every pseudo-legal move for the given color.
pub fn generate_moves(
    color: Color,
    pos: &Position,
    en_passant: Option<Square>,
    castles: CastleStatus,
    moves: &mut MoveVec,
) {
    generate_pawn_moves(color, pos, en_passant, moves);
    for &kind in &[
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ] {
        let piece = Piece::new(kind, color);
        for square in pos.locations(piece) {
            generate_piece_moves(piece, square, pos, moves);
        }
    }

    generate_castling_moves(color, pos, castles, moves);
}

/// Generates the moves of the single piece standing on `source`. Pawns
/// handled here never capture en passant.
pub fn generate_piece_moves(piece: Piece, source: Square, pos: &Position, moves: &mut MoveVec) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves_from(piece, source, pos, None, moves),
        PieceKind::Knight => generate_stepping_moves(piece, source, &KNIGHT_DIRECTIONS, pos, moves),
        PieceKind::Bishop => {
            generate_sliding_moves(piece, source, &INTERCARDINAL_DIRECTIONS, pos, moves)
        }
        PieceKind::Rook => generate_sliding_moves(piece, source, &CARDINAL_DIRECTIONS, pos, moves),
        PieceKind::Queen => generate_sliding_moves(piece, source, &ALL_DIRECTIONS, pos, moves),
        PieceKind::King => generate_stepping_moves(piece, source, &ALL_DIRECTIONS, pos, moves),
    }
}

/// Walks each ray until it leaves the board, hits a friendly piece, or
/// captures an enemy one.
pub fn generate_sliding_moves(
    piece: Piece,
    source: Square,
    directions: &[Direction],
    pos: &Position,
    moves: &mut MoveVec,
) {
    for &dir in directions {
        let mut cursor = source.towards(dir);
        while let Some(destination) = cursor {
            let occupant = pos.piece_at(destination);
            match occupant {
                Some(other) if other.color == piece.color => break,
                _ => moves.push(Move::Normal {
                    piece,
                    source,
                    destination,
                    captured: occupant,
                }),
            }

            if occupant.is_some() {
                break;
            }

            cursor = destination.towards(dir);
        }
    }
}

/// Takes a single step in each direction, onto empty or enemy squares.
pub fn generate_stepping_moves(
    piece: Piece,
    source: Square,
    directions: &[Direction],
    pos: &Position,
    moves: &mut MoveVec,
) {
    for destination in directions.iter().filter_map(|&dir| source.towards(dir)) {
        let occupant = pos.piece_at(destination);
        if occupant.map_or(false, |other| other.color == piece.color) {
            continue;
        }

        moves.push(Move::Normal {
            piece,
            source,
            destination,
            captured: occupant,
        });
    }
}

pub fn generate_pawn_moves(
    color: Color,
    pos: &Position,
    en_passant: Option<Square>,
    moves: &mut MoveVec,
) {
    let pawn = Piece::new(PieceKind::Pawn, color);
    for source in pos.locations(pawn) {
        generate_pawn_moves_from(pawn, source, pos, en_passant, moves);
    }
}

/// The two squares a pawn of the given color on `source` captures onto,
/// whether or not anything stands there.
pub fn pawn_capture_targets(color: Color, source: Square) -> impl Iterator<Item = Square> {
    color
        .pawn_capture_directions()
        .iter()
        .filter_map(move |&dir| source.towards(dir))
}

fn generate_pawn_moves_from(
    pawn: Piece,
    source: Square,
    pos: &Position,
    en_passant: Option<Square>,
    moves: &mut MoveVec,
) {
    let color = pawn.color;
    let forward = color.pawn_push_direction();
    let backward = color.toggle().pawn_push_direction();
    let enemy_pawn = Piece::new(PieceKind::Pawn, color.toggle());

    for destination in pawn_capture_targets(color, source) {
        let occupant = pos.piece_at(destination);
        if en_passant == Some(destination) && occupant.is_none() {
            // The captured pawn sits behind the target square, where it
            // landed after its double push.
            if let Some(captured_square) = destination.towards(backward) {
                if pos.piece_at(captured_square) == Some(enemy_pawn) {
                    moves.push(Move::EnPassant {
                        pawn,
                        source,
                        destination,
                        captured_square,
                    });
                }
            }

            continue;
        }

        match occupant {
            Some(other) if other.color != color => {
                push_pawn_move(pawn, source, destination, Some(other), moves)
            }
            _ => {}
        }
    }

    let single = match source.towards(forward) {
        Some(sq) if pos.piece_at(sq).is_none() => sq,
        _ => return,
    };

    push_pawn_move(pawn, source, single, None, moves);
    if source.rank() != color.pawn_home_rank() {
        return;
    }

    if let Some(double) = single.towards(forward) {
        if pos.piece_at(double).is_none() {
            moves.push(Move::Normal {
                piece: pawn,
                source,
                destination: double,
                captured: None,
            });
        }
    }
}

/// Pushes a pawn move, expanding it into the four promotions when it lands on
/// the far rank.
fn push_pawn_move(
    pawn: Piece,
    source: Square,
    destination: Square,
    captured: Option<Piece>,
    moves: &mut MoveVec,
) {
    if destination.rank() != pawn.color.promotion_rank() {
        moves.push(Move::Normal {
            piece: pawn,
            source,
            destination,
            captured,
        });
        return;
    }

    for &promoted in &PROMOTION_KINDS {
        moves.push(Move::Promotion {
            pawn,
            source,
            destination,
            promoted,
            captured,
        });
    }
}

/// Generates the castles still permitted by `castles` whose path is clear and
/// whose king neither starts on nor crosses an attacked square.
pub fn generate_castling_moves(
    color: Color,
    pos: &Position,
    castles: CastleStatus,
    moves: &mut MoveVec,
) {
    let candidates = [
        (
            CastleStatus::kingside(color),
            moves::kingside_castle(color),
            Move::KingsideCastle { color },
        ),
        (
            CastleStatus::queenside(color),
            moves::queenside_castle(color),
            Move::QueensideCastle { color },
        ),
    ];

    for &(right, geometry, mov) in candidates.iter() {
        if castles.contains(right) && can_castle(color, geometry, pos) {
            moves.push(mov);
        }
    }
}

fn can_castle(color: Color, geometry: &CastleGeometry, pos: &Position) -> bool {
    let king = Piece::new(PieceKind::King, color);
    let rook = Piece::new(PieceKind::Rook, color);
    if pos.piece_at(geometry.king_source) != Some(king)
        || pos.piece_at(geometry.rook_source) != Some(rook)
    {
        return false;
    }

    if geometry
        .must_be_empty
        .iter()
        .any(|&sq| pos.piece_at(sq).is_some())
    {
        return false;
    }

    !geometry
        .must_be_safe
        .iter()
        .any(|&sq| attacks::is_attacked(sq, color.toggle(), pos))
}
