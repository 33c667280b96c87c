// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The attack oracle. Rather than keeping a separate attack map, it re-runs
//! the move generator for the attacking side and looks at where its moves
//! land, so attacks and moves can never disagree about piece movement.
use crate::bitboard::Bitboard;
use crate::movegen::{self, MoveVec};
use crate::position::Position;
use crate::types::{Color, Piece, PieceKind, Square};

/// The squares holding pieces of color `by` that attack `target`.
///
/// Pawns attack their two forward diagonals whether or not anything stands
/// there; their pushes never attack. Castling never attacks.
pub fn squares_attacking(by: Color, target: Square, pos: &Position) -> Bitboard {
    let mut attackers = Bitboard::none();
    let pawn = Piece::new(PieceKind::Pawn, by);
    for square in pos.locations(pawn) {
        if movegen::pawn_capture_targets(by, square).any(|sq| sq == target) {
            attackers.set(square);
        }
    }

    let mut moves = MoveVec::new();
    for &kind in &[
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ] {
        let piece = Piece::new(kind, by);
        for square in pos.locations(piece) {
            moves.clear();
            movegen::generate_piece_moves(piece, square, pos, &mut moves);
            if moves.iter().any(|mov| mov.destination() == target) {
                attackers.set(square);
            }
        }
    }

    attackers
}

pub fn is_attacked(target: Square, by: Color, pos: &Position) -> bool {
    !squares_attacking(by, target, pos).empty()
}

/// Whether any king of the given color is attacked. A side with no king on
/// the board is never in check.
pub fn is_check(color: Color, pos: &Position) -> bool {
    pos.kings(color)
        .iter()
        .any(|king| is_attacked(king, color.toggle(), pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::FenRecord;

    fn position(fen: &str) -> Position {
        FenRecord::parse(fen).unwrap().position
    }

    #[test]
    fn check_smoke() {
        let pos =
            position("r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1");
        assert!(is_check(Color::Black, &pos));
        assert!(!is_check(Color::White, &pos));
    }

    #[test]
    fn no_king_no_check() {
        let pos = position("8/8/8/8/8/8/8/q7 w - - 0 1");
        assert!(!is_check(Color::White, &pos));
    }

    #[test]
    fn sliders_are_blocked() {
        let pos = position("8/8/8/8/3q4/8/3P4/3K4 w - - 0 1");
        assert!(!is_check(Color::White, &pos));
        assert!(is_attacked(Square::D2, Color::Black, &pos));
        assert!(is_attacked(Square::A1, Color::Black, &pos));
        assert!(!is_attacked(Square::E1, Color::Black, &pos));
    }

    #[test]
    fn pawns_attack_empty_diagonals() {
        let pos = position("8/8/8/3p4/8/8/8/8 w - - 0 1");
        assert!(is_attacked(Square::C4, Color::Black, &pos));
        assert!(is_attacked(Square::E4, Color::Black, &pos));
        assert!(!is_attacked(Square::D4, Color::Black, &pos));
        assert!(!is_attacked(Square::C6, Color::Black, &pos));
    }

    #[test]
    fn knight_and_king_attacks() {
        let pos = position("8/8/8/8/8/5N2/8/K7 w - - 0 1");
        let attackers = squares_attacking(Color::White, Square::B2, &pos);
        assert_eq!(1, attackers.count());
        assert!(attackers.test(Square::A1));

        let attackers = squares_attacking(Color::White, Square::G1, &pos);
        assert!(attackers.test(Square::F3));
        assert!(!attackers.test(Square::A1));
    }

    #[test]
    fn defended_piece_is_attacked_once_captured() {
        // The rook on e2 is defended by the bishop; the king may not take it.
        let pos = position("8/8/8/8/8/8/4r3/4Kb2 w - - 0 1");
        let mut after = pos.clone();
        after.remove(Square::E2).unwrap();
        after.move_piece(Square::E1, Square::E2).unwrap();
        assert!(is_check(Color::White, &after));
    }
}
