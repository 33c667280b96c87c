// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The turn controller. A `Game` owns the board, whose turn it is, castling
//! rights, the en-passant target and the legal moves of the side to move. It
//! accepts moves in algebraic notation, resolves them against the legal move
//! set and keeps all of that state up to date.
use std::mem;

use crate::attacks;
use crate::fen::{FenParseError, FenRecord, START_POSITION_FEN};
use crate::legality;
use crate::movegen::{self, MoveVec};
use crate::moves::Move;
use crate::notation::{self, MoveIntent};
use crate::position::Position;
use crate::result::MoveResult;
use crate::types::{CastleStatus, Color, File, PieceKind, Square};

pub const CHECKMATE_WARNING: &str = "Checkmate!";
pub const STALEMATE_WARNING: &str = "Stalemate!";

#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    /// Board used to try out candidate moves without touching `position`.
    scratch: Position,
    side_to_move: Color,
    castle_status: CastleStatus,
    en_passant_square: Option<Square>,
    /// Legal moves for `side_to_move`. `None` means they must be regenerated
    /// before use.
    legal_moves: Option<MoveVec>,
    history: Vec<Move>,
    starting_fen: String,
}

//
// Construction and state queries
//

impl Game {
    /// A game from the standard starting position.
    pub fn new() -> Game {
        Game::from_fen(START_POSITION_FEN).unwrap()
    }

    /// A game from an arbitrary position record. Nothing is constructed if the
    /// record is malformed.
    pub fn from_fen(fen: &str) -> Result<Game, FenParseError> {
        let record = FenRecord::parse(fen)?;
        let mut game = Game {
            position: record.position,
            scratch: Position::new(),
            side_to_move: record.side_to_move,
            castle_status: record.castle_status,
            en_passant_square: record.en_passant,
            legal_moves: None,
            history: Vec::new(),
            starting_fen: fen.to_owned(),
        };

        game.ensure_legal_moves();
        Ok(game)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::kingside(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::queenside(color))
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    /// Every move applied so far, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn starting_fen(&self) -> &str {
        &self.starting_fen
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        attacks::is_check(self.side_to_move, &self.position)
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.legal_moves().is_empty() && self.is_check()
    }

    pub fn is_stalemate(&mut self) -> bool {
        self.legal_moves().is_empty() && !self.is_check()
    }

    /// The legal moves of the side to move, regenerated if they were
    /// discarded.
    pub fn legal_moves(&mut self) -> &[Move] {
        self.ensure_legal_moves()
    }

    pub fn record(&self) -> FenRecord {
        FenRecord {
            position: self.position.clone(),
            side_to_move: self.side_to_move,
            castle_status: self.castle_status,
            en_passant: self.en_passant_square,
        }
    }

    pub fn as_fen(&self) -> String {
        self.record().to_string()
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

//
// Move submission
//

impl Game {
    /// Plays a move written in algebraic notation.
    ///
    /// A notation that does not parse leaves the game untouched. A notation
    /// that parses but matches no legal move, or more than one, is rejected
    /// with `No such move` and additionally discards the cached legal moves;
    /// they are regenerated on next use.
    pub fn make_move(&mut self, notation: &str) -> MoveResult {
        let intent = match notation::parse_move(notation) {
            Ok(intent) => intent,
            Err(err) => {
                debug!("could not parse {:?}: {}", notation, err);
                return MoveResult::error(err.to_string());
            }
        };

        match self.resolve(&intent) {
            Some(mov) => {
                debug!("{} resolved to {}", notation, mov);
                self.commit(mov)
            }
            None => {
                self.legal_moves = None;
                MoveResult::error(format!("No such move: {}", notation))
            }
        }
    }

    /// Plays an already resolved move, such as one taken from `legal_moves`.
    /// A move that is not legal here is rejected like an unmatched notation.
    pub fn play(&mut self, mov: Move) -> MoveResult {
        if !self.ensure_legal_moves().contains(&mov) {
            self.legal_moves = None;
            return MoveResult::error(format!("No such move: {}", mov));
        }

        self.commit(mov)
    }

    /// Finds the single legal move matching `intent`.
    fn resolve(&mut self, intent: &MoveIntent) -> Option<Move> {
        let mut found = None;
        let mut count = 0;
        for mov in self.ensure_legal_moves().iter().filter(|m| m.matches(intent)) {
            found = Some(*mov);
            count += 1;
        }

        if count > 1 {
            debug!("{} moves match {:?}", count, intent);
            return None;
        }

        found
    }

    fn commit(&mut self, mov: Move) -> MoveResult {
        // Play the move on the scratch board first so that the real board is
        // never left half-updated.
        self.scratch.replace_with(&self.position);
        if let Err(err) = mov.apply(&mut self.scratch) {
            self.legal_moves = None;
            return MoveResult::error(format!("Could not play {}: {}", mov, err));
        }

        mem::swap(&mut self.position, &mut self.scratch);
        self.revoke_castle_rights(mov);
        self.en_passant_square = mov.double_push_target();
        self.side_to_move = self.side_to_move.toggle();
        self.history.push(mov);
        self.legal_moves = None;

        if !self.ensure_legal_moves().is_empty() {
            return MoveResult::success();
        }

        if self.is_check() {
            debug!("{:?} is checkmated", self.side_to_move);
            MoveResult::warning(CHECKMATE_WARNING)
        } else {
            debug!("{:?} is stalemated", self.side_to_move);
            MoveResult::warning(STALEMATE_WARNING)
        }
    }

    /// Castling rights only ever shrink. Moving the king (or castling) gives
    /// up both of the mover's rights; anything leaving one of the mover's
    /// corners gives up that side; anything landing on one of the opponent's
    /// corners takes away the opponent's right on that side.
    fn revoke_castle_rights(&mut self, mov: Move) {
        let color = mov.color();
        let opponent = color.toggle();
        let mut revoked = CastleStatus::NONE;
        if mov.is_castle() || mov.moving_piece().kind == PieceKind::King {
            revoked |= CastleStatus::both(color);
        }

        let own_rank = color.back_rank();
        if mov.source() == Square::of(own_rank, File::A) {
            revoked |= CastleStatus::queenside(color);
        }
        if mov.source() == Square::of(own_rank, File::H) {
            revoked |= CastleStatus::kingside(color);
        }

        let their_rank = opponent.back_rank();
        if mov.destination() == Square::of(their_rank, File::A) {
            revoked |= CastleStatus::queenside(opponent);
        }
        if mov.destination() == Square::of(their_rank, File::H) {
            revoked |= CastleStatus::kingside(opponent);
        }

        if self.castle_status.intersects(revoked) {
            debug!(
                "castle rights {} -> {}",
                self.castle_status,
                self.castle_status - revoked
            );
        }

        self.castle_status.remove(revoked);
    }

    fn ensure_legal_moves(&mut self) -> &MoveVec {
        let Game {
            ref position,
            ref mut scratch,
            side_to_move,
            castle_status,
            en_passant_square,
            ref mut legal_moves,
            ..
        } = *self;

        legal_moves.get_or_insert_with(|| {
            let mut moves = MoveVec::new();
            movegen::generate_moves(
                side_to_move,
                position,
                en_passant_square,
                castle_status,
                &mut moves,
            );
            legality::filter_illegal_moves(&mut moves, position, scratch);
            debug!("{} legal moves for {:?}", moves.len(), side_to_move);
            moves
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    #[test]
    fn starting_state() {
        let mut game = Game::new();
        assert_eq!(Color::White, game.side_to_move());
        assert_eq!(CastleStatus::WHITE | CastleStatus::BLACK, game.castle_status());
        assert_eq!(None, game.en_passant_square());
        assert_eq!(20, game.legal_moves().len());
        assert!(!game.is_check());
        assert!(game.history().is_empty());
        assert_eq!(START_POSITION_FEN, game.starting_fen());
    }

    #[test]
    fn parse_error_leaves_cache_alone() {
        let mut game = Game::new();
        let result = game.make_move("Zf3");
        assert_eq!(
            &["Z is not a valid piece. at position 0".to_string()],
            result.errors()
        );
        assert!(game.legal_moves.is_some());
        assert_eq!(Color::White, game.side_to_move());
    }

    #[test]
    fn unmatched_move_clears_cache() {
        let mut game = Game::new();
        let result = game.make_move("e5");
        assert_eq!(&["No such move: e5".to_string()], result.errors());
        assert!(game.legal_moves.is_none());

        assert!(game.make_move("e4").is_success());
        assert_eq!(Color::Black, game.side_to_move());
    }

    #[test]
    fn ambiguous_move_is_rejected() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/4K3/R6R w - - 0 1").unwrap();
        let before = game.as_fen();
        let result = game.make_move("Rd1");
        assert!(result.has_errors());
        assert_eq!(before, game.as_fen());

        assert!(game.make_move("Rad1").is_success());
        assert_eq!(
            Some(Piece::new(PieceKind::Rook, Color::White)),
            game.position().piece_at(Square::D1)
        );
    }

    #[test]
    fn play_rejects_foreign_move() {
        let mut game = Game::new();
        let mov = Move::KingsideCastle {
            color: Color::White,
        };
        let result = game.play(mov);
        assert_eq!(&["No such move: e1g1".to_string()], result.errors());
        assert!(game.legal_moves.is_none());
        assert!(game.history().is_empty());

        assert_eq!(20, game.legal_moves().len());
    }

    #[test]
    fn play_legal_move() {
        let mut game = Game::new();
        let mov = game.legal_moves()[0];
        assert!(game.play(mov).is_success());
        assert_eq!(&[mov], game.history());
    }

    #[test]
    fn capturing_rook_in_corner_revokes_rights() {
        let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(game.make_move("Rxa8+").is_success());
        assert!(game.is_check());
        assert!(!game.can_castle_queenside(Color::White));
        assert!(game.can_castle_kingside(Color::White));
        assert!(!game.can_castle_queenside(Color::Black));
        assert!(game.can_castle_kingside(Color::Black));
    }

    #[test]
    fn more_than_256_legal_moves() {
        let mut game =
            Game::from_fen("kQQQQQQQ/Q6Q/Q6Q/Q6Q/Q5Q1/QQ4Q1/2Q3Q1/Q1QQQQQK w - - 0 1").unwrap();
        assert!(game.legal_moves().len() > 256);

        let result = game.make_move("Kh2");
        assert!(!result.has_errors(), "{}", result);
        assert_eq!(
            Some(Piece::new(PieceKind::King, Color::White)),
            game.position().piece_at(Square::H2)
        );
    }
}
