// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reading and writing position records in Forsyth-Edwards Notation.
//!
//! A record has six whitespace-separated fields: the board layout, the side to
//! move, castling rights, the en-passant target and the two move clocks. The
//! clocks are validated on the way in but not tracked, so records written by
//! this module always end in `- -`.
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::position::Position;
use crate::types::{CastleStatus, Color, File, Piece, Rank, Square, TableIndex, FILES, RANKS};

/// The record for the standard starting position.
pub const START_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Possible errors that can arise when parsing a FEN record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum FenParseError {
    #[error("expected 6 fields, found {0}")]
    WrongFieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    WrongRankCount(usize),
    #[error("invalid empty square count")]
    InvalidDigit,
    #[error("rank does not sum to eight squares")]
    FileDoesNotSumToEight,
    #[error("unknown piece: {0}")]
    UnknownPiece(char),
    #[error("invalid side to move")]
    InvalidSideToMove,
    #[error("invalid castle status")]
    InvalidCastle,
    #[error("invalid en-passant square")]
    InvalidEnPassant,
    #[error("invalid halfmove clock")]
    InvalidHalfmove,
    #[error("invalid fullmove clock")]
    InvalidFullmove,
}

/// Everything a FEN record says about a game, minus the clocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FenRecord {
    pub position: Position,
    pub side_to_move: Color,
    pub castle_status: CastleStatus,
    pub en_passant: Option<Square>,
}

impl FenRecord {
    pub fn parse(fen: &str) -> Result<FenRecord, FenParseError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenParseError::WrongFieldCount(fields.len()));
        }

        let position = parse_placement(fields[0])?;
        let side_to_move = parse_side_to_move(fields[1])?;
        let castle_status = parse_castle_status(fields[2])?;
        let en_passant = parse_en_passant(fields[3])?;
        if !is_clock(fields[4]) {
            return Err(FenParseError::InvalidHalfmove);
        }

        if !is_clock(fields[5]) {
            return Err(FenParseError::InvalidFullmove);
        }

        Ok(FenRecord {
            position,
            side_to_move,
            castle_status,
            en_passant,
        })
    }
}

impl FromStr for FenRecord {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<FenRecord, FenParseError> {
        FenRecord::parse(s)
    }
}

impl fmt::Display for FenRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_placement(&self.position, f)?;
        write!(f, " {} {} ", self.side_to_move, self.castle_status)?;
        match self.en_passant {
            Some(sq) => write!(f, "{}", sq)?,
            None => write!(f, "-")?,
        }

        write!(f, " - -")
    }
}

/// Parses the board layout field, rank 8 first.
pub fn parse_placement(placement: &str) -> Result<Position, FenParseError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenParseError::WrongRankCount(ranks.len()));
    }

    let mut pos = Position::new();
    for (&rank, text) in RANKS.iter().rev().zip(ranks) {
        let mut file = File::A.as_index();
        for c in text.chars() {
            // digits 1 through 8 indicate empty squares.
            if c.is_ascii_digit() {
                if c < '1' || c > '8' {
                    return Err(FenParseError::InvalidDigit);
                }

                file += c as usize - '0' as usize;
                if file > 8 {
                    return Err(FenParseError::FileDoesNotSumToEight);
                }

                continue;
            }

            // if it's not a digit, it represents a piece.
            let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
            if file >= 8 {
                return Err(FenParseError::FileDoesNotSumToEight);
            }

            let square = Square::of(rank, File::from_index(file));
            pos.place(square, piece)
                .map_err(|_| FenParseError::FileDoesNotSumToEight)?;
            file += 1;
        }

        if file != 8 {
            return Err(FenParseError::FileDoesNotSumToEight);
        }
    }

    Ok(pos)
}

/// Writes the board layout field, collapsing runs of empty squares.
pub fn write_placement<W: fmt::Write>(pos: &Position, w: &mut W) -> fmt::Result {
    for &rank in RANKS.iter().rev() {
        let mut empty_squares = 0;
        for &file in &FILES {
            let square = Square::of(rank, file);
            if let Some(piece) = pos.piece_at(square) {
                if empty_squares != 0 {
                    write!(w, "{}", empty_squares)?;
                }
                write!(w, "{}", piece)?;
                empty_squares = 0;
            } else {
                empty_squares += 1;
            }
        }

        if empty_squares != 0 {
            write!(w, "{}", empty_squares)?;
        }

        if rank != Rank::One {
            w.write_char('/')?;
        }
    }

    Ok(())
}

fn parse_side_to_move(field: &str) -> Result<Color, FenParseError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenParseError::InvalidSideToMove),
    }
}

fn parse_castle_status(field: &str) -> Result<CastleStatus, FenParseError> {
    if field == "-" {
        return Ok(CastleStatus::NONE);
    }

    let mut status = CastleStatus::NONE;
    for c in field.chars() {
        let flag = match c {
            'K' => CastleStatus::WHITE_KINGSIDE,
            'Q' => CastleStatus::WHITE_QUEENSIDE,
            'k' => CastleStatus::BLACK_KINGSIDE,
            'q' => CastleStatus::BLACK_QUEENSIDE,
            _ => return Err(FenParseError::InvalidCastle),
        };

        status |= flag;
    }

    Ok(status)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenParseError> {
    if field == "-" {
        return Ok(None);
    }

    let square = Square::try_from(field).map_err(|_| FenParseError::InvalidEnPassant)?;
    match square.rank() {
        Rank::Three | Rank::Six => Ok(Some(square)),
        _ => Err(FenParseError::InvalidEnPassant),
    }
}

fn is_clock(field: &str) -> bool {
    field == "-" || (!field.is_empty() && field.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn fen_smoke() {
        let record = FenRecord::parse("8/8/8/8/8/8/8/8 w - - 0 0").unwrap();
        assert_eq!(Color::White, record.side_to_move);
        assert_eq!(CastleStatus::NONE, record.castle_status);
        assert!(record.en_passant.is_none());
        assert_eq!(Position::new(), record.position);
    }

    #[test]
    fn starting_position() {
        let record = FenRecord::parse(START_POSITION_FEN).unwrap();
        let pos = &record.position;

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (&file, &kind) in FILES.iter().zip(back_rank.iter()) {
            assert_eq!(
                Some(Piece::new(kind, Color::White)),
                pos.piece_at(Square::of(Rank::One, file))
            );
            assert_eq!(
                Some(Piece::new(PieceKind::Pawn, Color::White)),
                pos.piece_at(Square::of(Rank::Two, file))
            );
            assert_eq!(
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
                pos.piece_at(Square::of(Rank::Seven, file))
            );
            assert_eq!(
                Some(Piece::new(kind, Color::Black)),
                pos.piece_at(Square::of(Rank::Eight, file))
            );
        }

        for sq in (Square::A3.as_index()..Square::A7.as_index()).map(Square::from_index) {
            assert!(pos.piece_at(sq).is_none());
        }

        assert_eq!(CastleStatus::WHITE | CastleStatus::BLACK, record.castle_status);
        assert!(pos.is_consistent());
    }

    #[test]
    fn writes_placeholder_clocks() {
        let record = FenRecord::parse(START_POSITION_FEN).unwrap();
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - - -",
            record.to_string()
        );
    }

    #[test]
    fn round_trip() {
        let fen = "8/8/8/1B2K3/pk6/8/8/P1P4Q w KQkq - - -";
        let record = FenRecord::parse(fen).unwrap();
        assert_eq!(fen, record.to_string());

        let again = FenRecord::parse(&record.to_string()).unwrap();
        assert_eq!(record, again);
    }

    #[test]
    fn en_passant_square_round_trips() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 - -";
        let record = FenRecord::parse(fen).unwrap();
        assert_eq!(Some(Square::E3), record.en_passant);
        assert_eq!(fen, record.to_string());
    }

    #[test]
    fn empty() {
        assert_eq!(Err(FenParseError::WrongFieldCount(0)), FenRecord::parse(""));
    }

    #[test]
    fn missing_clocks() {
        assert_eq!(
            Err(FenParseError::WrongFieldCount(4)),
            FenRecord::parse("8/8/8/8/8/8/8/8 w - -")
        );
    }

    #[test]
    fn wrong_rank_count() {
        assert_eq!(
            Err(FenParseError::WrongRankCount(7)),
            FenRecord::parse("8/8/8/8/8/8/8 w - - 0 0")
        );
    }

    #[test]
    fn unknown_piece() {
        assert_eq!(
            Err(FenParseError::UnknownPiece('z')),
            FenRecord::parse("z7/8/8/8/8/8/8/8 w - - 0 0")
        );
    }

    #[test]
    fn invalid_digit() {
        assert_eq!(
            Err(FenParseError::InvalidDigit),
            FenRecord::parse("9/8/8/8/8/8/8/8 w - - 0 0")
        );
        assert_eq!(
            Err(FenParseError::InvalidDigit),
            FenRecord::parse("08/8/8/8/8/8/8/8 w - - 0 0")
        );
    }

    #[test]
    fn not_sum_to_8() {
        assert_eq!(
            Err(FenParseError::FileDoesNotSumToEight),
            FenRecord::parse("pppp5/8/8/8/8/8/8/8 w - - 0 0")
        );
        assert_eq!(
            Err(FenParseError::FileDoesNotSumToEight),
            FenRecord::parse("7/8/8/8/8/8/8/8 w - - 0 0")
        );
        assert_eq!(
            Err(FenParseError::FileDoesNotSumToEight),
            FenRecord::parse("ppppppppp/8/8/8/8/8/8/8 w - - 0 0")
        );
    }

    #[test]
    fn bad_side_to_move() {
        assert_eq!(
            Err(FenParseError::InvalidSideToMove),
            FenRecord::parse("8/8/8/8/8/8/8/8 c - - 0 0")
        );
    }

    #[test]
    fn bad_castle_status() {
        assert_eq!(
            Err(FenParseError::InvalidCastle),
            FenRecord::parse("8/8/8/8/8/8/8/8 w a - 0 0")
        );
    }

    #[test]
    fn bad_en_passant() {
        assert_eq!(
            Err(FenParseError::InvalidEnPassant),
            FenRecord::parse("8/8/8/8/8/8/8/8 w - 88 0 0")
        );
        assert_eq!(
            Err(FenParseError::InvalidEnPassant),
            FenRecord::parse("8/8/8/8/8/8/8/8 w - e4 0 0")
        );
    }

    #[test]
    fn bad_clocks() {
        assert_eq!(
            Err(FenParseError::InvalidHalfmove),
            FenRecord::parse("8/8/8/8/8/8/8/8 w - - q 0")
        );
        assert_eq!(
            Err(FenParseError::InvalidFullmove),
            FenRecord::parse("8/8/8/8/8/8/8/8 w - - 0 q")
        );
    }
}
