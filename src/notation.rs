// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Decoding of standard algebraic notation into a `MoveIntent`.
//!
//! Algebraic notation is anchored at its end: check and mate markers, the
//! promotion suffix and the destination square always sit at or near the end
//! of the string, while the prefix (piece letter, disambiguating source file
//! and rank) varies in length. The decoder therefore reads right to left, each
//! stage consuming at most one element before handing off to the next.
//! Castling literals are recognized up front and skip the pipeline.
use std::convert::TryFrom;
use thiserror::Error;

use crate::types::{File, PieceKind, Rank, Square};

bitflags! {
    pub struct MoveTags: u8 {
        const CAPTURE = 0b0000_0001;
        const KINGSIDE_CASTLE = 0b0000_0010;
        const QUEENSIDE_CASTLE = 0b0000_0100;
        const CHECK = 0b0000_1000;
        const CHECKMATE = 0b0001_0000;
        const EN_PASSANT = 0b0010_0000;
        const PROMOTION = 0b0100_0000;
        const NORMAL = 0b1000_0000;
    }
}

/// A partially specified move. Fields that are `None` were not present in the
/// notation and match anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveIntent {
    pub kind: PieceKind,
    pub promotion: Option<PieceKind>,
    /// Always present except for castles.
    pub destination: Option<Square>,
    pub source_file: Option<File>,
    pub source_rank: Option<Rank>,
    pub tags: MoveTags,
}

impl Default for MoveIntent {
    fn default() -> MoveIntent {
        MoveIntent {
            kind: PieceKind::Pawn,
            promotion: None,
            destination: None,
            source_file: None,
            source_rank: None,
            tags: MoveTags::empty(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} at position {offset}")]
pub struct NotationParseError {
    pub message: String,
    pub offset: usize,
}

impl NotationParseError {
    fn new<S: Into<String>>(message: S, offset: isize) -> NotationParseError {
        NotationParseError {
            message: message.into(),
            offset: offset.max(0) as usize,
        }
    }
}

const CASTLE_QUEENSIDE: [&str; 2] = ["O-O-O", "0-0-0"];
const CASTLE_KINGSIDE: [&str; 2] = ["O-O", "0-0"];
const EN_PASSANT: [char; 4] = ['e', '.', 'p', '.'];

/// Decodes a single move written in algebraic notation.
pub fn parse_move(notation: &str) -> Result<MoveIntent, NotationParseError> {
    if notation.is_empty() {
        return Err(NotationParseError::new(
            "Notation must be a non-empty input",
            0,
        ));
    }

    if let Some(intent) = parse_castle(notation, &CASTLE_QUEENSIDE, MoveTags::QUEENSIDE_CASTLE)? {
        return Ok(intent);
    }

    if let Some(intent) = parse_castle(notation, &CASTLE_KINGSIDE, MoveTags::KINGSIDE_CASTLE)? {
        return Ok(intent);
    }

    let mut parser = Parser::new(notation);
    parser.parse_standard()?;
    let mut intent = parser.intent;
    if !intent
        .tags
        .intersects(MoveTags::EN_PASSANT | MoveTags::PROMOTION)
    {
        intent.tags |= MoveTags::NORMAL;
    }

    Ok(intent)
}

fn parse_castle(
    notation: &str,
    literals: &[&str],
    tag: MoveTags,
) -> Result<Option<MoveIntent>, NotationParseError> {
    let literal = match literals.iter().find(|lit| notation.starts_with(*lit)) {
        Some(literal) => literal,
        None => return Ok(None),
    };

    let mut intent = MoveIntent {
        kind: PieceKind::King,
        tags: tag,
        ..MoveIntent::default()
    };

    let suffix: Vec<char> = notation[literal.len()..].chars().collect();
    match suffix.as_slice() {
        [] => {}
        ['+'] => intent.tags |= MoveTags::CHECK,
        ['#'] => intent.tags |= MoveTags::CHECKMATE,
        [_] => {
            return Err(NotationParseError::new(
                "Did not recognize character",
                literal.len() as isize,
            ))
        }
        ['+', ..] | ['#', ..] => {
            return Err(NotationParseError::new(
                "Did not recognize character",
                literal.len() as isize + 1,
            ))
        }
        _ => {
            return Err(NotationParseError::new(
                "Did not recognize character",
                literal.len() as isize,
            ))
        }
    }

    Ok(Some(intent))
}

/// Right-to-left decoder for everything but castles. `cursor` is the index of
/// the rightmost character not yet consumed and goes negative once the whole
/// string has been read.
struct Parser<'a> {
    notation: &'a str,
    chars: Vec<char>,
    cursor: isize,
    intent: MoveIntent,
}

impl<'a> Parser<'a> {
    fn new(notation: &'a str) -> Parser<'a> {
        let chars: Vec<char> = notation.chars().collect();
        let cursor = chars.len() as isize - 1;
        Parser {
            notation,
            chars,
            cursor,
            intent: MoveIntent::default(),
        }
    }

    fn current(&self) -> Option<char> {
        if self.cursor < 0 {
            None
        } else {
            self.chars.get(self.cursor as usize).cloned()
        }
    }

    fn at(&self, index: isize) -> Option<char> {
        if index < 0 {
            None
        } else {
            self.chars.get(index as usize).cloned()
        }
    }

    fn error<S: Into<String>>(&self, message: S) -> NotationParseError {
        NotationParseError::new(message, self.cursor)
    }

    fn parse_standard(&mut self) -> Result<(), NotationParseError> {
        if self.chars.len() < 2 {
            return Err(NotationParseError::new(
                "Notation must be at least 2 character(s)",
                0,
            ));
        }

        self.parse_marker('+', MoveTags::CHECK);
        self.parse_marker('#', MoveTags::CHECKMATE);
        self.parse_en_passant();
        self.parse_promotion();
        let rank = self.parse_destination_rank()?;
        self.parse_destination_file(rank)?;
        self.parse_capture();
        self.parse_source_rank();
        self.parse_source_file();
        self.parse_piece()
    }

    fn parse_marker(&mut self, marker: char, tag: MoveTags) {
        if self.current() == Some(marker) {
            self.intent.tags |= tag;
            self.cursor -= 1;
        }
    }

    fn parse_en_passant(&mut self) {
        let len = EN_PASSANT.len() as isize;
        let start = self.cursor - (len - 1);
        if start < 0 {
            return;
        }

        let end = self.cursor as usize + 1;
        if self.chars[start as usize..end] == EN_PASSANT {
            self.intent.tags |= MoveTags::EN_PASSANT;
            self.cursor -= len;
        }
    }

    fn parse_promotion(&mut self) {
        // The destination square must precede the '='.
        if self.cursor < 3 || self.at(self.cursor - 1) != Some('=') {
            return;
        }

        let kind = match self.current().and_then(PieceKind::from_notation) {
            Some(kind) if kind.is_promotion_target() => kind,
            _ => return,
        };

        self.intent.tags |= MoveTags::PROMOTION;
        self.intent.promotion = Some(kind);
        self.cursor -= 2;
    }

    fn parse_destination_rank(&mut self) -> Result<Rank, NotationParseError> {
        let c = self.current().ok_or_else(|| {
            self.error(format!(
                "Could not find a destination rank in {}",
                self.notation
            ))
        })?;

        let rank = Rank::try_from(c).map_err(|_| {
            self.error(format!(
                "Destination rank in {} was not recognized",
                self.notation
            ))
        })?;

        self.cursor -= 1;
        Ok(rank)
    }

    fn parse_destination_file(&mut self, rank: Rank) -> Result<(), NotationParseError> {
        let c = self.current().ok_or_else(|| {
            self.error(format!(
                "Could not find a destination file in {}",
                self.notation
            ))
        })?;

        let file = File::try_from(c).map_err(|_| {
            self.error(format!(
                "Destination file in {} was not recognized",
                self.notation
            ))
        })?;

        self.intent.destination = Some(Square::of(rank, file));
        self.cursor -= 1;
        Ok(())
    }

    fn parse_capture(&mut self) {
        if self.current() == Some('x') {
            self.intent.tags |= MoveTags::CAPTURE;
            self.cursor -= 1;
        }
    }

    fn parse_source_rank(&mut self) {
        if let Some(rank) = self.current().and_then(|c| Rank::try_from(c).ok()) {
            self.intent.source_rank = Some(rank);
            self.cursor -= 1;
        }
    }

    fn parse_source_file(&mut self) {
        if let Some(file) = self.current().and_then(|c| File::try_from(c).ok()) {
            self.intent.source_file = Some(file);
            self.cursor -= 1;
        }
    }

    fn parse_piece(&mut self) -> Result<(), NotationParseError> {
        match self.cursor {
            c if c < 0 => {
                self.intent.kind = PieceKind::Pawn;
                Ok(())
            }
            0 => {
                let letter = self.chars[0];
                let kind = PieceKind::from_notation(letter)
                    .ok_or_else(|| self.error(format!("{} is not a valid piece.", letter)))?;
                self.intent.kind = kind;
                Ok(())
            }
            c => {
                let prefix: String = self.chars[..=c as usize].iter().collect();
                Err(NotationParseError::new(
                    format!("Did not recognize notation: {}", prefix),
                    0,
                ))
            }
        }
    }
}
