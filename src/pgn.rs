// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reading games in Portable Game Notation and replaying them through a
//! `Game`. Only the main line is kept; comments, NAGs, annotations and
//! variations are parsed and dropped.
use std::collections::BTreeMap;

use pest::iterators::Pair;
use pest::Parser;
use thiserror::Error;

use crate::fen::FenParseError;
use crate::game::Game;

#[derive(Parser)]
#[grammar = "pgn.pest"]
struct PgnParser;

#[derive(Debug, Error)]
pub enum PgnError {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("SetUp is 1 but there is no FEN tag")]
    MissingFen,
    #[error("invalid FEN tag: {0}")]
    InvalidFen(#[from] FenParseError),
    #[error("could not play {notation} at ply {ply}: {}", .errors.join("; "))]
    IllegalMove {
        ply: usize,
        notation: String,
        errors: Vec<String>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PgnGame {
    pub tags: BTreeMap<String, String>,
    /// Main line moves in SAN, with annotations stripped.
    pub moves: Vec<String>,
    /// The termination marker: `1-0`, `0-1`, `1/2-1/2` or `*`.
    pub result: String,
}

impl PgnGame {
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(|v| v.as_str())
    }

    /// The record the game starts from, if it does not start from the
    /// standard position.
    pub fn setup_fen(&self) -> Result<Option<&str>, PgnError> {
        if self.tag("SetUp") != Some("1") {
            return Ok(None);
        }

        self.tag("FEN").map(Some).ok_or(PgnError::MissingFen)
    }
}

/// Parses every game in `input`.
pub fn parse_pgn(input: &str) -> Result<Vec<PgnGame>, PgnError> {
    let pairs =
        PgnParser::parse(Rule::pgn, input).map_err(|err| PgnError::Syntax(err.to_string()))?;

    let mut games = vec![];
    for pgn in pairs {
        for pair in pgn.into_inner() {
            if pair.as_rule() == Rule::game {
                games.push(read_game(pair));
            }
        }
    }

    debug!("parsed {} games", games.len());
    Ok(games)
}

/// Plays every move of `pgn` from its starting position and returns the
/// resulting game. A checkmate or stalemate reached on the last move is not
/// an error.
pub fn replay(pgn: &PgnGame) -> Result<Game, PgnError> {
    let mut game = match pgn.setup_fen()? {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    };

    for (i, notation) in pgn.moves.iter().enumerate() {
        let result = game.make_move(notation);
        if result.has_errors() {
            return Err(PgnError::IllegalMove {
                ply: i + 1,
                notation: notation.clone(),
                errors: result.errors().to_vec(),
            });
        }
    }

    Ok(game)
}

fn read_game(pair: Pair<Rule>) -> PgnGame {
    let mut game = PgnGame::default();
    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::tag_pair => {
                let mut name = String::new();
                let mut value = String::new();
                for part in item.into_inner() {
                    match part.as_rule() {
                        Rule::tag_name => name = part.as_str().to_owned(),
                        Rule::tag_value => value = unescape(part.into_inner().as_str()),
                        _ => {}
                    }
                }

                game.tags.insert(name, value);
            }
            Rule::movetext => {
                for token in item.into_inner() {
                    match token.as_rule() {
                        Rule::san => game.moves.push(token.as_str().to_owned()),
                        Rule::game_result => game.result = token.as_str().to_owned(),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    game
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    const SCHOLARS_MATE: &str = r#"
[Event "Casual game"]
[White "Somebody \"Quick\" Else"]
[Black "Victim"]
[Result "1-0"]

1. e4 e5 2. Bc4 {aiming at f7} Nc6 3. Qh5 Nf6?? $4 ; too late now
4. Qxf7# 1-0
"#;

    #[test]
    fn parses_tags_and_moves() {
        let games = parse_pgn(SCHOLARS_MATE).unwrap();
        assert_eq!(1, games.len());
        let game = &games[0];
        assert_eq!(Some("Casual game"), game.tag("Event"));
        assert_eq!(Some("Somebody \"Quick\" Else"), game.tag("White"));
        assert_eq!(
            vec!["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"],
            game.moves
        );
        assert_eq!("1-0", game.result);
    }

    #[test]
    fn replays_to_checkmate() {
        let games = parse_pgn(SCHOLARS_MATE).unwrap();
        let mut game = replay(&games[0]).unwrap();
        assert!(game.is_checkmate());
        assert_eq!(Color::Black, game.side_to_move());
    }

    #[test]
    fn several_games_and_variations() {
        let input = "1. d4 (1. e4 e5) d5 2. c4 * \n\n[Result \"0-1\"]\n1. f3 e5 2. g4 Qh4# 0-1";
        let games = parse_pgn(input).unwrap();
        assert_eq!(2, games.len());
        assert_eq!(vec!["d4", "d5", "c4"], games[0].moves);
        assert_eq!("*", games[0].result);
        assert_eq!(vec!["f3", "e5", "g4", "Qh4#"], games[1].moves);

        let mut fools = replay(&games[1]).unwrap();
        assert!(fools.is_checkmate());
    }

    #[test]
    fn castling_tokens() {
        let games = parse_pgn("1. e4 e5 2. Nf3 Nf6 3. Bc4 Bc5 4. O-O 0-0 *").unwrap();
        assert_eq!("O-O", games[0].moves[6]);
        assert_eq!("0-0", games[0].moves[7]);
        let game = replay(&games[0]).unwrap();
        assert!(!game.can_castle_kingside(Color::Black));
    }

    #[test]
    fn setup_position() {
        let input = r#"[SetUp "1"]
[FEN "4k3/8/8/8/8/8/8/4K3 b - - 0 1"]
1... Kd7 2. Kd2 *"#;
        let games = parse_pgn(input).unwrap();
        let game = replay(&games[0]).unwrap();
        assert_eq!("8/3k4/8/8/8/8/3K4/8 b - - - -", game.as_fen());
        assert_eq!(2, game.history().len());
    }

    #[test]
    fn setup_without_fen() {
        let games = parse_pgn("[SetUp \"1\"]\n1. e4 *").unwrap();
        match replay(&games[0]) {
            Err(PgnError::MissingFen) => {}
            other => panic!("unexpected {:?}", other.map(|g| g.as_fen())),
        }
    }

    #[test]
    fn illegal_move_reports_ply() {
        let games = parse_pgn("1. e4 e5 2. Ke3 *").unwrap();
        match replay(&games[0]) {
            Err(PgnError::IllegalMove { ply, notation, errors }) => {
                assert_eq!(3, ply);
                assert_eq!("Ke3", notation);
                assert_eq!(vec!["No such move: Ke3".to_string()], errors);
            }
            other => panic!("unexpected {:?}", other.map(|g| g.as_fen())),
        }
    }

    #[test]
    fn missing_result_is_syntax_error() {
        match parse_pgn("1. e4 e5") {
            Err(PgnError::Syntax(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
