// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use blitz::{attacks, legality};
use blitz::{FenRecord, Game, Position};

const GAMES: u64 = 16;
const MAX_PLIES: usize = 120;

/// Plays random legal games from `fen`, checking after every move that the
/// board stays consistent and that no offered move leaves its mover in check.
fn random_playouts(fen: &str) {
    for seed in 0..GAMES {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::from_fen(fen).unwrap();
        let mut scratch = Position::new();
        for _ in 0..MAX_PLIES {
            let moves = game.legal_moves().to_vec();
            if moves.is_empty() {
                break;
            }

            for &mov in &moves {
                assert!(!legality::leaves_king_in_check(
                    mov,
                    game.position(),
                    &mut scratch
                ));
            }

            let mover = game.side_to_move();
            let mov = moves[rng.gen_range(0, moves.len())];
            let result = game.play(mov);
            assert!(!result.has_errors(), "{} after {:?}: {}", mov, game.history(), result);
            assert!(game.position().is_consistent());
            assert!(!attacks::is_check(mover, game.position()));
            assert_eq!(mover.toggle(), game.side_to_move());

            // Whatever we reached must survive a trip through its record.
            let record = FenRecord::parse(&game.as_fen()).unwrap();
            assert_eq!(game.position(), &record.position);
            assert_eq!(game.castle_status(), record.castle_status);
            assert_eq!(game.en_passant_square(), record.en_passant);
        }
    }
}

#[test]
fn random_games_from_start() {
    random_playouts("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
}

#[test]
fn random_games_from_kiwipete() {
    random_playouts("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
}

#[test]
fn castle_rights_only_shrink() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut game = Game::new();
    for _ in 0..MAX_PLIES {
        let moves = game.legal_moves().to_vec();
        if moves.is_empty() {
            break;
        }

        let before = game.castle_status();
        game.play(moves[rng.gen_range(0, moves.len())]);
        assert!(before.contains(game.castle_status()));
    }
}
