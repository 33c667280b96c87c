// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate criterion;

use blitz::{attacks, legality, movegen, notation};
use blitz::{Color, FenRecord, Game, MoveVec, Position, Square, START_POSITION_FEN};
use criterion::black_box;
use criterion::Criterion;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("position clone", |b| {
        let pos = FenRecord::parse(START_POSITION_FEN).unwrap().position;
        b.iter(|| black_box(&pos).clone())
    });

    c.bench_function("generate moves start", |b| {
        let record = FenRecord::parse(START_POSITION_FEN).unwrap();
        b.iter(|| {
            let mut vec = MoveVec::new();
            movegen::generate_moves(
                Color::White,
                black_box(&record.position),
                None,
                record.castle_status,
                &mut vec,
            );
        });
    });

    c.bench_function("is attacked e1 kiwipete", |b| {
        let pos = FenRecord::parse(KIWIPETE).unwrap().position;
        b.iter(|| attacks::is_attacked(black_box(Square::E1), Color::Black, &pos))
    });

    c.bench_function("legal moves kiwipete", |b| {
        let record = FenRecord::parse(KIWIPETE).unwrap();
        let mut scratch = Position::new();
        b.iter(|| {
            let mut vec = MoveVec::new();
            movegen::generate_moves(
                record.side_to_move,
                black_box(&record.position),
                record.en_passant,
                record.castle_status,
                &mut vec,
            );
            legality::filter_illegal_moves(&mut vec, &record.position, &mut scratch);
            vec.len()
        })
    });

    c.bench_function("parse notation", |b| {
        b.iter(|| notation::parse_move(black_box("Nbxd7+")))
    });

    c.bench_function("make move e4", |b| {
        let game = Game::new();
        b.iter(|| {
            let mut game = game.clone();
            game.make_move(black_box("e4"))
        })
    });

    c.bench_function("scratch reset", |b| {
        let pos = FenRecord::parse(KIWIPETE).unwrap().position;
        let mut scratch = Position::new();
        b.iter(|| scratch.replace_with(black_box(&pos)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
