// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate serde_derive;

use std::fs::File;
use std::io::Read;
use std::process;
use std::time::Instant;

use blitz::pgn;
use blitz::{perft, Game, MoveResult};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

#[derive(Serialize)]
struct PlayOutput<'a> {
    results: &'a [MoveResult],
    fen: String,
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("play")
                .about("Play moves in algebraic notation and print the resulting position")
                .arg(
                    Arg::with_name("fen")
                        .help("FEN string for the starting position")
                        .value_name("FEN")
                        .long("--fen")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("json")
                        .help("Print the results as a JSON document")
                        .long("--json"),
                )
                .arg(
                    Arg::with_name("MOVE")
                        .help("Moves to play, in order")
                        .multiple(true)
                        .index(1),
                ),
        )
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .default_value("3")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("replay")
                .about("Replay every game of a PGN file")
                .arg(
                    Arg::with_name("FILE")
                        .help("PGN file to load games from")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("play", Some(matches)) => run_play(matches),
        ("perft", Some(matches)) => run_perft(matches),
        ("replay", Some(matches)) => run_replay(matches),
        _ => unreachable!(),
    }
}

fn load_game(fen: Option<&str>) -> Game {
    match fen {
        Some(fen) => match Game::from_fen(fen) {
            Ok(game) => game,
            Err(err) => {
                eprintln!("invalid fen: {}", err);
                process::exit(1);
            }
        },
        None => Game::new(),
    }
}

fn run_play(matches: &ArgMatches) -> ! {
    let mut game = load_game(matches.value_of("fen"));
    let json = matches.is_present("json");
    let moves: Vec<&str> = matches
        .values_of("MOVE")
        .map(|values| values.collect())
        .unwrap_or_default();

    let mut results = vec![];
    let mut failed = false;
    for notation in moves {
        let result = game.make_move(notation);
        if !json {
            println!("{}: {}", notation, result);
        }

        failed = result.has_errors();
        results.push(result);
        if failed {
            break;
        }
    }

    if json {
        let output = PlayOutput {
            results: &results,
            fen: game.as_fen(),
        };
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                eprintln!("could not serialize results: {}", err);
                process::exit(1);
            }
        }
    } else {
        println!();
        println!("{}", game.position());
        println!("{}", game.as_fen());
    }

    process::exit(if failed { 1 } else { 0 });
}

fn run_perft(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap();
    let depth = value_t_or_exit!(matches, "depth", u32);
    let game = load_game(Some(fen));

    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", game.position());
    println!();
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&game, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_replay(matches: &ArgMatches) -> ! {
    let path = matches.value_of("FILE").unwrap();
    let mut contents = String::new();
    if let Err(err) = File::open(path).and_then(|mut file| file.read_to_string(&mut contents)) {
        eprintln!("could not read {}: {}", path, err);
        process::exit(1);
    }

    let games = match pgn::parse_pgn(&contents) {
        Ok(games) => games,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    for (i, record) in games.iter().enumerate() {
        match pgn::replay(record) {
            Ok(game) => println!("game {} ({}): {}", i + 1, record.result, game.as_fen()),
            Err(err) => {
                eprintln!("game {}: {}", i + 1, err);
                process::exit(1);
            }
        }
    }

    process::exit(0);
}
