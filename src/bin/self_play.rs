//! Engine self-play.
//!
//! Plays the searcher against itself from the starting position after a few
//! random opening plies, printing the moves in SAN and the final board.
//!
//! Usage:
//! `cargo run --release --bin self_play`
//! `cargo run --release --bin self_play -- --seed 7 --movetime-ms 200 --max-plies 160`

use std::time::Duration;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use chess_core::chess_errors::ChessResult;
use chess_core::game_state::chess_types::Color;
use chess_core::game_state::position::Position;
use chess_core::search::iterative_deepening::{SearchAlgorithm, SearchConfig, Searcher};
use chess_core::utils::render_position::render_position;
use chess_core::utils::san::move_to_san;

fn parse_arg<T: std::str::FromStr>(flag: &str, default: T) -> T {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|value| value.parse::<T>().ok())
        .unwrap_or(default)
}

fn result_text(position: &Position) -> &'static str {
    if position.is_checkmate() {
        match position.side_to_move() {
            Color::White => "0-1 (checkmate)",
            Color::Black => "1-0 (checkmate)",
        }
    } else if position.is_move_rule_draw() {
        "1/2-1/2 (fifty-move rule)"
    } else if position.is_stalemate() {
        "1/2-1/2 (stalemate)"
    } else {
        "* (ply limit)"
    }
}

fn main() -> ChessResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed: u64 = parse_arg("--seed", 1);
    let random_plies: usize = parse_arg("--random-plies", 4);
    let max_plies: usize = parse_arg("--max-plies", 200);
    let move_time = Duration::from_millis(parse_arg("--movetime-ms", 100));
    let depth: u8 = parse_arg("--depth", 64);

    let mut rng = StdRng::seed_from_u64(seed);
    let config = SearchConfig {
        max_depth: depth.max(1),
        stability_cutoff: true,
        table_entries: 1 << 18,
        ..SearchConfig::default()
    };
    let mut white = Searcher::new(config);
    let mut black = Searcher::new(SearchConfig {
        algorithm: SearchAlgorithm::PrincipalVariation,
        ..config
    });

    info!("self-play: seed={seed} random_plies={random_plies} movetime={move_time:?}");

    let mut position = Position::new_game();
    let mut record = Vec::new();

    for ply in 0..max_plies {
        if position.is_game_over() {
            break;
        }

        let mv = if ply < random_plies {
            let moves = position.generate_legal_moves();
            match moves.choose(&mut rng) {
                Some(&mv) => mv,
                None => break,
            }
        } else {
            let searcher = match position.side_to_move() {
                Color::White => &mut white,
                Color::Black => &mut black,
            };
            let outcome = searcher.search(&position, Some(move_time), None);
            match outcome.best_move {
                Some(mv) => mv,
                None => {
                    warn!("search returned no move at ply {ply}");
                    break;
                }
            }
        };

        let san = move_to_san(&position, mv);
        if ply % 2 == 0 {
            record.push(format!("{}. {san}", position.fullmove_number()));
        } else {
            record.push(san);
        }
        position = position.apply_move(mv)?;
    }

    println!("{}", record.join(" "));
    println!();
    println!("{}", render_position(&position));
    println!();
    println!("{}", position.to_fen());
    println!("{}", result_text(&position));
    Ok(())
}
