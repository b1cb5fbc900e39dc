//! Perft runner.
//!
//! Usage:
//! `cargo run --release --bin perft_runner`
//! `cargo run --release --bin perft_runner -- --depth 5`
//! `cargo run --release --bin perft_runner -- --fen "<fen>" --depth 4 --divide`
//! `cargo run --release --bin perft_runner -- --threads`

use std::sync::Arc;
use std::time::Instant;

use log::{error, info};

use chess_core::chess_errors::ChessResult;
use chess_core::game_state::position::Position;
use chess_core::move_generation::move_generator::{LegalMoveGenerator, MoveGenerator};
use chess_core::move_generation::perft::{divide, perft, perft_multi_threaded, PerftCounts};

/// Reference positions with published node counts per depth.
const SUITE: &[(&str, &str, &[u64])] = &[
    (
        "startpos",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[20, 400, 8902, 197_281, 4_865_609],
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[48, 2039, 97_862, 4_085_603],
    ),
    (
        "position_3",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        &[14, 191, 2812, 43_238, 674_624],
    ),
    (
        "position_4",
        "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        &[6, 264, 9467, 422_333],
    ),
    (
        "position_5",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[44, 1486, 62_379, 2_103_487],
    ),
    (
        "position_6",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        &[46, 2079, 89_890, 3_894_594],
    ),
];

struct Options {
    depth: u8,
    fen: Option<String>,
    divide: bool,
    threads: bool,
}

fn parse_options() -> Options {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut options = Options {
        depth: 4,
        fen: None,
        divide: false,
        threads: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--depth" => {
                if let Some(depth) = args.get(i + 1).and_then(|v| v.parse::<u8>().ok()) {
                    options.depth = depth.max(1);
                }
                i += 1;
            }
            "--fen" => {
                options.fen = args.get(i + 1).cloned();
                i += 1;
            }
            "--divide" => options.divide = true,
            "--threads" => options.threads = true,
            other => error!("ignoring unknown argument '{other}'"),
        }
        i += 1;
    }
    options
}

fn count(position: &Position, depth: u8, threaded: bool) -> PerftCounts {
    if threaded {
        let generator: Arc<dyn MoveGenerator> = Arc::new(LegalMoveGenerator);
        perft_multi_threaded(generator, position, depth)
    } else {
        perft(&LegalMoveGenerator, position, depth)
    }
}

fn report(name: &str, depth: u8, counts: &PerftCounts, elapsed_ms: u128) {
    let nps = if elapsed_ms == 0 {
        counts.nodes
    } else {
        (counts.nodes as u128 * 1000 / elapsed_ms) as u64
    };
    println!(
        "{name} d{depth}: nodes={} captures={} ep={} castles={} promotions={} checks={} mates={} elapsed_ms={elapsed_ms} nps={nps}",
        counts.nodes,
        counts.captures,
        counts.en_passant,
        counts.castles,
        counts.promotions,
        counts.checks,
        counts.checkmates,
    );
}

fn run_single(fen: &str, options: &Options) -> ChessResult<()> {
    let position = Position::from_fen(fen)?;

    if options.divide {
        let start = Instant::now();
        let mut total = 0;
        for (mv, nodes) in divide(&position, options.depth) {
            println!("{mv}: {nodes}");
            total += nodes;
        }
        println!("total: {total} ({} ms)", start.elapsed().as_millis());
        return Ok(());
    }

    let start = Instant::now();
    let counts = count(&position, options.depth, options.threads);
    report("custom", options.depth, &counts, start.elapsed().as_millis());
    Ok(())
}

fn run_suite(options: &Options) -> ChessResult<bool> {
    let mut all_match = true;
    for &(name, fen, expected) in SUITE {
        let position = Position::from_fen(fen)?;
        let deepest = usize::from(options.depth).min(expected.len());
        for depth in 1..=deepest {
            let start = Instant::now();
            let counts = count(&position, depth as u8, options.threads);
            report(name, depth as u8, &counts, start.elapsed().as_millis());

            let want = expected[depth - 1];
            if counts.nodes != want {
                error!("{name} depth {depth}: expected {want} nodes, found {}", counts.nodes);
                all_match = false;
            }
        }
    }
    Ok(all_match)
}

fn main() -> ChessResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_options();
    match options.fen.clone() {
        Some(fen) => run_single(&fen, &options),
        None => {
            info!("perft suite: depth={} threaded={}", options.depth, options.threads);
            if !run_suite(&options)? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
