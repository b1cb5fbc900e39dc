use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_core::game_state::position::Position;
use chess_core::search::iterative_deepening::{SearchAlgorithm, SearchConfig, Searcher};

const CASES: &[(&str, &str)] = &[
    (
        "startpos",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "classical_mid",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    ),
    (
        "tactical",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("end_kpk", "8/8/8/8/8/4k3/4P3/4K3 w - - 0 1"),
];

const DEPTH: u8 = 4;

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("search_d{DEPTH}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(6));
    group.sample_size(10);

    for algorithm in [SearchAlgorithm::AlphaBeta, SearchAlgorithm::PrincipalVariation] {
        for &(name, fen) in CASES {
            let position = Position::from_fen(fen).expect("benchmark FEN should parse");
            let config = SearchConfig {
                max_depth: DEPTH,
                algorithm,
                table_entries: 1 << 16,
                ..SearchConfig::default()
            };

            group.bench_with_input(
                BenchmarkId::new(format!("{algorithm:?}"), name),
                &position,
                |b, position| {
                    b.iter(|| {
                        // Fresh table per run so iterations do not feed each other.
                        let mut searcher = Searcher::new(config);
                        let outcome = searcher.search(black_box(position), None, None);
                        assert!(outcome.best_move.is_some());
                        black_box(outcome.score)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
