use std::sync::Arc;
use std::thread;

use crate::game_state::position::Position;
use crate::move_generation::move_generator::{LegalMoveGenerator, MoveGenerator};
use crate::moves::move_descriptions::Move;

/// Leaf statistics of a perft run, matching the columns of published
/// perft tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    pub fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn single_node() -> Self {
        PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        }
    }
}

pub fn perft<G: MoveGenerator + ?Sized>(generator: &G, position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts::single_node();
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(position) {
        perft_recurse(generator, position, mv, depth, 1, &mut total);
    }
    total
}

/// Perft with one worker thread per root move. A panicking worker
/// propagates its panic to the caller.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    position: &Position,
    depth: u8,
) -> PerftCounts {
    if depth == 0 {
        return PerftCounts::single_node();
    }

    let root_moves = generator.generate_legal_moves(position);
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let generator_ref = Arc::clone(&generator);
        let root = position.clone();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            perft_recurse(generator_ref.as_ref(), &root, mv, depth, 1, &mut local);
            local
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
        total.merge(local);
    }

    total
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    parent: &Position,
    mv: Move,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    let child = parent.make_move(mv);

    if current_depth == search_depth {
        counts.nodes += 1;
        if mv.is_capture() {
            counts.captures += 1;
        }
        if mv.is_en_passant() {
            counts.en_passant += 1;
        }
        if mv.is_castle() {
            counts.castles += 1;
        }
        if mv.is_promotion() {
            counts.promotions += 1;
        }
        if child.is_in_check(child.side_to_move()) {
            counts.checks += 1;
            if generator.generate_legal_moves(&child).is_empty() {
                counts.checkmates += 1;
            }
        }
        return;
    }

    for next in generator.generate_legal_moves(&child) {
        perft_recurse(generator, &child, next, search_depth, current_depth + 1, counts);
    }
}

/// Node count only, with bulk counting at the last ply.
pub fn perft_nodes<G: MoveGenerator + ?Sized>(generator: &G, position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generator.generate_legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| perft_nodes(generator, &position.make_move(mv), depth - 1))
        .sum()
}

/// Node counts below each root move, in generation order.
pub fn divide(position: &Position, depth: u8) -> Vec<(Move, u64)> {
    let generator = LegalMoveGenerator;
    generator
        .generate_legal_moves(position)
        .into_iter()
        .map(|mv| {
            let nodes = perft_nodes(&generator, &position.make_move(mv), depth.saturating_sub(1));
            (mv, nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::move_generator::FilteredMoveGenerator;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    const POSITION_6: &str =
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn depth_zero_counts_single_node() {
        let counts = perft(&LegalMoveGenerator, &Position::new_game(), 0);
        assert_eq!(counts, PerftCounts::single_node());
    }

    #[test]
    fn start_position_node_counts() {
        let start = Position::new_game();
        assert_eq!(perft_nodes(&LegalMoveGenerator, &start, 1), 20);
        assert_eq!(perft_nodes(&LegalMoveGenerator, &start, 2), 400);
        assert_eq!(perft_nodes(&LegalMoveGenerator, &start, 3), 8_902);
        assert_eq!(perft_nodes(&LegalMoveGenerator, &start, 4), 197_281);
    }

    #[test]
    fn start_position_leaf_statistics() {
        let counts = perft(&LegalMoveGenerator, &Position::new_game(), 3);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 8_902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn kiwipete_leaf_statistics() {
        let counts = perft(&LegalMoveGenerator, &pos(KIWIPETE), 2);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 2_039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn published_suite_node_counts() {
        assert_eq!(perft_nodes(&LegalMoveGenerator, &pos(KIWIPETE), 3), 97_862);
        assert_eq!(perft_nodes(&LegalMoveGenerator, &pos(POSITION_3), 4), 43_238);
        assert_eq!(perft_nodes(&LegalMoveGenerator, &pos(POSITION_4), 3), 9_467);
        assert_eq!(perft_nodes(&LegalMoveGenerator, &pos(POSITION_5), 3), 62_379);
        assert_eq!(perft_nodes(&LegalMoveGenerator, &pos(POSITION_6), 3), 89_890);
    }

    #[test]
    fn position_3_leaf_statistics() {
        let counts = perft(&LegalMoveGenerator, &pos(POSITION_3), 3);
        assert_eq!(counts.nodes, 2_812);
        assert_eq!(counts.captures, 209);
        assert_eq!(counts.en_passant, 2);
        assert_eq!(counts.checks, 267);
    }

    #[test]
    fn filtered_generator_matches_legal_generator() {
        for (fen, depth) in [(KIWIPETE, 2), (POSITION_3, 3), (POSITION_4, 2), (POSITION_5, 2)] {
            let position = pos(fen);
            assert_eq!(
                perft(&FilteredMoveGenerator, &position, depth),
                perft(&LegalMoveGenerator, &position, depth),
                "generators disagree on {fen}"
            );
        }
    }

    #[test]
    fn multi_threaded_matches_single_threaded() {
        let generator: Arc<dyn MoveGenerator> = Arc::new(LegalMoveGenerator);
        let position = pos(KIWIPETE);
        let threaded = perft_multi_threaded(generator, &position, 2);
        assert_eq!(threaded, perft(&LegalMoveGenerator, &position, 2));
    }

    #[test]
    fn divide_sums_to_perft() {
        let position = pos(POSITION_4);
        let split = divide(&position, 3);
        assert_eq!(split.len(), 6);
        assert_eq!(split.iter().map(|(_, nodes)| nodes).sum::<u64>(), 9_467);
    }
}
