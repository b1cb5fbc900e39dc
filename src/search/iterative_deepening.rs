//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! Each `Searcher` owns its transposition table. A search deepens one ply at
//! a time until the depth cap, the wall-clock deadline, or (optionally) a run
//! of identical best moves ends it. The deadline is checked on entry to every
//! node and before each child; once it passes, the current iteration is
//! abandoned and the previous iteration's result stands.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::Move;
use crate::search::evaluation::MATERIAL_VALUES;
use crate::search::transposition_table::{Bound, TTEntry, TTStats, TranspositionTable};

/// Magnitude of a checkmate score. A mate found `ply` half-moves from the
/// root scores `MATE_VALUE - ply` for the winning side.
pub const MATE_VALUE: i32 = 100_000;
const INFINITY: i32 = MATE_VALUE + 1;
const MATE_THRESHOLD: i32 = MATE_VALUE - 1_000;
const MAX_PLY: u8 = 127;
/// Entries older than this many full moves are pruned before each search.
const TABLE_AGE_WINDOW: u16 = 3;

const STABLE_DEPTHS: u32 = 8;
const STABLE_DEPTHS_LATE: u32 = 5;
const LATE_SEARCH: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchAlgorithm {
    #[default]
    AlphaBeta,
    /// Null-window probe for every move after the first, with a full
    /// re-search when the probe lands inside the window.
    PrincipalVariation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub algorithm: SearchAlgorithm,
    /// Stop once the best move has repeated for 8 depths, or 5 after 20s.
    pub stability_cutoff: bool,
    pub table_entries: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 100,
            algorithm: SearchAlgorithm::AlphaBeta,
            stability_cutoff: false,
            table_entries: 1 << 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    DepthLimit,
    Deadline,
    Stable,
    NoLegalMoves,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Option<Move>,
    /// Side-to-move relative score of the last completed depth.
    pub score: i32,
    pub depth_reached: u8,
    pub nodes: u64,
    pub elapsed: Duration,
    pub stop_reason: StopReason,
}

#[derive(Debug)]
pub struct Searcher {
    config: SearchConfig,
    table: TranspositionTable,
    nodes: u64,
    deadline: Option<Instant>,
    aborted: bool,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            table: TranspositionTable::new(config.table_entries),
            config,
            nodes: 0,
            deadline: None,
            aborted: false,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TranspositionTable {
        &mut self.table
    }

    pub fn table_stats(&self) -> TTStats {
        self.table.stats()
    }

    /// Search `position` within `time_budget` (unbounded when `None`).
    /// `hint` is tried first at the root of the first iteration.
    ///
    /// When legal moves exist a move is always returned, even if the deadline
    /// cut the first iteration short.
    pub fn search(
        &mut self,
        position: &Position,
        time_budget: Option<Duration>,
        hint: Option<Move>,
    ) -> SearchOutcome {
        let started_at = Instant::now();
        self.deadline = time_budget.map(|budget| started_at + budget);
        self.nodes = 0;
        self.aborted = false;

        self.table
            .prune_older_than(position.fullmove_number().saturating_sub(TABLE_AGE_WINDOW));

        let legal_moves = position.generate_legal_moves();
        if legal_moves.is_empty() {
            let outcome = SearchOutcome {
                best_move: None,
                score: terminal_score(position, 0),
                depth_reached: 0,
                nodes: 1,
                elapsed: started_at.elapsed(),
                stop_reason: StopReason::NoLegalMoves,
            };
            info!("search finished: no legal moves in {}", position.to_fen());
            return outcome;
        }

        let mut best_move = None;
        let mut score = 0;
        let mut depth_reached = 0;
        let mut stable_depths = 0u32;
        let mut stop_reason = StopReason::DepthLimit;
        let mut move_hint = hint;

        for depth in 1..=self.config.max_depth {
            if self.out_of_time() {
                stop_reason = StopReason::Deadline;
                break;
            }

            let (iteration_move, iteration_score) = self.search_root(position, depth, move_hint);
            if self.aborted {
                best_move = best_move.or(iteration_move);
                stop_reason = StopReason::Deadline;
                break;
            }

            if iteration_move.is_some() && iteration_move == best_move {
                stable_depths += 1;
            } else {
                stable_depths = 1;
            }
            best_move = iteration_move;
            score = iteration_score;
            depth_reached = depth;
            move_hint = iteration_move;

            debug!(
                "depth {depth}: score {score}, best {}, nodes {}",
                best_move.map_or_else(|| "-".to_owned(), |mv| mv.to_string()),
                self.nodes
            );

            if self.config.stability_cutoff
                && (stable_depths >= STABLE_DEPTHS
                    || (stable_depths >= STABLE_DEPTHS_LATE && started_at.elapsed() >= LATE_SEARCH))
            {
                stop_reason = StopReason::Stable;
                break;
            }
        }

        let best_move = best_move.or_else(|| legal_moves.first().copied());
        let outcome = SearchOutcome {
            best_move,
            score,
            depth_reached,
            nodes: self.nodes,
            elapsed: started_at.elapsed(),
            stop_reason,
        };
        info!(
            "search finished ({:?}): depth {}, score {}, nodes {}, {:?}",
            outcome.stop_reason, outcome.depth_reached, outcome.score, outcome.nodes, outcome.elapsed
        );
        outcome
    }

    /// Full-window search of `position` to exactly `depth` plies without a
    /// deadline. Returns the best move and its side-to-move relative score.
    pub fn search_depth(&mut self, position: &Position, depth: u8) -> (Option<Move>, i32) {
        self.deadline = None;
        self.aborted = false;
        self.search_root(position, depth.max(1), None)
    }

    fn search_root(&mut self, position: &Position, depth: u8, hint: Option<Move>) -> (Option<Move>, i32) {
        let key = position.zobrist_key();
        let mut moves = position.generate_legal_moves();
        if moves.is_empty() {
            return (None, terminal_score(position, 0));
        }

        let table_move = self.table.probe(key).and_then(|entry| entry.best_move);
        order_moves(position, &mut moves, table_move, hint);

        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best_move = None;
        let mut best_score = -INFINITY;

        for (i, &mv) in moves.iter().enumerate() {
            if self.out_of_time() {
                break;
            }
            let child = position.make_move(mv);
            let score = self.search_child(&child, depth - 1, alpha, beta, 1, i);
            if self.aborted {
                break;
            }
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
        }

        if !self.aborted {
            self.store(position, depth, best_score, Bound::Exact, best_move, 0);
        }
        (best_move, best_score)
    }

    /// Score of `child` from the parent's point of view.
    fn search_child(
        &mut self,
        child: &Position,
        depth: u8,
        alpha: i32,
        beta: i32,
        ply: u8,
        move_index: usize,
    ) -> i32 {
        if self.config.algorithm == SearchAlgorithm::PrincipalVariation
            && move_index > 0
            && alpha > -INFINITY
        {
            let probe = -self.negamax(child, depth, -alpha - 1, -alpha, ply);
            if probe <= alpha || probe >= beta || self.aborted {
                return probe;
            }
        }
        -self.negamax(child, depth, -beta, -alpha, ply)
    }

    fn negamax(&mut self, position: &Position, depth: u8, mut alpha: i32, mut beta: i32, ply: u8) -> i32 {
        self.nodes += 1;

        if self.out_of_time() {
            return self.quiescence(position, alpha, beta, ply);
        }

        // No line from here can beat a mate already found nearer the root.
        alpha = alpha.max(-(MATE_VALUE - i32::from(ply)));
        beta = beta.min(MATE_VALUE - i32::from(ply) - 1);
        if alpha >= beta {
            return alpha;
        }

        let key = position.zobrist_key();
        let alpha_orig = alpha;
        let mut table_move = None;

        if let Some(entry) = self.table.probe(key) {
            table_move = entry.best_move;
            if entry.depth >= depth {
                let stored = score_from_table(entry.score, ply);
                match entry.bound {
                    Bound::Exact => return stored,
                    Bound::Lower => alpha = alpha.max(stored),
                    Bound::Upper => beta = beta.min(stored),
                }
                if alpha >= beta {
                    return stored;
                }
            }
        }

        if depth == 0 || ply >= MAX_PLY {
            return self.quiescence(position, alpha, beta, ply);
        }

        let mut moves = position.generate_legal_moves();
        if moves.is_empty() {
            return terminal_score(position, ply);
        }
        if position.is_move_rule_draw() {
            return 0;
        }
        order_moves(position, &mut moves, table_move, None);

        let mut best_score = -INFINITY;
        let mut best_move = None;

        for (i, &mv) in moves.iter().enumerate() {
            if self.out_of_time() {
                return alpha.max(best_score);
            }
            let child = position.make_move(mv);
            let score = self.search_child(&child, depth - 1, alpha, beta, ply + 1, i);
            if self.aborted {
                return alpha.max(best_score);
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score >= beta {
                self.store(position, depth, score, Bound::Lower, best_move, ply);
                return score;
            }
            alpha = alpha.max(score);
        }

        let bound = if best_score > alpha_orig {
            Bound::Exact
        } else {
            Bound::Upper
        };
        self.store(position, depth, best_score, bound, best_move, ply);
        best_score
    }

    /// Capture-only search from a static stand-pat score. In check every
    /// evasion is searched and stand-pat does not apply.
    fn quiescence(&mut self, position: &Position, mut alpha: i32, beta: i32, ply: u8) -> i32 {
        self.nodes += 1;
        let in_check = position.is_in_check(position.side_to_move());

        if ply >= MAX_PLY {
            return position.evaluate_for_side_to_move();
        }

        let mut moves = if in_check {
            let evasions = position.generate_legal_moves();
            if evasions.is_empty() {
                return terminal_score(position, ply);
            }
            evasions
        } else {
            let stand_pat = position.evaluate_for_side_to_move();
            if stand_pat >= beta {
                return beta;
            }
            alpha = alpha.max(stand_pat);
            position.generate_legal_captures()
        };
        order_moves(position, &mut moves, None, None);

        for mv in moves {
            let score = -self.quiescence(&position.make_move(mv), -beta, -alpha, ply + 1);
            if score >= beta {
                return beta;
            }
            alpha = alpha.max(score);
        }
        alpha
    }

    fn store(
        &mut self,
        position: &Position,
        depth: u8,
        score: i32,
        bound: Bound,
        best_move: Option<Move>,
        ply: u8,
    ) {
        self.table.store(TTEntry {
            signature: position.zobrist_key(),
            best_move,
            depth,
            score: score_to_table(score, ply),
            bound,
            age: position.fullmove_number(),
        });
    }

    fn out_of_time(&mut self) -> bool {
        if !self.aborted {
            if let Some(deadline) = self.deadline {
                self.aborted = Instant::now() >= deadline;
            }
        }
        self.aborted
    }
}

fn terminal_score(position: &Position, ply: u8) -> i32 {
    if position.is_in_check(position.side_to_move()) {
        -(MATE_VALUE - i32::from(ply))
    } else {
        0
    }
}

/// Mate scores are stored relative to the node, not the root.
#[inline]
fn score_to_table(score: i32, ply: u8) -> i32 {
    if score >= MATE_THRESHOLD {
        score + i32::from(ply)
    } else if score <= -MATE_THRESHOLD {
        score - i32::from(ply)
    } else {
        score
    }
}

#[inline]
fn score_from_table(score: i32, ply: u8) -> i32 {
    if score >= MATE_THRESHOLD {
        score - i32::from(ply)
    } else if score <= -MATE_THRESHOLD {
        score + i32::from(ply)
    } else {
        score
    }
}

/// Table move, then hint, then captures by most valuable victim and least
/// valuable attacker, then quiet moves in generation order.
fn order_moves(position: &Position, moves: &mut [Move], table_move: Option<Move>, hint: Option<Move>) {
    moves.sort_by_cached_key(|&mv| -move_order_score(position, mv, table_move, hint));
}

fn move_order_score(position: &Position, mv: Move, table_move: Option<Move>, hint: Option<Move>) -> i32 {
    if Some(mv) == table_move {
        return 1_000_000;
    }
    if Some(mv) == hint {
        return 900_000;
    }

    let mut score = 0;
    if mv.is_capture() {
        let us = position.side_to_move();
        let victim = if mv.is_en_passant() {
            PieceKind::Pawn
        } else {
            position
                .piece_kind_on(us.opposite(), mv.to())
                .unwrap_or(PieceKind::Pawn)
        };
        let attacker = position.piece_kind_on(us, mv.from()).unwrap_or(PieceKind::Pawn);
        score += 100_000 + piece_value(victim) * 16 - piece_value(attacker).min(1_000);
    }
    if let Some(promoted) = mv.promotion_piece() {
        score += 90_000 + piece_value(promoted);
    }
    score
}

#[inline]
fn piece_value(piece: PieceKind) -> i32 {
    MATERIAL_VALUES[piece.index()]
}
