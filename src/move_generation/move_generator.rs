use crate::game_state::position::Position;
use crate::moves::move_descriptions::MoveList;

/// A source of legal moves for a position. Perft and the benches are
/// generic over this so the generators can be checked against each other.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, position: &Position) -> MoveList;
}

/// Direct legal generation, restricted to check evasions when in check.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, position: &Position) -> MoveList {
        position.generate_legal_moves()
    }
}

/// The pseudo-legal list filtered one move at a time with `is_legal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilteredMoveGenerator;

impl MoveGenerator for FilteredMoveGenerator {
    fn generate_legal_moves(&self, position: &Position) -> MoveList {
        position
            .generate_pseudo_legal_moves()
            .into_iter()
            .filter(|&mv| position.is_legal(mv))
            .collect()
    }
}
