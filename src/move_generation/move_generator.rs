use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;

/// A legal move paired with the position it produces.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub chess_move: Move,
    pub position_after: Position,
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, position: &Position, side_to_move: Color) -> Vec<GeneratedMove>;
}
