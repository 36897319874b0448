use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;
use crate::moves::leaper_attacks::knight_attacks;
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

/// Knight, bishop, rook and queen moves landing inside `target`.
pub fn generate_piece_moves(position: &Position, side: Color, target: u64, out: &mut Vec<Move>) {
    let occupied = position.occupancy_all;

    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ] {
        let mut pieces = position.pieces(side, kind);
        while pieces != 0 {
            let from = pieces.trailing_zeros() as Square;
            let reach = match kind {
                PieceKind::Knight => knight_attacks(from),
                PieceKind::Bishop => bishop_attacks(from, occupied),
                PieceKind::Rook => rook_attacks(from, occupied),
                _ => queen_attacks(from, occupied),
            };

            let mut targets = reach & target;
            while targets != 0 {
                let to = targets.trailing_zeros() as Square;
                out.push(Move::Normal {
                    kind,
                    from,
                    capture: position.kind_at(to),
                    to,
                });
                targets &= targets - 1;
            }

            pieces &= pieces - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_knights_move_from_the_starting_position() {
        let start = Position::starting();
        let mut moves = Vec::new();
        generate_piece_moves(start, Color::Light, !start.color_bb(Color::Light), &mut moves);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.kind() == PieceKind::Knight));
    }
}
