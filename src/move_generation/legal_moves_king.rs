use crate::game_state::chess_rules::{KING_START_FILE, ROOK_START_FILES};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::attackers_to;
use crate::moves::chess_move::Move;
use crate::moves::leaper_attacks::king_attacks;
use crate::moves::slider_attacks::between;

/// King steps into `target` that do not land on an attacked square.
pub fn generate_safe_king_moves(
    position: &Position,
    side: Color,
    king: Square,
    target: u64,
    out: &mut Vec<Move>,
) {
    let mut steps = king_attacks(king) & target;
    while steps != 0 {
        let to = steps.trailing_zeros() as Square;
        if attackers_to(position, to, side.opposite(), position.occupancy_all) == 0 {
            out.push(Move::Normal {
                kind: PieceKind::King,
                from: king,
                capture: position.kind_at(to),
                to,
            });
        }
        steps &= steps - 1;
    }
}

/// Rooks that may still castle with the king of `side`.
///
/// Nothing records whether king or rook have moved, so the right is read off
/// the placement: king and rook both on their starting squares.
pub fn inferred_castling_rooks(position: &Position, side: Color) -> u64 {
    let rank = side.back_rank();
    let king_home = make_square(KING_START_FILE, rank);
    if position.pieces(side, PieceKind::King) & (1u64 << king_home) == 0 {
        return 0;
    }

    let rooks = position.pieces(side, PieceKind::Rook);
    ROOK_START_FILES
        .into_iter()
        .map(|file| 1u64 << make_square(file, rank))
        .filter(|mask| rooks & mask != 0)
        .fold(0u64, |acc, mask| acc | mask)
}

/// Castling moves for a king that is not in check.
pub fn generate_castling_moves(position: &Position, side: Color, king: Square, out: &mut Vec<Move>) {
    let mut rooks = inferred_castling_rooks(position, side);
    while rooks != 0 {
        let rook = rooks.trailing_zeros() as Square;
        rooks &= rooks - 1;

        if between(king, rook) & position.occupancy_all != 0 {
            continue;
        }

        let castle = Move::Castle { king, rook };
        let Some((king_to, _)) = castle.castle_destinations() else {
            continue;
        };

        // The king must not pass through or land on an attacked square. It
        // is lifted from the occupancy so it cannot shield its own path.
        let occupied = position.occupancy_all ^ (1u64 << king);
        let path = between(king, king_to) | (1u64 << king) | (1u64 << king_to);
        let mut remaining = path;
        let mut safe = true;
        while remaining != 0 {
            let sq = remaining.trailing_zeros() as Square;
            if attackers_to(position, sq, side.opposite(), occupied) != 0 {
                safe = false;
                break;
            }
            remaining &= remaining - 1;
        }

        if safe {
            out.push(castle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn castling_is_inferred_from_placement() {
        let (position, side) = parse_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("fen should parse");
        assert_eq!(inferred_castling_rooks(&position, side), 1 | (1u64 << 7));

        let mut moves = Vec::new();
        generate_castling_moves(&position, side, 4, &mut moves);
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn attacked_transit_square_blocks_king_side_only() {
        let (position, side) = parse_fen("4k3/8/8/8/8/8/5r2/R3K2R w - - 0 1").expect("fen should parse");
        let mut moves = Vec::new();
        generate_castling_moves(&position, side, 4, &mut moves);
        assert_eq!(moves, vec![Move::Castle { king: 4, rook: 0 }]);
    }

    #[test]
    fn moved_king_has_no_castling_rooks() {
        let (position, side) = parse_fen("4k3/8/8/8/8/8/8/R4K1R w - - 0 1").expect("fen should parse");
        assert_eq!(inferred_castling_rooks(&position, side), 0);
    }
}
