//! Full legal move generation.
//!
//! Moves are generated against a target mask that already encodes check
//! evasion (capture the checker or block its line). King steps are checked
//! for safety as they are generated. A final filter removes moves of pinned
//! pieces that leave their line and en-passant captures that expose the
//! king; it only runs when a slider blocker exists or en passant is possible.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{attackers_to, slider_blockers};
use crate::move_generation::legal_moves_king::{generate_castling_moves, generate_safe_king_moves};
use crate::move_generation::legal_moves_pawn::{generate_en_passant, generate_pawn_moves};
use crate::move_generation::legal_moves_pieces::generate_piece_moves;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::chess_move::Move;
use crate::moves::slider_attacks::{aligned, between, bishop_attacks, line, rook_attacks};

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, position: &Position, side_to_move: Color) -> Vec<GeneratedMove> {
        legal_moves(position, side_to_move)
            .into_iter()
            .map(|chess_move| GeneratedMove {
                position_after: apply_move(position, &chess_move, side_to_move),
                chess_move,
            })
            .collect()
    }
}

/// Every legal move for `side` in `position`. Order is unspecified.
pub fn legal_moves(position: &Position, side: Color) -> Vec<Move> {
    let mut moves = Vec::<Move>::with_capacity(64);
    let us = position.color_bb(side);

    let has_en_passant = generate_en_passant(position, side, &mut moves);

    let Some(king) = position.king_square(side) else {
        // Kingless setups only occur in hand-built positions; nothing to protect.
        generate_pawn_moves(position, side, !us, &mut moves);
        generate_piece_moves(position, side, !us, &mut moves);
        return moves;
    };

    let checkers = attackers_to(position, king, side.opposite(), position.occupancy_all);
    if checkers == 0 {
        let target = !us;
        generate_pawn_moves(position, side, target, &mut moves);
        generate_piece_moves(position, side, target, &mut moves);
        generate_safe_king_moves(position, side, king, target, &mut moves);
        generate_castling_moves(position, side, king, &mut moves);
    } else {
        generate_evasions(position, side, king, checkers, &mut moves);
    }

    let blockers = slider_blockers(position, king, side);
    if blockers != 0 || has_en_passant {
        moves.retain(|m| is_safe(position, side, king, m, blockers));
    }

    moves
}

fn generate_evasions(position: &Position, side: Color, king: Square, checkers: u64, out: &mut Vec<Move>) {
    let us = position.color_bb(side);
    let sliders = checkers & (position.rooks_and_queens() | position.bishops_and_queens());

    // Stepping back along a checking line stays in check; the king itself
    // still shadows those squares in the current occupancy.
    let mut attacked = 0u64;
    let mut remaining = sliders;
    while remaining != 0 {
        let slider = remaining.trailing_zeros() as Square;
        attacked |= line(king, slider) ^ (1u64 << slider);
        remaining &= remaining - 1;
    }

    generate_safe_king_moves(position, side, king, !us & !attacked, out);

    if checkers.count_ones() == 1 {
        let checker = checkers.trailing_zeros() as Square;
        let target = between(king, checker) | checkers;
        generate_pawn_moves(position, side, target, out);
        generate_piece_moves(position, side, target, out);
    }
}

fn is_safe(position: &Position, side: Color, king: Square, chess_move: &Move, blockers: u64) -> bool {
    match *chess_move {
        Move::Normal { from, to, .. } | Move::Promotion { from, to, .. } => {
            position.color_bb(side) & blockers & (1u64 << from) == 0 || aligned(from, to, king)
        }
        Move::EnPassant { from, to } => {
            let captured = make_square(square_file(to), square_rank(from));
            let occupied = (position.occupancy_all ^ (1u64 << from) ^ (1u64 << captured)) | (1u64 << to);
            let them = position.color_bb(side.opposite());

            rook_attacks(king, occupied) & them & position.rooks_and_queens() == 0
                && bishop_attacks(king, occupied) & them & position.bishops_and_queens() == 0
        }
        Move::Castle { .. } => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn legal_from_fen(fen: &str) -> Vec<Move> {
        let (position, side) = parse_fen(fen).expect("fen should parse");
        legal_moves(&position, side)
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        assert_eq!(legal_moves(Position::starting(), Color::Light).len(), 20);
        assert_eq!(legal_moves(Position::starting(), Color::Dark).len(), 20);
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let moves = legal_from_fen("4k3/8/8/8/8/8/4r3/R3K2r w - - 0 1");
        assert_eq!(
            moves,
            vec![Move::Normal {
                kind: PieceKind::King,
                from: 4,
                capture: Some(PieceKind::Rook),
                to: 12,
            }]
        );
    }

    #[test]
    fn single_check_limits_pieces_to_blocking_squares() {
        // Rook on e8 checks the king on e1; the d2 bishop only crosses the
        // e-file on e3.
        let moves = legal_from_fen("4r1k1/8/8/8/8/8/3B4/4K3 w - - 0 1");
        let non_king: Vec<_> = moves.iter().filter(|m| m.kind() != PieceKind::King).collect();
        assert_eq!(non_king.len(), 1);
        assert_eq!(non_king[0].to(), 20);
        // d1, f1 and f2; e2 stays on the checking file.
        assert_eq!(moves.len() - non_king.len(), 3);
    }

    #[test]
    fn pinned_piece_stays_on_its_line() {
        let moves = legal_from_fen("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1");
        let rook_moves: Vec<_> = moves.iter().filter(|m| m.kind() == PieceKind::Rook).collect();
        // e3..e6 and the capture on e7.
        assert_eq!(rook_moves.len(), 5);
        assert!(rook_moves.iter().all(|m| square_file(m.to()) == 4));
    }

    #[test]
    fn en_passant_exposing_king_on_rank_is_rejected() {
        let moves = legal_from_fen("8/8/8/KPp4r/8/8/8/7k w - c6 0 1");
        assert!(moves.iter().all(|m| !m.is_en_passant()));
        assert!(moves.iter().any(|m| m.from() == 33 && m.to() == 41));
    }

    #[test]
    fn en_passant_is_generated_when_safe() {
        let moves = legal_from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert!(moves.contains(&Move::EnPassant { from: 36, to: 43 }));
    }

    #[test]
    fn castling_is_not_allowed_out_of_check() {
        let moves = legal_from_fen("4k3/8/8/8/8/8/4r3/R3K2r w - - 0 1");
        assert!(moves.iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn king_cannot_retreat_along_checking_ray() {
        // Rook a1 checks along the first rank; f1 stays attacked behind the king.
        let moves = legal_from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert!(moves.iter().all(|m| m.to() != 5 && m.to() != 3));
        assert_eq!(moves.len(), 3);
    }
}
