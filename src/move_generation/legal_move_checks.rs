//! Attack queries used for check detection and king safety.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::leaper_attacks::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::slider_attacks::{between, bishop_attacks, rook_attacks};

/// Pieces of `attacker` that attack `square` given `occupied` as the blocking set.
pub fn attackers_to(position: &Position, square: Square, attacker: Color, occupied: u64) -> u64 {
    let them = position.color_bb(attacker);

    // A pawn of `attacker` hits `square` iff a pawn of the other color on
    // `square` would hit the pawn.
    let pawns = pawn_attacks(attacker.opposite(), square) & position.kind_bb(PieceKind::Pawn);
    let knights = knight_attacks(square) & position.kind_bb(PieceKind::Knight);
    let kings = king_attacks(square) & position.kind_bb(PieceKind::King);
    let diagonal = bishop_attacks(square, occupied) & position.bishops_and_queens();
    let orthogonal = rook_attacks(square, occupied) & position.rooks_and_queens();

    them & (pawns | knights | kings | diagonal | orthogonal)
}

#[inline]
pub fn is_square_attacked(position: &Position, square: Square, attacker: Color) -> bool {
    attackers_to(position, square, attacker, position.occupancy_all) != 0
}

/// Enemy pieces giving check to the king of `color`.
pub fn checkers(position: &Position, color: Color) -> u64 {
    match position.king_square(color) {
        Some(king) => attackers_to(position, king, color.opposite(), position.occupancy_all),
        None => 0,
    }
}

#[inline]
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    checkers(position, color) != 0
}

/// Pieces (of either color) that are the only piece between `king` and an
/// enemy slider aimed at it.
pub fn slider_blockers(position: &Position, king: Square, color: Color) -> u64 {
    let snipers = position.color_bb(color.opposite())
        & ((rook_attacks(king, 0) & position.rooks_and_queens())
            | (bishop_attacks(king, 0) & position.bishops_and_queens()));

    let mut blockers = 0u64;
    let mut remaining = snipers;
    while remaining != 0 {
        let sniper = remaining.trailing_zeros() as Square;
        let in_between = between(king, sniper) & position.occupancy_all;
        if in_between.count_ones() == 1 {
            blockers |= in_between;
        }
        remaining &= remaining - 1;
    }

    blockers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_has_no_checks() {
        let start = Position::starting();
        assert!(!is_king_in_check(start, Color::Light));
        assert!(!is_king_in_check(start, Color::Dark));
        // f3 is covered by the g2 pawn, the e2 pawn and the g1 knight.
        assert_eq!(attackers_to(start, 21, Color::Light, start.occupancy_all).count_ones(), 3);
    }

    #[test]
    fn pinned_knight_is_a_slider_blocker() {
        let (position, _) = parse_fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1").expect("fen should parse");
        let e1 = 4u8;
        let e2 = 12u8;
        assert_eq!(slider_blockers(&position, e1, Color::Light), 1u64 << e2);
        assert!(!is_king_in_check(&position, Color::Light));
    }

    #[test]
    fn double_check_reports_two_checkers() {
        let (position, _) = parse_fen("4k3/8/8/8/8/8/4r3/R3K2r w - - 0 1").expect("fen should parse");
        assert_eq!(checkers(&position, Color::Light).count_ones(), 2);
    }
}
