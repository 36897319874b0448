//! Move application.
//!
//! Produces the successor placement and decides whether the new position
//! carries an en-passant target.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;
use crate::moves::leaper_attacks::pawn_attacks;

/// Return the position after `side` plays `chess_move`.
pub fn apply_move(position: &Position, chess_move: &Move, side: Color) -> Position {
    let mut next = position.clone();
    apply_move_in_place(&mut next, chess_move, side);
    next
}

pub fn apply_move_in_place(position: &mut Position, chess_move: &Move, side: Color) {
    position.en_passant_square = None;

    match *chess_move {
        Move::Normal { kind, from, to, .. } => {
            position.discard(from);
            position.put(to, Piece::new(side, kind));

            if kind == PieceKind::Pawn && from.abs_diff(to) == 16 {
                let skipped = (from + to) / 2;
                let enemy_pawns = position.pieces(side.opposite(), PieceKind::Pawn);
                if pawn_attacks(side, skipped) & enemy_pawns != 0 {
                    position.en_passant_square = Some(skipped);
                }
            }
        }
        Move::Promotion {
            from, to, promotion, ..
        } => {
            position.discard(from);
            position.put(to, Piece::new(side, promotion));
        }
        Move::EnPassant { from, to } => {
            position.discard(make_square(square_file(to), square_rank(from)));
            position.discard(from);
            position.put(to, Piece::new(side, PieceKind::Pawn));
        }
        Move::Castle { king, rook } => {
            if let Some((king_to, rook_to)) = chess_move.castle_destinations() {
                position.discard(king);
                position.discard(rook);
                position.put(rook_to, Piece::new(side, PieceKind::Rook));
                position.put(king_to, Piece::new(side, PieceKind::King));
            }
        }
    }
}
