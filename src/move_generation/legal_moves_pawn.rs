use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;
use crate::moves::leaper_attacks::pawn_attacks;

/// Pawn pushes, double pushes and captures landing inside `target`.
pub fn generate_pawn_moves(position: &Position, side: Color, target: u64, out: &mut Vec<Move>) {
    let them = position.color_bb(side.opposite());
    let empty = !position.occupancy_all;
    let promotion_rank = side.opposite().back_rank();
    let start_rank = match side {
        Color::Light => 1,
        Color::Dark => 6,
    };

    let mut pawns = position.pieces(side, PieceKind::Pawn);
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;

        let mut captures = pawn_attacks(side, from) & them & target;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            push_pawn_move(position, from, to, promotion_rank, out);
            captures &= captures - 1;
        }

        if let Some(single) = forward(side, from) {
            if empty & (1u64 << single) != 0 {
                if target & (1u64 << single) != 0 {
                    push_pawn_move(position, from, single, promotion_rank, out);
                }
                if square_rank(from) == start_rank {
                    if let Some(double) = forward(side, single) {
                        let mask = 1u64 << double;
                        if empty & target & mask != 0 {
                            out.push(Move::Normal {
                                kind: PieceKind::Pawn,
                                from,
                                capture: None,
                                to: double,
                            });
                        }
                    }
                }
            }
        }

        pawns &= pawns - 1;
    }
}

/// En-passant captures onto the position's recorded target square.
pub fn generate_en_passant(position: &Position, side: Color, out: &mut Vec<Move>) -> bool {
    let Some(to) = position.en_passant_square else {
        return false;
    };

    let mut capturers = pawn_attacks(side.opposite(), to) & position.pieces(side, PieceKind::Pawn);
    let found = capturers != 0;
    while capturers != 0 {
        let from = capturers.trailing_zeros() as Square;
        out.push(Move::EnPassant { from, to });
        capturers &= capturers - 1;
    }
    found
}

/// Square directly in front of a pawn of `side` on `square`.
#[inline]
fn forward(side: Color, square: Square) -> Option<Square> {
    match side {
        Color::Light => (square < 56).then(|| square + 8),
        Color::Dark => square.checked_sub(8),
    }
}

fn push_pawn_move(position: &Position, from: Square, to: Square, promotion_rank: u8, out: &mut Vec<Move>) {
    let capture = position.kind_at(to);
    if square_rank(to) == promotion_rank {
        for promotion in PieceKind::PROMOTIONS {
            out.push(Move::Promotion {
                from,
                capture,
                to,
                promotion,
            });
        }
    } else {
        out.push(Move::Normal {
            kind: PieceKind::Pawn,
            from,
            capture,
            to,
        });
    }
}
