//! Structured chess move.
//!
//! Castling is encoded as king and rook squares so the rook's side can be
//! read off without knowing the variant; the king's landing square is derived.

use crate::game_state::chess_rules::{KING_SIDE_CASTLE_FILES, QUEEN_SIDE_CASTLE_FILES};
use crate::game_state::chess_types::{make_square, square_file, square_rank, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Normal {
        kind: PieceKind,
        from: Square,
        capture: Option<PieceKind>,
        to: Square,
    },
    Promotion {
        from: Square,
        capture: Option<PieceKind>,
        to: Square,
        promotion: PieceKind,
    },
    EnPassant {
        from: Square,
        to: Square,
    },
    Castle {
        king: Square,
        rook: Square,
    },
}

impl Move {
    /// Kind of the piece that moves (the king for castling).
    #[inline]
    pub const fn kind(&self) -> PieceKind {
        match *self {
            Move::Normal { kind, .. } => kind,
            Move::Promotion { .. } | Move::EnPassant { .. } => PieceKind::Pawn,
            Move::Castle { .. } => PieceKind::King,
        }
    }

    #[inline]
    pub const fn from(&self) -> Square {
        match *self {
            Move::Normal { from, .. } | Move::Promotion { from, .. } | Move::EnPassant { from, .. } => {
                from
            }
            Move::Castle { king, .. } => king,
        }
    }

    /// Target square. For castling this is the rook's square.
    #[inline]
    pub const fn to(&self) -> Square {
        match *self {
            Move::Normal { to, .. } | Move::Promotion { to, .. } | Move::EnPassant { to, .. } => to,
            Move::Castle { rook, .. } => rook,
        }
    }

    #[inline]
    pub const fn capture(&self) -> Option<PieceKind> {
        match *self {
            Move::Normal { capture, .. } | Move::Promotion { capture, .. } => capture,
            Move::EnPassant { .. } => Some(PieceKind::Pawn),
            Move::Castle { .. } => None,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.capture().is_some()
    }

    #[inline]
    pub const fn promotion(&self) -> Option<PieceKind> {
        match *self {
            Move::Promotion { promotion, .. } => Some(promotion),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    /// Squares the king and rook land on after castling, if this is a castle.
    pub const fn castle_destinations(&self) -> Option<(Square, Square)> {
        match *self {
            Move::Castle { king, rook } => {
                let (king_file, rook_file) = if rook < king {
                    QUEEN_SIDE_CASTLE_FILES
                } else {
                    KING_SIDE_CASTLE_FILES
                };
                let rank = square_rank(king);
                Some((make_square(king_file, rank), make_square(rook_file, rank)))
            }
            _ => None,
        }
    }

    /// True for castling towards the h-file.
    #[inline]
    pub const fn is_king_side_castle(&self) -> bool {
        match *self {
            Move::Castle { king, rook } => square_file(rook) > square_file(king),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn castle_destinations_follow_rook_side() {
        let short = Move::Castle { king: 4, rook: 7 };
        let long = Move::Castle { king: 60, rook: 56 };
        assert_eq!(short.castle_destinations(), Some((6, 5)));
        assert_eq!(long.castle_destinations(), Some((58, 59)));
        assert!(short.is_king_side_castle());
        assert!(!long.is_king_side_castle());
        assert_eq!(short.kind(), PieceKind::King);
        assert_eq!(short.to(), 7);
    }

    #[test]
    fn en_passant_reports_a_pawn_capture() {
        let mv = Move::EnPassant { from: 36, to: 43 };
        assert!(mv.is_capture());
        assert_eq!(mv.capture(), Some(PieceKind::Pawn));
        assert_eq!(mv.promotion(), None);
    }
}
