//! Bitboard piece placement.
//!
//! `Position` holds one bitboard per piece kind, one per color and the
//! derived occupancy. It also keeps the en-passant target left by the move
//! that produced it and an incrementally maintained placement hash. Side to
//! move is not part of a position: callers carry it alongside.

use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::game_state::zobrist::piece_square_key;

#[derive(Debug, Clone)]
pub struct Position {
    // Indexed by `PieceKind::index()`.
    pub pieces_by_kind: [u64; 6],
    // Indexed by `Color::index()`.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    /// Square a pawn skipped on the last move, present only when an enemy
    /// pawn could capture onto it.
    pub en_passant_square: Option<Square>,

    placement_hash: u64,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            pieces_by_kind: [0; 6],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            en_passant_square: None,
            placement_hash: 0,
        }
    }
}

static STARTING: OnceLock<Position> = OnceLock::new();
static STARTING_ROTATED: OnceLock<Position> = OnceLock::new();

impl Position {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting placement, built once.
    pub fn starting() -> &'static Position {
        STARTING.get_or_init(|| {
            Self::from_bitboards(
                [
                    STARTING_PAWNS,
                    STARTING_KNIGHTS,
                    STARTING_BISHOPS,
                    STARTING_ROOKS,
                    STARTING_QUEENS,
                    STARTING_KINGS,
                ],
                [STARTING_LIGHT, STARTING_DARK],
            )
        })
    }

    /// Starting placement as seen by sensors of a board turned around.
    pub fn starting_rotated() -> &'static Position {
        STARTING_ROTATED.get_or_init(|| Self::starting().rotated_180())
    }

    fn from_bitboards(pieces_by_kind: [u64; 6], occupancy_by_color: [u64; 2]) -> Self {
        let mut position = Self {
            pieces_by_kind,
            occupancy_by_color,
            occupancy_all: occupancy_by_color[0] | occupancy_by_color[1],
            en_passant_square: None,
            placement_hash: 0,
        };
        position.placement_hash = position.compute_placement_hash();
        position
    }

    #[inline]
    pub fn placement_hash(&self) -> u64 {
        self.placement_hash
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces_by_kind[kind.index()] & self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn kind_bb(&self, kind: PieceKind) -> u64 {
        self.pieces_by_kind[kind.index()]
    }

    #[inline]
    pub fn color_bb(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn rooks_and_queens(&self) -> u64 {
        self.kind_bb(PieceKind::Rook) | self.kind_bb(PieceKind::Queen)
    }

    #[inline]
    pub fn bishops_and_queens(&self) -> u64 {
        self.kind_bb(PieceKind::Bishop) | self.kind_bb(PieceKind::Queen)
    }

    pub fn kind_at(&self, square: Square) -> Option<PieceKind> {
        let mask = 1u64 << square;
        if self.occupancy_all & mask == 0 {
            return None;
        }
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces_by_kind[kind.index()] & mask != 0)
    }

    pub fn color_at(&self, square: Square) -> Option<Color> {
        let mask = 1u64 << square;
        if self.occupancy_by_color[Color::Light.index()] & mask != 0 {
            Some(Color::Light)
        } else if self.occupancy_by_color[Color::Dark.index()] & mask != 0 {
            Some(Color::Dark)
        } else {
            None
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        Some(Piece::new(self.color_at(square)?, self.kind_at(square)?))
    }

    /// Single king of `color`, if present.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces(color, PieceKind::King);
        (kings != 0).then(|| kings.trailing_zeros() as Square)
    }

    /// Place `piece` on `square`, replacing whatever stood there.
    pub fn put(&mut self, square: Square, piece: Piece) {
        self.discard(square);
        let mask = 1u64 << square;
        self.pieces_by_kind[piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
        self.placement_hash ^= piece_square_key(piece.color, piece.kind, square);
    }

    /// Clear `square`, returning the piece that stood there.
    pub fn discard(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square)?;
        let mask = !(1u64 << square);
        self.pieces_by_kind[piece.kind.index()] &= mask;
        self.occupancy_by_color[piece.color.index()] &= mask;
        self.occupancy_all &= mask;
        self.placement_hash ^= piece_square_key(piece.color, piece.kind, square);
        Some(piece)
    }

    /// Same pieces on the same squares. En passant is ignored.
    #[inline]
    pub fn same_placement(&self, other: &Position) -> bool {
        self.pieces_by_kind == other.pieces_by_kind
            && self.occupancy_by_color == other.occupancy_by_color
    }

    /// Placement mirrored through the board center (`a1 <-> h8`).
    pub fn rotated_180(&self) -> Position {
        let mut rotated = Self::from_bitboards(
            self.pieces_by_kind.map(u64::reverse_bits),
            self.occupancy_by_color.map(u64::reverse_bits),
        );
        rotated.en_passant_square = self.en_passant_square.map(rotate_square);
        rotated
    }

    pub fn compute_placement_hash(&self) -> u64 {
        let mut key = 0u64;

        for color in [Color::Light, Color::Dark] {
            for kind in PieceKind::ALL {
                let mut bb = self.pieces(color, kind);
                while bb != 0 {
                    let sq = bb.trailing_zeros() as Square;
                    key ^= piece_square_key(color, kind, sq);
                    bb &= bb - 1;
                }
            }
        }

        key
    }

    /// Structural invariants of the bitboard set.
    pub fn is_consistent(&self) -> bool {
        let mut union = 0u64;
        for (idx, bb) in self.pieces_by_kind.iter().enumerate() {
            if self.pieces_by_kind[idx + 1..].iter().any(|other| other & bb != 0) {
                return false;
            }
            union |= bb;
        }

        let light = self.occupancy_by_color[Color::Light.index()];
        let dark = self.occupancy_by_color[Color::Dark.index()];

        union == self.occupancy_all
            && light & dark == 0
            && light | dark == self.occupancy_all
            && self.placement_hash == self.compute_placement_hash()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.same_placement(other)
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.placement_hash);
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::game_state::chess_types::{Color, Piece, PieceKind};

    #[test]
    fn starting_position_is_consistent() {
        let start = Position::starting();
        assert!(start.is_consistent());
        assert_eq!(start.occupancy_all.count_ones(), 32);
        assert_eq!(start.king_square(Color::Light), Some(4));
        assert_eq!(start.king_square(Color::Dark), Some(60));
        assert_eq!(start.kind_at(3), Some(PieceKind::Queen));
        assert_eq!(start.kind_at(27), None);
    }

    #[test]
    fn rotated_start_swaps_king_and_queen_files() {
        let rotated = Position::starting_rotated();
        assert!(rotated.is_consistent());
        // Sensors of a turned board report the light king on d8.
        assert_eq!(
            rotated.piece_at(59),
            Some(Piece::new(Color::Light, PieceKind::King))
        );
        assert_ne!(rotated, Position::starting());
        assert_eq!(&rotated.rotated_180(), Position::starting());
    }

    #[test]
    fn put_replaces_occupant_and_keeps_hash_incremental() {
        let mut position = Position::starting().clone();
        position.put(12, Piece::new(Color::Dark, PieceKind::Queen));
        assert_eq!(
            position.piece_at(12),
            Some(Piece::new(Color::Dark, PieceKind::Queen))
        );
        assert_eq!(position.occupancy_all.count_ones(), 32);
        assert!(position.is_consistent());

        assert_eq!(
            position.discard(12),
            Some(Piece::new(Color::Dark, PieceKind::Queen))
        );
        assert_eq!(position.discard(12), None);
        assert!(position.is_consistent());
    }

    #[test]
    fn equality_ignores_en_passant() {
        let mut a = Position::starting().clone();
        let b = Position::starting().clone();
        a.en_passant_square = Some(20);
        assert_eq!(a, b);
        assert_eq!(a.placement_hash(), b.placement_hash());
    }
}
