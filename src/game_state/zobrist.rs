//! Zobrist keys for placement identity.
//!
//! Only `(color, piece, square)` terms exist: the reconstructor indexes
//! positions by what the sensors can see, so side to move, castling and en
//! passant never contribute. Keys come from a fixed seed so hashes are
//! deterministic across runs.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::chess_types::{Color, PieceKind, Square};

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = rng.random();
            }
        }
    }

    ZobristTables { piece_square }
}

/// Return the Zobrist key for a `(color, piece, square)` occupancy term.
#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][piece.index()][square as usize]
}

#[cfg(test)]
mod tests {
    use super::piece_square_key;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn keys_are_stable_and_distinct() {
        let a = piece_square_key(Color::Light, PieceKind::Knight, 1);
        let b = piece_square_key(Color::Dark, PieceKind::Knight, 1);
        let c = piece_square_key(Color::Light, PieceKind::Knight, 2);
        assert_eq!(a, piece_square_key(Color::Light, PieceKind::Knight, 1));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
