//! Canonical chess-rule constants.
//!
//! Starting placement bitboards, the castling geometry used when castling
//! rights are inferred from placement, and the central squares read by the
//! end-of-game signal.

use crate::game_state::chess_types::Square;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// Starting placement, indexed like `PieceKind::index()`.
pub const STARTING_PAWNS: u64 = 0x00ff_0000_0000_ff00;
pub const STARTING_KNIGHTS: u64 = 0x4200_0000_0000_0042;
pub const STARTING_BISHOPS: u64 = 0x2400_0000_0000_0024;
pub const STARTING_ROOKS: u64 = 0x8100_0000_0000_0081;
pub const STARTING_QUEENS: u64 = 0x0800_0000_0000_0008;
pub const STARTING_KINGS: u64 = 0x1000_0000_0000_0010;
pub const STARTING_LIGHT: u64 = 0x0000_0000_0000_ffff;
pub const STARTING_DARK: u64 = 0xffff_0000_0000_0000;

/// File the king starts on.
pub const KING_START_FILE: u8 = 4;
/// Files the rooks start on, queen side first.
pub const ROOK_START_FILES: [u8; 2] = [0, 7];
/// Destination files after castling: `(king, rook)` for the queen and king side.
pub const QUEEN_SIDE_CASTLE_FILES: (u8, u8) = (2, 3);
pub const KING_SIDE_CASTLE_FILES: (u8, u8) = (6, 5);

pub const D4: Square = 27;
pub const E4: Square = 28;
pub const D5: Square = 35;
pub const E5: Square = 36;
pub const CENTER_SQUARES: u64 = (1 << D4) | (1 << E4) | (1 << D5) | (1 << E5);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_placement_masks_partition_the_occupied_squares() {
        let roles = [
            STARTING_PAWNS,
            STARTING_KNIGHTS,
            STARTING_BISHOPS,
            STARTING_ROOKS,
            STARTING_QUEENS,
            STARTING_KINGS,
        ];
        let union = roles.iter().fold(0u64, |acc, bb| acc | bb);
        assert_eq!(union, STARTING_LIGHT | STARTING_DARK);
        assert_eq!(roles.iter().map(|bb| bb.count_ones()).sum::<u32>(), 32);
        assert_eq!(STARTING_LIGHT & STARTING_DARK, 0);
    }
}
