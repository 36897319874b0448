//! Standard algebraic notation.
//!
//! Promotions are written with the piece letter appended directly to the
//! destination (`e8Q`, `exd8N`), without the `=` separator.

use crate::errors::{NotationError, NotationResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::{file_char, rank_char, square_to_algebraic};

/// Render `chess_move`, played from `before` and producing `after`, as SAN.
///
/// The mover is whoever owns the origin square in `before`.
pub fn render_san(before: &Position, chess_move: &Move, after: &Position) -> NotationResult<String> {
    let mover = before
        .color_at(chess_move.from())
        .ok_or(NotationError::EmptyOrigin(chess_move.from()))?;

    let mut out = if chess_move.is_castle() {
        if chess_move.is_king_side_castle() {
            "O-O".to_owned()
        } else {
            "O-O-O".to_owned()
        }
    } else {
        render_body(before, chess_move, mover)
    };

    let opponent = mover.opposite();
    if is_king_in_check(after, opponent) {
        if legal_moves(after, opponent).is_empty() {
            out.push('#');
        } else {
            out.push('+');
        }
    }

    Ok(out)
}

fn render_body(before: &Position, chess_move: &Move, mover: Color) -> String {
    let from = chess_move.from();
    let to = chess_move.to();
    let kind = chess_move.kind();
    let mut out = String::new();

    if kind == PieceKind::Pawn {
        if chess_move.is_capture() {
            out.push(file_char(from));
        }
    } else {
        out.push(kind.upper_char());
        let (need_file, need_rank) = disambiguation(before, chess_move, mover);
        if need_file {
            out.push(file_char(from));
        }
        if need_rank {
            out.push(rank_char(from));
        }
    }

    if chess_move.is_capture() {
        out.push('x');
    }
    out.push_str(&square_to_algebraic(to));

    if let Some(promotion) = chess_move.promotion() {
        out.push(promotion.upper_char());
    }

    out
}

/// Which origin coordinates are needed to tell this move apart from other
/// legal moves of the same piece kind to the same square.
fn disambiguation(before: &Position, chess_move: &Move, mover: Color) -> (bool, bool) {
    let from = chess_move.from();
    let mut need_file = false;
    let mut need_rank = false;

    for other in legal_moves(before, mover) {
        if other.is_castle()
            || other.kind() != chess_move.kind()
            || other.to() != chess_move.to()
            || other.promotion() != chess_move.promotion()
            || other.from() == from
        {
            continue;
        }

        if square_rank(other.from()) == square_rank(from) || square_file(other.from()) != square_file(from) {
            need_file = true;
        } else {
            need_rank = true;
        }
    }

    (need_file, need_rank)
}

#[cfg(test)]
mod tests {
    use super::render_san;
    use crate::game_state::position::Position;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::utils::fen_parser::parse_fen;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn san(fen: &str, uci: &str) -> String {
        let (position, side) = parse_fen(fen).expect("fen should parse");
        let mv = long_algebraic_to_move(uci, &position, side).expect("move should be legal");
        let after = apply_move(&position, &mv, side);
        render_san(&position, &mv, &after).expect("mover should exist")
    }

    #[test]
    fn plain_pawn_and_piece_moves() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";
        assert_eq!(san(start, "e2e4"), "e4");
        assert_eq!(san(start, "g1f3"), "Nf3");
    }

    #[test]
    fn file_disambiguation_for_knights() {
        let fen = "rnbqkb1r/ppp1pppp/5n2/3p4/3P4/5N2/PPP1PPPP/RNBQKB1R w - - 0 1";
        assert_eq!(san(fen, "b1d2"), "Nbd2");
        assert_eq!(san(fen, "f3d2"), "Nfd2");
    }

    #[test]
    fn rank_disambiguation_for_rooks_on_one_file() {
        let fen = "4k3/8/8/R7/8/8/8/R3K3 w - - 0 1";
        assert_eq!(san(fen, "a1a3"), "R1a3");
        assert_eq!(san(fen, "a5a3"), "R5a3");
    }

    #[test]
    fn full_square_disambiguation_for_three_queens() {
        let fen = "8/7k/8/8/8/Q7/8/Q1Q1K3 w - - 0 1";
        assert_eq!(san(fen, "a1c3"), "Qa1c3");
    }

    #[test]
    fn castling_tokens() {
        assert_eq!(san("4k3/8/8/8/8/8/8/R3K2R w - - 0 1", "e1g1"), "O-O");
        assert_eq!(san("r3k3/8/8/8/8/8/8/4K3 b - - 0 1", "e8c8"), "O-O-O");
    }

    #[test]
    fn captures_and_en_passant_use_x() {
        assert_eq!(san("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5d6"), "exd6");
        assert_eq!(san("4k3/8/8/3p4/8/8/8/3RK3 w - - 0 1", "d1d5"), "Rxd5");
    }

    #[test]
    fn promotion_appends_piece_letter() {
        assert_eq!(san("8/P6k/8/8/8/8/8/K7 w - - 0 1", "a7a8q"), "a8Q");
        assert_eq!(san("8/P6k/8/8/8/8/8/K7 w - - 0 1", "a7a8n"), "a8N");
    }

    #[test]
    fn check_and_mate_suffixes() {
        assert_eq!(san("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", "a1a8"), "Ra8+");
        // Back-rank mate: pawns seal the king in.
        assert_eq!(san("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1", "a1a8"), "Ra8#");
    }

    #[test]
    fn empty_origin_is_an_error() {
        let start = Position::starting();
        let mv = crate::moves::chess_move::Move::EnPassant { from: 27, to: 36 };
        assert!(render_san(start, &mv, start).is_err());
    }
}
