//! UCI-style long algebraic move text (`e2e4`, `e7e8q`, `e1g1`).

use crate::errors::{NotationError, NotationResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Castling is written with the king's landing square.
pub fn move_to_long_algebraic(chess_move: &Move) -> String {
    let to = chess_move
        .castle_destinations()
        .map_or(chess_move.to(), |(king_to, _)| king_to);

    let mut out = square_to_algebraic(chess_move.from());
    out.push_str(&square_to_algebraic(to));
    if let Some(promotion) = chess_move.promotion() {
        out.push(promotion.lower_char());
    }
    out
}

/// Resolve long algebraic text against the legal moves of `side`.
///
/// Castling is accepted either as king-to-destination (`e1g1`) or as
/// king-to-rook (`e1h1`).
pub fn long_algebraic_to_move(text: &str, position: &Position, side: Color) -> NotationResult<Move> {
    if text.len() != 4 && text.len() != 5 {
        return Err(NotationError::InvalidMove(text.to_owned()));
    }
    let from = algebraic_to_square(text.get(0..2).unwrap_or_default())?;
    let to = algebraic_to_square(text.get(2..4).unwrap_or_default())?;
    let promotion = match text.get(4..) {
        Some("") | None => None,
        Some(suffix) => {
            let ch = suffix.chars().next().unwrap_or('?');
            match PieceKind::from_char(ch) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(NotationError::InvalidMove(text.to_owned())),
            }
        }
    };

    legal_moves(position, side)
        .into_iter()
        .find(|mv| {
            if mv.from() != from || mv.promotion() != promotion {
                return false;
            }
            match mv.castle_destinations() {
                Some((king_to, _)) => to == king_to || to == mv.to(),
                None => mv.to() == to,
            }
        })
        .ok_or_else(|| NotationError::IllegalMove(text.to_owned()))
}
