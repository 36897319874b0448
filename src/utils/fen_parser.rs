//! FEN-to-Position parser.
//!
//! Reads the placement, side-to-move and en-passant fields. Castling rights
//! are accepted but ignored since they are inferred from placement, and the
//! move counters are optional.

use crate::errors::{NotationError, NotationResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> NotationResult<(Position, Color)> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let _castling_part = parts.next();
    let en_passant_part = parts.next().unwrap_or("-");

    let mut position = Position::new_empty();
    parse_board(board_part, &mut position)?;
    let side = parse_side_to_move(side_part)?;

    if en_passant_part != "-" {
        position.en_passant_square = Some(algebraic_to_square(en_passant_part)?);
    }

    Ok((position, side))
}

/// Parse only the placement field (`rnbqkbnr/pppppppp/...`).
pub fn parse_placement(board_part: &str) -> NotationResult<Position> {
    let mut position = Position::new_empty();
    parse_board(board_part, &mut position)?;
    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> NotationResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                continue;
            }

            let kind = PieceKind::from_char(ch)
                .ok_or_else(|| invalid(&format!("invalid piece character '{ch}'")))?;
            let color = if ch.is_ascii_uppercase() {
                Color::Light
            } else {
                Color::Dark
            };

            if file >= 8 {
                return Err(invalid("board rank has too many files"));
            }

            position.put(make_square(file, board_rank), Piece::new(color, kind));
            file += 1;
        }

        if file != 8 {
            return Err(invalid("board rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> NotationResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(&format!("invalid side-to-move field: {side_part}"))),
    }
}

fn invalid(reason: &str) -> NotationError {
    NotationError::InvalidFen(reason.to_owned())
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Color;
    use crate::game_state::position::Position;

    #[test]
    fn starting_fen_matches_starting_position() {
        let (position, side) = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(&position, Position::starting());
        assert_eq!(side, Color::Light);
        assert!(position.is_consistent());
    }

    #[test]
    fn en_passant_field_is_kept() {
        let (position, side) = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("fen should parse");
        assert_eq!(position.en_passant_square, Some(43));
        assert_eq!(side, Color::Light);
    }

    #[test]
    fn malformed_layouts_are_rejected() {
        assert!(parse_fen("8/8/8/8/8/8/8 w").is_err());
        assert!(parse_fen("9/8/8/8/8/8/8/8 w").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/7X w").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 x").is_err());
    }
}
