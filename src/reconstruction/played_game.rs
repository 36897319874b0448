//! Games as emitted by the reconstructor.

use chrono::{DateTime, Utc};

use crate::game_state::chess_types::GameResult;
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;
use crate::protocol::clock_time::ClockTime;

/// Which way round the board was set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// White on the side the sensors number from rank 1.
    #[default]
    Normal,
    /// Board turned around; sensor squares and clock sides are mirrored.
    Rotated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub chess_move: Move,
    /// Long algebraic coordinates, e.g. `g1f3` or `e7e8q`.
    pub uci: String,
    pub san: String,
    /// Clock reading last seen while this move was the latest one.
    pub clock: Option<ClockTime>,
    pub position_after: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedGame {
    /// White's moves at even indices, black's at odd ones.
    pub moves: Vec<PlayedMove>,
    /// `None` when the game was ended without a result signal.
    pub result: Option<GameResult>,
    pub orientation: Orientation,
    /// When the starting setup was recognized.
    pub recorded_at: DateTime<Utc>,
}

impl CompletedGame {
    /// Numbered coordinate movetext, one full move per line:
    /// `"1. e2e4 e7e5\n2. g1f3"` followed by a final newline.
    pub fn uci_movetext(&self) -> String {
        let mut out = String::new();
        for (ply, played) in self.moves.iter().enumerate() {
            if ply % 2 == 0 {
                out.push_str(&format!("{}. {}", ply / 2 + 1, played.uci));
            } else {
                out.push(' ');
                out.push_str(&played.uci);
                out.push('\n');
            }
        }
        out.push('\n');
        out
    }

    pub fn san_moves(&self) -> Vec<&str> {
        self.moves.iter().map(|played| played.san.as_str()).collect()
    }

    pub fn uci_moves(&self) -> Vec<&str> {
        self.moves.iter().map(|played| played.uci.as_str()).collect()
    }

    pub fn final_position(&self) -> &Position {
        self.moves
            .last()
            .map_or(Position::starting(), |played| &played.position_after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn game_from_uci(moves: &[&str]) -> CompletedGame {
        let mut position = Position::starting().clone();
        let mut side = Color::Light;
        let mut played = Vec::new();
        for text in moves {
            let chess_move = long_algebraic_to_move(text, &position, side).expect("legal test move");
            position = apply_move(&position, &chess_move, side);
            played.push(PlayedMove {
                chess_move,
                uci: (*text).to_owned(),
                san: String::new(),
                clock: None,
                position_after: position.clone(),
            });
            side = side.opposite();
        }
        CompletedGame {
            moves: played,
            result: None,
            orientation: Orientation::Normal,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn uci_movetext_numbers_full_moves() {
        assert_eq!(game_from_uci(&[]).uci_movetext(), "\n");
        assert_eq!(
            game_from_uci(&["e2e4", "e7e5", "g1f3"]).uci_movetext(),
            "1. e2e4 e7e5\n2. g1f3\n"
        );
        assert_eq!(game_from_uci(&["d2d4", "d7d5"]).uci_movetext(), "1. d2d4 d7d5\n\n");
    }

    #[test]
    fn final_position_defaults_to_the_start() {
        assert_eq!(game_from_uci(&[]).final_position(), Position::starting());
        let game = game_from_uci(&["e2e4"]);
        assert_eq!(game.final_position().kind_at(28), Some(crate::game_state::chess_types::PieceKind::Pawn));
    }
}
