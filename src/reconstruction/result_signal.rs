//! Results announced on the board itself.
//!
//! Players end a game by putting both kings on the four center squares: both
//! on light squares for a white win, both on dark squares for a black win,
//! one of each for a draw. Boards with result marker pieces can instead show
//! a marker on any center square.

use crate::game_state::chess_rules::CENTER_SQUARES;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub fn result_signal(position: &Position, markers: &[Option<GameResult>; 64]) -> Option<GameResult> {
    marker_signal(markers).or_else(|| king_signal(position))
}

/// Result marker standing on a center square.
pub fn marker_signal(markers: &[Option<GameResult>; 64]) -> Option<GameResult> {
    let mut center = CENTER_SQUARES;
    while center != 0 {
        let square = center.trailing_zeros() as usize;
        center &= center - 1;
        if let Some(result) = markers[square] {
            return Some(result);
        }
    }
    None
}

/// Both kings on center squares.
pub fn king_signal(position: &Position) -> Option<GameResult> {
    let light_king = position.king_square(Color::Light)?;
    let dark_king = position.king_square(Color::Dark)?;
    if CENTER_SQUARES & (1u64 << light_king) == 0 || CENTER_SQUARES & (1u64 << dark_king) == 0 {
        return None;
    }

    Some(match (is_light_square(light_king), is_light_square(dark_king)) {
        (true, true) => GameResult::WhiteWins,
        (false, false) => GameResult::BlackWins,
        _ => GameResult::Draw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::{D4, D5, E4, E5};
    use crate::utils::fen_parser::parse_placement;

    const NO_MARKERS: [Option<GameResult>; 64] = [None; 64];

    fn kings_on(light: Square, dark: Square) -> Position {
        let mut position = Position::new_empty();
        position.put(light, Piece::new(Color::Light, PieceKind::King));
        position.put(dark, Piece::new(Color::Dark, PieceKind::King));
        position
    }

    #[test]
    fn king_colors_pick_the_result() {
        assert_eq!(result_signal(&kings_on(E4, D5), &NO_MARKERS), Some(GameResult::WhiteWins));
        assert_eq!(result_signal(&kings_on(D5, E4), &NO_MARKERS), Some(GameResult::WhiteWins));
        assert_eq!(result_signal(&kings_on(D4, E5), &NO_MARKERS), Some(GameResult::BlackWins));
        assert_eq!(result_signal(&kings_on(D4, D5), &NO_MARKERS), Some(GameResult::Draw));
        assert_eq!(result_signal(&kings_on(E4, E5), &NO_MARKERS), Some(GameResult::Draw));
    }

    #[test]
    fn one_king_outside_the_center_is_no_signal() {
        assert_eq!(result_signal(&kings_on(E4, 60), &NO_MARKERS), None);
        assert_eq!(result_signal(Position::starting(), &NO_MARKERS), None);
        let lone_king = parse_placement("8/8/8/3k4/8/8/8/8").expect("valid placement");
        assert_eq!(result_signal(&lone_king, &NO_MARKERS), None);
    }

    #[test]
    fn center_marker_wins_over_kings() {
        let mut markers = NO_MARKERS;
        markers[D5 as usize] = Some(GameResult::BlackWins);
        assert_eq!(result_signal(Position::starting(), &markers), Some(GameResult::BlackWins));

        let mut off_center = NO_MARKERS;
        off_center[0] = Some(GameResult::Draw);
        assert_eq!(result_signal(Position::starting(), &off_center), None);
    }
}
