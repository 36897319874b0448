use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::checkers;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub double_checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.double_checks += rhs.double_checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft<G: MoveGenerator>(generator: &G, position: &Position, side: Color, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(position, side) {
        total.merge(perft_recurse(generator, &mv, side, depth, 1));
    }
    total
}

/// Leaf node count only; cheaper than `perft` because no leaf is classified.
pub fn perft_nodes<G: MoveGenerator>(generator: &G, position: &Position, side: Color, depth: u8) -> usize {
    if depth == 0 {
        return 1;
    }

    let moves = generator.generate_legal_moves(position, side);
    if depth == 1 {
        return moves.len();
    }

    moves
        .iter()
        .map(|mv| perft_nodes(generator, &mv.position_after, side.opposite(), depth - 1))
        .sum()
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    mv: &GeneratedMove,
    mover: Color,
    search_depth: u8,
    current_depth: u8,
) -> PerftCounts {
    let reply_side = mover.opposite();

    if current_depth == search_depth {
        let mut counts = PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };

        if mv.chess_move.is_capture() {
            counts.captures += 1;
        }
        if mv.chess_move.is_en_passant() {
            counts.en_passant += 1;
        }
        if mv.chess_move.is_castle() {
            counts.castles += 1;
        }
        if mv.chess_move.promotion().is_some() {
            counts.promotions += 1;
        }

        let checking = checkers(&mv.position_after, reply_side);
        if checking != 0 {
            counts.checks += 1;
            if checking.count_ones() > 1 {
                counts.double_checks += 1;
            }
            if generator
                .generate_legal_moves(&mv.position_after, reply_side)
                .is_empty()
            {
                counts.checkmates += 1;
            }
        }

        return counts;
    }

    let mut total = PerftCounts::default();
    for child in generator.generate_legal_moves(&mv.position_after, reply_side) {
        total.merge(perft_recurse(generator, &child, reply_side, search_depth, current_depth + 1));
    }
    total
}
