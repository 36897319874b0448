//! Sliding attacks from per-direction ray tables.
//!
//! Each ray runs from (but excludes) its origin to the board edge. Attacks for
//! a given occupancy take the full ray and cut it behind the first blocker,
//! which is the nearest set bit: lowest for directions that increase the
//! square index, highest for the others.

use crate::game_state::chess_types::{square_file, square_rank, Square};

/// Compass direction of a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::NorthEast => 1,
            Direction::East => 2,
            Direction::SouthEast => 3,
            Direction::South => 4,
            Direction::SouthWest => 5,
            Direction::West => 6,
            Direction::NorthWest => 7,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// True when stepping along this direction increases the square index.
    #[inline]
    const fn is_ascending(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::NorthEast | Direction::East | Direction::NorthWest
        )
    }

    /// Direction leading from `from` towards `to` along a rank, file or
    /// diagonal, if the squares share one.
    pub fn between(from: Square, to: Square) -> Option<Direction> {
        if from == to {
            return None;
        }
        let df = square_file(to) as i32 - square_file(from) as i32;
        let dr = square_rank(to) as i32 - square_rank(from) as i32;

        match (df.signum(), dr.signum()) {
            (0, 1) => Some(Direction::North),
            (0, -1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            (f, r) if df.abs() == dr.abs() => Some(match (f, r) {
                (1, 1) => Direction::NorthEast,
                (1, -1) => Direction::SouthEast,
                (-1, -1) => Direction::SouthWest,
                _ => Direction::NorthWest,
            }),
            _ => None,
        }
    }
}

const STEPS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// `RAYS[direction][square]`, origin excluded.
pub const RAYS: [[u64; 64]; 8] = generate_rays();

const fn generate_rays() -> [[u64; 64]; 8] {
    let mut table = [[0u64; 64]; 8];
    let mut dir = 0usize;

    while dir < 8 {
        let mut sq = 0usize;
        while sq < 64 {
            let mut file = (sq % 8) as i32 + STEPS[dir].0;
            let mut rank = (sq / 8) as i32 + STEPS[dir].1;
            let mut ray = 0u64;

            while file >= 0 && file <= 7 && rank >= 0 && rank <= 7 {
                ray |= 1u64 << (rank * 8 + file);
                file += STEPS[dir].0;
                rank += STEPS[dir].1;
            }

            table[dir][sq] = ray;
            sq += 1;
        }
        dir += 1;
    }

    table
}

#[inline]
pub fn ray(direction: Direction, square: Square) -> u64 {
    RAYS[direction.index()][square as usize]
}

/// Ray from `square` in `direction`, stopping at (and including) the first
/// occupied square.
#[inline]
pub fn ray_attacks(direction: Direction, square: Square, occupied: u64) -> u64 {
    let full = ray(direction, square);
    let blockers = full & occupied;
    if blockers == 0 {
        return full;
    }

    let first = if direction.is_ascending() {
        blockers.trailing_zeros()
    } else {
        63 - blockers.leading_zeros()
    };
    full ^ ray(direction, first as Square)
}

pub fn rook_attacks(square: Square, occupied: u64) -> u64 {
    Direction::ORTHOGONAL
        .into_iter()
        .fold(0u64, |acc, dir| acc | ray_attacks(dir, square, occupied))
}

pub fn bishop_attacks(square: Square, occupied: u64) -> u64 {
    Direction::DIAGONAL
        .into_iter()
        .fold(0u64, |acc, dir| acc | ray_attacks(dir, square, occupied))
}

#[inline]
pub fn queen_attacks(square: Square, occupied: u64) -> u64 {
    rook_attacks(square, occupied) | bishop_attacks(square, occupied)
}

/// Squares strictly between `a` and `b` when they share a line, else empty.
pub fn between(a: Square, b: Square) -> u64 {
    match Direction::between(a, b) {
        Some(dir) => ray(dir, a) & ray(dir.opposite(), b),
        None => 0,
    }
}

/// The whole rank, file or diagonal through `a` and `b` (edge to edge), or
/// empty when they share none.
pub fn line(a: Square, b: Square) -> u64 {
    match Direction::between(a, b) {
        Some(dir) => ray(dir, a) | ray(dir.opposite(), a) | (1u64 << a),
        None => 0,
    }
}

/// True when `c` lies on the line through `a` and `b`.
#[inline]
pub fn aligned(a: Square, b: Square, c: Square) -> bool {
    line(a, b) & (1u64 << c) != 0
}
