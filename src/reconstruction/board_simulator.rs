//! Scripted sensor traffic for reconstruction tests.
//!
//! Plays moves on a logical board and records the messages a physical board
//! would send: pieces are lifted before anything is set down, and a turned
//! board reports every square and clock side mirrored.

use std::time::Duration;

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::protocol::clock_time::{clock_status, ClockTime};
use crate::protocol::dgt_constants::SquareContent;
use crate::protocol::messages::{BoardDump, DgtMessage, FieldUpdate};
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::long_algebraic::long_algebraic_to_move;

pub struct BoardSimulator {
    position: Position,
    side: Color,
    rotated: bool,
    pub messages: Vec<DgtMessage>,
}

impl BoardSimulator {
    pub fn new(rotated: bool) -> Self {
        Self {
            position: Position::starting().clone(),
            side: Color::Light,
            rotated,
            messages: Vec::new(),
        }
    }

    fn physical(&self, square: Square) -> Square {
        if self.rotated {
            rotate_square(square)
        } else {
            square
        }
    }

    fn square(text: &str) -> Square {
        algebraic_to_square(text).expect("test squares are valid")
    }

    /// Full snapshot of the current logical board.
    pub fn dump(&mut self) -> &mut Self {
        let mut dump = BoardDump::from_position(&self.position);
        if self.rotated {
            let mut squares = [SquareContent::Empty; 64];
            for (square, content) in dump.squares.iter().enumerate() {
                squares[rotate_square(square as Square) as usize] = *content;
            }
            dump.squares = squares;
        }
        self.messages.push(DgtMessage::BoardDump(dump));
        self
    }

    /// One sensor change at a logical square. Does not touch the logical board.
    pub fn field(&mut self, square: &str, content: SquareContent) -> &mut Self {
        let square = self.physical(Self::square(square));
        self.messages.push(DgtMessage::FieldUpdate(FieldUpdate { square, content }));
        self
    }

    pub fn play(&mut self, uci: &str) -> &mut Self {
        let chess_move = long_algebraic_to_move(uci, &self.position, self.side).expect("scripted moves are legal");
        let after = apply_move(&self.position, &chess_move, self.side);

        let mut lifted = Vec::new();
        let mut placed = Vec::new();
        for square in 0..64u8 {
            let (before_piece, after_piece) = (self.position.piece_at(square), after.piece_at(square));
            if before_piece.is_some() && before_piece != after_piece {
                lifted.push(square);
            }
            if let Some(piece) = after_piece {
                if before_piece != after_piece {
                    placed.push((square, piece));
                }
            }
        }
        for square in lifted {
            let square = self.physical(square);
            self.messages.push(DgtMessage::FieldUpdate(FieldUpdate {
                square,
                content: SquareContent::Empty,
            }));
        }
        for (square, piece) in placed {
            let square = self.physical(square);
            self.messages.push(DgtMessage::FieldUpdate(FieldUpdate {
                square,
                content: SquareContent::Piece(piece),
            }));
        }

        self.position = after;
        self.side = self.side.opposite();
        self
    }

    pub fn play_all(&mut self, moves: &[&str]) -> &mut Self {
        for uci in moves {
            self.play(uci);
        }
        self
    }

    /// Pick a piece up and put it straight back.
    pub fn fumble(&mut self, square: &str) -> &mut Self {
        let piece = self
            .position
            .piece_at(Self::square(square))
            .expect("fumbled square holds a piece");
        self.field(square, SquareContent::Empty)
            .field(square, SquareContent::Piece(piece))
    }

    /// Move a piece without any regard for the rules.
    pub fn slide(&mut self, from: &str, to: &str) -> &mut Self {
        let (from_sq, to_sq) = (Self::square(from), Self::square(to));
        let piece = self.position.discard(from_sq).expect("slid square holds a piece");
        self.position.put(to_sq, piece);
        self.field(from, SquareContent::Empty)
            .field(to, SquareContent::Piece(piece))
    }

    /// Undo the last move by sliding its piece back.
    pub fn take_back(&mut self, from: &str, to: &str) -> &mut Self {
        self.side = self.side.opposite();
        self.slide(from, to)
    }

    /// Clock reading as the players see it; a turned board reports it mirrored.
    pub fn clock(&mut self, white_secs: u64, black_secs: u64) -> &mut Self {
        let reading = Self::reading(white_secs, black_secs);
        let physical = if self.rotated { reading.rotated() } else { reading };
        self.messages.push(DgtMessage::ClockTime(physical));
        self
    }

    pub fn reading(white_secs: u64, black_secs: u64) -> ClockTime {
        ClockTime {
            left: Duration::from_secs(white_secs),
            left_flags: 0,
            right: Duration::from_secs(black_secs),
            right_flags: 0,
            status: clock_status::RUNNING | clock_status::CONNECTED | clock_status::LEFT_TO_MOVE,
        }
    }

    pub fn take_messages(&mut self) -> Vec<DgtMessage> {
        std::mem::take(&mut self.messages)
    }
}
