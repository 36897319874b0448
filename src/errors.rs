//! Error types for every subsystem of the crate.
//!
//! Each layer gets its own enum so callers can tell a bad frame from a
//! reconstruction desync without string matching:
//! - `NotationError`: square, FEN and move text that does not parse.
//! - `DecodeError`: a framed message whose payload cannot be decoded. The
//!   framer drops the frame and keeps going.
//! - `ReconstructionError`: observations that contradict the tracked board.
//! - `DriverError`: outbound command failures.

use std::io;

use thiserror::Error;

use crate::game_state::chess_types::Square;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid algebraic square: {0}")]
    InvalidSquare(String),
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
    #[error("invalid move text: {0}")]
    InvalidMove(String),
    #[error("move {0} is not legal in this position")]
    IllegalMove(String),
    #[error("no piece on origin square {0}")]
    EmptyOrigin(Square),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{message} payload must be {expected} bytes, got {actual}")]
    WrongPayloadLength {
        message: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("sensor square index {0} is out of range")]
    InvalidSquare(u8),
    #[error("unknown piece code {0:#04x}")]
    InvalidPieceCode(u8),
    #[error("unknown message kind {0:#04x}")]
    UnknownMessageKind(u8),
    #[error("message kind {0:#04x} belongs to an unsupported board variant")]
    UnsupportedMessageKind(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructionError {
    #[error("field update received before any board dump")]
    FieldUpdateBeforeBoardDump,
    #[error("sensor reported a piece lifted from square {square}, which the tracked board holds empty")]
    PieceRemovedFromEmptySquare { square: Square },
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("a clock command is still waiting for its acknowledgment")]
    ClockCommandInFlight,
    #[error("failed to write to the board link: {0}")]
    Io(#[from] io::Error),
}

pub type NotationResult<T> = Result<T, NotationError>;
pub type DecodeResult<T> = Result<T, DecodeError>;
pub type ReconstructionResult<T> = Result<T, ReconstructionError>;
pub type DriverResult<T> = Result<T, DriverError>;
