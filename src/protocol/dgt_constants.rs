//! Wire constants of the DGT board protocol and the mapping between sensor
//! codes and engine types.
//!
//! The board numbers its sensors from a8 (`0`) to h1 (`63`); the engine uses
//! a1 (`0`) to h8 (`63`).

use crate::errors::{DecodeError, DecodeResult};
use crate::game_state::chess_types::*;

/// Inbound message kinds (command byte with bit 7 masked off).
pub mod message_kind {
    pub const NONE: u8 = 0x00;
    pub const BOARD_DUMP: u8 = 0x06;
    pub const BWTIME: u8 = 0x0d;
    pub const FIELD_UPDATE: u8 = 0x0e;
    pub const EE_MOVES: u8 = 0x0f;
    pub const BUSADRES: u8 = 0x10;
    pub const SERIALNR: u8 = 0x11;
    pub const TRADEMARK: u8 = 0x12;
    pub const VERSION: u8 = 0x13;
    pub const BOARD_DUMP_50B: u8 = 0x14;
    pub const BOARD_DUMP_50W: u8 = 0x15;
    pub const BATTERY_STATUS: u8 = 0x20;
    pub const LONG_SERIALNR: u8 = 0x22;
}

/// Bit set on every inbound command byte.
pub const MESSAGE_BIT: u8 = 0x80;
/// Command byte plus two size bytes.
pub const FRAME_HEADER_LEN: usize = 3;

pub const BOARD_DUMP_LEN: usize = 64;
pub const BWTIME_LEN: usize = 7;
pub const FIELD_UPDATE_LEN: usize = 2;
pub const BUSADRES_LEN: usize = 2;
pub const VERSION_LEN: usize = 2;

/// Single-byte requests sent to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    Reset,
    SendClock,
    SendBoard,
    SendUpdate,
    SendUpdateBoard,
    ReturnSerialNumber,
    ReturnBusAddress,
    SendTrademark,
    SendEepromMoves,
    ToBusMode,
    SendUpdateNice,
    SendBatteryStatus,
    SendVersion,
    StartBootloader,
    ReturnLongSerialNumber,
}

impl BoardCommand {
    pub const fn code(self) -> u8 {
        match self {
            BoardCommand::Reset => 0x40,
            BoardCommand::SendClock => 0x41,
            BoardCommand::SendBoard => 0x42,
            BoardCommand::SendUpdate => 0x43,
            BoardCommand::SendUpdateBoard => 0x44,
            BoardCommand::ReturnSerialNumber => 0x45,
            BoardCommand::ReturnBusAddress => 0x46,
            BoardCommand::SendTrademark => 0x47,
            BoardCommand::SendEepromMoves => 0x49,
            BoardCommand::ToBusMode => 0x4a,
            BoardCommand::SendUpdateNice => 0x4b,
            BoardCommand::SendBatteryStatus => 0x4c,
            BoardCommand::SendVersion => 0x4d,
            BoardCommand::StartBootloader => 0x4e,
            BoardCommand::ReturnLongSerialNumber => 0x55,
        }
    }
}

/// Prefix of every clock command frame.
pub const CLOCK_MESSAGE: u8 = 0x2b;
/// First byte inside a clock command, before the clock message id.
pub const CLOCK_START_MESSAGE: u8 = 0x03;
/// Trailing byte of a clock command frame.
pub const CLOCK_END_MESSAGE: u8 = 0x00;

/// Clock message ids.
pub mod clock_id {
    pub const DISPLAY: u8 = 0x01;
    pub const ICONS: u8 = 0x02;
    pub const END: u8 = 0x03;
    pub const BUTTON: u8 = 0x08;
    pub const VERSION: u8 = 0x09;
    pub const SETNRUN: u8 = 0x0a;
    pub const BEEP: u8 = 0x0b;
}

/// Hour nibble the clock reports instead of a time when acknowledging a command.
pub const CLOCK_ACK_NIBBLE: u8 = 0x0a;

/// What a sensor reports for one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareContent {
    Empty,
    Piece(Piece),
    /// Special marker pieces a player can set down to announce a result.
    ResultMarker(GameResult),
}

/// Sensor piece code to square content.
pub fn decode_piece_code(code: u8) -> DecodeResult<SquareContent> {
    use Color::{Dark, Light};
    use PieceKind::*;

    let piece = |color, kind| SquareContent::Piece(Piece::new(color, kind));
    Ok(match code {
        0 => SquareContent::Empty,
        1 => piece(Light, Pawn),
        2 => piece(Light, Rook),
        3 => piece(Light, Knight),
        4 => piece(Light, Bishop),
        5 => piece(Light, King),
        6 => piece(Light, Queen),
        7 => piece(Dark, Pawn),
        8 => piece(Dark, Rook),
        9 => piece(Dark, Knight),
        10 => piece(Dark, Bishop),
        11 => piece(Dark, King),
        12 => piece(Dark, Queen),
        13 => SquareContent::ResultMarker(GameResult::Draw),
        14 => SquareContent::ResultMarker(GameResult::WhiteWins),
        15 => SquareContent::ResultMarker(GameResult::BlackWins),
        other => return Err(DecodeError::InvalidPieceCode(other)),
    })
}

/// Square content to sensor piece code.
pub fn encode_piece_code(content: SquareContent) -> u8 {
    match content {
        SquareContent::Empty => 0,
        SquareContent::Piece(piece) => {
            let base = match piece.kind {
                PieceKind::Pawn => 1,
                PieceKind::Rook => 2,
                PieceKind::Knight => 3,
                PieceKind::Bishop => 4,
                PieceKind::King => 5,
                PieceKind::Queen => 6,
            };
            match piece.color {
                Color::Light => base,
                Color::Dark => base + 6,
            }
        }
        SquareContent::ResultMarker(GameResult::Draw) => 13,
        SquareContent::ResultMarker(GameResult::WhiteWins) => 14,
        SquareContent::ResultMarker(GameResult::BlackWins) => 15,
    }
}

/// Sensor index (a8 = 0) to engine square (a1 = 0).
pub fn sensor_to_square(sensor: u8) -> DecodeResult<Square> {
    if sensor >= 64 {
        return Err(DecodeError::InvalidSquare(sensor));
    }
    Ok(make_square(sensor % 8, 7 - sensor / 8))
}

/// Engine square to sensor index.
#[inline]
pub fn square_to_sensor(square: Square) -> u8 {
    make_square(square_file(square), 7 - square_rank(square))
}
