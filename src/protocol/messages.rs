//! Typed inbound messages and their payload decoders.

use crate::errors::{DecodeError, DecodeResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::protocol::clock_time::ClockTime;
use crate::protocol::dgt_constants::*;

/// Full snapshot of all 64 sensors, in engine square order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDump {
    pub squares: [SquareContent; 64],
}

impl BoardDump {
    pub fn decode(payload: &[u8]) -> DecodeResult<Self> {
        expect_len("board dump", payload, BOARD_DUMP_LEN)?;

        let mut squares = [SquareContent::Empty; 64];
        for (sensor, &code) in payload.iter().enumerate() {
            let square = sensor_to_square(sensor as u8)?;
            squares[square as usize] = decode_piece_code(code)?;
        }
        Ok(Self { squares })
    }

    /// Dump of a position with no result markers.
    pub fn from_position(position: &Position) -> Self {
        let mut squares = [SquareContent::Empty; 64];
        for (square, content) in squares.iter_mut().enumerate() {
            if let Some(piece) = position.piece_at(square as Square) {
                *content = SquareContent::Piece(piece);
            }
        }
        Self { squares }
    }

    /// Sensor order payload.
    pub fn encode(&self) -> [u8; BOARD_DUMP_LEN] {
        let mut payload = [0u8; BOARD_DUMP_LEN];
        for (square, content) in self.squares.iter().enumerate() {
            payload[square_to_sensor(square as Square) as usize] = encode_piece_code(*content);
        }
        payload
    }

    /// Pieces only; result markers are left out.
    pub fn position(&self) -> Position {
        let mut position = Position::new_empty();
        for (square, content) in self.squares.iter().enumerate() {
            if let SquareContent::Piece(piece) = content {
                position.put(square as Square, *piece);
            }
        }
        position
    }
}

/// One sensor changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldUpdate {
    pub square: Square,
    pub content: SquareContent,
}

impl FieldUpdate {
    pub fn decode(payload: &[u8]) -> DecodeResult<Self> {
        expect_len("field update", payload, FIELD_UPDATE_LEN)?;
        Ok(Self {
            square: sensor_to_square(payload[0])?,
            content: decode_piece_code(payload[1])?,
        })
    }

    pub fn encode(&self) -> [u8; FIELD_UPDATE_LEN] {
        [square_to_sensor(self.square), encode_piece_code(self.content)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub major: u8,
    pub minor: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DgtMessage {
    BoardDump(BoardDump),
    FieldUpdate(FieldUpdate),
    ClockTime(ClockTime),
    /// The clock accepted the last command sent to it.
    ClockAck([u8; BWTIME_LEN]),
    Version(VersionInfo),
    SerialNumber(String),
    BusAddress(u16),
    Trademark(String),
    LongSerialNumber(String),
    /// Raw EEPROM event log.
    EepromMoves(Vec<u8>),
}

/// Decode the payload of one frame.
///
/// `Ok(None)` means the frame was valid but carries nothing worth reporting:
/// empty frames and the all-zero clock reading some boards send between
/// real ones.
pub fn decode_message(kind: u8, payload: &[u8]) -> DecodeResult<Option<DgtMessage>> {
    let message = match kind {
        message_kind::NONE => return Ok(None),
        message_kind::BOARD_DUMP => DgtMessage::BoardDump(BoardDump::decode(payload)?),
        message_kind::FIELD_UPDATE => DgtMessage::FieldUpdate(FieldUpdate::decode(payload)?),
        message_kind::BWTIME => return decode_clock_payload(payload),
        message_kind::EE_MOVES => DgtMessage::EepromMoves(payload.to_vec()),
        message_kind::BUSADRES => {
            expect_len("bus address", payload, BUSADRES_LEN)?;
            DgtMessage::BusAddress((u16::from(payload[0]) << 7) | u16::from(payload[1]))
        }
        message_kind::SERIALNR => DgtMessage::SerialNumber(ascii_string(payload)),
        message_kind::TRADEMARK => DgtMessage::Trademark(ascii_string(payload)),
        message_kind::LONG_SERIALNR => DgtMessage::LongSerialNumber(ascii_string(payload)),
        message_kind::VERSION => {
            expect_len("version", payload, VERSION_LEN)?;
            DgtMessage::Version(VersionInfo {
                major: payload[0],
                minor: payload[1],
            })
        }
        message_kind::BOARD_DUMP_50B | message_kind::BOARD_DUMP_50W => {
            return Err(DecodeError::UnsupportedMessageKind(kind))
        }
        other => return Err(DecodeError::UnknownMessageKind(other)),
    };
    Ok(Some(message))
}

fn decode_clock_payload(payload: &[u8]) -> DecodeResult<Option<DgtMessage>> {
    expect_len("clock time", payload, BWTIME_LEN)?;

    if payload[0] & 0x0f == CLOCK_ACK_NIBBLE || payload[3] & 0x0f == CLOCK_ACK_NIBBLE {
        let mut raw = [0u8; BWTIME_LEN];
        raw.copy_from_slice(payload);
        return Ok(Some(DgtMessage::ClockAck(raw)));
    }

    if payload.iter().all(|&b| b == 0) {
        return Ok(None);
    }

    Ok(Some(DgtMessage::ClockTime(ClockTime::decode(payload)?)))
}

fn expect_len(message: &'static str, payload: &[u8], expected: usize) -> DecodeResult<()> {
    if payload.len() != expected {
        return Err(DecodeError::WrongPayloadLength {
            message,
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

fn ascii_string(payload: &[u8]) -> String {
    String::from_utf8_lossy(payload)
        .trim_end_matches('\0')
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_dump_of_start_position_decodes_back() {
        let dump = BoardDump::from_position(Position::starting());
        let payload = dump.encode();
        // Sensor 0 is a8 with a dark rook; sensor 60 is e1 with the light king.
        assert_eq!(payload[0], 8);
        assert_eq!(payload[60], 5);

        let decoded = BoardDump::decode(&payload).expect("64 bytes should decode");
        assert_eq!(decoded, dump);
        assert_eq!(&decoded.position(), Position::starting());
    }

    #[test]
    fn board_dump_rejects_bad_piece_codes_and_lengths() {
        let mut payload = [0u8; 64];
        payload[10] = 0x30;
        assert_eq!(
            BoardDump::decode(&payload),
            Err(DecodeError::InvalidPieceCode(0x30))
        );
        assert!(matches!(
            BoardDump::decode(&payload[..63]),
            Err(DecodeError::WrongPayloadLength { actual: 63, .. })
        ));
    }

    #[test]
    fn field_update_maps_sensor_square() {
        let update = FieldUpdate::decode(&[36, 1]).expect("two bytes should decode");
        assert_eq!(update.square, 28);
        assert_eq!(
            update.content,
            SquareContent::Piece(Piece::new(Color::Light, PieceKind::Pawn))
        );
        assert_eq!(
            FieldUpdate::decode(&[64, 1]),
            Err(DecodeError::InvalidSquare(64))
        );
    }

    #[test]
    fn clock_ack_and_empty_readings() {
        let ack = [0x0a, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            decode_message(message_kind::BWTIME, &ack),
            Ok(Some(DgtMessage::ClockAck(ack)))
        );
        let ack_left = [0, 0, 0, 0x1a, 0, 0, 0];
        assert!(matches!(
            decode_message(message_kind::BWTIME, &ack_left),
            Ok(Some(DgtMessage::ClockAck(_)))
        ));
        assert_eq!(decode_message(message_kind::BWTIME, &[0; 7]), Ok(None));
        assert!(matches!(
            decode_message(message_kind::BWTIME, &[0, 0, 0, 0, 0, 0, 0x01]),
            Ok(Some(DgtMessage::ClockTime(_)))
        ));
    }

    #[test]
    fn small_fixed_messages() {
        assert_eq!(
            decode_message(message_kind::BUSADRES, &[0x01, 0x02]),
            Ok(Some(DgtMessage::BusAddress(0x82)))
        );
        assert_eq!(
            decode_message(message_kind::VERSION, &[3, 1]),
            Ok(Some(DgtMessage::Version(VersionInfo { major: 3, minor: 1 })))
        );
        assert_eq!(
            decode_message(message_kind::TRADEMARK, b"Digital Game Technology"),
            Ok(Some(DgtMessage::Trademark("Digital Game Technology".to_owned())))
        );
        assert_eq!(decode_message(message_kind::NONE, &[]), Ok(None));
    }

    #[test]
    fn unknown_and_draughts_kinds_are_errors() {
        assert_eq!(
            decode_message(0x7e, &[]),
            Err(DecodeError::UnknownMessageKind(0x7e))
        );
        assert_eq!(
            decode_message(message_kind::BOARD_DUMP_50B, &[0; 50]),
            Err(DecodeError::UnsupportedMessageKind(0x14))
        );
        assert_eq!(
            decode_message(message_kind::BATTERY_STATUS, &[0; 9]),
            Err(DecodeError::UnknownMessageKind(0x20))
        );
    }
}
