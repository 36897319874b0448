//! Board-side frame encoding.
//!
//! The board only ever sends these frames; building them here lets tests,
//! benches and the replay tool synthesize sensor traffic.

use crate::protocol::clock_time::ClockTime;
use crate::protocol::dgt_constants::{message_kind, FRAME_HEADER_LEN, MESSAGE_BIT};
use crate::protocol::messages::{BoardDump, FieldUpdate};

/// Largest frame the 14-bit size field can describe.
pub const MAX_FRAME_LEN: usize = (1 << 14) - 1;

/// Wrap `payload` in a frame of message `kind`.
///
/// Payloads too large for the size field are truncated to fit.
pub fn encode_frame(kind: u8, payload: &[u8]) -> Vec<u8> {
    let payload = &payload[..payload.len().min(MAX_FRAME_LEN - FRAME_HEADER_LEN)];
    let frame_len = payload.len() + FRAME_HEADER_LEN;

    let mut frame = Vec::with_capacity(frame_len);
    frame.push(kind | MESSAGE_BIT);
    frame.push(((frame_len >> 7) & 0x7f) as u8);
    frame.push((frame_len & 0x7f) as u8);
    frame.extend_from_slice(payload);
    frame
}

pub fn board_dump_frame(dump: &BoardDump) -> Vec<u8> {
    encode_frame(message_kind::BOARD_DUMP, &dump.encode())
}

pub fn field_update_frame(update: &FieldUpdate) -> Vec<u8> {
    encode_frame(message_kind::FIELD_UPDATE, &update.encode())
}

pub fn clock_time_frame(time: &ClockTime) -> Vec<u8> {
    encode_frame(message_kind::BWTIME, &time.encode())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_field_counts_the_header() {
        assert_eq!(encode_frame(message_kind::VERSION, &[3, 1]), vec![0x93, 0x00, 0x05, 3, 1]);
        let dump = encode_frame(message_kind::BOARD_DUMP, &[0; 64]);
        assert_eq!(&dump[..3], &[0x86, 0x00, 67]);
        let long = encode_frame(message_kind::EE_MOVES, &[0; 200]);
        assert_eq!(&long[..3], &[0x8f, 0x01, 203 - 128]);
    }
}
