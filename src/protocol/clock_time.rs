//! Chess clock reading reported through the board.
//!
//! Each side's time arrives as `[flags << 4 | hours, BCD minutes, BCD
//! seconds]`, right side first, followed by one status byte.

use std::fmt;
use std::time::Duration;

use crate::errors::{DecodeError, DecodeResult};
use crate::protocol::dgt_constants::BWTIME_LEN;

pub mod side_flag {
    pub const FINAL_FLAG: u8 = 0x01;
    pub const TIME_PER_MOVE: u8 = 0x02;
    pub const FLAG_FALLEN: u8 = 0x04;
}

pub mod clock_status {
    pub const RUNNING: u8 = 0x01;
    /// Tumbler position; set when the right side's lever is up.
    pub const RIGHT_HIGH: u8 = 0x02;
    pub const BATTERY_LOW: u8 = 0x04;
    pub const LEFT_TO_MOVE: u8 = 0x08;
    pub const RIGHT_TO_MOVE: u8 = 0x10;
    pub const CONNECTED: u8 = 0x20;
}

/// One clock reading. Left and right are as seen from the board's sensors
/// until the reading is rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    pub left: Duration,
    pub left_flags: u8,
    pub right: Duration,
    pub right_flags: u8,
    pub status: u8,
}

impl ClockTime {
    pub fn decode(payload: &[u8]) -> DecodeResult<Self> {
        if payload.len() != BWTIME_LEN {
            return Err(DecodeError::WrongPayloadLength {
                message: "clock time",
                expected: BWTIME_LEN,
                actual: payload.len(),
            });
        }

        let (right, right_flags) = decode_side(&payload[0..3]);
        let (left, left_flags) = decode_side(&payload[3..6]);
        Ok(Self {
            left,
            left_flags,
            right,
            right_flags,
            status: payload[6],
        })
    }

    /// Wire form of this reading.
    pub fn encode(&self) -> [u8; BWTIME_LEN] {
        let right = encode_side(self.right, self.right_flags);
        let left = encode_side(self.left, self.left_flags);
        [right[0], right[1], right[2], left[0], left[1], left[2], self.status]
    }

    /// The same reading for a board turned around: sides swap, the tumbler
    /// flips and the to-move bits trade places.
    pub fn rotated(&self) -> Self {
        use clock_status::*;

        let mut status = self.status & !(RIGHT_HIGH | LEFT_TO_MOVE | RIGHT_TO_MOVE);
        status |= (self.status & RIGHT_HIGH) ^ RIGHT_HIGH;
        if self.status & LEFT_TO_MOVE != 0 {
            status |= RIGHT_TO_MOVE;
        }
        if self.status & RIGHT_TO_MOVE != 0 {
            status |= LEFT_TO_MOVE;
        }

        Self {
            left: self.right,
            left_flags: self.right_flags,
            right: self.left,
            right_flags: self.left_flags,
            status,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status & clock_status::RUNNING != 0
    }

    pub fn is_left_high(&self) -> bool {
        self.status & clock_status::RIGHT_HIGH == 0
    }

    pub fn is_right_high(&self) -> bool {
        !self.is_left_high()
    }

    pub fn is_battery_low(&self) -> bool {
        self.status & clock_status::BATTERY_LOW != 0
    }

    pub fn is_left_to_move(&self) -> bool {
        self.status & clock_status::LEFT_TO_MOVE != 0
    }

    pub fn is_right_to_move(&self) -> bool {
        self.status & clock_status::RIGHT_TO_MOVE != 0
    }

    pub fn is_connected(&self) -> bool {
        self.status & clock_status::CONNECTED != 0
    }

    pub fn left_flag_fallen(&self) -> bool {
        self.left_flags & side_flag::FLAG_FALLEN != 0
    }

    pub fn right_flag_fallen(&self) -> bool {
        self.right_flags & side_flag::FLAG_FALLEN != 0
    }

    pub fn left_final_flag(&self) -> bool {
        self.left_flags & side_flag::FINAL_FLAG != 0
    }

    pub fn right_final_flag(&self) -> bool {
        self.right_flags & side_flag::FINAL_FLAG != 0
    }

    pub fn left_time_per_move(&self) -> bool {
        self.left_flags & side_flag::TIME_PER_MOVE != 0
    }

    pub fn right_time_per_move(&self) -> bool {
        self.right_flags & side_flag::TIME_PER_MOVE != 0
    }

    pub fn left_time_string(&self) -> String {
        format_clock(self.left)
    }

    pub fn right_time_string(&self) -> String {
        format_clock(self.right)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "left {} right {}{}",
            self.left_time_string(),
            self.right_time_string(),
            if self.is_running() { " running" } else { "" }
        )
    }
}

/// `h:mm:ss`.
pub fn format_clock(time: Duration) -> String {
    let total = time.as_secs();
    format!("{}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

fn decode_side(bytes: &[u8]) -> (Duration, u8) {
    let hours = u64::from(bytes[0] & 0x0f);
    let minutes = u64::from(from_bcd(bytes[1]));
    let seconds = u64::from(from_bcd(bytes[2]));
    (
        Duration::from_secs(hours * 3600 + minutes * 60 + seconds),
        bytes[0] >> 4,
    )
}

fn encode_side(time: Duration, flags: u8) -> [u8; 3] {
    let total = time.as_secs();
    let hours = ((total / 3600) % 10) as u8;
    let minutes = ((total / 60) % 60) as u8;
    let seconds = (total % 60) as u8;
    [(flags << 4) | hours, to_bcd(minutes), to_bcd(seconds)]
}

#[inline]
fn from_bcd(byte: u8) -> u8 {
    (byte >> 4) * 10 + (byte & 0x0f)
}

#[inline]
fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}
