//! Commands relayed through the board to an attached clock.
//!
//! Every command travels as
//! `[0x2b, payload_len + 3, 0x03, message_id, payload.., 0x00]`.

use std::time::Duration;

use crate::protocol::dgt_constants::{clock_id, CLOCK_END_MESSAGE, CLOCK_MESSAGE, CLOCK_START_MESSAGE};

/// Time and direction shown on one side by `SetAndRun`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSide {
    pub time: Duration,
    pub counts_up: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCommand {
    /// Leave a custom display and return to showing times.
    End,
    /// Ask which buttons are pressed.
    Button,
    /// Ask for the clock firmware version.
    Version,
    /// Beep for `duration` units of 64 ms.
    Beep { duration: u8 },
    /// Load both times and start (or pause) the clock.
    SetAndRun {
        left: ClockSide,
        right: ClockSide,
        pause: bool,
        toggle_on_lever: bool,
    },
}

impl ClockCommand {
    pub const fn message_id(&self) -> u8 {
        match self {
            ClockCommand::End => clock_id::END,
            ClockCommand::Button => clock_id::BUTTON,
            ClockCommand::Version => clock_id::VERSION,
            ClockCommand::Beep { .. } => clock_id::BEEP,
            ClockCommand::SetAndRun { .. } => clock_id::SETNRUN,
        }
    }

    pub fn payload(&self) -> Vec<u8> {
        match *self {
            ClockCommand::End | ClockCommand::Button | ClockCommand::Version => Vec::new(),
            ClockCommand::Beep { duration } => vec![duration],
            ClockCommand::SetAndRun {
                left,
                right,
                pause,
                toggle_on_lever,
            } => {
                let [lh, lm, ls] = side_bytes(left);
                let [rh, rm, rs] = side_bytes(right);
                let mut flags = 0u8;
                if !left.counts_up {
                    flags |= 0x01;
                }
                if !right.counts_up {
                    flags |= 0x02;
                }
                if pause {
                    flags |= 0x04;
                }
                if toggle_on_lever {
                    flags |= 0x08;
                }
                vec![lh, lm, ls, rh, rm, rs, flags]
            }
        }
    }

    /// Complete outbound frame.
    pub fn to_frame(&self) -> Vec<u8> {
        let payload = self.payload();
        let mut frame = Vec::with_capacity(payload.len() + 5);
        frame.push(CLOCK_MESSAGE);
        frame.push(payload.len() as u8 + 3);
        frame.push(CLOCK_START_MESSAGE);
        frame.push(self.message_id());
        frame.extend_from_slice(&payload);
        frame.push(CLOCK_END_MESSAGE);
        frame
    }
}

// Plain binary, unlike the BCD the clock reports back.
fn side_bytes(side: ClockSide) -> [u8; 3] {
    let total = side.time.as_secs();
    let hours = ((total / 3600) & 0x0f) as u8;
    let minutes = ((total / 60) % 60) as u8;
    let seconds = (total % 60) as u8;
    let direction = if side.counts_up { 0x10 } else { 0 };
    [hours | direction, minutes, seconds]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameterless_commands_have_five_byte_frames() {
        assert_eq!(ClockCommand::End.to_frame(), vec![0x2b, 0x03, 0x03, 0x03, 0x00]);
        assert_eq!(ClockCommand::Version.to_frame(), vec![0x2b, 0x03, 0x03, 0x09, 0x00]);
        assert_eq!(ClockCommand::Button.to_frame(), vec![0x2b, 0x03, 0x03, 0x08, 0x00]);
    }

    #[test]
    fn beep_carries_duration() {
        assert_eq!(
            ClockCommand::Beep { duration: 8 }.to_frame(),
            vec![0x2b, 0x04, 0x03, 0x0b, 0x08, 0x00]
        );
    }

    #[test]
    fn set_and_run_packs_times_and_flags() {
        let command = ClockCommand::SetAndRun {
            left: ClockSide {
                time: Duration::from_secs(3600 + 30 * 60 + 5),
                counts_up: false,
            },
            right: ClockSide {
                time: Duration::from_secs(90),
                counts_up: true,
            },
            pause: true,
            toggle_on_lever: false,
        };
        assert_eq!(
            command.to_frame(),
            vec![0x2b, 0x0a, 0x03, 0x0a, 0x01, 30, 5, 0x10, 1, 30, 0x01 | 0x04, 0x00]
        );
    }
}
