//! Board link: inbound framing plus outbound commands.
//!
//! The clock handles one command at a time, so at most one clock command may
//! be outstanding. Sending another before the clock's acknowledgment arrives
//! is refused. Nothing times the acknowledgment out; a host that wants a
//! timeout can call `force_clock_ready`.

use std::io::Write;

use tracing::{debug, trace};

use crate::config::DriverConfig;
use crate::errors::{DriverError, DriverResult};
use crate::protocol::clock_commands::ClockCommand;
use crate::protocol::dgt_constants::BoardCommand;
use crate::protocol::framer::{FramerStats, MessageFramer};
use crate::protocol::messages::DgtMessage;

#[derive(Debug)]
pub struct DgtDriver<W: Write> {
    framer: MessageFramer,
    link: W,
    ready_for_clock_message: bool,
}

impl<W: Write> DgtDriver<W> {
    pub fn new(link: W) -> Self {
        Self::with_config(link, &DriverConfig::default())
    }

    pub fn with_config(link: W, config: &DriverConfig) -> Self {
        Self {
            framer: MessageFramer::new(config),
            link,
            ready_for_clock_message: true,
        }
    }

    /// Feed bytes read from the board and return the messages they complete.
    /// A clock acknowledgment reopens the clock command gate.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<DgtMessage> {
        let mut messages = Vec::new();
        let ready = &mut self.ready_for_clock_message;
        self.framer.feed_with(bytes, |message| {
            if matches!(message, DgtMessage::ClockAck(_)) {
                trace!("clock acknowledged command");
                *ready = true;
            }
            messages.push(message);
        });
        messages
    }

    pub fn send_command(&mut self, command: BoardCommand) -> DriverResult<()> {
        debug!(?command, "sending board command");
        self.link.write_all(&[command.code()])?;
        self.link.flush()?;
        Ok(())
    }

    /// Send a clock command unless one is still awaiting acknowledgment.
    pub fn send_clock_command(&mut self, command: &ClockCommand) -> DriverResult<()> {
        if !self.ready_for_clock_message {
            return Err(DriverError::ClockCommandInFlight);
        }

        debug!(?command, "sending clock command");
        self.link.write_all(&command.to_frame())?;
        self.link.flush()?;
        self.ready_for_clock_message = false;
        Ok(())
    }

    pub fn is_ready_for_clock_message(&self) -> bool {
        self.ready_for_clock_message
    }

    /// Reopen the clock command gate without an acknowledgment.
    pub fn force_clock_ready(&mut self) {
        self.ready_for_clock_message = true;
    }

    pub fn framer_stats(&self) -> FramerStats {
        self.framer.stats()
    }

    pub fn link(&self) -> &W {
        &self.link
    }

    pub fn into_link(self) -> W {
        self.link
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::dgt_constants::message_kind;
    use crate::protocol::frame_encoding::encode_frame;

    #[test]
    fn board_commands_are_single_bytes() {
        let mut driver = DgtDriver::new(Vec::new());
        driver.send_command(BoardCommand::SendBoard).expect("vec sink should accept");
        driver.send_command(BoardCommand::SendUpdateNice).expect("vec sink should accept");
        assert_eq!(driver.link(), &vec![0x42, 0x4b]);
    }

    #[test]
    fn second_clock_command_waits_for_ack() {
        let mut driver = DgtDriver::new(Vec::new());
        driver
            .send_clock_command(&ClockCommand::Beep { duration: 2 })
            .expect("first command should be sent");
        assert!(!driver.is_ready_for_clock_message());
        assert!(matches!(
            driver.send_clock_command(&ClockCommand::End),
            Err(DriverError::ClockCommandInFlight)
        ));
        assert_eq!(driver.link().len(), 6);

        let messages = driver.feed(&encode_frame(message_kind::BWTIME, &[0x0a, 0, 0, 0, 0, 0, 0]));
        assert!(matches!(messages.as_slice(), [DgtMessage::ClockAck(_)]));
        assert!(driver.is_ready_for_clock_message());

        driver
            .send_clock_command(&ClockCommand::End)
            .expect("gate should be open after ack");
        assert_eq!(driver.link().len(), 11);
    }

    #[test]
    fn ordinary_clock_reading_does_not_open_the_gate() {
        let mut driver = DgtDriver::new(Vec::new());
        driver
            .send_clock_command(&ClockCommand::Version)
            .expect("first command should be sent");
        driver.feed(&encode_frame(message_kind::BWTIME, &[0x01, 0, 0, 0x01, 0, 0, 0x01]));
        driver.feed(&encode_frame(message_kind::BWTIME, &[0; 7]));
        assert!(!driver.is_ready_for_clock_message());

        driver.force_clock_ready();
        assert!(driver.send_clock_command(&ClockCommand::Version).is_ok());
    }
}
