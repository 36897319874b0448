//! Incremental frame extraction from the board's byte stream.
//!
//! Bytes may arrive in any chunking. They are appended to a rolling buffer
//! and complete frames are cut off the front. A frame is
//! `[command | 0x80][size hi][size lo][payload]` where the 14-bit size counts
//! the three header bytes. When the header is not well formed the framer
//! drops the command byte and skips ahead to the next byte with bit 7 set.

use tracing::{debug, trace, warn};

use crate::config::DriverConfig;
use crate::protocol::dgt_constants::{FRAME_HEADER_LEN, MESSAGE_BIT};
use crate::protocol::messages::{decode_message, DgtMessage};

/// Running totals, mostly useful to diagnose a noisy link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FramerStats {
    pub frames: usize,
    pub dropped_frames: usize,
    pub skipped_bytes: usize,
}

#[derive(Debug)]
pub struct MessageFramer {
    buffer: Vec<u8>,
    // Bytes at the front of `buffer` already consumed.
    start: usize,
    default_capacity: usize,
    stats: FramerStats,
}

impl Default for MessageFramer {
    fn default() -> Self {
        Self::new(&DriverConfig::default())
    }
}

impl MessageFramer {
    pub fn new(config: &DriverConfig) -> Self {
        Self {
            buffer: Vec::with_capacity(config.default_buffer_capacity),
            start: 0,
            default_capacity: config.default_buffer_capacity,
            stats: FramerStats::default(),
        }
    }

    /// Feed raw bytes and collect every message they complete.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<DgtMessage> {
        let mut messages = Vec::new();
        self.feed_with(bytes, |message| messages.push(message));
        messages
    }

    /// Feed raw bytes, handing each completed message to `emit` in order.
    pub fn feed_with<F: FnMut(DgtMessage)>(&mut self, bytes: &[u8], mut emit: F) {
        self.buffer.extend_from_slice(bytes);

        while self.buffer.len() - self.start >= FRAME_HEADER_LEN {
            let header = &self.buffer[self.start..self.start + FRAME_HEADER_LEN];
            let (command, size_hi, size_lo) = (header[0], header[1], header[2]);

            if command & MESSAGE_BIT == 0 || size_hi & MESSAGE_BIT != 0 || size_lo & MESSAGE_BIT != 0 {
                self.resynchronize();
                continue;
            }

            let frame_len = (usize::from(size_hi) << 7) | usize::from(size_lo);
            if frame_len < FRAME_HEADER_LEN {
                self.resynchronize();
                continue;
            }
            if frame_len > self.buffer.len() - self.start {
                break;
            }

            let kind = command & !MESSAGE_BIT;
            let payload = &self.buffer[self.start + FRAME_HEADER_LEN..self.start + frame_len];
            let decoded = decode_message(kind, payload);
            self.start += frame_len;
            self.stats.frames += 1;

            match decoded {
                Ok(Some(message)) => emit(message),
                Ok(None) => trace!(kind, "frame carried nothing to report"),
                Err(err) => {
                    self.stats.dropped_frames += 1;
                    warn!(kind, %err, "dropping undecodable frame");
                }
            }
        }

        self.compact();
    }

    /// Bytes received but not yet part of a complete frame.
    pub fn pending_len(&self) -> usize {
        self.buffer.len() - self.start
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn stats(&self) -> FramerStats {
        self.stats
    }

    /// Drop the current command byte and everything up to the next byte
    /// that could start a frame.
    fn resynchronize(&mut self) {
        let rest = &self.buffer[self.start + 1..];
        let skip = rest
            .iter()
            .position(|b| b & MESSAGE_BIT != 0)
            .map_or(rest.len() + 1, |offset| offset + 1);

        debug!(skip, "resynchronizing frame stream");
        self.start += skip;
        self.stats.skipped_bytes += skip;
    }

    fn compact(&mut self) {
        if self.start > 0 {
            self.buffer.drain(..self.start);
            self.start = 0;
        }
        if self.buffer.capacity() > self.default_capacity && self.buffer.len() < self.default_capacity {
            self.buffer.shrink_to(self.default_capacity);
        }
    }
}
