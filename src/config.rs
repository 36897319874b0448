//! Runtime configuration for the driver and the reconstructor.
//!
//! Both structs have sensible defaults; override single fields with struct
//! update syntax, e.g. `ReconstructorConfig { honor_result_signal: false,
//! ..Default::default() }`.

use std::env;

/// Smallest buffer the framer keeps between feeds.
pub const DEFAULT_BUFFER_CAPACITY: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Capacity the framer's buffer starts with and shrinks back to.
    pub default_buffer_capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            default_buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl DriverConfig {
    /// Defaults, with `DGT_BUFFER_CAPACITY` applied when it holds a positive integer.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(capacity) = env::var("DGT_BUFFER_CAPACITY")
            .ok()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|&capacity| capacity > 0)
        {
            config.default_buffer_capacity = capacity;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructorConfig {
    /// Accept a starting setup seen from the far side of the board.
    pub detect_rotated_setup: bool,
    /// End the game when the players show a result with the kings or with
    /// result marker pieces.
    pub honor_result_signal: bool,
}

impl Default for ReconstructorConfig {
    fn default() -> Self {
        Self {
            detect_rotated_setup: true,
            honor_result_signal: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(DriverConfig::default().default_buffer_capacity, 128);
        let config = ReconstructorConfig {
            honor_result_signal: false,
            ..Default::default()
        };
        assert!(config.detect_rotated_setup);
        assert!(!config.honor_result_signal);
    }
}
