//! Replays a captured DGT board byte stream and prints the games it holds.
//!
//! The capture file holds one chunk per line as hex digits, exactly as the
//! bytes arrived from the serial port. Blank lines and lines starting with
//! `#` are skipped.
//!
//! Usage:
//! `cargo run --bin dgt_replay -- capture.hex`
//! `cargo run --bin dgt_replay -- capture.hex --clock`
//!
//! Set `RUST_LOG=dgt_board=debug` to follow the reconstruction.

use std::fs;

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use dgt_board::config::{DriverConfig, ReconstructorConfig};
use dgt_board::protocol::driver::DgtDriver;
use dgt_board::reconstruction::game_reconstructor::GameReconstructor;
use dgt_board::reconstruction::played_game::CompletedGame;
use dgt_board::utils::pgn::write_pgn;
use dgt_board::utils::render_position::render_position;

fn parse_hex_line(line: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<u8> = line.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in {line:?}"));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).map_err(|e| e.to_string())?;
            u8::from_str_radix(text, 16).map_err(|e| format!("bad hex byte {text:?}: {e}"))
        })
        .collect()
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let include_clock = args.iter().any(|arg| arg == "--clock");
    let Some(path) = args.iter().find(|arg| !arg.starts_with("--")) else {
        return Err("usage: dgt_replay <capture-file> [--clock]".to_owned());
    };

    let capture = fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}"))?;

    let mut driver = DgtDriver::with_config(std::io::sink(), &DriverConfig::from_env());
    let mut reconstructor = GameReconstructor::new(ReconstructorConfig::default());
    let mut games = Vec::<CompletedGame>::new();

    for (line_no, line) in capture.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let chunk = parse_hex_line(line).map_err(|e| format!("line {}: {e}", line_no + 1))?;

        for message in driver.feed(&chunk) {
            match reconstructor.handle_message(&message) {
                Ok(Some(game)) => games.push(game),
                Ok(None) => {}
                Err(err) => {
                    warn!(line = line_no + 1, %err, "abandoning game after desync");
                    games.extend(reconstructor.end_game());
                }
            }
        }
    }
    games.extend(reconstructor.end_game());

    let stats = driver.framer_stats();
    info!(
        frames = stats.frames,
        dropped = stats.dropped_frames,
        skipped_bytes = stats.skipped_bytes,
        games = games.len(),
        "replay finished"
    );

    for game in &games {
        debug!("final position\n{}", render_position(game.final_position()));
        println!("{}", write_pgn(game, include_clock));
    }
    Ok(())
}
