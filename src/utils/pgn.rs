//! PGN export for reconstructed games.
//!
//! Moves are written in SAN. With clock output enabled, each move carries the
//! mover's clock as a `{[%clk h:mm:ss]}` comment: white moves the left clock,
//! black moves the right one.

use std::collections::BTreeMap;

use crate::reconstruction::played_game::CompletedGame;

/// Seven tag roster headers for `game`, with the date taken from when the
/// game started.
pub fn default_headers(game: &CompletedGame) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "DGT board game".to_owned());
    headers.insert("Site".to_owned(), "?".to_owned());
    headers.insert("Date".to_owned(), game.recorded_at.format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), result_token(game).to_owned());
    headers
}

pub fn write_pgn(game: &CompletedGame, include_clock: bool) -> String {
    write_pgn_with_headers(game, &default_headers(game), include_clock)
}

/// `headers` are written as given, in key order. The movetext result always
/// comes from the game itself.
pub fn write_pgn_with_headers(game: &CompletedGame, headers: &BTreeMap<String, String>, include_clock: bool) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');
    out.push_str(&movetext(game, include_clock));
    out.push('\n');
    out
}

/// SAN movetext followed by the result token.
pub fn movetext(game: &CompletedGame, include_clock: bool) -> String {
    let mut parts = Vec::<String>::with_capacity(game.moves.len() * 2 + 1);
    for (ply, played) in game.moves.iter().enumerate() {
        let white = ply % 2 == 0;
        if white {
            parts.push(format!("{}. {}", ply / 2 + 1, played.san));
        } else {
            parts.push(played.san.clone());
        }

        if include_clock {
            if let Some(clock) = played.clock {
                let time = if white {
                    clock.left_time_string()
                } else {
                    clock.right_time_string()
                };
                parts.push(format!("{{[%clk {time}]}}"));
            }
        }
    }
    parts.push(result_token(game).to_owned());
    parts.join(" ")
}

fn result_token(game: &CompletedGame) -> &'static str {
    game.result.map_or("*", |result| result.pgn_token())
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
