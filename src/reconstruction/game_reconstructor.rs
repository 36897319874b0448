//! Turns a stream of board observations into played games.
//!
//! The reconstructor waits for the standard starting setup (either way
//! round), then follows the game by matching every observed placement
//! against the positions one legal ply away from any position confirmed so
//! far. Observations that match nothing are sensor noise (a piece in the
//! air) unless they show a result signal, which ends the game.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, trace, warn};

use crate::config::ReconstructorConfig;
use crate::errors::{ReconstructionError, ReconstructionResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::protocol::clock_time::ClockTime;
use crate::protocol::dgt_constants::SquareContent;
use crate::protocol::messages::{BoardDump, DgtMessage, FieldUpdate};
use crate::reconstruction::played_game::{CompletedGame, Orientation, PlayedMove};
use crate::reconstruction::reachable_positions::{NodeId, ReachablePositions};
use crate::reconstruction::result_signal::{king_signal, marker_signal};
use crate::utils::fen_generator::generate_placement_fen;
use crate::utils::long_algebraic::move_to_long_algebraic;
use crate::utils::render_position::render_position;
use crate::utils::san::render_san;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructorState {
    AwaitingInitialSetup,
    InGame { confirmed: NodeId },
}

/// Last known sensor picture, in logical coordinates once the orientation
/// is known.
#[derive(Debug, Clone)]
struct ObservedBoard {
    position: Position,
    markers: [Option<GameResult>; 64],
}

impl ObservedBoard {
    fn from_dump(dump: &BoardDump) -> Self {
        let mut markers = [None; 64];
        for (square, content) in dump.squares.iter().enumerate() {
            if let SquareContent::ResultMarker(result) = content {
                markers[square] = Some(*result);
            }
        }
        Self {
            position: dump.position(),
            markers,
        }
    }

    fn rotated(&self) -> Self {
        let mut markers = [None; 64];
        for (square, marker) in self.markers.iter().enumerate() {
            markers[rotate_square(square as Square) as usize] = *marker;
        }
        Self {
            position: self.position.rotated_180(),
            markers,
        }
    }

    fn apply(&mut self, square: Square, content: SquareContent) -> ReconstructionResult<()> {
        let index = square as usize;
        match content {
            SquareContent::Empty => {
                let had_piece = self.position.discard(square).is_some();
                let had_marker = self.markers[index].take().is_some();
                if !had_piece && !had_marker {
                    return Err(ReconstructionError::PieceRemovedFromEmptySquare { square });
                }
            }
            SquareContent::Piece(piece) => {
                self.markers[index] = None;
                self.position.put(square, piece);
            }
            SquareContent::ResultMarker(result) => {
                self.position.discard(square);
                self.markers[index] = Some(result);
            }
        }
        Ok(())
    }
}

pub struct GameReconstructor<G: MoveGenerator = LegalMoveGenerator> {
    generator: G,
    config: ReconstructorConfig,
    state: ReconstructorState,
    orientation: Orientation,
    board: Option<ObservedBoard>,
    positions: ReachablePositions,
    started_at: Option<DateTime<Utc>>,
}

impl Default for GameReconstructor<LegalMoveGenerator> {
    fn default() -> Self {
        Self::new(ReconstructorConfig::default())
    }
}

impl GameReconstructor<LegalMoveGenerator> {
    pub fn new(config: ReconstructorConfig) -> Self {
        Self::with_generator(LegalMoveGenerator, config)
    }
}

impl<G: MoveGenerator> GameReconstructor<G> {
    pub fn with_generator(generator: G, config: ReconstructorConfig) -> Self {
        Self {
            generator,
            config,
            state: ReconstructorState::AwaitingInitialSetup,
            orientation: Orientation::Normal,
            board: None,
            positions: ReachablePositions::new(),
            started_at: None,
        }
    }

    pub fn state(&self) -> ReconstructorState {
        self.state
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Position of the last confirmed move, or the start when no move has
    /// been confirmed yet. `None` before a game starts.
    pub fn confirmed_position(&self) -> Option<&Position> {
        match self.state {
            ReconstructorState::InGame { confirmed } => self.positions.node(confirmed).map(|node| &node.position),
            ReconstructorState::AwaitingInitialSetup => None,
        }
    }

    /// Feed one decoded board message. Returns the game it completed, if any.
    ///
    /// A field update before any board dump and a piece lifted from a square
    /// believed empty are errors; the reconstructor is left as it was.
    pub fn handle_message(&mut self, message: &DgtMessage) -> ReconstructionResult<Option<CompletedGame>> {
        match message {
            DgtMessage::BoardDump(dump) => {
                let observed = ObservedBoard::from_dump(dump);
                let observed = match self.orientation {
                    Orientation::Normal => observed,
                    Orientation::Rotated => observed.rotated(),
                };
                Ok(self.observe(observed))
            }
            DgtMessage::FieldUpdate(update) => self.handle_field_update(update),
            DgtMessage::ClockTime(time) => {
                self.handle_clock(time);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// End the current game without a result. `None` if no game is running.
    pub fn end_game(&mut self) -> Option<CompletedGame> {
        let game = self.current_game()?;
        info!(moves = game.moves.len(), "game ended without a result signal");
        self.reset();
        Some(game)
    }

    /// Snapshot of the game in progress, without a result.
    pub fn current_game(&self) -> Option<CompletedGame> {
        match self.state {
            ReconstructorState::InGame { confirmed } => Some(self.build_game(confirmed, None)),
            ReconstructorState::AwaitingInitialSetup => None,
        }
    }

    fn handle_field_update(&mut self, update: &FieldUpdate) -> ReconstructionResult<Option<CompletedGame>> {
        let Some(board) = self.board.as_ref() else {
            return Err(ReconstructionError::FieldUpdateBeforeBoardDump);
        };

        let square = match self.orientation {
            Orientation::Normal => update.square,
            Orientation::Rotated => rotate_square(update.square),
        };
        let mut next = board.clone();
        if let Err(err) = next.apply(square, update.content) {
            error!(%err, "board model lost track of the sensors");
            debug!("tracked board\n{}", render_position(&board.position));
            return Err(err);
        }
        Ok(self.observe(next))
    }

    fn handle_clock(&mut self, time: &ClockTime) {
        let ReconstructorState::InGame { confirmed } = self.state else {
            return;
        };
        let time = match self.orientation {
            Orientation::Normal => *time,
            Orientation::Rotated => time.rotated(),
        };
        trace!(%time, "clock reading");
        self.positions.set_clock(confirmed, time);
    }

    fn observe(&mut self, observed: ObservedBoard) -> Option<CompletedGame> {
        let board = self.board.insert(observed);

        let confirmed = match self.state {
            ReconstructorState::AwaitingInitialSetup => {
                self.try_start();
                return None;
            }
            ReconstructorState::InGame { confirmed } => confirmed,
        };

        if self.config.honor_result_signal {
            if let Some(result) = marker_signal(&board.markers) {
                return Some(self.finish(confirmed, result));
            }
        }

        if let Some(id) = self.positions.lookup(&board.position) {
            self.positions.expand(&self.generator, id);
            if id != confirmed {
                if let Some(chess_move) = self.positions.node(id).and_then(|node| node.via) {
                    debug!(uci = %move_to_long_algebraic(&chess_move), "confirmed move");
                } else {
                    debug!("back at the starting position");
                }
            }
            self.state = ReconstructorState::InGame { confirmed: id };
            return None;
        }

        if self.config.honor_result_signal {
            if let Some(result) = king_signal(&board.position) {
                return Some(self.finish(confirmed, result));
            }
        }

        trace!("observation matches no reachable position");
        None
    }

    fn try_start(&mut self) {
        let Some(board) = self.board.as_ref() else {
            return;
        };

        if board.position.same_placement(Position::starting()) {
            self.start(Orientation::Normal);
        } else if self.config.detect_rotated_setup && board.position.same_placement(Position::starting_rotated()) {
            self.board = self.board.take().map(|board| board.rotated());
            self.start(Orientation::Rotated);
        }
    }

    fn start(&mut self, orientation: Orientation) {
        self.positions.clear();
        let root = self.positions.seed_root(Position::starting().clone(), Color::Light);
        self.positions.expand(&self.generator, root);
        self.orientation = orientation;
        self.state = ReconstructorState::InGame { confirmed: root };
        self.started_at = Some(Utc::now());
        info!(?orientation, "starting position recognized");
    }

    fn finish(&mut self, confirmed: NodeId, result: GameResult) -> CompletedGame {
        let game = self.build_game(confirmed, Some(result));
        info!(
            result = result.pgn_token(),
            moves = game.moves.len(),
            placement = %generate_placement_fen(game.final_position()),
            "game finished"
        );
        self.reset();
        game
    }

    /// Back to waiting for a setup. The sensor picture is kept, in raw
    /// sensor coordinates, so field updates can continue to apply.
    fn reset(&mut self) {
        if self.orientation == Orientation::Rotated {
            self.board = self.board.take().map(|board| board.rotated());
        }
        self.orientation = Orientation::Normal;
        self.state = ReconstructorState::AwaitingInitialSetup;
        self.positions.clear();
        self.started_at = None;
    }

    fn build_game(&self, confirmed: NodeId, result: Option<GameResult>) -> CompletedGame {
        let mut moves = Vec::new();
        for id in self.positions.path_to(confirmed) {
            let Some(node) = self.positions.node(id) else {
                continue;
            };
            let (Some(chess_move), Some(parent)) = (node.via, node.parent.and_then(|p| self.positions.node(p))) else {
                continue;
            };

            let uci = move_to_long_algebraic(&chess_move);
            let san = render_san(&parent.position, &chess_move, &node.position).unwrap_or_else(|err| {
                warn!(%err, %uci, "could not render move as SAN");
                uci.clone()
            });
            moves.push(PlayedMove {
                chess_move,
                uci,
                san,
                clock: node.clock,
                position_after: node.position.clone(),
            });
        }

        CompletedGame {
            moves,
            result,
            orientation: self.orientation,
            recorded_at: self.started_at.unwrap_or_else(Utc::now),
        }
    }
}
