//! Arena of positions reachable during the current game.
//!
//! Every node remembers the node it was reached from and the move that got
//! there, so a game is recovered by walking parents back to the root. Nodes
//! are looked up by placement through a hash index; several nodes may share a
//! placement (transpositions, repetitions) and the most recently inserted one
//! wins.

use std::collections::HashMap;

use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::chess_move::Move;
use crate::protocol::clock_time::ClockTime;

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct ReachableNode {
    pub position: Position,
    pub side_to_move: Color,
    pub parent: Option<NodeId>,
    pub via: Option<Move>,
    /// Last clock reading seen while this node was confirmed.
    pub clock: Option<ClockTime>,
    expanded: bool,
}

#[derive(Debug, Default)]
pub struct ReachablePositions {
    nodes: Vec<ReachableNode>,
    by_placement: HashMap<u64, Vec<NodeId>>,
}

impl ReachablePositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every node. Allocations are kept for the next game.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.by_placement.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn seed_root(&mut self, position: Position, side_to_move: Color) -> NodeId {
        self.insert(ReachableNode {
            position,
            side_to_move,
            parent: None,
            via: None,
            clock: None,
            expanded: false,
        })
    }

    /// Index every position one legal ply away from `id`. Expanding a node
    /// twice is a no-op.
    pub fn expand<G: MoveGenerator>(&mut self, generator: &G, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.expanded {
            return;
        }

        let side = node.side_to_move;
        let children = generator.generate_legal_moves(&node.position, side);
        self.nodes[id].expanded = true;
        for child in children {
            self.insert(ReachableNode {
                position: child.position_after,
                side_to_move: side.opposite(),
                parent: Some(id),
                via: Some(child.chess_move),
                clock: None,
                expanded: false,
            });
        }
    }

    /// Node with the same placement as `position`, latest insert first.
    pub fn lookup(&self, position: &Position) -> Option<NodeId> {
        self.by_placement
            .get(&position.placement_hash())?
            .iter()
            .rev()
            .copied()
            .find(|&id| self.nodes[id].position.same_placement(position))
    }

    pub fn node(&self, id: NodeId) -> Option<&ReachableNode> {
        self.nodes.get(id)
    }

    pub fn set_clock(&mut self, id: NodeId, clock: ClockTime) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.clock = Some(clock);
        }
    }

    /// Nodes from the first move after the root up to and including `id`.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get(node_id) else {
                break;
            };
            if node.parent.is_none() {
                break;
            }
            path.push(node_id);
            current = node.parent;
        }
        path.reverse();
        path
    }

    fn insert(&mut self, node: ReachableNode) -> NodeId {
        let id = self.nodes.len();
        self.by_placement
            .entry(node.position.placement_hash())
            .or_default()
            .push(id);
        self.nodes.push(node);
        id
    }
}
