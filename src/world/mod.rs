//! World services consumed by the decision engine
//!
//! The graph, roster, target board and capture service are owned by the
//! host game. The engine borrows them through [`AiServices`] for one turn.

pub mod capture;
pub mod graph;
pub mod node;
pub mod roster;
pub mod target;

pub use capture::{CaptureCause, CaptureDetails, CaptureService, TeamCapture};
pub use graph::{Connection, NodeGraph};
pub use node::{Node, NODE_STAT_MAX};
pub use roster::{Actor, ActorStatus, Roster};
pub use target::{Target, TargetBoard, TargetStatus};

use crate::core::rng::DecisionRng;
use crate::core::types::{AlertPosture, NodeId, Turn};

/// Host-owned simulation state the engine reads and mutates
#[derive(Debug, Clone)]
pub struct World {
    pub turn: Turn,
    pub graph: NodeGraph,
    pub roster: Roster,
    pub targets: TargetBoard,
    pub alert: AlertPosture,
    /// Approval of the rebel faction headquarters
    pub approval: u32,
    /// Strategic destinations for the controlled entity
    pub goals: Vec<NodeId>,
    /// Actual pursuer location (not intel)
    pub pursuer_node: Option<NodeId>,
}

impl World {
    pub fn new(roster_capacity: usize) -> Self {
        Self {
            turn: 0,
            graph: NodeGraph::new(),
            roster: Roster::new(roster_capacity),
            targets: TargetBoard::new(),
            alert: AlertPosture::Normal,
            approval: 5,
            goals: Vec::new(),
            pursuer_node: None,
        }
    }
}

/// Explicit services threaded through one turn of decision making
pub struct AiServices<'a> {
    pub world: &'a mut World,
    pub capture: &'a mut dyn CaptureService,
    pub rng: &'a mut dyn DecisionRng,
}

impl<'a> AiServices<'a> {
    pub fn new(
        world: &'a mut World,
        capture: &'a mut dyn CaptureService,
        rng: &'a mut dyn DecisionRng,
    ) -> Self {
        Self {
            world,
            capture,
            rng,
        }
    }
}
