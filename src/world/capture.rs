//! Capture service boundary

use serde::{Deserialize, Serialize};

use super::World;
use crate::core::types::{ActorRef, NodeId, TeamKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureCause {
    ErasureTeam,
    Pursuer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureDetails {
    pub node: NodeId,
    pub actor: ActorRef,
    pub cause: CaptureCause,
}

/// Decides whether an exposed actor is caught at a node
pub trait CaptureService {
    fn check_capture(&mut self, world: &World, node: NodeId, actor: ActorRef)
        -> Option<CaptureDetails>;
}

/// Captures at nodes holding an erasure team or the pursuer
#[derive(Debug, Clone, Copy, Default)]
pub struct TeamCapture;

impl CaptureService for TeamCapture {
    fn check_capture(
        &mut self,
        world: &World,
        node: NodeId,
        actor: ActorRef,
    ) -> Option<CaptureDetails> {
        if world.pursuer_node == Some(node) && actor.is_player() {
            return Some(CaptureDetails {
                node,
                actor,
                cause: CaptureCause::Pursuer,
            });
        }

        let erasure = world
            .graph
            .node(node)
            .is_some_and(|n| n.has_team(TeamKind::Erasure));
        erasure.then_some(CaptureDetails {
            node,
            actor,
            cause: CaptureCause::ErasureTeam,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ActorId;
    use crate::world::node::Node;

    fn world() -> World {
        let mut world = World::new(4);
        world.graph.add_node(Node::new(NodeId(0), "Safe"));
        world
            .graph
            .add_node(Node::new(NodeId(1), "Hot").with_team(TeamKind::Erasure));
        world
    }

    #[test]
    fn test_erasure_team_captures_anyone() {
        let world = world();
        let mut service = TeamCapture;
        let sub = ActorRef::Subordinate(ActorId(2));

        let details = service.check_capture(&world, NodeId(1), sub).unwrap();
        assert_eq!(details.cause, CaptureCause::ErasureTeam);
        assert!(service.check_capture(&world, NodeId(0), sub).is_none());
    }

    #[test]
    fn test_pursuer_only_hunts_player() {
        let mut world = world();
        world.pursuer_node = Some(NodeId(0));
        let mut service = TeamCapture;

        let details = service
            .check_capture(&world, NodeId(0), ActorRef::Player)
            .unwrap();
        assert_eq!(details.cause, CaptureCause::Pursuer);
        assert!(service
            .check_capture(&world, NodeId(0), ActorRef::Subordinate(ActorId(0)))
            .is_none());
    }
}
