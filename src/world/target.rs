//! Targets the rebels can attempt

use serde::{Deserialize, Serialize};

use crate::core::error::{AiError, Result};
use crate::core::types::{ActorArc, NodeId, TargetId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetStatus {
    Live,
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub name: String,
    pub node: NodeId,
    pub status: TargetStatus,
    /// Arc a subordinate needs to attempt this target, `None` = anyone
    pub required_arc: Option<ActorArc>,
}

impl Target {
    pub fn new(id: TargetId, name: &str, node: NodeId) -> Self {
        Self {
            id,
            name: name.to_string(),
            node,
            status: TargetStatus::Live,
            required_arc: None,
        }
    }

    pub fn requiring(mut self, arc: ActorArc) -> Self {
        self.required_arc = Some(arc);
        self
    }

    pub fn is_live(&self) -> bool {
        self.status == TargetStatus::Live
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetBoard {
    targets: Vec<Target>,
}

impl TargetBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target: Target) {
        self.targets.push(target);
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn live(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.is_live())
    }

    /// Live target at a node, if any
    pub fn live_at(&self, node: NodeId) -> Option<&Target> {
        self.live().find(|t| t.node == node)
    }

    pub fn complete(&mut self, id: TargetId) -> Result<()> {
        let target = self
            .targets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(AiError::TargetNotFound(id))?;
        target.status = TargetStatus::Done;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_targets_leave_live_set() {
        let mut board = TargetBoard::new();
        board.add(Target::new(TargetId(1), "Data Vault", NodeId(4)));
        board.add(Target::new(TargetId(2), "Relay", NodeId(5)).requiring(ActorArc::Hacker));

        assert_eq!(board.live_at(NodeId(4)).map(|t| t.id), Some(TargetId(1)));
        board.complete(TargetId(1)).unwrap();
        assert!(board.live_at(NodeId(4)).is_none());
        assert_eq!(board.live().count(), 1);
    }

    #[test]
    fn test_complete_unknown_target() {
        let mut board = TargetBoard::new();
        assert!(board.complete(TargetId(3)).is_err());
    }
}
