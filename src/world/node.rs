//! Map nodes and their rebel-relevant stats

use serde::{Deserialize, Serialize};

use crate::core::types::{NodeId, TeamKind};

/// Upper bound for support, stability and security
pub const NODE_STAT_MAX: u8 = 3;

/// A single node of the map graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Local support for the rebel cause
    pub support: u8,
    pub stability: u8,
    pub security: u8,
    /// Authority teams currently deployed here
    pub teams: Vec<TeamKind>,
    /// A spider (hidden surveillance) is deployed here
    pub spider: bool,
    /// The spider has been revealed by a tracer
    pub spider_known: bool,
    pub tracer: bool,
}

impl Node {
    pub fn new(id: NodeId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            support: 1,
            stability: 2,
            security: 2,
            teams: Vec::new(),
            spider: false,
            spider_known: false,
            tracer: false,
        }
    }

    pub fn with_stats(mut self, support: u8, stability: u8, security: u8) -> Self {
        self.support = support.min(NODE_STAT_MAX);
        self.stability = stability.min(NODE_STAT_MAX);
        self.security = security.min(NODE_STAT_MAX);
        self
    }

    pub fn with_team(mut self, team: TeamKind) -> Self {
        self.teams.push(team);
        self
    }

    pub fn with_spider(mut self) -> Self {
        self.spider = true;
        self
    }

    pub fn has_team(&self, team: TeamKind) -> bool {
        self.teams.contains(&team)
    }

    /// Remove the first deployed team, if any
    pub fn neutralise_team(&mut self) -> Option<TeamKind> {
        if self.teams.is_empty() {
            None
        } else {
            Some(self.teams.remove(0))
        }
    }

    /// Place a tracer. Reveals a spider deployed at the node.
    pub fn place_tracer(&mut self) {
        self.tracer = true;
        if self.spider {
            self.spider_known = true;
        }
    }

    pub fn adjust_support(&mut self, delta: i8) {
        self.support = adjust_stat(self.support, delta);
    }

    pub fn adjust_stability(&mut self, delta: i8) {
        self.stability = adjust_stat(self.stability, delta);
    }

    pub fn adjust_security(&mut self, delta: i8) {
        self.security = adjust_stat(self.security, delta);
    }
}

fn adjust_stat(value: u8, delta: i8) -> u8 {
    let next = i16::from(value) + i16::from(delta);
    next.clamp(0, i16::from(NODE_STAT_MAX)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_clamped() {
        let mut node = Node::new(NodeId(0), "Docks").with_stats(3, 0, 9);
        assert_eq!(node.security, NODE_STAT_MAX);

        node.adjust_support(1);
        assert_eq!(node.support, NODE_STAT_MAX);

        node.adjust_stability(-1);
        assert_eq!(node.stability, 0);
    }

    #[test]
    fn test_tracer_reveals_spider() {
        let mut node = Node::new(NodeId(1), "Plaza").with_spider();
        assert!(!node.spider_known);
        node.place_tracer();
        assert!(node.tracer);
        assert!(node.spider_known);
    }

    #[test]
    fn test_neutralise_team() {
        let mut node = Node::new(NodeId(2), "Arcade")
            .with_team(TeamKind::Civil)
            .with_team(TeamKind::Erasure);
        assert_eq!(node.neutralise_team(), Some(TeamKind::Civil));
        assert_eq!(node.neutralise_team(), Some(TeamKind::Erasure));
        assert_eq!(node.neutralise_team(), None);
    }
}
