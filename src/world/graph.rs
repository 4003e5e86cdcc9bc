//! Node graph with weighted connections
//!
//! Provides neighbour enumeration, weighted shortest paths and the
//! per-connection security and weight annotations the threat map borrows
//! for the duration of a turn.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BinaryHeap;

use super::node::Node;
use crate::core::error::{AiError, Result};
use crate::core::types::{ConnectionId, NodeId, SecurityLevel};

/// Default traversal weight of a connection
pub const BASE_CONNECTION_WEIGHT: u32 = 1;

/// An undirected connection between two nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub a: NodeId,
    pub b: NodeId,
    pub security: SecurityLevel,
    pub weight: u32,
}

impl Connection {
    /// The node on the other end, if `node` is one of the endpoints
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeGraph {
    nodes: AHashMap<NodeId, Node>,
    connections: AHashMap<ConnectionId, Connection>,
    /// Connection ids per node, in insertion order
    adjacency: AHashMap<NodeId, Vec<ConnectionId>>,
    next_connection: u32,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) {
        self.adjacency.entry(node.id).or_default();
        self.nodes.insert(node.id, node);
    }

    /// Connect two existing nodes
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> Result<ConnectionId> {
        if !self.nodes.contains_key(&a) {
            return Err(AiError::NodeNotFound(a));
        }
        if !self.nodes.contains_key(&b) {
            return Err(AiError::NodeNotFound(b));
        }

        let id = ConnectionId(self.next_connection);
        self.next_connection += 1;
        self.connections.insert(
            id,
            Connection {
                id,
                a,
                b,
                security: SecurityLevel::None,
                weight: BASE_CONNECTION_WEIGHT,
            },
        );
        self.adjacency.entry(a).or_default().push(id);
        self.adjacency.entry(b).or_default().push(id);
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    /// All node ids in ascending order
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Connections touching a node
    pub fn connections_at(&self, node: NodeId) -> &[ConnectionId] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Neighbouring nodes in connection order
    pub fn neighbours(&self, node: NodeId) -> Vec<NodeId> {
        self.connections_at(node)
            .iter()
            .filter_map(|c| self.connections.get(c))
            .filter_map(|c| c.other(node))
            .collect()
    }

    /// Connection directly joining two nodes
    pub fn connection_between(&self, a: NodeId, b: NodeId) -> Option<ConnectionId> {
        self.connections_at(a)
            .iter()
            .copied()
            .find(|c| self.connections.get(c).and_then(|c| c.other(a)) == Some(b))
    }

    pub fn set_security(&mut self, id: ConnectionId, level: SecurityLevel) -> Result<()> {
        let conn = self
            .connections
            .get_mut(&id)
            .ok_or(AiError::ConnectionNotFound(id))?;
        conn.security = level;
        Ok(())
    }

    pub fn set_weight(&mut self, id: ConnectionId, weight: u32) -> Result<()> {
        let conn = self
            .connections
            .get_mut(&id)
            .ok_or(AiError::ConnectionNotFound(id))?;
        conn.weight = weight;
        Ok(())
    }

    /// Dijkstra shortest path from start to goal, both ends inclusive
    pub fn shortest_path(&self, start: NodeId, goal: NodeId) -> Option<Vec<NodeId>> {
        if !self.contains(start) || !self.contains(goal) {
            return None;
        }

        if start == goal {
            return Some(vec![start]);
        }

        #[derive(PartialEq, Eq)]
        struct Frontier {
            cost: u32,
            node: NodeId,
        }

        // Reverse ordering so BinaryHeap pops the cheapest entry, ties on lowest id
        impl Ord for Frontier {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                other
                    .cost
                    .cmp(&self.cost)
                    .then_with(|| other.node.cmp(&self.node))
            }
        }
        impl PartialOrd for Frontier {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        let mut best: AHashMap<NodeId, u32> = AHashMap::new();
        let mut came_from: AHashMap<NodeId, NodeId> = AHashMap::new();
        let mut open = BinaryHeap::new();

        best.insert(start, 0);
        open.push(Frontier { cost: 0, node: start });

        while let Some(Frontier { cost, node }) = open.pop() {
            if node == goal {
                let mut path = vec![goal];
                let mut current = goal;
                while let Some(&prev) = came_from.get(&current) {
                    path.push(prev);
                    current = prev;
                }
                path.reverse();
                return Some(path);
            }

            if cost > best.get(&node).copied().unwrap_or(u32::MAX) {
                continue;
            }

            for conn_id in self.connections_at(node) {
                let Some(conn) = self.connections.get(conn_id) else {
                    continue;
                };
                let Some(next) = conn.other(node) else {
                    continue;
                };
                let next_cost = cost.saturating_add(conn.weight);
                if next_cost < best.get(&next).copied().unwrap_or(u32::MAX) {
                    best.insert(next, next_cost);
                    came_from.insert(next, node);
                    open.push(Frontier {
                        cost: next_cost,
                        node: next,
                    });
                }
            }
        }

        None
    }

    /// Number of steps on the shortest path, `None` if unreachable
    pub fn distance(&self, start: NodeId, goal: NodeId) -> Option<usize> {
        self.shortest_path(start, goal).map(|p| p.len() - 1)
    }
}
