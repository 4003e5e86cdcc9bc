//! Per-turn threat map derived from fused intel
//!
//! Building the map annotates the graph: connection security is raised
//! around the most urgent sightings and connections into bad nodes get
//! heavier so shortest paths route around them. Every annotation is
//! recorded and reverted by [`ThreatMap::restore`] at end of turn.

use ahash::{AHashMap, AHashSet};

use super::fusion::SightingAssessment;
use crate::core::config::ThreatConfig;
use crate::core::types::{AlertPosture, ConnectionId, NodeId, SecurityLevel, ThreatCategory};
use crate::world::NodeGraph;

#[derive(Debug, Clone, Default)]
pub struct ThreatMap {
    bad_nodes: AHashSet<NodeId>,
    spider_nodes: AHashSet<NodeId>,
    /// Most urgent assessment per category
    top: Vec<SightingAssessment>,
    /// Original (security, weight) of every connection touched this turn
    saved: AHashMap<ConnectionId, (SecurityLevel, u32)>,
}

impl ThreatMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from per-category assessments, each sorted most urgent first.
    pub fn build(
        pursuer: &[SightingAssessment],
        enforcement: &[SightingAssessment],
        graph: &mut NodeGraph,
        alert: AlertPosture,
        config: &ThreatConfig,
    ) -> Self {
        let mut map = Self::new();

        for node_id in graph.node_ids() {
            if graph.node(node_id).is_some_and(|n| n.spider_known) {
                map.spider_nodes.insert(node_id);
            }
        }

        for assessment in pursuer.iter().chain(enforcement) {
            map.bad_nodes.insert(assessment.node);
        }

        if alert.is_most_severe() {
            for assessment in enforcement {
                for neighbour in graph.neighbours(assessment.node) {
                    map.bad_nodes.insert(neighbour);
                }
            }
        }

        for top in [pursuer.first(), enforcement.first()].into_iter().flatten() {
            map.top.push(*top);
            let level = SecurityLevel::from_priority(top.priority);
            map.update_node_connection_security(graph, top.node, level);
        }

        map.raise_bad_node_weights(graph, config.bad_node_weight);

        tracing::debug!(
            bad = map.bad_nodes.len(),
            spiders = map.spider_nodes.len(),
            annotated = map.saved.len(),
            "threat map built"
        );
        map
    }

    /// Raise the security of every connection at `node` to `level`, never lowering it.
    pub fn update_node_connection_security(
        &mut self,
        graph: &mut NodeGraph,
        node: NodeId,
        level: SecurityLevel,
    ) {
        let connections = graph.connections_at(node).to_vec();
        for id in connections {
            let Some(conn) = graph.connection(id) else {
                continue;
            };
            if level <= conn.security {
                continue;
            }
            self.saved.entry(id).or_insert((conn.security, conn.weight));
            if let Err(e) = graph.set_security(id, level) {
                tracing::error!(error = %e, "failed to raise connection security");
            }
        }
    }

    fn raise_bad_node_weights(&mut self, graph: &mut NodeGraph, extra: u32) {
        if extra == 0 {
            return;
        }
        let mut bad: Vec<NodeId> = self.bad_nodes.iter().copied().collect();
        bad.sort();

        let mut raised = AHashSet::new();
        for node in bad {
            for id in graph.connections_at(node).to_vec() {
                if !raised.insert(id) {
                    continue;
                }
                let Some(conn) = graph.connection(id) else {
                    continue;
                };
                let weight = conn.weight;
                self.saved.entry(id).or_insert((conn.security, weight));
                if let Err(e) = graph.set_weight(id, weight.saturating_add(extra)) {
                    tracing::error!(error = %e, "failed to raise connection weight");
                }
            }
        }
    }

    /// Revert every annotation made while building this map
    pub fn restore(&mut self, graph: &mut NodeGraph) {
        for (id, (security, weight)) in self.saved.drain() {
            let restored = graph
                .set_security(id, security)
                .and_then(|_| graph.set_weight(id, weight));
            if let Err(e) = restored {
                tracing::error!(error = %e, "failed to restore connection");
            }
        }
    }

    pub fn is_bad(&self, node: NodeId) -> bool {
        self.bad_nodes.contains(&node)
    }

    pub fn is_spider(&self, node: NodeId) -> bool {
        self.spider_nodes.contains(&node)
    }

    /// Nodes that are neither bad nor known to hold a spider
    pub fn is_safe(&self, node: NodeId) -> bool {
        !self.is_bad(node) && !self.is_spider(node)
    }

    pub fn mark_spider(&mut self, node: NodeId) {
        self.spider_nodes.insert(node);
    }

    pub fn bad_node_count(&self) -> usize {
        self.bad_nodes.len()
    }

    pub fn top(&self, category: ThreatCategory) -> Option<&SightingAssessment> {
        self.top.iter().find(|a| a.category == category)
    }

    /// Whether graph annotations are still pending restore
    pub fn has_annotations(&self) -> bool {
        !self.saved.is_empty()
    }
}
