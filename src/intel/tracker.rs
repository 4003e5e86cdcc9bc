//! Long-lived sighting trackers per threat category

use serde::{Deserialize, Serialize};

use crate::core::config::IntelConfig;
use crate::core::types::{NodeId, ThreatCategory, Turn};
use crate::events::{AiEvent, AiEventLog};

/// Where a sighting report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SightingSource {
    /// A subordinate's contact, reliability 0..=3
    Contact { reliability: u8 },
    /// A tracer placed on the node
    Tracer,
}

/// Inbound sighting message from the host's message bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SightingMessage {
    pub category: ThreatCategory,
    pub node: NodeId,
    pub turn: Turn,
    /// Ordinal of the threat's move within the reported turn
    pub move_number: u8,
    pub source: SightingSource,
}

/// Raw, time-stamped sighting record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    pub node: NodeId,
    pub turn_reported: Turn,
    pub reliability: u8,
    pub move_number: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerLog {
    pub pursuer: Vec<Tracker>,
    pub enforcement: Vec<Tracker>,
}

impl TrackerLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trackers(&self, category: ThreatCategory) -> &[Tracker] {
        match category {
            ThreatCategory::Pursuer => &self.pursuer,
            ThreatCategory::EnforcementTeam => &self.enforcement,
        }
    }

    fn trackers_mut(&mut self, category: ThreatCategory) -> &mut Vec<Tracker> {
        match category {
            ThreatCategory::Pursuer => &mut self.pursuer,
            ThreatCategory::EnforcementTeam => &mut self.enforcement,
        }
    }

    /// Consume a sighting message. Returns whether a tracker was created.
    pub fn ingest(
        &mut self,
        message: SightingMessage,
        config: &IntelConfig,
        events: &mut AiEventLog,
    ) -> bool {
        let reliability = match message.source {
            SightingSource::Contact { reliability } => reliability.min(3),
            SightingSource::Tracer => config.tracer_reliability,
        };

        let tracked = reliability >= config.min_reliability;
        if tracked {
            self.trackers_mut(message.category).push(Tracker {
                node: message.node,
                turn_reported: message.turn,
                reliability,
                move_number: message.move_number,
            });
        } else {
            tracing::trace!(?message, "sighting below reliability floor");
        }

        events.push(
            message.turn,
            AiEvent::SightingConsumed {
                category: message.category,
                node: message.node,
                tracked,
            },
        );
        tracked
    }

    /// Drop trackers reported before `current_turn - retention_window`
    pub fn prune(&mut self, current_turn: Turn, retention_window: u32) {
        let cutoff = current_turn.saturating_sub(retention_window);
        for category in ThreatCategory::ALL {
            self.trackers_mut(category)
                .retain(|t| t.turn_reported >= cutoff);
        }
    }

    pub fn len(&self) -> usize {
        self.pursuer.len() + self.enforcement.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(category: ThreatCategory, turn: Turn, source: SightingSource) -> SightingMessage {
        SightingMessage {
            category,
            node: NodeId(3),
            turn,
            move_number: 0,
            source,
        }
    }

    #[test]
    fn test_tracer_uses_fixed_reliability() {
        let mut log = TrackerLog::new();
        let mut events = AiEventLog::new();
        let config = IntelConfig::default();

        log.ingest(message(ThreatCategory::Pursuer, 2, SightingSource::Tracer), &config, &mut events);
        log.ingest(
            message(ThreatCategory::EnforcementTeam, 2, SightingSource::Contact { reliability: 1 }),
            &config,
            &mut events,
        );

        assert_eq!(log.pursuer[0].reliability, config.tracer_reliability);
        assert_eq!(log.enforcement[0].reliability, 1);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_unreliable_contacts_not_tracked() {
        let mut log = TrackerLog::new();
        let mut events = AiEventLog::new();
        let config = IntelConfig {
            min_reliability: 2,
            ..IntelConfig::default()
        };

        let tracked = log.ingest(
            message(ThreatCategory::Pursuer, 4, SightingSource::Contact { reliability: 1 }),
            &config,
            &mut events,
        );
        assert!(!tracked);
        assert!(log.is_empty());
        // Still consumed
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_prune_by_retention_window() {
        let mut log = TrackerLog::new();
        let mut events = AiEventLog::new();
        let config = IntelConfig::default();
        for turn in [1, 4, 5, 9] {
            log.ingest(message(ThreatCategory::Pursuer, turn, SightingSource::Tracer), &config, &mut events);
        }

        log.prune(10, 5);
        let turns: Vec<Turn> = log.pursuer.iter().map(|t| t.turn_reported).collect();
        assert_eq!(turns, vec![5, 9]);
    }
}
