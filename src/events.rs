//! Notifications produced by the decision engine
//!
//! The host drains the log after each turn and forwards entries to its
//! message bus.

use serde::{Deserialize, Serialize};

use crate::core::types::{ActorRef, ConnectionId, NodeId, ThreatCategory, Turn};
use crate::tasks::TaskKind;
use crate::world::CaptureDetails;

/// Ledger field touched by a change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerField {
    GearPool,
    TargetIntel,
    FactionResources,
}

/// Where rebel activity was noticed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivitySite {
    Node(NodeId),
    Connection(ConnectionId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AiEvent {
    SightingConsumed {
        category: ThreatCategory,
        node: NodeId,
        tracked: bool,
    },
    LedgerChanged {
        field: LedgerField,
        delta: i32,
        value: u32,
    },
    CaptureRaised(CaptureDetails),
    ActivityDetected {
        site: ActivitySite,
        actor: ActorRef,
        /// Turns before the authority notices, 0 = immediate
        delay: u32,
    },
    TaskExecuted {
        kind: TaskKind,
        actor: ActorRef,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub turn: Turn,
    pub event: AiEvent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiEventLog {
    pub events: Vec<LoggedEvent>,
}

impl AiEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn, event: AiEvent) {
        self.events.push(LoggedEvent { turn, event });
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Remove and return everything logged so far
    pub fn drain(&mut self) -> Vec<LoggedEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AiEvent> {
        self.events.iter().map(|e| &e.event)
    }

    pub fn captures(&self) -> impl Iterator<Item = &CaptureDetails> {
        self.iter().filter_map(|e| match e {
            AiEvent::CaptureRaised(details) => Some(details),
            _ => None,
        })
    }
}
