//! The controlled entity the engine plays

use serde::{Deserialize, Serialize};

use crate::core::types::{InactiveReason, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityStatus {
    Active,
    Inactive(InactiveReason),
    /// Terminal for AI control
    Captured,
}

/// An ailment that can be cured at specific nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    pub cure_nodes: Vec<NodeId>,
    /// Turns left before the condition turns deadly, `None` for non-fatal
    /// conditions. Counts down each turn and stops at zero; an expired
    /// condition is reported to the host every turn until it is cured.
    pub fatal_timer: Option<u32>,
}

impl Condition {
    pub fn new(name: &str, cure_nodes: Vec<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            cure_nodes,
            fatal_timer: None,
        }
    }

    pub fn fatal(mut self, turns: u32) -> Self {
        self.fatal_timer = Some(turns);
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal_timer.is_some()
    }

    pub fn has_expired(&self) -> bool {
        self.fatal_timer == Some(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlledEntity {
    pub status: EntityStatus,
    pub invisibility: u8,
    pub node: NodeId,
    pub stressed: bool,
    pub conditions: Vec<Condition>,
    /// Turns before anyone may lie low again
    pub lie_low_timer: u32,
}

impl ControlledEntity {
    pub fn new(node: NodeId, invisibility: u8) -> Self {
        Self {
            status: EntityStatus::Active,
            invisibility,
            node,
            stressed: false,
            conditions: Vec::new(),
            lie_low_timer: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EntityStatus::Active
    }

    pub fn is_captured(&self) -> bool {
        self.status == EntityStatus::Captured
    }

    /// Drop invisibility, never below zero
    pub fn expose(&mut self, amount: u8) {
        self.invisibility = self.invisibility.saturating_sub(amount);
    }

    /// Names of fatal conditions whose countdown has run out
    pub fn expired_conditions(&self) -> Vec<String> {
        self.conditions
            .iter()
            .filter(|c| c.has_expired())
            .map(|c| c.name.clone())
            .collect()
    }

    /// Per-turn countdowns
    pub fn tick_timers(&mut self) {
        self.lie_low_timer = self.lie_low_timer.saturating_sub(1);
        for condition in &mut self.conditions {
            if let Some(timer) = condition.fatal_timer.as_mut() {
                *timer = timer.saturating_sub(1);
            }
        }
    }
}
