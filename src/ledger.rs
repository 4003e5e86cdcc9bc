//! Consumable pools owned by the decision engine
//!
//! Action budget, gear, target intel and faction resources. All fields are
//! unsigned and every mutation clamps, so the documented bounds hold after
//! any sequence of calls.

use serde::{Deserialize, Serialize};

use crate::core::config::GearConfig;
use crate::core::rng::DecisionRng;
use crate::core::types::Turn;
use crate::events::{AiEvent, AiEventLog, LedgerField};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub actions_used: u32,
    pub action_allowance: u32,
    pub gear_pool: u8,
    pub gear_points_used: u32,
    pub target_intel: u32,
    pub target_intel_used: u32,
    pub faction_resources: u32,
}

/// Outcome of a gear availability check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GearCheck {
    pub available: bool,
    /// A faction resource was spent keeping the gear
    pub retention_paid: bool,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start-of-turn budget reset
    pub fn reset_actions(&mut self, allowance: u32) {
        self.actions_used = 0;
        self.action_allowance = allowance;
    }

    pub fn actions_remaining(&self) -> u32 {
        self.action_allowance.saturating_sub(self.actions_used)
    }

    /// Debit one action. Returns false when the budget is already spent.
    pub fn use_action(&mut self) -> bool {
        if self.actions_remaining() == 0 {
            return false;
        }
        self.actions_used += 1;
        true
    }

    pub fn add_gear(&mut self, amount: u8, config: &GearConfig, turn: Turn, events: &mut AiEventLog) {
        let before = self.gear_pool;
        self.gear_pool = self.gear_pool.saturating_add(amount).min(config.pool_max);
        self.notify(LedgerField::GearPool, before.into(), self.gear_pool.into(), turn, events);
    }

    /// Roll gear availability for one action.
    ///
    /// Availability and retention cost are independent rolls. The retention
    /// roll happens whenever the pool was non-empty, even when the gear turned
    /// out to be unavailable.
    pub fn check_gear_available(
        &mut self,
        consume: bool,
        config: &GearConfig,
        rng: &mut dyn DecisionRng,
        turn: Turn,
        events: &mut AiEventLog,
    ) -> GearCheck {
        if self.gear_pool == 0 {
            return GearCheck {
                available: false,
                retention_paid: false,
            };
        }

        let available = rng.chance(config.chance_for(self.gear_pool));
        if available && consume {
            let before = self.gear_pool;
            self.gear_pool -= 1;
            self.gear_points_used += 1;
            self.notify(LedgerField::GearPool, before.into(), self.gear_pool.into(), turn, events);
        }

        let mut retention_paid = false;
        if rng.chance(config.retention_cost_chance) && self.faction_resources > 0 {
            let before = self.faction_resources;
            self.faction_resources -= 1;
            retention_paid = true;
            self.notify(LedgerField::FactionResources, before, self.faction_resources, turn, events);
        }

        tracing::trace!(pool = self.gear_pool, available, retention_paid, "gear check");
        GearCheck {
            available,
            retention_paid,
        }
    }

    pub fn add_target_intel(&mut self, amount: u32, cap: u32, turn: Turn, events: &mut AiEventLog) {
        let before = self.target_intel;
        self.target_intel = self.target_intel.saturating_add(amount).min(cap);
        self.notify(LedgerField::TargetIntel, before, self.target_intel, turn, events);
    }

    /// Spend all accumulated target intel on an attempt
    pub fn use_target_intel(&mut self, turn: Turn, events: &mut AiEventLog) -> u32 {
        let spent = self.target_intel;
        self.target_intel = 0;
        self.target_intel_used += spent;
        self.notify(LedgerField::TargetIntel, spent, 0, turn, events);
        spent
    }

    pub fn add_resources(&mut self, amount: u32, turn: Turn, events: &mut AiEventLog) {
        let before = self.faction_resources;
        self.faction_resources = self.faction_resources.saturating_add(amount);
        self.notify(LedgerField::FactionResources, before, self.faction_resources, turn, events);
    }

    /// Spend resources if enough are available. Nothing is spent otherwise.
    pub fn spend_resources(&mut self, amount: u32, turn: Turn, events: &mut AiEventLog) -> bool {
        if self.faction_resources < amount {
            return false;
        }
        let before = self.faction_resources;
        self.faction_resources -= amount;
        self.notify(LedgerField::FactionResources, before, self.faction_resources, turn, events);
        true
    }

    fn notify(&self, field: LedgerField, before: u32, after: u32, turn: Turn, events: &mut AiEventLog) {
        if before == after {
            return;
        }
        let delta = i64::from(after) - i64::from(before);
        events.push(
            turn,
            AiEvent::LedgerChanged {
                field,
                delta: delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
                value: after,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{ScriptedRng, SeededRng};

    #[test]
    fn test_action_budget() {
        let mut ledger = ResourceLedger::new();
        ledger.reset_actions(2);
        assert!(ledger.use_action());
        assert!(ledger.use_action());
        assert!(!ledger.use_action());
        assert_eq!(ledger.actions_used, 2);
        assert_eq!(ledger.actions_remaining(), 0);
    }

    #[test]
    fn test_empty_pool_never_available() {
        let mut ledger = ResourceLedger::new();
        ledger.faction_resources = 5;
        let mut rng = ScriptedRng::new().with_rolls(&[0, 0]);
        let mut events = AiEventLog::new();

        let check = ledger.check_gear_available(true, &GearConfig::default(), &mut rng, 1, &mut events);
        assert!(!check.available);
        assert!(!check.retention_paid);
        assert_eq!(ledger.faction_resources, 5);
        assert!(events.is_empty());
    }

    #[test]
    fn test_available_gear_is_consumed() {
        let mut ledger = ResourceLedger::new();
        ledger.gear_pool = 3;
        // availability roll passes, retention roll fails
        let mut rng = ScriptedRng::new().with_rolls(&[0, 99]);
        let mut events = AiEventLog::new();

        let check = ledger.check_gear_available(true, &GearConfig::default(), &mut rng, 1, &mut events);
        assert!(check.available);
        assert_eq!(ledger.gear_pool, 2);
        assert_eq!(ledger.gear_points_used, 1);
    }

    #[test]
    fn test_retention_cost_fires_when_unavailable() {
        let mut ledger = ResourceLedger::new();
        ledger.gear_pool = 1;
        ledger.faction_resources = 2;
        // availability fails (99 >= 15), retention passes
        let mut rng = ScriptedRng::new().with_rolls(&[99, 0]);
        let mut events = AiEventLog::new();

        let check = ledger.check_gear_available(true, &GearConfig::default(), &mut rng, 1, &mut events);
        assert!(!check.available);
        assert!(check.retention_paid);
        assert_eq!(ledger.gear_pool, 1);
        assert_eq!(ledger.faction_resources, 1);
    }

    #[test]
    fn test_retention_cost_floors_at_zero() {
        let mut ledger = ResourceLedger::new();
        ledger.gear_pool = 2;
        let mut rng = ScriptedRng::new().with_rolls(&[99, 0]);
        let mut events = AiEventLog::new();

        let check = ledger.check_gear_available(false, &GearConfig::default(), &mut rng, 1, &mut events);
        assert!(!check.retention_paid);
        assert_eq!(ledger.faction_resources, 0);
    }

    #[test]
    fn test_full_pool_matches_configured_chance() {
        let config = GearConfig::default();
        let mut rng = SeededRng::new(2024);
        let mut events = AiEventLog::new();
        let trials = 1000;
        let mut hits = 0;

        for _ in 0..trials {
            let mut ledger = ResourceLedger::new();
            ledger.gear_pool = 6;
            if ledger.check_gear_available(false, &config, &mut rng, 1, &mut events).available {
                hits += 1;
            }
        }

        let expected = config.chance_for(6) as f64 / 100.0;
        let observed = hits as f64 / trials as f64;
        assert!(
            (observed - expected).abs() < 0.06,
            "observed {observed}, expected {expected}"
        );
    }

    #[test]
    fn test_add_gear_clamps_and_notifies() {
        let config = GearConfig::default();
        let mut ledger = ResourceLedger::new();
        let mut events = AiEventLog::new();

        ledger.add_gear(10, &config, 3, &mut events);
        assert_eq!(ledger.gear_pool, config.pool_max);
        assert_eq!(events.len(), 1);

        // Already full: no change, no notification
        ledger.add_gear(1, &config, 3, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_spend_resources_is_all_or_nothing() {
        let mut ledger = ResourceLedger::new();
        let mut events = AiEventLog::new();
        ledger.add_resources(3, 1, &mut events);

        assert!(!ledger.spend_resources(4, 1, &mut events));
        assert_eq!(ledger.faction_resources, 3);
        assert!(ledger.spend_resources(3, 1, &mut events));
        assert_eq!(ledger.faction_resources, 0);
    }

    #[test]
    fn test_target_intel_capped_and_spent() {
        let mut ledger = ResourceLedger::new();
        let mut events = AiEventLog::new();
        ledger.add_target_intel(4, 3, 1, &mut events);
        assert_eq!(ledger.target_intel, 3);

        assert_eq!(ledger.use_target_intel(1, &mut events), 3);
        assert_eq!(ledger.target_intel, 0);
        assert_eq!(ledger.target_intel_used, 3);
    }
}
