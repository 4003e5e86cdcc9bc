//! Property tests for intel fusion and ledger bounds

use proptest::prelude::*;
use std::cmp::Ordering;

use rebel_ai::core::config::GearConfig;
use rebel_ai::core::types::{NodeId, Priority, ThreatCategory};
use rebel_ai::events::AiEventLog;
use rebel_ai::intel::{assess, fuse, Tracker};
use rebel_ai::ledger::ResourceLedger;
use rebel_ai::SeededRng;

fn tracker_strategy() -> impl Strategy<Value = Tracker> {
    (0_u32..20, 0_u32..30, 0_u8..4, 0_u8..5).prop_map(|(node, turn, reliability, move_number)| {
        Tracker {
            node: NodeId(node),
            turn_reported: turn,
            reliability,
            move_number,
        }
    })
}

#[derive(Debug, Clone)]
enum LedgerOp {
    AddGear(u8),
    Check(bool),
    AddResources(u32),
    Spend(u32),
    AddIntel(u32),
    UseIntel,
}

fn op_strategy() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        (0_u8..10).prop_map(LedgerOp::AddGear),
        any::<bool>().prop_map(LedgerOp::Check),
        (0_u32..5).prop_map(LedgerOp::AddResources),
        (0_u32..5).prop_map(LedgerOp::Spend),
        (0_u32..4).prop_map(LedgerOp::AddIntel),
        Just(LedgerOp::UseIntel),
    ]
}

proptest! {
    #[test]
    fn stale_reports_never_assessed(
        tracker in tracker_strategy(),
        age in 5_u32..40,
        invisibility in 0_u8..4,
    ) {
        let now = tracker.turn_reported + age;
        prop_assert!(assess(ThreatCategory::Pursuer, &tracker, now, invisibility, 3).is_none());
    }

    #[test]
    fn assessed_priority_is_never_unset(
        tracker in tracker_strategy(),
        age in 0_u32..5,
        invisibility in 0_u8..4,
    ) {
        let now = tracker.turn_reported + age;
        if let Some(a) = assess(ThreatCategory::Pursuer, &tracker, now, invisibility, 3) {
            prop_assert!(a.priority != Priority::None);
        }
    }

    #[test]
    fn fused_order_is_total_and_descending(
        trackers in prop::collection::vec(tracker_strategy(), 0..30),
        invisibility in 0_u8..4,
    ) {
        let fused = fuse(ThreatCategory::EnforcementTeam, &trackers, 30, invisibility, 3);
        for pair in fused.windows(2) {
            prop_assert_ne!(pair[0].urgency_cmp(&pair[1]), Ordering::Less);
        }

        let mut reversed = trackers.clone();
        reversed.reverse();
        let again = fuse(ThreatCategory::EnforcementTeam, &reversed, 30, invisibility, 3);
        let keys = |v: &[rebel_ai::intel::SightingAssessment]| {
            v.iter()
                .map(|a| (a.priority, a.turn_reported, a.move_number))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(keys(&fused), keys(&again));
    }

    #[test]
    fn ledger_stays_in_bounds(
        ops in prop::collection::vec(op_strategy(), 0..60),
        seed in 0_u64..1000,
    ) {
        let config = GearConfig::default();
        let mut ledger = ResourceLedger::new();
        let mut rng = SeededRng::new(seed);
        let mut events = AiEventLog::new();

        for op in ops {
            match op {
                LedgerOp::AddGear(n) => ledger.add_gear(n, &config, 1, &mut events),
                LedgerOp::Check(consume) => {
                    let was_empty = ledger.gear_pool == 0;
                    let check = ledger.check_gear_available(consume, &config, &mut rng, 1, &mut events);
                    if was_empty {
                        prop_assert!(!check.available);
                    }
                }
                LedgerOp::AddResources(n) => ledger.add_resources(n, 1, &mut events),
                LedgerOp::Spend(n) => {
                    let before = ledger.faction_resources;
                    let spent = ledger.spend_resources(n, 1, &mut events);
                    prop_assert_eq!(spent, before >= n);
                }
                LedgerOp::AddIntel(n) => ledger.add_target_intel(n, 5, 1, &mut events),
                LedgerOp::UseIntel => {
                    ledger.use_target_intel(1, &mut events);
                }
            }
            prop_assert!(ledger.gear_pool <= config.pool_max);
            prop_assert!(ledger.target_intel <= 5);
        }
    }
}
