//! Converts trackers into prioritized, decaying threat assessments

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::tracker::Tracker;
use crate::core::types::{NodeId, Priority, ThreatCategory, Turn};

/// Single-turn threat summary derived from a tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SightingAssessment {
    pub category: ThreatCategory,
    pub node: NodeId,
    pub priority: Priority,
    pub turn_reported: Turn,
    pub move_number: u8,
}

impl SightingAssessment {
    /// Urgency order: priority, then more recent turn, then later move.
    pub fn urgency_cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.turn_reported.cmp(&other.turn_reported))
            .then(self.move_number.cmp(&other.move_number))
    }
}

/// Base intel level for a report of the given age, `None` once it is stale
pub fn base_level(turns_ago: u32) -> Option<i32> {
    match turns_ago {
        0 | 1 => Some(3),
        2 => Some(2),
        3 => Some(1),
        4 => Some(0),
        _ => None,
    }
}

/// Assess one tracker against the controlled entity's current invisibility.
///
/// A well hidden entity treats reports as one level less alarming; a fully
/// exposed one treats them as one level more.
pub fn assess(
    category: ThreatCategory,
    tracker: &Tracker,
    current_turn: Turn,
    invisibility: u8,
    max_invisibility: u8,
) -> Option<SightingAssessment> {
    let turns_ago = current_turn.saturating_sub(tracker.turn_reported);
    let mut level = base_level(turns_ago)?;

    if invisibility >= max_invisibility {
        level -= 1;
    } else if invisibility == 0 {
        level = (level + 1).min(3);
    }

    if level < 0 {
        return None;
    }

    Some(SightingAssessment {
        category,
        node: tracker.node,
        priority: Priority::from_level(level),
        turn_reported: tracker.turn_reported,
        move_number: tracker.move_number,
    })
}

/// Assess every tracker of a category, most urgent first
pub fn fuse(
    category: ThreatCategory,
    trackers: &[Tracker],
    current_turn: Turn,
    invisibility: u8,
    max_invisibility: u8,
) -> Vec<SightingAssessment> {
    let mut assessments: Vec<SightingAssessment> = trackers
        .iter()
        .filter_map(|t| assess(category, t, current_turn, invisibility, max_invisibility))
        .collect();
    assessments.sort_by(|a, b| b.urgency_cmp(a));
    assessments
}

/// The single most urgent assessment
pub fn most_urgent(assessments: &[SightingAssessment]) -> Option<&SightingAssessment> {
    assessments.iter().max_by(|a, b| a.urgency_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(turn_reported: Turn, move_number: u8) -> Tracker {
        Tracker {
            node: NodeId(turn_reported),
            turn_reported,
            reliability: 2,
            move_number,
        }
    }

    #[test]
    fn test_max_invisibility_lowers_priority() {
        // turns_ago = 1 → level 3, well hidden → 2
        let a = assess(ThreatCategory::Pursuer, &tracker(9, 0), 10, 3, 3).unwrap();
        assert_eq!(a.priority, Priority::High);
    }

    #[test]
    fn test_zero_invisibility_raises_priority() {
        // turns_ago = 4 → level 0, exposed → 1
        let a = assess(ThreatCategory::Pursuer, &tracker(6, 0), 10, 0, 3).unwrap();
        assert_eq!(a.priority, Priority::Medium);
    }

    #[test]
    fn test_stale_reports_dropped() {
        assert!(assess(ThreatCategory::Pursuer, &tracker(5, 0), 10, 0, 3).is_none());
        assert!(assess(ThreatCategory::Pursuer, &tracker(0, 0), 10, 1, 3).is_none());
    }

    #[test]
    fn test_hidden_entity_drops_oldest_report() {
        // turns_ago = 4 → level 0, well hidden → -1 → dropped
        assert!(assess(ThreatCategory::EnforcementTeam, &tracker(6, 0), 10, 3, 3).is_none());
    }

    #[test]
    fn test_level_capped_at_critical() {
        let a = assess(ThreatCategory::Pursuer, &tracker(10, 0), 10, 0, 3).unwrap();
        assert_eq!(a.priority, Priority::Critical);
    }

    #[test]
    fn test_middle_invisibility_unadjusted() {
        let a = assess(ThreatCategory::Pursuer, &tracker(8, 0), 10, 2, 3).unwrap();
        assert_eq!(a.priority, Priority::High);
    }

    #[test]
    fn test_tie_break_turn_then_move() {
        // Same priority (turns_ago 0 and 1 both map to level 3)
        let trackers = [tracker(9, 0), tracker(10, 0), tracker(10, 2)];
        let fused = fuse(ThreatCategory::Pursuer, &trackers, 10, 2, 3);

        assert_eq!(fused.len(), 3);
        assert_eq!(fused[0].turn_reported, 10);
        assert_eq!(fused[0].move_number, 2);
        assert_eq!(fused[1].move_number, 0);
        assert_eq!(fused[2].turn_reported, 9);

        let top = most_urgent(&fused).unwrap();
        assert_eq!(*top, fused[0]);
    }

    #[test]
    fn test_priority_beats_recency() {
        let trackers = [tracker(7, 0), tracker(10, 0)];
        let fused = fuse(ThreatCategory::Pursuer, &trackers, 10, 2, 3);
        assert_eq!(fused[0].priority, Priority::Critical);
        assert_eq!(fused[1].priority, Priority::Medium);
    }
}
