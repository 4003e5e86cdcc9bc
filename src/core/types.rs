//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Game turn counter (simulation time unit)
pub type Turn = u32;

/// Unique identifier for a node on the map graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Unique identifier for a connection (edge) between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(pub u32);

/// Unique identifier for a subordinate actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Unique identifier for a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor {}", self.0)
    }
}

/// Who performs a task: the controlled entity itself or one of its subordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorRef {
    Player,
    Subordinate(ActorId),
}

impl ActorRef {
    pub fn is_player(&self) -> bool {
        matches!(self, Self::Player)
    }
}

impl fmt::Display for ActorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Subordinate(id) => write!(f, "{}", id),
        }
    }
}

/// Task and sighting priority
///
/// Higher variant = more urgent. `None` is only ever a sentinel for "unset"
/// and is never carried by a generated task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Priority {
    #[default]
    None = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl Priority {
    /// Map an intel level (0..=3) to a priority. Out of range levels yield `None`.
    pub fn from_level(level: i32) -> Self {
        match level {
            3 => Self::Critical,
            2 => Self::High,
            1 => Self::Medium,
            0 => Self::Low,
            _ => Self::None,
        }
    }
}

/// Behavioral archetype of a subordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorArc {
    Anarchist,
    Blogger,
    Fixer,
    Hacker,
    Heavy,
    Observer,
    Operator,
    Planner,
    Recruiter,
}

impl ActorArc {
    pub const ALL: [ActorArc; 9] = [
        Self::Anarchist,
        Self::Blogger,
        Self::Fixer,
        Self::Hacker,
        Self::Heavy,
        Self::Observer,
        Self::Operator,
        Self::Planner,
        Self::Recruiter,
    ];

    /// Whether the arc's action is tied to a suitable node.
    ///
    /// Fixer and Recruiter actions only depend on global state, so any
    /// subordinate of the arc can perform them where it stands.
    pub fn is_node_bound(&self) -> bool {
        !matches!(self, Self::Fixer | Self::Recruiter)
    }
}

/// Threat category tracked by the intel system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThreatCategory {
    /// A single hunter that chases the controlled entity across the map
    Pursuer,
    /// Authority teams sent to erase rebels
    EnforcementTeam,
}

impl ThreatCategory {
    pub const ALL: [ThreatCategory; 2] = [Self::Pursuer, Self::EnforcementTeam];
}

/// Security level of a connection
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum SecurityLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl SecurityLevel {
    /// Connection security raised by a sighting of the given priority
    pub fn from_priority(priority: Priority) -> Self {
        match priority {
            Priority::Critical => Self::High,
            Priority::High => Self::Medium,
            Priority::Medium => Self::Low,
            Priority::Low | Priority::None => Self::None,
        }
    }
}

/// Authority-wide alert posture, least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum AlertPosture {
    #[default]
    Normal,
    Apb,
    SecurityAlert,
    Crackdown,
}

impl AlertPosture {
    pub fn is_most_severe(&self) -> bool {
        matches!(self, Self::Crackdown)
    }
}

/// Why an actor is temporarily off the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InactiveReason {
    LieLow,
    Breakdown,
    StressLeave,
}

/// Authority team kinds that can be present at a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TeamKind {
    Control,
    Civil,
    Media,
    Probe,
    Spider,
    Damage,
    Erasure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::None < Priority::Low);
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Critical);
    }

    #[test]
    fn test_priority_from_level() {
        assert_eq!(Priority::from_level(3), Priority::Critical);
        assert_eq!(Priority::from_level(2), Priority::High);
        assert_eq!(Priority::from_level(1), Priority::Medium);
        assert_eq!(Priority::from_level(0), Priority::Low);
        assert_eq!(Priority::from_level(-1), Priority::None);
        assert_eq!(Priority::from_level(4), Priority::None);
    }

    #[test]
    fn test_security_from_priority() {
        assert_eq!(SecurityLevel::from_priority(Priority::Critical), SecurityLevel::High);
        assert_eq!(SecurityLevel::from_priority(Priority::Low), SecurityLevel::None);
        assert!(SecurityLevel::High > SecurityLevel::Medium);
    }

    #[test]
    fn test_node_bound_arcs() {
        let free: Vec<_> = ActorArc::ALL.iter().filter(|a| !a.is_node_bound()).collect();
        assert_eq!(free, vec![&ActorArc::Fixer, &ActorArc::Recruiter]);
    }

    #[test]
    fn test_actor_ref_display() {
        assert_eq!(ActorRef::Player.to_string(), "player");
        assert_eq!(ActorRef::Subordinate(ActorId(4)).to_string(), "actor 4");
    }
}
