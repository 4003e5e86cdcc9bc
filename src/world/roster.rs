//! Subordinate actors and their contact networks

use serde::{Deserialize, Serialize};

use crate::core::error::{AiError, Result};
use crate::core::types::{ActorArc, ActorId, InactiveReason, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorStatus {
    Active,
    Inactive(InactiveReason),
    Captured,
    Dismissed,
}

/// A subordinate working for the controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub arc: ActorArc,
    pub status: ActorStatus,
    pub node: NodeId,
    /// Nodes where the actor has contacts and can act
    pub contacts: Vec<NodeId>,
    pub invisibility: u8,
    pub stressed: bool,
    /// Flagged as a liability, candidate for dismissal
    pub problematic: bool,
}

impl Actor {
    pub fn is_active(&self) -> bool {
        self.status == ActorStatus::Active
    }

    /// Still part of the organisation (not captured or dismissed)
    pub fn is_on_books(&self) -> bool {
        matches!(self.status, ActorStatus::Active | ActorStatus::Inactive(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    actors: Vec<Actor>,
    /// Maximum subordinates on the books at once
    capacity: usize,
    next_id: u32,
}

impl Roster {
    pub fn new(capacity: usize) -> Self {
        Self {
            actors: Vec::new(),
            capacity,
            next_id: 0,
        }
    }

    /// Add a subordinate with full invisibility
    pub fn add(&mut self, name: &str, arc: ActorArc, node: NodeId, invisibility: u8) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.actors.push(Actor {
            id,
            name: name.to_string(),
            arc,
            status: ActorStatus::Active,
            node,
            contacts: vec![node],
            invisibility,
            stressed: false,
            problematic: false,
        });
        id
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    pub fn all(&self) -> &[Actor] {
        &self.actors
    }

    /// Active subordinates, in roster order
    pub fn active(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(|a| a.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn active_by_arc(&self, arc: ActorArc) -> impl Iterator<Item = &Actor> {
        self.active().filter(move |a| a.arc == arc)
    }

    pub fn has_room(&self) -> bool {
        self.actors.iter().filter(|a| a.is_on_books()).count() < self.capacity
    }

    /// Recruit a new subordinate at a node, `None` when the roster is full
    pub fn recruit(&mut self, arc: ActorArc, node: NodeId, invisibility: u8) -> Option<ActorId> {
        if !self.has_room() {
            return None;
        }
        let name = format!("{:?} {}", arc, self.next_id);
        Some(self.add(&name, arc, node, invisibility))
    }

    pub fn dismiss(&mut self, id: ActorId) -> Result<()> {
        let actor = self.get_mut(id).ok_or(AiError::ActorNotFound(id))?;
        actor.status = ActorStatus::Dismissed;
        Ok(())
    }

    pub fn set_status(&mut self, id: ActorId, status: ActorStatus) -> Result<()> {
        let actor = self.get_mut(id).ok_or(AiError::ActorNotFound(id))?;
        actor.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recruit_respects_capacity() {
        let mut roster = Roster::new(2);
        assert!(roster.recruit(ActorArc::Hacker, NodeId(0), 3).is_some());
        assert!(roster.recruit(ActorArc::Heavy, NodeId(0), 3).is_some());
        assert!(!roster.has_room());
        assert!(roster.recruit(ActorArc::Fixer, NodeId(0), 3).is_none());
    }

    #[test]
    fn test_dismissal_frees_a_slot() {
        let mut roster = Roster::new(1);
        let id = roster.add("Vex", ActorArc::Blogger, NodeId(1), 3);
        assert!(!roster.has_room());

        roster.dismiss(id).unwrap();
        assert!(roster.has_room());
        assert_eq!(roster.active_count(), 0);
    }

    #[test]
    fn test_active_by_arc_skips_inactive() {
        let mut roster = Roster::new(5);
        let a = roster.add("A", ActorArc::Hacker, NodeId(0), 3);
        roster.add("B", ActorArc::Hacker, NodeId(1), 3);
        roster
            .set_status(a, ActorStatus::Inactive(InactiveReason::LieLow))
            .unwrap();

        let hackers: Vec<_> = roster.active_by_arc(ActorArc::Hacker).collect();
        assert_eq!(hackers.len(), 1);
        assert_eq!(hackers[0].name, "B");
    }

    #[test]
    fn test_unknown_actor() {
        let mut roster = Roster::new(1);
        assert!(matches!(
            roster.dismiss(ActorId(7)),
            Err(AiError::ActorNotFound(ActorId(7)))
        ));
    }
}
