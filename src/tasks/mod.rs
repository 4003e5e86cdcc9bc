//! Candidate tasks, their generation, selection and execution

pub mod executor;
pub mod generators;
pub mod pool;

pub use executor::{execute, ExecState, ExecutionOutcome};
pub use generators::{generate_all, GenContext};
pub use pool::TaskPool;

use serde::{Deserialize, Serialize};

use crate::core::types::{ActorArc, ActorId, ActorRef, ConnectionId, NodeId, Priority, TargetId};

/// Field-less task discriminant, used for the usage histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskKind {
    Move,
    LieLow,
    StressLeave,
    RoleAction,
    Idle,
    TargetAttempt,
    Cure,
    FactionLobby,
    DismissActor,
}

/// What a task does, with its typed parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskAction {
    Move {
        to: NodeId,
        via: Option<ConnectionId>,
    },
    LieLow,
    StressLeave,
    RoleAction {
        arc: ActorArc,
        node: NodeId,
    },
    Idle,
    TargetAttempt {
        target: TargetId,
        node: NodeId,
    },
    /// Cure the condition at `condition` in the entity's condition list
    Cure {
        node: NodeId,
        condition: usize,
    },
    FactionLobby,
    DismissActor {
        actor: ActorId,
    },
}

impl TaskAction {
    pub fn kind(&self) -> TaskKind {
        match self {
            Self::Move { .. } => TaskKind::Move,
            Self::LieLow => TaskKind::LieLow,
            Self::StressLeave => TaskKind::StressLeave,
            Self::RoleAction { .. } => TaskKind::RoleAction,
            Self::Idle => TaskKind::Idle,
            Self::TargetAttempt { .. } => TaskKind::TargetAttempt,
            Self::Cure { .. } => TaskKind::Cure,
            Self::FactionLobby => TaskKind::FactionLobby,
            Self::DismissActor { .. } => TaskKind::DismissActor,
        }
    }
}

/// A candidate action. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    priority: Priority,
    actor: ActorRef,
    action: TaskAction,
}

impl Task {
    /// Build a task. `None` when the priority is unset.
    pub fn new(priority: Priority, actor: ActorRef, action: TaskAction) -> Option<Self> {
        if priority == Priority::None {
            tracing::trace!(?action, "task with unset priority dropped");
            return None;
        }
        Some(Self {
            priority,
            actor,
            action,
        })
    }

    pub fn player(priority: Priority, action: TaskAction) -> Option<Self> {
        Self::new(priority, ActorRef::Player, action)
    }

    pub fn subordinate(priority: Priority, actor: ActorId, action: TaskAction) -> Option<Self> {
        Self::new(priority, ActorRef::Subordinate(actor), action)
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn actor(&self) -> ActorRef {
        self.actor
    }

    pub fn action(&self) -> TaskAction {
        self.action
    }

    pub fn kind(&self) -> TaskKind {
        self.action.kind()
    }

    pub fn is_critical(&self) -> bool {
        self.priority == Priority::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_priority_rejected() {
        assert!(Task::player(Priority::None, TaskAction::Idle).is_none());
        let task = Task::player(Priority::Low, TaskAction::Idle).unwrap();
        assert_eq!(task.kind(), TaskKind::Idle);
        assert!(task.actor().is_player());
    }

    #[test]
    fn test_kind_matches_action() {
        let task = Task::subordinate(
            Priority::Critical,
            ActorId(4),
            TaskAction::RoleAction {
                arc: ActorArc::Heavy,
                node: NodeId(1),
            },
        )
        .unwrap();
        assert_eq!(task.kind(), TaskKind::RoleAction);
        assert!(task.is_critical());
        assert_eq!(task.actor(), ActorRef::Subordinate(ActorId(4)));
    }
}
