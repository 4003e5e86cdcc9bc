use thiserror::Error;

use crate::core::types::{ActorId, ConnectionId, NodeId, TargetId};

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("Actor not found: {0:?}")]
    ActorNotFound(ActorId),

    #[error("Connection not found: {0:?}")]
    ConnectionNotFound(ConnectionId),

    #[error("Target not found: {0:?}")]
    TargetNotFound(TargetId),

    #[error("Task pool empty at selection (epoch {epoch})")]
    EmptyTaskPool { epoch: u64 },

    #[error("Action loop exceeded {iterations} iterations")]
    SafetyBoundExceeded { iterations: u32 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl AiError {
    /// True for faults that indicate a generator or config bug rather than
    /// stale references into world data.
    pub fn is_internal_invariant(&self) -> bool {
        matches!(self, Self::EmptyTaskPool { .. } | Self::SafetyBoundExceeded { .. })
    }

    /// True when a referenced id resolved to nothing
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Self::NodeNotFound(_)
                | Self::ActorNotFound(_)
                | Self::ConnectionNotFound(_)
                | Self::TargetNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes_are_disjoint() {
        let invariant = AiError::EmptyTaskPool { epoch: 3 };
        let integrity = AiError::NodeNotFound(NodeId(9));

        assert!(invariant.is_internal_invariant());
        assert!(!invariant.is_data_integrity());
        assert!(integrity.is_data_integrity());
        assert!(!integrity.is_internal_invariant());
    }

    #[test]
    fn test_error_messages() {
        let err = AiError::SafetyBoundExceeded { iterations: 12 };
        assert_eq!(err.to_string(), "Action loop exceeded 12 iterations");
    }
}
