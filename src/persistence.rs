//! Save and load of the engine's persistent state
//!
//! Only session state is written: the ledger, trackers, usage histogram,
//! controlled entity and movement goal. Assessments, threat maps and task
//! pools are rebuilt every turn.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::config::AiConfig;
use crate::core::error::Result;
use crate::core::types::NodeId;
use crate::intel::TrackerLog;
use crate::ledger::ResourceLedger;
use crate::state::ControlledEntity;
use crate::tasks::TaskKind;
use crate::turn::RebelAi;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebelAiSave {
    /// Config the session was running with
    pub config_name: String,
    pub ledger: ResourceLedger,
    pub trackers: TrackerLog,
    pub histogram: BTreeMap<TaskKind, u32>,
    pub entity: ControlledEntity,
    pub goal: Option<NodeId>,
}

impl RebelAiSave {
    pub fn capture(ai: &RebelAi) -> Self {
        Self {
            config_name: ai.config.name.clone(),
            ledger: ai.ledger.clone(),
            trackers: ai.trackers.clone(),
            histogram: ai.histogram.clone(),
            entity: ai.entity.clone(),
            goal: ai.goal,
        }
    }

    /// Rebuild an engine from saved state and a freshly loaded config
    pub fn restore(self, config: AiConfig) -> RebelAi {
        let mut ai = RebelAi::new(config, self.entity.node);
        ai.ledger = self.ledger;
        ai.trackers = self.trackers;
        ai.histogram = self.histogram;
        ai.entity = self.entity;
        ai.goal = self.goal;
        ai
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), "engine state saved");
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
