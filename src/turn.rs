//! Turn controller
//!
//! One call to [`RebelAi::take_turn`] runs the whole turn: admin, intel,
//! the bounded action loop and graph restore.

use std::collections::BTreeMap;

use crate::core::config::AiConfig;
use crate::core::error::AiError;
use crate::core::types::{ActorRef, InactiveReason, NodeId, Turn};
use crate::events::{AiEventLog, LoggedEvent};
use crate::intel::{self, SightingMessage, TrackerLog};
use crate::ledger::ResourceLedger;
use crate::state::{ControlledEntity, EntityStatus};
use crate::tasks::{self, ExecState, ExecutionOutcome, GenContext, TaskKind, TaskPool};
use crate::world::{AiServices, CaptureDetails};

/// Summary of one executed action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord {
    pub kind: TaskKind,
    pub actor: ActorRef,
    pub outcome: ExecutionOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub turn: Turn,
    pub actions: Vec<ActionRecord>,
    pub iterations: u32,
    /// The loop hit the iteration bound before the budget ran out
    pub safety_tripped: bool,
    pub capture: Option<CaptureDetails>,
    /// Fatal conditions whose countdown ran out, the host decides the outcome
    pub expired_conditions: Vec<String>,
    pub status: EntityStatus,
}

impl TurnReport {
    fn new(turn: Turn, status: EntityStatus) -> Self {
        Self {
            turn,
            actions: Vec::new(),
            iterations: 0,
            safety_tripped: false,
            capture: None,
            expired_conditions: Vec::new(),
            status,
        }
    }
}

/// Persistent decision engine for the rebel side
#[derive(Debug, Clone)]
pub struct RebelAi {
    pub config: AiConfig,
    pub ledger: ResourceLedger,
    pub trackers: TrackerLog,
    pub entity: ControlledEntity,
    /// Executed tasks by kind over the whole session
    pub histogram: BTreeMap<TaskKind, u32>,
    pub goal: Option<NodeId>,
    epoch: u64,
    events: AiEventLog,
}

impl RebelAi {
    pub fn new(config: AiConfig, start: NodeId) -> Self {
        let entity = ControlledEntity::new(start, config.entity.max_invisibility);
        Self {
            config,
            ledger: ResourceLedger::new(),
            trackers: TrackerLog::new(),
            entity,
            histogram: BTreeMap::new(),
            goal: None,
            epoch: 0,
            events: AiEventLog::new(),
        }
    }

    /// Feed a sighting from the host's message bus
    pub fn ingest_sighting(&mut self, message: SightingMessage) -> bool {
        self.trackers
            .ingest(message, &self.config.intel, &mut self.events)
    }

    /// Hand every event produced so far to the host
    pub fn drain_events(&mut self) -> Vec<LoggedEvent> {
        self.events.drain()
    }

    pub fn events(&self) -> &AiEventLog {
        &self.events
    }

    /// Bring the controlled entity back from an inactive spell.
    ///
    /// Returns false when the entity was not inactive. Lying low restores
    /// full invisibility.
    pub fn reactivate(&mut self) -> bool {
        let EntityStatus::Inactive(reason) = self.entity.status else {
            return false;
        };
        if reason == InactiveReason::LieLow {
            self.entity.invisibility = self.config.entity.max_invisibility;
        }
        self.entity.status = EntityStatus::Active;
        tracing::info!(?reason, "controlled entity reactivated");
        true
    }

    pub fn take_turn(&mut self, services: &mut AiServices) -> TurnReport {
        let turn = services.world.turn;
        let mut report = TurnReport::new(turn, self.entity.status);

        if self.entity.is_captured() {
            tracing::debug!(turn, "controlled entity captured, no turn");
            return report;
        }

        self.admin(turn, services);
        report.expired_conditions = self.entity.expired_conditions();
        for name in &report.expired_conditions {
            tracing::warn!(turn, condition = %name, "fatal condition expired");
        }
        if !self.entity.is_active() {
            report.status = self.entity.status;
            tracing::info!(turn, status = ?self.entity.status, "turn skipped");
            return report;
        }

        let mut threat = intel::gather(
            &self.trackers,
            &mut *services.world,
            self.entity.invisibility,
            &self.config,
        );

        let safety = self.config.turn.safety_iterations;
        while self.ledger.actions_remaining() > 0 && self.entity.is_active() {
            if report.iterations >= safety {
                let fault = AiError::SafetyBoundExceeded {
                    iterations: report.iterations,
                };
                tracing::error!(turn, error = %fault, "action loop stopped");
                report.safety_tripped = true;
                break;
            }
            report.iterations += 1;
            self.epoch += 1;

            let mut pool = TaskPool::new(self.epoch);
            {
                let ctx = GenContext {
                    config: &self.config,
                    world: &*services.world,
                    threat: &threat,
                    entity: &self.entity,
                    ledger: &self.ledger,
                };
                tasks::generate_all(&ctx, &mut self.goal, &mut *services.rng, &mut pool);
            }

            let task = match pool.select(&mut *services.rng) {
                Ok(task) => task,
                Err(e) => {
                    tracing::error!(error = %e, "no task selected, action wasted");
                    self.ledger.use_action();
                    continue;
                }
            };

            let mut state = ExecState {
                config: &self.config,
                ledger: &mut self.ledger,
                entity: &mut self.entity,
                threat: &mut threat,
                events: &mut self.events,
            };
            let outcome = tasks::execute(task, &mut state, services);
            *self.histogram.entry(task.kind()).or_insert(0) += 1;

            if let ExecutionOutcome::Captured(details) = outcome {
                report.capture = Some(details);
            }
            report.actions.push(ActionRecord {
                kind: task.kind(),
                actor: task.actor(),
                outcome,
            });
        }

        threat.restore(&mut services.world.graph);
        report.status = self.entity.status;

        tracing::info!(
            turn,
            actions = report.actions.len(),
            status = ?report.status,
            invisibility = self.entity.invisibility,
            "turn complete"
        );
        report
    }

    /// Start-of-turn bookkeeping
    fn admin(&mut self, turn: Turn, services: &mut AiServices) {
        self.ledger.reset_actions(self.config.turn.action_allowance);
        self.entity.tick_timers();
        self.trackers.prune(turn, self.config.intel.retention_window);

        if self.entity.is_active()
            && self.entity.stressed
            && services.rng.chance(self.config.survival.breakdown_chance)
        {
            self.entity.status = EntityStatus::Inactive(InactiveReason::Breakdown);
            tracing::warn!(turn, "controlled entity broke down");
        }
    }

    pub fn histogram_count(&self, kind: TaskKind) -> u32 {
        self.histogram.get(&kind).copied().unwrap_or(0)
    }
}
