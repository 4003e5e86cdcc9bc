//! Task execution
//!
//! Applies the chosen task to the world, then charges visible actions
//! with a gear check. Unconcealed activity costs invisibility and may end
//! in capture.

use super::{generators::target::attempt_odds, Task, TaskAction};
use crate::core::config::AiConfig;
use crate::core::error::{AiError, Result};
use crate::core::types::{ActorArc, ActorRef, InactiveReason, NodeId, SecurityLevel};
use crate::events::{ActivitySite, AiEvent, AiEventLog};
use crate::intel::ThreatMap;
use crate::ledger::ResourceLedger;
use crate::state::{ControlledEntity, EntityStatus};
use crate::world::{ActorStatus, AiServices, CaptureDetails};

/// Engine-owned state the executor mutates
pub struct ExecState<'a> {
    pub config: &'a AiConfig,
    pub ledger: &'a mut ResourceLedger,
    pub entity: &'a mut ControlledEntity,
    pub threat: &'a mut ThreatMap,
    pub events: &'a mut AiEventLog,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    Completed,
    /// Activity was noticed but the actor got away
    Detected { site: ActivitySite, delay: u32 },
    Captured(CaptureDetails),
    /// Effect skipped on a data-integrity failure; the action stays spent
    Skipped(String),
}

pub fn execute(task: Task, state: &mut ExecState, services: &mut AiServices) -> ExecutionOutcome {
    let turn = services.world.turn;
    if !state.ledger.use_action() {
        tracing::warn!(kind = ?task.kind(), "no action left to spend");
    }
    state.events.push(
        turn,
        AiEvent::TaskExecuted {
            kind: task.kind(),
            actor: task.actor(),
        },
    );
    tracing::debug!(kind = ?task.kind(), actor = %task.actor(), priority = ?task.priority(), "executing task");

    let site = match apply(task, state, services) {
        Ok(site) => site,
        Err(e) => {
            tracing::error!(error = %e, kind = ?task.kind(), "task effect skipped");
            return ExecutionOutcome::Skipped(e.to_string());
        }
    };

    match site {
        Some((site, node)) => visibility(task.actor(), site, node, state, services),
        None => ExecutionOutcome::Completed,
    }
}

/// Apply the task's effect. Returns where visible activity took place.
fn apply(
    task: Task,
    state: &mut ExecState,
    services: &mut AiServices,
) -> Result<Option<(ActivitySite, NodeId)>> {
    let config = state.config;
    let turn = services.world.turn;
    let actor = task.actor();

    match task.action() {
        TaskAction::Move { to, via } => {
            if !services.world.graph.contains(to) {
                return Err(AiError::NodeNotFound(to));
            }
            match actor {
                ActorRef::Player => state.entity.node = to,
                ActorRef::Subordinate(id) => {
                    services
                        .world
                        .roster
                        .get_mut(id)
                        .ok_or(AiError::ActorNotFound(id))?
                        .node = to;
                }
            }

            let Some(via) = via else {
                return Ok(None);
            };
            let level = services
                .world
                .graph
                .connection(via)
                .map(|c| c.security)
                .ok_or(AiError::ConnectionNotFound(via))?;
            if level > SecurityLevel::None
                && services.rng.chance(config.detection.connection_chance(level))
            {
                return Ok(Some((ActivitySite::Connection(via), to)));
            }
            Ok(None)
        }
        TaskAction::LieLow => {
            set_inactive(actor, InactiveReason::LieLow, state, services)?;
            state.entity.lie_low_timer = config.survival.lie_low_cooldown;
            Ok(None)
        }
        TaskAction::StressLeave => {
            if !state
                .ledger
                .spend_resources(config.personnel.stress_leave_cost, turn, state.events)
            {
                tracing::warn!(%actor, "stress leave unaffordable");
                return Ok(None);
            }
            match actor {
                ActorRef::Player => state.entity.stressed = false,
                ActorRef::Subordinate(id) => {
                    services
                        .world
                        .roster
                        .get_mut(id)
                        .ok_or(AiError::ActorNotFound(id))?
                        .stressed = false;
                }
            }
            set_inactive(actor, InactiveReason::StressLeave, state, services)?;
            Ok(None)
        }
        TaskAction::RoleAction { arc, node } => {
            role_effect(arc, node, state, services)?;
            Ok(Some((ActivitySite::Node(node), node)))
        }
        TaskAction::TargetAttempt { target, node } => {
            let live = services
                .world
                .targets
                .get(target)
                .ok_or(AiError::TargetNotFound(target))?
                .is_live();
            if !live {
                tracing::trace!(?target, "target already done");
                return Ok(None);
            }

            let odds = attempt_odds(&config.target, state.ledger);
            let intel = state.ledger.use_target_intel(turn, state.events);
            if services.rng.chance(odds) {
                services.world.targets.complete(target)?;
                state
                    .ledger
                    .add_resources(config.target.success_reward, turn, state.events);
                tracing::info!(?target, odds, intel, "target attempt succeeded");
            } else {
                tracing::debug!(?target, odds, intel, "target attempt failed");
            }
            Ok(Some((ActivitySite::Node(node), node)))
        }
        TaskAction::Cure { node, condition } => {
            if condition < state.entity.conditions.len() {
                let cured = state.entity.conditions.remove(condition);
                tracing::info!(condition = %cured.name, %node, "condition cured");
            } else {
                tracing::warn!(condition, "no such condition");
            }
            Ok(Some((ActivitySite::Node(node), node)))
        }
        TaskAction::FactionLobby => {
            let world = &mut *services.world;
            world.approval = (world.approval + 1).min(config.faction.approval_max);
            Ok(None)
        }
        TaskAction::DismissActor { actor: id } => {
            services.world.roster.dismiss(id)?;
            tracing::info!(actor = %id, "subordinate dismissed");
            Ok(None)
        }
        TaskAction::Idle => Ok(None),
    }
}

fn role_effect(
    arc: ActorArc,
    node: NodeId,
    state: &mut ExecState,
    services: &mut AiServices,
) -> Result<()> {
    let config = state.config;
    let turn = services.world.turn;

    match arc {
        ActorArc::Fixer => {
            state.ledger.add_gear(1, &config.gear, turn, state.events);
            return Ok(());
        }
        ActorArc::Recruiter => {
            let pick = services.rng.pick(ActorArc::ALL.len());
            let recruit = ActorArc::ALL[pick];
            match services
                .world
                .roster
                .recruit(recruit, node, config.entity.max_invisibility)
            {
                Some(id) => tracing::info!(actor = %id, arc = ?recruit, "recruited"),
                None => tracing::trace!("roster full"),
            }
            return Ok(());
        }
        ActorArc::Operator => {
            state.ledger.add_resources(1, turn, state.events);
            return Ok(());
        }
        ActorArc::Planner => {
            if services.world.targets.live_at(node).is_some() {
                state
                    .ledger
                    .add_target_intel(1, config.target.max_target_intel, turn, state.events);
            }
            return Ok(());
        }
        _ => {}
    }

    let target = services
        .world
        .graph
        .node_mut(node)
        .ok_or(AiError::NodeNotFound(node))?;
    match arc {
        ActorArc::Anarchist => target.adjust_stability(-1),
        ActorArc::Blogger => target.adjust_support(1),
        ActorArc::Hacker => target.adjust_security(-1),
        ActorArc::Heavy => {
            if let Some(team) = target.neutralise_team() {
                tracing::debug!(?team, %node, "team neutralised");
            }
        }
        ActorArc::Observer => {
            target.place_tracer();
            if target.spider_known {
                state.threat.mark_spider(node);
            }
        }
        ActorArc::Fixer | ActorArc::Recruiter | ActorArc::Operator | ActorArc::Planner => {}
    }
    Ok(())
}

fn set_inactive(
    actor: ActorRef,
    reason: InactiveReason,
    state: &mut ExecState,
    services: &mut AiServices,
) -> Result<()> {
    match actor {
        ActorRef::Player => state.entity.status = EntityStatus::Inactive(reason),
        ActorRef::Subordinate(id) => services
            .world
            .roster
            .set_status(id, ActorStatus::Inactive(reason))?,
    }
    Ok(())
}

/// Gear check, exposure and capture for a visible action
fn visibility(
    actor: ActorRef,
    site: ActivitySite,
    node: NodeId,
    state: &mut ExecState,
    services: &mut AiServices,
) -> ExecutionOutcome {
    let config = state.config;
    let turn = services.world.turn;

    let gear = state
        .ledger
        .check_gear_available(true, &config.gear, &mut *services.rng, turn, state.events);
    if gear.available {
        return ExecutionOutcome::Completed;
    }

    let spider = services.world.graph.node(node).is_some_and(|n| n.spider);
    let cost = if spider { 2 } else { 1 };
    let invisibility = match actor {
        ActorRef::Player => {
            state.entity.expose(cost);
            state.entity.invisibility
        }
        ActorRef::Subordinate(id) => match services.world.roster.get_mut(id) {
            Some(a) => {
                a.invisibility = a.invisibility.saturating_sub(cost);
                a.invisibility
            }
            None => {
                tracing::error!(actor = %id, "exposed actor missing");
                return ExecutionOutcome::Skipped(AiError::ActorNotFound(id).to_string());
            }
        },
    };

    if invisibility <= config.entity.capture_threshold {
        if let Some(details) = services.capture.check_capture(&*services.world, node, actor) {
            match actor {
                ActorRef::Player => state.entity.status = EntityStatus::Captured,
                ActorRef::Subordinate(id) => {
                    if let Err(e) = services.world.roster.set_status(id, ActorStatus::Captured) {
                        tracing::error!(error = %e, "captured actor missing");
                    }
                }
            }
            tracing::warn!(%actor, %node, cause = ?details.cause, "capture");
            state.events.push(turn, AiEvent::CaptureRaised(details));
            return ExecutionOutcome::Captured(details);
        }
    }

    let delay = if invisibility == 0 {
        0
    } else if spider {
        config.detection.delay_spider
    } else {
        config.detection.delay_no_spider
    };
    tracing::debug!(%actor, ?site, delay, invisibility, "activity detected");
    state
        .events
        .push(turn, AiEvent::ActivityDetected { site, actor, delay });
    ExecutionOutcome::Detected { site, delay }
}
