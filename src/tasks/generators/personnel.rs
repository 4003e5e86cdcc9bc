//! Personnel management: stress leave, dismissals and the idle fallback

use super::GenContext;
use crate::core::rng::DecisionRng;
use crate::core::types::{ActorId, Priority};
use crate::tasks::{Task, TaskAction};

/// Send a stressed, fully hidden actor on leave if the faction can pay for it
pub fn stress_leave(ctx: &GenContext, rng: &mut dyn DecisionRng) -> Option<Task> {
    let cost = ctx.config.personnel.stress_leave_cost;
    if ctx.ledger.faction_resources < cost {
        return None;
    }
    let max = ctx.config.entity.max_invisibility;

    if ctx.entity.stressed && ctx.entity.invisibility >= max {
        return Task::player(Priority::Medium, TaskAction::StressLeave);
    }

    let candidates: Vec<ActorId> = ctx
        .world
        .roster
        .active()
        .filter(|a| a.stressed && a.invisibility >= max)
        .map(|a| a.id)
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let actor = candidates[rng.pick(candidates.len())];
    Task::subordinate(Priority::Medium, actor, TaskAction::StressLeave)
}

/// Let go of a problematic subordinate
pub fn dismissal(ctx: &GenContext, rng: &mut dyn DecisionRng) -> Option<Task> {
    let personnel = &ctx.config.personnel;
    let candidates: Vec<ActorId> = ctx
        .world
        .roster
        .all()
        .iter()
        .filter(|a| a.is_on_books() && a.problematic)
        .map(|a| a.id)
        .collect();
    if candidates.is_empty() || !rng.chance(personnel.dismiss_chance()) {
        return None;
    }
    let actor = candidates[rng.pick(candidates.len())];
    Task::player(personnel.dismiss_priority, TaskAction::DismissActor { actor })
}

pub fn idle() -> Option<Task> {
    Task::player(Priority::Low, TaskAction::Idle)
}
