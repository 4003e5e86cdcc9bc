//! Survival: escape bad nodes, lie low when exposed, keep the roster staffed

use super::GenContext;
use crate::core::rng::DecisionRng;
use crate::core::types::{ActorArc, ActorId, Priority};
use crate::tasks::{Task, TaskAction};

pub fn generate(ctx: &GenContext, rng: &mut dyn DecisionRng) -> Option<Task> {
    let survival = &ctx.config.survival;
    let here = ctx.entity.node;
    let can_lie_low = !ctx.world.alert.is_most_severe() && ctx.entity.lie_low_timer == 0;

    let mut task = None;
    if ctx.threat.is_bad(here) {
        let safe = ctx.safe_neighbours(here);
        if !safe.is_empty() && rng.chance(survival.move_chance) {
            let to = safe[rng.pick(safe.len())];
            tracing::debug!(from = %here, %to, "escaping bad node");
            task = Task::player(
                Priority::Critical,
                TaskAction::Move {
                    to,
                    via: ctx.world.graph.connection_between(here, to),
                },
            );
        } else if can_lie_low && rng.chance(survival.lie_low_at_bad_node_chance) {
            task = Task::player(Priority::Critical, TaskAction::LieLow);
        }
    } else if ctx.entity.invisibility < survival.lie_low_threshold && can_lie_low {
        let deficit = u32::from(survival.lie_low_threshold - ctx.entity.invisibility);
        let mut chance = survival.lie_low_base + deficit * survival.lie_low_step;
        if ctx.entity.stressed {
            chance += survival.stressed_bonus;
        }
        if rng.chance(chance) {
            task = Task::player(Priority::High, TaskAction::LieLow);
        }
    }

    if task.is_some() {
        return task;
    }

    if ctx.world.roster.active_count() < survival.min_subordinates && ctx.world.roster.has_room() {
        return Task::player(
            Priority::High,
            TaskAction::RoleAction {
                arc: ActorArc::Recruiter,
                node: here,
            },
        );
    }

    subordinate_lie_low(ctx, rng)
}

/// An exposed or stressed subordinate may go to ground
fn subordinate_lie_low(ctx: &GenContext, rng: &mut dyn DecisionRng) -> Option<Task> {
    let survival = &ctx.config.survival;
    if ctx.entity.lie_low_timer > 0 {
        return None;
    }

    let mut candidates: Vec<ActorId> = Vec::new();
    for actor in ctx.world.roster.active() {
        if actor.stressed {
            candidates.push(actor.id);
            candidates.push(actor.id);
        } else if actor.invisibility < survival.lie_low_threshold {
            candidates.push(actor.id);
        }
    }

    if candidates.is_empty() || !rng.chance(survival.subordinate_lie_low_chance) {
        return None;
    }
    let actor = candidates[rng.pick(candidates.len())];
    Task::subordinate(Priority::Medium, actor, TaskAction::LieLow)
}
