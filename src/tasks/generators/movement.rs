//! One-step movement and the strategic goal

use super::GenContext;
use crate::core::rng::DecisionRng;
use crate::core::types::NodeId;
use crate::tasks::{Task, TaskAction};

/// Move action for one step from `from` toward `dest`.
///
/// When the next node on the shortest path is bad, a random non-bad
/// neighbour is taken instead. `None` when no step is possible.
pub fn step_toward(
    ctx: &GenContext,
    from: NodeId,
    dest: NodeId,
    rng: &mut dyn DecisionRng,
) -> Option<TaskAction> {
    let path = ctx.world.graph.shortest_path(from, dest)?;
    let mut next = *path.get(1)?;

    if ctx.threat.is_bad(next) {
        let safe = ctx.safe_neighbours(from);
        if safe.is_empty() {
            tracing::trace!(%from, %dest, "no safe step");
            return None;
        }
        next = safe[rng.pick(safe.len())];
    }

    Some(TaskAction::Move {
        to: next,
        via: ctx.world.graph.connection_between(from, next),
    })
}

/// Nearest of `candidates` from `from` with a non-zero distance
pub fn nearest(ctx: &GenContext, from: NodeId, candidates: &[NodeId]) -> Option<NodeId> {
    candidates
        .iter()
        .filter_map(|&n| ctx.world.graph.distance(from, n).map(|d| (d, n)))
        .filter(|&(d, _)| d > 0)
        .min_by_key(|&(d, _)| d)
        .map(|(_, n)| n)
}

/// Pick a fresh goal: the nearest world goal, else a random other node
fn choose_goal(ctx: &GenContext, rng: &mut dyn DecisionRng) -> Option<NodeId> {
    let here = ctx.entity.node;
    if let Some(goal) = nearest(ctx, here, &ctx.world.goals) {
        return Some(goal);
    }
    let others: Vec<NodeId> = ctx
        .world
        .graph
        .node_ids()
        .into_iter()
        .filter(|&n| n != here)
        .collect();
    if others.is_empty() {
        return None;
    }
    Some(others[rng.pick(others.len())])
}

/// Step the controlled entity toward its goal, replacing a reached or missing goal first.
/// A goal with no route is dropped so the next call picks another.
pub fn move_to_goal(
    ctx: &GenContext,
    goal: &mut Option<NodeId>,
    rng: &mut dyn DecisionRng,
) -> Option<Task> {
    let here = ctx.entity.node;
    let current = match *goal {
        Some(g) if g != here && ctx.world.graph.contains(g) => g,
        _ => {
            let fresh = choose_goal(ctx, rng)?;
            tracing::debug!(goal = %fresh, "new movement goal");
            *goal = Some(fresh);
            fresh
        }
    };

    if ctx.world.graph.distance(here, current).is_none() {
        tracing::debug!(goal = %current, "goal unreachable, dropped");
        *goal = None;
        return None;
    }

    let action = step_toward(ctx, here, current, rng)?;
    Task::player(ctx.config.movement.goal_priority, action)
}
