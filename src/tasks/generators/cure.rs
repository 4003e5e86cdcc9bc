//! Cure-seeking for the controlled entity's conditions

use super::movement::{nearest, step_toward};
use super::GenContext;
use crate::core::rng::DecisionRng;
use crate::core::types::Priority;
use crate::tasks::{Task, TaskAction};

pub fn generate(ctx: &GenContext, rng: &mut dyn DecisionRng) -> Option<Task> {
    let (index, condition) = ctx
        .entity
        .conditions
        .iter()
        .enumerate()
        .find(|(_, c)| !c.cure_nodes.is_empty())?;

    let here = ctx.entity.node;
    if condition.cure_nodes.contains(&here) {
        let priority = if condition.is_fatal() {
            Priority::Critical
        } else {
            Priority::High
        };
        return Task::player(
            priority,
            TaskAction::Cure {
                node: here,
                condition: index,
            },
        );
    }

    let dest = nearest(ctx, here, &condition.cure_nodes)?;
    let action = step_toward(ctx, here, dest, rng)?;
    tracing::trace!(condition = %condition.name, %dest, "seeking cure");
    Task::player(ctx.config.movement.cure_priority, action)
}
