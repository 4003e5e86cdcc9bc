//! Target attempts by the controlled entity and its subordinates

use super::GenContext;
use crate::core::config::TargetConfig;
use crate::core::rng::DecisionRng;
use crate::core::types::ActorId;
use crate::ledger::ResourceLedger;
use crate::tasks::{Task, TaskAction, TaskPool};

/// Success odds for an attempt given the current ledger
pub fn attempt_odds(config: &TargetConfig, ledger: &ResourceLedger) -> u32 {
    let mut odds = config.base_odds + ledger.target_intel * config.intel_bonus;
    if ledger.gear_pool > 0 {
        odds += config.gear_bonus;
    }
    odds
}

pub fn generate(ctx: &GenContext, rng: &mut dyn DecisionRng, pool: &mut TaskPool) {
    let config = &ctx.config.target;
    let weights = &ctx.config.weights;
    let odds = attempt_odds(config, ctx.ledger);
    if odds < config.min_odds {
        tracing::trace!(odds, "target odds too low");
        return;
    }

    let here = ctx.entity.node;
    if rng.chance(config.attempt_chance) && !ctx.threat.is_bad(here) {
        if let Some(target) = ctx.world.targets.live_at(here) {
            pool.offer(
                Task::player(
                    config.player_priority,
                    TaskAction::TargetAttempt {
                        target: target.id,
                        node: here,
                    },
                ),
                weights,
            );
        }
    }

    let mut offered = 0;
    for target in ctx.world.targets.live() {
        if offered >= config.max_subordinate_attempts {
            break;
        }
        if target.node == here || ctx.threat.is_bad(target.node) {
            continue;
        }

        let eligible: Vec<ActorId> = ctx
            .world
            .roster
            .active()
            .filter(|a| target.required_arc.map_or(true, |arc| a.arc == arc))
            .map(|a| a.id)
            .collect();
        if eligible.is_empty() {
            continue;
        }

        let actor = eligible[rng.pick(eligible.len())];
        pool.offer(
            Task::subordinate(
                config.subordinate_priority,
                actor,
                TaskAction::TargetAttempt {
                    target: target.id,
                    node: target.node,
                },
            ),
            weights,
        );
        offered += 1;
    }
}
