//! Task generators
//!
//! Each generator inspects the current world and offers zero or more
//! candidate tasks to the pool. Generators never mutate the world; the
//! executor applies the chosen task afterwards.

pub mod cure;
pub mod faction;
pub mod movement;
pub mod personnel;
pub mod roles;
pub mod survival;
pub mod target;

use super::TaskPool;
use crate::core::config::AiConfig;
use crate::core::rng::DecisionRng;
use crate::core::types::NodeId;
use crate::intel::ThreatMap;
use crate::ledger::ResourceLedger;
use crate::state::ControlledEntity;
use crate::world::World;

/// Read-only view of everything a generator may consult
pub struct GenContext<'a> {
    pub config: &'a AiConfig,
    pub world: &'a World,
    pub threat: &'a ThreatMap,
    pub entity: &'a ControlledEntity,
    pub ledger: &'a ResourceLedger,
}

impl<'a> GenContext<'a> {
    /// Neighbours of `node` that are not bad, in connection order
    pub fn safe_neighbours(&self, node: NodeId) -> Vec<NodeId> {
        self.world
            .graph
            .neighbours(node)
            .into_iter()
            .filter(|n| !self.threat.is_bad(*n))
            .collect()
    }
}

/// Run every generator in precedence order. Idle is always offered last.
pub fn generate_all(
    ctx: &GenContext,
    goal: &mut Option<NodeId>,
    rng: &mut dyn DecisionRng,
    pool: &mut TaskPool,
) {
    let weights = &ctx.config.weights;

    pool.offer(survival::generate(ctx, rng), weights);
    pool.offer(cure::generate(ctx, rng), weights);
    pool.offer(movement::move_to_goal(ctx, goal, rng), weights);
    target::generate(ctx, rng, pool);
    roles::generate(ctx, rng, pool);
    pool.offer(personnel::stress_leave(ctx, rng), weights);
    pool.offer(personnel::dismissal(ctx, rng), weights);
    pool.offer(faction::lobby(ctx), weights);
    pool.offer(personnel::idle(), weights);

    tracing::trace!(
        epoch = pool.epoch(),
        critical = pool.critical().len(),
        potential = pool.potential().len(),
        "task pool built"
    );
}
