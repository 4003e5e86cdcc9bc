//! Role actions for the nine actor arcs
//!
//! One template serves every arc. The controlled entity may act itself;
//! otherwise an active subordinate of the arc acts at one of its safe
//! contact nodes where the arc applies. Failing that, a random subordinate
//! of the arc acts at its own node. Fixer and Recruiter only depend on
//! global state, so they always act at the subordinate's own node and only
//! while their condition holds.

use super::GenContext;
use crate::core::rng::DecisionRng;
use crate::core::types::{ActorArc, ActorId, NodeId, TeamKind};
use crate::tasks::{Task, TaskAction, TaskPool};
use crate::world::NODE_STAT_MAX;

/// Whether `arc` has something to do at `node`
pub fn arc_applies(ctx: &GenContext, arc: ActorArc, node: NodeId) -> bool {
    match arc {
        ActorArc::Fixer => return ctx.ledger.gear_pool < ctx.config.gear.pool_max,
        ActorArc::Recruiter => return ctx.world.roster.has_room(),
        _ => {}
    }

    let Some(n) = ctx.world.graph.node(node) else {
        return false;
    };
    match arc {
        ActorArc::Anarchist => n.stability > 0 && !n.has_team(TeamKind::Civil),
        ActorArc::Blogger => n.support < NODE_STAT_MAX && !n.has_team(TeamKind::Media),
        ActorArc::Hacker => n.security > 0 && !n.has_team(TeamKind::Probe),
        ActorArc::Heavy => !n.teams.is_empty(),
        ActorArc::Observer => !n.tracer,
        ActorArc::Operator => n.support > 0 && !n.has_team(TeamKind::Control),
        ActorArc::Planner => ctx.world.targets.live_at(node).is_some(),
        ActorArc::Fixer | ActorArc::Recruiter => true,
    }
}

pub fn generate(ctx: &GenContext, rng: &mut dyn DecisionRng, pool: &mut TaskPool) {
    for arc in ActorArc::ALL {
        pool.offer(role_action(ctx, arc, rng), &ctx.config.weights);
    }
}

/// Candidate action for a single arc
pub fn role_action(ctx: &GenContext, arc: ActorArc, rng: &mut dyn DecisionRng) -> Option<Task> {
    let priority = ctx.config.roles.priorities.get(arc);
    let here = ctx.entity.node;

    if rng.chance(ctx.config.roles.player_action_chance)
        && ctx.entity.is_active()
        && ctx.threat.is_safe(here)
        && arc_applies(ctx, arc, here)
    {
        return Task::player(priority, TaskAction::RoleAction { arc, node: here });
    }

    let mut sites: Vec<(ActorId, NodeId)> = Vec::new();
    for actor in ctx.world.roster.active_by_arc(arc) {
        if arc.is_node_bound() {
            for &contact in &actor.contacts {
                if ctx.threat.is_safe(contact) && arc_applies(ctx, arc, contact) {
                    sites.push((actor.id, contact));
                }
            }
        } else if arc_applies(ctx, arc, actor.node) {
            sites.push((actor.id, actor.node));
        }
    }

    // No suitable contact: any subordinate of the arc acts where it stands
    if sites.is_empty() && arc.is_node_bound() {
        sites = ctx
            .world
            .roster
            .active_by_arc(arc)
            .map(|a| (a.id, a.node))
            .collect();
    }

    if sites.is_empty() {
        tracing::trace!(?arc, "no role site");
        return None;
    }
    let (actor, node) = sites[rng.pick(sites.len())];
    Task::subordinate(priority, actor, TaskAction::RoleAction { arc, node })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRng;
    use crate::core::types::{ActorRef, Priority, TargetId};
    use crate::tasks::generators::fixtures::Fixture;
    use crate::world::Target;

    #[test]
    fn test_predicates() {
        let mut fixture = Fixture::new();
        {
            let node = fixture.world.graph.node_mut(NodeId(1)).unwrap();
            node.support = NODE_STAT_MAX;
            node.teams.push(TeamKind::Civil);
        }
        fixture
            .world
            .targets
            .add(Target::new(TargetId(0), "vault", NodeId(2)));
        let ctx = fixture.ctx();

        assert!(!arc_applies(&ctx, ActorArc::Anarchist, NodeId(1)));
        assert!(arc_applies(&ctx, ActorArc::Anarchist, NodeId(0)));
        assert!(!arc_applies(&ctx, ActorArc::Blogger, NodeId(1)));
        assert!(arc_applies(&ctx, ActorArc::Heavy, NodeId(1)));
        assert!(!arc_applies(&ctx, ActorArc::Heavy, NodeId(0)));
        assert!(arc_applies(&ctx, ActorArc::Planner, NodeId(2)));
        assert!(!arc_applies(&ctx, ActorArc::Planner, NodeId(0)));
        assert!(arc_applies(&ctx, ActorArc::Fixer, NodeId(4)));
        assert!(!arc_applies(&ctx, ActorArc::Observer, NodeId(9)));
    }

    #[test]
    fn test_player_acts_when_roll_passes() {
        let fixture = Fixture::new();
        let mut rng = ScriptedRng::new().with_rolls(&[0]);

        let task = role_action(&fixture.ctx(), ActorArc::Blogger, &mut rng).unwrap();
        assert_eq!(task.actor(), ActorRef::Player);
        assert_eq!(task.priority(), Priority::Medium);
        assert_eq!(
            task.action(),
            TaskAction::RoleAction {
                arc: ActorArc::Blogger,
                node: NodeId(0),
            }
        );
    }

    #[test]
    fn test_subordinate_uses_safe_contact() {
        let mut fixture = Fixture::new();
        let id = fixture.add_subordinate(ActorArc::Hacker, 1);
        fixture
            .world
            .roster
            .get_mut(id)
            .unwrap()
            .contacts
            .push(NodeId(3));
        fixture.mark_bad(&[1]);

        let task = role_action(&fixture.ctx(), ActorArc::Hacker, &mut ScriptedRng::new()).unwrap();
        assert_eq!(task.actor(), ActorRef::Subordinate(id));
        assert_eq!(
            task.action(),
            TaskAction::RoleAction {
                arc: ActorArc::Hacker,
                node: NodeId(3),
            }
        );
    }

    #[test]
    fn test_spider_contact_skipped_for_safe_one() {
        let mut fixture = Fixture::new();
        let id = fixture.add_subordinate(ActorArc::Anarchist, 2);
        fixture
            .world
            .roster
            .get_mut(id)
            .unwrap()
            .contacts
            .push(NodeId(3));
        fixture.world.graph.node_mut(NodeId(2)).unwrap().spider_known = true;
        fixture.mark_bad(&[]);

        let task = role_action(&fixture.ctx(), ActorArc::Anarchist, &mut ScriptedRng::new()).unwrap();
        assert!(matches!(task.action(), TaskAction::RoleAction { node: NodeId(3), .. }));
    }

    #[test]
    fn test_falls_back_to_subordinate_node() {
        let mut fixture = Fixture::new();
        let id = fixture.add_subordinate(ActorArc::Blogger, 2);
        fixture.world.graph.node_mut(NodeId(2)).unwrap().support = NODE_STAT_MAX;

        let task = role_action(&fixture.ctx(), ActorArc::Blogger, &mut ScriptedRng::new()).unwrap();
        assert_eq!(task.actor(), ActorRef::Subordinate(id));
        assert_eq!(
            task.action(),
            TaskAction::RoleAction {
                arc: ActorArc::Blogger,
                node: NodeId(2),
            }
        );
    }

    #[test]
    fn test_no_subordinate_of_arc() {
        let mut fixture = Fixture::new();
        fixture.add_subordinate(ActorArc::Hacker, 1);
        assert!(role_action(&fixture.ctx(), ActorArc::Blogger, &mut ScriptedRng::new()).is_none());
    }

    #[test]
    fn test_fixer_acts_where_it_stands() {
        let mut fixture = Fixture::new();
        let id = fixture.add_subordinate(ActorArc::Fixer, 4);
        fixture.mark_bad(&[4]);

        let task = role_action(&fixture.ctx(), ActorArc::Fixer, &mut ScriptedRng::new()).unwrap();
        assert_eq!(task.actor(), ActorRef::Subordinate(id));
        assert!(matches!(task.action(), TaskAction::RoleAction { node: NodeId(4), .. }));

        // Full pool: nothing to fix, and no fallback either
        fixture.ledger.gear_pool = fixture.config.gear.pool_max;
        assert!(role_action(&fixture.ctx(), ActorArc::Fixer, &mut ScriptedRng::new()).is_none());
    }
}
