//! Faction relations

use super::GenContext;
use crate::core::types::Priority;
use crate::tasks::{Task, TaskAction};

/// Lobby headquarters while approval sits under the floor
pub fn lobby(ctx: &GenContext) -> Option<Task> {
    let faction = &ctx.config.faction;
    let approval = ctx.world.approval;
    if approval >= faction.approval_floor {
        return None;
    }
    let priority = if approval == 0 {
        Priority::Critical
    } else {
        faction.lobby_priority
    };
    Task::player(priority, TaskAction::FactionLobby)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::generators::fixtures::Fixture;

    #[test]
    fn test_lobby_thresholds() {
        let mut fixture = Fixture::new();
        assert!(lobby(&fixture.ctx()).is_none());

        fixture.world.approval = 2;
        assert_eq!(lobby(&fixture.ctx()).unwrap().priority(), Priority::Medium);

        fixture.world.approval = 0;
        assert!(lobby(&fixture.ctx()).unwrap().is_critical());
    }
}
