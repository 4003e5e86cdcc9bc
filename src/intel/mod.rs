//! Intelligence gathering: sighting trackers, fusion and the threat map

pub mod fusion;
pub mod threat_map;
pub mod tracker;

pub use fusion::{assess, fuse, most_urgent, SightingAssessment};
pub use threat_map::ThreatMap;
pub use tracker::{SightingMessage, SightingSource, Tracker, TrackerLog};

use crate::core::config::AiConfig;
use crate::core::types::{ThreatCategory, Turn};
use crate::world::World;

/// Fuse every tracked sighting and annotate the world graph for this turn.
///
/// The returned map must be restored against the same graph before the
/// turn ends.
pub fn gather(trackers: &TrackerLog, world: &mut World, invisibility: u8, config: &AiConfig) -> ThreatMap {
    let turn: Turn = world.turn;
    let max = config.entity.max_invisibility;
    let pursuer = fuse(
        ThreatCategory::Pursuer,
        trackers.trackers(ThreatCategory::Pursuer),
        turn,
        invisibility,
        max,
    );
    let enforcement = fuse(
        ThreatCategory::EnforcementTeam,
        trackers.trackers(ThreatCategory::EnforcementTeam),
        turn,
        invisibility,
        max,
    );

    if let Some(top) = pursuer.first() {
        tracing::debug!(node = %top.node, priority = ?top.priority, "pursuer intel");
    }

    ThreatMap::build(&pursuer, &enforcement, &mut world.graph, world.alert, &config.threat)
}
