//! Decision engine configuration loaded from TOML
//!
//! All thresholds, chances and weights the generators consult are collected
//! here. Chances are integer percentages compared against a `[0, 100)` roll.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{AiError, Result};
use crate::core::types::{ActorArc, Priority, SecurityLevel};

/// Duplication weights for non-critical tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            high: 3,
            medium: 2,
            low: 1,
        }
    }
}

impl PriorityWeights {
    /// Weight of a potential task. Critical tasks never enter the weighted draw.
    pub fn weight(&self, priority: Priority) -> u32 {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
            Priority::Critical | Priority::None => 0,
        }
    }
}

/// Controlled entity stat bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    /// Highest invisibility value (fully hidden)
    pub max_invisibility: u8,
    /// Capture is checked whenever invisibility drops to this value or below
    pub capture_threshold: u8,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            max_invisibility: 3,
            capture_threshold: 1,
        }
    }
}

/// Sighting tracker retention and message reliability
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelConfig {
    /// Trackers older than this many turns are pruned
    pub retention_window: u32,
    /// Reliability assigned to tracer-sourced sightings
    pub tracer_reliability: u8,
    /// Contact sightings below this reliability are consumed but not tracked
    pub min_reliability: u8,
}

impl Default for IntelConfig {
    fn default() -> Self {
        Self {
            retention_window: 5,
            tracer_reliability: 3,
            min_reliability: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatConfig {
    /// Extra path weight added to connections that lead into a bad node
    pub bad_node_weight: u32,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self { bad_node_weight: 10 }
    }
}

/// Gear pool availability table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GearConfig {
    pub pool_max: u8,
    /// Availability chance per pool size, index 0 = one point in the pool
    pub chances: Vec<u32>,
    /// Chance that holding gear costs one faction resource per check
    pub retention_cost_chance: u32,
}

impl Default for GearConfig {
    fn default() -> Self {
        Self {
            pool_max: 6,
            chances: vec![15, 25, 35, 45, 55, 65],
            retention_cost_chance: 20,
        }
    }
}

impl GearConfig {
    /// Availability chance for the given pool size. Empty pool is never available.
    pub fn chance_for(&self, pool: u8) -> u32 {
        if pool == 0 {
            return 0;
        }
        let idx = usize::from(pool.min(self.pool_max)) - 1;
        self.chances.get(idx).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalConfig {
    /// Chance to move off a bad node when a safe neighbour exists
    pub move_chance: u32,
    /// Chance to lie low at a bad node when no move was chosen
    pub lie_low_at_bad_node_chance: u32,
    /// Invisibility below which lying low is considered
    pub lie_low_threshold: u8,
    pub lie_low_base: u32,
    /// Added per point of invisibility under the threshold
    pub lie_low_step: u32,
    pub stressed_bonus: u32,
    /// Turns before anyone may lie low again
    pub lie_low_cooldown: u32,
    pub subordinate_lie_low_chance: u32,
    /// Emergency recruitment triggers below this many active subordinates
    pub min_subordinates: usize,
    /// Per-turn chance that a stressed controlled entity breaks down
    pub breakdown_chance: u32,
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            move_chance: 75,
            lie_low_at_bad_node_chance: 50,
            lie_low_threshold: 2,
            lie_low_base: 20,
            lie_low_step: 20,
            stressed_bonus: 20,
            lie_low_cooldown: 8,
            subordinate_lie_low_chance: 30,
            min_subordinates: 2,
            breakdown_chance: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub goal_priority: Priority,
    pub cure_priority: Priority,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            goal_priority: Priority::Low,
            cure_priority: Priority::High,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub attempt_chance: u32,
    pub base_odds: u32,
    /// Odds added per point of accumulated target intel
    pub intel_bonus: u32,
    /// Odds added while the gear pool is non-empty
    pub gear_bonus: u32,
    pub min_odds: u32,
    pub max_subordinate_attempts: usize,
    pub player_priority: Priority,
    pub subordinate_priority: Priority,
    /// Faction resources gained on a successful attempt
    pub success_reward: u32,
    pub max_target_intel: u32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            attempt_chance: 30,
            base_odds: 30,
            intel_bonus: 10,
            gear_bonus: 10,
            min_odds: 40,
            max_subordinate_attempts: 1,
            player_priority: Priority::High,
            subordinate_priority: Priority::Medium,
            success_reward: 2,
            max_target_intel: 5,
        }
    }
}

/// Priority of each role action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RolePriorities {
    pub anarchist: Priority,
    pub blogger: Priority,
    pub fixer: Priority,
    pub hacker: Priority,
    pub heavy: Priority,
    pub observer: Priority,
    pub operator: Priority,
    pub planner: Priority,
    pub recruiter: Priority,
}

impl Default for RolePriorities {
    fn default() -> Self {
        Self {
            anarchist: Priority::Medium,
            blogger: Priority::Medium,
            fixer: Priority::Medium,
            hacker: Priority::Medium,
            heavy: Priority::Medium,
            observer: Priority::Low,
            operator: Priority::Medium,
            planner: Priority::Medium,
            recruiter: Priority::Medium,
        }
    }
}

impl RolePriorities {
    pub fn get(&self, arc: ActorArc) -> Priority {
        match arc {
            ActorArc::Anarchist => self.anarchist,
            ActorArc::Blogger => self.blogger,
            ActorArc::Fixer => self.fixer,
            ActorArc::Hacker => self.hacker,
            ActorArc::Heavy => self.heavy,
            ActorArc::Observer => self.observer,
            ActorArc::Operator => self.operator,
            ActorArc::Planner => self.planner,
            ActorArc::Recruiter => self.recruiter,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    /// Chance the controlled entity performs a role action itself
    pub player_action_chance: u32,
    pub priorities: RolePriorities,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            player_action_chance: 30,
            priorities: RolePriorities::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonnelConfig {
    /// Faction resources spent on stress leave
    pub stress_leave_cost: u32,
    pub dismiss_base_chance: u32,
    /// Priority tier of dismissal tasks; also scales the dismissal chance
    pub dismiss_priority: Priority,
}

impl Default for PersonnelConfig {
    fn default() -> Self {
        Self {
            stress_leave_cost: 2,
            dismiss_base_chance: 15,
            dismiss_priority: Priority::Medium,
        }
    }
}

impl PersonnelConfig {
    /// Dismissal chance scaled by the configured tier
    pub fn dismiss_chance(&self) -> u32 {
        let factor = match self.dismiss_priority {
            Priority::None => 0,
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Critical => 4,
        };
        (self.dismiss_base_chance * factor).min(100)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FactionConfig {
    pub approval_floor: u32,
    pub approval_max: u32,
    pub lobby_priority: Priority,
}

impl Default for FactionConfig {
    fn default() -> Self {
        Self {
            approval_floor: 3,
            approval_max: 10,
            lobby_priority: Priority::Medium,
        }
    }
}

/// Detection delays and connection security chances
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Turns before activity is noticed with no spider present
    pub delay_no_spider: u32,
    pub delay_spider: u32,
    pub low_connection_chance: u32,
    pub medium_connection_chance: u32,
    pub high_connection_chance: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            delay_no_spider: 2,
            delay_spider: 1,
            low_connection_chance: 25,
            medium_connection_chance: 50,
            high_connection_chance: 75,
        }
    }
}

impl DetectionConfig {
    /// Chance that moving along a connection of this level is noticed
    pub fn connection_chance(&self, level: SecurityLevel) -> u32 {
        match level {
            SecurityLevel::None => 0,
            SecurityLevel::Low => self.low_connection_chance,
            SecurityLevel::Medium => self.medium_connection_chance,
            SecurityLevel::High => self.high_connection_chance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnConfig {
    pub action_allowance: u32,
    /// Hard bound on action loop iterations per turn
    pub safety_iterations: u32,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            action_allowance: 2,
            safety_iterations: 10,
        }
    }
}

/// Complete decision engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiConfig {
    /// Name of this config (set from filename)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub weights: PriorityWeights,
    #[serde(default)]
    pub entity: EntityConfig,
    #[serde(default)]
    pub intel: IntelConfig,
    #[serde(default)]
    pub threat: ThreatConfig,
    #[serde(default)]
    pub gear: GearConfig,
    #[serde(default)]
    pub survival: SurvivalConfig,
    #[serde(default)]
    pub movement: MovementConfig,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub roles: RoleConfig,
    #[serde(default)]
    pub personnel: PersonnelConfig,
    #[serde(default)]
    pub faction: FactionConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub turn: TurnConfig,
}

impl AiConfig {
    pub fn new() -> Self {
        Self {
            name: "default".to_string(),
            ..Self::default()
        }
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AiConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from an explicit path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;
        if config.name.is_empty() {
            config.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.gear.pool_max == 0 {
            return Err(AiError::InvalidConfig("gear.pool_max must be at least 1".into()));
        }
        if self.gear.chances.len() != usize::from(self.gear.pool_max) {
            return Err(AiError::InvalidConfig(format!(
                "gear.chances has {} entries, expected {}",
                self.gear.chances.len(),
                self.gear.pool_max
            )));
        }
        if self.gear.chances.windows(2).any(|w| w[0] > w[1]) {
            return Err(AiError::InvalidConfig("gear.chances must be ascending".into()));
        }
        if self.gear.chances.iter().any(|&c| c > 100) {
            return Err(AiError::InvalidConfig("gear.chances must be percentages".into()));
        }

        let w = &self.weights;
        if w.low == 0 || w.medium < w.low || w.high < w.medium {
            return Err(AiError::InvalidConfig(format!(
                "weights must satisfy 0 < low ({}) <= medium ({}) <= high ({})",
                w.low, w.medium, w.high
            )));
        }

        if self.entity.capture_threshold >= self.entity.max_invisibility {
            return Err(AiError::InvalidConfig(
                "entity.capture_threshold must be below max_invisibility".into(),
            ));
        }

        if self.turn.safety_iterations < self.turn.action_allowance {
            return Err(AiError::InvalidConfig(format!(
                "turn.safety_iterations ({}) should be >= action_allowance ({})",
                self.turn.safety_iterations, self.turn.action_allowance
            )));
        }

        let task_priorities = [
            self.movement.goal_priority,
            self.movement.cure_priority,
            self.target.player_priority,
            self.target.subordinate_priority,
            self.personnel.dismiss_priority,
            self.faction.lobby_priority,
        ];
        let role_priorities = ActorArc::ALL.map(|arc| self.roles.priorities.get(arc));
        if task_priorities
            .iter()
            .chain(role_priorities.iter())
            .any(|p| *p == Priority::None)
        {
            return Err(AiError::InvalidConfig("task priorities cannot be None".into()));
        }

        Ok(())
    }
}

/// Load config from TOML file
///
/// Loads from `data/ai_config/{name}.toml`
pub fn load_config(name: &str) -> Result<AiConfig> {
    let mut config = AiConfig::load_from_path(&config_path(name))?;
    config.name = name.to_string();
    Ok(config)
}

/// Get path to config file
fn config_path(name: &str) -> PathBuf {
    PathBuf::from("data/ai_config").join(format!("{}.toml", name))
}
