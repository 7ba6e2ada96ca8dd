use serde::{Deserialize, Serialize};

use super::movement::MovementConfig;
use crate::world::{ProximityConfig, ZoneMatchPolicy};

/// Tunables shared by every surface that hosts the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub movement: MovementConfig,
    pub proximity: ProximityConfig,
    pub zone_policy: ZoneMatchPolicy,
}
