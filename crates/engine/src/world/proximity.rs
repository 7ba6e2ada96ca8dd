use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::entity::{EntityKey, EntityRecord};
use super::space::Position;
use super::zone::{ZoneId, ZoneIndex};

/// Distance, in plane units, below which an entity counts as in range.
pub const DEFAULT_PROXIMITY_THRESHOLD: f32 = 18.0;
pub const MAX_GRID_COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProximityPolicy {
    /// First in-range entity in list order.
    #[default]
    FirstMatch,
    /// Closest in-range entity; equal distances keep list order.
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    pub threshold: f32,
    pub policy: ProximityPolicy,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PROXIMITY_THRESHOLD,
            policy: ProximityPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub rows: usize,
    pub columns: usize,
}

impl GridShape {
    /// An empty category degenerates to a 0x0 grid with no cells to divide by.
    pub fn for_count(count: usize) -> Self {
        if count == 0 {
            return Self {
                rows: 0,
                columns: 0,
            };
        }
        let columns = count.min(MAX_GRID_COLUMNS);
        Self {
            rows: count.div_ceil(columns),
            columns,
        }
    }

    pub fn cell(&self, index: usize) -> Option<GridCell> {
        if self.columns == 0 || index >= self.rows * self.columns {
            return None;
        }
        Some(GridCell {
            row: index / self.columns,
            col: index % self.columns,
        })
    }
}

/// Synthetic floor slot derived for one entity. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub entity_index: usize,
    pub entity_id: EntityKey,
    pub zone_id: ZoneId,
    pub cell: GridCell,
    pub position: Position,
}

/// Grid layout of every placeable entity, kept in entity list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloorLayout {
    placements: Vec<Placement>,
}

impl FloorLayout {
    /// Entities share the grid of the zone they resolve to, so a category
    /// that falls back to the default zone joins that zone's grid.
    pub fn build(entities: &[EntityRecord], zones: &ZoneIndex) -> Self {
        let resolved = entities
            .iter()
            .map(|entity| {
                let zone = zones.zone_for_category(&entity.category);
                if zone.is_none() {
                    warn!(
                        entity = %entity.id,
                        category = entity.category.as_str(),
                        "entity_category_has_no_zone"
                    );
                }
                zone
            })
            .collect::<Vec<_>>();

        let mut counts = HashMap::<&str, usize>::new();
        for zone in resolved.iter().flatten() {
            *counts.entry(zone.id.as_str()).or_default() += 1;
        }

        let mut next_slot = HashMap::<&str, usize>::new();
        let mut placements = Vec::with_capacity(entities.len());
        for (entity_index, (entity, zone)) in entities.iter().zip(&resolved).enumerate() {
            let Some(zone) = zone else {
                continue;
            };
            let slot = next_slot.entry(zone.id.as_str()).or_default();
            let shape = GridShape::for_count(counts.get(zone.id.as_str()).copied().unwrap_or(0));
            let Some(cell) = shape.cell(*slot) else {
                continue;
            };
            *slot += 1;

            let position = Position {
                x: zone.left() + (cell.col as f32 + 0.5) * zone.width / shape.columns as f32,
                y: zone.top() + (cell.row as f32 + 0.5) * zone.height / shape.rows as f32,
            };
            placements.push(Placement {
                entity_index,
                entity_id: entity.id.clone(),
                zone_id: zone.id.clone(),
                cell,
                position,
            });
        }

        Self { placements }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyEntity {
    pub entity_id: EntityKey,
    pub entity_index: usize,
    pub position: Position,
    pub distance: f32,
}

/// In range means strictly closer than the threshold.
pub fn is_in_range(distance: f32, threshold: f32) -> bool {
    distance < threshold
}

pub fn resolve_nearby(
    position: Position,
    layout: &FloorLayout,
    config: ProximityConfig,
) -> Option<NearbyEntity> {
    let mut in_range = layout.placements().iter().filter_map(|placement| {
        let distance = position.distance_to(placement.position);
        is_in_range(distance, config.threshold).then_some((placement, distance))
    });

    let (placement, distance) = match config.policy {
        ProximityPolicy::FirstMatch => in_range.next()?,
        ProximityPolicy::Nearest => {
            let mut best = in_range.next()?;
            for candidate in in_range {
                if candidate.1 < best.1 {
                    best = candidate;
                }
            }
            best
        }
    };

    Some(NearbyEntity {
        entity_id: placement.entity_id.clone(),
        entity_index: placement.entity_index,
        position: placement.position,
        distance,
    })
}
