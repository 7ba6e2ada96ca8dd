use std::fmt;

use serde::{Deserialize, Serialize};

use super::space::Position;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form zone classification (`entrance`, `category`, `plaza`, ...). Ambient
/// lookups and transition styles key off it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneKind(pub String);

impl ZoneKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Axis-aligned rectangle described by its center and full extents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ZoneKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
}

impl Zone {
    pub fn left(&self) -> f32 {
        self.center_x - self.width * 0.5
    }

    pub fn top(&self) -> f32 {
        self.center_y - self.height * 0.5
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Edges are inclusive on both axes.
    pub fn contains(&self, position: Position) -> bool {
        (position.x - self.center_x).abs() <= self.width * 0.5
            && (position.y - self.center_y).abs() <= self.height * 0.5
    }

    pub fn has_features(&self) -> bool {
        !self.features.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneMatchPolicy {
    /// First containing zone in declaration order wins.
    #[default]
    FirstDeclared,
    /// Smallest containing zone wins; equal areas fall back to declaration order.
    Innermost,
}

/// Static zone list for one environment. Declaration order is precedence under
/// [`ZoneMatchPolicy::FirstDeclared`], so integrators reorder the list to fix
/// overlaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneIndex {
    zones: Vec<Zone>,
    policy: ZoneMatchPolicy,
    default_category: Option<String>,
}

impl ZoneIndex {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self {
            zones,
            policy: ZoneMatchPolicy::default(),
            default_category: None,
        }
    }

    pub fn with_policy(mut self, policy: ZoneMatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_default_category(mut self, category: Option<String>) -> Self {
        self.default_category = category;
        self
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn policy(&self) -> ZoneMatchPolicy {
        self.policy
    }

    pub fn default_category(&self) -> Option<&str> {
        self.default_category.as_deref()
    }

    pub fn zone(&self, id: &ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|zone| &zone.id == id)
    }

    pub fn current_zone(&self, position: Position) -> Option<&Zone> {
        match self.policy {
            ZoneMatchPolicy::FirstDeclared => {
                self.zones.iter().find(|zone| zone.contains(position))
            }
            ZoneMatchPolicy::Innermost => {
                let mut best: Option<&Zone> = None;
                for zone in self.zones.iter().filter(|zone| zone.contains(position)) {
                    match best {
                        Some(current) if current.area() <= zone.area() => {}
                        _ => best = Some(zone),
                    }
                }
                best
            }
        }
    }

    /// Zone hosting a category's entities. Categories without a zone of their
    /// own borrow the default category's zone.
    pub fn zone_for_category(&self, category: &str) -> Option<&Zone> {
        self.direct_category_zone(category).or_else(|| {
            self.default_category
                .as_deref()
                .and_then(|fallback| self.direct_category_zone(fallback))
        })
    }

    fn direct_category_zone(&self, category: &str) -> Option<&Zone> {
        self.zones
            .iter()
            .find(|zone| zone.category.as_deref() == Some(category))
    }
}

#[cfg(test)]
pub(crate) fn test_zone(id: &str, kind: &str, cx: f32, cy: f32, w: f32, h: f32) -> Zone {
    Zone {
        id: ZoneId::new(id),
        name: id.to_string(),
        center_x: cx,
        center_y: cy,
        width: w,
        height: h,
        kind: ZoneKind::new(kind),
        category: None,
        features: Vec::new(),
    }
}
