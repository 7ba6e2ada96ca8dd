use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use super::hashing::fingerprint_bytes;
use crate::app::{EngineConfig, Environment};
use crate::world::{
    AmbientState, AmbientTable, ProximityConfig, PulseRate, Rgb, TransitionStyle, Zone, ZoneId,
    ZoneIndex, ZoneKind, ZoneMatchPolicy,
};

const BUILTIN_FLOOR_PLAN: &str = include_str!("../../../../assets/floor_plans/mall.json");
const BUILTIN_ORIGIN: &str = "builtin:mall.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorPlanErrorCode {
    EmptyZoneList,
    DuplicateZoneId,
    InvalidZoneExtent,
    UnknownZoneReference,
    UnknownCategory,
    InvalidIntensity,
    InvalidColor,
    InvalidThreshold,
}

#[derive(Debug, Error)]
pub enum FloorPlanError {
    #[error("failed to read floor plan {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed floor plan {origin}: {message}")]
    Parse { origin: String, message: String },
    #[error("invalid floor plan {origin}: {code:?}: {message}")]
    Invalid {
        origin: String,
        code: FloorPlanErrorCode,
        message: String,
    },
}

impl FloorPlanError {
    pub fn code(&self) -> Option<FloorPlanErrorCode> {
        match self {
            Self::Invalid { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FloorPlanDef {
    #[serde(default)]
    name: String,
    zones: Vec<Zone>,
    #[serde(default)]
    ambient: AmbientDef,
    #[serde(default)]
    default_category: Option<String>,
    #[serde(default)]
    proximity: Option<ProximityConfig>,
    #[serde(default)]
    zone_policy: Option<ZoneMatchPolicy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct AmbientDef {
    #[serde(default)]
    default: Option<AmbientEntryDef>,
    #[serde(default)]
    zones: BTreeMap<String, AmbientEntryDef>,
    #[serde(default)]
    kinds: BTreeMap<String, AmbientEntryDef>,
    /// Keyed `"{fromKind}_{toKind}"`.
    #[serde(default)]
    transitions: BTreeMap<String, String>,
    #[serde(default)]
    generic_transition: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct AmbientEntryDef {
    primary_color: String,
    secondary_color: String,
    intensity: f32,
    #[serde(default)]
    pulse_rate: PulseRate,
}

/// A validated floor plan. Static for the whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlan {
    pub name: String,
    pub zones: Vec<Zone>,
    pub ambient: AmbientTable,
    pub default_category: Option<String>,
    pub proximity: Option<ProximityConfig>,
    pub zone_policy: Option<ZoneMatchPolicy>,
    /// Lowercase SHA-256 of the source bytes.
    pub fingerprint: String,
}

impl FloorPlan {
    pub fn zone_index(&self) -> ZoneIndex {
        ZoneIndex::new(self.zones.clone()).with_default_category(self.default_category.clone())
    }

    /// Layers the plan's own settings over `config`.
    pub fn apply_to(&self, config: &mut EngineConfig) {
        if let Some(proximity) = self.proximity {
            config.proximity = proximity;
        }
        if let Some(policy) = self.zone_policy {
            config.zone_policy = policy;
        }
    }

    pub fn environment(&self, config: EngineConfig) -> Environment {
        Environment::new(self.zone_index(), self.ambient.clone(), config)
    }
}

pub fn builtin_floor_plan() -> Result<FloorPlan, FloorPlanError> {
    parse_floor_plan(BUILTIN_FLOOR_PLAN, BUILTIN_ORIGIN)
}

pub fn load_floor_plan(path: &Path) -> Result<FloorPlan, FloorPlanError> {
    let raw = fs::read_to_string(path).map_err(|source| FloorPlanError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_floor_plan(&raw, &path.display().to_string())
}

pub fn parse_floor_plan(raw: &str, origin: &str) -> Result<FloorPlan, FloorPlanError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let def = serde_path_to_error::deserialize::<_, FloorPlanDef>(&mut deserializer).map_err(
        |error| {
            let path = error.path().to_string();
            let source = error.into_inner();
            let message = if path.is_empty() || path == "." {
                source.to_string()
            } else {
                format!("at {path}: {source}")
            };
            FloorPlanError::Parse {
                origin: origin.to_string(),
                message,
            }
        },
    )?;

    let plan = compile_floor_plan(def, origin, fingerprint_bytes(raw.as_bytes()))?;
    info!(
        origin,
        name = %plan.name,
        zones = plan.zones.len(),
        fingerprint = %plan.fingerprint,
        "floor_plan_loaded"
    );
    Ok(plan)
}

fn compile_floor_plan(
    def: FloorPlanDef,
    origin: &str,
    fingerprint: String,
) -> Result<FloorPlan, FloorPlanError> {
    let invalid = |code: FloorPlanErrorCode, message: String| FloorPlanError::Invalid {
        origin: origin.to_string(),
        code,
        message,
    };

    if def.zones.is_empty() {
        return Err(invalid(
            FloorPlanErrorCode::EmptyZoneList,
            "floor plan declares no zones".to_string(),
        ));
    }

    let mut seen = HashSet::<&ZoneId>::new();
    for (index, zone) in def.zones.iter().enumerate() {
        if !seen.insert(&zone.id) {
            return Err(invalid(
                FloorPlanErrorCode::DuplicateZoneId,
                format!("zones[{index}]: duplicate zone id '{}'", zone.id),
            ));
        }
        let finite = [zone.center_x, zone.center_y, zone.width, zone.height]
            .iter()
            .all(|value| value.is_finite());
        if !finite || zone.width <= 0.0 || zone.height <= 0.0 {
            return Err(invalid(
                FloorPlanErrorCode::InvalidZoneExtent,
                format!(
                    "zones[{index}] '{}': extent must be finite and positive, got {}x{} at ({}, {})",
                    zone.id, zone.width, zone.height, zone.center_x, zone.center_y
                ),
            ));
        }
    }

    if let Some(category) = def.default_category.as_deref() {
        let known = def
            .zones
            .iter()
            .any(|zone| zone.category.as_deref() == Some(category));
        if !known {
            return Err(invalid(
                FloorPlanErrorCode::UnknownCategory,
                format!("defaultCategory '{category}' is not carried by any zone"),
            ));
        }
    }

    if let Some(proximity) = def.proximity {
        if !proximity.threshold.is_finite() || proximity.threshold <= 0.0 {
            return Err(invalid(
                FloorPlanErrorCode::InvalidThreshold,
                format!(
                    "proximity.threshold must be finite and positive, got {}",
                    proximity.threshold
                ),
            ));
        }
    }

    let mut ambient = AmbientTable::default();
    if let Some(entry) = &def.ambient.default {
        ambient = ambient.with_fallback(compile_ambient_entry(entry, "ambient.default", origin)?);
    }
    for (id, entry) in &def.ambient.zones {
        let zone_id = ZoneId::new(id.as_str());
        if !seen.contains(&zone_id) {
            return Err(invalid(
                FloorPlanErrorCode::UnknownZoneReference,
                format!("ambient.zones references unknown zone '{id}'"),
            ));
        }
        let state = compile_ambient_entry(entry, &format!("ambient.zones.{id}"), origin)?;
        ambient = ambient.with_zone(zone_id, state);
    }

    let kinds = def
        .zones
        .iter()
        .map(|zone| zone.kind.as_str())
        .collect::<HashSet<_>>();
    for (kind, entry) in &def.ambient.kinds {
        if !kinds.contains(kind.as_str()) {
            warn!(origin, kind = %kind, "ambient_kind_unused");
        }
        let state = compile_ambient_entry(entry, &format!("ambient.kinds.{kind}"), origin)?;
        ambient = ambient.with_kind(ZoneKind::new(kind.as_str()), state);
    }
    for (key, style) in &def.ambient.transitions {
        ambient = ambient.with_transition_key(key.as_str(), TransitionStyle::new(style.as_str()));
    }
    if let Some(style) = &def.ambient.generic_transition {
        ambient = ambient.with_generic_transition(TransitionStyle::new(style.as_str()));
    }

    Ok(FloorPlan {
        name: def.name,
        zones: def.zones,
        ambient,
        default_category: def.default_category,
        proximity: def.proximity,
        zone_policy: def.zone_policy,
        fingerprint,
    })
}

fn compile_ambient_entry(
    entry: &AmbientEntryDef,
    at: &str,
    origin: &str,
) -> Result<AmbientState, FloorPlanError> {
    let color = |raw: &str, field: &str| {
        Rgb::parse_hex(raw).ok_or_else(|| FloorPlanError::Invalid {
            origin: origin.to_string(),
            code: FloorPlanErrorCode::InvalidColor,
            message: format!("{at}.{field}: expected #rrggbb, got '{raw}'"),
        })
    };
    let primary = color(&entry.primary_color, "primaryColor")?;
    let secondary = color(&entry.secondary_color, "secondaryColor")?;
    if !entry.intensity.is_finite() || !(0.0..=1.0).contains(&entry.intensity) {
        return Err(FloorPlanError::Invalid {
            origin: origin.to_string(),
            code: FloorPlanErrorCode::InvalidIntensity,
            message: format!("{at}.intensity: expected 0..=1, got {}", entry.intensity),
        });
    }
    Ok(AmbientState::new(
        primary,
        secondary,
        entry.intensity,
        entry.pulse_rate,
    ))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::world::{Position, ProximityPolicy, GENERIC_TRANSITION_STYLE};

    fn minimal() -> serde_json::Value {
        json!({
            "name": "Test Mall",
            "defaultCategory": "general",
            "zones": [
                {
                    "id": "entrance", "name": "Entrance", "kind": "entrance",
                    "centerX": 50, "centerY": 75, "width": 30, "height": 20
                },
                {
                    "id": "plaza", "name": "Plaza", "kind": "plaza", "category": "general",
                    "centerX": 50, "centerY": 40, "width": 40, "height": 30,
                    "features": [{ "name": "Kiosk" }]
                }
            ],
            "ambient": {
                "default": { "primaryColor": "#111111", "secondaryColor": "#222222", "intensity": 0.4 },
                "zones": {
                    "plaza": { "primaryColor": "#10b981", "secondaryColor": "#06b6d4", "intensity": 0.7, "pulseRate": "fast" }
                },
                "transitions": { "entrance_plaza": "sweep" }
            }
        })
    }

    fn parse(value: serde_json::Value) -> Result<FloorPlan, FloorPlanError> {
        parse_floor_plan(&value.to_string(), "test")
    }

    #[test]
    fn builtin_floor_plan_is_valid() {
        let plan = builtin_floor_plan().expect("builtin plan");
        assert!(!plan.zones.is_empty());
        assert_eq!(plan.fingerprint.len(), 64);
        let index = plan.zone_index();
        let spawn = index.current_zone(Position::default()).expect("spawn zone");
        assert_eq!(spawn.kind.as_str(), "entrance");
        let default_category = plan.default_category.as_deref().expect("default category");
        assert!(index.zone_for_category(default_category).is_some());
    }

    #[test]
    fn minimal_plan_compiles() {
        let plan = parse(minimal()).expect("plan");
        assert_eq!(plan.name, "Test Mall");
        assert_eq!(plan.zones.len(), 2);
        assert_eq!(plan.zones[1].features.len(), 1);
        assert_eq!(plan.proximity, None);

        let plaza = plan.zones.iter().find(|zone| zone.id.as_str() == "plaza");
        let ambient = plan.ambient.resolve(plaza);
        assert_eq!(ambient.primary_color, Rgb::new(0x10, 0xb9, 0x81));
        assert_eq!(ambient.pulse_rate, PulseRate::Fast);
        assert_eq!(plan.ambient.resolve(None).intensity, 0.4);

        let entrance = plan.zones.iter().find(|zone| zone.id.as_str() == "entrance");
        let style = plan
            .ambient
            .transition_style(entrance, plaza)
            .expect("style");
        assert_eq!(style.as_str(), "sweep");
        let back = plan
            .ambient
            .transition_style(plaza, entrance)
            .expect("style");
        assert_eq!(back.as_str(), GENERIC_TRANSITION_STYLE);
    }

    #[test]
    fn proximity_block_overrides_config() {
        let mut value = minimal();
        value["proximity"] = json!({ "threshold": 12, "policy": "nearest" });
        let plan = parse(value).expect("plan");

        let mut config = EngineConfig::default();
        plan.apply_to(&mut config);
        assert_eq!(config.proximity.threshold, 12.0);
        assert_eq!(config.proximity.policy, ProximityPolicy::Nearest);
    }

    #[test]
    fn zone_policy_is_opt_in() {
        let mut value = minimal();
        value["zonePolicy"] = json!("innermost");
        let plan = parse(value).expect("plan");
        let mut config = EngineConfig::default();
        plan.apply_to(&mut config);
        assert_eq!(config.zone_policy, ZoneMatchPolicy::Innermost);
        assert_eq!(
            plan.environment(config).zones().policy(),
            ZoneMatchPolicy::Innermost
        );
    }

    #[test]
    fn parse_error_reports_field_path() {
        let mut value = minimal();
        value["zones"][1]["width"] = json!("wide");
        let err = parse(value).expect_err("should fail");
        match err {
            FloorPlanError::Parse { message, .. } => {
                assert!(message.contains("zones[1].width"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut value = minimal();
        value["floor"] = json!(2);
        assert!(matches!(parse(value), Err(FloorPlanError::Parse { .. })));
    }

    fn assert_code(mutate: impl FnOnce(&mut serde_json::Value), expected: FloorPlanErrorCode) {
        let mut value = minimal();
        mutate(&mut value);
        let err = parse(value).expect_err("should fail");
        assert_eq!(err.code(), Some(expected), "{err}");
    }

    #[test]
    fn validation_codes() {
        assert_code(|v| v["zones"] = json!([]), FloorPlanErrorCode::EmptyZoneList);
        assert_code(
            |v| v["zones"][1]["id"] = json!("entrance"),
            FloorPlanErrorCode::DuplicateZoneId,
        );
        assert_code(
            |v| v["zones"][0]["width"] = json!(0),
            FloorPlanErrorCode::InvalidZoneExtent,
        );
        assert_code(
            |v| v["defaultCategory"] = json!("toys"),
            FloorPlanErrorCode::UnknownCategory,
        );
        assert_code(
            |v| {
                v["ambient"]["zones"]["food"] =
                    json!({ "primaryColor": "#000000", "secondaryColor": "#000000", "intensity": 0.5 })
            },
            FloorPlanErrorCode::UnknownZoneReference,
        );
        assert_code(
            |v| v["ambient"]["default"]["intensity"] = json!(1.5),
            FloorPlanErrorCode::InvalidIntensity,
        );
        assert_code(
            |v| v["ambient"]["default"]["primaryColor"] = json!("blue"),
            FloorPlanErrorCode::InvalidColor,
        );
        assert_code(
            |v| v["proximity"] = json!({ "threshold": -1 }),
            FloorPlanErrorCode::InvalidThreshold,
        );
    }

    #[test]
    fn load_reads_from_disk() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("plan.json");
        fs::write(&path, minimal().to_string()).expect("write plan");

        let plan = load_floor_plan(&path).expect("plan");
        let again = parse(minimal()).expect("plan");
        assert_eq!(plan.fingerprint, again.fingerprint);

        let missing = load_floor_plan(&temp.path().join("missing.json")).expect_err("missing");
        assert!(matches!(missing, FloorPlanError::ReadFile { .. }));
    }
}
