use std::path::PathBuf;

use mallscape_engine::{
    builtin_floor_plan, load_entity_list, load_floor_plan, EngineConfig, EntityRecord, FloorPlan,
    ProximityPolicy, Session,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const FLOOR_PLAN_ENV_VAR: &str = "MALLSCAPE_FLOOR_PLAN";
const WALK_SPEED_ENV_VAR: &str = "MALLSCAPE_WALK_SPEED";
const GESTURE_CONTROL_ENV_VAR: &str = "MALLSCAPE_GESTURE_CONTROL";
const PROXIMITY_POLICY_ENV_VAR: &str = "MALLSCAPE_PROXIMITY_POLICY";

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct HostOptions {
    pub(crate) floor_plan: Option<PathBuf>,
    pub(crate) entities: Option<PathBuf>,
    pub(crate) script: Option<PathBuf>,
}

pub(crate) struct HostWiring {
    pub(crate) session: Session,
    pub(crate) entities: Vec<EntityRecord>,
}

/// Logs go to stderr; stdout carries only frame lines.
pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

pub(crate) fn build_host(options: &HostOptions) -> Result<HostWiring, String> {
    info!("=== mallscape startup ===");

    let floor_plan_path = options
        .floor_plan
        .clone()
        .or_else(|| std::env::var_os(FLOOR_PLAN_ENV_VAR).map(PathBuf::from));
    let plan = match floor_plan_path {
        Some(path) => load_floor_plan(&path),
        None => builtin_floor_plan(),
    }
    .map_err(|err| err.to_string())?;

    let entities = match &options.entities {
        Some(path) => load_entity_list(path).map_err(|err| err.to_string())?,
        None => Vec::new(),
    };

    let config = engine_config(&plan, &EnvPreferences::from_env());
    info!(
        walk_speed = config.movement.walk_speed,
        gesture_control = config.movement.gesture_control,
        proximity_policy = ?config.proximity.policy,
        threshold = config.proximity.threshold,
        "engine_configured"
    );

    Ok(HostWiring {
        session: Session::new(plan.environment(config)),
        entities,
    })
}

/// Raw preference values, captured once so the layering stays testable.
#[derive(Debug, Clone, Default, PartialEq)]
struct EnvPreferences {
    walk_speed: Option<String>,
    gesture_control: Option<String>,
    proximity_policy: Option<String>,
}

impl EnvPreferences {
    fn from_env() -> Self {
        Self {
            walk_speed: std::env::var(WALK_SPEED_ENV_VAR).ok(),
            gesture_control: std::env::var(GESTURE_CONTROL_ENV_VAR).ok(),
            proximity_policy: std::env::var(PROXIMITY_POLICY_ENV_VAR).ok(),
        }
    }
}

/// Defaults, then the floor plan, then user preferences.
fn engine_config(plan: &FloorPlan, prefs: &EnvPreferences) -> EngineConfig {
    let mut config = EngineConfig::default();
    plan.apply_to(&mut config);

    if let Some(raw) = prefs.walk_speed.as_deref() {
        match parse_walk_speed(raw) {
            Some(speed) => config.movement.walk_speed = speed,
            None => warn!(value = raw, var = WALK_SPEED_ENV_VAR, "invalid_preference_ignored"),
        }
    }
    if let Some(raw) = prefs.gesture_control.as_deref() {
        match parse_switch(raw) {
            Some(enabled) => config.movement.gesture_control = enabled,
            None => warn!(
                value = raw,
                var = GESTURE_CONTROL_ENV_VAR,
                "invalid_preference_ignored"
            ),
        }
    }
    if let Some(raw) = prefs.proximity_policy.as_deref() {
        match parse_proximity_policy(raw) {
            Some(policy) => config.proximity.policy = policy,
            None => warn!(
                value = raw,
                var = PROXIMITY_POLICY_ENV_VAR,
                "invalid_preference_ignored"
            ),
        }
    }
    config
}

fn parse_walk_speed(raw: &str) -> Option<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|speed| speed.is_finite() && *speed > 0.0)
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Some(true),
        "off" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_proximity_policy(raw: &str) -> Option<ProximityPolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "first-match" => Some(ProximityPolicy::FirstMatch),
        "nearest" => Some(ProximityPolicy::Nearest),
        _ => None,
    }
}
