mod ambient;
mod entity;
mod proximity;
mod space;
mod tracker;
mod zone;

pub use ambient::{
    transition_key, AmbientState, AmbientTable, PulseRate, Rgb, TransitionStyle,
    GENERIC_TRANSITION_STYLE,
};
pub use entity::{EntityKey, EntityRecord};
pub use proximity::{
    is_in_range, resolve_nearby, FloorLayout, GridCell, GridShape, NearbyEntity, Placement,
    ProximityConfig, ProximityPolicy, DEFAULT_PROXIMITY_THRESHOLD, MAX_GRID_COLUMNS,
};
pub use space::{
    apply_delta, clamp_axis, Position, DEFAULT_POSITION, PLANE_EXTENT_PERCENT, PLANE_MAX,
    PLANE_MIN,
};
pub use tracker::{InteractionTracker, TaskId, ALL_TASKS};
pub use zone::{Feature, Zone, ZoneId, ZoneIndex, ZoneKind, ZoneMatchPolicy};

#[cfg(test)]
pub(crate) use zone::test_zone;
