pub mod app;
pub mod content;
pub mod world;

pub use app::{
    reduce, ContainerSize, Direction, EngineConfig, Environment, Frame, InputAction,
    MovementConfig, MovementState, NearbyView, PixelPoint, Session, SessionEvent, SessionNotice,
    SessionState, Step, ZoneView, DEFAULT_AVATAR_HIT_HALF_EXTENT, DEFAULT_STEP_UNITS,
    DEFAULT_STOP_DELAY_MS,
};
pub use content::{
    builtin_floor_plan, load_entity_list, load_floor_plan, parse_entity_list, parse_floor_plan,
    EntityListError, FloorPlan, FloorPlanError, FloorPlanErrorCode,
};
pub use world::{
    AmbientState, AmbientTable, EntityKey, EntityRecord, Feature, InteractionTracker, Position,
    ProximityConfig, ProximityPolicy, PulseRate, Rgb, TaskId, TransitionStyle, Zone, ZoneId,
    ZoneIndex, ZoneKind, ZoneMatchPolicy, ALL_TASKS, DEFAULT_POSITION, DEFAULT_PROXIMITY_THRESHOLD,
    PLANE_MAX, PLANE_MIN,
};
