mod config;
mod frame;
mod input;
mod movement;
mod session;

pub use config::EngineConfig;
pub use frame::{Frame, NearbyView, ZoneView};
pub use input::{ContainerSize, Direction, InputAction, PixelPoint};
pub use movement::{
    MovementConfig, MovementState, DEFAULT_AVATAR_HIT_HALF_EXTENT, DEFAULT_STEP_UNITS,
    DEFAULT_STOP_DELAY_MS,
};
pub use session::{
    reduce, Environment, Session, SessionEvent, SessionNotice, SessionState, Step,
};
