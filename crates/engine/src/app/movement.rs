use serde::{Deserialize, Serialize};
use tracing::trace;

use super::input::{ActionStates, ContainerSize, Direction, InputAction, PixelPoint};
use crate::world::{apply_delta, Position, PLANE_EXTENT_PERCENT};

pub const DEFAULT_STEP_UNITS: f32 = 5.0;
pub const DEFAULT_STOP_DELAY_MS: u64 = 150;
pub const DEFAULT_AVATAR_HIT_HALF_EXTENT: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub step_units: f32,
    pub stop_delay_ms: u64,
    /// Preference multiplier on the digital step.
    pub walk_speed: f32,
    /// When off, pointer and touch drags never grab the avatar.
    pub gesture_control: bool,
    pub avatar_hit_half_extent: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            step_units: DEFAULT_STEP_UNITS,
            stop_delay_ms: DEFAULT_STOP_DELAY_MS,
            walk_speed: 1.0,
            gesture_control: true,
            avatar_hit_half_extent: DEFAULT_AVATAR_HIT_HALF_EXTENT,
        }
    }
}

impl MovementConfig {
    pub fn effective_step(&self) -> f32 {
        if !self.walk_speed.is_finite() || self.walk_speed <= 0.0 {
            return self.step_units;
        }
        self.step_units * self.walk_speed
    }
}

/// Deferred "stop moving". Only fires while its token is still the current
/// movement token; any later movement makes it stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StopTimer {
    token: u64,
    due_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    last_pointer: PixelPoint,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementState {
    moving: bool,
    direction: Option<Direction>,
    held: ActionStates,
    drag: Option<DragState>,
    stop_timer: Option<StopTimer>,
    token: u64,
}

impl MovementState {
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn has_pending_stop(&self) -> bool {
        self.stop_timer
            .is_some_and(|timer| timer.token == self.token)
    }

    fn begin_motion(&mut self, direction: Option<Direction>) {
        self.token = self.token.wrapping_add(1);
        self.moving = true;
        if direction.is_some() {
            self.direction = direction;
        }
    }

    /// Applies one fixed step immediately.
    pub fn press(
        &mut self,
        action: InputAction,
        position: Position,
        config: &MovementConfig,
    ) -> Position {
        self.held.set(action, true);
        self.begin_motion(Some(action.direction()));
        let (ux, uy) = action.unit_vector();
        let step = config.effective_step();
        apply_delta(position, ux * step, uy * step)
    }

    /// Schedules the stop once no direction key is held any more.
    pub fn release(&mut self, action: InputAction, now_ms: u64, config: &MovementConfig) {
        self.held.set(action, false);
        if self.held.any_down() || self.drag.is_some() {
            return;
        }
        self.stop_timer = Some(StopTimer {
            token: self.token,
            due_ms: now_ms.saturating_add(config.stop_delay_ms),
        });
    }

    /// Returns `true` when a pending stop cleared the moving flag.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(timer) = self.stop_timer else {
            return false;
        };
        if timer.token != self.token {
            trace!(timer_token = timer.token, token = self.token, "stale_stop_timer_dropped");
            self.stop_timer = None;
            return false;
        }
        if now_ms < timer.due_ms {
            return false;
        }
        self.stop_timer = None;
        let was_moving = self.moving;
        self.moving = false;
        was_moving
    }

    /// Starts a drag when the pointer lands on the avatar's hit region.
    pub fn drag_start(
        &mut self,
        pointer: PixelPoint,
        container: ContainerSize,
        position: Position,
        config: &MovementConfig,
    ) -> bool {
        if !config.gesture_control {
            trace!("drag_ignored_gesture_control_off");
            return false;
        }
        if container.is_degenerate() {
            trace!("drag_ignored_degenerate_container");
            return false;
        }
        let plane_x = pointer.x / container.width * PLANE_EXTENT_PERCENT;
        let plane_y = pointer.y / container.height * PLANE_EXTENT_PERCENT;
        let half = config.avatar_hit_half_extent;
        let hit = (plane_x - position.x).abs() <= half && (plane_y - position.y).abs() <= half;
        if !hit {
            return false;
        }
        self.drag = Some(DragState {
            last_pointer: pointer,
        });
        true
    }

    /// Moves by the delta against the previous pointer sample, not the drag
    /// origin. Returns the new position when the avatar actually moved.
    pub fn drag_move(
        &mut self,
        pointer: PixelPoint,
        container: ContainerSize,
        position: Position,
    ) -> Option<Position> {
        let drag = self.drag.as_mut()?;
        let previous = std::mem::replace(&mut drag.last_pointer, pointer);
        if container.is_degenerate() {
            trace!("drag_delta_skipped_degenerate_container");
            return None;
        }
        let dx = (pointer.x - previous.x) / container.width * PLANE_EXTENT_PERCENT;
        let dy = (pointer.y - previous.y) / container.height * PLANE_EXTENT_PERCENT;
        if !dx.is_finite() || !dy.is_finite() || (dx == 0.0 && dy == 0.0) {
            return None;
        }
        self.begin_motion(Direction::from_delta(dx, dy));
        Some(apply_delta(position, dx, dy))
    }

    /// Returns `true` when ending the drag stopped the avatar. A held
    /// direction key keeps it moving until that key's own stop delay.
    pub fn drag_end(&mut self) -> bool {
        if self.drag.take().is_none() {
            return false;
        }
        self.token = self.token.wrapping_add(1);
        self.stop_timer = None;
        if self.held.any_down() {
            return false;
        }
        let was_moving = self.moving;
        self.moving = false;
        was_moving
    }

    /// Drops held keys, drags and timers; used whenever input listeners detach.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
