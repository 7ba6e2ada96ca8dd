use serde::{Deserialize, Serialize};

/// Lower bound of both axes of the floor-plan plane, in viewport percent.
pub const PLANE_MIN: f32 = 10.0;
/// Upper bound of both axes of the floor-plan plane, in viewport percent.
pub const PLANE_MAX: f32 = 90.0;
/// Full extent of the rendered plane; pointer deltas are scaled against it.
pub const PLANE_EXTENT_PERCENT: f32 = 100.0;

const PLANE_MIDPOINT: f32 = (PLANE_MIN + PLANE_MAX) * 0.5;

pub const DEFAULT_POSITION: Position = Position { x: 50.0, y: 70.0 };

/// Avatar position on the floor plan. `y` grows toward the bottom of the
/// viewport, matching screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Default for Position {
    fn default() -> Self {
        DEFAULT_POSITION
    }
}

impl Position {
    pub fn distance_to(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_within_plane(self) -> bool {
        (PLANE_MIN..=PLANE_MAX).contains(&self.x) && (PLANE_MIN..=PLANE_MAX).contains(&self.y)
    }
}

/// NaN has no meaningful nearest bound, so it lands on the plane midpoint.
pub fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        return PLANE_MIDPOINT;
    }
    value.clamp(PLANE_MIN, PLANE_MAX)
}

/// Each axis is clamped on its own, so a delta that overshoots one bound still
/// moves the avatar along the other axis. Non-finite deltas count as zero.
pub fn apply_delta(position: Position, dx: f32, dy: f32) -> Position {
    let dx = if dx.is_finite() { dx } else { 0.0 };
    let dy = if dy.is_finite() { dy } else { 0.0 };
    Position {
        x: clamp_axis(position.x + dx),
        y: clamp_axis(position.y + dy),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_delta() -> impl Strategy<Value = f32> {
        prop_oneof![
            4 => -120.0f32..120.0,
            1 => any::<f32>(),
            1 => Just(f32::NAN),
            1 => Just(f32::INFINITY),
            1 => Just(f32::NEG_INFINITY),
        ]
    }

    fn arb_position() -> impl Strategy<Value = Position> {
        (PLANE_MIN..=PLANE_MAX, PLANE_MIN..=PLANE_MAX).prop_map(|(x, y)| Position { x, y })
    }

    proptest! {
        #[test]
        fn delta_sequences_stay_in_bounds(
            start in arb_position(),
            deltas in prop::collection::vec((arb_delta(), arb_delta()), 0..64)
        ) {
            let mut position = start;
            for (dx, dy) in deltas {
                position = apply_delta(position, dx, dy);
                prop_assert!(position.is_within_plane(), "escaped plane: {:?}", position);
            }
        }

        #[test]
        fn non_finite_component_leaves_its_axis_alone(
            start in arb_position(),
            dx in -120.0f32..120.0,
            broken in prop_oneof![Just(f32::NAN), Just(f32::INFINITY), Just(f32::NEG_INFINITY)]
        ) {
            let moved = apply_delta(start, dx, broken);
            prop_assert_eq!(moved.y, start.y);
            prop_assert_eq!(moved.x, clamp_axis(start.x + dx));
        }
    }
}
