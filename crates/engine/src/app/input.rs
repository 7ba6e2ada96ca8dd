use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

const ACTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub(crate) fn any_down(&self) -> bool {
        self.down.iter().any(|down| *down)
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
        }
    }

    /// Unit step in plane space; up is toward smaller `y`.
    pub const fn unit_vector(self) -> (f32, f32) {
        match self {
            InputAction::MoveUp => (0.0, -1.0),
            InputAction::MoveDown => (0.0, 1.0),
            InputAction::MoveLeft => (-1.0, 0.0),
            InputAction::MoveRight => (1.0, 0.0),
        }
    }

    pub const fn direction(self) -> Direction {
        match self {
            InputAction::MoveUp => Direction::Up,
            InputAction::MoveDown => Direction::Down,
            InputAction::MoveLeft => Direction::Left,
            InputAction::MoveRight => Direction::Right,
        }
    }
}

impl FromStr for InputAction {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "up" | "arrowup" => Ok(Self::MoveUp),
            "down" | "arrowdown" => Ok(Self::MoveDown),
            "left" | "arrowleft" => Ok(Self::MoveLeft),
            "right" | "arrowright" => Ok(Self::MoveRight),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

/// Human-readable heading shown next to the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// The dominant axis picks the label; equal magnitudes read as a diagonal.
    pub fn from_delta(dx: f32, dy: f32) -> Option<Self> {
        let (ax, ay) = (dx.abs(), dy.abs());
        if ax == 0.0 && ay == 0.0 {
            return None;
        }
        let horizontal = if dx < 0.0 { Self::Left } else { Self::Right };
        let vertical = if dy < 0.0 { Self::Up } else { Self::Down };
        if ax > ay {
            return Some(horizontal);
        }
        if ay > ax {
            return Some(vertical);
        }
        Some(match (vertical, horizontal) {
            (Self::Up, Self::Left) => Self::UpLeft,
            (Self::Up, _) => Self::UpRight,
            (_, Self::Left) => Self::DownLeft,
            _ => Self::DownRight,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rendered size of the floor-plan container, in pixels, as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}
