use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::zone::{Zone, ZoneId, ZoneKind};

pub const GENERIC_TRANSITION_STYLE: &str = "fade";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Accepts `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(raw: &str) -> Option<Self> {
        let digits = raw.strip_prefix('#').unwrap_or(raw);
        if digits.len() != 6 || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::parse_hex(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid color '{raw}', expected #rrggbb"))
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PulseRate {
    #[default]
    Slow,
    Medium,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbientState {
    pub primary_color: Rgb,
    pub secondary_color: Rgb,
    pub intensity: f32,
    pub pulse_rate: PulseRate,
}

impl AmbientState {
    pub fn new(primary: Rgb, secondary: Rgb, intensity: f32, pulse_rate: PulseRate) -> Self {
        Self {
            primary_color: primary,
            secondary_color: secondary,
            intensity: clamp_intensity(intensity),
            pulse_rate,
        }
    }
}

impl Default for AmbientState {
    fn default() -> Self {
        Self::new(
            Rgb::new(0x3b, 0x82, 0xf6),
            Rgb::new(0x8b, 0x5c, 0xf6),
            0.6,
            PulseRate::Slow,
        )
    }
}

fn clamp_intensity(intensity: f32) -> f32 {
    if !intensity.is_finite() {
        return 0.0;
    }
    intensity.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionStyle(pub String);

impl TransitionStyle {
    pub fn new(style: impl Into<String>) -> Self {
        Self(style.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransitionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn transition_key(from: &ZoneKind, to: &ZoneKind) -> String {
    format!("{}_{}", from.as_str(), to.as_str())
}

/// Lighting lookup: zone id, then zone kind, then the hard default.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientTable {
    by_zone: HashMap<ZoneId, AmbientState>,
    by_kind: HashMap<ZoneKind, AmbientState>,
    fallback: AmbientState,
    transitions: HashMap<String, TransitionStyle>,
    generic_transition: TransitionStyle,
}

impl Default for AmbientTable {
    fn default() -> Self {
        Self {
            by_zone: HashMap::new(),
            by_kind: HashMap::new(),
            fallback: AmbientState::default(),
            transitions: HashMap::new(),
            generic_transition: TransitionStyle::new(GENERIC_TRANSITION_STYLE),
        }
    }
}

impl AmbientTable {
    pub fn with_fallback(mut self, fallback: AmbientState) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_zone(mut self, id: ZoneId, state: AmbientState) -> Self {
        self.by_zone.insert(id, state);
        self
    }

    pub fn with_kind(mut self, kind: ZoneKind, state: AmbientState) -> Self {
        self.by_kind.insert(kind, state);
        self
    }

    pub fn with_transition(
        self,
        from: &ZoneKind,
        to: &ZoneKind,
        style: TransitionStyle,
    ) -> Self {
        self.with_transition_key(transition_key(from, to), style)
    }

    /// Registers a style under an already joined `"{from}_{to}"` key.
    pub fn with_transition_key(mut self, key: impl Into<String>, style: TransitionStyle) -> Self {
        self.transitions.insert(key.into(), style);
        self
    }

    pub fn with_generic_transition(mut self, style: TransitionStyle) -> Self {
        self.generic_transition = style;
        self
    }

    pub fn fallback(&self) -> AmbientState {
        self.fallback
    }

    pub fn resolve(&self, zone: Option<&Zone>) -> AmbientState {
        let Some(zone) = zone else {
            return self.fallback;
        };
        self.by_zone
            .get(&zone.id)
            .or_else(|| self.by_kind.get(&zone.kind))
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Only a change of kind between two real zones produces a transition.
    pub fn transition_style(
        &self,
        from: Option<&Zone>,
        to: Option<&Zone>,
    ) -> Option<TransitionStyle> {
        let (from, to) = (from?, to?);
        if from.kind == to.kind {
            return None;
        }
        let style = self
            .transitions
            .get(&transition_key(&from.kind, &to.kind))
            .unwrap_or(&self.generic_transition);
        Some(style.clone())
    }
}
