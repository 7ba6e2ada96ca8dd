use serde::Serialize;

use super::input::Direction;
use super::session::{Environment, SessionState};
use crate::world::{AmbientState, Feature, Position, TaskId, TransitionStyle, ZoneId, ZoneKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneView {
    pub id: ZoneId,
    pub name: String,
    pub kind: ZoneKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyView {
    pub id: String,
    pub label: String,
    pub position: Position,
    pub distance: f32,
}

/// Per-tick snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub input_active: bool,
    pub position: Position,
    pub moving: bool,
    pub direction: Option<Direction>,
    pub zone: Option<ZoneView>,
    pub selected_feature: Option<Feature>,
    pub nearby: Option<NearbyView>,
    pub ambient: AmbientState,
    pub pending_transition: Option<TransitionStyle>,
    pub tasks: Vec<TaskId>,
    pub completion_ratio: f32,
}

impl Frame {
    pub fn capture(env: &Environment, state: &SessionState) -> Self {
        let zone = state.current_zone().and_then(|id| env.zones().zone(id));
        let selected_feature = zone
            .zip(state.selected_feature())
            .and_then(|(zone, index)| zone.features.get(index).cloned());
        let nearby = state.nearby().map(|nearby| NearbyView {
            id: nearby.entity_id.to_string(),
            label: state
                .entities()
                .get(nearby.entity_index)
                .map(|entity| entity.label.clone())
                .unwrap_or_default(),
            position: nearby.position,
            distance: nearby.distance,
        });

        Self {
            input_active: state.input_scope_open(),
            position: state.position(),
            moving: state.movement().is_moving(),
            direction: state.movement().direction(),
            zone: zone.map(|zone| ZoneView {
                id: zone.id.clone(),
                name: zone.name.clone(),
                kind: zone.kind.clone(),
            }),
            selected_feature,
            nearby,
            ambient: state.ambient(),
            pending_transition: state.pending_transition().cloned(),
            tasks: state.tracker().completed().to_vec(),
            completion_ratio: state.tracker().completion_ratio(),
        }
    }
}
