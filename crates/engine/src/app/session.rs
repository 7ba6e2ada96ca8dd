use tracing::{debug, info, trace};

use super::config::EngineConfig;
use super::frame::Frame;
use super::input::{ContainerSize, InputAction, PixelPoint};
use super::movement::MovementState;
use crate::world::{
    resolve_nearby, AmbientState, AmbientTable, EntityKey, EntityRecord, FloorLayout,
    InteractionTracker, NearbyEntity, Position, TaskId, TransitionStyle, ZoneId, ZoneIndex,
};

/// Static inputs of one environment: zones, lighting table and tunables.
#[derive(Debug, Clone)]
pub struct Environment {
    zones: ZoneIndex,
    ambient: AmbientTable,
    config: EngineConfig,
}

impl Environment {
    pub fn new(zones: ZoneIndex, ambient: AmbientTable, config: EngineConfig) -> Self {
        Self {
            zones: zones.with_policy(config.zone_policy),
            ambient,
            config,
        }
    }

    pub fn zones(&self) -> &ZoneIndex {
        &self.zones
    }

    pub fn ambient(&self) -> &AmbientTable {
        &self.ambient
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SelectAvatar,
    DeselectAvatar,
    EnterEnvironment,
    ExitEnvironment,
    /// Scene teardown; detaches input like deselect and exit together.
    Unmount,
    KeyDown {
        action: InputAction,
    },
    KeyUp {
        action: InputAction,
        now_ms: u64,
    },
    PointerDown {
        pointer: PixelPoint,
        container: ContainerSize,
    },
    PointerMove {
        pointer: PixelPoint,
        container: ContainerSize,
    },
    PointerUp,
    Tick {
        now_ms: u64,
    },
    ReplaceEntities(Vec<EntityRecord>),
    ReportTask(TaskId),
    SelectFeature(Option<usize>),
    AcknowledgeTransition,
    ResetTour,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionNotice {
    InputScopeOpened,
    InputScopeClosed,
    MovementStopped,
    ZoneChanged {
        from: Option<ZoneId>,
        to: Option<ZoneId>,
    },
    AmbientChanged(AmbientState),
    TransitionQueued(TransitionStyle),
    FeaturedZoneEntered {
        zone: ZoneId,
        feature_count: usize,
    },
    NearbyChanged {
        from: Option<EntityKey>,
        to: Option<EntityKey>,
    },
    TaskCompleted(TaskId),
    TourReset,
}

/// Everything the presentation layer renders, as one value.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub(crate) avatar_selected: bool,
    pub(crate) environment_active: bool,
    pub(crate) position: Position,
    pub(crate) movement: MovementState,
    pub(crate) entities: Vec<EntityRecord>,
    pub(crate) layout: FloorLayout,
    pub(crate) current_zone: Option<ZoneId>,
    pub(crate) selected_feature: Option<usize>,
    pub(crate) nearby: Option<NearbyEntity>,
    pub(crate) ambient: AmbientState,
    pub(crate) pending_transition: Option<TransitionStyle>,
    pub(crate) tracker: InteractionTracker,
}

impl SessionState {
    pub fn new(env: &Environment) -> Self {
        Self {
            avatar_selected: false,
            environment_active: false,
            position: Position::default(),
            movement: MovementState::default(),
            entities: Vec::new(),
            layout: FloorLayout::default(),
            current_zone: None,
            selected_feature: None,
            nearby: None,
            ambient: env.ambient.fallback(),
            pending_transition: None,
            tracker: InteractionTracker::default(),
        }
    }

    /// Input listeners are attached only while both conditions hold.
    pub fn input_scope_open(&self) -> bool {
        self.avatar_selected && self.environment_active
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn movement(&self) -> &MovementState {
        &self.movement
    }

    pub fn entities(&self) -> &[EntityRecord] {
        &self.entities
    }

    pub fn layout(&self) -> &FloorLayout {
        &self.layout
    }

    pub fn current_zone(&self) -> Option<&ZoneId> {
        self.current_zone.as_ref()
    }

    pub fn selected_feature(&self) -> Option<usize> {
        self.selected_feature
    }

    pub fn nearby(&self) -> Option<&NearbyEntity> {
        self.nearby.as_ref()
    }

    pub fn ambient(&self) -> AmbientState {
        self.ambient
    }

    pub fn pending_transition(&self) -> Option<&TransitionStyle> {
        self.pending_transition.as_ref()
    }

    pub fn tracker(&self) -> &InteractionTracker {
        &self.tracker
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: SessionState,
    pub notices: Vec<SessionNotice>,
}

/// Pure transition function. Position updates are applied (and clamped)
/// before any derived value is recomputed from them.
pub fn reduce(env: &Environment, mut state: SessionState, event: SessionEvent) -> Step {
    let mut notices = Vec::new();
    let scope_was_open = state.input_scope_open();

    match event {
        SessionEvent::SelectAvatar => state.avatar_selected = true,
        SessionEvent::DeselectAvatar => state.avatar_selected = false,
        SessionEvent::EnterEnvironment => state.environment_active = true,
        SessionEvent::ExitEnvironment => state.environment_active = false,
        SessionEvent::Unmount => {
            state.avatar_selected = false;
            state.environment_active = false;
        }
        SessionEvent::KeyDown { action } => {
            if scope_was_open {
                let next = state
                    .movement
                    .press(action, state.position, &env.config.movement);
                trace!(?action, x = next.x, y = next.y, "key_step");
                apply_movement(&mut state, next, &mut notices);
            } else {
                trace!(?action, "key_down_ignored_outside_input_scope");
            }
        }
        SessionEvent::KeyUp { action, now_ms } => {
            if scope_was_open {
                state.movement.release(action, now_ms, &env.config.movement);
            }
        }
        SessionEvent::PointerDown { pointer, container } => {
            if scope_was_open {
                state.movement.drag_start(
                    pointer,
                    container,
                    state.position,
                    &env.config.movement,
                );
            }
        }
        SessionEvent::PointerMove { pointer, container } => {
            if scope_was_open {
                if let Some(next) = state.movement.drag_move(pointer, container, state.position) {
                    trace!(x = next.x, y = next.y, "drag_step");
                    apply_movement(&mut state, next, &mut notices);
                }
            }
        }
        SessionEvent::PointerUp => {
            if state.movement.drag_end() {
                notices.push(SessionNotice::MovementStopped);
            }
        }
        SessionEvent::Tick { now_ms } => {
            if state.movement.tick(now_ms) {
                notices.push(SessionNotice::MovementStopped);
            }
        }
        SessionEvent::ReplaceEntities(entities) => {
            state.layout = FloorLayout::build(&entities, &env.zones);
            state.entities = entities;
        }
        SessionEvent::ReportTask(task) => record_task(&mut state, task, &mut notices),
        SessionEvent::SelectFeature(index) => select_feature(env, &mut state, index),
        SessionEvent::AcknowledgeTransition => state.pending_transition = None,
        SessionEvent::ResetTour => {
            state.tracker.reset();
            notices.push(SessionNotice::TourReset);
        }
    }

    let scope_is_open = state.input_scope_open();
    if scope_was_open != scope_is_open {
        state.movement.reset();
        state.position = Position::default();
        notices.push(if scope_is_open {
            SessionNotice::InputScopeOpened
        } else {
            SessionNotice::InputScopeClosed
        });
    }

    sync_derived(env, &mut state, &mut notices);
    Step { state, notices }
}

fn apply_movement(state: &mut SessionState, next: Position, notices: &mut Vec<SessionNotice>) {
    state.position = next;
    record_task(state, TaskId::Move, notices);
}

fn record_task(state: &mut SessionState, task: TaskId, notices: &mut Vec<SessionNotice>) {
    if state.tracker.record(task) {
        notices.push(SessionNotice::TaskCompleted(task));
    }
}

fn select_feature(env: &Environment, state: &mut SessionState, index: Option<usize>) {
    let Some(index) = index else {
        state.selected_feature = None;
        return;
    };
    let feature_count = state
        .current_zone
        .as_ref()
        .and_then(|id| env.zones.zone(id))
        .map_or(0, |zone| zone.features.len());
    if index < feature_count {
        state.selected_feature = Some(index);
    } else {
        trace!(index, feature_count, "feature_selection_out_of_range");
    }
}

/// Recomputes zone, ambient, transition and nearby entity from the current
/// position. With the input scope closed everything falls back to defaults.
fn sync_derived(env: &Environment, state: &mut SessionState, notices: &mut Vec<SessionNotice>) {
    let scope_open = state.input_scope_open();
    let next_zone = if scope_open {
        env.zones.current_zone(state.position)
    } else {
        None
    };
    let next_zone_id = next_zone.map(|zone| zone.id.clone());

    if next_zone_id != state.current_zone {
        let previous_zone = state.current_zone.as_ref().and_then(|id| env.zones.zone(id));
        let transition = env.ambient.transition_style(previous_zone, next_zone);

        notices.push(SessionNotice::ZoneChanged {
            from: state.current_zone.take(),
            to: next_zone_id.clone(),
        });
        state.current_zone = next_zone_id;
        state.selected_feature = None;

        let ambient = env.ambient.resolve(next_zone);
        if ambient != state.ambient {
            state.ambient = ambient;
            notices.push(SessionNotice::AmbientChanged(ambient));
        }

        if let Some(style) = transition {
            state.pending_transition = Some(style.clone());
            notices.push(SessionNotice::TransitionQueued(style));
        }

        if let Some(zone) = next_zone {
            if zone.has_features() && !state.tracker.has_completed(TaskId::VisitSection) {
                notices.push(SessionNotice::FeaturedZoneEntered {
                    zone: zone.id.clone(),
                    feature_count: zone.features.len(),
                });
                record_task(state, TaskId::VisitSection, notices);
            }
        }
    }

    if !scope_open {
        state.pending_transition = None;
    }

    let next_nearby = if scope_open {
        resolve_nearby(state.position, &state.layout, env.config.proximity)
    } else {
        None
    };
    let previous_id = state.nearby.as_ref().map(|nearby| &nearby.entity_id);
    let next_id = next_nearby.as_ref().map(|nearby| &nearby.entity_id);
    if previous_id != next_id {
        notices.push(SessionNotice::NearbyChanged {
            from: previous_id.cloned(),
            to: next_id.cloned(),
        });
        record_task(state, TaskId::ViewProduct, notices);
    }
    state.nearby = next_nearby;
}

/// Owns one environment and its state and feeds events through [`reduce`].
#[derive(Debug, Clone)]
pub struct Session {
    env: Environment,
    state: SessionState,
}

impl Session {
    pub fn new(env: Environment) -> Self {
        let state = SessionState::new(&env);
        Self { env, state }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dispatch(&mut self, event: SessionEvent) -> Vec<SessionNotice> {
        let state = std::mem::replace(&mut self.state, SessionState::new(&self.env));
        let Step { state, notices } = reduce(&self.env, state, event);
        self.state = state;
        for notice in &notices {
            log_notice(notice);
        }
        notices
    }

    pub fn frame(&self) -> Frame {
        Frame::capture(&self.env, &self.state)
    }

    /// Hands the pending transition style to the caller exactly once.
    pub fn take_transition(&mut self) -> Option<TransitionStyle> {
        let style = self.state.pending_transition.clone()?;
        self.dispatch(SessionEvent::AcknowledgeTransition);
        Some(style)
    }

    pub fn shutdown(&mut self) -> Vec<SessionNotice> {
        self.dispatch(SessionEvent::Unmount)
    }
}

fn log_notice(notice: &SessionNotice) {
    match notice {
        SessionNotice::InputScopeOpened => info!("input_scope_opened"),
        SessionNotice::InputScopeClosed => info!("input_scope_closed"),
        SessionNotice::TourReset => info!("tour_reset"),
        SessionNotice::MovementStopped => trace!("movement_stopped"),
        SessionNotice::ZoneChanged { from, to } => debug!(
            from = from.as_ref().map(ZoneId::as_str),
            to = to.as_ref().map(ZoneId::as_str),
            "zone_changed"
        ),
        SessionNotice::AmbientChanged(ambient) => debug!(
            primary = %ambient.primary_color,
            intensity = ambient.intensity,
            pulse = ?ambient.pulse_rate,
            "ambient_changed"
        ),
        SessionNotice::TransitionQueued(style) => debug!(style = %style, "transition_queued"),
        SessionNotice::FeaturedZoneEntered {
            zone,
            feature_count,
        } => debug!(zone = %zone, feature_count, "featured_zone_entered"),
        SessionNotice::NearbyChanged { from, to } => debug!(
            from = from.as_ref().map(EntityKey::as_str),
            to = to.as_ref().map(EntityKey::as_str),
            "nearby_entity_changed"
        ),
        SessionNotice::TaskCompleted(task) => debug!(task = %task, "task_completed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{
        test_zone, Feature, PulseRate, Rgb, ZoneKind, DEFAULT_POSITION, GENERIC_TRANSITION_STYLE,
    };

    fn category_ambient() -> AmbientState {
        AmbientState::new(
            Rgb::new(0xec, 0x48, 0x99),
            Rgb::new(0xf4, 0x72, 0xb6),
            0.9,
            PulseRate::Fast,
        )
    }

    /// Entrance around the spawn point (y 65..85), a clothing zone straight up
    /// (y 25..60), and a featured lounge to the right of the entrance.
    fn environment() -> Environment {
        let entrance = test_zone("entrance", "entrance", 50.0, 75.0, 30.0, 20.0);
        let mut fashion = test_zone("fashion", "category", 50.0, 42.5, 40.0, 35.0);
        fashion.category = Some("clothing".to_string());
        let mut lounge = test_zone("lounge", "entrance", 80.0, 75.0, 20.0, 20.0);
        lounge.features = vec![
            Feature {
                name: "Try-on mirror".to_string(),
                description: None,
            },
            Feature {
                name: "Stylist".to_string(),
                description: Some("Book a session".to_string()),
            },
        ];
        let ambient = AmbientTable::default()
            .with_kind(ZoneKind::new("category"), category_ambient())
            .with_transition(
                &ZoneKind::new("entrance"),
                &ZoneKind::new("category"),
                TransitionStyle::new("portal"),
            );
        Environment::new(
            ZoneIndex::new(vec![entrance, fashion, lounge]),
            ambient,
            EngineConfig::default(),
        )
    }

    fn active_session() -> Session {
        let mut session = Session::new(environment());
        session.dispatch(SessionEvent::EnterEnvironment);
        session.dispatch(SessionEvent::SelectAvatar);
        session
    }

    fn press(session: &mut Session, action: InputAction, times: usize) -> Vec<SessionNotice> {
        let mut notices = Vec::new();
        for _ in 0..times {
            notices.extend(session.dispatch(SessionEvent::KeyDown { action }));
        }
        notices
    }

    #[test]
    fn input_is_ignored_until_scope_opens() {
        let mut session = Session::new(environment());
        session.dispatch(SessionEvent::EnterEnvironment);
        let notices = press(&mut session, InputAction::MoveLeft, 1);
        assert!(notices.is_empty());
        assert_eq!(session.state().position(), DEFAULT_POSITION);
        assert!(session.state().current_zone().is_none());
    }

    #[test]
    fn opening_scope_resolves_spawn_zone() {
        let mut session = Session::new(environment());
        session.dispatch(SessionEvent::SelectAvatar);
        let notices = session.dispatch(SessionEvent::EnterEnvironment);
        assert!(notices.contains(&SessionNotice::InputScopeOpened));
        assert!(notices.contains(&SessionNotice::ZoneChanged {
            from: None,
            to: Some(ZoneId::new("entrance")),
        }));
        assert!(session.state().pending_transition().is_none());
        assert_eq!(session.state().ambient(), AmbientState::default());
    }

    #[test]
    fn entering_category_zone_switches_ambient_and_queues_transition() {
        let mut session = active_session();
        let notices = press(&mut session, InputAction::MoveUp, 3);

        assert_eq!(session.state().position(), Position { x: 50.0, y: 55.0 });
        assert_eq!(session.state().current_zone(), Some(&ZoneId::new("fashion")));
        assert_eq!(session.state().ambient(), category_ambient());
        assert!(notices.contains(&SessionNotice::TransitionQueued(TransitionStyle::new("portal"))));

        assert_eq!(session.take_transition(), Some(TransitionStyle::new("portal")));
        assert!(session.take_transition().is_none());
    }

    #[test]
    fn same_kind_zone_change_has_no_transition() {
        let mut session = active_session();
        // entrance -> lounge, both of kind "entrance"
        press(&mut session, InputAction::MoveRight, 4);
        assert_eq!(session.state().current_zone(), Some(&ZoneId::new("lounge")));
        assert!(session.state().pending_transition().is_none());
    }

    #[test]
    fn featured_zone_hint_fires_once() {
        let mut session = active_session();
        let notices = press(&mut session, InputAction::MoveRight, 4);
        assert!(notices.contains(&SessionNotice::FeaturedZoneEntered {
            zone: ZoneId::new("lounge"),
            feature_count: 2,
        }));
        assert!(session.state().tracker().has_completed(TaskId::VisitSection));

        press(&mut session, InputAction::MoveLeft, 4);
        let again = press(&mut session, InputAction::MoveRight, 4);
        assert!(!again
            .iter()
            .any(|notice| matches!(notice, SessionNotice::FeaturedZoneEntered { .. })));
    }

    #[test]
    fn leaving_all_zones_resets_to_defaults() {
        let mut session = active_session();
        press(&mut session, InputAction::MoveRight, 4);
        session.dispatch(SessionEvent::SelectFeature(Some(1)));
        assert_eq!(session.state().selected_feature(), Some(1));

        // lounge ends at y=85; the plane bottom is 90
        let notices = press(&mut session, InputAction::MoveDown, 4);
        assert_eq!(session.state().position().y, 90.0);
        assert!(session.state().current_zone().is_none());
        assert!(session.state().selected_feature().is_none());
        assert_eq!(session.state().ambient(), AmbientState::default());
        assert!(notices.contains(&SessionNotice::ZoneChanged {
            from: Some(ZoneId::new("lounge")),
            to: None,
        }));
    }

    #[test]
    fn feature_selection_requires_valid_index() {
        let mut session = active_session();
        session.dispatch(SessionEvent::SelectFeature(Some(0)));
        assert!(session.state().selected_feature().is_none());

        press(&mut session, InputAction::MoveRight, 4);
        session.dispatch(SessionEvent::SelectFeature(Some(5)));
        assert!(session.state().selected_feature().is_none());
        session.dispatch(SessionEvent::SelectFeature(Some(0)));
        assert_eq!(session.state().selected_feature(), Some(0));
        session.dispatch(SessionEvent::SelectFeature(None));
        assert!(session.state().selected_feature().is_none());
    }

    #[test]
    fn moving_near_product_records_view_product_once() {
        let mut session = active_session();
        session.dispatch(SessionEvent::ReplaceEntities(vec![
            EntityRecord::new("jacket", "clothing").with_label("Rain jacket"),
        ]));
        assert!(session.state().nearby().is_none());

        // single cell at the fashion zone center (50, 42.5)
        let notices = press(&mut session, InputAction::MoveUp, 4);
        let nearby = session.state().nearby().expect("nearby");
        assert_eq!(nearby.entity_id.as_str(), "jacket");
        assert_eq!(nearby.position, Position { x: 50.0, y: 42.5 });
        assert!(notices.contains(&SessionNotice::TaskCompleted(TaskId::ViewProduct)));

        let later = press(&mut session, InputAction::MoveDown, 4);
        assert!(session.state().nearby().is_none());
        assert!(!later.contains(&SessionNotice::TaskCompleted(TaskId::ViewProduct)));
    }

    #[test]
    fn repeated_moves_record_move_once() {
        let mut session = active_session();
        let notices = press(&mut session, InputAction::MoveLeft, 2);
        let completions = notices
            .iter()
            .filter(|notice| **notice == SessionNotice::TaskCompleted(TaskId::Move))
            .count();
        assert_eq!(completions, 1);
        assert_eq!(session.state().tracker().completed(), &[TaskId::Move]);
        assert!((session.state().tracker().completion_ratio() - 1.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn deselect_resets_position_and_detaches_input() {
        let mut session = active_session();
        press(&mut session, InputAction::MoveUp, 3);
        session.dispatch(SessionEvent::PointerDown {
            pointer: PixelPoint::new(400.0, 330.0),
            container: ContainerSize::new(800.0, 600.0),
        });
        assert!(session.state().movement().is_dragging());

        let notices = session.dispatch(SessionEvent::DeselectAvatar);
        assert!(notices.contains(&SessionNotice::InputScopeClosed));
        assert_eq!(session.state().position(), DEFAULT_POSITION);
        assert!(!session.state().movement().is_dragging());
        assert!(!session.state().movement().is_moving());
        assert!(session.state().current_zone().is_none());
        assert!(session.state().pending_transition().is_none());

        let ignored = session.dispatch(SessionEvent::PointerMove {
            pointer: PixelPoint::new(300.0, 330.0),
            container: ContainerSize::new(800.0, 600.0),
        });
        assert!(ignored.is_empty());
        assert_eq!(session.state().position(), DEFAULT_POSITION);
    }

    #[test]
    fn reentering_environment_respawns_at_default() {
        let mut session = active_session();
        press(&mut session, InputAction::MoveLeft, 3);
        session.dispatch(SessionEvent::ExitEnvironment);
        session.dispatch(SessionEvent::EnterEnvironment);
        assert_eq!(session.state().position(), DEFAULT_POSITION);
        assert_eq!(session.state().current_zone(), Some(&ZoneId::new("entrance")));
    }

    #[test]
    fn shutdown_closes_scope() {
        let mut session = active_session();
        let notices = session.shutdown();
        assert!(notices.contains(&SessionNotice::InputScopeClosed));
        assert!(!session.state().input_scope_open());
    }

    #[test]
    fn stop_timer_clears_moving_flag() {
        let mut session = active_session();
        press(&mut session, InputAction::MoveLeft, 1);
        session.dispatch(SessionEvent::KeyUp {
            action: InputAction::MoveLeft,
            now_ms: 100,
        });
        assert!(session.state().movement().is_moving());
        let notices = session.dispatch(SessionEvent::Tick { now_ms: 250 });
        assert!(notices.contains(&SessionNotice::MovementStopped));
        assert!(!session.state().movement().is_moving());
    }

    #[test]
    fn pointer_up_with_key_held_keeps_moving() {
        let mut session = active_session();
        press(&mut session, InputAction::MoveLeft, 1);
        let container = ContainerSize::new(800.0, 600.0);
        session.dispatch(SessionEvent::PointerDown {
            pointer: PixelPoint::new(360.0, 420.0),
            container,
        });
        session.dispatch(SessionEvent::PointerMove {
            pointer: PixelPoint::new(368.0, 420.0),
            container,
        });

        let notices = session.dispatch(SessionEvent::PointerUp);
        assert!(!notices.contains(&SessionNotice::MovementStopped));
        assert!(session.state().movement().is_moving());
        assert!(!session.state().movement().is_dragging());

        session.dispatch(SessionEvent::KeyUp {
            action: InputAction::MoveLeft,
            now_ms: 1_000,
        });
        let notices = session.dispatch(SessionEvent::Tick { now_ms: 1_150 });
        assert!(notices.contains(&SessionNotice::MovementStopped));
    }

    #[test]
    fn reset_tour_clears_tasks_and_rearms_hint() {
        let mut session = active_session();
        press(&mut session, InputAction::MoveRight, 4);
        session.dispatch(SessionEvent::ReportTask(TaskId::AddToCart));
        assert_eq!(session.state().tracker().completed().len(), 3);

        let notices = session.dispatch(SessionEvent::ResetTour);
        assert!(notices.contains(&SessionNotice::TourReset));
        assert!(session.state().tracker().completed().is_empty());

        press(&mut session, InputAction::MoveLeft, 4);
        let again = press(&mut session, InputAction::MoveRight, 4);
        assert!(again
            .iter()
            .any(|notice| matches!(notice, SessionNotice::FeaturedZoneEntered { .. })));
    }

    #[test]
    fn unregistered_kind_pair_uses_generic_transition() {
        let mut session = active_session();
        press(&mut session, InputAction::MoveUp, 3);
        session.take_transition();
        // fashion (category) -> entrance
        press(&mut session, InputAction::MoveDown, 3);
        assert_eq!(
            session.take_transition(),
            Some(TransitionStyle::new(GENERIC_TRANSITION_STYLE))
        );
    }

    #[test]
    fn reduce_is_deterministic_for_identical_inputs() {
        let env = environment();
        let events = vec![
            SessionEvent::SelectAvatar,
            SessionEvent::EnterEnvironment,
            SessionEvent::KeyDown {
                action: InputAction::MoveUp,
            },
            SessionEvent::KeyDown {
                action: InputAction::MoveUp,
            },
            SessionEvent::KeyDown {
                action: InputAction::MoveUp,
            },
        ];
        let run = || {
            events
                .iter()
                .cloned()
                .fold(SessionState::new(&env), |state, event| {
                    reduce(&env, state, event).state
                })
        };
        assert_eq!(run(), run());
    }
}
