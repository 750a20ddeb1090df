//! Gesture decoding engine.
//!
//! Touch events flow through the [`classifier`] into the [`accumulator`];
//! on touch-up the finished gesture is handed to the [`resolver`], which
//! consults the action map and the [`modifier`] state and returns the effect
//! to apply to the text-input sink. [`Decoder`] wires these together behind
//! a small set of explicit methods that any event loop can call.

pub mod accumulator;
pub mod classifier;
pub mod modifier;
pub mod resolver;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::DecoderConfig;
use crate::models::{
    measure_keypad, ActionMap, CircleGeometry, Dimension, LayerLevel, LayoutData, LayoutError,
    Orientation, Point, Zone,
};
use crate::services::action_map_store::ActionMapStore;
use crate::services::text_input::{EditorInfo, TextInput};

pub use accumulator::{CompletedGesture, GestureAccumulator, GestureState};
pub use classifier::{classify, sector_for_angle, SectorClassifier};
pub use modifier::ModifierState;
pub use resolver::{dispatch, Effect, Resolution};

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    /// Finger down
    Down,
    /// Finger moved
    Move,
    /// Finger lifted
    Up,
    /// Gesture abandoned by the host (e.g. left the view bounds)
    Cancel,
}

/// A touch sample in keypad-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Event phase
    pub phase: TouchPhase,
    /// Horizontal position
    pub x: f32,
    /// Vertical position (grows downwards)
    pub y: f32,
    /// Host timestamp; carried for traces, not interpreted
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl TouchEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(phase: TouchPhase, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            phase,
            x,
            y,
            timestamp_ms,
        }
    }

    /// Position as a point.
    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// The gesture decoder.
///
/// Single-threaded: one gesture is tracked at a time. The action map lives
/// in a shared [`ActionMapStore`] that other threads may swap; a gesture
/// resolves against the map that was current at its touch-down.
#[derive(Debug)]
pub struct Decoder {
    store: Arc<ActionMapStore>,
    config: DecoderConfig,
    classifier: SectorClassifier,
    accumulator: GestureAccumulator,
    modifiers: ModifierState,
    latched_layer: LayerLevel,
    in_flight: Option<Arc<ActionMap>>,
    emoticon_keyboard: Option<String>,
    editor: EditorInfo,
}

impl Decoder {
    /// Creates a decoder owning a fresh store for `map`.
    #[must_use]
    pub fn new(map: ActionMap, geometry: CircleGeometry, config: &DecoderConfig) -> Self {
        Self::with_store(Arc::new(ActionMapStore::new(map)), geometry, config)
    }

    /// Creates a decoder reading from a shared store.
    #[must_use]
    pub fn with_store(
        store: Arc<ActionMapStore>,
        geometry: CircleGeometry,
        config: &DecoderConfig,
    ) -> Self {
        Self {
            store,
            config: config.clone(),
            classifier: SectorClassifier::new(geometry, config),
            accumulator: GestureAccumulator::new(),
            modifiers: ModifierState::new(),
            latched_layer: LayerLevel::FIRST,
            in_flight: None,
            emoticon_keyboard: None,
            editor: EditorInfo::default(),
        }
    }

    /// Sets the input-method id used by the emoticon keyboard action.
    pub fn set_emoticon_keyboard(&mut self, id: Option<String>) {
        self.emoticon_keyboard = id;
    }

    /// Shared map store.
    #[must_use]
    pub fn store(&self) -> &Arc<ActionMapStore> {
        &self.store
    }

    /// Snapshot of the current action map.
    #[must_use]
    pub fn action_map(&self) -> Arc<ActionMap> {
        self.store.load()
    }

    /// Publishes a new action map. A gesture already in flight keeps the map
    /// it started with.
    pub fn set_action_map(&mut self, map: ActionMap) {
        self.store.replace(map);
    }

    /// Builds and publishes a map from layout data; on error the current map
    /// stays active.
    pub fn load_layout(&mut self, layout: &LayoutData) -> Result<(), LayoutError> {
        self.store.reload(layout).map(|_| ())
    }

    /// Current modifier state.
    #[must_use]
    pub fn modifier_state(&self) -> ModifierState {
        self.modifiers
    }

    /// Replaces the modifier state, e.g. when a host restores a session.
    pub fn set_modifier_state(&mut self, state: ModifierState) {
        self.modifiers = state;
    }

    /// Layer the next gesture starts from.
    #[must_use]
    pub fn latched_layer(&self) -> LayerLevel {
        self.latched_layer
    }

    /// Accumulator state.
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.accumulator.state()
    }

    /// Ring currently used for classification.
    #[must_use]
    pub fn geometry(&self) -> &CircleGeometry {
        self.classifier.geometry()
    }

    /// Replaces the ring.
    pub fn set_geometry(&mut self, geometry: CircleGeometry) {
        self.classifier.set_geometry(geometry);
    }

    /// Recomputes the ring for a new keypad size and returns the measured
    /// keypad dimension.
    pub fn resize(&mut self, width: u32, height: u32, orientation: Orientation) -> Dimension {
        let dimension = measure_keypad(width, height, orientation);
        let geometry = CircleGeometry::for_keypad(dimension, &self.config);
        debug!(
            width = dimension.width,
            height = dimension.height,
            ?orientation,
            outer_radius = geometry.outer_radius,
            "keypad resized"
        );
        self.classifier.set_geometry(geometry);
        dimension
    }

    /// Field the current input session was started on.
    #[must_use]
    pub fn editor(&self) -> &EditorInfo {
        &self.editor
    }

    /// Resets per-session state and shows the keypad suited to the field.
    ///
    /// The field's advertised IME action decides what an enter key does for
    /// the rest of the session.
    pub fn start_input_session(&mut self, editor: EditorInfo, sink: &mut dyn TextInput) {
        self.accumulator.cancel();
        self.in_flight = None;
        self.modifiers.reset();
        self.latched_layer = LayerLevel::FIRST;
        self.editor = editor;
        debug!(
            field = ?editor.field,
            ime_action = %editor.ime_action,
            no_enter_action = editor.no_enter_action,
            "input session started"
        );
        sink.switch_keypad(editor.field.initial_keypad());
    }

    /// Begins a gesture.
    pub fn on_touch_down(&mut self, point: Point) {
        if self.accumulator.is_active() {
            warn!(
                state = %self.accumulator.state(),
                "touch down during active gesture, restarting"
            );
            self.accumulator.cancel();
        }
        self.in_flight = Some(self.store.load());
        self.accumulator.touch_down(self.classifier.classify(point));
    }

    /// Feeds one movement sample.
    pub fn on_touch_move(&mut self, point: Point) {
        let Some(previous) = self.accumulator.last_zone() else {
            return;
        };
        let zone = self.classifier.classify_from(point, previous);
        self.accumulator.advance(zone);
    }

    /// Ends the gesture, resolves it and applies the effect to `sink`.
    ///
    /// Returns `None` if no gesture was active.
    pub fn on_touch_up(&mut self, point: Point, sink: &mut dyn TextInput) -> Option<Resolution> {
        if !self.accumulator.is_active() {
            warn!("touch up without a gesture in progress");
            return None;
        }
        self.on_touch_move(point);

        let gesture = self.accumulator.touch_up()?;
        let map = self.in_flight.take().unwrap_or_else(|| self.store.load());

        let base = if gesture.sequence.is_some() {
            std::mem::take(&mut self.latched_layer)
        } else {
            self.latched_layer
        };
        let resolution = dispatch(
            &map,
            gesture.sequence.as_ref(),
            gesture.loops,
            base,
            &self.editor,
            &mut self.modifiers,
        );

        if let Effect::LatchLayer { layer } = resolution.effect {
            self.latched_layer = layer.clamp_to(map.total_layers());
        }
        resolution
            .effect
            .apply(sink, self.emoticon_keyboard.as_deref());
        Some(resolution)
    }

    /// Abandons the gesture; nothing is dispatched.
    pub fn on_touch_cancel(&mut self) {
        self.accumulator.cancel();
        self.in_flight = None;
    }

    /// Routes one touch event to the matching `on_touch_*` method.
    pub fn handle(&mut self, event: &TouchEvent, sink: &mut dyn TextInput) -> Option<Resolution> {
        match event.phase {
            TouchPhase::Down => {
                self.on_touch_down(event.point());
                None
            }
            TouchPhase::Move => {
                self.on_touch_move(event.point());
                None
            }
            TouchPhase::Up => self.on_touch_up(event.point(), sink),
            TouchPhase::Cancel => {
                self.on_touch_cancel();
                None
            }
        }
    }

    /// Zone of a point under the current ring, ignoring gesture state.
    #[must_use]
    pub fn classify(&self, point: Point) -> Zone {
        self.classifier.classify(point)
    }
}
