//! Input state management

use crate::event::InputEvent;
use crate::event_bus::EventBus;
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Radians of orbit per pixel of pointer drag
const DEFAULT_ORBIT_SENSITIVITY: f32 = 0.005;

/// Turns raw key and pointer input into queued [`InputEvent`]s.
///
/// Key presses only produce an event on the down edge, so holding a key
/// cannot fire the same trigger every frame.
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Trigger map: trigger symbol -> list of key bindings
    trigger_map: HashMap<String, Vec<KeyCode>>,

    /// Whether a pointer drag is in progress
    dragging: bool,
    /// Last pointer position in window pixels
    pointer_position: Option<(f64, f64)>,
    /// Radians of orbit per pixel of drag
    pub orbit_sensitivity: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            trigger_map: Self::default_trigger_map(),
            dragging: false,
            pointer_position: None,
            orbit_sensitivity: DEFAULT_ORBIT_SENSITIVITY,
        }
    }

    fn default_trigger_map() -> HashMap<String, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert("left".into(), vec![KeyCode::Digit1]);
        map.insert("right".into(), vec![KeyCode::Digit2]);
        map
    }

    /// Bind a trigger symbol to one or more keys, replacing earlier bindings
    pub fn bind_trigger(&mut self, trigger: impl Into<String>, keys: Vec<KeyCode>) {
        self.trigger_map.insert(trigger.into(), keys);
    }

    /// Drop every binding, including the defaults
    pub fn clear_bindings(&mut self) {
        self.trigger_map.clear();
    }

    /// Trigger symbols bound to `key`, sorted for stable event order
    pub fn triggers_for(&self, key: KeyCode) -> Vec<String> {
        let mut triggers: Vec<String> = self
            .trigger_map
            .iter()
            .filter(|(_, keys)| keys.contains(&key))
            .map(|(trigger, _)| trigger.clone())
            .collect();
        triggers.sort();
        triggers
    }

    /// Trigger symbols with at least one key bound, sorted
    pub fn bound_triggers(&self) -> Vec<String> {
        let mut triggers: Vec<String> = self
            .trigger_map
            .iter()
            .filter(|(_, keys)| !keys.is_empty())
            .map(|(trigger, _)| trigger.clone())
            .collect();
        triggers.sort();
        triggers
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode, bus: &mut EventBus) {
        if !self.keys_down.insert(key) {
            return;
        }
        for trigger in self.triggers_for(key) {
            tracing::trace!("key {:?} -> trigger '{}'", key, trigger);
            bus.push(InputEvent::KeyTrigger(trigger));
        }
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Is a key currently held down?
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Pointer pressed on the viewport: the user takes the camera
    pub fn process_pointer_down(&mut self, bus: &mut EventBus) {
        if !self.dragging {
            self.dragging = true;
            bus.push(InputEvent::InteractionStart);
        }
    }

    /// Pointer released: camera control is handed back
    pub fn process_pointer_up(&mut self, bus: &mut EventBus) {
        if self.dragging {
            self.dragging = false;
            bus.push(InputEvent::InteractionEnd);
        }
    }

    /// Pointer moved to window position (x, y)
    pub fn process_pointer_move(&mut self, x: f64, y: f64, bus: &mut EventBus) {
        if let (true, Some((px, py))) = (self.dragging, self.pointer_position) {
            let dx = (x - px) as f32;
            let dy = (y - py) as f32;
            if dx != 0.0 || dy != 0.0 {
                bus.push(InputEvent::Orbit {
                    yaw: -dx * self.orbit_sensitivity,
                    pitch: dy * self.orbit_sensitivity,
                });
            }
        }
        self.pointer_position = Some((x, y));
    }

    /// Scroll wheel step
    pub fn process_scroll(&mut self, delta: f32, bus: &mut EventBus) {
        if delta != 0.0 {
            bus.push(InputEvent::Zoom(delta));
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_fire_once_per_press() {
        let mut input = InputState::new();
        let mut bus = EventBus::new();

        input.process_key_down(KeyCode::Digit1, &mut bus);
        // Key repeat while held does not fire again
        input.process_key_down(KeyCode::Digit1, &mut bus);
        assert_eq!(bus.drain(), vec![InputEvent::KeyTrigger("left".into())]);
        assert!(input.is_key_down(KeyCode::Digit1));

        input.process_key_up(KeyCode::Digit1);
        input.process_key_down(KeyCode::Digit1, &mut bus);
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn test_unbound_key_is_silent() {
        let mut input = InputState::new();
        let mut bus = EventBus::new();
        input.process_key_down(KeyCode::KeyW, &mut bus);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_custom_binding() {
        let mut input = InputState::new();
        let mut bus = EventBus::new();
        input.clear_bindings();
        input.bind_trigger("left", vec![KeyCode::KeyQ, KeyCode::ArrowLeft]);

        input.process_key_down(KeyCode::Digit1, &mut bus);
        assert!(bus.is_empty());

        input.process_key_down(KeyCode::ArrowLeft, &mut bus);
        assert_eq!(bus.drain(), vec![InputEvent::KeyTrigger("left".into())]);
    }

    #[test]
    fn test_drag_produces_interaction_edges_and_orbit() {
        let mut input = InputState::new();
        let mut bus = EventBus::new();

        // Moves before a drag only record the position
        input.process_pointer_move(100.0, 100.0, &mut bus);
        assert!(bus.is_empty());

        input.process_pointer_down(&mut bus);
        input.process_pointer_down(&mut bus);
        input.process_pointer_move(110.0, 100.0, &mut bus);
        input.process_pointer_up(&mut bus);
        input.process_pointer_up(&mut bus);

        let events = bus.drain();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], InputEvent::InteractionStart);
        match events[1] {
            InputEvent::Orbit { yaw, pitch } => {
                assert!((yaw + 10.0 * DEFAULT_ORBIT_SENSITIVITY).abs() < 1e-6);
                assert_eq!(pitch, 0.0);
            }
            ref other => panic!("expected orbit, got {:?}", other),
        }
        assert_eq!(events[2], InputEvent::InteractionEnd);
        assert!(!input.is_dragging());
    }
}
