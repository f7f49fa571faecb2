//! Event bus for queued input

use crate::event::InputEvent;

/// A simple event queue that input handlers push to and the tick drains
pub struct EventBus {
    events: Vec<InputEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus in arrival order
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
