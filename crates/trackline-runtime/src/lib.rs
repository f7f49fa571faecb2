//! Trackline Runtime - Frame loop infrastructure
//!
//! Provides the building blocks the per-tick update sits on:
//! - `GameClock` - frame delta tracking with a clamp against long stalls
//! - `InputEvent` / `EventBus` - edge-triggered input queue drained once per tick
//! - `InputState` - turns raw key and pointer input into `InputEvent`s

mod clock;
mod event;
mod event_bus;
mod input;

pub use clock::GameClock;
pub use event::InputEvent;
pub use event_bus::EventBus;
pub use input::InputState;
