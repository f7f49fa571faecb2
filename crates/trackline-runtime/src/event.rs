//! Input events consumed by the tick loop

/// Discrete input edges delivered to a scenario.
///
/// Nothing here is polled: each event represents one edge (a key going
/// down, a drag starting or ending) or one chunk of drag motion.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A bound key was pressed; carries the trigger symbol it maps to
    KeyTrigger(String),
    /// Manual camera control started (pointer drag on the viewport)
    InteractionStart,
    /// Manual camera control ended
    InteractionEnd,
    /// Manual orbit motion in radians, applied while the user owns the camera
    Orbit { yaw: f32, pitch: f32 },
    /// Manual zoom step, positive moves closer
    Zoom(f32),
}
