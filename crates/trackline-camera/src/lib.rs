//! Trackline Camera - Chase camera with a manual override
//!
//! - `Camera` - orbit camera whose pose the rig writes
//! - `CameraRig` - follows the actor until the user grabs the view, then
//!   hands control back when they let go

pub mod camera;
pub mod rig;

pub use camera::Camera;
pub use rig::{CameraRig, RigConfig, RigMode};
