//! Trackline Core - Foundational types for path following
//!
//! This crate provides the geometry every other Trackline crate builds on:
//! - `Vec3`, `Quat`, `Transform` - Spatial types
//! - `Waypoints` and the arc / straight generators
//! - `PathCurve` - arc-length parameterized Catmull-Rom curve
//! - Error types and Result alias

mod error;
mod types;

pub mod curve;
pub mod spline;
pub mod waypoint;

pub use curve::{CurveSample, PathCurve};
pub use error::{Result, TracklineError};
pub use types::{Quat, Transform, Vec3};
pub use waypoint::{PlaneAxis, Waypoints};
