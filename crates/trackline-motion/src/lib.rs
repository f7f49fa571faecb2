//! Path-following motion for Trackline
//!
//! - `CurveSet` - named registry of immutable path curves
//! - `JunctionGraph` - branch points armed once per traversal by a trigger
//! - `Actor` / `ActorSlot` - the moving actor and its asynchronous load state
//! - `MotionController` - advances an actor along its active curve each tick
//! - `AssetLoader` - the asynchronous loading boundary

pub mod actor;
pub mod controller;
pub mod curve_set;
mod error;
pub mod junction;
pub mod loader;

pub use actor::{Actor, ActorSlot};
pub use controller::{
    AdvanceReport, MotionConfig, MotionController, MotionEvent, OnPathEnd, StepMode,
};
pub use curve_set::{CurveId, CurveSet};
pub use error::{JunctionError, LoadFailure, TriggerRejection};
pub use junction::{Junction, JunctionGraph, JunctionId};
pub use loader::{
    AssetLoader, FailingLoader, ImmediateLoader, LoadEvent, LoadSink, LoadTracker, NodeHandle,
    SceneNode, ThreadedLoader,
};
