//! Trackline Scenario - TOML scenario files and the tick loop
//!
//! A scenario file describes the paths, junctions, camera rig and key
//! bindings of one demo. Loading parses it, building turns it into curves and
//! a junction graph (failing fast on bad references), and [`Scenario`] runs
//! the per-tick update on top.

mod build;
mod format;
mod loader;
mod scenario;

pub use build::{build_track, Track};
pub use format::{
    CameraDef, JunctionDef, OnPathEndDef, PathDef, ScenarioFile, ScenarioMetadata, SegmentDef,
    StepDef,
};
pub use loader::{load_scenario, load_scenario_string};
pub use scenario::{Scenario, TickReport};
