//! Scenario file format definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use trackline_core::PlaneAxis;
use winit::keyboard::KeyCode;

/// Root structure of a scenario TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub scenario: ScenarioMetadata,
    #[serde(default)]
    pub camera: CameraDef,
    #[serde(default)]
    pub paths: Vec<PathDef>,
    #[serde(default)]
    pub junctions: Vec<JunctionDef>,
    /// Trigger symbol -> keys, written as `winit` key code names such as
    /// `Digit1`. When absent the default bindings apply.
    #[serde(default)]
    pub bindings: Option<BTreeMap<String, Vec<KeyCode>>>,
}

/// Scenario metadata and motion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMetadata {
    pub name: String,
    /// Asset path of the actor model
    pub model: String,
    /// Path the actor starts on and returns to on restart
    pub home: String,
    /// Parameter advance: per second when time scaled, per tick otherwise
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default)]
    pub step: StepDef,
    #[serde(default)]
    pub on_path_end: OnPathEndDef,
}

fn default_speed() -> f32 {
    1.32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDef {
    #[default]
    TimeScaled,
    PerFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnPathEndDef {
    #[default]
    Restart,
    Stop,
}

/// Chase camera placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraDef {
    #[serde(default = "default_trail_distance")]
    pub trail_distance: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_look_at_offset")]
    pub look_at_offset: [f32; 3],
}

fn default_trail_distance() -> f32 {
    200.0
}

fn default_height() -> f32 {
    100.0
}

fn default_look_at_offset() -> [f32; 3] {
    [0.0, 10.0, -50.0]
}

impl Default for CameraDef {
    fn default() -> Self {
        Self {
            trail_distance: default_trail_distance(),
            height: default_height(),
            look_at_offset: default_look_at_offset(),
        }
    }
}

/// A named path, built by concatenating its segments in order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDef {
    pub name: String,
    #[serde(default)]
    pub looping: bool,
    #[serde(default)]
    pub segments: Vec<SegmentDef>,
}

/// One piece of a path's waypoint list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SegmentDef {
    /// A single waypoint
    Point { at: [f32; 3] },
    /// A straight run, optionally subdivided
    Straight {
        from: [f32; 3],
        to: [f32; 3],
        #[serde(default = "default_subdivisions")]
        subdivisions: usize,
    },
    /// A circular arc; angles in degrees
    Arc {
        center: [f32; 3],
        radius: f32,
        start_deg: f32,
        end_deg: f32,
        points: usize,
        #[serde(default)]
        axis: PlaneAxis,
    },
}

fn default_subdivisions() -> usize {
    1
}

/// A branch point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JunctionDef {
    pub name: String,
    pub position: [f32; 3],
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    /// Trigger symbol -> path name
    pub branches: BTreeMap<String, String>,
}

fn default_tolerance() -> f32 {
    10.0
}
