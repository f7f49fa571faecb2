//! Turning a parsed scenario file into curves, junctions and settings.

use crate::format::{OnPathEndDef, PathDef, ScenarioFile, SegmentDef, StepDef};
use std::collections::BTreeSet;
use trackline_camera::RigConfig;
use trackline_core::{waypoint, PathCurve, Result, TracklineError, Vec3, Waypoints};
use trackline_motion::{
    CurveId, CurveSet, Junction, JunctionGraph, MotionConfig, OnPathEnd, StepMode,
};
use trackline_runtime::InputState;
use winit::keyboard::KeyCode;

/// Waypoint spacing this many times the path's median counts as a gap
const GAP_FACTOR: f32 = 2.5;

/// Everything static about a scenario, ready to run.
#[derive(Debug)]
pub struct Track {
    pub name: String,
    pub model: String,
    pub curves: CurveSet,
    pub junctions: JunctionGraph,
    pub home: CurveId,
    pub motion: MotionConfig,
    pub rig: RigConfig,
    /// Trigger bindings; `None` keeps the defaults
    pub bindings: Option<Vec<(String, Vec<KeyCode>)>>,
}

fn config_error(msg: String) -> TracklineError {
    TracklineError::Config(msg)
}

fn finite_positive(value: f32, what: &str) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(config_error(format!("{} must be positive, got {}", what, value)))
    }
}

/// Build a [`Track`] from a parsed file.
///
/// Every reference is resolved here: an unknown path name, an unbound key
/// or a curve with too few points fails the whole build.
pub fn build_track(file: &ScenarioFile) -> Result<Track> {
    let meta = &file.scenario;

    let mut curves = CurveSet::new();
    for path in &file.paths {
        let waypoints = build_waypoints(path)?;
        let curve = PathCurve::new(waypoints, path.looping)
            .map_err(|e| config_error(format!("path '{}': {}", path.name, e)))?;
        curves.insert(path.name.clone(), curve)?;
    }

    let home = curves
        .id(&meta.home)
        .ok_or_else(|| config_error(format!("home path '{}' is not defined", meta.home)))?;

    let mut junctions = JunctionGraph::new();
    for def in &file.junctions {
        if junctions.find(&def.name).is_some() {
            return Err(config_error(format!("duplicate junction name '{}'", def.name)));
        }
        let position = Vec3::from(def.position);
        if !position.is_finite() {
            return Err(config_error(format!("junction '{}' position is not finite", def.name)));
        }
        let tolerance =
            finite_positive(def.tolerance, &format!("junction '{}' tolerance", def.name))?;
        if def.branches.is_empty() {
            return Err(config_error(format!("junction '{}' has no branches", def.name)));
        }

        let mut junction = Junction::new(def.name.clone(), position, tolerance);
        for (trigger, path) in &def.branches {
            let curve = curves.id(path).ok_or_else(|| {
                config_error(format!(
                    "junction '{}' branch '{}' refers to unknown path '{}'",
                    def.name, trigger, path
                ))
            })?;
            junction = junction.with_branch(trigger.clone(), curve);
        }
        junctions.add(junction);
    }

    let speed = finite_positive(meta.speed, "speed")?;
    let motion = MotionConfig {
        step: match meta.step {
            StepDef::TimeScaled => StepMode::TimeScaled { per_second: speed },
            StepDef::PerFrame => StepMode::PerFrame { per_tick: speed },
        },
        on_path_end: match meta.on_path_end {
            OnPathEndDef::Restart => OnPathEnd::Restart,
            OnPathEndDef::Stop => OnPathEnd::Stop,
        },
    };

    let look_at_offset = Vec3::from(file.camera.look_at_offset);
    if !(file.camera.trail_distance.is_finite()
        && file.camera.height.is_finite()
        && look_at_offset.is_finite())
    {
        return Err(config_error("camera offsets must be finite".into()));
    }
    let rig = RigConfig {
        trail_distance: file.camera.trail_distance,
        height: file.camera.height,
        look_at_offset,
    };

    let bindings = file.bindings.as_ref().map(|map| {
        map.iter()
            .map(|(trigger, keys)| (trigger.clone(), keys.clone()))
            .collect::<Vec<_>>()
    });

    tracing::debug!(
        "built scenario '{}': {} paths, {} junctions",
        meta.name,
        curves.len(),
        junctions.len()
    );

    Ok(Track {
        name: meta.name.clone(),
        model: meta.model.clone(),
        curves,
        junctions,
        home,
        motion,
        rig,
        bindings,
    })
}

fn build_waypoints(path: &PathDef) -> Result<Waypoints> {
    let mut waypoints = Waypoints::new();
    for (i, segment) in path.segments.iter().enumerate() {
        let piece = build_segment(segment).map_err(|e| {
            config_error(format!("path '{}' segment {}: {}", path.name, i, e))
        })?;
        waypoints.extend(&piece);
    }
    Ok(waypoints)
}

fn build_segment(segment: &SegmentDef) -> Result<Waypoints> {
    match segment {
        SegmentDef::Point { at } => Ok(Waypoints::from_points(vec![Vec3::from(*at)])),
        SegmentDef::Straight {
            from,
            to,
            subdivisions,
        } => waypoint::straight_subdivided(Vec3::from(*from), Vec3::from(*to), *subdivisions),
        SegmentDef::Arc {
            center,
            radius,
            start_deg,
            end_deg,
            points,
            axis,
        } => waypoint::arc(
            Vec3::from(*center),
            *radius,
            start_deg.to_radians(),
            end_deg.to_radians(),
            *points,
            *axis,
        ),
    }
}

impl Track {
    /// Input state with this scenario's bindings applied
    pub fn input_state(&self) -> InputState {
        let mut input = InputState::new();
        if let Some(bindings) = &self.bindings {
            input.clear_bindings();
            for (trigger, keys) in bindings {
                input.bind_trigger(trigger.clone(), keys.clone());
            }
        }
        input
    }

    /// Layout problems that are legal but probably unintended, such as a gap
    /// between concatenated waypoint runs.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (_, name, curve) in self.curves.iter() {
            for (index, spacing) in gaps(curve.waypoints().points()) {
                warnings.push(format!(
                    "path '{}': {:.1} unit gap after waypoint {}",
                    name, spacing, index
                ));
            }
        }

        let input = self.input_state();
        let bound: BTreeSet<String> = input.bound_triggers().into_iter().collect();
        for (_, junction) in self.junctions.iter() {
            for trigger in junction.triggers() {
                let Some(curve) = junction.branch(trigger).and_then(|id| self.curves.get(id)) else {
                    continue;
                };
                let start = curve.position_at(0.0);
                let offset = start.distance(&junction.position);
                if offset > junction.tolerance {
                    warnings.push(format!(
                        "junction '{}': branch '{}' starts {:.1} units away",
                        junction.name, trigger, offset
                    ));
                }
                if !bound.contains(trigger) {
                    warnings.push(format!(
                        "junction '{}': no key is bound to trigger '{}'",
                        junction.name, trigger
                    ));
                }
            }
        }
        warnings
    }
}

/// Consecutive waypoints spaced much further apart than is typical for the
/// sequence, as `(index of the first point, spacing)`.
fn gaps(points: &[Vec3]) -> Vec<(usize, f32)> {
    if points.len() < 3 {
        return Vec::new();
    }
    let spacings: Vec<f32> = points.windows(2).map(|w| w[0].distance(&w[1])).collect();
    let mut sorted = spacings.clone();
    sorted.sort_by(f32::total_cmp);
    let median = sorted[sorted.len() / 2];
    if median <= 0.0 {
        return Vec::new();
    }
    spacings
        .into_iter()
        .enumerate()
        .filter(|(_, s)| *s > median * GAP_FACTOR)
        .collect()
}
