//! Waypoint generation for straight runs and circular arcs.
//!
//! Generators only emit points. Sequences are joined with [`Waypoints::extend`]
//! or [`Waypoints::then`] exactly as given: no gap closing or continuity check
//! is performed, so a caller that concatenates non-touching pieces gets a
//! visible kink in the resulting curve rather than an error.

use crate::{Result, TracklineError, Vec3};
use serde::{Deserialize, Serialize};

/// Axis an arc is wound around. The arc lies in the plane orthogonal to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaneAxis {
    X,
    /// Ground plane: cosine along X, sine along Z
    #[default]
    Y,
    Z,
}

impl PlaneAxis {
    /// In-plane unit vectors carrying the cosine and sine terms.
    fn basis(self) -> (Vec3, Vec3) {
        match self {
            PlaneAxis::X => (Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
            PlaneAxis::Y => (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
            PlaneAxis::Z => (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        }
    }
}

/// An ordered list of points a path must pass through.
///
/// Order defines the direction of travel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Waypoints {
    points: Vec<Vec3>,
}

impl Waypoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: Vec3) {
        self.points.push(point);
    }

    /// Append another sequence verbatim.
    pub fn extend(&mut self, other: &Waypoints) {
        self.points.extend_from_slice(&other.points);
    }

    /// Builder form of [`Waypoints::extend`].
    pub fn then(mut self, other: Waypoints) -> Self {
        self.points.extend(other.points);
        self
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Vec3> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Vec3> {
        self.points.last().copied()
    }
}

impl From<Vec<Vec3>> for Waypoints {
    fn from(points: Vec<Vec3>) -> Self {
        Self::from_points(points)
    }
}

/// Points along a circular arc.
///
/// Produces `point_count + 1` points, evenly spaced in angle from
/// `start_angle` to `end_angle` inclusive (radians), each `radius` away from
/// `center` in the plane orthogonal to `axis`. The angle may run in either
/// direction; `end_angle < start_angle` winds the arc backwards.
pub fn arc(
    center: Vec3,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
    point_count: usize,
    axis: PlaneAxis,
) -> Result<Waypoints> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(TracklineError::InvalidWaypoints(format!(
            "arc radius must be positive, got {}",
            radius
        )));
    }
    if point_count == 0 {
        return Err(TracklineError::InvalidWaypoints(
            "arc needs a point count of at least 1".into(),
        ));
    }
    if !(start_angle.is_finite() && end_angle.is_finite() && center.is_finite()) {
        return Err(TracklineError::InvalidWaypoints(
            "arc center and angles must be finite".into(),
        ));
    }

    let (u, v) = axis.basis();
    let step = (end_angle - start_angle) / point_count as f32;
    let points = (0..=point_count)
        .map(|i| {
            let angle = start_angle + i as f32 * step;
            center + u * (radius * angle.cos()) + v * (radius * angle.sin())
        })
        .collect();
    Ok(Waypoints { points })
}

/// The two endpoints of a straight run.
pub fn straight(from: Vec3, to: Vec3) -> Waypoints {
    Waypoints {
        points: vec![from, to],
    }
}

/// A straight run split into `segments` equal pieces (`segments + 1` points).
pub fn straight_subdivided(from: Vec3, to: Vec3, segments: usize) -> Result<Waypoints> {
    if segments == 0 {
        return Err(TracklineError::InvalidWaypoints(
            "straight run needs at least 1 segment".into(),
        ));
    }
    let points = (0..=segments)
        .map(|i| from.lerp(&to, i as f32 / segments as f32))
        .collect();
    Ok(Waypoints { points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn quarter_arc_three_points() {
        let wp = arc(Vec3::ZERO, 10.0, 0.0, FRAC_PI_2, 2, PlaneAxis::Y).unwrap();
        assert_eq!(wp.len(), 3);

        let mid = wp.points()[1];
        assert!((mid.length() - 10.0).abs() < 1e-4);
        let angle = mid.z.atan2(mid.x);
        assert!((angle - FRAC_PI_4).abs() < 1e-5);

        assert!((wp.points()[0] - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
        assert!((wp.points()[2] - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn arc_lies_in_plane_around_center() {
        let center = Vec3::new(347.0, -64.0, -135.0);
        let wp = arc(center, 300.0, PI, PI * 1.31, 23, PlaneAxis::Y).unwrap();
        assert_eq!(wp.len(), 24);
        for p in wp.points() {
            assert!((p.y - center.y).abs() < 1e-4);
            assert!((p.distance(&center) - 300.0).abs() < 1e-2);
        }
        // Starts at angle PI: straight out along -X from the center
        assert!((wp.points()[0] - Vec3::new(47.0, -64.0, -135.0)).length() < 1e-2);
    }

    #[test]
    fn arc_other_axes() {
        let wp = arc(Vec3::ZERO, 2.0, 0.0, FRAC_PI_2, 1, PlaneAxis::Z).unwrap();
        assert!((wp.points()[1] - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        let wp = arc(Vec3::ZERO, 2.0, 0.0, FRAC_PI_2, 1, PlaneAxis::X).unwrap();
        assert!((wp.points()[0] - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        assert!((wp.points()[1] - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn arc_rejects_bad_parameters() {
        assert!(arc(Vec3::ZERO, 0.0, 0.0, 1.0, 4, PlaneAxis::Y).is_err());
        assert!(arc(Vec3::ZERO, -1.0, 0.0, 1.0, 4, PlaneAxis::Y).is_err());
        assert!(arc(Vec3::ZERO, 1.0, 0.0, 1.0, 0, PlaneAxis::Y).is_err());
        assert!(arc(Vec3::ZERO, 1.0, f32::NAN, 1.0, 4, PlaneAxis::Y).is_err());
    }

    #[test]
    fn straight_and_subdivided() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 0.0, -100.0);
        assert_eq!(straight(a, b).points(), &[a, b]);

        let wp = straight_subdivided(a, b, 4).unwrap();
        assert_eq!(wp.len(), 5);
        assert!((wp.points()[2] - Vec3::new(0.0, 0.0, -50.0)).length() < 1e-4);
        assert!(straight_subdivided(a, b, 0).is_err());
    }

    #[test]
    fn concatenation_keeps_gaps() {
        let decision = Vec3::new(47.0, -64.0, -100.0);
        let mut wp = Waypoints::new();
        wp.push(decision);
        let curve = arc(Vec3::new(347.0, -64.0, -135.0), 300.0, PI, PI * 1.31, 23, PlaneAxis::Y)
            .unwrap();
        wp.extend(&curve);
        assert_eq!(wp.len(), 25);
        assert_eq!(wp.first(), Some(decision));
        // The arc starts 35 units away from the decision point; nothing bridges it
        assert!(wp.points()[0].distance(&wp.points()[1]) > 30.0);

        let joined = straight(Vec3::ZERO, decision).then(curve);
        assert_eq!(joined.len(), 26);
    }
}
