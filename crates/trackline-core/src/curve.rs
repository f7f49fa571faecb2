//! Arc-length parameterized Catmull-Rom path curves.
//!
//! A [`PathCurve`] interpolates every waypoint with a uniform Catmull-Rom
//! spline, so position is continuous and the direction of travel does not
//! jump at waypoints. The public parameter `t` is the normalized distance
//! travelled along the curve, not the raw spline parameter: equal steps in
//! `t` move an actor equal distances regardless of how unevenly the
//! waypoints are spaced.

use crate::spline::{catmull_rom, catmull_rom_derivative, reflect};
use crate::{Result, TracklineError, Vec3, Waypoints};

/// Arc-length table resolution per spline segment.
const SAMPLES_PER_SEGMENT: usize = 20;

/// Below this derivative length the tangent falls back to a chord direction.
const MIN_DERIVATIVE: f32 = 1e-6;

/// A sampled point along a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Normalized arc position in [0, 1]
    pub t: f32,
    pub position: Vec3,
    /// Unit tangent (direction of travel)
    pub tangent: Vec3,
}

/// A smooth curve through an ordered waypoint sequence.
///
/// Open curves run from the first to the last waypoint and clamp `t` to
/// `[0, 1]`. Looping curves join the last waypoint back to the first and
/// reduce `t` modulo 1. Waypoints are fixed for the lifetime of the curve.
#[derive(Debug, Clone)]
pub struct PathCurve {
    waypoints: Waypoints,
    looping: bool,
    /// Cumulative arc length at each of `segments * SAMPLES_PER_SEGMENT + 1`
    /// evenly spaced raw spline parameters.
    lengths: Vec<f32>,
}

impl PathCurve {
    /// Build an open curve. Needs at least 2 waypoints.
    pub fn open(waypoints: Waypoints) -> Result<Self> {
        Self::build(waypoints, false)
    }

    /// Build a closed curve. Needs at least 3 waypoints.
    pub fn looping(waypoints: Waypoints) -> Result<Self> {
        Self::build(waypoints, true)
    }

    /// Build an open or closed curve.
    pub fn new(waypoints: Waypoints, looping: bool) -> Result<Self> {
        Self::build(waypoints, looping)
    }

    fn build(waypoints: Waypoints, looping: bool) -> Result<Self> {
        let required = if looping { 3 } else { 2 };
        if waypoints.len() < required {
            return Err(TracklineError::DegenerateCurve {
                required,
                got: waypoints.len(),
            });
        }
        if let Some(index) = waypoints.points().iter().position(|p| !p.is_finite()) {
            return Err(TracklineError::NonFiniteWaypoint { index });
        }

        let mut curve = Self {
            waypoints,
            looping,
            lengths: Vec::new(),
        };
        curve.lengths = curve.build_length_table();
        Ok(curve)
    }

    fn build_length_table(&self) -> Vec<f32> {
        let divisions = self.segment_count() * SAMPLES_PER_SEGMENT;
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut total = 0.0_f32;
        let mut prev = self.eval_raw(0.0);
        lengths.push(0.0);
        for i in 1..=divisions {
            let pos = self.eval_raw(i as f32 / divisions as f32);
            total += (pos - prev).length();
            prev = pos;
            lengths.push(total);
        }
        lengths
    }

    pub fn waypoints(&self) -> &Waypoints {
        &self.waypoints
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Estimated total arc length.
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Number of spline segments between waypoints.
    pub fn segment_count(&self) -> usize {
        let n = self.waypoints.len();
        if self.looping {
            n
        } else {
            n - 1
        }
    }

    /// Reduce `t` into the curve's valid range.
    pub fn wrap_t(&self, t: f32) -> f32 {
        if self.looping {
            t.rem_euclid(1.0)
        } else {
            t.clamp(0.0, 1.0)
        }
    }

    /// Position at normalized arc position `t`.
    pub fn position_at(&self, t: f32) -> Vec3 {
        self.eval_raw(self.arc_to_raw(self.wrap_t(t)))
    }

    /// Unit tangent at normalized arc position `t`.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let (seg, local) = self.locate(self.arc_to_raw(self.wrap_t(t)));
        let (p0, p1, p2, p3) = self.controls(seg);

        let derivative = catmull_rom_derivative(p0, p1, p2, p3, local);
        if derivative.length() > MIN_DERIVATIVE {
            return derivative.normalized();
        }
        // Stationary spot (duplicated waypoints): use the chord instead
        [p2 - p1, p3 - p0]
            .into_iter()
            .find(|d| d.length() > MIN_DERIVATIVE)
            .map(|d| d.normalized())
            .unwrap_or(Vec3::FORWARD)
    }

    /// Evenly spaced samples along the curve.
    ///
    /// Open curves include both endpoints; looping curves cover `[0, 1)`.
    pub fn sample(&self, count: usize) -> Vec<CurveSample> {
        if count == 0 {
            return Vec::new();
        }
        let denom = if self.looping || count == 1 {
            count as f32
        } else {
            (count - 1) as f32
        };
        (0..count)
            .map(|i| {
                let t = i as f32 / denom;
                CurveSample {
                    t,
                    position: self.position_at(t),
                    tangent: self.tangent_at(t),
                }
            })
            .collect()
    }

    // ─── Internals ───────────────────────────────────────

    /// Map a normalized arc position onto the raw spline parameter.
    fn arc_to_raw(&self, t: f32) -> f32 {
        let total = self.length();
        let last = self.lengths.len() - 1;
        if total <= 0.0 {
            return t;
        }
        let target = t * total;
        let i = self.lengths.partition_point(|&l| l < target);
        if i == 0 {
            return 0.0;
        }
        if i > last {
            return 1.0;
        }
        let (a, b) = (self.lengths[i - 1], self.lengths[i]);
        let frac = if b > a { (target - a) / (b - a) } else { 0.0 };
        ((i - 1) as f32 + frac) / last as f32
    }

    /// Split a raw parameter in [0, 1] into (segment, local t).
    fn locate(&self, raw: f32) -> (usize, f32) {
        let segments = self.segment_count();
        let scaled = raw.clamp(0.0, 1.0) * segments as f32;
        let seg = (scaled.floor() as usize).min(segments - 1);
        (seg, scaled - seg as f32)
    }

    fn eval_raw(&self, raw: f32) -> Vec3 {
        let (seg, local) = self.locate(raw);
        let (p0, p1, p2, p3) = self.controls(seg);
        catmull_rom(p0, p1, p2, p3, local)
    }

    /// The four control points shaping segment `seg`.
    fn controls(&self, seg: usize) -> (Vec3, Vec3, Vec3, Vec3) {
        let pts = self.waypoints.points();
        let n = pts.len();
        if self.looping {
            return (
                pts[(seg + n - 1) % n],
                pts[seg],
                pts[(seg + 1) % n],
                pts[(seg + 2) % n],
            );
        }
        let p1 = pts[seg];
        let p2 = pts[seg + 1];
        let p0 = if seg == 0 { reflect(p1, p2) } else { pts[seg - 1] };
        let p3 = if seg + 2 < n { pts[seg + 2] } else { reflect(p2, p1) };
        (p0, p1, p2, p3)
    }
}
