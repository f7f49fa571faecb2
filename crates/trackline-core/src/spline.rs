//! Pure spline math: uniform Catmull-Rom segment evaluation.
//!
//! A segment runs from `p1` (local t = 0) to `p2` (local t = 1); `p0` and
//! `p3` are the neighbours that shape the tangents at either end.

use crate::Vec3;

/// Catmull-Rom spline interpolation between four points.
pub fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    (p1 * 2.0
        + (p2 - p0) * t
        + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
        + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * t3)
        * 0.5
}

/// First derivative of [`catmull_rom`] with respect to local t.
pub fn catmull_rom_derivative(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    ((p2 - p0)
        + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * (2.0 * t)
        + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * (3.0 * t2))
        * 0.5
}

/// Phantom control point placed by reflecting `neighbour` through `end`.
///
/// Used for open curves so the boundary tangent follows the single real
/// neighbour.
pub fn reflect(end: Vec3, neighbour: Vec3) -> Vec3 {
    end * 2.0 - neighbour
}
